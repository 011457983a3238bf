//! Orchestration of example generation: over-request, parse, validate, top up
//! with a supplementary call, and retry with a warmer temperature until the
//! target count is met or the budget runs out.

use tracing::{info, instrument, warn};

use crate::config::GenSettings;
use crate::domain::{Example, Level};
use crate::gemini::TextGenerator;
use crate::parser;
use crate::prompt;
use crate::validate;

/// Ask for more examples than needed so filtering still leaves enough.
fn over_request(num_examples: usize) -> usize {
  (num_examples + 3).min(8)
}

/// Generate up to `num_examples` validated examples for `word`. Always
/// returns a non-empty vec; when everything fails the single record is the
/// fixed failure placeholder.
#[instrument(level = "info", skip(llm, settings), fields(%word, level = %level, num_examples))]
pub async fn generate_examples(
  llm: Option<&dyn TextGenerator>,
  word: &str,
  level: Level,
  num_examples: usize,
  settings: &GenSettings,
) -> Vec<Example> {
  let llm = match llm {
    Some(l) => l,
    None => {
      warn!(target: "generation", "No generation backend configured");
      return vec![Example::generation_failed()];
    }
  };

  let requested = over_request(num_examples);
  let mut best: Vec<Example> = Vec::new();

  for attempt in 0..=settings.max_generation_retries {
    let temperature = attempt_temperature(settings.temperature, attempt);
    if attempt > 0 {
      info!(target: "generation", attempt, temperature, "Retrying full generation");
    }

    let prompt = prompt::example_prompt(word, level, requested);
    let response = match llm.generate(&prompt, temperature).await {
      Ok(r) => r,
      Err(e) => {
        warn!(target: "generation", attempt, error = %e, "Generation call failed");
        continue;
      }
    };

    let mut valid = parse_valid(&response, word);
    info!(target: "generation", valid = valid.len(), requested = num_examples, "Parsed valid examples");

    if valid.len() >= num_examples {
      valid.truncate(num_examples);
      return valid;
    }

    // One top-up call before burning a whole retry.
    if !valid.is_empty() && attempt < settings.max_generation_retries {
      let remaining = num_examples - valid.len();
      info!(target: "generation", remaining, "Requesting supplementary examples");

      let supplementary_prompt = prompt::example_prompt(word, level, remaining + 2);
      let supplementary_temp = (temperature + 0.15).min(0.95);
      if let Ok(extra) = llm.generate(&supplementary_prompt, supplementary_temp).await {
        let additional = parse_valid(&extra, word);
        info!(target: "generation", added = additional.len(), "Supplementary examples merged");
        valid.extend(additional);
        if valid.len() >= num_examples {
          valid.truncate(num_examples);
          return valid;
        }
      }
    }

    if valid.len() > best.len() {
      best = valid.clone();
    }

    // Below half the target: regenerate from scratch.
    if valid.len() < 1.max(num_examples / 2) {
      continue;
    }

    warn!(target: "generation", returned = valid.len(), requested = num_examples, "Returning partial example set");
    return valid;
  }

  if !best.is_empty() {
    warn!(target: "generation", returned = best.len(), "Exhausted retries; returning best accumulated set");
    best.truncate(num_examples);
    return best;
  }

  warn!(target: "generation", "All generation attempts failed");
  vec![Example::generation_failed()]
}

fn attempt_temperature(base: f32, attempt: u32) -> f32 {
  if attempt == 0 {
    base
  } else {
    (base + 0.1 * attempt as f32).min(0.9)
  }
}

/// Parse, semantically validate, and drop placeholder records.
fn parse_valid(response: &str, word: &str) -> Vec<Example> {
  let parsed = parser::parse_examples(response, word);
  validate::validate_semantics(parsed, word)
    .into_iter()
    .filter(|ex| !ex.is_placeholder())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::GENERATION_FAILED_JA;
  use crate::gemini::GenerateError;
  use std::collections::VecDeque;
  use std::sync::Mutex;

  struct FailingGen;

  #[async_trait::async_trait]
  impl TextGenerator for FailingGen {
    async fn generate(&self, _prompt: &str, _temperature: f32) -> Result<String, GenerateError> {
      Err(GenerateError::Exhausted(3))
    }
  }

  /// Returns scripted responses in order, then errors. Records temperatures.
  struct ScriptedGen {
    responses: Mutex<VecDeque<String>>,
    temperatures: Mutex<Vec<f32>>,
  }

  impl ScriptedGen {
    fn new(responses: Vec<String>) -> Self {
      Self {
        responses: Mutex::new(responses.into()),
        temperatures: Mutex::new(Vec::new()),
      }
    }
  }

  #[async_trait::async_trait]
  impl TextGenerator for ScriptedGen {
    async fn generate(&self, _prompt: &str, temperature: f32) -> Result<String, GenerateError> {
      self.temperatures.lock().unwrap().push(temperature);
      self.responses.lock().unwrap().pop_front().ok_or(GenerateError::Exhausted(3))
    }
  }

  fn blocks(n: usize) -> String {
    (1..=n)
      .map(|i| {
        format!(
          "{i}. Context: Daily life scene number {i}.\n\
           Japanese: 今日は友達とおいしいりんごを食べるつもりです。\n\
           Korean: 오늘은 친구와 맛있는 사과를 먹을 거예요.\n"
        )
      })
      .collect()
  }

  #[tokio::test]
  async fn five_valid_blocks_yield_exactly_five() {
    let gen = ScriptedGen::new(vec![blocks(8)]);
    let settings = GenSettings::default();
    let examples = generate_examples(Some(&gen), "食べる", Level::N3, 5, &settings).await;
    assert_eq!(examples.len(), 5);
    assert!(examples.iter().all(|ex| ex.japanese.contains("食べる")));
  }

  #[tokio::test]
  async fn simple_format_round_trip_yields_five_entries() {
    let gen = ScriptedGen::new(vec![blocks(8)]);
    let settings = GenSettings::default();
    let examples = generate_examples(Some(&gen), "食べる", Level::N3, 5, &settings).await;
    let out = crate::protocol::format_examples(&examples, crate::protocol::ResponseFormat::Simple);
    assert_eq!(out.len(), 5);
    assert!(out.iter().all(|e| e.japanese_example.contains("食べる")));
    assert!(out.iter().all(|e| !e.korean_translation.is_empty()));
  }

  #[tokio::test]
  async fn always_failing_backend_returns_single_placeholder() {
    let settings = GenSettings::default();
    let examples = generate_examples(Some(&FailingGen), "食べる", Level::N3, 5, &settings).await;
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].japanese, GENERATION_FAILED_JA);
  }

  #[tokio::test]
  async fn missing_backend_returns_single_placeholder() {
    let settings = GenSettings::default();
    let examples = generate_examples(None, "食べる", Level::N3, 5, &settings).await;
    assert_eq!(examples.len(), 1);
    assert!(examples[0].is_placeholder());
  }

  #[tokio::test]
  async fn shortfall_triggers_supplementary_call() {
    // First response has 3 valid blocks, the supplementary one adds 4 more.
    let gen = ScriptedGen::new(vec![blocks(3), blocks(4)]);
    let settings = GenSettings::default();
    let examples = generate_examples(Some(&gen), "食べる", Level::N3, 5, &settings).await;
    assert_eq!(examples.len(), 5);

    let temps = gen.temperatures.lock().unwrap();
    assert_eq!(temps.len(), 2);
    // Supplementary call runs warmer than the base temperature.
    assert!(temps[1] > temps[0]);
  }

  #[tokio::test]
  async fn retry_temperature_warms_up_and_caps() {
    assert!((attempt_temperature(0.7, 0) - 0.7).abs() < f32::EPSILON);
    assert!((attempt_temperature(0.7, 1) - 0.8).abs() < 1e-6);
    assert!((attempt_temperature(0.7, 3) - 0.9).abs() < 1e-6);
    assert!((attempt_temperature(0.8, 5) - 0.9).abs() < 1e-6);
  }
}
