//! Minimal Gemini client for our use-cases.
//!
//! We only call generateContent and post-process the free-text completion
//! elsewhere. Calls are instrumented and log model names, attempt counts, and
//! response sizes (not contents).
//!
//! The retry protocol is an explicit state machine: `plan` is a pure function
//! from (attempt, outcome) to the next action, so the backoff contract is
//! testable without a network. The async driver in `generate` only applies
//! the planned actions.
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::util::trunc_for_log;

/// Substituted when prompt simplification strips everything useful.
const GENERIC_INSTRUCTION: &str =
  "Analyze the Japanese word and provide its meanings in Korean.";

/// Abstraction over the text-generation capability. The orchestrator and the
/// homonym resolver only see this trait; tests script it.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
  /// Produce free text for a prompt, retrying transient failures internally.
  async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GenerateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
  #[error("all {0} generation attempts failed")]
  Exhausted(u32),
}

// --- Retry state machine ---

/// Classified result of a single generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  /// Normal completion with extractable text.
  Completed(String),
  /// Completion cut off by the output-token limit. Partial text is usable.
  Truncated(String),
  /// Rejected by the content-safety policy.
  SafetyBlocked,
  /// No candidates, empty text, or an unrecognized finish reason.
  Empty,
  /// HTTP/service failure, classified by message content.
  Transport(String),
}

/// What the driver should do after an attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
  Return(String),
  /// Sleep, then retry with the same prompt.
  RetryAfter(Duration),
  /// Sleep, then retry with a keyword-filtered prompt.
  SimplifyAndRetry(Duration),
  GiveUp,
}

/// Pure transition function for the retry loop. `attempt` is zero-based; the
/// budget covers `max_retries` attempts in total.
pub fn plan(attempt: u32, max_retries: u32, outcome: Outcome) -> Action {
  let budget_left = attempt + 1 < max_retries;
  match outcome {
    Outcome::Completed(text) => Action::Return(text),
    Outcome::Truncated(text) => Action::Return(text),
    Outcome::SafetyBlocked if budget_left => {
      // Exponential backoff for safety-driven retries.
      Action::SimplifyAndRetry(Duration::from_secs(1u64 << attempt.min(6)))
    }
    Outcome::Empty if budget_left => Action::RetryAfter(Duration::from_secs(2)),
    Outcome::Transport(msg) if budget_left => {
      let msg_l = msg.to_lowercase();
      let wait = if msg_l.contains("500") || msg_l.contains("internal") {
        Duration::from_secs(5)
      } else if msg_l.contains("quota") || msg_l.contains("rate") {
        Duration::from_secs(10)
      } else {
        Duration::from_secs(2)
      };
      Action::RetryAfter(wait)
    }
    _ => Action::GiveUp,
  }
}

/// Heuristic degradation of a prompt that tripped the safety filter: drop
/// `##...##` sections and fenced JSON, keep at most 10 topic lines.
pub fn simplify_prompt(original: &str) -> String {
  static SECTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"##[^#]*?##").unwrap());
  static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```json.*?```").unwrap());

  let stripped = SECTION_RE.replace_all(original, "");
  let stripped = FENCE_RE.replace_all(&stripped, "");

  const TOPIC_KEYWORDS: [&str; 6] =
    ["analyze", "japanese", "word", "homonym", "meaning", "translation"];

  let essential: Vec<&str> = stripped
    .lines()
    .map(str::trim)
    .filter(|line| {
      let lower = line.to_lowercase();
      TOPIC_KEYWORDS.iter().any(|k| lower.contains(k))
    })
    .take(10)
    .collect();

  if essential.is_empty() {
    GENERIC_INSTRUCTION.to_string()
  } else {
    essential.join("\n")
  }
}

// --- Gemini client ---

#[derive(Clone)]
pub struct GeminiClient {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  pub max_retries: u32,
}

impl GeminiClient {
  /// Construct the client if we find GEMINI_API_KEY; otherwise return None.
  pub fn from_env(max_retries: u32) -> Option<Self> {
    let api_key = std::env::var("GEMINI_API_KEY").ok()?;
    let base_url = std::env::var("GEMINI_BASE_URL")
      .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".into());
    let model = std::env::var("MODEL_NAME").unwrap_or_else(|_| "gemini-1.5-flash".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, model, max_retries })
  }

  /// One raw generateContent call, classified into an `Outcome`.
  /// Never returns Err: transport failures become `Outcome::Transport`.
  async fn attempt(&self, prompt: &str, temperature: f32) -> Outcome {
    let url = format!(
      "{}/v1beta/models/{}:generateContent?key={}",
      self.base_url, self.model, self.api_key
    );
    let req = GenerateContentRequest {
      contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
      generation_config: GenerationConfig {
        temperature,
        top_p: 0.95,
        top_k: 40,
        max_output_tokens: 2048,
        candidate_count: 1,
      },
      safety_settings: default_safety_settings(),
    };

    let res = match self.client.post(&url).json(&req).send().await {
      Ok(r) => r,
      Err(e) => return Outcome::Transport(e.to_string()),
    };

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_api_error(&body).unwrap_or(body);
      return Outcome::Transport(format!("Gemini HTTP {}: {}", status, msg));
    }

    let body: GenerateContentResponse = match res.json().await {
      Ok(b) => b,
      Err(e) => return Outcome::Transport(e.to_string()),
    };

    classify_response(body)
  }

  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  async fn call(&self, prompt: &str, temperature: f32) -> Result<String, GenerateError> {
    let mut prompt = prompt.to_string();
    let mut attempt = 0u32;
    loop {
      let outcome = self.attempt(&prompt, temperature).await;
      match &outcome {
        Outcome::Truncated(_) => {
          warn!(target: "generation", attempt, "Response truncated by max output tokens");
        }
        Outcome::SafetyBlocked => {
          warn!(target: "generation", attempt, "Response blocked by safety filters");
        }
        Outcome::Transport(msg) => {
          error!(target: "generation", attempt, error = %trunc_for_log(msg, 200), "Gemini call failed");
        }
        Outcome::Empty => {
          warn!(target: "generation", attempt, "Empty or unusable response");
        }
        Outcome::Completed(_) => {}
      }

      match plan(attempt, self.max_retries, outcome) {
        Action::Return(text) => {
          info!(target: "generation", attempt, response_len = text.len(), "Generation succeeded");
          return Ok(text);
        }
        Action::RetryAfter(wait) => {
          info!(target: "generation", attempt, wait_secs = wait.as_secs(), "Retrying");
          tokio::time::sleep(wait).await;
          attempt += 1;
        }
        Action::SimplifyAndRetry(wait) => {
          info!(target: "generation", attempt, wait_secs = wait.as_secs(), "Retrying with simplified prompt");
          prompt = simplify_prompt(&prompt);
          tokio::time::sleep(wait).await;
          attempt += 1;
        }
        Action::GiveUp => {
          error!(target: "generation", max_retries = self.max_retries, "All retry attempts failed");
          return Err(GenerateError::Exhausted(self.max_retries));
        }
      }
    }
  }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
  async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GenerateError> {
    self.call(prompt, temperature).await
  }
}

/// Map the wire response to an outcome, extracting text defensively: prefer
/// the first candidate's joined parts; missing pieces degrade to `Empty`.
fn classify_response(body: GenerateContentResponse) -> Outcome {
  let candidate = match body.candidates.into_iter().next() {
    Some(c) => c,
    None => return Outcome::Empty,
  };

  let text = candidate
    .content
    .map(|content| {
      content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("")
    })
    .unwrap_or_default();

  match candidate.finish_reason.as_deref() {
    Some("STOP") | None => {
      if text.trim().is_empty() {
        Outcome::Empty
      } else {
        Outcome::Completed(text)
      }
    }
    Some("MAX_TOKENS") => {
      if text.trim().is_empty() {
        Outcome::Empty
      } else {
        Outcome::Truncated(text)
      }
    }
    Some("SAFETY") => Outcome::SafetyBlocked,
    // RECITATION and anything unrecognized: no usable candidates.
    Some(_) => Outcome::Empty,
  }
}

// --- Wire DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
  contents: Vec<Content>,
  #[serde(rename = "generationConfig")]
  generation_config: GenerationConfig,
  #[serde(rename = "safetySettings")]
  safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct Content {
  parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
  text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
  temperature: f32,
  #[serde(rename = "topP")]
  top_p: f32,
  #[serde(rename = "topK")]
  top_k: u32,
  #[serde(rename = "maxOutputTokens")]
  max_output_tokens: u32,
  #[serde(rename = "candidateCount")]
  candidate_count: u32,
}

#[derive(Serialize)]
struct SafetySetting {
  category: &'static str,
  threshold: &'static str,
}

fn default_safety_settings() -> Vec<SafetySetting> {
  [
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
  ]
  .into_iter()
  .map(|category| SafetySetting { category, threshold: "BLOCK_NONE" })
  .collect()
}

#[derive(Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
  #[serde(default)]
  content: Option<CandidateContent>,
  #[serde(rename = "finishReason", default)]
  finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
  #[serde(default)]
  text: Option<String>,
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap {
    error: EObj,
  }
  #[derive(Deserialize)]
  struct EObj {
    message: String,
  }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn completed_text_returns_immediately() {
    let action = plan(0, 3, Outcome::Completed("text".into()));
    assert_eq!(action, Action::Return("text".into()));
  }

  #[test]
  fn truncated_text_is_returned_not_retried() {
    let action = plan(2, 3, Outcome::Truncated("partial".into()));
    assert_eq!(action, Action::Return("partial".into()));
  }

  #[test]
  fn safety_block_simplifies_with_exponential_backoff() {
    match plan(0, 3, Outcome::SafetyBlocked) {
      Action::SimplifyAndRetry(wait) => assert_eq!(wait, Duration::from_secs(1)),
      other => panic!("unexpected action: {:?}", other),
    }
    match plan(1, 3, Outcome::SafetyBlocked) {
      Action::SimplifyAndRetry(wait) => assert_eq!(wait, Duration::from_secs(2)),
      other => panic!("unexpected action: {:?}", other),
    }
  }

  #[test]
  fn safety_block_on_final_attempt_gives_up() {
    assert_eq!(plan(2, 3, Outcome::SafetyBlocked), Action::GiveUp);
  }

  #[test]
  fn transport_errors_classified_by_message() {
    let server = plan(0, 3, Outcome::Transport("HTTP 500 internal error".into()));
    assert_eq!(server, Action::RetryAfter(Duration::from_secs(5)));

    let rate = plan(0, 3, Outcome::Transport("quota exceeded".into()));
    assert_eq!(rate, Action::RetryAfter(Duration::from_secs(10)));

    let other = plan(0, 3, Outcome::Transport("connection reset".into()));
    assert_eq!(other, Action::RetryAfter(Duration::from_secs(2)));
  }

  #[test]
  fn empty_responses_use_short_fixed_delay() {
    assert_eq!(plan(0, 3, Outcome::Empty), Action::RetryAfter(Duration::from_secs(2)));
    assert_eq!(plan(2, 3, Outcome::Empty), Action::GiveUp);
  }

  #[test]
  fn simplify_keeps_topic_lines_only() {
    let prompt = "## Role ##\n\
                  Generate example sentences for the Japanese word.\n\
                  Be creative and colorful.\n\
                  Provide a Korean translation for each meaning.\n\
                  ```json\n{\"x\": 1}\n```";
    let simplified = simplify_prompt(prompt);
    assert!(simplified.contains("Japanese word"));
    assert!(simplified.contains("translation"));
    assert!(!simplified.contains("colorful"));
    assert!(!simplified.contains("json"));
  }

  #[test]
  fn simplify_falls_back_to_generic_instruction() {
    assert_eq!(simplify_prompt("nothing relevant here"), GENERIC_INSTRUCTION);
  }

  #[test]
  fn classify_handles_missing_candidates() {
    let body = GenerateContentResponse { candidates: vec![] };
    assert_eq!(classify_response(body), Outcome::Empty);
  }

  #[test]
  fn classify_joins_parts_on_stop() {
    let body = GenerateContentResponse {
      candidates: vec![Candidate {
        content: Some(CandidateContent {
          parts: vec![
            CandidatePart { text: Some("Hello ".into()) },
            CandidatePart { text: None },
            CandidatePart { text: Some("world".into()) },
          ],
        }),
        finish_reason: Some("STOP".into()),
      }],
    };
    assert_eq!(classify_response(body), Outcome::Completed("Hello world".into()));
  }
}
