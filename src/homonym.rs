//! Homonym resolution: find the kanji forms sharing a reading, then generate
//! three disambiguating examples per form.
//!
//! Lookup is tiered. The static database is searched first from N5 upward so
//! learners get the elementary forms of a reading before rarer ones. Readings
//! the database misses go to a small hardcoded emergency table, and only then
//! to the model with a low-temperature detection prompt. Every model failure
//! path falls back to the emergency table.

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::GenSettings;
use crate::domain::{Example, HomonymMeaning, Level};
use crate::gemini::TextGenerator;
use crate::parser;
use crate::prompt;
use crate::tables;

/// One disambiguated meaning, ready for the response: Korean POS tag and
/// exactly three examples.
#[derive(Clone, Debug)]
pub struct ResolvedMeaning {
  pub kanji: String,
  pub pos: String,
  pub meaning: String,
  pub contexts: Vec<String>,
  pub examples: Vec<Example>,
}

pub fn not_found_error(word: &str) -> String {
  format!(
    "'{}'에 대한 동음이의어 정보를 찾을 수 없습니다. 데이터베이스와 AI 검색 모두에서 결과가 없습니다.",
    word
  )
}

/// Resolve a reading into its homonym meanings with examples. `None` means
/// nothing was found anywhere; the caller builds the not-found payload.
#[instrument(level = "info", skip(llm, settings), fields(%word, level = %level))]
pub async fn resolve(
  llm: Option<&dyn TextGenerator>,
  word: &str,
  level: Level,
  settings: &GenSettings,
) -> Option<Vec<ResolvedMeaning>> {
  let meanings = find_meanings(llm, word, level).await;
  if meanings.is_empty() {
    warn!(target: "generation", %word, "No homonym meanings found");
    return None;
  }

  let mut resolved = Vec::with_capacity(meanings.len());
  for meaning in &meanings {
    let examples = examples_for_meaning(llm, word, meaning, level, settings).await;
    resolved.push(ResolvedMeaning {
      kanji: meaning.kanji.clone(),
      pos: tables::pos_to_korean(&meaning.pos).to_string(),
      meaning: meaning.meaning.clone(),
      contexts: meaning.contexts.clone(),
      examples,
    });
  }
  Some(resolved)
}

/// Database, then emergency table, then model detection.
async fn find_meanings(
  llm: Option<&dyn TextGenerator>,
  word: &str,
  level: Level,
) -> Vec<HomonymMeaning> {
  let from_db = find_from_database(word, level);
  if !from_db.is_empty() {
    info!(target: "generation", %word, meanings = from_db.len(), "Homonyms found in database");
    return from_db;
  }

  if let Some(entries) = tables::emergency_homonyms(word) {
    info!(target: "generation", %word, "Using emergency homonym table");
    return entries.iter().filter(|e| e.kanji != word).map(to_meaning).collect();
  }

  info!(target: "generation", %word, "Not in database, querying model");
  find_from_llm(llm, word, level).await
}

/// Search the static database from N5 up through the requested level. A
/// reading key matches all its entries; a kanji form matches its siblings,
/// excluding itself.
fn find_from_database(word: &str, level: Level) -> Vec<HomonymMeaning> {
  for (db_level, readings) in tables::HOMONYM_DATABASE {
    if db_level.rank() > level.rank() {
      continue;
    }

    for (reading, entries) in *readings {
      if *reading == word {
        debug!(target: "generation", %word, level = %db_level, "Exact reading match");
        return entries.iter().map(to_meaning).collect();
      }
    }

    for (reading, entries) in *readings {
      if entries.iter().any(|e| e.kanji == word) {
        let siblings: Vec<HomonymMeaning> =
          entries.iter().filter(|e| e.kanji != word).map(to_meaning).collect();
        if !siblings.is_empty() {
          debug!(target: "generation", %word, %reading, level = %db_level, "Kanji variant match");
          return siblings;
        }
      }
    }
  }
  Vec::new()
}

#[derive(Deserialize)]
struct DetectionResult {
  #[serde(default)]
  homonyms_found: bool,
  #[serde(default)]
  meanings: Vec<DetectedMeaning>,
}

#[derive(Deserialize)]
struct DetectedMeaning {
  #[serde(default)]
  kanji: String,
  #[serde(default = "default_pos")]
  pos: String,
  #[serde(default)]
  meaning: String,
  #[serde(default)]
  contexts: Vec<String>,
}

fn default_pos() -> String {
  "動詞".to_string()
}

/// Low-temperature detection call. Any failure falls back to the emergency
/// table, then to an empty result.
async fn find_from_llm(
  llm: Option<&dyn TextGenerator>,
  word: &str,
  level: Level,
) -> Vec<HomonymMeaning> {
  let llm = match llm {
    Some(l) => l,
    None => return emergency_or_empty(word),
  };

  let prompt = prompt::homonym_detection_prompt(word, level);
  let response = match llm.generate(&prompt, 0.1).await {
    Ok(r) => r,
    Err(e) => {
      warn!(target: "generation", %word, error = %e, "Homonym detection call failed");
      return emergency_or_empty(word);
    }
  };

  let json = match parser::extract_json_object(&response) {
    Some(j) => j,
    None => {
      warn!(target: "generation", %word, "No JSON found in detection response");
      return emergency_or_empty(word);
    }
  };

  let result: DetectionResult = match serde_json::from_str(&json) {
    Ok(r) => r,
    Err(e) => {
      warn!(target: "generation", %word, error = %e, "Failed to parse detection JSON");
      return emergency_or_empty(word);
    }
  };

  if !result.homonyms_found {
    return emergency_or_empty(word);
  }

  let meanings: Vec<HomonymMeaning> = result
    .meanings
    .into_iter()
    .filter(|m| m.kanji != word)
    .map(|m| HomonymMeaning {
      kanji: m.kanji,
      pos: m.pos,
      meaning: m.meaning,
      contexts: m.contexts,
    })
    .collect();

  if meanings.is_empty() {
    return emergency_or_empty(word);
  }
  meanings
}

fn emergency_or_empty(word: &str) -> Vec<HomonymMeaning> {
  match tables::emergency_homonyms(word) {
    Some(entries) => {
      info!(target: "generation", %word, "Using emergency homonym table after model failure");
      entries.iter().filter(|e| e.kanji != word).map(to_meaning).collect()
    }
    None => Vec::new(),
  }
}

fn to_meaning(entry: &tables::HomonymEntry) -> HomonymMeaning {
  HomonymMeaning {
    kanji: entry.kanji.to_string(),
    pos: entry.pos.to_string(),
    meaning: entry.meaning.to_string(),
    contexts: entry.contexts.iter().map(|c| c.to_string()).collect(),
  }
}

/// Exactly three examples for one meaning: generated where possible, topped
/// up with templated placeholders built from the gloss and context tags.
async fn examples_for_meaning(
  llm: Option<&dyn TextGenerator>,
  word: &str,
  meaning: &HomonymMeaning,
  level: Level,
  settings: &GenSettings,
) -> Vec<Example> {
  let generated = match llm {
    Some(l) => {
      let prompt = prompt::homonym_example_prompt(word, meaning, level);
      match l.generate(&prompt, settings.temperature).await {
        Ok(response) => parser::parse_homonym_examples(&response, word, &meaning.kanji),
        Err(e) => {
          warn!(target: "generation", kanji = %meaning.kanji, error = %e, "Homonym example call failed");
          Vec::new()
        }
      }
    }
    None => Vec::new(),
  };

  if generated.is_empty() {
    return synthesized_examples(word, meaning);
  }

  let mut examples = generated;
  while examples.len() < 3 {
    warn!(target: "generation", %word, kanji = %meaning.kanji, "Fewer than 3 examples generated; adding placeholder");
    examples.push(placeholder_example(word, meaning, examples.len()));
  }
  examples.truncate(3);
  examples
}

fn placeholder_example(word: &str, meaning: &HomonymMeaning, index: usize) -> Example {
  let context_tag = if meaning.contexts.is_empty() {
    "일반적인 사용".to_string()
  } else {
    meaning.contexts[index % meaning.contexts.len()].clone()
  };

  let mut ex = Example::new(
    "",
    &format!("{}를 사용한 예문입니다.", meaning.kanji),
    &format!("{}의 예문입니다.", meaning.meaning),
  );
  ex.explanation = format!(
    "이 예문은 '{}'가 '{}'라는 의미로 사용된 {} 상황의 예입니다.",
    word, meaning.meaning, context_tag
  );
  ex
}

/// Three fully templated examples for when the model produced nothing.
fn synthesized_examples(word: &str, meaning: &HomonymMeaning) -> Vec<Example> {
  (0..3)
    .map(|i| {
      let context_tag = meaning
        .contexts
        .get(i)
        .cloned()
        .unwrap_or_else(|| format!("상황 {}", i + 1));
      let mut ex = Example::new(
        "",
        &format!("{}에 관한 {}의 예문입니다.", meaning.kanji, context_tag),
        &format!("{}에 관한 {}의 예문입니다.", meaning.meaning, context_tag),
      );
      ex.explanation = format!(
        "이 예문은 '{}'가 '{}'라는 의미로 {}에서 사용된 예입니다.",
        word, meaning.meaning, context_tag
      );
      ex
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::gemini::GenerateError;
  use std::sync::atomic::{AtomicUsize, Ordering};

  /// Counts calls and replays one fixed response.
  struct CountingGen {
    calls: AtomicUsize,
    response: String,
  }

  impl CountingGen {
    fn new(response: &str) -> Self {
      Self { calls: AtomicUsize::new(0), response: response.to_string() }
    }
  }

  #[async_trait::async_trait]
  impl TextGenerator for CountingGen {
    async fn generate(&self, _prompt: &str, _temperature: f32) -> Result<String, GenerateError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      if self.response.is_empty() {
        Err(GenerateError::Exhausted(3))
      } else {
        Ok(self.response.clone())
      }
    }
  }

  #[test]
  fn database_finds_reading_at_its_own_level() {
    let meanings = find_from_database("あめ", Level::N5);
    assert_eq!(meanings.len(), 2);
    assert!(meanings.iter().any(|m| m.kanji == "雨"));
  }

  #[test]
  fn database_misses_readings_above_requested_level() {
    // きく lives at N2; an N3 request must not see it.
    assert!(find_from_database("きく", Level::N3).is_empty());
    assert!(!find_from_database("きく", Level::N2).is_empty());
  }

  #[test]
  fn kanji_variant_returns_siblings_excluding_self() {
    let meanings = find_from_database("聞く", Level::N2);
    assert!(!meanings.is_empty());
    assert!(meanings.iter().all(|m| m.kanji != "聞く"));
    assert!(meanings.iter().any(|m| m.kanji == "効く"));
  }

  #[tokio::test]
  async fn kiku_resolves_from_emergency_table_without_detection_call() {
    let gen = CountingGen::new("");
    let meanings = find_meanings(Some(&gen), "きく", Level::N3).await;
    assert!(meanings.len() >= 2);
    assert_eq!(gen.calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn detection_parses_fenced_json_and_excludes_self() {
    let response = r#"Here you go:
```json
{"homonyms_found": true, "meanings": [
  {"kanji": "橋", "pos": "名詞", "meaning": "다리", "contexts": ["교통"]},
  {"kanji": "はし", "meaning": "자기 자신"}
]}
```"#;
    let gen = CountingGen::new(response);
    let meanings = find_from_llm(Some(&gen), "はし", Level::N1).await;
    assert_eq!(meanings.len(), 1);
    assert_eq!(meanings[0].kanji, "橋");
    // Missing pos defaults to 動詞.
    let response2 = r#"{"homonyms_found": true, "meanings": [{"kanji": "端", "meaning": "끝"}]}"#;
    let gen2 = CountingGen::new(response2);
    let meanings2 = find_from_llm(Some(&gen2), "はし", Level::N1).await;
    assert_eq!(meanings2[0].pos, "動詞");
  }

  #[tokio::test]
  async fn resolve_without_backend_synthesizes_three_examples_per_meaning() {
    let settings = GenSettings::default();
    let resolved = resolve(None, "きく", Level::N3, &settings).await.unwrap();
    assert!(resolved.len() >= 2);
    for meaning in &resolved {
      assert_eq!(meaning.examples.len(), 3);
      // POS tags arrive in Korean.
      assert_eq!(meaning.pos, "동사");
    }
  }

  #[tokio::test]
  async fn short_generation_is_backfilled_to_three() {
    let response = "\
1. Context: Listening to music at home.
Japanese: 彼女は毎晩静かな音楽を聴くのが習慣です。
Korean: 그녀는 매일 밤 조용한 음악을 듣는 것이 습관이에요.
Explanation: 음악을 감상한다는 의미로 사용되었습니다.";
    let gen = CountingGen::new(response);
    let settings = GenSettings::default();
    let meaning = HomonymMeaning {
      kanji: "聴く".to_string(),
      pos: "動詞".to_string(),
      meaning: "주의 깊게 듣다".to_string(),
      contexts: vec!["음악 감상".to_string()],
    };
    let examples = examples_for_meaning(Some(&gen), "きく", &meaning, Level::N3, &settings).await;
    assert_eq!(examples.len(), 3);
    assert!(examples[0].japanese.contains("聴く"));
    assert!(examples[1].japanese.contains("를 사용한 예문입니다"));
  }

  #[tokio::test]
  async fn unknown_word_resolves_to_none() {
    let gen = CountingGen::new(r#"{"homonyms_found": false}"#);
    let settings = GenSettings::default();
    assert!(resolve(Some(&gen), "ぱぴぷ", Level::N3, &settings).await.is_none());
  }

  #[test]
  fn not_found_error_names_the_word() {
    assert!(not_found_error("ねこ").contains("'ねこ'"));
  }
}
