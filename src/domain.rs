//! Domain models used by the backend: proficiency levels, example sentences,
//! and homonym meanings.

use serde::{Deserialize, Serialize};

/// JLPT-equivalent proficiency tier controlling vocabulary/grammar complexity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  N5,
  N4,
  N3,
  N2,
  N1,
  Standard,
}

impl Level {
  /// Parse a level string from a request. Unknown strings yield `None`;
  /// the HTTP boundary substitutes the default (N3).
  pub fn parse(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
      "n5" => Some(Level::N5),
      "n4" => Some(Level::N4),
      "n3" => Some(Level::N3),
      "n2" => Some(Level::N2),
      "n1" => Some(Level::N1),
      "standard" => Some(Level::Standard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Level::N5 => "n5",
      Level::N4 => "n4",
      Level::N3 => "n3",
      Level::N2 => "n2",
      Level::N1 => "n1",
      Level::Standard => "standard",
    }
  }

  /// Position on the N5..N1 axis used for database searches.
  /// `Standard` sits at the N3 slot, mirroring its table entries.
  pub fn rank(&self) -> usize {
    match self {
      Level::N5 => 0,
      Level::N4 => 1,
      Level::N3 | Level::Standard => 2,
      Level::N2 => 3,
      Level::N1 => 4,
    }
  }
}

impl Default for Level {
  fn default() -> Self {
    Level::N3
  }
}

impl std::fmt::Display for Level {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One generated learning sentence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Example {
  #[serde(default)]
  pub context: String,
  pub japanese: String,
  pub korean: String,
  /// Only populated in homonym mode.
  #[serde(default)]
  pub explanation: String,
}

impl Example {
  pub fn new(context: &str, japanese: &str, korean: &str) -> Self {
    Self {
      context: context.to_string(),
      japanese: japanese.to_string(),
      korean: korean.to_string(),
      explanation: String::new(),
    }
  }
}

// Sentinel texts returned when generation yields nothing usable. The
// orchestrator also uses them to recognize placeholder records.
pub const GENERATION_FAILED_JA: &str = "例文の生成に失敗しました。";
pub const GENERATION_FAILED_KO: &str = "예문 생성에 실패했습니다.";
pub const VALIDATION_FAILED_JA: &str = "適切な例文の生成に失敗しました。";
pub const VALIDATION_FAILED_KO: &str = "적절한 예문 생성에 실패했습니다.";

impl Example {
  /// Fixed placeholder when all generation attempts are exhausted.
  pub fn generation_failed() -> Self {
    Example::new("", GENERATION_FAILED_JA, GENERATION_FAILED_KO)
  }

  /// Fixed placeholder when semantic validation empties the set.
  pub fn validation_failed() -> Self {
    Example::new("", VALIDATION_FAILED_JA, VALIDATION_FAILED_KO)
  }

  pub fn is_placeholder(&self) -> bool {
    self.japanese == GENERATION_FAILED_JA || self.japanese == VALIDATION_FAILED_JA
  }
}

/// One meaning of a homonymous reading: the kanji form that disambiguates it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HomonymMeaning {
  pub kanji: String,
  /// Part-of-speech tag in Japanese (動詞, 名詞, ...).
  pub pos: String,
  /// Korean gloss.
  pub meaning: String,
  /// Usage-context tags in Korean.
  pub contexts: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn level_parse_known_and_unknown() {
    assert_eq!(Level::parse("N3"), Some(Level::N3));
    assert_eq!(Level::parse("standard"), Some(Level::Standard));
    assert_eq!(Level::parse("n6"), None);
    assert_eq!(Level::parse(""), None);
  }

  #[test]
  fn standard_ranks_with_n3() {
    assert_eq!(Level::Standard.rank(), Level::N3.rank());
    assert!(Level::N1.rank() > Level::N5.rank());
  }
}
