//! Semantic validation of generated examples.
//!
//! The model occasionally pairs verbs with objects that read as nonsense
//! (食べる with 宿題, 飲む with 電車). We keep a small constraint table for
//! the verbs that misfire in practice, plus a short list of patterns that are
//! unnatural for any target word, and drop offending examples before they
//! reach the client. Korean translations are rejected when numbering markers
//! or Japanese script survived parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::Example;
use crate::util::{collapse_blank_lines, is_japanese_script, strip_japanese_script};

/// Objects that must not appear as the direct object of a constrained verb.
/// Checked as the literal "{object}を{verb}" substring.
const VERB_OBJECT_CONSTRAINTS: &[(&str, &[&str])] = &[
  (
    "食べる",
    &[
      "日本語", "勉強", "宿題", "問題", "試験", "テスト", "文法", "言語", "車", "電車", "家",
      "ビル", "学校", "会社", "音楽", "映画", "テレビ",
    ],
  ),
  (
    "飲む",
    &[
      "電車", "自転車", "車", "本", "映画", "テレビ", "家", "ビル", "宿題", "問題", "音楽",
      "ゲーム",
    ],
  ),
  ("避ける", &["部屋"]),
];

/// Combinations that are wrong no matter which word was requested.
const UNNATURAL_PATTERNS: &[&str] = &["部屋を避ける", "車を食べる", "家を飲む", "問題を歩く"];

static KOREAN_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s*\*+").unwrap());
static KOREAN_LEADING_NUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

fn has_semantic_violation(japanese: &str, target_word: &str) -> bool {
  VERB_OBJECT_CONSTRAINTS
    .iter()
    .filter(|(verb, _)| *verb == target_word)
    .any(|(verb, objects)| {
      objects.iter().any(|obj| japanese.contains(&format!("{}を{}", obj, verb)))
    })
}

fn has_unnatural_patterns(japanese: &str) -> bool {
  UNNATURAL_PATTERNS.iter().any(|p| japanese.contains(p))
}

fn has_korean_formatting_issues(korean: &str) -> bool {
  KOREAN_MARKER_RE.is_match(korean)
    || KOREAN_LEADING_NUM_RE.is_match(korean)
    || korean.chars().any(is_japanese_script)
}

fn is_valid_example(ex: &Example, word: &str) -> bool {
  let japanese = ex.japanese.trim();
  let korean = ex.korean.trim();

  if japanese.is_empty() || korean.is_empty() {
    return false;
  }
  if japanese.chars().count() < 5 || korean.chars().count() < 5 {
    return false;
  }
  if !japanese.contains(word) {
    return false;
  }
  if has_semantic_violation(japanese, word) {
    return false;
  }
  if has_unnatural_patterns(japanese) {
    return false;
  }
  if has_korean_formatting_issues(korean) {
    return false;
  }
  true
}

/// Keep the examples that pass every check, with their Korean text
/// normalized. An empty survivor set becomes the single validation-failure
/// placeholder so callers always get at least one record.
pub fn validate_semantics(examples: Vec<Example>, word: &str) -> Vec<Example> {
  let total = examples.len();
  let validated: Vec<Example> = examples
    .into_iter()
    .filter(|ex| is_valid_example(ex, word))
    .map(|mut ex| {
      ex.korean = strip_japanese_script(&collapse_blank_lines(&ex.korean)).trim().to_string();
      ex
    })
    .collect();

  debug!(target: "generation", %word, total, valid = validated.len(), "Semantic validation finished");

  if validated.is_empty() {
    vec![Example::validation_failed()]
  } else {
    validated
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ex(japanese: &str, korean: &str) -> Example {
    Example::new("", japanese, korean)
  }

  #[test]
  fn eating_homework_is_rejected() {
    let examples = vec![
      ex("毎日宿題を食べるのが日課です。", "매일 숙제를 먹는 것이 일과예요."),
      ex("朝ごはんにパンを食べるのが好きです。", "아침으로 빵을 먹는 것을 좋아해요."),
    ];
    let valid = validate_semantics(examples, "食べる");
    assert_eq!(valid.len(), 1);
    assert!(valid[0].japanese.contains("パン"));
  }

  #[test]
  fn constraints_only_apply_to_the_target_verb() {
    // 宿題を食べる is invalid for 食べる but irrelevant when validating 宿題's
    // own examples... except the universal pattern list still catches it.
    let examples =
      vec![ex("図書館で宿題を終わらせました。", "도서관에서 숙제를 끝냈어요.")];
    assert_eq!(validate_semantics(examples, "宿題").len(), 1);
  }

  #[test]
  fn universal_patterns_rejected_for_any_word() {
    let examples = vec![ex("彼は古い車を食べるのが得意です。", "그는 오래된 차를 잘 먹어요.")];
    let valid = validate_semantics(examples, "車");
    assert!(valid[0].is_placeholder());
  }

  #[test]
  fn korean_with_numbering_or_japanese_script_is_rejected() {
    let numbered = vec![ex("友達と映画を見るのが楽しいです。", "1. 친구와 영화를 봐요.")];
    assert!(validate_semantics(numbered, "映画")[0].is_placeholder());

    let script = vec![ex("友達と映画を見るのが楽しいです。", "친구와 映画를 봐요.")];
    assert!(validate_semantics(script, "映画")[0].is_placeholder());
  }

  #[test]
  fn empty_set_becomes_single_placeholder() {
    let valid = validate_semantics(vec![], "食べる");
    assert_eq!(valid.len(), 1);
    assert!(valid[0].is_placeholder());
  }
}
