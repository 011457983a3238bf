//! Extraction of structured examples from free-text completions.
//!
//! The model is asked for labeled blocks (Context:/Japanese:/Korean:, plus
//! Explanation: in homonym mode). Since the blocks arrive with uneven
//! numbering and whitespace, we locate block starts with a regex, slice the
//! text between consecutive starts, and pull fields out of each slice by
//! label position. A numbered-list fallback covers completions that drop the
//! Context label. Cleanup mirrors what the prompts forbid: parenthesized
//! romanization in Japanese, stray Japanese script and numbering markers in
//! Korean.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::domain::Example;
use crate::util::{collapse_blank_lines, strip_japanese_script, trunc_for_log};

static BLOCK_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\d+\.\s*)?Context:").unwrap());
static NUMBERED_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s").unwrap());
static PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)").unwrap());
static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s*\*+").unwrap());
static LEADING_NUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());
static JSON_FENCE_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap());

/// Parse examples for the regular generation mode, then drop everything that
/// is incomplete, too short, missing the target word, or lacking a usable
/// Korean translation.
pub fn parse_examples(response: &str, word: &str) -> Vec<Example> {
  debug!(target: "generation", response_head = %trunc_for_log(response, 500), "Parsing generation response");

  let mut examples = parse_labeled_blocks(response, false);
  if examples.is_empty() {
    examples = parse_numbered_blocks(response);
    if !examples.is_empty() {
      debug!(target: "generation", count = examples.len(), "Parsed with numbered fallback pattern");
    }
  } else {
    debug!(target: "generation", count = examples.len(), "Parsed with labeled block pattern");
  }

  examples
    .into_iter()
    .filter(|ex| {
      !ex.japanese.ends_with("...")
        && !ex.japanese.ends_with('…')
        && ex.japanese.chars().count() >= 10
        && ex.japanese.contains(word)
        && !ex.korean.is_empty()
        && ex.korean.chars().count() >= 5
    })
    .collect()
}

/// Parse examples for one homonym meaning. Blocks carry an extra
/// Explanation field. If no parsed sentence actually contains `kanji`, the
/// first one is rewritten to use it so the disambiguation stays visible.
pub fn parse_homonym_examples(response: &str, word: &str, kanji: &str) -> Vec<Example> {
  debug!(target: "generation", response_head = %trunc_for_log(response, 500), "Parsing homonym response");

  let mut examples = parse_labeled_blocks(response, true);

  for ex in &examples {
    if !ex.japanese.contains(kanji) {
      warn!(target: "generation", %kanji, japanese = %ex.japanese, "Example does not contain expected kanji");
    }
  }

  if !examples.is_empty() && !examples.iter().any(|ex| ex.japanese.contains(kanji)) {
    warn!(target: "generation", %kanji, "No examples contain the kanji; rewriting the first");
    examples[0].japanese = examples[0].japanese.replace(word, kanji);
    examples[0].explanation.push_str(&format!(" (한자 {} 사용)", kanji));
  }

  examples
}

/// Pull the JSON payload out of a completion: prefer a ```json fence, else
/// the widest `{...}` span.
pub fn extract_json_object(response: &str) -> Option<String> {
  if let Some(caps) = JSON_FENCE_RE.captures(response) {
    return Some(caps[1].to_string());
  }
  let start = response.find('{')?;
  let end = response.rfind('}')?;
  if end > start {
    Some(response[start..=end].to_string())
  } else {
    None
  }
}

/// Blocks anchored on a (possibly numbered) Context: label.
fn parse_labeled_blocks(response: &str, with_explanation: bool) -> Vec<Example> {
  let starts: Vec<usize> = BLOCK_START.find_iter(response).map(|m| m.start()).collect();
  let mut examples = Vec::new();

  for (i, &start) in starts.iter().enumerate() {
    let end = starts.get(i + 1).copied().unwrap_or(response.len());
    let block = &response[start..end];

    let labels: &[&str] = if with_explanation {
      &["Context:", "Japanese:", "Korean:", "Explanation:"]
    } else {
      &["Context:", "Japanese:", "Korean:"]
    };
    let fields = match labeled_fields(block, labels) {
      Some(f) => f,
      None => continue,
    };

    let context = fields[0];
    let japanese = fields[1].trim();
    if skip_incomplete(japanese) {
      continue;
    }

    let japanese = PAREN_RE.replace_all(japanese, "").trim().to_string();
    let korean = clean_korean(fields[2]);

    let mut example = Example::new(context, &japanese, &korean);
    if with_explanation {
      example.explanation = clean_explanation(fields[3]);
    }
    examples.push(example);
  }

  examples
}

/// Fallback for completions that number the blocks but drop the Context
/// label: "1. <context> Japanese: ... Korean: ...".
fn parse_numbered_blocks(response: &str) -> Vec<Example> {
  let starts: Vec<(usize, usize)> =
    NUMBERED_START.find_iter(response).map(|m| (m.start(), m.end())).collect();
  let mut examples = Vec::new();

  for (i, &(_, content_start)) in starts.iter().enumerate() {
    let end = starts.get(i + 1).map(|&(s, _)| s).unwrap_or(response.len());
    let block = &response[content_start..end];

    let fields = match labeled_fields(block, &["Japanese:", "Korean:"]) {
      Some(f) => f,
      None => continue,
    };
    let context = block[..block.find("Japanese:").unwrap_or(0)].trim();

    let japanese = fields[0].trim();
    if skip_incomplete(japanese) {
      continue;
    }

    let japanese = PAREN_RE.replace_all(japanese, "").trim().to_string();
    let korean = clean_korean(fields[1]);

    examples.push(Example::new(context, &japanese, &korean));
  }

  examples
}

/// Locate `labels` in order inside `block` and return the trimmed text
/// between consecutive labels. None if any label is missing.
fn labeled_fields<'a>(block: &'a str, labels: &[&str]) -> Option<Vec<&'a str>> {
  let mut spans = Vec::with_capacity(labels.len());
  let mut from = 0;
  for label in labels {
    let at = from + block[from..].find(label)?;
    spans.push(at + label.len());
    from = at + label.len();
  }

  let mut fields = Vec::with_capacity(labels.len());
  for (i, &content_start) in spans.iter().enumerate() {
    let content_end = spans
      .get(i + 1)
      .map(|&next| next - labels[i + 1].len())
      .unwrap_or(block.len());
    fields.push(block[content_start..content_end].trim());
  }
  Some(fields)
}

fn skip_incomplete(japanese: &str) -> bool {
  if japanese.ends_with("...") || japanese.ends_with('…') {
    debug!(target: "generation", sentence = %japanese, "Skipping incomplete sentence");
    return true;
  }
  if japanese.chars().count() < 10 {
    debug!(target: "generation", sentence = %japanese, "Skipping too short sentence");
    return true;
  }
  false
}

/// Korean translations come back with stray Japanese script, numbering
/// markers, and doubled newlines. Idempotent.
fn clean_korean(raw: &str) -> String {
  let cleaned = strip_japanese_script(raw);
  let cleaned = MARKER_RE.replace_all(&cleaned, "");
  let cleaned = LEADING_NUM_RE.replace(&cleaned, "");
  collapse_blank_lines(&cleaned).trim().to_string()
}

/// Keep only the first line of an explanation and cut anything that bleeds
/// into the next block.
fn clean_explanation(raw: &str) -> String {
  let mut explanation = raw.trim();
  if let Some(idx) = explanation.find('\n') {
    explanation = explanation[..idx].trim();
  }
  if let Some(idx) = explanation.find("Context:") {
    explanation = explanation[..idx].trim();
  }
  explanation.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  const LABELED: &str = "\
1. Context: At a restaurant with friends.
Japanese: 友達とレストランで寿司を食べる。(tomodachi to)
Korean: 친구와 레스토랑에서 초밥을 먹어요.

2. Context: Morning routine.
Japanese: 毎朝、家族とパンを食べるのが好きです。
Korean: 2. 매일 아침 가족과 빵을 먹는 것을 좋아해요.";

  #[test]
  fn labeled_blocks_parse_and_clean() {
    let examples = parse_examples(LABELED, "食べる");
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0].context, "At a restaurant with friends.");
    // Parenthesized romanization removed.
    assert_eq!(examples[0].japanese, "友達とレストランで寿司を食べる。");
    // Leading numbering stripped from Korean.
    assert!(examples[1].korean.starts_with("매일"));
  }

  #[test]
  fn numbered_fallback_used_when_context_label_missing() {
    let response = "\
1. Two colleagues chat at lunch.
Japanese: 昼休みに同僚とお弁当を食べる。
Korean: 점심시간에 동료와 도시락을 먹어요.
2. A child at home.
Japanese: 子供はおやつにりんごを食べるのが大好きです。
Korean: 아이는 간식으로 사과를 먹는 것을 아주 좋아해요.";
    let examples = parse_examples(response, "食べる");
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0].context, "Two colleagues chat at lunch.");
  }

  #[test]
  fn incomplete_and_short_sentences_are_dropped() {
    let response = "\
Context: a
Japanese: ご飯を食べる…
Korean: 밥을 먹어요.
Context: b
Japanese: 食べる。
Korean: 먹어요 좋아요.";
    assert!(parse_examples(response, "食べる").is_empty());
  }

  #[test]
  fn examples_missing_the_word_are_filtered() {
    let response = "\
Context: c
Japanese: 毎日水をたくさん飲むようにしています。
Korean: 매일 물을 많이 마시려고 해요.";
    assert!(parse_examples(response, "食べる").is_empty());
  }

  #[test]
  fn japanese_script_removed_from_korean() {
    let response = "\
Context: d
Japanese: 図書館で日本語の本を読みます。
Korean: 도서관에서 일본어図書館 책을 읽어요.";
    let examples = parse_examples(response, "図書館");
    assert_eq!(examples.len(), 1);
    assert!(!examples[0].korean.contains('図'));
  }

  #[test]
  fn reparsing_rendered_output_is_stable() {
    let first = parse_examples(LABELED, "食べる");
    let rendered: String = first
      .iter()
      .enumerate()
      .map(|(i, ex)| {
        format!(
          "{}. Context: {}\nJapanese: {}\nKorean: {}\n",
          i + 1,
          ex.context,
          ex.japanese,
          ex.korean
        )
      })
      .collect();
    let second = parse_examples(&rendered, "食べる");
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
      assert_eq!(a.context, b.context);
      assert_eq!(a.japanese, b.japanese);
      assert_eq!(a.korean, b.korean);
    }
  }

  #[test]
  fn korean_cleanup_is_idempotent() {
    let once = clean_korean("1. 친구와 밥을 먹어요.\n\n\n계속");
    let twice = clean_korean(&once);
    assert_eq!(once, twice);
  }

  #[test]
  fn homonym_blocks_keep_first_explanation_line() {
    let response = "\
1. Context: Listening to music.
Japanese: 彼女は毎晩静かな音楽を聞くのが習慣です。
Korean: 그녀는 매일 밤 조용한 음악을 듣는 것이 습관이에요.
Explanation: 여기서는 듣다의 의미로 사용되었습니다.
추가 설명은 무시됩니다.";
    let examples = parse_homonym_examples(response, "きく", "聞く");
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].explanation, "여기서는 듣다의 의미로 사용되었습니다.");
  }

  #[test]
  fn first_example_rewritten_when_kanji_absent() {
    let response = "\
Context: Medicine talk.
Japanese: この薬はよくきくと医者が言いました。
Korean: 이 약은 잘 듣는다고 의사가 말했어요.
Explanation: 약효가 있다는 의미입니다.";
    let examples = parse_homonym_examples(response, "きく", "効く");
    assert_eq!(examples.len(), 1);
    assert!(examples[0].japanese.contains("効く"));
    assert!(examples[0].explanation.ends_with("(한자 効く 사용)"));
  }

  #[test]
  fn json_extraction_prefers_fence() {
    let fenced = "text\n```json\n{\"a\": 1}\n```\nmore";
    assert_eq!(extract_json_object(fenced).unwrap(), "{\"a\": 1}");

    let bare = "prefix {\"homonyms_found\": true} suffix";
    assert_eq!(extract_json_object(bare).unwrap(), "{\"homonyms_found\": true}");

    assert!(extract_json_object("no json here").is_none());
  }
}
