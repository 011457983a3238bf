//! Small utility helpers used across modules.

/// True if unicode char belongs to the hiragana block.
pub fn is_hiragana(ch: char) -> bool {
  ch >= '\u{3041}' && ch <= '\u{3096}'
}

/// True if unicode char belongs to the katakana block.
pub fn is_katakana(ch: char) -> bool {
  ch >= '\u{30A1}' && ch <= '\u{30FA}'
}

/// True if unicode char is a CJK ideograph (the common block).
pub fn is_kanji(ch: char) -> bool {
  ch >= '\u{4E00}' && ch <= '\u{9FA5}'
}

/// True for any Japanese-script character: hiragana, katakana, or kanji.
/// Korean translations must be free of these after cleaning.
pub fn is_japanese_script(ch: char) -> bool {
  is_hiragana(ch) || is_katakana(ch) || is_kanji(ch)
}

/// Remove every Japanese-script character from a string.
pub fn strip_japanese_script(s: &str) -> String {
  s.chars().filter(|ch| !is_japanese_script(*ch)).collect()
}

/// Collapse runs of 2+ newlines into a single newline.
pub fn collapse_blank_lines(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut newlines = 0usize;
  for ch in s.chars() {
    if ch == '\n' {
      newlines += 1;
      if newlines == 1 {
        out.push('\n');
      }
    } else {
      newlines = 0;
      out.push(ch);
    }
  }
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge prompt/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} chars total)", head, s.chars().count())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn script_ranges() {
    assert!(is_hiragana('き'));
    assert!(is_katakana('カ'));
    assert!(is_kanji('聞'));
    assert!(!is_japanese_script('한'));
    assert!(!is_japanese_script('a'));
  }

  #[test]
  fn strips_japanese_only() {
    assert_eq!(strip_japanese_script("사과를 食べる다"), "사과를 다");
  }

  #[test]
  fn collapses_blank_lines() {
    assert_eq!(collapse_blank_lines("a\n\n\nb\nc"), "a\nb\nc");
  }
}
