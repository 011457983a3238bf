//! Prompt assembly for the generation pipeline.
//!
//! Every prompt the service sends is built here from the level tables, so the
//! wording is in one place and the builders stay pure string functions.

use crate::domain::{HomonymMeaning, Level};
use crate::tables;

/// Prompt asking for `num_examples` labeled example blocks for `word`.
pub fn example_prompt(word: &str, level: Level, num_examples: usize) -> String {
  let level_text = tables::level_description(level);
  let instruction_detail = tables::detailed_instructions(level);
  let variation_instruction = tables::usage_variations(level);
  let korean_translation_guide = tables::korean_translation_guidelines(level);

  format!(
    r#"# Japanese Example Sentence Generator

## Role
You are an experienced Japanese language teacher creating authentic example sentences for learners.

## Target Word
"{word}"

## Requirements
- Generate EXACTLY {num_examples} example sentences using the word "{word}"
- Use {level_text} Japanese appropriate for the learner's level
- {instruction_detail}
- {variation_instruction}
- EVERY sentence must be COMPLETE. Never leave sentences unfinished or ending with "...".
- Ensure each sentence has a proper subject, predicate, and any necessary objects or complements.

## Context Guidelines
- Create realistic situations from daily Japanese life (home, work, school, restaurants, etc.)
- Show the word being used in different contexts and by different speakers
- If the word has multiple meanings, demonstrate each major usage
- EXTREMELY IMPORTANT: Ensure each example is semantically correct and natural in Japanese
- For verbs like "食べる" (to eat), only use objects that can actually be eaten in Japanese culture
- For action verbs, ensure the actions are logical and natural in real-life contexts

## Korean Translation Guidelines
- {korean_translation_guide}
- Focus on natural Korean translation that a native Korean speaker would actually use
- Don't translate word-for-word, but convey the meaning in natural Korean
- Maintain the appropriate level of formality from the Japanese sentence
- Use Korean expressions and idioms that match the context where appropriate
- Make sure Korean translations are complete sentences that fully express the meaning

## Output Format
For each example, strictly follow this exact format with no deviation:

1. Context: [Brief context in English - 1-2 sentences maximum]
Japanese: [Complete natural Japanese sentence that uses the word "{word}"]
Korean: [Complete natural Korean translation]

2. Context: [Brief context in English - 1-2 sentences maximum]
Japanese: [Complete natural Japanese sentence that uses the word "{word}"]
Korean: [Complete natural Korean translation]

## Semantic Guidelines for Nouns
- For nouns such as "図書館" (library), "料理" (cooking), "友達" (friend):
- Place them in realistic contexts:
    - Location nouns (e.g. 図書館, 公園) should appear with verbs like "に行く" (to go to) or "で勉強する" (to study at)
    - Animate nouns (e.g. 友達, 犬) should be used as subjects (が) or objects (を) in varied sentence roles
    - Abstract nouns (e.g. 自由, 幸福) should pair with conceptual verbs like "を感じる" (to feel) or "を求める" (to seek)
- Demonstrate correct particle usage for nouns: が, を, に, の, で, etc.
- Vary modifiers:
- Adjective modifiers (e.g. "大きな家", "美味しい料理")
- Quantifier expressions (e.g. "三冊の本", "二人の友達")
- If a noun has multiple senses, present distinct situations illustrating each sense

## Verb and Tense Guidelines
- 動詞「食べる」「飲む」などは、具体的な食べ物・飲み物を目的語として使用してください (例: 「リンゴを食べる」、「コーヒーを飲む」).
- 抽象的・イベント名詞（「ピクニック」など）は目的語にしないでください.
- 文脈に応じて時制を明確に区別してください。完了した動作には過去形(～た), 習慣・未来には現在形(～る/～ます形)を使用してください。
- 行動動詞を使うときは、必ず具体的な対象や場所を一緒に明示してください (例: 「公園でサンドイッチを食べる」、「図書館で勉強する」).
- 全ての文は完全な文として終了させてください。「...」で終わる不完全な文は使わないでください。

## Important Notes
- ALWAYS include the word "{word}" in each Japanese sentence
- Each example MUST include: Context, Japanese sentence, Korean translation
- Number each example consecutively (1-{num_examples})
- Focus on natural, authentic Japanese as actually used by native speakers
- DO NOT include any romanization, pronunciation guide, or English translation in the Japanese sentence
- DO NOT put romaji, hiragana readings, or any non-Japanese explanations in parentheses
- Japanese sentences should contain ONLY Japanese characters, nothing else
- Do not add explanations or notes between examples
- DO NOT add any numbering or markers at the end of Korean translations
- ALL sentences must be COMPLETE with proper ending. NO ellipses (...) or unfinished sentences."#
  )
}

/// Low-temperature prompt asking the model whether `word` has homonyms,
/// with a JSON schema and a few database rows as in-context examples.
pub fn homonym_detection_prompt(word: &str, level: Level) -> String {
  let database_examples = database_examples(level);
  let shown: String = database_examples.chars().take(200).collect();

  format!(
    r#"Find Japanese homonyms for: {word}

Return JSON format:
{{
  "homonyms_found": true/false,
  "meanings": [
    {{"kanji": "漢字", "pos": "品詞", "meaning": "한국어 의미", "contexts": ["용례1", "용례2"]}}
  ]
}}

Examples: {shown}...

Only return different kanji with same pronunciation."#
  )
}

/// Prompt asking for exactly three labeled example blocks for one specific
/// kanji form of a homonymous reading.
pub fn homonym_example_prompt(word: &str, meaning: &HomonymMeaning, level: Level) -> String {
  let level_text = tables::level_description(level);
  let instruction_detail = tables::detailed_instructions(level);

  let context_info = if meaning.contexts.is_empty() {
    String::new()
  } else {
    format!("Example contexts: {}", meaning.contexts.join(", "))
  };
  let contexts_joined = meaning.contexts.join(", ");
  let other_homonyms = other_homonyms_info(word, &meaning.kanji);
  let kanji = &meaning.kanji;
  let pos = &meaning.pos;
  let gloss = &meaning.meaning;

  format!(
    r#"# Japanese Homonym Example Generator

## Role
You are an experienced Japanese language teacher creating clear example sentences for Japanese homonyms that distinguish different meanings based on context and kanji usage.

## Target Homonym Information
- Pronunciation: "{word}"
- Target Kanji: {kanji} (MUST use this specific kanji form)
- Part of speech: {pos}
- Meaning: {gloss}
- {context_info}

## Other Homonyms to Distinguish From
{other_homonyms}

## Critical Requirements
- You MUST generate EXACTLY 3 example sentences. No more, no fewer.
- Each example must clearly show the kanji "{kanji}" being used with the meaning "{gloss}"
- Use {level_text} Japanese appropriate for the learner's level
- {instruction_detail}
- EVERY sentence must be COMPLETE and NATURAL. Never leave sentences unfinished.
- Each example should CLEARLY distinguish this kanji form from other homonym kanji forms listed above
- ALWAYS include the kanji {kanji} in your examples - do not use hiragana only
- The examples should help learners understand the contextual differences between homonyms

## Output Format
For each example, strictly follow this exact format with no deviation:

1. Context: [Brief context in English - 1-2 sentences maximum]
Japanese: [Complete natural Japanese sentence using {kanji} with the specified meaning]
Korean: [Complete natural Korean translation]
Explanation: [Short explanation in Korean of how this example shows the specific meaning of {kanji} and how it differs from other homonyms]

2. Context: [Brief context in English - 1-2 sentences maximum]
Japanese: [Complete natural Japanese sentence using {kanji} with the specified meaning]
Korean: [Complete natural Korean translation]
Explanation: [Short explanation in Korean of how this example shows the specific meaning of {kanji} and how it differs from other homonyms]

3. Context: [Brief context in English - 1-2 sentences maximum]
Japanese: [Complete natural Japanese sentence using {kanji} with the specified meaning]
Korean: [Complete natural Korean translation]
Explanation: [Short explanation in Korean of how this example shows the specific meaning of {kanji} and how it differs from other homonyms]

## Important Notes
- You MUST provide EXACTLY 3 examples as numbered above.
- Make each example very DIFFERENT from the others to show various contexts from: {contexts_joined}
- ALWAYS use the kanji {kanji} in your examples (not hiragana only)
- Focus on making examples that clearly distinguish {kanji} from other homonym forms
- DO NOT include any unnecessary explanations between examples
- The Japanese sentences must contain the actual kanji {kanji}, not just hiragana"#
  )
}

/// A few database rows from the requested level and below, formatted as
/// "- reading: kanji, kanji (meaning, meaning)". Capped at eight lines.
fn database_examples(level: Level) -> String {
  let mut lines = Vec::new();
  for (db_level, readings) in tables::HOMONYM_DATABASE {
    if db_level.rank() > level.rank() {
      continue;
    }
    for (reading, entries) in readings.iter().take(2) {
      let kanji: Vec<&str> = entries.iter().map(|e| e.kanji).collect();
      let meanings: Vec<&str> = entries.iter().map(|e| e.meaning).collect();
      lines.push(format!("- {}: {} ({})", reading, kanji.join(", "), meanings.join(", ")));
    }
  }
  lines.truncate(8);
  lines.join("\n")
}

/// Sibling kanji forms of the same reading, formatted for the homonym
/// example prompt so the model can contrast against them.
fn other_homonyms_info(pronunciation: &str, target_kanji: &str) -> String {
  for (_, readings) in tables::HOMONYM_DATABASE {
    for (reading, entries) in *readings {
      if *reading != pronunciation {
        continue;
      }
      if !entries.iter().any(|e| e.kanji == target_kanji) {
        continue;
      }
      let others: Vec<String> = entries
        .iter()
        .filter(|e| e.kanji != target_kanji)
        .map(|e| format!("- {}: {} ({})", e.kanji, e.meaning, e.pos))
        .collect();
      if !others.is_empty() {
        return format!("Other homonyms with the same pronunciation:\n{}", others.join("\n"));
      }
    }
  }
  "No other known homonyms found in database.".to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn example_prompt_embeds_word_and_count() {
    let prompt = example_prompt("食べる", Level::N4, 5);
    assert!(prompt.contains("\"食べる\""));
    assert!(prompt.contains("EXACTLY 5 example sentences"));
    assert!(prompt.contains("Output Format"));
  }

  #[test]
  fn detection_prompt_carries_schema_and_database_rows() {
    let prompt = homonym_detection_prompt("きく", Level::N3);
    assert!(prompt.contains("homonyms_found"));
    assert!(prompt.contains("Examples: -"));
  }

  #[test]
  fn homonym_example_prompt_names_the_kanji_form() {
    let meaning = HomonymMeaning {
      kanji: "聞く".to_string(),
      pos: "動詞".to_string(),
      meaning: "듣다, 묻다".to_string(),
      contexts: vec!["음악을 듣다".to_string()],
    };
    let prompt = homonym_example_prompt("きく", &meaning, Level::N3);
    assert!(prompt.contains("Target Kanji: 聞く"));
    assert!(prompt.contains("EXACTLY 3 example sentences"));
  }

  #[test]
  fn other_homonyms_listed_for_known_reading() {
    let info = other_homonyms_info("きく", "聞く");
    assert!(info.contains("聴く") || info.contains("効く"));
    assert!(!info.contains("- 聞く:"));
  }

  #[test]
  fn unknown_reading_reports_no_siblings() {
    let info = other_homonyms_info("ぞぞぞ", "謎");
    assert!(info.contains("No other known homonyms"));
  }
}
