//! Public request/response structs for the HTTP endpoints (serde ready).
//! Keep this small and stable so clients can evolve independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Example, Level};
use crate::homonym::ResolvedMeaning;

/// Shown for `with_hiragana` until reading conversion ships.
const HIRAGANA_PLACEHOLDER: &str = "히라가나 변환 기능 준비 중";

#[derive(Debug, Deserialize)]
pub struct ExamplesIn {
    pub word: Option<String>,
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HomonymIn {
    pub word: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ExamplesOut {
    pub examples: Vec<ExampleOut>,
}

/// One formatted example. Optional fields appear per the requested format.
#[derive(Debug, Serialize)]
pub struct ExampleOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub japanese_example: String,
    pub korean_translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hiragana_reading: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HomonymOut {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meanings: Option<Vec<MeaningOut>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MeaningOut {
    pub kanji: String,
    pub pos: String,
    pub meaning: String,
    pub contexts: Vec<String>,
    pub examples: Vec<HomonymExampleOut>,
}

#[derive(Debug, Serialize)]
pub struct HomonymExampleOut {
    pub japanese: String,
    pub korean: String,
    pub explanation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseFormat {
    Simple,
    WithContext,
    WithHiragana,
}

/// Unknown or missing format strings silently fall back to `Simple`.
pub fn parse_format(s: Option<&str>) -> ResponseFormat {
    match s.map(str::to_ascii_lowercase).as_deref() {
        Some("with_context") => ResponseFormat::WithContext,
        Some("with_hiragana") => ResponseFormat::WithHiragana,
        _ => ResponseFormat::Simple,
    }
}

/// Unknown or missing level strings silently fall back to the default (N3).
pub fn parse_level(s: Option<&str>) -> Level {
    s.and_then(Level::parse).unwrap_or_default()
}

/// Shape validated examples for the wire, dropping any record with an empty
/// side.
pub fn format_examples(examples: &[Example], format: ResponseFormat) -> Vec<ExampleOut> {
    examples
        .iter()
        .filter(|ex| !ex.japanese.is_empty() && !ex.korean.is_empty())
        .map(|ex| ExampleOut {
            context: match format {
                ResponseFormat::WithContext => Some(ex.context.trim().to_string()),
                _ => None,
            },
            japanese_example: ex.japanese.trim().to_string(),
            korean_translation: ex.korean.trim().to_string(),
            hiragana_reading: match format {
                ResponseFormat::WithHiragana => Some(HIRAGANA_PLACEHOLDER.to_string()),
                _ => None,
            },
        })
        .collect()
}

pub fn to_meaning_out(meaning: &ResolvedMeaning) -> MeaningOut {
    MeaningOut {
        kanji: meaning.kanji.clone(),
        pos: meaning.pos.clone(),
        meaning: meaning.meaning.clone(),
        contexts: meaning.contexts.clone(),
        examples: meaning
            .examples
            .iter()
            .map(|ex| HomonymExampleOut {
                japanese: ex.japanese.clone(),
                korean: ex.korean.clone(),
                explanation: ex.explanation.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Example> {
        vec![Example::new(
            "At home.",
            "毎朝パンを食べるのが好きです。",
            "매일 아침 빵을 먹는 것을 좋아해요.",
        )]
    }

    #[test]
    fn simple_format_has_two_fields() {
        let out = format_examples(&sample(), ResponseFormat::Simple);
        assert_eq!(out.len(), 1);
        assert!(out[0].context.is_none());
        assert!(out[0].hiragana_reading.is_none());
        assert_eq!(out[0].japanese_example, "毎朝パンを食べるのが好きです。");
    }

    #[test]
    fn with_context_carries_the_context() {
        let out = format_examples(&sample(), ResponseFormat::WithContext);
        assert_eq!(out[0].context.as_deref(), Some("At home."));
    }

    #[test]
    fn with_hiragana_adds_the_placeholder() {
        let out = format_examples(&sample(), ResponseFormat::WithHiragana);
        assert_eq!(out[0].hiragana_reading.as_deref(), Some(HIRAGANA_PLACEHOLDER));
    }

    #[test]
    fn invalid_parameters_fall_back_silently() {
        assert_eq!(parse_format(Some("fancy")), ResponseFormat::Simple);
        assert_eq!(parse_format(None), ResponseFormat::Simple);
        assert_eq!(parse_level(Some("n6")), Level::N3);
        assert_eq!(parse_level(Some("N5")), Level::N5);
    }
}
