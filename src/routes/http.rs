//! HTTP endpoint handlers. These are thin wrappers that forward to the
//! generation pipeline. Each handler is instrumented and logs parameters and
//! basic result info. Pipeline failures come back as degraded payloads, so
//! handlers never propagate errors beyond request validation.

use std::sync::Arc;

use axum::{
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument};

use crate::protocol::*;
use crate::state::AppState;
use crate::{generator, homonym};

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

fn missing_word_response() -> Response {
  (
    StatusCode::BAD_REQUEST,
    Json(ErrorOut {
      error: "단어가 필요합니다.".into(),
      message: "'word' 필드에 일본어 단어를 입력해주세요.".into(),
    }),
  )
    .into_response()
}

#[instrument(level = "info", skip(state, body), fields(word = body.word.as_deref().unwrap_or("")))]
pub async fn http_post_examples(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ExamplesIn>,
) -> Response {
  let word = match body.word.as_deref().map(str::trim) {
    Some(w) if !w.is_empty() => w.to_string(),
    _ => return missing_word_response(),
  };
  let level = parse_level(body.level.as_deref());
  let format = parse_format(body.format.as_deref());
  info!(target: "reibun_backend", %word, %level, ?format, "Example generation requested");

  let examples = generator::generate_examples(
    state.text_generator(),
    &word,
    level,
    state.settings.num_examples,
    &state.settings,
  )
  .await;

  info!(target: "reibun_backend", %word, count = examples.len(), "Example generation served");
  Json(ExamplesOut { examples: format_examples(&examples, format) }).into_response()
}

#[instrument(level = "info", skip(state, body), fields(word = body.word.as_deref().unwrap_or("")))]
pub async fn http_post_homonym(
  State(state): State<Arc<AppState>>,
  Json(body): Json<HomonymIn>,
) -> Response {
  let word = match body.word.as_deref().map(str::trim) {
    Some(w) if !w.is_empty() => w.to_string(),
    _ => return missing_word_response(),
  };
  let level = parse_level(body.level.as_deref());
  info!(target: "reibun_backend", %word, %level, "Homonym analysis requested");

  match homonym::resolve(state.text_generator(), &word, level, &state.settings).await {
    Some(meanings) => {
      info!(target: "reibun_backend", %word, meanings = meanings.len(), "Homonym analysis served");
      Json(HomonymOut {
        found: true,
        meanings: Some(meanings.iter().map(to_meaning_out).collect()),
        error: None,
      })
      .into_response()
    }
    None => Json(HomonymOut {
      found: false,
      meanings: None,
      error: Some(homonym::not_found_error(&word)),
    })
    .into_response(),
  }
}
