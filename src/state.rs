//! Application state: generation settings and the optional Gemini client.
//!
//! If GEMINI_API_KEY is absent the server still runs; every generation path
//! degrades to its placeholder output instead of failing requests.

use tracing::{info, instrument, warn};

use crate::config::{load_settings_from_env, GenSettings};
use crate::gemini::{GeminiClient, TextGenerator};

#[derive(Clone)]
pub struct AppState {
    pub gemini: Option<GeminiClient>,
    pub settings: GenSettings,
}

impl AppState {
    /// Build state from env: load settings, init the Gemini client if keyed.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let settings = load_settings_from_env();
        let mut gemini = GeminiClient::from_env(settings.max_retries);
        if let (Some(client), Some(model)) = (gemini.as_mut(), settings.model.as_ref()) {
            client.model = model.clone();
        }

        match &gemini {
            Some(client) => {
                info!(target: "reibun_backend", model = %client.model, "Gemini client initialized");
            }
            None => {
                warn!(target: "reibun_backend", "GEMINI_API_KEY not set; generation endpoints return placeholders");
            }
        }

        Self { gemini, settings }
    }

    pub fn text_generator(&self) -> Option<&dyn TextGenerator> {
        self.gemini.as_ref().map(|c| c as &dyn TextGenerator)
    }
}
