//! Перевод текстов и обратный перевод (de → en → de)

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TranslatorConfig;
use crate::error::{PipelineError, Result};

pub trait Translator {
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

/// Клиент LibreTranslate-совместимого сервиса (`POST /translate`)
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::Translation(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}/translate", endpoint.trim_end_matches('/')),
            api_key,
        })
    }

    /// `None`, если endpoint не задан
    pub fn from_config(config: &TranslatorConfig) -> Result<Option<Self>> {
        config
            .endpoint
            .as_deref()
            .map(|endpoint| {
                Self::new(
                    endpoint,
                    config.api_key.clone(),
                    Duration::from_secs(config.timeout_secs),
                )
            })
            .transpose()
    }
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        debug!(chars = text.len(), source_lang, target_lang, "translate request");
        let request = TranslateRequest {
            q: text,
            source: source_lang,
            target: target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .map_err(|e| PipelineError::Translation(format!("request to {} failed: {e}", self.url)))?;

        let status = response.status();
        let body: TranslateResponse = response
            .json()
            .map_err(|e| PipelineError::Translation(format!("invalid response ({status}): {e}")))?;

        match (body.translated_text, body.error) {
            (Some(text), _) if status.is_success() => Ok(text),
            (_, Some(error)) => Err(PipelineError::Translation(format!("{status}: {error}"))),
            _ => Err(PipelineError::Translation(format!(
                "{status}: response without translatedText"
            ))),
        }
    }
}

/// Обратный перевод через промежуточный язык
pub struct BackTranslator<'a> {
    translator: &'a dyn Translator,
    from_lang: String,
    via_lang: String,
}

impl<'a> BackTranslator<'a> {
    pub fn new(translator: &'a dyn Translator, from_lang: &str, via_lang: &str) -> Self {
        Self {
            translator,
            from_lang: from_lang.to_string(),
            via_lang: via_lang.to_string(),
        }
    }

    /// de → en → de
    pub fn german_via_english(translator: &'a dyn Translator) -> Self {
        Self::new(translator, "de", "en")
    }

    pub fn augment(&self, text: &str) -> Result<String> {
        let there = self
            .translator
            .translate(text, &self.from_lang, &self.via_lang)?;
        self.translator
            .translate(&there, &self.via_lang, &self.from_lang)
    }
}
