use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{TranslateError, TranslationResult};

/// Body of `GET /api/translate/`.
///
/// The upstream contract is loose: any key may be missing, null or of the
/// wrong type. Such values fall back to their defaults instead of failing.
#[derive(Debug, Default, Deserialize)]
pub struct TranslationResponse {
    #[serde(default, deserialize_with = "lenient_optional")]
    pub pronunciation: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional")]
    pub source_language: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub translated_text: String,
}

impl TranslationResponse {
    pub fn parse(body: &str) -> Result<Self, TranslateError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;

        if !value.is_object() {
            return Err(TranslateError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| TranslateError::MalformedResponse(e.to_string()))
    }
}

impl From<TranslationResponse> for TranslationResult {
    fn from(response: TranslationResponse) -> Self {
        TranslationResult {
            translated_text: response.translated_text,
            source_language_detected: response.source_language,
            pronunciation: response.pronunciation,
        }
    }
}

fn lenient_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        _ => String::new(),
    })
}
