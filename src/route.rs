use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::feed::FeedError;

/// Same set `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const DEFAULT_ENVELOPE_FIELD: &str = "contents";

/// How a relay hands back the upstream document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Unwrap {
    #[default]
    Raw,
    JsonEnvelope {
        #[serde(default = "default_envelope_field")]
        field: String,
    },
}

fn default_envelope_field() -> String {
    DEFAULT_ENVELOPE_FIELD.to_string()
}

/// A relay endpoint that fetches an arbitrary target URL on our behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub prefix: String,
    #[serde(default)]
    pub unwrap: Unwrap,
}

impl Route {
    pub fn raw(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            unwrap: Unwrap::Raw,
        }
    }

    pub fn envelope(name: impl Into<String>, prefix: impl Into<String>, field: &str) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            unwrap: Unwrap::JsonEnvelope {
                field: field.to_string(),
            },
        }
    }

    pub fn request_url(&self, target: &str) -> String {
        format!(
            "{}{}",
            self.prefix,
            utf8_percent_encode(target, URI_COMPONENT)
        )
    }

    /// Recover the feed document from a relay response body.
    pub fn unwrap_body(&self, body: String) -> Result<String, FeedError> {
        match &self.unwrap {
            Unwrap::Raw => Ok(body),
            Unwrap::JsonEnvelope { field } => {
                let envelope: Value =
                    serde_json::from_str(&body).map_err(|source| FeedError::Envelope {
                        field: field.clone(),
                        source,
                    })?;
                match envelope.get(field.as_str()) {
                    Some(Value::String(contents)) => Ok(contents.clone()),
                    _ => Err(FeedError::MissingField(field.clone())),
                }
            }
        }
    }
}

pub fn default_routes() -> Vec<Route> {
    vec![
        Route::envelope(
            "allorigins",
            "https://api.allorigins.win/get?url=",
            DEFAULT_ENVELOPE_FIELD,
        ),
        Route::raw("corsproxy", "https://corsproxy.io/?"),
        Route::raw("cors-anywhere", "https://cors-anywhere.herokuapp.com/"),
    ]
}
