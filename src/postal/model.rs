use std::fmt;
use std::sync::LazyLock;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use crate::error::LookupError;

/// ASCII digits only, `\d` would also accept other scripts' digits
static PINCODE_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

/// A validated six digit postal code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pincode(String);

impl Pincode {
    /// Accepts the input exactly as typed, nothing is trimmed.
    pub fn parse(raw: &str) -> Result<Self, LookupError> {
        if PINCODE_REG.is_match(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(LookupError::InvalidPincode)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One post office as reported by the lookup service
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostOfficeRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub branch_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub delivery_status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub district: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub division: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The decoded answer of the service for one pincode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceReply {
    Found {
        message: String,
        offices: Vec<PostOfficeRecord>,
    },
    /// `Status: "Error"` or no `PostOffice` list
    NotFound {
        message: Option<String>,
    },
}

/// wire shape of the first element of the reply list
#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Status", default)]
    status: Option<String>,
    #[serde(rename = "PostOffice", default)]
    post_office: Option<Vec<PostOfficeRecord>>,
}

impl From<RawReply> for ServiceReply {
    fn from(raw: RawReply) -> Self {
        match raw.post_office {
            Some(offices) if raw.status.as_deref() != Some("Error") => ServiceReply::Found {
                message: raw.message.unwrap_or_default(),
                offices,
            },
            _ => ServiceReply::NotFound {
                message: raw.message.filter(|m| !m.is_empty()),
            },
        }
    }
}

/// Decode a response body of the lookup service.
///
/// A body that is not JSON is a transport failure. JSON of the wrong shape,
/// including a blank body or an empty list, is a protocol failure.
pub fn decode_reply(body: &str) -> Result<ServiceReply, LookupError> {
    if body.trim().is_empty() {
        return Err(LookupError::Protocol("empty response body".to_string()));
    }
    let value: Value = serde_json::from_str(body)?;
    let first = match value {
        Value::Array(items) => items.into_iter().next(),
        _ => None,
    }
        .filter(Value::is_object)
        .ok_or_else(|| LookupError::Protocol(format!("expected a list of reply objects, got: {}", excerpt(body))))?;

    let raw: RawReply = serde_json::from_value(first)
        .map_err(|e| LookupError::Protocol(format!("unexpected reply shape: {}", e)))?;
    Ok(raw.into())
}

/// at most `EXCERPT_CHARS` of `body` plus its total length, for log lines
fn excerpt(body: &str) -> String {
    const EXCERPT_CHARS: usize = 120;
    match body.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}… ({} bytes)", &body[..cut], body.len()),
        None => body.to_string(),
    }
}
