//! Request and shot-list types.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Minimum script length, counted in characters after trimming.
pub const MIN_SCRIPT_CHARS: usize = 10;

/// Inbound payload: `{ "script": string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotRequest {
    pub script: String,
}

impl ShotRequest {
    /// Extract a usable script from a raw request body.
    ///
    /// Absent, unparseable, or non-object bodies behave like `{}`. Returns
    /// `None` when `script` is missing, not a string, or too short once
    /// trimmed. The script itself is kept untrimmed.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let script = value.get("script")?.as_str()?;

        if script.trim().chars().count() < MIN_SCRIPT_CHARS {
            return None;
        }

        Some(Self {
            script: script.to_string(),
        })
    }
}

/// A single camera setup.
///
/// Every field is optional and accepts `null`: the model's output is relayed
/// as produced, so this is a lenient view of it rather than a contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shot {
    /// 1-based shot number.
    pub n: Option<Number>,
    pub slugline: Option<String>,
    pub description: Option<String>,
    pub angle: Option<String>,
    pub movement: Option<String>,
    pub location: Option<String>,
    pub time_of_day: Option<String>,
    pub props: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Response payload: `{ "shots": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotList {
    pub shots: Vec<Shot>,
}

impl ShotList {
    pub fn empty() -> Self {
        Self::default()
    }
}
