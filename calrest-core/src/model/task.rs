use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

const MAX_PERCENT: u8 = 100;

/// A unit of work attached to a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Completion, 0 to 100.
    #[serde(deserialize_with = "deserialize_percent")]
    pub percent: u8,
}

fn deserialize_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let percent = u8::deserialize(deserializer)?;
    if percent > MAX_PERCENT {
        return Err(D::Error::custom(format!(
            "percent must be between 0 and {MAX_PERCENT}, got {percent}"
        )));
    }
    Ok(percent)
}
