use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Pushover API response. <https://pushover.net/api#response>
#[derive(Clone, Debug, Deserialize)]
pub struct Response {
    /// If POST request to API was valid, we will receive an HTTP 200 (OK) status, with a JSON object containing a status code of `1`.
    pub status: u8,
    /// The `request` parameter returned from all API calls is a randomly-generated unique token that we have associated with your request.
    pub request: String,
    /// ...and an `errors` array detailing which parameters were invalid.
    pub errors: Option<Vec<String>>,
    /// Receipt of an emergency message. <https://pushover.net/api/receipts>
    pub receipt: Option<String>,
}

/// Response of `users/validate.json`. <https://pushover.net/api#validate>
#[derive(Clone, Debug, Deserialize)]
pub struct ValidateResponse {
    /// Always `1` once returned to the caller.
    pub status: u8,
    /// Request identifier.
    pub request: String,
    /// Whether the key belongs to a group rather than a user.
    #[serde(rename = "group", default, deserialize_with = "int_bool")]
    pub is_group: bool,
    /// Active devices of a user, empty for groups.
    #[serde(default)]
    pub devices: Vec<String>,
    /// Platforms the user has licensed.
    #[serde(default)]
    pub licenses: Vec<String>,
}

/// Response of `receipts/{receipt}.json`. <https://pushover.net/api/receipts>
#[derive(Clone, Debug, Deserialize)]
pub struct ReceiptResponse {
    /// Always `1` once returned to the caller.
    pub status: u8,
    /// Request identifier.
    pub request: String,
    /// Whether the emergency message has been acknowledged.
    #[serde(default, deserialize_with = "int_bool")]
    pub acknowledged: bool,
    /// Unix timestamp of the acknowledgement, `0` if none.
    #[serde(default)]
    pub acknowledged_at: u64,
    /// User key of the acknowledging user.
    #[serde(default)]
    pub acknowledged_by: String,
    /// Device the message was acknowledged from.
    #[serde(default)]
    pub acknowledged_by_device: String,
    /// Unix timestamp of the most recent delivery.
    #[serde(default)]
    pub last_delivered_at: u64,
    /// Whether retries have stopped because `expire` passed.
    #[serde(default, deserialize_with = "int_bool")]
    pub expired: bool,
    /// Unix timestamp at which retries stop.
    #[serde(default)]
    pub expires_at: u64,
    /// Whether the callback URL has been called.
    #[serde(default, deserialize_with = "int_bool")]
    pub called_back: bool,
    /// Unix timestamp of the callback.
    #[serde(default)]
    pub called_back_at: u64,
}

#[derive(Deserialize)]
pub(crate) struct SoundsResponse {
    #[serde(default)]
    pub(crate) sounds: BTreeMap<String, String>,
}

/// Fields shared by every response, read before the endpoint-specific body.
#[derive(Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub(crate) status: u8,
    #[serde(default)]
    pub(crate) errors: Vec<String>,
}

impl Envelope {
    pub(crate) fn is_success(&self) -> bool {
        self.status == 1
    }
}

fn int_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u64::deserialize(deserializer)? != 0)
}
