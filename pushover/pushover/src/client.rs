use std::collections::BTreeMap;
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use ureq::{Agent, AgentBuilder};
use url::Url;

use crate::response::{Envelope, SoundsResponse};
use crate::{server_url, Error, Message, ReceiptResponse, Response, ValidateResponse};

/// Pushover API client, holding the application token.
///
/// Every call on [`Client`] opens its own connection. Use [`Client::session`]
/// or [`Client::send_messages`] to reuse one connection across calls.
#[derive(Clone, Debug)]
pub struct Client {
    token: String,
    base_url: String,
    timeout: Option<Duration>,
}

/// Connection borrowed from a [`Client`], released when dropped.
#[derive(Debug)]
pub struct Session<'c> {
    client: &'c Client,
    agent: Agent,
}

impl Client {
    /// Creates a [`Client`] with your application's API token.
    /// <https://pushover.net/api#registration>
    ///
    /// ```rust
    /// # use pushover::Client;
    /// let client = Client::new("token");
    /// ```
    pub fn new<T: Into<String>>(token: T) -> Self {
        Self {
            token: token.into(),
            base_url: server_url(),
            timeout: None,
        }
    }

    /// Replaces the API base URL, `https://api.pushover.net/1/` by default.
    pub fn with_base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    /// Sets the overall timeout of every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Opens a [`Session`] whose connection is kept alive between calls.
    pub fn session(&self) -> Session<'_> {
        let mut builder = AgentBuilder::new();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Session {
            client: self,
            agent: builder.build(),
        }
    }

    /// Sends a [`Message`]. <https://pushover.net/api#messages>
    pub fn send_message(&self, message: &Message<'_>) -> Result<Response, Error> {
        self.session().send_message(message)
    }

    /// Sends [`Message`]s one after another over a single connection.
    ///
    /// Stops at the first message Pushover rejects and returns its error,
    /// leaving the remaining messages unsent.
    pub fn send_messages(&self, messages: &[Message<'_>]) -> Result<Vec<Response>, Error> {
        let session = self.session();
        messages
            .iter()
            .map(|m| session.send_message(m))
            .collect()
    }

    /// Sound names mapped to their descriptions. <https://pushover.net/api#sounds>
    pub fn get_sounds(&self) -> Result<BTreeMap<String, String>, Error> {
        self.session().get_sounds()
    }

    /// Validates a user or group key, optionally with a device name.
    /// <https://pushover.net/api#validate>
    pub fn validate(&self, user: &str, device: Option<&str>) -> Result<ValidateResponse, Error> {
        self.session().validate(user, device)
    }

    /// Status of an emergency message. <https://pushover.net/api/receipts>
    pub fn check_receipt(&self, receipt: &str) -> Result<ReceiptResponse, Error> {
        self.session().check_receipt(receipt)
    }

    /// Stops retries of an emergency message. <https://pushover.net/api/receipts#cancel>
    pub fn cancel_receipt(&self, receipt: &str) -> Result<Response, Error> {
        self.session().cancel_receipt(receipt)
    }

    /// Base URL extended with each segment percent-encoded, so `?`, `#`
    /// and `/` in a segment stay inside it.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Session<'_> {
    /// See [`Client::send_message`].
    pub fn send_message(&self, message: &Message<'_>) -> Result<Response, Error> {
        let form = message.form(&self.client.token)?;
        self.post(&["messages.json"], &form)
    }

    /// See [`Client::get_sounds`].
    pub fn get_sounds(&self) -> Result<BTreeMap<String, String>, Error> {
        let res: SoundsResponse = self.get(&["sounds.json"])?;
        Ok(res.sounds)
    }

    /// See [`Client::validate`].
    pub fn validate(&self, user: &str, device: Option<&str>) -> Result<ValidateResponse, Error> {
        let mut form = vec![
            ("token", self.client.token.clone()),
            ("user", user.to_string()),
        ];
        if let Some(device) = device {
            form.push(("device", device.to_string()));
        }
        self.post(&["users", "validate.json"], &form)
    }

    /// See [`Client::check_receipt`].
    pub fn check_receipt(&self, receipt: &str) -> Result<ReceiptResponse, Error> {
        self.get(&["receipts", format!("{receipt}.json").as_str()])
    }

    /// See [`Client::cancel_receipt`].
    pub fn cancel_receipt(&self, receipt: &str) -> Result<Response, Error> {
        self.get(&["receipts", receipt, "cancel.json"])
    }

    fn post<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.client.endpoint(segments)?;
        let pairs: Vec<(&str, &str)> = form.iter().map(|(k, v)| (*k, v.as_str())).collect();
        debug!("POST {}", url.path());
        let result = self.agent.post(url.as_str()).send_form(&pairs);
        read_response(url.path(), result)
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.client.endpoint(segments)?;
        debug!("GET {}", url.path());
        let result = self
            .agent
            .get(url.as_str())
            .query("token", &self.client.token)
            .call();
        read_response(url.path(), result)
    }
}

fn read_response<T: DeserializeOwned>(
    path: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<T, Error> {
    // Pushover puts the errors array in the body of 4xx responses too
    let response = match result {
        Ok(r) => r,
        Err(ureq::Error::Status(_, r)) => r,
        Err(e) => return Err(Error::UReq(Box::new(e))),
    };

    let status = response.status();
    let body = response.into_string()?;
    debug!("{path} responded with HTTP {status}");

    let envelope: Envelope = serde_json::from_str(&body)?;
    if !envelope.is_success() || status != 200 {
        return Err(Error::BadApiRequest {
            status,
            errors: envelope.errors,
        });
    }
    Ok(serde_json::from_str(&body)?)
}
