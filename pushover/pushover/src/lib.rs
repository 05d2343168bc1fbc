#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! Pushover is a blocking Pushover API client in Rust 2021 edition.
//!
//! It sends messages, one at a time or in batches over a shared connection,
//! lists notification sounds, validates user and group keys, and checks or
//! cancels receipts of emergency messages.
//!
//! ```no_run
//! use pushover::{Client, Message, Priority};
//!
//! # fn main() -> Result<(), pushover::Error> {
//! let client = Client::new("token");
//!
//! let mut message = Message::new("user", "backup finished");
//! message.title = Some("nightly");
//! message.priority = Some(Priority::High);
//! client.send_message(&message)?;
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub use client::{Client, Session};
pub use message::{sanitize_message, Message, Priority};
pub use response::{ReceiptResponse, Response, ValidateResponse};

mod client;
mod message;
mod response;

/// Pushover API client error.
#[derive(Error, Debug)]
pub enum Error {
    /// Pushover rejected the request, or answered with an HTTP status other than 200.
    /// <https://pushover.net/api#response>
    #[error("HTTP Status {status}: {}", .errors.join("; "))]
    BadApiRequest {
        /// HTTP status code.
        status: u16,
        /// Errors reported by Pushover, in order.
        errors: Vec<String>,
    },
    /// HTML and monospace are mutually exclusive. <https://pushover.net/api#html>
    #[error("html and monospace are mutually exclusive")]
    HtmlMonospace,
    /// Error from [`ureq`] crate.
    #[error("ureq error: {0}")]
    UReq(#[from] Box<ureq::Error>),
    /// Error from [`serde_json`] crate.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    /// Error from [`url`] crate.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
fn server_url() -> String {
    format!("{}/1/", mockito::server_url())
}

#[cfg(not(test))]
fn server_url() -> String {
    "https://api.pushover.net/1/".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_bad_api_request_display() {
        let e = Error::BadApiRequest {
            status: 400,
            errors: vec![
                "application token is invalid".to_string(),
                "message cannot be blank".to_string(),
            ],
        };
        assert_eq!(
            "HTTP Status 400: application token is invalid; message cannot be blank",
            e.to_string()
        );

        let e = Error::BadApiRequest {
            status: 500,
            errors: vec![],
        };
        assert_eq!("HTTP Status 500: ", e.to_string());
    }
}
