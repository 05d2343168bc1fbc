use std::borrow::Cow;
use std::fmt::Display;

use maplit::{hashmap, hashset};

use crate::Error;

/// Pushover message parameters. <https://pushover.net/api#messages>
#[derive(Clone, Debug, Default)]
pub struct Message<'a> {
    user: Cow<'a, str>,
    message: Cow<'a, str>,
    /// Your user's device name to send the message directly to that device,
    /// rather than all of the user's devices (multiple devices may be separated by a comma).
    /// <https://pushover.net/api#identifiers>
    pub device: Option<&'a str>,
    /// Your message's title, otherwise your app's name is used. <https://pushover.net/api#messages>
    pub title: Option<&'a str>,
    /// A supplementary URL to show with your message. <https://pushover.net/api#urls>
    pub url: Option<&'a str>,
    /// A title for your supplementary URL,
    /// otherwise just the URL is shown. <https://pushover.net/api#urls>
    pub url_title: Option<&'a str>,
    /// Messages may be sent with a different priority that affects
    /// how the message is presented to the user. <https://pushover.net/api#priority>
    pub priority: Option<Priority>,
    /// How often, in seconds, Pushover retries an emergency message.
    /// Required with [`Priority::Emergency`]. <https://pushover.net/api#priority>
    pub retry: Option<u32>,
    /// How many seconds an emergency message keeps being retried.
    /// Required with [`Priority::Emergency`]. <https://pushover.net/api#priority>
    pub expire: Option<u32>,
    /// A Unix timestamp of your message's date and time to display to the user,
    /// rather than the time your message is received by the API. <https://pushover.net/api#timestamp>
    pub timestamp: Option<u64>,
    /// Name of a sound to play, see [`crate::Client::get_sounds`]. <https://pushover.net/api#sounds>
    pub sound: Option<&'a str>,
    /// To enable HTML formatting. <https://pushover.net/api#html>
    ///
    /// The body is sanitized with [`sanitize_message`] before sending: tags other than
    /// `b`, `i`, `u`, `font` and `a` are removed, text is entity-escaped and links get
    /// `rel="noopener noreferrer"`.
    pub html: bool,
    /// To enable monospace messages. <https://pushover.net/api#html>
    pub monospace: bool,
}

/// Messages may be sent with a different priority
/// that affects how the message is presented to the user. <https://pushover.net/api#priority>
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display, strum::EnumString)]
pub enum Priority {
    /// No notification, only a badge.
    #[strum(to_string = "-2", serialize = "lowest")]
    Lowest,
    /// Quiet notification.
    #[strum(to_string = "-1", serialize = "low")]
    Low,
    /// Normal (default)
    #[strum(to_string = "0", serialize = "normal")]
    Normal,
    /// Bypasses the user's quiet hours.
    #[strum(to_string = "1", serialize = "high")]
    High,
    /// Repeated until acknowledged, requires retry and expire.
    #[strum(to_string = "2", serialize = "emergency")]
    Emergency,
}

/// Strips every tag Pushover does not render from an HTML message.
#[doc(hidden)]
pub fn sanitize_message<'a, T>(message: T) -> Cow<'a, str>
where
    T: Into<Cow<'a, str>>,
{
    let tags = hashset!["b", "i", "u", "font", "a"];
    let tag_attrs = hashmap![
        "a" => hashset!["href"],
        "font" => hashset!["color"],
    ];
    let message = message.into();
    ammonia::Builder::default()
        .tags(tags)
        .tag_attributes(tag_attrs)
        .clean(message.as_ref())
        .to_string()
        .into()
}

type Form = Vec<(&'static str, String)>;

fn push_optional<T: Display>(form: &mut Form, name: &'static str, value: Option<T>) {
    if let Some(v) = value {
        form.push((name, v.to_string()));
    }
}

impl<'a> Message<'a> {
    /// Creates a [`Message`] for a user or group key.
    ///
    /// ```rust
    /// # use pushover::Message;
    /// // Notify user
    /// Message::new("user", "message");
    /// // Notify group of users
    /// Message::new("group", "message");
    /// ```
    pub fn new<T>(user: T, message: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        Self {
            user: user.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// User or group key.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Message body, as given.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Form fields of `messages.json`, absent parameters omitted.
    pub(crate) fn form(&self, token: &str) -> Result<Form, Error> {
        if self.html && self.monospace {
            return Err(Error::HtmlMonospace);
        }

        let message = if self.html {
            sanitize_message(self.message.as_ref())
        } else {
            Cow::Borrowed(self.message.as_ref())
        };

        let mut form = vec![
            ("token", token.to_string()),
            ("user", self.user.to_string()),
            ("message", message.into_owned()),
        ];
        push_optional(&mut form, "device", self.device);
        push_optional(&mut form, "title", self.title);
        push_optional(&mut form, "url", self.url);
        push_optional(&mut form, "url_title", self.url_title);
        push_optional(&mut form, "priority", self.priority);
        push_optional(&mut form, "retry", self.retry);
        push_optional(&mut form, "expire", self.expire);
        push_optional(&mut form, "timestamp", self.timestamp);
        push_optional(&mut form, "sound", self.sound);
        push_optional(&mut form, "html", self.html.then(|| 1));
        push_optional(&mut form, "monospace", self.monospace.then(|| 1));
        Ok(form)
    }
}
