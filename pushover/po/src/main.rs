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

//! po is a command line application based on Pushover API.
//!
//! If Pushover API token / key is "token" and user key is "user",
//!
//! ```
//! $ po -t token send -u user -m message
//! ```
//!
//! Or you can set environment variables instead,
//!
//! ```
//! $ export PUSHOVER_TOKEN=token
//! $ export PUSHOVER_USER=user
//! $ echo message | po send
//! ```
//!
//! Emergency messages return a receipt, which can be checked or cancelled,
//!
//! ```
//! $ po send -m "disk full" --priority emergency --retry 60 --expire 3600
//! $ po receipt <receipt>
//! $ po cancel <receipt>
//! ```
//!
//! For more information,
//!
//! ```
//! $ po -h
//! ```

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use log::{debug, Level};
use logging_timer::{finish, stimer};

use pushover::{Client, Message, Priority};

#[doc(hidden)]
#[derive(Debug, Parser)]
#[command(about, author, version)]
struct Opts {
    /// Your application's API token. <https://pushover.net/api#identifiers>
    #[arg(short, long, env = "PUSHOVER_TOKEN")]
    token: String,
    /// Verbose.
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[doc(hidden)]
#[derive(Debug, Subcommand)]
enum Command {
    /// Send a message, read from standard input when --message is omitted.
    Send(SendOpts),
    /// List notification sounds. <https://pushover.net/api#sounds>
    Sounds,
    /// Validate a user or group key. <https://pushover.net/api#validate>
    Validate {
        /// The user / group key to validate.
        #[arg(short, long, env = "PUSHOVER_USER")]
        user: String,
        /// Also validate this device name.
        #[arg(long)]
        device: Option<String>,
    },
    /// Check the receipt of an emergency message. <https://pushover.net/api/receipts>
    Receipt {
        /// Receipt returned when the emergency message was sent.
        receipt: String,
    },
    /// Stop retrying an emergency message. <https://pushover.net/api/receipts#cancel>
    Cancel {
        /// Receipt returned when the emergency message was sent.
        receipt: String,
    },
}

#[doc(hidden)]
#[derive(Debug, Args)]
struct SendOpts {
    /// The user / group key (not e-mail address) of your user (or you). <https://pushover.net/api#identifiers>
    #[arg(short, long, env = "PUSHOVER_USER")]
    user: String,
    /// Your message. <https://pushover.net/api#messages>
    #[arg(short, long)]
    message: Option<String>,
    /// To enable HTML formatting. monospace may not be used if html is used, and vice versa. <https://pushover.net/api#html>
    #[arg(long)]
    html: bool,
    /// To enable monospace messages. monospace may not be used if html is used, and vice versa. <https://pushover.net/api#html>
    #[arg(long)]
    monospace: bool,
    /// Your user's device name to send the message directly to that device, rather than all of the user's devices. <https://pushover.net/api#identifiers>
    #[arg(long)]
    device: Option<String>,
    /// Your message's title, otherwise your app's name is used. <https://pushover.net/api#messages>
    #[arg(long)]
    title: Option<String>,
    /// A Unix timestamp of your message's date and time to display to the user, rather than the time your message is received by our API. <https://pushover.net/api#timestamp>
    #[arg(long)]
    timestamp: Option<u64>,
    /// Messages may be sent with a different priority that affects how the message is presented to the user
    /// e.g. -2, -1, 0, 1, 2, lowest, low, normal, high, emergency. <https://pushover.net/api#priority>
    #[arg(long, allow_hyphen_values = true)]
    priority: Option<Priority>,
    /// Seconds between retries of an emergency message, at least 30.
    #[arg(long)]
    retry: Option<u32>,
    /// Seconds an emergency message keeps being retried, at most 10800.
    #[arg(long)]
    expire: Option<u32>,
    /// Name of a sound to play, see `po sounds`. <https://pushover.net/api#sounds>
    #[arg(long)]
    sound: Option<String>,
    /// A supplementary URL to show with your message. <https://pushover.net/api#urls>
    #[arg(long)]
    url: Option<String>,
    /// A title for your supplementary URL, otherwise just the URL is shown. <https://pushover.net/api#urls>
    #[arg(long)]
    url_title: Option<String>,
}

impl SendOpts {
    fn to_message<'a>(&'a self, body: &'a str) -> Message<'a> {
        let mut message = Message::new(self.user.as_str(), body);
        message.device = self.device.as_deref();
        message.title = self.title.as_deref();
        message.timestamp = self.timestamp;
        message.priority = self.priority;
        message.retry = self.retry;
        message.expire = self.expire;
        message.sound = self.sound.as_deref();
        message.url = self.url.as_deref();
        message.url_title = self.url_title.as_deref();
        message.html = self.html;
        message.monospace = self.monospace;
        message
    }
}

fn read_message(opts: &SendOpts) -> anyhow::Result<String> {
    use std::io::Read as _;

    if let Some(ref m) = opts.message {
        return Ok(m.clone());
    }
    if atty::is(atty::Stream::Stdin) {
        bail!("message is required, pass --message or pipe it through standard input");
    }
    debug!("read message from standard input");
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim_end().to_string())
}

#[doc(hidden)]
fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts: Opts = Opts::parse();
    let client = Client::new(&opts.token);

    match opts.command {
        Command::Send(ref send) => {
            let body = read_message(send)?;
            let message = send.to_message(&body);

            let tmr = stimer!(Level::Debug; "SEND");
            let res = client.send_message(&message)?;
            finish!(tmr);

            if let Some(receipt) = res.receipt.as_deref() {
                println!("{receipt}");
            }
            if opts.verbose {
                println!("{res:?}");
            }
        }
        Command::Sounds => {
            let tmr = stimer!(Level::Debug; "SOUNDS");
            let sounds = client.get_sounds()?;
            finish!(tmr);

            for (name, description) in sounds {
                println!("{name}\t{description}");
            }
        }
        Command::Validate {
            ref user,
            ref device,
        } => {
            let tmr = stimer!(Level::Debug; "VALIDATE");
            let res = client.validate(user, device.as_deref())?;
            finish!(tmr);

            if res.is_group {
                println!("group");
            } else {
                println!("user: {}", res.devices.join(", "));
            }
            if opts.verbose {
                println!("{res:?}");
            }
        }
        Command::Receipt { ref receipt } => {
            let tmr = stimer!(Level::Debug; "RECEIPT");
            let res = client.check_receipt(receipt)?;
            finish!(tmr);

            if res.acknowledged {
                println!(
                    "acknowledged by {} on {} at {}",
                    res.acknowledged_by, res.acknowledged_by_device, res.acknowledged_at
                );
            } else if res.expired {
                println!("expired at {}", res.expires_at);
            } else {
                println!("pending, expires at {}", res.expires_at);
            }
            if opts.verbose {
                println!("{res:?}");
            }
        }
        Command::Cancel { ref receipt } => {
            let tmr = stimer!(Level::Debug; "CANCEL");
            let res = client.cancel_receipt(receipt)?;
            finish!(tmr);

            if opts.verbose {
                println!("{res:?}");
            }
        }
    }
    Ok(())
}
