//! Typed Rust client for the Teleforte SMS HTTP API (`sms.lcx.at`).
//!
//! The crate is split into a domain layer of validated types, a transport layer for
//! the form encoding and the `<code>:<id>` response body, and a small client layer
//! that performs the single POST per send.
//!
//! ```rust,no_run
//! use teleforte::TeleforteClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), teleforte::TeleforteError> {
//!     let mut client = TeleforteClient::with_sender("...", "ACME")?;
//!     client.add_recipient("491234567890")?;
//!     let id = client.send_message("hello").await?;
//!     println!("accepted as {id}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{TeleforteClient, TeleforteClientBuilder, TeleforteError};
pub use domain::{
    ApiKey, KnownResponseCode, MessageText, PreconditionError, Recipient, ResponseCode,
    ResponseId, SendMessage, SendMessageResponse, Sender, ValidationError,
};
