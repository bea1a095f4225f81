use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Teleforte account API key (`api_key`).
///
/// Invariant: not blank. The value is opaque and kept exactly as provided.
pub struct ApiKey(String);

impl ApiKey {
    /// Form field name used by Teleforte (`api_key`).
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Alphanumeric sender shown on the handset (`sender`).
///
/// Invariant: 1 to 11 characters, each an ASCII letter, digit or whitespace.
pub struct Sender(String);

impl Sender {
    /// Form field name used by Teleforte (`sender`).
    pub const FIELD: &'static str = "sender";

    /// Maximum sender length.
    pub const MAX_LEN: usize = 11;

    /// Create a validated [`Sender`]. Whitespace is allowed and preserved.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let valid = (1..=Self::MAX_LEN).contains(&value.len())
            && value.chars().all(is_sender_char);
        if !valid {
            return Err(ValidationError::InvalidSender { input: value });
        }
        Ok(Self(value))
    }

    /// Borrow the validated sender.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// `\s` as understood by the provider: space, \t, \n, \v, \f, \r.
fn is_sender_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone number (`recipient`), e.g. `491234567890`.
///
/// Invariant: non-empty and ASCII digits only. No normalization is performed, so a
/// leading `+`, spaces or dashes are rejected rather than stripped.
pub struct Recipient(String);

impl Recipient {
    /// Form field name used by Teleforte (`recipient`).
    pub const FIELD: &'static str = "recipient";

    /// Separator placed between recipients in the form field.
    pub const SEPARATOR: &'static str = ";";

    /// Create a validated [`Recipient`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidRecipient { input: value });
        }
        Ok(Self(value))
    }

    /// Digits as sent to Teleforte.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariant: at most [`MessageText::MAX_LEN`] bytes of UTF-8. The limit is counted in
/// bytes, so text outside ASCII uses up the budget faster than its character count
/// suggests. Empty text is accepted.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by Teleforte (`message`).
    pub const FIELD: &'static str = "message";

    /// Maximum message length in bytes (one SMS segment).
    pub const MAX_LEN: usize = 160;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.len() > Self::MAX_LEN {
            return Err(ValidationError::MessageTooLong {
                max: Self::MAX_LEN,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes, as counted against [`MessageText::MAX_LEN`].
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for an empty message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Tracking id returned by Teleforte for an accepted message.
pub struct ResponseId(u64);

impl ResponseId {
    /// Wrap a raw tracking id.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying id.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Teleforte response code (the part before the colon).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ResponseCode(u32);

impl ResponseCode {
    /// Construct a response code from its integer representation.
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Teleforte.
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Map this code to a known variant, if one exists.
    pub fn known(self) -> Option<KnownResponseCode> {
        KnownResponseCode::from_code(self.0)
    }

    /// Returns `true` when the message was accepted.
    pub fn is_success(self) -> bool {
        self.known() == Some(KnownResponseCode::Accepted)
    }

    /// Returns `true` if resending the same request could succeed.
    ///
    /// Teleforte documents no retryable code: the fatal host failure and the length
    /// rejection fail again, and undocumented codes are not assumed to be transient.
    pub fn is_retryable(self) -> bool {
        false
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Response codes with a documented meaning.
pub enum KnownResponseCode {
    /// `0`: the host failed to send the message; contact support.
    HostFatal,
    /// `1`: the provider counted the message as longer than 160 characters.
    MessageTooLong,
    /// `200`: the message was accepted.
    Accepted,
}

impl KnownResponseCode {
    /// Convert a raw integer code into a known variant.
    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0 => Self::HostFatal,
            1 => Self::MessageTooLong,
            200 => Self::Accepted,
            _ => return None,
        })
    }

    /// Integer value used on the wire.
    pub fn code(self) -> u32 {
        match self {
            Self::HostFatal => 0,
            Self::MessageTooLong => 1,
            Self::Accepted => 200,
        }
    }
}
