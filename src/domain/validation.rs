use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidRecipient { input: String },
    InvalidSender { input: String },
    MessageTooLong { max: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidRecipient { input } => write!(f, "recipient is not a number: {input}"),
            Self::InvalidSender { input } => write!(
                f,
                "sender must be alphanumeric and cannot be longer than 11 characters: {input:?}"
            ),
            Self::MessageTooLong { max, actual } => {
                write!(f, "message is {actual} bytes long (max {max})")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// State missing on the client when a send is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    MissingSender,
    NoRecipients,
    MessageTooLong { max: usize, actual: usize },
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSender => f.write_str("you must provide a sender"),
            Self::NoRecipients => f.write_str("you must provide at least one recipient"),
            Self::MessageTooLong { max, actual } => write!(
                f,
                "the message must not be longer than {max} bytes (got {actual})"
            ),
        }
    }
}

impl std::error::Error for PreconditionError {}
