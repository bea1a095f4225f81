//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::SendMessage;
pub use response::SendMessageResponse;
pub use validation::{PreconditionError, ValidationError};
pub use value::{
    ApiKey, KnownResponseCode, MessageText, Recipient, ResponseCode, ResponseId, Sender,
};
