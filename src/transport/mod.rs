//! Transport layer: HTTP and wire-format details (form encoding, body decoding).

mod send_message;

pub use send_message::{decode_send_message_response, encode_send_message_form};
