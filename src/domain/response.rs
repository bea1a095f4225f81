use crate::domain::value::{ResponseCode, ResponseId};

/// Decoded `<code>:<id>` body returned by Teleforte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendMessageResponse {
    pub code: ResponseCode,
    pub response_id: ResponseId,
}
