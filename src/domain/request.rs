use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, Recipient, Sender};

#[derive(Debug, Clone)]
pub struct SendMessage {
    sender: Sender,
    recipients: Vec<Recipient>,
    message: MessageText,
}

impl SendMessage {
    pub fn new(
        sender: Sender,
        recipients: Vec<Recipient>,
        message: MessageText,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: Recipient::FIELD,
            });
        }
        Ok(Self {
            sender,
            recipients,
            message,
        })
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }
}
