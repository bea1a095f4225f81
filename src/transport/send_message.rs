use std::num::ParseIntError;

use crate::domain::{
    ApiKey, MessageText, Recipient, ResponseCode, ResponseId, SendMessage, SendMessageResponse,
    Sender,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("expected `<code>:<id>`")]
    UnexpectedFormat,

    #[error("number out of range: {0}")]
    NumberOutOfRange(#[from] ParseIntError),
}

pub fn encode_send_message_form(api_key: &ApiKey, request: &SendMessage) -> Vec<(String, String)> {
    let recipient = request
        .recipients()
        .iter()
        .map(Recipient::as_str)
        .collect::<Vec<_>>()
        .join(Recipient::SEPARATOR);

    vec![
        (Recipient::FIELD.to_owned(), recipient),
        (
            Sender::FIELD.to_owned(),
            request.sender().as_str().to_owned(),
        ),
        (
            MessageText::FIELD.to_owned(),
            request.message().as_str().to_owned(),
        ),
        (ApiKey::FIELD.to_owned(), api_key.as_str().to_owned()),
    ]
}

/// Decode a body of the exact form `<digits>:<digits>`; surrounding whitespace is an error.
pub fn decode_send_message_response(body: &str) -> Result<SendMessageResponse, TransportError> {
    let (code, id) = body
        .split_once(':')
        .filter(|(code, id)| is_digits(code) && is_digits(id))
        .ok_or(TransportError::UnexpectedFormat)?;

    Ok(SendMessageResponse {
        code: ResponseCode::new(code.parse()?),
        response_id: ResponseId::new(id.parse()?),
    })
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(recipients: &[&str], sender: &str, message: &str) -> SendMessage {
        SendMessage::new(
            Sender::new(sender).unwrap(),
            recipients
                .iter()
                .map(|raw| Recipient::new(*raw).unwrap())
                .collect(),
            MessageText::new(message).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn encode_joins_recipients_and_keeps_field_order() {
        let key = ApiKey::new("key123").unwrap();
        let params = encode_send_message_form(&key, &request(&["491111", "492222"], "ACME", "hi"));

        assert_eq!(
            params,
            vec![
                ("recipient".to_owned(), "491111;492222".to_owned()),
                ("sender".to_owned(), "ACME".to_owned()),
                ("message".to_owned(), "hi".to_owned()),
                ("api_key".to_owned(), "key123".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_single_recipient_has_no_separator() {
        let key = ApiKey::new("k").unwrap();
        let params = encode_send_message_form(&key, &request(&["491111"], "A B", "hello world"));
        assert_eq!(params[0], ("recipient".to_owned(), "491111".to_owned()));
        assert_eq!(params[1], ("sender".to_owned(), "A B".to_owned()));
    }

    #[test]
    fn decode_success_and_failure_codes() {
        let resp = decode_send_message_response("200:12345").unwrap();
        assert_eq!(resp.code, ResponseCode::new(200));
        assert_eq!(resp.response_id, ResponseId::new(12345));

        let resp = decode_send_message_response("0:0").unwrap();
        assert_eq!(resp.code, ResponseCode::new(0));
        assert_eq!(resp.response_id, ResponseId::new(0));

        let resp = decode_send_message_response("007:0042").unwrap();
        assert_eq!(resp.code.as_u32(), 7);
        assert_eq!(resp.response_id.value(), 42);
    }

    #[test]
    fn decode_rejects_anything_but_the_exact_grammar() {
        for body in [
            "",
            "not-a-response",
            "200",
            "200:",
            ":1",
            "200:1:2",
            " 200:1",
            "200:1\n",
            "-1:5",
            "200:abc",
        ] {
            assert!(
                matches!(
                    decode_send_message_response(body),
                    Err(TransportError::UnexpectedFormat)
                ),
                "expected {body:?} to be rejected"
            );
        }
    }

    #[test]
    fn decode_reports_numbers_that_do_not_fit() {
        let err = decode_send_message_response("99999999999:1").unwrap_err();
        assert!(matches!(err, TransportError::NumberOutOfRange(_)));
    }
}
