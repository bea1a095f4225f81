//! Client layer: orchestrates validation, the HTTP call and response mapping.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    ApiKey, KnownResponseCode, MessageText, PreconditionError, Recipient, ResponseCode,
    ResponseId, SendMessage, SendMessageResponse, Sender, ValidationError,
};

const DEFAULT_ENDPOINT: &str = "https://sms.lcx.at/messages/post_req";
const DEFAULT_USER_AGENT: &str = concat!("teleforte-rs/", env!("CARGO_PKG_VERSION"));

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TeleforteClient`].
///
/// Every variant keeps the diagnostic detail needed to debug a failed send: the
/// offending value, the HTTP status, the raw body or the provider's code and id.
pub enum TeleforteError {
    /// The client could not be set up (missing API key, malformed endpoint).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller-supplied value failed a format or length rule.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A send was attempted before the client had everything it needs.
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("could not reach Teleforte: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The server answered with an HTTP status other than 200.
    #[error("request failed: status code {status} returned")]
    HttpStatus { status: u16, body: Option<String> },

    /// The body is not of the form `<code>:<id>`.
    #[error("unknown response: {body:?}")]
    Protocol {
        body: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Teleforte understood the request but refused to send the message.
    #[error("{}", provider_failure(.code, .response_id))]
    Provider {
        code: ResponseCode,
        response_id: ResponseId,
    },
}

impl TeleforteError {
    /// Returns `true` for network failures and non-200 HTTP responses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }
}

fn provider_failure(code: &ResponseCode, response_id: &ResponseId) -> String {
    match code.known() {
        Some(KnownResponseCode::HostFatal) => {
            "host failed to send message: fatal error, please contact support".to_owned()
        }
        Some(KnownResponseCode::MessageTooLong) => format!(
            "host failed to send message: message length exceeds max length of {} chars",
            MessageText::MAX_LEN
        ),
        _ => format!(
            "host failed to send message: response code {code}, response id {response_id}"
        ),
    }
}

#[derive(Clone)]
/// Builder for [`TeleforteClient`].
///
/// Use this when you need to customize the endpoint, timeout, user-agent or TLS checks.
pub struct TeleforteClientBuilder {
    api_key: String,
    sender: Option<String>,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: String,
    accept_invalid_certs: bool,
}

impl fmt::Debug for TeleforteClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeleforteClientBuilder")
            .field("api_key", &"***")
            .field("sender", &self.sender)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl TeleforteClientBuilder {
    /// Create a builder with the default endpoint and user-agent.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sender: None,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            accept_invalid_certs: false,
        }
    }

    /// Set the initial sender. It is validated in [`TeleforteClientBuilder::build`].
    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Override the Teleforte endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Skip TLS certificate verification.
    ///
    /// # Warning
    ///
    /// This makes the API key readable by anyone able to intercept the connection.
    /// Certificates are verified unless this is explicitly set to `true`.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build a [`TeleforteClient`].
    pub fn build(self) -> Result<TeleforteClient, TeleforteError> {
        let api_key = ApiKey::new(self.api_key)
            .map_err(|_| TeleforteError::Configuration("you must provide an API key".to_owned()))?;
        let sender = self.sender.map(Sender::new).transpose()?;
        let endpoint = Url::parse(&self.endpoint).map_err(|err| {
            TeleforteError::Configuration(format!("invalid endpoint {:?}: {err}", self.endpoint))
        })?;

        if self.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .danger_accept_invalid_certs(self.accept_invalid_certs);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|err| TeleforteError::Transport(Box::new(err)))?;

        Ok(TeleforteClient {
            api_key,
            sender,
            recipients: Vec::new(),
            endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Teleforte client.
///
/// Holds the API key, the current sender and an append-only list of recipients.
/// The list is not cleared by a send, so repeated calls to
/// [`TeleforteClient::send_message`] reach the same recipients unless
/// [`TeleforteClient::clear_recipients`] is called in between.
///
/// Mutating methods take `&mut self`; share a client between tasks behind a lock.
pub struct TeleforteClient {
    api_key: ApiKey,
    sender: Option<Sender>,
    recipients: Vec<Recipient>,
    endpoint: Url,
    http: Arc<dyn HttpTransport>,
}

impl TeleforteClient {
    /// Create a client using the default endpoint and no sender.
    ///
    /// Fails with [`TeleforteError::Configuration`] when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TeleforteError> {
        Self::builder(api_key).build()
    }

    /// Create a client with an initial sender, validated like [`TeleforteClient::set_sender`].
    pub fn with_sender(
        api_key: impl Into<String>,
        sender: impl Into<String>,
    ) -> Result<Self, TeleforteError> {
        Self::builder(api_key).sender(sender).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: impl Into<String>) -> TeleforteClientBuilder {
        TeleforteClientBuilder::new(api_key)
    }

    /// Append a recipient. Only ASCII digits are accepted, e.g. `491234567890`.
    pub fn add_recipient(&mut self, number: impl Into<String>) -> Result<(), TeleforteError> {
        self.recipients.push(Recipient::new(number)?);
        Ok(())
    }

    /// Recipients in the order they were added.
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Forget all recipients.
    pub fn clear_recipients(&mut self) {
        self.recipients.clear();
    }

    /// Replace the sender. Up to 11 ASCII letters, digits or whitespace.
    pub fn set_sender(&mut self, sender: impl Into<String>) -> Result<(), TeleforteError> {
        self.sender = Some(Sender::new(sender)?);
        Ok(())
    }

    /// The current sender, if one was set.
    pub fn sender(&self) -> Option<&Sender> {
        self.sender.as_ref()
    }

    /// Send `message` from the current sender to every recipient.
    ///
    /// Returns the tracking id assigned by Teleforte.
    ///
    /// Errors:
    /// - [`TeleforteError::Precondition`] when no sender is set, no recipient was added
    ///   or the message exceeds 160 bytes; nothing is sent in that case,
    /// - [`TeleforteError::Transport`] / [`TeleforteError::HttpStatus`] when the request fails,
    /// - [`TeleforteError::Protocol`] for an unrecognized body,
    /// - [`TeleforteError::Provider`] when Teleforte refuses the message.
    pub async fn send_message(
        &self,
        message: impl Into<String>,
    ) -> Result<ResponseId, TeleforteError> {
        let sender = self
            .sender
            .clone()
            .ok_or(PreconditionError::MissingSender)?;
        if self.recipients.is_empty() {
            return Err(PreconditionError::NoRecipients.into());
        }

        let message = message.into();
        if message.len() > MessageText::MAX_LEN {
            return Err(PreconditionError::MessageTooLong {
                max: MessageText::MAX_LEN,
                actual: message.len(),
            }
            .into());
        }

        let request = SendMessage::new(sender, self.recipients.clone(), MessageText::new(message)?)?;
        let response = self.send(request).await?;
        Ok(response.response_id)
    }

    /// Send a prebuilt request, independent of the sender and recipients stored on the client.
    pub async fn send(&self, request: SendMessage) -> Result<SendMessageResponse, TeleforteError> {
        let params = crate::transport::encode_send_message_form(&self.api_key, &request);

        debug!(
            endpoint = %self.endpoint,
            recipients = request.recipients().len(),
            message_len = request.message().len(),
            "sending message"
        );

        let response = self
            .http
            .post_form(self.endpoint.as_str(), params)
            .await
            .map_err(TeleforteError::Transport)?;

        if response.status != 200 {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(TeleforteError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let parsed = match crate::transport::decode_send_message_response(&response.body) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(body = %response.body, "unrecognized response body");
                return Err(TeleforteError::Protocol {
                    body: response.body,
                    source: Box::new(err),
                });
            }
        };

        if !parsed.code.is_success() {
            warn!(
                code = %parsed.code,
                response_id = %parsed.response_id,
                "message rejected"
            );
            return Err(TeleforteError::Provider {
                code: parsed.code,
                response_id: parsed.response_id,
            });
        }

        debug!(response_id = %parsed.response_id, "message accepted");
        Ok(parsed)
    }
}
