use std::{path::PathBuf, time::Duration};

use lettre::{
    address::Envelope,
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{AsyncSmtpConnection, TlsParameters},
        extension::ClientId,
    },
};

use crate::smtp::{
    smtp_attachment::SmtpAttachment,
    smtp_config::SmtpConfig,
    smtp_content_type::SmtpContentType,
    smtp_encryption::SmtpEncryption,
    smtp_error::SmtpError,
    smtp_message::SmtpMessage,
    smtp_notify::SmtpNotify,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);
const AUTH_MECHANISMS: &[Mechanism] = &[Mechanism::Plain, Mechanism::Login];

/// Snapshot of everything a [`SmtpSender`] uses for its next send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpParameters {
    pub smtp: SmtpConfig,
    pub notify: SmtpNotify,
    pub attachments: Option<Vec<PathBuf>>,
}

/// Sends one message per call over its own SMTP session.
///
/// Configuration changes need `&mut self`, so they can never overlap a send in progress.
#[derive(Debug, Clone, Default)]
pub struct SmtpSender {
    config: SmtpConfig,
    notify: SmtpNotify,
    attachments: Option<Vec<PathBuf>>,
}

impl SmtpSender {
    pub fn new(config: SmtpConfig) -> Self {
        SmtpSender {
            config,
            notify: SmtpNotify::default(),
            attachments: None,
        }
    }

    pub fn notify(mut self, delivery_notification: bool, return_receipt: bool) -> Self {
        self.set_notify(delivery_notification, return_receipt);
        self
    }

    pub fn attachments<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.set_attachments(paths);
        self
    }

    /// Replaces the SMTP server configuration.
    pub fn set_smtp(&mut self, config: SmtpConfig) {
        self.config = config;
    }

    /// Replaces the receipt header options.
    pub fn set_notify(&mut self, delivery_notification: bool, return_receipt: bool) {
        self.notify = SmtpNotify::new(delivery_notification, return_receipt);
    }

    /// Replaces the files attached to every following send. An empty list clears them.
    ///
    /// Files are read when a message is sent, missing or unreadable ones are left out.
    pub fn set_attachments<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        self.attachments = if paths.is_empty() { None } else { Some(paths) };
    }

    pub fn parameters(&self) -> SmtpParameters {
        SmtpParameters {
            smtp: self.config.clone(),
            notify: self.notify,
            attachments: self.attachments.clone(),
        }
    }

    /// Sends a `text/plain` message. `to`, `cc` and `bcc` are comma separated lists.
    pub async fn send_text<T: AsRef<str>>(&self, from: T, to: T, subject: T, body: T, cc: Option<T>, bcc: Option<T>) -> Result<(), SmtpError> {
        let message = build_message(from, to, subject, body, cc, bcc, SmtpContentType::TextPlain);
        self.send(message).await
    }

    /// Sends a `text/html` message. `to`, `cc` and `bcc` are comma separated lists.
    pub async fn send_html<T: AsRef<str>>(&self, from: T, to: T, subject: T, body: T, cc: Option<T>, bcc: Option<T>) -> Result<(), SmtpError> {
        let message = build_message(from, to, subject, body, cc, bcc, SmtpContentType::TextHtml);
        self.send(message).await
    }

    /// Renders the message with the current configuration and delivers it.
    ///
    /// Connect, optional `STARTTLS`, optional login, send. Once connected the session is
    /// closed on every path, whether the send succeeded or not.
    pub async fn send(&self, message: SmtpMessage) -> Result<(), SmtpError> {
        let attachments = match &self.attachments {
            Some(paths) => Some(SmtpAttachment::load_all(paths).await),
            None => None,
        };
        let email = message.render(&self.notify, attachments)?;
        let formatted = email.formatted();

        let hello_name = ClientId::default();
        let mut connection = self.connect(&hello_name).await?;
        let result = self.transact(&mut connection, &hello_name, email.envelope(), &formatted).await;
        connection.abort().await;
        tracing::debug!(server = self.config.server(), "smtp session closed");

        if result.is_ok() {
            tracing::info!(server = self.config.server(), port = self.config.port(), recipients = email.envelope().to().len(), "e-mail sent");
        }
        result
    }

    async fn connect(&self, hello_name: &ClientId) -> Result<AsyncSmtpConnection, SmtpError> {
        let server = self.config.server();
        let port = self.config.port();

        let tls_parameters = match self.config.encryption() {
            SmtpEncryption::Ssl => Some(self.tls_parameters()?),
            SmtpEncryption::Tls | SmtpEncryption::None => None,
        };

        tracing::debug!(server, port, encryption = %self.config.encryption(), "connecting to smtp server");
        AsyncSmtpConnection::connect_tokio1((server, port), Some(CONNECT_TIMEOUT), hello_name, tls_parameters, None)
            .await
            .map_err(|err| {
                tracing::debug!(server, port, error = %err, "smtp connection failed");
                SmtpError::Connection(server.to_string())
            })
    }

    async fn transact(&self, connection: &mut AsyncSmtpConnection, hello_name: &ClientId, envelope: &Envelope, email: &[u8]) -> Result<(), SmtpError> {
        let server = self.config.server();

        if self.config.encryption() == SmtpEncryption::Tls {
            let tls_parameters = self.tls_parameters()?;
            connection.starttls(tls_parameters, hello_name).await.map_err(|err| {
                tracing::debug!(server, error = %err, "starttls failed");
                SmtpError::Connection(server.to_string())
            })?;
            tracing::debug!(server, "connection upgraded with starttls");
        }

        if let Some(creds) = self.config.credentials() {
            let credentials = Credentials::new(creds.user.clone(), creds.password.clone().unwrap_or_default());
            connection.auth(AUTH_MECHANISMS, &credentials).await.map_err(|err| {
                tracing::debug!(server, user = %creds.user, error = %err, "smtp login failed");
                if err.is_timeout() {
                    SmtpError::Connection(String::from("timeout"))
                } else {
                    SmtpError::Auth(creds.user.clone())
                }
            })?;
            tracing::debug!(server, user = %creds.user, "logged in");
        }

        connection.send(envelope, email).await.map_err(|err| {
            if err.is_timeout() {
                SmtpError::Connection(String::from("timeout"))
            } else {
                SmtpError::Send(err.to_string())
            }
        })?;

        Ok(())
    }

    fn tls_parameters(&self) -> Result<TlsParameters, SmtpError> {
        TlsParameters::builder(self.config.server().to_string())
            .dangerous_accept_invalid_certs(self.config.accept_invalid_certs())
            .build()
            .map_err(|err| {
                tracing::debug!(server = self.config.server(), error = %err, "invalid tls parameters");
                SmtpError::Connection(self.config.server().to_string())
            })
    }
}

fn build_message<T: AsRef<str>>(from: T, to: T, subject: T, body: T, cc: Option<T>, bcc: Option<T>, content_type: SmtpContentType) -> SmtpMessage {
    let mut message = SmtpMessage::new()
        .with_from(from)
        .with_to(to)
        .with_subject(subject)
        .with_body(body)
        .with_content_type(content_type);

    if let Some(cc) = cc {
        message = message.with_cc(cc);
    }
    if let Some(bcc) = bcc {
        message = message.with_bcc(bcc);
    }
    message
}
