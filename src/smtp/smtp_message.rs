use lettre::{
    address::Envelope,
    message::{
        header::{ContentTransferEncoding, ContentType},
        Attachment, Body, Mailbox, MultiPart, SinglePart,
    },
    Address, Message,
};

use crate::{
    common::utils,
    smtp::{
        smtp_attachment::SmtpAttachment,
        smtp_content_type::SmtpContentType,
        smtp_error::SmtpError,
        smtp_headers::{DispositionNotificationTo, ReturnReceiptTo},
        smtp_notify::SmtpNotify,
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmtpMessage {
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
    pub content_type: SmtpContentType,
}

impl SmtpMessage {
    pub fn new() -> Self {
        SmtpMessage::default()
    }

    pub fn with_from<T: AsRef<str>>(mut self, from: T) -> Self {
        self.from = from.as_ref().trim().to_string();
        self
    }

    /// Adds recipients from a comma separated list.
    pub fn with_to<T: AsRef<str>>(mut self, to: T) -> Self {
        self.to.extend(utils::split_addresses(to.as_ref()));
        self
    }

    /// Adds CC recipients from a comma separated list.
    pub fn with_cc<T: AsRef<str>>(mut self, cc: T) -> Self {
        self.cc.extend(utils::split_addresses(cc.as_ref()));
        self
    }

    /// Adds BCC recipients from a comma separated list. They only end up in the envelope.
    pub fn with_bcc<T: AsRef<str>>(mut self, bcc: T) -> Self {
        self.bcc.extend(utils::split_addresses(bcc.as_ref()));
        self
    }

    pub fn with_subject<T: AsRef<str>>(mut self, subject: T) -> Self {
        self.subject = subject.as_ref().to_string();
        self
    }

    pub fn with_body<T: AsRef<str>>(mut self, body: T) -> Self {
        self.body = body.as_ref().to_string();
        self
    }

    pub fn with_content_type(mut self, content_type: SmtpContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Every envelope recipient in order: `to`, then `cc`, then `bcc`.
    pub fn recipients(&self) -> Vec<&str> {
        self.to
            .iter()
            .chain(self.cc.iter())
            .chain(self.bcc.iter())
            .map(String::as_str)
            .collect()
    }

    /// Builds the MIME message and its envelope.
    ///
    /// With `attachments` set the message is `multipart/mixed`, even when every attachment
    /// failed to load. BCC recipients are only added to the envelope.
    ///
    /// The `Date` header is the current time rendered in UTC, lettre has no local time zone
    /// form of it.
    pub fn render(&self, notify: &SmtpNotify, attachments: Option<Vec<SmtpAttachment>>) -> Result<Message, SmtpError> {
        let from = parse_mailbox(&self.from)?;
        let to = parse_mailboxes(&self.to)?;
        let cc = parse_mailboxes(&self.cc)?;

        let recipients = self
            .recipients()
            .into_iter()
            .map(|address| parse_mailbox(address).map(|mailbox| mailbox.email))
            .collect::<Result<Vec<Address>, SmtpError>>()?;
        let envelope = Envelope::new(Some(from.email.clone()), recipients)
            .map_err(|err| SmtpError::Send(err.to_string()))?;

        let mut builder = Message::builder()
            .from(from)
            .subject(self.subject.as_str())
            .date_now()
            .envelope(envelope);

        for mailbox in to {
            builder = builder.to(mailbox);
        }
        for mailbox in cc {
            builder = builder.cc(mailbox);
        }
        if notify.delivery_notification {
            builder = builder.header(DispositionNotificationTo(self.from.clone()));
        }
        if notify.return_receipt {
            builder = builder.header(ReturnReceiptTo(self.from.clone()));
        }

        let message = match attachments {
            Some(attachments) => {
                let octet_stream = ContentType::parse("application/octet-stream")
                    .map_err(|err| SmtpError::Send(err.to_string()))?;

                let mut multipart = MultiPart::mixed().singlepart(self.body_part());
                for attachment in attachments {
                    let body = Body::new_with_encoding(attachment.content, ContentTransferEncoding::Base64)
                        .unwrap_or_else(|content| Body::new(content));
                    multipart = multipart.singlepart(Attachment::new(attachment.file_name).body(body, octet_stream.clone()));
                }
                builder.multipart(multipart)
            }
            None => builder.header(self.header_content_type()).body(self.body.clone()),
        };

        message.map_err(|err| SmtpError::Send(err.to_string()))
    }

    fn header_content_type(&self) -> ContentType {
        match self.content_type {
            SmtpContentType::TextPlain => ContentType::TEXT_PLAIN,
            SmtpContentType::TextHtml => ContentType::TEXT_HTML,
        }
    }

    fn body_part(&self) -> SinglePart {
        match self.content_type {
            SmtpContentType::TextPlain => SinglePart::plain(self.body.clone()),
            SmtpContentType::TextHtml => SinglePart::html(self.body.clone()),
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, SmtpError> {
    address
        .parse::<Mailbox>()
        .map_err(|err| SmtpError::Send(format!("invalid address '{}': {}", address, err)))
}

fn parse_mailboxes(addresses: &[String]) -> Result<Vec<Mailbox>, SmtpError> {
    addresses.iter().map(|address| parse_mailbox(address)).collect()
}
