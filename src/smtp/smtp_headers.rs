use lettre::message::header::{Header, HeaderName, HeaderValue};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// `Disposition-Notification-To` header, asks for a read receipt (RFC 8098).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispositionNotificationTo(pub String);

impl Header for DispositionNotificationTo {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Disposition-Notification-To")
    }

    fn parse(s: &str) -> Result<Self, BoxError> {
        Ok(DispositionNotificationTo(s.trim().to_owned()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

/// Non-standard `Return-Receipt-To` header, still honored by some servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceiptTo(pub String);

impl Header for ReturnReceiptTo {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Return-Receipt-To")
    }

    fn parse(s: &str) -> Result<Self, BoxError> {
        Ok(ReturnReceiptTo(s.trim().to_owned()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}
