use std::{convert::Infallible, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SmtpEncryption {
    /// Plain SMTP without encryption.
    #[default]
    None,
    /// Implicit TLS, the connection is encrypted before any SMTP command is sent.
    Ssl,
    /// Plain connection upgraded with `STARTTLS` after the `EHLO` handshake.
    Tls,
}

impl FromStr for SmtpEncryption {
    type Err = Infallible;

    /// Anything other than `SSL` or `TLS` means no encryption.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("SSL") {
            Ok(SmtpEncryption::Ssl)
        } else if value.eq_ignore_ascii_case("TLS") {
            Ok(SmtpEncryption::Tls)
        } else {
            Ok(SmtpEncryption::None)
        }
    }
}

impl From<&str> for SmtpEncryption {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(encryption) => encryption,
            Err(infallible) => match infallible {},
        }
    }
}

impl From<Option<&str>> for SmtpEncryption {
    fn from(value: Option<&str>) -> Self {
        value.map(SmtpEncryption::from).unwrap_or_default()
    }
}

impl fmt::Display for SmtpEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmtpEncryption::None => write!(f, "None"),
            SmtpEncryption::Ssl => write!(f, "SSL"),
            SmtpEncryption::Tls => write!(f, "TLS"),
        }
    }
}
