use crate::{common::utils, smtp::{smtp_credentials::SmtpCredentials, smtp_encryption::SmtpEncryption}};

pub const DEFAULT_SERVER: &str = "localhost";
pub const DEFAULT_PORT: u16 = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    server: String,
    port: u16,
    credentials: Option<SmtpCredentials>,
    encryption: SmtpEncryption,
    accept_invalid_certs: bool,
}

impl SmtpConfig {
    pub fn builder() -> SmtpConfigBuilder {
        SmtpConfigBuilder {
            server: None,
            port: None,
            user: None,
            password: None,
            encryption: None,
            accept_invalid_certs: false,
        }
    }

    /// Creates a config from a `host` or `host:port` address, the port defaults to `25`.
    pub fn from_host<T: AsRef<str>>(host: T) -> anyhow::Result<Self> {
        let (server, port) = utils::parse_host(host.as_ref(), DEFAULT_PORT)?;
        SmtpConfig::builder().server(server).port(port).build()
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn user(&self) -> Option<&str> {
        self.credentials.as_ref().map(|creds| creds.user.as_str())
    }

    pub fn password(&self) -> Option<&str> {
        self.credentials.as_ref().and_then(|creds| creds.password.as_deref())
    }

    pub(crate) fn credentials(&self) -> Option<&SmtpCredentials> {
        self.credentials.as_ref()
    }

    pub fn encryption(&self) -> SmtpEncryption {
        self.encryption
    }

    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        SmtpConfig {
            server: String::from(DEFAULT_SERVER),
            port: DEFAULT_PORT,
            credentials: None,
            encryption: SmtpEncryption::None,
            accept_invalid_certs: false,
        }
    }
}

pub struct SmtpConfigBuilder {
    server: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    encryption: Option<SmtpEncryption>,
    accept_invalid_certs: bool,
}

impl SmtpConfigBuilder {
    pub fn build(self) -> anyhow::Result<SmtpConfig> {
        let port = self.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(anyhow::anyhow!("port must be greater than 0"));
        }

        // A password without a user is never used.
        let credentials = match self.user {
            Some(user) if !user.is_empty() => Some(SmtpCredentials {
                user,
                password: self.password,
            }),
            _ => None,
        };

        Ok(SmtpConfig {
            server: self.server.unwrap_or(String::from(DEFAULT_SERVER)),
            port,
            credentials,
            encryption: self.encryption.unwrap_or_default(),
            accept_invalid_certs: self.accept_invalid_certs,
        })
    }

    /// **Optional**
    ///
    /// Default: `localhost`
    pub fn server<T: AsRef<str>>(mut self, server: T) -> Self {
        self.server = Some(server.as_ref().to_owned());
        self
    }

    /// **Optional**
    ///
    /// Default: `25`
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// **Optional**
    ///
    /// Login is only attempted when a user is set.
    pub fn user<T: AsRef<str>>(mut self, user: T) -> Self {
        self.user = Some(user.as_ref().to_owned());
        self
    }

    /// **Optional**
    ///
    /// Default: empty password
    pub fn password<T: AsRef<str>>(mut self, password: T) -> Self {
        self.password = Some(password.as_ref().to_owned());
        self
    }

    /// **Optional**
    ///
    /// Accepts an [`SmtpEncryption`] or a string, where `"SSL"` and `"TLS"` select encryption
    /// and any other value disables it.
    ///
    /// Default: `SmtpEncryption::None`
    pub fn encryption<T: Into<SmtpEncryption>>(mut self, encryption: T) -> Self {
        self.encryption = Some(encryption.into());
        self
    }

    /// **Optional**
    ///
    /// Skips certificate verification for `SSL` and `TLS`, only meant for test servers with
    /// self-signed certificates.
    ///
    /// Default: `false`
    pub fn accept_invalid_certs(mut self, accept_invalid_certs: bool) -> Self {
        self.accept_invalid_certs = accept_invalid_certs;
        self
    }
}
