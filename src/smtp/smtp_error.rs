/// Terminal failures of a send, none of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmtpError {
    /// The server could not be reached, the TLS setup failed or the session timed out.
    /// Carries the server address or a timeout description.
    #[error("server connection error ({0})")]
    Connection(String),
    /// The server rejected the login. Carries the user name.
    #[error("invalid username or password ({0})")]
    Auth(String),
    /// The message could not be built or the server refused it.
    #[error("unable to send e-mail: {0}")]
    Send(String),
}
