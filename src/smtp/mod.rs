pub mod smtp_attachment;
pub mod smtp_config;
pub mod smtp_content_type;
mod smtp_credentials;
pub mod smtp_encryption;
pub mod smtp_error;
pub mod smtp_headers;
pub mod smtp_message;
pub mod smtp_notify;
pub mod smtp_sender;

#[cfg(test)]
mod test_server;
