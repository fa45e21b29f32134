pub mod common;

#[cfg(feature = "smtp")]
pub mod smtp;
