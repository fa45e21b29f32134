use std::path::{Path, PathBuf};

/// A file read from disk, ready to be attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpAttachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl SmtpAttachment {
    /// Reads the file at `path`.
    ///
    /// Returns `None` if the path has no file name or the file cannot be read. Unreadable
    /// attachments are left out of the message instead of failing the send.
    pub async fn load<T: AsRef<Path>>(path: T) -> Option<Self> {
        let path = path.as_ref();
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => {
                tracing::warn!(path = %path.display(), "skipping attachment without a file name");
                return None;
            }
        };

        match tokio::fs::read(path).await {
            Ok(content) => Some(SmtpAttachment { file_name, content }),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable attachment");
                None
            }
        }
    }

    /// Reads every path in order, leaving out the ones that fail.
    pub async fn load_all(paths: &[PathBuf]) -> Vec<Self> {
        let mut attachments = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(attachment) = SmtpAttachment::load(path).await {
                attachments.push(attachment);
            }
        }
        attachments
    }
}
