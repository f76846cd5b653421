use std::{
    error::Error, fmt::Display, future::Future, io, path::PathBuf, pin::Pin, sync::RwLock,
};

use chrono::Utc;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::{debug, info};

use crate::OutgoingEmail;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Boxed future type for dispatch operations, enabling object safety.
pub type DispatchFuture<'a> = Pin<Box<dyn Future<Output = DispatchResult<String>> + Send + 'a>>;

/// Errors that can occur while dispatching an email.
#[derive(Debug)]
pub enum DispatchError {
    /// An I/O error occurred.
    Io(io::Error),
    /// The dispatch sink encountered an internal error.
    SinkError(String),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::Io(e) => write!(f, "I/O error: {e}"),
            DispatchError::SinkError(msg) => write!(f, "Dispatch error: {msg}"),
        }
    }
}

impl Error for DispatchError {}

impl From<io::Error> for DispatchError {
    fn from(e: io::Error) -> Self {
        DispatchError::Io(e)
    }
}

/// Trait for mail dispatchers that deliver transformed emails.
///
/// This is the seam to the host delivery subsystem: the pipeline applies
/// its transformer chain and hands the final record to a dispatcher exactly
/// once. The implementations in this module are development and test sinks;
/// actual delivery belongs to the host.
pub trait MailDispatcher: Send + Sync {
    /// Dispatches an outgoing email, returning its message id.
    fn dispatch<'a>(&'a self, mail: &'a OutgoingEmail) -> DispatchFuture<'a>;

    /// Returns the name of this dispatcher.
    fn name(&self) -> &str;
}

/// Dispatcher that writes each email as an `.eml` file.
///
/// Files land in a directory structure of
/// `{base_path}/{recipient}/{message_id}.eml`, with the recipient sanitized
/// to alphanumerics and underscores. Each file carries minimal envelope
/// lines (`To`, `Subject`, `Date`), the email's own headers, a blank-line
/// separator, and the body.
#[derive(Debug, Clone)]
pub struct FileMailbox {
    base_path: PathBuf,
}

impl FileMailbox {
    /// Creates a new FileMailbox rooted at `base_path`.
    pub fn new(base_path: PathBuf) -> Self {
        info!(path = %base_path.display(), "File mailbox initialized");
        Self { base_path }
    }

    /// Returns the directory for a recipient's messages.
    fn recipient_path(&self, recipient: &str) -> PathBuf {
        let safe_recipient = recipient.replace(|c: char| !c.is_ascii_alphanumeric(), "_");
        self.base_path.join(safe_recipient)
    }
}

impl MailDispatcher for FileMailbox {
    fn dispatch<'a>(&'a self, mail: &'a OutgoingEmail) -> DispatchFuture<'a> {
        Box::pin(async move {
            let dir = self.recipient_path(&mail.to);
            fs::create_dir_all(&dir).await?;

            let path = dir.join(format!("{}.eml", mail.message_id));
            let mut eml = String::new();
            eml.push_str(&format!("To: {}\r\n", mail.to));
            eml.push_str(&format!("Subject: {}\r\n", mail.subject));
            eml.push_str(&format!("Date: {}\r\n", Utc::now().to_rfc2822()));
            for header in mail.headers.as_slice() {
                eml.push_str(header);
                eml.push_str("\r\n");
            }
            eml.push_str("\r\n");
            eml.push_str(&mail.message);

            let mut file = File::create(&path).await?;
            file.write_all(eml.as_bytes()).await?;

            info!(
                message_id = %mail.message_id,
                to = %mail.to,
                path = %path.display(),
                "Wrote email to file mailbox"
            );
            Ok(mail.message_id.clone())
        })
    }

    fn name(&self) -> &str {
        "file_mailbox"
    }
}

/// Dispatcher that records emails in memory.
///
/// Useful for testing and development.
#[derive(Debug, Default)]
pub struct MemoryMailbox {
    sent: RwLock<Vec<OutgoingEmail>>,
}

impl MemoryMailbox {
    /// Creates a new empty MemoryMailbox.
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
        }
    }

    /// Returns the number of dispatched emails.
    pub fn count(&self) -> usize {
        self.sent.read().unwrap().len()
    }

    /// Returns a copy of the dispatched emails, in dispatch order.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.read().unwrap().clone()
    }

    /// Clears all recorded emails.
    pub fn clear(&self) {
        self.sent.write().unwrap().clear();
    }
}

impl MailDispatcher for MemoryMailbox {
    fn dispatch<'a>(&'a self, mail: &'a OutgoingEmail) -> DispatchFuture<'a> {
        Box::pin(async move {
            debug!(message_id = %mail.message_id, to = %mail.to, "Recording email in memory");
            self.sent.write().unwrap().push(mail.clone());
            Ok(mail.message_id.clone())
        })
    }

    fn name(&self) -> &str {
        "memory_mailbox"
    }
}
