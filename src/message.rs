//! Core outgoing email types used by the mail pipeline.
//!
//! This module defines [`OutgoingEmail`], the record the host mail pipeline
//! assembles immediately before dispatch and hands to the transformer chain,
//! and [`MailHeaders`], the polymorphic header field carried by that record
//! (absent, a single header string, or an ordered sequence of headers).

use std::path::PathBuf;

use uuid::Uuid;

/// Represents an outgoing email immediately before dispatch.
///
/// Constructed by the host mail pipeline, mutated in place by the registered
/// transformers, consumed by the dispatcher, and discarded afterwards. The
/// record is never persisted; only the `message` and `headers` fields are
/// touched by the built-in transformers, everything else passes through.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    /// Unique message identifier, UUID v4 format.
    pub message_id: String,

    /// Recipient address, RFC 5322 address format.
    pub to: String,

    /// Email subject line.
    pub subject: String,

    /// Message body to send. An absent body is the empty string and is
    /// still processed by the transformer chain.
    pub message: String,

    /// Outgoing headers in whichever shape the caller supplied.
    pub headers: MailHeaders,

    /// Attachment paths, passed through to the dispatcher untouched.
    pub attachments: Vec<PathBuf>,
}

impl OutgoingEmail {
    /// Creates a new outgoing email with a generated message id, no headers
    /// and no attachments.
    pub fn new(to: String, subject: String, message: String) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            to,
            subject,
            message,
            headers: MailHeaders::None,
            attachments: Vec::new(),
        }
    }

    pub fn from_parts(to: &str, subject: &str, message: &str) -> Self {
        Self::new(to.to_string(), subject.to_string(), message.to_string())
    }
}

/// Outgoing header field in the three shapes the host mail interface
/// permits: absent, a single header string, or an ordered header list.
///
/// Transformers either leave the field alone or overwrite it wholesale;
/// individual headers are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailHeaders {
    /// No headers were supplied.
    None,

    /// A single header string (e.g. `Content-Type: text/html; charset=UTF-8`).
    Single(String),

    /// An ordered sequence of header strings.
    List(Vec<String>),
}

impl MailHeaders {
    /// Returns the headers as an ordered slice, empty when absent.
    pub fn as_slice(&self) -> &[String] {
        match self {
            MailHeaders::None => &[],
            MailHeaders::Single(header) => std::slice::from_ref(header),
            MailHeaders::List(headers) => headers,
        }
    }

    /// Returns whether no headers are present.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Default for MailHeaders {
    fn default() -> Self {
        MailHeaders::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outgoing_email_new() {
        let mail = OutgoingEmail::new(
            "rcpt@example.com".to_string(),
            "Welcome".to_string(),
            "Hello there".to_string(),
        );

        assert_eq!(mail.to, "rcpt@example.com");
        assert_eq!(mail.subject, "Welcome");
        assert_eq!(mail.message, "Hello there");
        assert_eq!(mail.headers, MailHeaders::None);
        assert!(mail.attachments.is_empty());
        assert!(!mail.message_id.is_empty());
    }

    #[test]
    fn test_outgoing_email_from_parts() {
        let mail = OutgoingEmail::from_parts("rcpt@example.com", "Subject", "Body");

        assert_eq!(mail.to, "rcpt@example.com");
        assert_eq!(mail.subject, "Subject");
        assert_eq!(mail.message, "Body");
    }

    #[test]
    fn test_outgoing_email_unique_ids() {
        let mail1 = OutgoingEmail::from_parts("rcpt@example.com", "Subject", "Body");
        let mail2 = OutgoingEmail::from_parts("rcpt@example.com", "Subject", "Body");

        assert_ne!(mail1.message_id, mail2.message_id);
    }

    #[test]
    fn test_mail_headers_none() {
        let headers = MailHeaders::None;

        assert!(headers.is_empty());
        assert!(headers.as_slice().is_empty());
    }

    #[test]
    fn test_mail_headers_single() {
        let headers = MailHeaders::Single("X-Custom: value".to_string());

        assert!(!headers.is_empty());
        assert_eq!(headers.as_slice(), &["X-Custom: value".to_string()]);
    }

    #[test]
    fn test_mail_headers_list() {
        let headers = MailHeaders::List(vec![
            "X-First: 1".to_string(),
            "X-Second: 2".to_string(),
        ]);

        assert_eq!(headers.as_slice().len(), 2);
        assert_eq!(headers.as_slice()[0], "X-First: 1");
        assert_eq!(headers.as_slice()[1], "X-Second: 2");
    }

    #[test]
    fn test_mail_headers_empty_list() {
        let headers = MailHeaders::List(Vec::new());

        assert!(headers.is_empty());
    }

    #[test]
    fn test_mail_headers_default() {
        assert_eq!(MailHeaders::default(), MailHeaders::None);
    }
}
