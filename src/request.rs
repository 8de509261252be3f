//! Mail request types as handed over by the host application.
//!
//! Host mail calls are loosely typed: recipients may arrive as a single
//! comma-joined string or a list, attachments as a newline-separated block
//! or a list. These types capture both shapes and normalize them to lists
//! before the pipeline runs.

use crate::headers::HeaderInput;

/// Recipient addresses, either comma-joined or pre-split.
#[derive(Debug, Clone)]
pub enum Recipients {
    /// Comma-separated address list in one string.
    Text(String),
    /// Pre-split addresses.
    List(Vec<String>),
}

impl Recipients {
    /// Normalize to a list. A comma-joined string splits on `,` with each
    /// piece kept verbatim.
    pub fn into_list(self) -> Vec<String> {
        match self {
            Recipients::Text(text) => text.split(',').map(str::to_string).collect(),
            Recipients::List(list) => list,
        }
    }
}

impl From<&str> for Recipients {
    fn from(text: &str) -> Self {
        Recipients::Text(text.to_string())
    }
}

impl From<String> for Recipients {
    fn from(text: String) -> Self {
        Recipients::Text(text)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(list: Vec<String>) -> Self {
        Recipients::List(list)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(list: Vec<&str>) -> Self {
        Recipients::List(list.into_iter().map(str::to_string).collect())
    }
}

/// Attachment inputs, either a newline-separated block or a list of
/// data-URI strings.
#[derive(Debug, Clone)]
pub enum AttachmentInput {
    /// Newline-separated attachment strings. CRLF is normalized to LF
    /// before splitting; an empty string means no attachments.
    Text(String),
    /// Pre-split attachment strings.
    List(Vec<String>),
}

impl AttachmentInput {
    /// Normalize to a list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            AttachmentInput::Text(text) => {
                if text.is_empty() {
                    Vec::new()
                } else {
                    text.replace("\r\n", "\n")
                        .split('\n')
                        .map(str::to_string)
                        .collect()
                }
            }
            AttachmentInput::List(list) => list,
        }
    }
}

impl Default for AttachmentInput {
    fn default() -> Self {
        AttachmentInput::List(Vec::new())
    }
}

impl From<&str> for AttachmentInput {
    fn from(text: &str) -> Self {
        AttachmentInput::Text(text.to_string())
    }
}

impl From<Vec<String>> for AttachmentInput {
    fn from(list: Vec<String>) -> Self {
        AttachmentInput::List(list)
    }
}

impl From<Vec<&str>> for AttachmentInput {
    fn from(list: Vec<&str>) -> Self {
        AttachmentInput::List(list.into_iter().map(str::to_string).collect())
    }
}

/// One outgoing mail as handed over by the host, before the mutation hook
/// and normalization run.
///
/// # Examples
///
/// ```rust
/// use ses_relay::MailInput;
///
/// let mail = MailInput::new("a@example.com,b@example.com", "Hi", "Hello there")
///     .with_headers("Content-Type: text/html; charset=UTF-8")
///     .with_attachments(vec!["data:image/png,ABC123"]);
/// assert_eq!(mail.subject, "Hi");
/// ```
#[derive(Debug, Clone)]
pub struct MailInput {
    /// Recipient addresses.
    pub to: Recipients,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Optional additional headers.
    pub headers: HeaderInput,
    /// Optional attachments.
    pub attachments: AttachmentInput,
}

impl MailInput {
    /// Create a mail request with empty headers and no attachments.
    pub fn new(
        to: impl Into<Recipients>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            headers: HeaderInput::default(),
            attachments: AttachmentInput::default(),
        }
    }

    /// Attach a header block.
    pub fn with_headers(mut self, headers: impl Into<HeaderInput>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Attach attachment inputs.
    pub fn with_attachments(mut self, attachments: impl Into<AttachmentInput>) -> Self {
        self.attachments = attachments.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipients_from_comma_joined_string() {
        let recipients = Recipients::from("a@example.com,b@example.com");
        assert_eq!(
            recipients.into_list(),
            vec!["a@example.com", "b@example.com"]
        );
    }

    #[test]
    fn test_recipients_from_list_pass_through() {
        let recipients = Recipients::from(vec!["a@example.com"]);
        assert_eq!(recipients.into_list(), vec!["a@example.com"]);
    }

    #[test]
    fn test_attachments_split_on_newlines() {
        let attachments = AttachmentInput::from("data:a/b,one\r\ndata:c/d,two");
        assert_eq!(
            attachments.into_list(),
            vec!["data:a/b,one", "data:c/d,two"]
        );
    }

    #[test]
    fn test_empty_attachment_text_is_empty_list() {
        assert!(AttachmentInput::from("").into_list().is_empty());
        assert!(AttachmentInput::default().into_list().is_empty());
    }
}
