//! Raw message assembly.
//!
//! Flattens a resolved mail (recipients, subject, body, content type,
//! attachments) into the single textual blob the `SendRawEmail` action
//! expects. The framing intentionally mirrors what the relay has always
//! sent: LF line endings, a fixed From/To/Cc/Bcc/Subject header order, and
//! a multipart body that is left open after the last attachment rather
//! than closed with a `--boundary--` delimiter. Known-tolerated by the
//! endpoint; do not tighten without a compatibility test against it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use uuid::Uuid;

/// Resolved inputs for one raw message.
///
/// All defaulting and hook dispatch happens before this struct is built;
/// the builder emits exactly what it is given.
#[derive(Debug, Clone, Default)]
pub struct MessageParams {
    /// Display name for the From line.
    pub from_name: String,
    /// Address for the From line.
    pub from_email: String,
    /// To recipients, comma-joined onto one line.
    pub to: Vec<String>,
    /// Cc recipients. The Cc line is emitted even when empty.
    pub cc: Vec<String>,
    /// Bcc recipients. The Bcc line is emitted even when empty.
    pub bcc: Vec<String>,
    /// Subject line, emitted verbatim.
    pub subject: String,
    /// MIME type for the body content-type line.
    pub content_type: String,
    /// Charset for the body content-type line.
    pub charset: String,
    /// Body text, appended verbatim with no transfer encoding.
    pub body: String,
    /// Attachment candidates; only `data:<type>/<subtype>,<payload>`
    /// strings are used, the rest are dropped.
    pub attachments: Vec<String>,
}

/// One attachment decomposed from a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DataUriAttachment<'a> {
    mime_type: &'a str,
    subtype: &'a str,
    payload: &'a str,
}

/// Split a `data:<type>/<subtype>,<payload>` string.
///
/// The type ends at the first `/`, the subtype at the first `,` after it,
/// and the payload is everything else. Each piece must be non-empty. The
/// payload is taken as-is; whether it is base64 or plain text is the
/// producer's business, it gets base64-encoded wholesale either way.
fn parse_data_uri(attachment: &str) -> Option<DataUriAttachment<'_>> {
    let rest = attachment.strip_prefix("data:")?;
    let slash = rest.find('/')?;
    let (mime_type, after_type) = rest.split_at(slash);
    let after_type = &after_type[1..];
    let comma = after_type.find(',')?;
    let (subtype, after_subtype) = after_type.split_at(comma);
    let payload = &after_subtype[1..];

    if mime_type.is_empty() || subtype.is_empty() || payload.is_empty() {
        return None;
    }

    Some(DataUriAttachment {
        mime_type,
        subtype,
        payload,
    })
}

/// Generate a fresh multipart boundary token.
pub fn generate_boundary() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Assemble the raw message blob.
///
/// Returns the message text and, when attachments were emitted, the
/// boundary token that frames them.
///
/// # Examples
///
/// ```rust
/// use ses_relay::message::{build_raw_message, MessageParams};
///
/// let (raw, boundary) = build_raw_message(&MessageParams {
///     from_name: "WordPress".to_string(),
///     from_email: "wordpress@example.com".to_string(),
///     to: vec!["a@example.com".to_string()],
///     subject: "Hi".to_string(),
///     content_type: "text/plain".to_string(),
///     charset: "UTF-8".to_string(),
///     body: "Hello".to_string(),
///     ..Default::default()
/// });
///
/// assert!(boundary.is_none());
/// assert!(raw.starts_with("From: WordPress <wordpress@example.com>\n"));
/// assert!(raw.ends_with("Content-Type: text/plain; charset=\"UTF-8\"\n\nHello"));
/// ```
pub fn build_raw_message(params: &MessageParams) -> (String, Option<String>) {
    let mut raw = String::new();

    raw.push_str(&format!(
        "From: {} <{}>\n",
        params.from_name, params.from_email
    ));
    raw.push_str(&format!("To: {}\n", params.to.join(",")));
    raw.push_str(&format!("Cc: {}\n", params.cc.join(",")));
    raw.push_str(&format!("Bcc: {}\n", params.bcc.join(",")));
    raw.push_str(&format!("Subject: {}\n", params.subject));

    let mut boundary = None;

    if !params.attachments.is_empty() {
        // Any boundary parsed out of the caller's headers is ignored here;
        // attachments always get a freshly generated token.
        let token = generate_boundary();

        raw.push_str(&format!(
            "Content-Type: multipart/mixed; boundary=\"{}\"\n\n",
            token
        ));

        for attachment in &params.attachments {
            let Some(part) = parse_data_uri(attachment) else {
                continue;
            };

            let name = format!("attachment.{}", part.subtype);

            raw.push_str(&format!("--{}\n", token));
            raw.push_str(&format!(
                "Content-Type: {}/{}; name=\"{}\"\n",
                part.mime_type, part.subtype, name
            ));
            raw.push_str("Content-Transfer-Encoding: base64\n");
            raw.push_str(&format!(
                "Content-Disposition: attachment; filename=\"{}\"\n",
                name
            ));
            raw.push_str(&BASE64.encode(part.payload));
            raw.push('\n');
        }

        raw.push_str(&format!("--{}\n", token));

        boundary = Some(token);
    }

    raw.push_str(&format!(
        "Content-Type: {}; charset=\"{}\"\n\n",
        params.content_type, params.charset
    ));
    raw.push_str(&params.body);

    (raw, boundary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> MessageParams {
        MessageParams {
            from_name: "WordPress".to_string(),
            from_email: "wordpress@example.com".to_string(),
            to: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            subject: "Hi".to_string(),
            content_type: "text/plain".to_string(),
            charset: "UTF-8".to_string(),
            body: "Hello there".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_header_block_order() {
        let (raw, _) = build_raw_message(&base_params());
        let lines: Vec<&str> = raw.lines().collect();

        assert_eq!(lines[0], "From: WordPress <wordpress@example.com>");
        assert_eq!(lines[1], "To: a@example.com,b@example.com");
        assert_eq!(lines[2], "Cc: ");
        assert_eq!(lines[3], "Bcc: ");
        assert_eq!(lines[4], "Subject: Hi");
    }

    #[test]
    fn test_body_follows_content_type_and_blank_line() {
        let (raw, boundary) = build_raw_message(&base_params());

        assert!(boundary.is_none());
        assert!(raw.ends_with("Content-Type: text/plain; charset=\"UTF-8\"\n\nHello there"));
    }

    #[test]
    fn test_no_attachments_means_no_multipart() {
        let (raw, _) = build_raw_message(&base_params());
        assert!(!raw.contains("multipart/mixed"));
        assert!(!raw.contains("boundary="));
    }

    #[test]
    fn test_cc_and_bcc_are_comma_joined() {
        let mut params = base_params();
        params.cc = vec!["c1@example.com".to_string(), "c2@example.com".to_string()];
        params.bcc = vec!["hidden@example.com".to_string()];

        let (raw, _) = build_raw_message(&params);
        assert!(raw.contains("Cc: c1@example.com,c2@example.com\n"));
        assert!(raw.contains("Bcc: hidden@example.com\n"));
    }

    #[test]
    fn test_single_attachment_part() {
        let mut params = base_params();
        params.attachments = vec!["data:image/png,ABC123".to_string()];

        let (raw, boundary) = build_raw_message(&params);
        let boundary = boundary.expect("boundary generated for attachments");

        assert!(raw.contains(&format!(
            "Content-Type: multipart/mixed; boundary=\"{}\"\n\n",
            boundary
        )));
        assert!(raw.contains("Content-Type: image/png; name=\"attachment.png\"\n"));
        assert!(raw.contains("Content-Transfer-Encoding: base64\n"));
        assert!(raw.contains("Content-Disposition: attachment; filename=\"attachment.png\"\n"));
        assert!(raw.contains(&format!("{}\n", BASE64.encode("ABC123"))));
    }

    #[test]
    fn test_multipart_body_is_left_open() {
        let mut params = base_params();
        params.attachments = vec!["data:text/csv,a;b;c".to_string()];

        let (raw, boundary) = build_raw_message(&params);
        let boundary = boundary.unwrap();

        // Two delimiters (one before the part, one after the last part),
        // neither with a closing suffix.
        assert_eq!(raw.matches(&format!("--{}\n", boundary)).count(), 2);
        assert!(!raw.contains(&format!("--{}--", boundary)));
    }

    #[test]
    fn test_non_data_uri_attachments_are_dropped() {
        let mut params = base_params();
        params.attachments = vec![
            "/tmp/report.pdf".to_string(),
            "data:text/plain,keep me".to_string(),
            "data:broken".to_string(),
        ];

        let (raw, _) = build_raw_message(&params);
        assert_eq!(raw.matches("Content-Disposition: attachment").count(), 1);
        assert!(raw.contains(&BASE64.encode("keep me")));
    }

    #[test]
    fn test_attachment_content_type_still_emitted_with_attachments() {
        let mut params = base_params();
        params.attachments = vec!["data:image/gif,R0lGOD".to_string()];

        let (raw, _) = build_raw_message(&params);
        assert!(raw.ends_with("Content-Type: text/plain; charset=\"UTF-8\"\n\nHello there"));
    }

    #[test]
    fn test_boundaries_are_unique_per_message() {
        let mut params = base_params();
        params.attachments = vec!["data:image/png,AAAA".to_string()];

        let (_, first) = build_raw_message(&params);
        let (_, second) = build_raw_message(&params);
        assert_ne!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn test_parse_data_uri() {
        assert_eq!(
            parse_data_uri("data:image/png,ABC123"),
            Some(DataUriAttachment {
                mime_type: "image",
                subtype: "png",
                payload: "ABC123",
            })
        );

        // Subtype runs to the first comma, filename synthesis included.
        assert_eq!(
            parse_data_uri("data:image/svg+xml,<svg/>"),
            Some(DataUriAttachment {
                mime_type: "image",
                subtype: "svg+xml",
                payload: "<svg/>",
            })
        );

        assert_eq!(parse_data_uri("data:no-slash,payload"), None);
        assert_eq!(parse_data_uri("data:a/b"), None);
        assert_eq!(parse_data_uri("data:a/,x"), None);
        assert_eq!(parse_data_uri("data:a/b,"), None);
        assert_eq!(parse_data_uri("file:///tmp/x"), None);
    }
}
