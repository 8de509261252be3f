//! Best-effort parser for free-form mail header blocks.
//!
//! Host applications hand the relay an arbitrary header block, either as a
//! single newline-separated string or as a list of `Name: Value` lines. The
//! parser folds those lines into a single immutable [`ParsedHeaders`] value:
//! a handful of fields the message builder understands (From, Content-Type,
//! charset, boundary, Cc/Bcc/Reply-To) plus an ordered passthrough list for
//! everything else.
//!
//! Repeated `From` and `Content-Type` lines overwrite earlier ones; repeated
//! `Cc`, `Bcc`, and `Reply-To` lines accumulate. Header names are matched
//! case-insensitively. Malformed lines are skipped; this parser never fails.

/// Raw header block as supplied by the host, before parsing.
#[derive(Debug, Clone)]
pub enum HeaderInput {
    /// A single block of text, one header per line. CRLF line endings are
    /// normalized to LF before splitting.
    Text(String),
    /// Pre-split header lines.
    Lines(Vec<String>),
}

impl HeaderInput {
    /// Normalize the input to a list of lines.
    pub fn lines(&self) -> Vec<String> {
        match self {
            HeaderInput::Text(text) => {
                if text.is_empty() {
                    Vec::new()
                } else {
                    text.replace("\r\n", "\n")
                        .split('\n')
                        .map(str::to_string)
                        .collect()
                }
            }
            HeaderInput::Lines(lines) => lines.clone(),
        }
    }
}

impl Default for HeaderInput {
    fn default() -> Self {
        HeaderInput::Text(String::new())
    }
}

impl From<&str> for HeaderInput {
    fn from(text: &str) -> Self {
        HeaderInput::Text(text.to_string())
    }
}

impl From<String> for HeaderInput {
    fn from(text: String) -> Self {
        HeaderInput::Text(text)
    }
}

impl From<Vec<String>> for HeaderInput {
    fn from(lines: Vec<String>) -> Self {
        HeaderInput::Lines(lines)
    }
}

impl From<Vec<&str>> for HeaderInput {
    fn from(lines: Vec<&str>) -> Self {
        HeaderInput::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

/// Structured fields extracted from a header block.
///
/// Fields that never appeared in the input are `None` (or empty for the
/// accumulating lists); the caller applies defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHeaders {
    /// Display name from a `From: Name <addr>` line.
    pub from_name: Option<String>,
    /// Address from a `From:` line.
    pub from_email: Option<String>,
    /// MIME type from a `Content-Type:` line.
    pub content_type: Option<String>,
    /// Charset from a `Content-Type: ...; charset=...` parameter. Forced to
    /// an empty string when the parameter segment carried a boundary
    /// instead.
    pub charset: Option<String>,
    /// Multipart boundary, from either a bare `boundary=` line or a
    /// `Content-Type` parameter. The message builder ignores this whenever
    /// attachments are present and generates its own.
    pub boundary: Option<String>,
    /// Accumulated `Cc:` addresses, in input order, not deduplicated.
    pub cc: Vec<String>,
    /// Accumulated `Bcc:` addresses.
    pub bcc: Vec<String>,
    /// Accumulated `Reply-To:` addresses.
    pub reply_to: Vec<String>,
    /// All other headers, in first-seen order. A repeated name overwrites
    /// its value in place.
    pub passthrough: Vec<(String, String)>,
}

/// Remove every single and double quote character, then trim. Only the
/// bare `boundary=` line strips single quotes.
fn strip_quotes(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Remove every double quote character, then trim. Content-Type parameter
/// values keep single quotes as-is.
fn strip_double_quotes(value: &str) -> String {
    value.replace('"', "").trim().to_string()
}

/// Case-insensitive search for `token`, returning the text after it.
fn value_after_token<'a>(haystack: &'a str, token: &str) -> Option<&'a str> {
    let pos = haystack.to_ascii_lowercase().find(token)?;
    Some(&haystack[pos + token.len()..])
}

/// Fold a header block into a [`ParsedHeaders`] value.
///
/// # Examples
///
/// ```rust
/// use ses_relay::headers::{parse, HeaderInput};
///
/// let parsed = parse(&HeaderInput::from(
///     "From: Jo <jo@example.com>\nContent-Type: text/html; charset=UTF-8",
/// ));
/// assert_eq!(parsed.from_name.as_deref(), Some("Jo"));
/// assert_eq!(parsed.from_email.as_deref(), Some("jo@example.com"));
/// assert_eq!(parsed.content_type.as_deref(), Some("text/html"));
/// assert_eq!(parsed.charset.as_deref(), Some("UTF-8"));
/// ```
pub fn parse(input: &HeaderInput) -> ParsedHeaders {
    let mut parsed = ParsedHeaders::default();

    for line in input.lines() {
        let Some((name, content)) = line.split_once(':') else {
            // A bare line may still carry a multipart boundary hint.
            if let Some(rest) = value_after_token(line.trim(), "boundary=") {
                parsed.boundary = Some(strip_quotes(rest));
            }
            continue;
        };

        let name = name.trim();
        let content = content.trim();

        match name.to_ascii_lowercase().as_str() {
            "from" => parse_from(content, &mut parsed),
            "content-type" => parse_content_type(content, &mut parsed),
            "cc" => append_addresses(content, &mut parsed.cc),
            "bcc" => append_addresses(content, &mut parsed.bcc),
            "reply-to" => append_addresses(content, &mut parsed.reply_to),
            _ => {
                if let Some(entry) = parsed
                    .passthrough
                    .iter_mut()
                    .find(|(existing, _)| existing == name)
                {
                    entry.1 = content.to_string();
                } else {
                    parsed
                        .passthrough
                        .push((name.to_string(), content.to_string()));
                }
            }
        }
    }

    parsed
}

fn parse_from(content: &str, parsed: &mut ParsedHeaders) {
    match content.find('<') {
        Some(bracket) => {
            if bracket > 0 {
                // The character immediately before the bracket (normally a
                // space) is dropped along with the bracket itself.
                let mut name: String = content[..bracket].to_string();
                name.pop();
                let name = name.replace('"', "");
                let name = name.trim();
                if !name.is_empty() {
                    parsed.from_name = Some(name.to_string());
                }
            }

            let email = content[bracket + 1..].replace('>', "");
            parsed.from_email = Some(email.trim().to_string());
        }
        None => {
            if !content.is_empty() {
                parsed.from_email = Some(content.to_string());
            }
        }
    }
}

fn parse_content_type(content: &str, parsed: &mut ParsedHeaders) {
    match content.split_once(';') {
        Some((mime_type, params)) => {
            parsed.content_type = Some(mime_type.trim().to_string());

            // Only the first parameter segment is inspected; anything after
            // a second `;` is ignored.
            let param = params.split_once(';').map_or(params, |(first, _)| first);

            if let Some(rest) = value_after_token(param, "charset=") {
                parsed.charset = Some(strip_double_quotes(rest));
            } else if let Some(rest) = value_after_token(param, "boundary=") {
                parsed.boundary = Some(strip_double_quotes(rest));
                parsed.charset = Some(String::new());
            }
        }
        None => {
            if !content.is_empty() {
                parsed.content_type = Some(content.to_string());
            }
        }
    }
}

fn append_addresses(content: &str, accumulator: &mut Vec<String>) {
    accumulator.extend(content.split(',').map(|addr| addr.trim().to_string()));
}
