//! XML response dispatch for the `SendRawEmail` action.
//!
//! The query API answers with one of two shapes: a
//! `<SendRawEmailResponse>` carrying the message id inside
//! `<SendRawEmailResult>`, or an `<ErrorResponse>` carrying a code and
//! message inside `<Error>`. Anything else, including a body that is not
//! XML at all, is reported as the generic unknown failure.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{RelayError, RelayResult};

/// Dispatch a `SendRawEmail` response body.
///
/// Returns the message id on success. A structured `<Error>` element is
/// surfaced verbatim as [`RelayError::RemoteService`]; everything else is
/// [`RelayError::UnknownResponse`].
///
/// # Examples
///
/// ```rust
/// use ses_relay::response::parse_send_response;
///
/// let body = "<SendRawEmailResponse>\
///     <SendRawEmailResult><MessageId>0100018-abcdef</MessageId></SendRawEmailResult>\
/// </SendRawEmailResponse>";
/// assert_eq!(parse_send_response(body).unwrap(), "0100018-abcdef");
/// ```
pub fn parse_send_response(body: &str) -> RelayResult<String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut message_id = None;
    let mut error_code = None;
    let mut error_message = None;

    let mut in_result = false;
    let mut in_error = false;
    let mut current_element = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "SendRawEmailResult" => in_result = true,
                    "Error" => in_error = true,
                    _ => {}
                }
                current_element = name;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                match current_element.as_str() {
                    "MessageId" if in_result => message_id = Some(text),
                    "Code" if in_error => error_code = Some(text),
                    "Message" if in_error => error_message = Some(text),
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                match e.name().as_ref() {
                    b"SendRawEmailResult" => in_result = false,
                    b"Error" => in_error = false,
                    _ => {}
                }
                current_element.clear();
            }
            Ok(Event::Eof) => break,
            // An unparseable body falls through to the unknown-response
            // case below, same as a well-formed body of the wrong shape.
            Err(_) => break,
            _ => {}
        }
    }

    if let Some(id) = message_id {
        return Ok(id);
    }

    if error_code.is_some() || error_message.is_some() {
        return Err(RelayError::RemoteService {
            code: error_code.unwrap_or_default(),
            message: error_message.unwrap_or_default(),
        });
    }

    Err(RelayError::UnknownResponse)
}
