//! Host application hook points.
//!
//! The host's plugin/filter system gets two chances to influence a send:
//! rewriting the whole mail tuple before any processing, and finalizing
//! the derived defaults (from name/address, content type, charset). Every
//! method has an identity default, so hosts implement only what they need.

use crate::request::MailInput;

/// Hook points invoked during a send, in pipeline order.
pub trait MailHooks: Send + Sync {
    /// Rewrite the mail before processing. The hook receives the complete
    /// tuple and may change any subset of it.
    fn filter_mail(&self, mail: MailInput) -> MailInput {
        mail
    }

    /// Finalize the From display name, given the locally derived default.
    fn from_name(&self, default: String) -> String {
        default
    }

    /// Finalize the From address, given the locally derived default.
    fn from_email(&self, default: String) -> String {
        default
    }

    /// Finalize the body content type, given the locally derived default.
    fn content_type(&self, default: String) -> String {
        default
    }

    /// Finalize the body charset, given the locally derived default.
    fn charset(&self, default: String) -> String {
        default
    }
}

/// Hooks implementation that leaves everything untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl MailHooks for NoopHooks {}
