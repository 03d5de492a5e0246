//! `mailto:` link composition for the contact form.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::info;

/// Characters `encodeURIComponent` leaves alone are unreserved here too.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoLink {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailtoLink {
    pub fn compose(recipient: &str, name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: format!("Name: {name}\nEmail: {email}\n\nMessage:\n{message}"),
        }
    }
}

impl fmt::Display for MailtoLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mailto:{}?subject={}&body={}",
            self.recipient,
            encode_component(&self.subject),
            encode_component(&self.body)
        )
    }
}

/// Hands a composed link to whatever opens the user's mail client.
pub trait MailComposer {
    fn open(&mut self, link: &MailtoLink);
}

/// Logs each link and keeps it. Clones share the same outbox.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    sent: Rc<RefCell<Vec<MailtoLink>>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links(&self) -> Vec<MailtoLink> {
        self.sent.borrow().clone()
    }
}

impl MailComposer for Outbox {
    fn open(&mut self, link: &MailtoLink) {
        info!(link = %link, "Opening mail client");
        self.sent.borrow_mut().push(link.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("keep-_.!~*'()"), "keep-_.!~*'()");
        assert_eq!(encode_component("line\nbreak"), "line%0Abreak");
        assert_eq!(encode_component("café"), "caf%C3%A9");
        assert_eq!(encode_component("@+/?#"), "%40%2B%2F%3F%23");
    }

    #[test]
    fn link_layout() {
        let link = MailtoLink::compose("me@example.com", "Ada", "ada@x.io", "Hi there", "Hello!");
        assert_eq!(link.body, "Name: Ada\nEmail: ada@x.io\n\nMessage:\nHello!");
        assert_eq!(
            link.to_string(),
            "mailto:me@example.com?subject=Hi%20there&body=Name%3A%20Ada%0AEmail%3A%20ada%40x.io%0A%0AMessage%3A%0AHello!"
        );
    }

    #[test]
    fn outbox_clones_share_links() {
        let outbox = Outbox::new();
        let mut handle = outbox.clone();
        handle.open(&MailtoLink::compose("a@b.c", "n", "e@f.g", "s", "m"));
        assert_eq!(outbox.links().len(), 1);
    }
}
