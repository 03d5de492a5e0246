//! Contact form: validation, simulated send, mail hand-off.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::dom;
use crate::error::FolioError;
use crate::mail::MailtoLink;
use crate::ui::task::Task;
use crate::ui::Ctx;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const FIELDS: [&str; 4] = ["name", "email", "subject", "message"];
pub const SENDING_LABEL: &str = "Sending...";
pub const PREPARED: &str = "Message prepared! Your email client should open now.";

/// Why a submission was rejected. The message is shown to the user as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// A validated submission waiting for the simulated send to finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(fields: &BTreeMap<String, String>) -> Result<Self, ValidationError> {
        let field = |key: &str| fields.get(key).cloned().unwrap_or_default();
        let message = Self {
            name: field("name"),
            email: field("email"),
            subject: field("subject"),
            message: field("message"),
        };
        if [&message.name, &message.email, &message.subject, &message.message]
            .iter()
            .any(|value| value.is_empty())
        {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(&message.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(message)
    }

    pub fn to_mailto(&self, recipient: &str) -> MailtoLink {
        MailtoLink::compose(recipient, &self.name, &self.email, &self.subject, &self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A send is already in flight.
    Busy,
    Invalid(ValidationError),
    Sending,
}

#[derive(Debug)]
pub struct ContactForm {
    form: String,
    button: Option<String>,
    button_label: Option<String>,
    sending: bool,
}

impl ContactForm {
    pub fn mount(cx: &mut Ctx<'_>) -> Result<Self, FolioError> {
        if !cx.surface.exists(dom::CONTACT_FORM) {
            return Err(FolioError::not_found("contact", dom::CONTACT_FORM));
        }
        let buttons: Vec<String> = cx
            .surface
            .descendants(dom::CONTACT_FORM)
            .into_iter()
            .filter(|id| cx.surface.tag(id).as_deref() == Some("button"))
            .collect();
        let button = buttons
            .iter()
            .find(|id| cx.surface.attribute(id, "type").as_deref() == Some("submit"))
            .or(buttons.first())
            .cloned();
        if button.is_none() {
            debug!("Contact form has no submit button");
        }
        Ok(Self {
            form: dom::CONTACT_FORM.to_string(),
            button,
            button_label: None,
            sending: false,
        })
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Current field values as typed into the form.
    pub fn read_fields(&self, cx: &Ctx<'_>) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        for id in cx.surface.descendants(&self.form) {
            let Some(name) = cx.surface.attribute(&id, "name") else {
                continue;
            };
            if !FIELDS.contains(&name.as_str()) {
                continue;
            }
            let value = cx
                .surface
                .attribute(&id, "value")
                .or_else(|| cx.surface.text(&id))
                .unwrap_or_default();
            fields.insert(name, value);
        }
        fields
    }

    /// Validate and start the simulated send.
    pub fn submit(&mut self, cx: &mut Ctx<'_>, fields: &BTreeMap<String, String>) -> SubmitOutcome {
        if self.sending {
            debug!("Submit ignored while sending");
            return SubmitOutcome::Busy;
        }
        let message = match ContactMessage::validate(fields) {
            Ok(message) => message,
            Err(err) => return SubmitOutcome::Invalid(err),
        };

        self.sending = true;
        if let Some(button) = &self.button {
            self.button_label = cx.surface.text(button);
            cx.surface.set_text(button, SENDING_LABEL);
            cx.surface.set_attribute(button, "disabled", "");
        }
        let delay = cx.config.contact.send_delay();
        cx.scheduler.schedule(delay, Task::DeliverContact(message));
        SubmitOutcome::Sending
    }

    /// Send finished: build the link, reset the form and restore the button.
    pub fn deliver(&mut self, cx: &mut Ctx<'_>, message: &ContactMessage) -> MailtoLink {
        let link = message.to_mailto(&cx.config.contact.recipient);
        cx.surface.reset_form(&self.form);
        if let Some(button) = &self.button {
            let label = self.button_label.take().unwrap_or_default();
            cx.surface.set_text(button, &label);
            cx.surface.remove_attribute(button, "disabled");
        }
        self.sending = false;
        link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::scheduler::Scheduler;
    use crate::surface::{Element, MemorySurface};

    fn fields(name: &str, email: &str, subject: &str, message: &str) -> BTreeMap<String, String> {
        [("name", name), ("email", email), ("subject", subject), ("message", message)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn page() -> MemorySurface {
        let mut surface = MemorySurface::new(800.0, 800.0);
        surface
            .insert(Element::new("contactForm", "form"))
            .insert(
                Element::new("f-name", "input")
                    .under("contactForm")
                    .attr("name", "name")
                    .attr("value", "Ada"),
            )
            .insert(Element::new("f-message", "textarea").under("contactForm").attr("name", "message").text("Hi"))
            .insert(
                Element::new("send", "button")
                    .under("contactForm")
                    .attr("type", "submit")
                    .text("Send Message"),
            );
        surface
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@b.c"));
    }

    #[test]
    fn missing_field_wins_over_bad_email() {
        let err = ContactMessage::validate(&fields("", "nope", "s", "m")).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields);
        assert_eq!(err.to_string(), "Please fill in all fields.");

        let err = ContactMessage::validate(&fields("n", "nope", "s", "m")).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address.");
    }

    #[test]
    fn read_fields_uses_value_or_text() {
        let mut surface = page();
        let mut scheduler = Scheduler::new();
        let config = Config::default();
        let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
        let form = ContactForm::mount(&mut cx).unwrap();
        let read = form.read_fields(&cx);
        assert_eq!(read.get("name").map(String::as_str), Some("Ada"));
        assert_eq!(read.get("message").map(String::as_str), Some("Hi"));
        assert!(!read.contains_key("email"));
    }

    #[test]
    fn submit_disables_button_until_delivered() {
        let mut surface = page();
        let mut scheduler = Scheduler::new();
        let config = Config::default();
        let mut cx = Ctx::new(&mut surface, &mut scheduler, &config);
        let mut form = ContactForm::mount(&mut cx).unwrap();

        let valid = fields("Ada", "ada@x.io", "Hello", "Hi");
        assert_eq!(form.submit(&mut cx, &valid), SubmitOutcome::Sending);
        assert_eq!(cx.surface.text("send").as_deref(), Some("Sending..."));
        assert!(cx.surface.attribute("send", "disabled").is_some());
        assert_eq!(form.submit(&mut cx, &valid), SubmitOutcome::Busy);
        assert_eq!(cx.scheduler.pending(), 1);

        let message = ContactMessage::validate(&valid).unwrap();
        let link = form.deliver(&mut cx, &message);
        assert_eq!(link.recipient, config.contact.recipient);
        assert!(!form.is_sending());
        assert_eq!(cx.surface.text("send").as_deref(), Some("Send Message"));
        assert!(cx.surface.attribute("send", "disabled").is_none());
        assert!(cx.surface.attribute("f-name", "value").is_none());
    }
}
