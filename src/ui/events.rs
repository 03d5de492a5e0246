use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::surface::{MemorySurface, Surface};
use crate::ui::handlers::EventKind;

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    Scroll,
    Resize,
    Click {
        target: String,
    },
    /// `target` entered the viewport.
    Intersection {
        target: String,
    },
    KeyDown {
        key: String,
    },
    /// Form submission. Without explicit `fields` the values are read from
    /// the form itself.
    Submit {
        form: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<BTreeMap<String, String>>,
    },
    Focus {
        target: String,
    },
    Blur {
        target: String,
    },
    BeforePrint,
    AfterPrint,
    Load {
        load_time_ms: u64,
    },
    Error {
        message: String,
    },
}

impl PageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Scroll => EventKind::Scroll,
            Self::Resize => EventKind::Resize,
            Self::Click { .. } => EventKind::Click,
            Self::Intersection { .. } => EventKind::Intersection,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::Submit { .. } => EventKind::Submit,
            Self::Focus { .. } => EventKind::Focus,
            Self::Blur { .. } => EventKind::Blur,
            Self::BeforePrint => EventKind::BeforePrint,
            Self::AfterPrint => EventKind::AfterPrint,
            Self::Load { .. } => EventKind::Load,
            Self::Error { .. } => EventKind::Error,
        }
    }
}

/// Feeds a page with timestamped events.
pub trait EventSource<S> {
    /// When the next step happens, or `None` once exhausted.
    fn next_at(&self) -> Option<Duration>;

    /// Take the next step, applying any host-side change it carries to
    /// `surface`. Returns `None` for steps that only change the host.
    fn next_event(&mut self, surface: &mut S) -> Option<PageEvent>;
}

/// Host-side changes a script can make before the page hears about them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostAction {
    /// Move the viewport and emit a scroll event.
    ScrollTo { y: f64 },
    /// Change the viewport height and emit a resize event.
    ResizeTo { viewport_height: f64 },
    /// Type a value into a form field. No event.
    Input { target: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    Host(HostAction),
    Event(PageEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds since the page mounted.
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

impl ScriptStep {
    pub fn event(at_ms: u64, event: PageEvent) -> Self {
        Self {
            at_ms,
            action: Action::Event(event),
        }
    }

    pub fn host(at_ms: u64, action: HostAction) -> Self {
        Self {
            at_ms,
            action: Action::Host(action),
        }
    }
}

/// Replays a fixed script against a [`MemorySurface`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    steps: VecDeque<ScriptStep>,
}

impl ScriptedEvents {
    /// Steps run in time order; steps sharing a time keep their order.
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by_key(|step| step.at_ms);
        Self {
            steps: steps.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl EventSource<MemorySurface> for ScriptedEvents {
    fn next_at(&self) -> Option<Duration> {
        self.steps
            .front()
            .map(|step| Duration::from_millis(step.at_ms))
    }

    fn next_event(&mut self, surface: &mut MemorySurface) -> Option<PageEvent> {
        match self.steps.pop_front()?.action {
            Action::Event(event) => Some(event),
            Action::Host(HostAction::ScrollTo { y }) => {
                surface.set_scroll_y(y);
                Some(PageEvent::Scroll)
            }
            Action::Host(HostAction::ResizeTo { viewport_height }) => {
                surface.set_viewport_height(viewport_height);
                Some(PageEvent::Resize)
            }
            Action::Host(HostAction::Input { target, value }) => {
                surface.set_attribute(&target, "value", &value);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Element;

    #[test]
    fn steps_parse_from_json() {
        let steps: Vec<ScriptStep> = serde_json::from_str(
            r#"[
                {"at_ms": 0, "type": "scroll_to", "y": 600},
                {"at_ms": 10, "type": "click", "target": "theme-toggle"},
                {"at_ms": 20, "type": "input", "target": "f-name", "value": "Ada"},
                {"at_ms": 30, "type": "submit", "form": "contactForm"},
                {"at_ms": 40, "type": "before_print"}
            ]"#,
        )
        .unwrap();
        assert_eq!(steps[0], ScriptStep::host(0, HostAction::ScrollTo { y: 600.0 }));
        assert_eq!(
            steps[1],
            ScriptStep::event(10, PageEvent::Click { target: "theme-toggle".into() })
        );
        assert!(matches!(steps[2].action, Action::Host(HostAction::Input { .. })));
        assert_eq!(
            steps[3],
            ScriptStep::event(30, PageEvent::Submit { form: "contactForm".into(), fields: None })
        );
        assert_eq!(steps[4].action, Action::Event(PageEvent::BeforePrint));
    }

    #[test]
    fn replay_applies_host_actions_in_time_order() {
        let mut surface = MemorySurface::new(800.0, 2000.0);
        surface.insert(Element::new("f-name", "input"));
        let mut source = ScriptedEvents::new(vec![
            ScriptStep::host(50, HostAction::Input { target: "f-name".into(), value: "Ada".into() }),
            ScriptStep::host(10, HostAction::ScrollTo { y: 300.0 }),
        ]);

        assert_eq!(source.next_at(), Some(Duration::from_millis(10)));
        assert_eq!(source.next_event(&mut surface), Some(PageEvent::Scroll));
        assert_eq!(surface.viewport().scroll_y, 300.0);

        assert_eq!(source.next_event(&mut surface), None);
        assert_eq!(surface.attribute("f-name", "value").as_deref(), Some("Ada"));
        assert_eq!(source.next_at(), None);
        assert_eq!(source.remaining(), 0);
    }
}
