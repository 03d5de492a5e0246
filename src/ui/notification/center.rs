//! Renders notification state onto the surface and schedules its timers.

use std::time::Duration;

use tracing::debug;

use crate::dom;
use crate::scheduler::TimerId;
use crate::surface::{Placement, Surface};
use crate::ui::mvi::Reducer;
use crate::ui::task::Task;
use crate::ui::Ctx;

use super::intent::NotificationIntent;
use super::reducer::NotificationReducer;
use super::state::{Notification, NotificationKind, NotificationPhase, NotificationState};

const OFFSCREEN: &str = "translateX(100%)";
const ONSCREEN: &str = "translateX(0)";

/// Owner of the single notification slot.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    state: NotificationState,
    next_id: u64,
    timers: Vec<TimerId>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Display `message`, evicting whatever is currently shown.
    pub fn show(&mut self, cx: &mut Ctx<'_>, message: &str, kind: NotificationKind) -> u64 {
        if let Some(current) = self.state.current() {
            debug!(id = current.id, "Evicting notification");
            cx.surface.remove_element(&current.element_id());
        }
        for timer in self.timers.drain(..) {
            cx.scheduler.cancel(timer);
        }

        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            message: message.to_string(),
            kind,
            created_at: cx.scheduler.now(),
        };
        create_element(cx, &notification);

        let id = notification.id;
        let enter_delay = cx.config.notification.enter_delay();
        let dwell = cx.config.notification.dwell();
        self.dispatch(cx, NotificationIntent::Show(notification));
        self.schedule(cx, enter_delay, NotificationIntent::Enter { id });
        self.schedule(cx, dwell, NotificationIntent::Dismiss { id });
        id
    }

    /// Close button click. Returns true when `target` was the current close
    /// button.
    pub fn close_clicked(&mut self, cx: &mut Ctx<'_>, target: &str) -> bool {
        let Some(id) = self
            .state
            .current()
            .filter(|n| n.close_button_id() == target)
            .map(|n| n.id)
        else {
            return false;
        };
        self.dispatch(cx, NotificationIntent::Dismiss { id });
        true
    }

    /// Run an intent through the reducer and render what changed.
    pub fn dispatch(&mut self, cx: &mut Ctx<'_>, intent: NotificationIntent) {
        let before = self.state.phase();
        let previous_element = self.state.current().map(Notification::element_id);
        self.state = NotificationReducer::reduce(std::mem::take(&mut self.state), intent);
        let after = self.state.phase();
        if before == after {
            return;
        }

        let transition = cx.config.notification.transition();
        match (after, self.state.current()) {
            (Some(NotificationPhase::Entering), Some(n)) => {
                let (element, settle) = (n.element_id(), NotificationIntent::Settle { id: n.id });
                cx.surface.set_style(&element, "transform", ONSCREEN);
                self.schedule(cx, transition, settle);
            }
            (Some(NotificationPhase::Exiting), Some(n)) => {
                let (element, remove) = (n.element_id(), NotificationIntent::Remove { id: n.id });
                cx.surface.set_style(&element, "transform", OFFSCREEN);
                self.schedule(cx, transition, remove);
            }
            (None, _) => {
                if let Some(element) = previous_element {
                    cx.surface.remove_element(&element);
                }
                self.timers.clear();
            }
            _ => {}
        }
    }

    fn schedule(&mut self, cx: &mut Ctx<'_>, delay: Duration, intent: NotificationIntent) {
        let timer = cx.scheduler.schedule(delay, Task::Notification(intent));
        self.timers.push(timer);
    }
}

fn create_element(cx: &mut Ctx<'_>, notification: &Notification) {
    let root = notification.element_id();
    let seconds = cx.config.notification.transition().as_secs_f64();
    let surface: &mut dyn Surface = &mut *cx.surface;
    if !surface.create_element(dom::BODY, &root, "div", Placement::Last) {
        debug!(id = notification.id, "Notification element could not be created");
        return;
    }
    surface.set_class_name(
        &root,
        &format!("notification notification-{}", notification.kind.as_str()),
    );

    let styles = [
        ("position", "fixed".to_string()),
        ("top", "100px".to_string()),
        ("right", "20px".to_string()),
        ("background", notification.kind.background().to_string()),
        ("color", "white".to_string()),
        ("z-index", "10000".to_string()),
        ("max-width", "400px".to_string()),
        ("transform", OFFSCREEN.to_string()),
        ("transition", format!("transform {seconds}s ease-in-out")),
    ];
    for (property, value) in &styles {
        surface.set_style(&root, property, value);
    }

    let content = format!("{root}-content");
    surface.create_element(&root, &content, "div", Placement::Last);
    surface.set_class_name(&content, "notification-content");

    let icon = format!("{root}-icon");
    surface.create_element(&content, &icon, "i", Placement::Last);
    surface.set_class_name(&icon, notification.kind.icon());

    let message = format!("{root}-message");
    surface.create_element(&content, &message, "span", Placement::Last);
    surface.set_text(&message, &notification.message);

    let close = notification.close_button_id();
    surface.create_element(&content, &close, "button", Placement::Last);
    surface.set_class_name(&close, "notification-close");
    surface.set_text(&close, "\u{00d7}");
}
