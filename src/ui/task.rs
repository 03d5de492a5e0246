//! Work parked on the page scheduler.

use crate::ui::contact::ContactMessage;
use crate::ui::notification::NotificationIntent;

#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// End of the theme toggle's press pulse.
    ThemePulseRelease,
    /// End of the colour transition window opened by a theme toggle.
    ThemeTransitionEnd,
    /// Debounced reveal sweep after scrolling settles.
    RevealSweep,
    /// One step of the counter at this index.
    CounterTick { index: usize },
    Notification(NotificationIntent),
    /// Type the next character of the hero title.
    TypeNextChar,
    /// Simulated send finished: open the mail client.
    DeliverContact(ContactMessage),
}
