//! Typewriter effect on the hero title.

use tracing::debug;

use crate::dom;
use crate::surface::Placement;
use crate::ui::task::Task;
use crate::ui::Ctx;

const BLINK_KEYFRAMES: &str = "@keyframes blink {
    0%, 50% { border-color: transparent; }
    51%, 100% { border-color: var(--primary-color); }
}";

#[derive(Debug)]
pub struct TypingEffect {
    element: String,
    text: Vec<char>,
    typed: usize,
    done: bool,
}

impl TypingEffect {
    /// Capture and clear the first typing element, then start typing after
    /// the configured delay. `None` when the page has no such element.
    pub fn mount(cx: &mut Ctx<'_>) -> Option<Self> {
        let element = cx.surface.find_by_class(dom::TYPING_TEXT).into_iter().next()?;
        let text: Vec<char> = cx.surface.text(&element).unwrap_or_default().chars().collect();
        cx.surface.set_text(&element, "");

        if !cx.surface.exists(dom::TYPING_STYLE)
            && cx
                .surface
                .create_element(dom::HEAD, dom::TYPING_STYLE, "style", Placement::Last)
        {
            cx.surface.set_text(dom::TYPING_STYLE, BLINK_KEYFRAMES);
        }

        let delay = cx.config.typing.start_delay();
        cx.scheduler.schedule(delay, Task::TypeNextChar);
        debug!(element = %element, chars = text.len(), "Typing effect armed");
        Some(Self {
            element,
            text,
            typed: 0,
            done: false,
        })
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Append the next character, or show the cursor once everything is typed.
    pub fn type_next(&mut self, cx: &mut Ctx<'_>) {
        if self.done {
            return;
        }
        match self.text.get(self.typed) {
            Some(_) => {
                self.typed += 1;
                let shown: String = self.text[..self.typed].iter().collect();
                cx.surface.set_text(&self.element, &shown);
                let interval = cx.config.typing.char_interval();
                cx.scheduler.schedule(interval, Task::TypeNextChar);
            }
            None => {
                self.done = true;
                cx.surface
                    .set_style(&self.element, "border-right", "2px solid var(--primary-color)");
                cx.surface
                    .set_style(&self.element, "animation", "blink 1s infinite");
            }
        }
    }
}
