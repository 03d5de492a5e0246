//! Statistic counters that ramp up from zero the first time they scroll in.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::dom;
use crate::error::FolioError;
use crate::ui::task::Task;
use crate::ui::Ctx;

/// Longest numeric prefix, the way a browser's `parseFloat` reads it.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

/// Parse the number a counter's text starts with (`"150+"` → 150).
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let matched = LEADING_NUMBER.find(text)?;
    matched.as_str().trim().parse().ok()
}

/// One counter element and its fixed-step linear ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterTarget {
    pub element: String,
    /// Text the element showed before animating; restored verbatim at the end.
    pub original: String,
    pub target_value: f64,
    pub increment: f64,
    pub current: f64,
    pub has_plus_suffix: bool,
    pub is_float_formatted: bool,
    pub finished: bool,
}

impl CounterTarget {
    pub fn parse(element: &str, text: &str, steps: u32) -> Result<Self, FolioError> {
        let target_value =
            parse_leading_number(text).ok_or_else(|| FolioError::InvalidNumericTarget {
                element: element.to_string(),
                text: text.to_string(),
            })?;
        Ok(Self {
            element: element.to_string(),
            original: text.to_string(),
            target_value,
            increment: target_value / f64::from(steps.max(1)),
            current: 0.0,
            has_plus_suffix: text.contains('+'),
            is_float_formatted: text.contains('.'),
            finished: false,
        })
    }

    /// Advance one step and return the text to display. Integer intermediates
    /// are floored and keep the target's `+` suffix; decimals show two places.
    /// The final step shows the original text.
    pub fn step(&mut self) -> String {
        self.current += self.increment;
        if self.current >= self.target_value {
            self.finished = true;
            return self.original.clone();
        }
        if self.is_float_formatted {
            format!("{:.2}", self.current)
        } else if self.has_plus_suffix {
            format!("{}+", self.current.floor())
        } else {
            format!("{}", self.current.floor())
        }
    }
}

/// The stats region and its counters. Animates at most once.
#[derive(Debug)]
pub struct CounterBoard {
    region: String,
    retired: bool,
    counters: Vec<CounterTarget>,
}

impl CounterBoard {
    /// `None` when the page has no stats region.
    pub fn mount(cx: &mut Ctx<'_>) -> Option<Self> {
        let region = cx.surface.find_by_class(dom::STATS_REGION).into_iter().next()?;
        Some(Self {
            region,
            retired: false,
            counters: Vec::new(),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Still waiting for the region to scroll into view.
    pub fn is_observing(&self) -> bool {
        !self.retired
    }

    pub fn counters(&self) -> &[CounterTarget] {
        &self.counters
    }

    /// Region intersection. Arms every counter in it and stops observing.
    /// Returns false when `target` is not the region or it already fired.
    pub fn on_intersection(&mut self, cx: &mut Ctx<'_>, target: &str) -> bool {
        if self.retired || target != self.region {
            return false;
        }
        self.retired = true;

        let steps = cx.config.counter.steps;
        let interval = cx.config.counter.interval();
        for element in cx.surface.descendants_with_class(&self.region, dom::STAT_NUMBER) {
            let text = cx.surface.text(&element).unwrap_or_default();
            match CounterTarget::parse(&element, &text, steps) {
                Ok(counter) => {
                    let index = self.counters.len();
                    self.counters.push(counter);
                    cx.scheduler.schedule(interval, Task::CounterTick { index });
                }
                Err(err) => debug!(error = %err, "Skipping counter"),
            }
        }
        true
    }

    pub fn tick(&mut self, cx: &mut Ctx<'_>, index: usize) {
        let Some(counter) = self.counters.get_mut(index) else {
            return;
        };
        if counter.finished {
            return;
        }
        let display = counter.step();
        cx.surface.set_text(&counter.element, &display);
        if !counter.finished {
            cx.scheduler
                .schedule(cx.config.counter.interval(), Task::CounterTick { index });
        }
    }
}
