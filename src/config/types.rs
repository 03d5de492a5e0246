use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ui::theme::Theme;

/// Root configuration container.
///
/// Every section defaults independently, so a config file only needs the
/// keys it wants to change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub notification: NotificationConfig,
    pub theme: ThemeConfig,
    pub typing: TypingConfig,
    pub contact: ContactConfig,
    pub performance: PerformanceConfig,
    pub assets: AssetsConfig,
}

/// Scroll tracking and in-page navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Scroll offset past which the navbar turns compact.
    pub navbar_threshold: f64,
    /// How far above a section's top it already counts as active.
    pub section_offset: f64,
    /// Fixed navbar height subtracted from smooth-scroll targets.
    pub nav_scroll_offset: f64,
    /// Quiet window before the reveal sweep runs after scrolling.
    pub reveal_debounce_ms: u64,
}

/// Reveal-on-scroll animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// An element reveals once its top is this far above the viewport bottom.
    pub viewport_margin: f64,
    /// Extra animation delay per card within a section.
    pub stagger_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Number of increments from zero to the target.
    pub steps: u32,
    pub interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Delay before the slide-in starts (one render tick).
    pub enter_delay_ms: u64,
    /// How long a notification stays before it leaves on its own.
    pub dwell_ms: u64,
    /// Duration of the slide-in and slide-out transitions.
    pub transition_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preference key the theme is persisted under.
    pub storage_key: String,
    /// Theme used when nothing (valid) is persisted.
    pub default: Theme,
    /// Length of the colour transition window opened on toggle.
    pub transition_ms: u64,
    /// Length of the toggle button's press pulse.
    pub pulse_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub start_delay_ms: u64,
    pub char_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Address the staged email is addressed to.
    pub recipient: String,
    /// Simulated send time before the mail client is opened.
    pub send_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Page loads slower than this are logged as warnings.
    pub slow_load_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Images fetched eagerly at startup.
    pub critical_images: Vec<String>,
    /// Script loaded when the host lacks native smooth scrolling.
    pub smooth_scroll_polyfill: String,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            navbar_threshold: 100.0,
            section_offset: 150.0,
            nav_scroll_offset: 80.0,
            reveal_debounce_ms: 10,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            viewport_margin: 150.0,
            stagger_ms: 100,
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            steps: 50,
            interval_ms: 30,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enter_delay_ms: 100,
            dwell_ms: 5000,
            transition_ms: 300,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            default: Theme::Dark,
            transition_ms: 300,
            pulse_ms: 150,
        }
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 1000,
            char_interval_ms: 100,
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: "hello@example.com".to_string(),
            send_delay_ms: 1500,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { slow_load_ms: 3000 }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            critical_images: vec!["assets/profile-placeholder.svg".to_string()],
            smooth_scroll_polyfill:
                "https://cdn.jsdelivr.net/gh/iamdustan/smoothscroll@master/dist/smoothscroll.min.js"
                    .to_string(),
        }
    }
}

impl ScrollConfig {
    pub fn reveal_debounce(&self) -> Duration {
        Duration::from_millis(self.reveal_debounce_ms)
    }
}

impl RevealConfig {
    /// Animation delay for the card at `index` within its section.
    pub fn stagger(&self, index: usize) -> Duration {
        Duration::from_millis(self.stagger_ms.saturating_mul(index as u64))
    }
}

impl CounterConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl NotificationConfig {
    pub fn enter_delay(&self) -> Duration {
        Duration::from_millis(self.enter_delay_ms)
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl ThemeConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}

impl TypingConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn char_interval(&self) -> Duration {
        Duration::from_millis(self.char_interval_ms)
    }
}

impl ContactConfig {
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}
