mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{
    AssetsConfig, Config, ContactConfig, CounterConfig, NotificationConfig, PerformanceConfig,
    RevealConfig, ScrollConfig, ThemeConfig, TypingConfig,
};
