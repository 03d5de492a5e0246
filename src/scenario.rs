//! Scripted page runs for the `simulate` command.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::surface::{Element, MemorySurface};
use crate::ui::events::{ScriptStep, ScriptedEvents};
use crate::ui::theme::Theme;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn default_true() -> bool {
    true
}

/// A page layout plus the events to replay against it.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub viewport_height: f64,
    pub document_height: f64,
    #[serde(default)]
    pub reduced_motion: bool,
    #[serde(default = "default_true")]
    pub smooth_scroll: bool,
    /// Theme already persisted before the page loads.
    #[serde(default)]
    pub stored_theme: Option<Theme>,
    pub elements: Vec<Element>,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path).map_err(|e| ScenarioError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ScenarioError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Build the document and the event script.
    pub fn into_parts(self) -> (MemorySurface, ScriptedEvents) {
        let mut surface = MemorySurface::new(self.viewport_height, self.document_height);
        surface.set_reduced_motion(self.reduced_motion);
        surface.set_smooth_scroll_support(self.smooth_scroll);
        for element in self.elements {
            surface.insert(element);
        }
        (surface, ScriptedEvents::new(self.steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    #[test]
    fn minimal_scenario_uses_defaults() {
        let scenario: Scenario = serde_json::from_str(
            r#"{
                "viewport_height": 800,
                "document_height": 2400,
                "elements": [
                    {"id": "home", "tag": "section", "top": 0, "height": 800},
                    {"id": "title", "tag": "span", "parent": "home", "classes": ["typing-text"], "text": "Hi"}
                ]
            }"#,
        )
        .unwrap();
        assert!(scenario.smooth_scroll);
        assert!(scenario.stored_theme.is_none());

        let (surface, events) = scenario.into_parts();
        assert_eq!(surface.parent("title").as_deref(), Some("home"));
        assert_eq!(surface.text("title").as_deref(), Some("Hi"));
        assert_eq!(events.remaining(), 0);
    }
}
