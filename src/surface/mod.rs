//! Rendering surface abstraction.
//!
//! The page logic never touches a real document. It talks to a [`Surface`]:
//! element lookup, class/style/attribute/text mutation, element creation,
//! geometry and a couple of environment queries. A browser host implements
//! this over the DOM; [`MemorySurface`] implements it in memory for tests and
//! the CLI simulator.

mod memory;

pub use memory::{Element, MemorySurface};

use serde::{Deserialize, Serialize};

/// Scroll geometry at the moment of an event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl Viewport {
    /// Largest reachable scroll offset; zero when nothing overflows.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }
}

/// A `<section>` laid out in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Where a new element goes among its parent's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    First,
    Last,
}

pub trait Surface {
    fn exists(&self, id: &str) -> bool;
    fn tag(&self, id: &str) -> Option<String>;
    fn parent(&self, id: &str) -> Option<String>;
    /// Direct children, in document order.
    fn children(&self, id: &str) -> Vec<String>;
    /// Every element carrying `class`, in document order.
    fn find_by_class(&self, class: &str) -> Vec<String>;
    /// Every element with `tag`, in document order.
    fn find_by_tag(&self, tag: &str) -> Vec<String>;

    fn has_class(&self, id: &str, class: &str) -> bool;
    fn add_class(&mut self, id: &str, class: &str);
    fn remove_class(&mut self, id: &str, class: &str);
    /// Replace the whole class list with a space-separated `class_name`.
    fn set_class_name(&mut self, id: &str, class_name: &str);

    fn style(&self, id: &str, property: &str) -> Option<String>;
    fn set_style(&mut self, id: &str, property: &str, value: &str);
    fn remove_style(&mut self, id: &str, property: &str);

    fn attribute(&self, id: &str, name: &str) -> Option<String>;
    fn set_attribute(&mut self, id: &str, name: &str, value: &str);
    fn remove_attribute(&mut self, id: &str, name: &str);

    fn text(&self, id: &str) -> Option<String>;
    fn set_text(&mut self, id: &str, text: &str);

    /// Create `id` under `parent`. Returns false when the parent is missing or
    /// the id is taken.
    fn create_element(&mut self, parent: &str, id: &str, tag: &str, placement: Placement) -> bool;
    /// Remove an element and its subtree. Unknown ids are ignored.
    fn remove_element(&mut self, id: &str);
    /// Clear every field inside a form.
    fn reset_form(&mut self, id: &str);
    /// Start fetching an image without attaching it anywhere.
    fn preload_image(&mut self, src: &str);

    fn viewport(&self) -> Viewport;
    /// Distance from the document top.
    fn offset_top(&self, id: &str) -> Option<f64>;
    fn offset_height(&self, id: &str) -> Option<f64>;
    fn scroll_to(&mut self, top: f64);

    fn prefers_reduced_motion(&self) -> bool;
    fn supports_smooth_scroll(&self) -> bool;

    /// Top edge relative to the viewport.
    fn bounding_top(&self, id: &str) -> Option<f64> {
        Some(self.offset_top(id)? - self.viewport().scroll_y)
    }

    /// Every `<section>` with its layout, in document order.
    fn sections(&self) -> Vec<SectionBox> {
        self.find_by_tag("section")
            .into_iter()
            .filter_map(|id| {
                let top = self.offset_top(&id)?;
                let height = self.offset_height(&id)?;
                Some(SectionBox { id, top, height })
            })
            .collect()
    }

    /// `id` itself or its nearest ancestor carrying `class`.
    fn closest_with_class(&self, id: &str, class: &str) -> Option<String> {
        let mut current = Some(id.to_string());
        while let Some(candidate) = current {
            if self.has_class(&candidate, class) {
                return Some(candidate);
            }
            current = self.parent(&candidate);
        }
        None
    }

    /// Every element below `root`, in document order.
    fn descendants(&self, root: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut stack: Vec<String> = self.children(root).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            stack.extend(self.children(&id).into_iter().rev());
            found.push(id);
        }
        found
    }

    /// Descendants of `root` carrying `class`, in document order.
    fn descendants_with_class(&self, root: &str, class: &str) -> Vec<String> {
        self.find_by_class(class)
            .into_iter()
            .filter(|id| self.is_descendant(id, root))
            .collect()
    }

    fn is_descendant(&self, id: &str, ancestor: &str) -> bool {
        let mut current = self.parent(id);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(&candidate);
        }
        false
    }
}
