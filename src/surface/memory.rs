//! In-memory document used by tests and the simulator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Placement, Surface, Viewport};
use crate::dom;

/// One node of a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub tag: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub height: f64,
}

impl Element {
    pub fn new(id: &str, tag: &str) -> Self {
        Self {
            id: id.to_string(),
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn under(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Layout box: offset from the document top and height.
    pub fn layout(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }
}

/// Document with the root `html`/`head`/`body` skeleton.
#[derive(Debug, Clone, Serialize)]
pub struct MemorySurface {
    elements: Vec<Element>,
    scroll_y: f64,
    viewport_height: f64,
    document_height: f64,
    reduced_motion: bool,
    smooth_scroll: bool,
    preloaded: Vec<String>,
    scroll_requests: Vec<f64>,
}

impl MemorySurface {
    pub fn new(viewport_height: f64, document_height: f64) -> Self {
        let mut surface = Self {
            elements: Vec::new(),
            scroll_y: 0.0,
            viewport_height,
            document_height,
            reduced_motion: false,
            smooth_scroll: true,
            preloaded: Vec::new(),
            scroll_requests: Vec::new(),
        };
        surface.elements.push(Element::new(dom::ROOT, "html"));
        surface.insert(Element::new(dom::HEAD, "head").under(dom::ROOT));
        surface.insert(Element::new(dom::BODY, "body").under(dom::ROOT));
        surface
    }

    /// Append a prepared element after its parent's existing subtree.
    /// Elements without a parent go under `body`.
    pub fn insert(&mut self, mut element: Element) -> &mut Self {
        if element.parent.is_none() && element.id != dom::ROOT {
            element.parent = Some(dom::BODY.to_string());
        }
        let position = match element.parent.as_deref() {
            Some(parent) => self.subtree_end(parent).unwrap_or(self.elements.len()),
            None => self.elements.len(),
        };
        self.elements.insert(position, element);
        self
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y.clamp(0.0, self.viewport().max_scroll());
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
        self.scroll_y = self.scroll_y.min(self.viewport().max_scroll());
    }

    pub fn set_document_height(&mut self, height: f64) {
        self.document_height = height;
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn set_smooth_scroll_support(&mut self, supported: bool) {
        self.smooth_scroll = supported;
    }

    pub fn preloaded_images(&self) -> &[String] {
        &self.preloaded
    }

    /// Offsets passed to [`Surface::scroll_to`], oldest first.
    pub fn scroll_requests(&self) -> &[f64] {
        &self.scroll_requests
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Index one past the last element of `id`'s subtree.
    fn subtree_end(&self, id: &str) -> Option<usize> {
        let start = self.index_of(id)?;
        let mut end = start + 1;
        while end < self.elements.len() && self.is_descendant(&self.elements[end].id, id) {
            end += 1;
        }
        Some(end)
    }
}

impl Surface for MemorySurface {
    fn exists(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    fn tag(&self, id: &str) -> Option<String> {
        self.element(id).map(|e| e.tag.clone())
    }

    fn parent(&self, id: &str) -> Option<String> {
        self.element(id).and_then(|e| e.parent.clone())
    }

    fn children(&self, id: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.parent.as_deref() == Some(id))
            .map(|e| e.id.clone())
            .collect()
    }

    fn find_by_class(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.classes.iter().any(|c| c == class))
            .map(|e| e.id.clone())
            .collect()
    }

    fn find_by_tag(&self, tag: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.tag == tag)
            .map(|e| e.id.clone())
            .collect()
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(node) = self.node_mut(id) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    fn set_class_name(&mut self, id: &str, class_name: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes = class_name.split_whitespace().map(str::to_string).collect();
        }
    }

    fn style(&self, id: &str, property: &str) -> Option<String> {
        self.element(id).and_then(|e| e.styles.get(property).cloned())
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn remove_style(&mut self, id: &str, property: &str) {
        if let Some(node) = self.node_mut(id) {
            node.styles.remove(property);
        }
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.element(id).and_then(|e| e.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, id: &str, name: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attributes.remove(name);
        }
    }

    fn text(&self, id: &str) -> Option<String> {
        self.element(id).map(|e| e.text.clone())
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(node) = self.node_mut(id) {
            node.text = text.to_string();
        }
    }

    fn create_element(&mut self, parent: &str, id: &str, tag: &str, placement: Placement) -> bool {
        if self.exists(id) {
            return false;
        }
        let position = match placement {
            Placement::First => self.index_of(parent).map(|index| index + 1),
            Placement::Last => self.subtree_end(parent),
        };
        let Some(position) = position else {
            return false;
        };
        self.elements
            .insert(position, Element::new(id, tag).under(parent));
        true
    }

    fn remove_element(&mut self, id: &str) {
        let Some(start) = self.index_of(id) else {
            return;
        };
        let end = self.subtree_end(id).unwrap_or(start + 1);
        self.elements.drain(start..end);
    }

    fn reset_form(&mut self, id: &str) {
        let fields: Vec<String> = self
            .elements
            .iter()
            .filter(|e| matches!(e.tag.as_str(), "input" | "textarea" | "select"))
            .filter(|e| self.is_descendant(&e.id, id))
            .map(|e| e.id.clone())
            .collect();
        for field in fields {
            if let Some(node) = self.node_mut(&field) {
                node.attributes.remove("value");
                node.text.clear();
            }
        }
    }

    fn preload_image(&mut self, src: &str) {
        self.preloaded.push(src.to_string());
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_y: self.scroll_y,
            viewport_height: self.viewport_height,
            document_height: self.document_height,
        }
    }

    fn offset_top(&self, id: &str) -> Option<f64> {
        self.element(id).map(|e| e.top)
    }

    fn offset_height(&self, id: &str) -> Option<f64> {
        self.element(id).map(|e| e.height)
    }

    fn scroll_to(&mut self, top: f64) {
        self.scroll_requests.push(top);
        self.set_scroll_y(top);
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn supports_smooth_scroll(&self) -> bool {
        self.smooth_scroll
    }
}
