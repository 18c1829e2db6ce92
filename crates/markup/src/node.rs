//! The element node stored in the arena
//!
//! Design philosophy:
//! - Small fixed-size fields first (better packing)
//! - Use indices instead of pointers for parent/children
//! - Tree links are crate-private: only the arena may rewire them

use crate::attributes::Attributes;
use crate::types::{AttrValue, NodeId, NodeKind};
use serde_json::Value;
use smallvec::SmallVec;
use std::borrow::Cow;

/// A single markup node (element or text) in an [`ElementArena`](crate::ElementArena)
#[derive(Debug, Clone)]
pub struct ElementNode {
    pub(crate) node_id: NodeId,
    pub(crate) parent_id: Option<NodeId>,
    pub(crate) children_ids: SmallVec<[NodeId; 4]>, // Most nodes have <4 children

    // Style flags, inherited from the parent on attach
    pub(crate) format_output: bool,
    pub(crate) skip_inline_format: bool,
    pub(crate) auto_identification_enabled: bool,

    content_allowed: bool,
    kind: NodeKind,
    tag_name: String,
    attributes: Attributes,
}

impl ElementNode {
    pub const DEFAULT_TAG: &'static str = "div";

    pub(crate) fn element(node_id: NodeId, tag_name: String, content_allowed: bool) -> Self {
        Self {
            node_id,
            parent_id: None,
            children_ids: SmallVec::new(),
            format_output: true,
            skip_inline_format: false,
            auto_identification_enabled: false,
            content_allowed,
            kind: NodeKind::Element,
            tag_name,
            attributes: Attributes::new(),
        }
    }

    pub(crate) fn text(node_id: NodeId, text: String) -> Self {
        Self {
            kind: NodeKind::Text(text),
            ..Self::element(node_id, String::new(), false)
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Text of a text node
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element => None,
        }
    }

    /// Replace the text of a text node; ignored on elements
    pub fn set_text(&mut self, text: impl Into<String>) {
        if let NodeKind::Text(current) = &mut self.kind {
            *current = text.into();
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Whether this node may own children (otherwise it self-closes)
    pub fn is_content_allowed(&self) -> bool {
        self.content_allowed
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn children_ids(&self) -> &[NodeId] {
        &self.children_ids
    }

    pub fn format_output(&self) -> bool {
        self.format_output
    }

    pub fn skip_inline_format(&self) -> bool {
        self.skip_inline_format
    }

    /// Keep this element and its contents on one line when formatting.
    /// Local to this node, not cascaded.
    pub fn set_skip_inline_format(&mut self, skip: bool) {
        self.skip_inline_format = skip;
    }

    pub fn is_auto_identification_enabled(&self) -> bool {
        self.auto_identification_enabled
    }

    // ---- attributes ----

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<AttrValue>) {
        self.attributes.set(key, value);
    }

    /// Set from dynamic input; non-scalar values are silently ignored
    pub fn set_json(&mut self, key: &str, value: &Value) {
        self.attributes.set_json(key, value);
    }

    pub fn has(&self, key: &str) -> bool {
        self.attributes.has(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.attributes.remove(key)
    }

    /// The `id` attribute as text, `""` when unset
    ///
    /// Numeric ids are stringified. This never generates an id; see
    /// [`ElementArena::get_id`](crate::ElementArena::get_id).
    pub fn id(&self) -> Cow<'_, str> {
        match self.attributes.get("id") {
            Some(AttrValue::String(id)) => Cow::Borrowed(id),
            Some(other) => Cow::Owned(other.to_string()),
            None => Cow::Borrowed(""),
        }
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.attributes.set("id", id.into());
    }

    // ---- class list ----

    /// Raw `class` attribute, `""` when unset
    pub fn class_name(&self) -> &str {
        self.attributes.get_str("class").unwrap_or("")
    }

    pub fn classes(&self) -> Vec<String> {
        self.class_name()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    pub fn set_classes<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = classes
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.attributes.set("class", joined);
    }

    pub fn add_class(&mut self, class: &str) {
        let mut classes = self.classes();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        self.set_classes(classes);
    }

    pub fn remove_class(&mut self, class: &str) {
        let mut classes = self.classes();
        if let Some(idx) = classes.iter().position(|c| c == class) {
            classes.remove(idx);
            self.set_classes(classes);
        }
    }

    pub fn contains_class(&self, class: &str) -> bool {
        self.class_name().split_whitespace().any(|c| c == class)
    }
}
