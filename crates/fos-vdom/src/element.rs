//! Element data
//!
//! Attributes, style, class style, event handlers and the two child lists
//! of a renderable node.

use crate::NodeId;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Property map (attributes, style). Iterates in insertion order.
pub type Props = IndexMap<String, Value>;

/// Event handler. Receives the event, may return a value to the dispatcher.
pub type EventHandler = Rc<dyn Fn(&DomEvent) -> Option<Value>>;

/// Event delivered to a handler by [`DomTree::fire_event`](crate::DomTree::fire_event)
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    pub event_type: String,
    /// Element the handler is registered on
    pub target: NodeId,
    pub detail: Value,
}

/// Initial property maps for a new element
#[derive(Debug, Clone, Default)]
pub struct ElementProps {
    pub attr: Props,
    pub style: Props,
    pub class_style: Props,
}

/// Host notification policy for attribute and style setters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notify {
    /// Notify unless the value is unchanged
    #[default]
    IfChanged,
    /// Write and notify even when the value is unchanged
    Always,
    /// Write a changed value without notifying
    Never,
}

impl Notify {
    /// Whether a write with this policy is skipped entirely
    pub(crate) fn skips(self, unchanged: bool) -> bool {
        unchanged && self != Notify::Always
    }

    pub(crate) fn emits(self) -> bool {
        self != Notify::Never
    }
}

/// Element-specific data
pub struct ElementData {
    pub(crate) tag: String,
    pub(crate) attr: Props,
    pub(crate) style: Props,
    /// Lower priority than `style`; replaced wholesale on class changes
    pub(crate) class_style: Props,
    pub(crate) events: IndexMap<String, EventHandler>,
    /// All direct children in document order
    pub(crate) children: Vec<NodeId>,
    /// Renderable subsequence of `children`
    pub(crate) pure_children: Vec<NodeId>,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self::with_props(tag, ElementProps::default())
    }

    pub fn with_props(tag: impl Into<String>, props: ElementProps) -> Self {
        Self {
            tag: tag.into(),
            attr: props.attr,
            style: props.style,
            class_style: props.class_style,
            events: IndexMap::new(),
            children: Vec::new(),
            pure_children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Props {
        &self.attr
    }

    pub fn style(&self) -> &Props {
        &self.style
    }

    pub fn class_style(&self) -> &Props {
        &self.class_style
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn pure_children(&self) -> &[NodeId] {
        &self.pure_children
    }

    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.events.contains_key(event_type)
    }

    /// Computed style: class style overridden by inline style
    pub fn to_style(&self) -> Props {
        let mut computed = self.class_style.clone();
        for (key, value) in &self.style {
            computed.insert(key.clone(), value.clone());
        }
        computed
    }

    /// Blank every class-style key, keeping the keys so the host clears them
    pub(crate) fn reset_class_style(&mut self) {
        for value in self.class_style.values_mut() {
            *value = Value::String(String::new());
        }
    }

    pub(crate) fn release(&mut self) {
        self.children.clear();
        self.pure_children.clear();
        self.events.clear();
        self.attr.clear();
        self.style.clear();
        self.class_style.clear();
    }
}

impl fmt::Debug for ElementData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementData")
            .field("tag", &self.tag)
            .field("attr", &self.attr)
            .field("style", &self.style)
            .field("class_style", &self.class_style)
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .field("children", &self.children)
            .field("pure_children", &self.pure_children)
            .finish()
    }
}
