//! Element properties
//!
//! Attribute, style, class style and event mutation. Setters compare with
//! the stored value so repeated writes stay quiet; see [`Notify`].

use crate::element::{DomEvent, EventHandler, Notify, Props};
use crate::error::{DomError, DomResult};
use crate::listener::Command;
use crate::tree::DomTree;
use crate::NodeId;
use serde_json::Value;
use std::rc::Rc;

/// Which property map a setter writes to
#[derive(Clone, Copy)]
enum PropMap {
    Attr,
    Style,
}

impl DomTree {
    /// Set an attribute, notifying the host per `notify`
    pub fn set_attr(&mut self, id: NodeId, key: impl Into<String>, value: Value, notify: Notify) -> DomResult<()> {
        self.set_prop(id, PropMap::Attr, key.into(), value, notify)
    }

    /// Set one inline style property, notifying the host per `notify`
    pub fn set_style(&mut self, id: NodeId, key: impl Into<String>, value: Value, notify: Notify) -> DomResult<()> {
        self.set_prop(id, PropMap::Style, key.into(), value, notify)
    }

    fn set_prop(&mut self, id: NodeId, map: PropMap, key: String, value: Value, notify: Notify) -> DomResult<()> {
        let node = self.node_mut(id)?;
        let doc = node.document;
        let el = node.as_element_mut().ok_or(DomError::NotAnElement(id))?;
        let props = match map {
            PropMap::Attr => &mut el.attr,
            PropMap::Style => &mut el.style,
        };
        if notify.skips(props.get(&key) == Some(&value)) {
            return Ok(());
        }
        props.insert(key.clone(), value.clone());
        if !notify.emits() {
            return Ok(());
        }
        self.emit(doc, move |_| {
            Ok(match map {
                PropMap::Attr => Command::SetAttr { node_ref: id, key, value },
                PropMap::Style => Command::SetStyle { node_ref: id, key, value },
            })
        })
    }

    /// Blank every class-style key without telling the host
    pub fn reset_class_style(&mut self, id: NodeId) -> DomResult<()> {
        self.element_mut(id)?.reset_class_style();
        Ok(())
    }

    /// Replace the class style and resend the full computed style.
    ///
    /// Old keys are kept with an empty value so the host drops them.
    pub fn set_class_style(&mut self, id: NodeId, class_style: Props) -> DomResult<()> {
        let node = self.node_mut(id)?;
        let doc = node.document;
        let el = node.as_element_mut().ok_or(DomError::NotAnElement(id))?;
        el.reset_class_style();
        el.class_style.extend(class_style);
        self.emit(doc, |tree| {
            Ok(Command::SetStyles {
                node_ref: id,
                styles: tree.to_style(id)?,
            })
        })
    }

    /// Computed style: class style overridden by inline style
    pub fn to_style(&self, id: NodeId) -> DomResult<Props> {
        Ok(self.element(id)?.to_style())
    }

    pub fn attr(&self, id: NodeId, key: &str) -> Option<&Value> {
        self.element(id).ok()?.attr.get(key)
    }

    pub fn style(&self, id: NodeId, key: &str) -> Option<&Value> {
        self.element(id).ok()?.style.get(key)
    }

    /// Register a handler for `event_type`. The first registration wins;
    /// remove the old handler to replace it.
    pub fn add_event<F>(&mut self, id: NodeId, event_type: impl Into<String>, handler: F) -> DomResult<()>
    where
        F: Fn(&DomEvent) -> Option<Value> + 'static,
    {
        self.add_event_handler(id, event_type.into(), Rc::new(handler))
    }

    pub fn add_event_handler(&mut self, id: NodeId, event_type: String, handler: EventHandler) -> DomResult<()> {
        let node = self.node_mut(id)?;
        let doc = node.document;
        let el = node.as_element_mut().ok_or(DomError::NotAnElement(id))?;
        if el.events.contains_key(&event_type) {
            tracing::debug!("add_event: {} already handles {}", id, event_type);
            return Ok(());
        }
        el.events.insert(event_type.clone(), handler);
        self.emit(doc, move |_| Ok(Command::AddEvent { node_ref: id, event_type }))
    }

    pub fn remove_event(&mut self, id: NodeId, event_type: &str) -> DomResult<()> {
        let node = self.node_mut(id)?;
        let doc = node.document;
        let el = node.as_element_mut().ok_or(DomError::NotAnElement(id))?;
        if el.events.shift_remove(event_type).is_none() {
            return Ok(());
        }
        let event_type = event_type.to_string();
        self.emit(doc, move |_| Ok(Command::RemoveEvent { node_ref: id, event_type }))
    }

    /// Run the handler for `event_type`, if any, and return its result.
    /// Local only; the host is never told.
    pub fn fire_event(&self, id: NodeId, event_type: &str, detail: Value) -> DomResult<Option<Value>> {
        let Some(handler) = self.element(id)?.events.get(event_type).cloned() else {
            return Ok(None);
        };
        let event = DomEvent {
            event_type: event_type.to_string(),
            target: id,
            detail,
        };
        Ok(handler(&event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_attr_updates_value() {
        let mut tree = DomTree::new();
        let el = tree.create_element("input");
        tree.set_attr(el, "value", json!("a"), Notify::IfChanged).unwrap();
        tree.set_attr(el, "value", json!("b"), Notify::Never).unwrap();

        assert_eq!(tree.attr(el, "value"), Some(&json!("b")));
        assert_eq!(tree.attr(el, "missing"), None);
    }

    #[test]
    fn test_comment_has_no_properties() {
        let mut tree = DomTree::new();
        let comment = tree.create_comment("x");
        assert_eq!(
            tree.set_style(comment, "color", json!("red"), Notify::IfChanged),
            Err(DomError::NotAnElement(comment))
        );
    }

    #[test]
    fn test_fire_event_returns_handler_result() {
        let mut tree = DomTree::new();
        let el = tree.create_element("div");
        tree.add_event(el, "click", |e: &DomEvent| Some(json!({ "got": e.detail.clone() })))
            .unwrap();

        let result = tree.fire_event(el, "click", json!(7)).unwrap();
        assert_eq!(result, Some(json!({ "got": 7 })));
        assert_eq!(tree.fire_event(el, "touch", json!(null)).unwrap(), None);
    }

    #[test]
    fn test_first_handler_wins() {
        let mut tree = DomTree::new();
        let el = tree.create_element("div");
        tree.add_event(el, "click", |_: &DomEvent| Some(json!(1))).unwrap();
        tree.add_event(el, "click", |_: &DomEvent| Some(json!(2))).unwrap();
        assert_eq!(tree.fire_event(el, "click", Value::Null).unwrap(), Some(json!(1)));

        tree.remove_event(el, "click").unwrap();
        tree.add_event(el, "click", |_: &DomEvent| Some(json!(2))).unwrap();
        assert_eq!(tree.fire_event(el, "click", Value::Null).unwrap(), Some(json!(2)));
    }

    #[test]
    fn test_set_class_style_resets_old_keys() {
        let mut tree = DomTree::new();
        let el = tree.create_element("div");
        let mut first = Props::new();
        first.insert("width".into(), json!(10));
        first.insert("color".into(), json!("red"));
        tree.set_class_style(el, first).unwrap();

        let mut second = Props::new();
        second.insert("color".into(), json!("blue"));
        tree.set_class_style(el, second).unwrap();

        let style = tree.to_style(el).unwrap();
        assert_eq!(style["width"], json!(""));
        assert_eq!(style["color"], json!("blue"));
    }
}
