//! Renderable subtree serialization
//!
//! Only `pure_children` are walked, so comments never appear in either
//! output.

use crate::element::Props;
use crate::error::DomResult;
use crate::tree::DomTree;
use crate::NodeId;
use serde::Serialize;
use std::fmt::Write;

/// Structured record of an element and its renderable descendants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(rename = "ref")]
    pub id: NodeId,
    #[serde(rename = "type")]
    pub tag_type: String,
    #[serde(rename = "attr")]
    pub attributes: Props,
    /// Computed style
    pub style: Props,
    #[serde(rename = "event", skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Snapshot>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Value {
        // Maps of strings to JSON values always serialize
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl DomTree {
    /// Structured snapshot of `id` and its renderable subtree
    pub fn to_snapshot(&self, id: NodeId) -> DomResult<Snapshot> {
        let el = self.element(id)?;
        let children = el
            .pure_children
            .iter()
            .map(|&child| self.to_snapshot(child))
            .collect::<DomResult<Vec<_>>>()?;
        Ok(Snapshot {
            id,
            tag_type: el.tag.clone(),
            attributes: el.attr.clone(),
            style: el.to_style(),
            events: el.event_types().map(str::to_string).collect(),
            children,
        })
    }

    /// Markup rendering: `<tag attr={..} style={..}>children</tag>`
    pub fn to_markup_string(&self, id: NodeId) -> DomResult<String> {
        let mut out = String::new();
        self.write_markup(id, &mut out)?;
        Ok(out)
    }

    fn write_markup(&self, id: NodeId, out: &mut String) -> DomResult<()> {
        let el = self.element(id)?;
        let attr = serde_json::to_string(&el.attr).unwrap_or_default();
        let style = serde_json::to_string(&el.to_style()).unwrap_or_default();
        // Writing into a String cannot fail
        let _ = write!(out, "<{} attr={} style={}>", el.tag, attr, style);
        for &child in &el.pure_children {
            self.write_markup(child, out)?;
        }
        let _ = write!(out, "</{}>", el.tag);
        Ok(())
    }
}
