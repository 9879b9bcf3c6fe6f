//! Snapshot and markup serialization tests for fos-vdom

mod common;

use common::Fixture;
use fos_vdom::{DomEvent, DomTree, ElementProps, Notify, Props};
use serde_json::json;

#[test]
fn test_snapshot_skips_comments() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let root = tree.create_element("div");
    let a = tree.create_element("a");
    let placeholder = tree.create_comment("if");
    let b = tree.create_element("b");
    for id in [a, placeholder, b] {
        tree.append_child(root, id)?;
    }

    let snapshot = tree.to_snapshot(root)?;
    let ids: Vec<_> = snapshot.children.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![a, b]);
    assert_eq!(snapshot.children[0].tag_type, "a");
    Ok(())
}

#[test]
fn test_snapshot_json_fields() -> anyhow::Result<()> {
    let mut fx = Fixture::new();
    let button = fx.tree.create_element("button");
    fx.tree.append_child(fx.body, button)?;
    fx.tree.set_attr(button, "disabled", json!(false), Notify::IfChanged)?;
    fx.tree.add_event(button, "click", |_: &DomEvent| None)?;

    let json = fx.tree.to_snapshot(fx.body)?.to_json();
    assert_eq!(json["ref"], json!(fx.body.to_ref()));
    assert_eq!(json["type"], json!("div"));
    assert!(json.get("event").is_none());

    let child = &json["children"][0];
    assert_eq!(child["ref"], json!(button.to_ref()));
    assert_eq!(child["attr"], json!({ "disabled": false }));
    assert_eq!(child["event"], json!(["click"]));
    assert!(child.get("children").is_none());
    Ok(())
}

#[test]
fn test_snapshot_carries_computed_style() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let mut props = ElementProps::default();
    props.class_style.insert("color".into(), json!("red"));
    props.class_style.insert("margin".into(), json!(4));
    props.style.insert("color".into(), json!("green"));
    let el = tree.create_element_with_props("text", props);

    let snapshot = tree.to_snapshot(el)?;
    let mut expected = Props::new();
    expected.insert("color".into(), json!("green"));
    expected.insert("margin".into(), json!(4));
    assert_eq!(snapshot.style, expected);
    Ok(())
}

#[test]
fn test_markup_nests_renderable_children() -> anyhow::Result<()> {
    let mut tree = DomTree::new();
    let root = tree.create_element("list");
    let placeholder = tree.create_comment("for");
    let cell = tree.create_element("cell");
    let label = tree.create_element("text");
    tree.append_child(root, placeholder)?;
    tree.append_child(root, cell)?;
    tree.append_child(cell, label)?;
    tree.set_attr(label, "value", json!("hi"), Notify::IfChanged)?;

    assert_eq!(
        tree.to_markup_string(root)?,
        concat!(
            r#"<list attr={} style={}>"#,
            r#"<cell attr={} style={}><text attr={"value":"hi"} style={}></text></cell>"#,
            r#"</list>"#,
        )
    );
    Ok(())
}

#[test]
fn test_serializing_comment_fails() {
    let mut tree = DomTree::new();
    let comment = tree.create_comment("x");
    assert!(tree.to_snapshot(comment).is_err());
    assert!(tree.to_markup_string(comment).is_err());
}
