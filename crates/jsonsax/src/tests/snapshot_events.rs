//! Snapshot tests pinning the exact event sequence for small documents.

use alloc::{string::String, vec::Vec};
use core::fmt::Write;

use insta::{assert_snapshot, assert_yaml_snapshot};

use crate::{ParseEvent, ParserOptions, SaxParser, Scalar};

fn events(json: &str) -> Vec<ParseEvent> {
    let mut parser = SaxParser::new(ParserOptions::default(), Vec::new());
    parser
        .write(json)
        .and_then(|p| p.end())
        .expect("parser should not error on valid input");
    parser.into_handler()
}

/// One line per event, indented by nesting depth.
fn render(events: &[ParseEvent]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    for event in events {
        if matches!(event, ParseEvent::CloseObject | ParseEvent::CloseArray) {
            depth -= 1;
        }
        let indent = depth * 2;
        let _ = match event {
            ParseEvent::Value(Scalar::String(s)) => writeln!(out, "{:indent$}string {s:?}", ""),
            ParseEvent::Value(Scalar::Number(n)) => writeln!(out, "{:indent$}number {n}", ""),
            ParseEvent::Value(Scalar::Boolean(b)) => writeln!(out, "{:indent$}boolean {b}", ""),
            ParseEvent::Value(Scalar::Null) => writeln!(out, "{:indent$}null", ""),
            ParseEvent::Key(k) => writeln!(out, "{:indent$}key {k:?}", ""),
            other => writeln!(out, "{:indent$}{other:?}", ""),
        };
        if matches!(event, ParseEvent::OpenObject | ParseEvent::OpenArray) {
            depth += 1;
        }
    }
    out
}

#[test]
fn snapshot_small_document() {
    let events = events(r#"{"ok": true, "tags": ["a"]}"#);

    assert_yaml_snapshot!(events, @r"
    - kind: Ready
    - kind: OpenObject
    - kind: Key
      data: ok
    - kind: Value
      data:
        Boolean: true
    - kind: Key
      data: tags
    - kind: OpenArray
    - kind: Value
      data:
        String: a
    - kind: CloseArray
    - kind: CloseObject
    - kind: End
    - kind: Ready
    ");
}

#[test]
fn snapshot_complex_document() {
    let json = r#"{
        "users": [
            {"id": 1, "name": "Ada", "admin": true},
            {"id": 2, "name": "Grace H.", "admin": false, "manager": null}
        ],
        "meta": {"count": 2, "ratio": -0.5e1}
    }"#;

    assert_snapshot!(render(&events(json)), @r#"
    Ready
    OpenObject
      key "users"
      OpenArray
        OpenObject
          key "id"
          number 1
          key "name"
          string "Ada"
          key "admin"
          boolean true
        CloseObject
        OpenObject
          key "id"
          number 2
          key "name"
          string "Grace H."
          key "admin"
          boolean false
          key "manager"
          null
        CloseObject
      CloseArray
      key "meta"
      OpenObject
        key "count"
        number 2
        key "ratio"
        number -5
      CloseObject
    CloseObject
    End
    Ready
    "#);
}
