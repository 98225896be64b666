//! Tests for label parsing, display, and serialisation.

use crate::{Action, ActionKind, DELTA, Label, TAU};

#[test]
fn parse_strips_broadcast_prefix() {
    let action = Action::parse("!send");
    assert_eq!(action.name, "send");
    assert_eq!(action.kind, ActionKind::Broadcast);

    let action = Action::parse("?recv");
    assert_eq!(action.name, "recv");
    assert_eq!(action.kind, ActionKind::Listen);

    let action = Action::parse("tick");
    assert_eq!(action.name, "tick");
    assert_eq!(action.kind, ActionKind::Plain);
}

#[test]
fn display_restores_prefix() {
    assert_eq!(Label::visible("!send").to_string(), "!send");
    assert_eq!(Label::visible("?recv").to_string(), "?recv");
    assert_eq!(Label::visible("tick").to_string(), "tick");
}

#[test]
fn tau_and_delta_use_greek_code_points() {
    assert_eq!(Label::Tau.to_string(), TAU);
    assert_eq!(Label::Delta.to_string(), DELTA);
    assert_eq!(TAU, "\u{3c4}");
    assert_eq!(DELTA, "\u{3b4}");
}

#[test]
fn bare_ignores_prefix_and_special_labels() {
    assert_eq!(Label::visible("!send").bare(), Some("send"));
    assert_eq!(Label::Tau.bare(), None);
    assert_eq!(Label::Delta.bare(), None);
}

#[test]
fn serialises_as_label_strings() {
    let json = serde_json::to_string(&Label::Tau).expect("serialises");
    assert_eq!(json, "\"\u{3c4}\"");

    let json = serde_json::to_string(&Label::visible("!send")).expect("serialises");
    assert_eq!(json, "\"!send\"");

    let back: Label = serde_json::from_str("\"\u{3b4}\"").expect("deserialises");
    assert_eq!(back, Label::Delta);

    let back: Label = serde_json::from_str("\"?recv\"").expect("deserialises");
    assert_eq!(back, Label::visible("?recv"));
}
