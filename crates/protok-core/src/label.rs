//! Edge labels: the hidden action τ, the deadlock marker δ, and visible
//! actions with their broadcast/listen flags.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialised form of the hidden action (U+03C4).
pub const TAU: &str = "\u{3c4}";

/// Serialised form of the deadlock marker (U+03B4).
pub const DELTA: &str = "\u{3b4}";

/// How a visible action participates in broadcast communication.
///
/// The `!`/`?` prefix is stripped from the action name at parse time and
/// kept here as a flag, so hiding and synchronisation can compare bare
/// names while serialisation restores the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ActionKind {
    #[default]
    Plain,
    /// `!a` — broadcasting action.
    Broadcast,
    /// `?a` — listening action.
    Listen,
}

impl ActionKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ActionKind::Plain => "",
            ActionKind::Broadcast => "!",
            ActionKind::Listen => "?",
        }
    }
}

/// A user-visible action: bare name plus broadcast/listen flag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Action {
    pub name: String,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ActionKind::Plain,
        }
    }

    pub fn with_kind(name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Parses a source form, stripping a leading `!` or `?` into the kind.
    pub fn parse(text: &str) -> Self {
        if let Some(rest) = text.strip_prefix('!') {
            Self::with_kind(rest, ActionKind::Broadcast)
        } else if let Some(rest) = text.strip_prefix('?') {
            Self::with_kind(rest, ActionKind::Listen)
        } else {
            Self::new(text)
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.name)
    }
}

/// An edge label.
///
/// τ and δ are tagged cases of their own rather than magic strings; only
/// the serialised form uses the Greek code points.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// Hidden action τ.
    Tau,
    /// Deadlock marker δ.
    Delta,
    /// A visible action.
    Visible(Action),
}

impl Label {
    /// Builds a visible label from its source form (`!`/`?` prefix allowed).
    pub fn visible(text: &str) -> Self {
        Label::Visible(Action::parse(text))
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Label::Tau)
    }

    pub fn is_deadlock(&self) -> bool {
        matches!(self, Label::Delta)
    }

    /// Bare action name used for hiding and synchronisation; `None` for τ/δ.
    pub fn bare(&self) -> Option<&str> {
        match self {
            Label::Visible(action) => Some(&action.name),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Tau => f.write_str(TAU),
            Label::Delta => f.write_str(DELTA),
            Label::Visible(action) => action.fmt(f),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(match text.as_str() {
            TAU => Label::Tau,
            DELTA => Label::Delta,
            _ => Label::Visible(Action::parse(&text)),
        })
    }
}
