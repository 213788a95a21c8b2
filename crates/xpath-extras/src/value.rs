//! The host evaluator's four-kind value model and its native scalar casts.
use core::fmt;

use crate::model::TreeNode;
use crate::signature::ParamType;

/// One member of a node-set. Hosts may deliver plain text (e.g. the result
/// of `text()` or `@attr` in some evaluators) where a node handle would go.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeItem<N> {
    Node(N),
    Text(String),
}

impl<N: TreeNode> NodeItem<N> {
    pub fn string_value(&self) -> String {
        match self {
            NodeItem::Node(n) => n.string_value(),
            NodeItem::Text(s) => s.clone(),
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeItem::Node(n) => Some(n),
            NodeItem::Text(_) => None,
        }
    }
}

/// Ordered as delivered by the evaluator; never re-sorted here.
pub type NodeSet<N> = Vec<NodeItem<N>>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value<N> {
    Boolean(bool),
    Number(f64),
    String(String),
    NodeSet(NodeSet<N>),
}

impl<N> Value<N> {
    pub fn param_type(&self) -> ParamType {
        match self {
            Value::Boolean(_) => ParamType::Boolean,
            Value::Number(_) => ParamType::Number,
            Value::String(_) => ParamType::String,
            Value::NodeSet(_) => ParamType::NodeSet,
        }
    }

    pub fn nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        Value::NodeSet(nodes.into_iter().map(NodeItem::Node).collect())
    }

    pub fn texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Value::NodeSet(
            texts
                .into_iter()
                .map(|s| NodeItem::Text(s.into()))
                .collect(),
        )
    }
}

impl<N> From<bool> for Value<N> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
impl<N> From<f64> for Value<N> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}
impl<N> From<String> for Value<N> {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
impl<N> From<&str> for Value<N> {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
impl<N> From<NodeSet<N>> for Value<N> {
    fn from(set: NodeSet<N>) -> Self {
        Value::NodeSet(set)
    }
}

impl<N> fmt::Display for Value<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => f.write_str(boolean_to_string(*b)),
            Value::Number(n) => f.write_str(&number_to_string(*n)),
            Value::String(s) => f.write_str(s),
            Value::NodeSet(set) => write!(f, "<node-set of {}>", set.len()),
        }
    }
}

// Native casts between scalar kinds (XPath 1.0 boolean(), number(), string()).

pub fn number_to_boolean(n: f64) -> bool {
    n != 0.0 && !n.is_nan()
}

pub fn string_to_boolean(s: &str) -> bool {
    !s.is_empty()
}

pub fn boolean_to_number(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// `number()` on a string: optional XML whitespace around an optional minus
/// sign and a plain decimal literal. No exponent, no `+`, no `Infinity`.
pub fn string_to_number(s: &str) -> f64 {
    let t = s.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r'));
    let body = t.strip_prefix('-').unwrap_or(t);
    let (int, frac) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    let digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    let valid = digits(int)
        && frac.is_none_or(digits)
        && (!int.is_empty() || frac.is_some_and(|f| !f.is_empty()));
    if !valid {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn boolean_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// `string()` on a number.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        // f64's Display is shortest-roundtrip and never uses an exponent.
        n.to_string()
    }
}
