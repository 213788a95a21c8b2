//! Simple in-memory tree implementing `TreeNode`, for tests, benches and
//! hosts that do not bring their own DOM.
//!
//! ```
//! use xpath_extras::simple_node::{attr, elem, text};
//! use xpath_extras::TreeNode;
//!
//! // <p><a class="foo bar">111</a></p>
//! let p = elem("p")
//!     .child(elem("a").attr(attr("class", "foo bar")).child(text("111")))
//!     .build();
//!
//! let a = p.children()[0].clone();
//! assert_eq!(a.attribute("class").as_deref(), Some("foo bar"));
//! assert_eq!(p.string_value(), "111");
//! assert_eq!(a.parent(), Some(p));
//! ```
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

use crate::model::{NodeKind, QName, TreeNode};

struct Inner {
    kind: NodeKind,
    name: Option<QName>,
    value: Option<String>,
    parent: OnceLock<Weak<Inner>>,
    attributes: Vec<SimpleNode>,
    children: Vec<SimpleNode>,
}

/// Arc-backed immutable node; equality is identity.
#[derive(Clone)]
pub struct SimpleNode(Arc<Inner>);

impl PartialEq for SimpleNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for SimpleNode {}

impl std::hash::Hash for SimpleNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Debug for SimpleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleNode")
            .field("kind", &self.0.kind)
            .field("name", &self.0.name)
            .field("value", &self.0.value)
            .finish_non_exhaustive()
    }
}

impl SimpleNode {
    fn leaf(kind: NodeKind, name: Option<QName>, value: &str) -> Self {
        SimpleNode(Arc::new(Inner {
            kind,
            name,
            value: Some(value.to_string()),
            parent: OnceLock::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }))
    }

    pub fn document() -> SimpleNodeBuilder {
        SimpleNodeBuilder::new(NodeKind::Document, None)
    }
    pub fn element(name: &str) -> SimpleNodeBuilder {
        SimpleNodeBuilder::new(NodeKind::Element, Some(QName::local(name)))
    }
    pub fn attribute(name: &str, value: &str) -> SimpleNode {
        Self::leaf(NodeKind::Attribute, Some(QName::local(name)), value)
    }
    pub fn text(value: &str) -> SimpleNode {
        Self::leaf(NodeKind::Text, None, value)
    }
    pub fn comment(value: &str) -> SimpleNode {
        Self::leaf(NodeKind::Comment, None, value)
    }

    /// All descendants in document order, excluding attributes and `self`.
    pub fn descendants(&self) -> Vec<SimpleNode> {
        fn walk(n: &SimpleNode, out: &mut Vec<SimpleNode>) {
            for c in &n.0.children {
                out.push(c.clone());
                walk(c, out);
            }
        }
        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    /// Descendant elements with the given local name, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<SimpleNode> {
        self.descendants()
            .into_iter()
            .filter(|n| crate::model::is_element_named(n, tag))
            .collect()
    }

    fn adopt(&self, node: &SimpleNode) {
        // A node built once is attached once; a second parent is ignored.
        let _ = node.0.parent.set(Arc::downgrade(&self.0));
    }
}

pub struct SimpleNodeBuilder {
    kind: NodeKind,
    name: Option<QName>,
    attributes: Vec<SimpleNode>,
    children: Vec<SimpleNode>,
}

impl SimpleNodeBuilder {
    fn new(kind: NodeKind, name: Option<QName>) -> Self {
        Self {
            kind,
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<SimpleNodeOrBuilder>) -> Self {
        self.children.push(child.into().into_node());
        self
    }

    #[must_use]
    pub fn children<I, C>(mut self, it: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<SimpleNodeOrBuilder>,
    {
        self.children
            .extend(it.into_iter().map(|c| c.into().into_node()));
        self
    }

    #[must_use]
    pub fn attr(mut self, attr: SimpleNode) -> Self {
        debug_assert!(attr.kind() == NodeKind::Attribute);
        self.attributes.push(attr);
        self
    }

    pub fn build(self) -> SimpleNode {
        let node = SimpleNode(Arc::new(Inner {
            kind: self.kind,
            name: self.name,
            value: None,
            parent: OnceLock::new(),
            attributes: self.attributes,
            children: self.children,
        }));
        for a in &node.0.attributes {
            node.adopt(a);
        }
        for c in &node.0.children {
            node.adopt(c);
        }
        node
    }
}

pub enum SimpleNodeOrBuilder {
    Built(SimpleNode),
    Builder(SimpleNodeBuilder),
}

impl SimpleNodeOrBuilder {
    fn into_node(self) -> SimpleNode {
        match self {
            SimpleNodeOrBuilder::Built(n) => n,
            SimpleNodeOrBuilder::Builder(b) => b.build(),
        }
    }
}

impl From<SimpleNode> for SimpleNodeOrBuilder {
    fn from(n: SimpleNode) -> Self {
        SimpleNodeOrBuilder::Built(n)
    }
}
impl From<SimpleNodeBuilder> for SimpleNodeOrBuilder {
    fn from(b: SimpleNodeBuilder) -> Self {
        SimpleNodeOrBuilder::Builder(b)
    }
}

pub fn elem(name: &str) -> SimpleNodeBuilder {
    SimpleNode::element(name)
}
pub fn text(v: &str) -> SimpleNode {
    SimpleNode::text(v)
}
pub fn attr(name: &str, v: &str) -> SimpleNode {
    SimpleNode::attribute(name, v)
}
pub fn comment(v: &str) -> SimpleNode {
    SimpleNode::comment(v)
}
pub fn doc() -> SimpleNodeBuilder {
    SimpleNode::document()
}

impl TreeNode for SimpleNode {
    fn kind(&self) -> NodeKind {
        self.0.kind
    }
    fn name(&self) -> Option<QName> {
        self.0.name.clone()
    }
    fn string_value(&self) -> String {
        match self.0.kind {
            NodeKind::Text | NodeKind::Attribute | NodeKind::Comment => {
                self.0.value.clone().unwrap_or_default()
            }
            NodeKind::Element | NodeKind::Document => {
                fn dfs(n: &SimpleNode, out: &mut String) {
                    for c in &n.0.children {
                        match c.0.kind {
                            NodeKind::Text => out.push_str(c.0.value.as_deref().unwrap_or("")),
                            NodeKind::Element => dfs(c, out),
                            _ => {}
                        }
                    }
                }
                let mut out = String::new();
                dfs(self, &mut out);
                out
            }
        }
    }
    fn parent(&self) -> Option<Self> {
        self.0.parent.get().and_then(Weak::upgrade).map(SimpleNode)
    }
    fn children(&self) -> Vec<Self> {
        self.0.children.clone()
    }
    fn attributes(&self) -> Vec<Self> {
        self.0.attributes.clone()
    }
}
