//! Capabilities this crate needs from the host document tree.
//!
//! The host evaluator owns the tree; extension functions only ever hold cheap
//! handles (`Clone`) to nodes that the evaluator passed in.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
    Text,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }
}

pub trait TreeNode: Clone + Eq + core::fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> NodeKind;
    fn name(&self) -> Option<QName>;
    /// XPath string value: own text for leaves, concatenated descendant text
    /// for elements and documents.
    fn string_value(&self) -> String;

    fn parent(&self) -> Option<Self>;
    fn children(&self) -> Vec<Self>;
    fn attributes(&self) -> Vec<Self>;

    /// Value of the attribute with the given local name, if present.
    fn attribute(&self, local: &str) -> Option<String> {
        self.attributes()
            .into_iter()
            .find(|a| a.name().is_some_and(|q| q.local == local))
            .map(|a| a.string_value())
    }

    /// Local tag name for elements, `None` for every other kind.
    fn tag_name(&self) -> Option<String> {
        match self.kind() {
            NodeKind::Element => self.name().map(|q| q.local),
            _ => None,
        }
    }

    /// Element children only, in document order.
    fn child_elements(&self) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|c| c.kind() == NodeKind::Element)
            .collect()
    }
}

/// True when `node` is an element whose local name equals `tag`, ignoring
/// ASCII case.
pub(crate) fn is_element_named<N: TreeNode>(node: &N, tag: &str) -> bool {
    node.tag_name()
        .is_some_and(|name| name.eq_ignore_ascii_case(tag))
}
