use std::borrow::Cow;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::diagnostic::Diagnostic;
use crate::tag::NodeKind;

/// Handle of a node inside the [`Document`] that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The document root.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Positional attribute values of a tag.
///
/// `[upload=jpg,1]` holds `jpg` and `1`. Values are looked up by the keys consumers are used to:
/// `"default"` for the first value, then `"1"`, `"2"`... for the following ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<String>);

impl Attributes {
    /// Key of the first value.
    pub const DEFAULT_KEY: &'static str = "default";

    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub(crate) fn push(&mut self, value: String) {
        self.0.push(value);
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        Self::index_of(key)
            .and_then(|x| self.0.get(x))
            .map(String::as_str)
    }

    /// Get the value stored under `key`, or `default` if there is none.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// All values in source order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Pairs of lookup key and value in source order.
    pub fn iter(&self) -> impl Iterator<Item = (Cow<'static, str>, &str)> {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, value)| (Self::key_of(idx), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn key_of(index: usize) -> Cow<'static, str> {
        if index == 0 {
            Cow::Borrowed(Self::DEFAULT_KEY)
        } else {
            Cow::Owned(index.to_string())
        }
    }

    /// Only the exact spelling of a key matches: `"01"` and `"0"` are not keys.
    fn index_of(key: &str) -> Option<usize> {
        if key == Self::DEFAULT_KEY {
            return Some(0);
        }
        key.parse::<usize>()
            .ok()
            .filter(|x| *x > 0 && x.to_string() == key)
    }
}

impl Serialize for Attributes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_ref(), value)?;
        }
        map.end()
    }
}

/// Data of a tag node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagData {
    /// Tag name as written in source, e.g. `B` or `ac01`.
    pub name: String,

    pub attributes: Attributes,
}

/// Data of a latex node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatexData {
    /// Expression between the delimiters.
    pub expression: String,

    /// `$$...$$` is a block, `$...$` is inline.
    pub is_block: bool,
}

/// Payload of a node, by shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Text(String),
    Tag(TagData),
    Latex(LatexData),
}

/// A node stored in a [`Document`].
#[derive(Clone, Debug)]
pub(crate) struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,

    /// Source position of the token starting this node.
    position: Option<usize>,
}

impl Node {
    fn new(kind: NodeKind, data: NodeData, position: Option<usize>) -> Self {
        Self {
            kind,
            parent: None,
            children: vec![],
            data,
            position,
        }
    }

    pub(crate) fn text(content: String, position: Option<usize>) -> Self {
        Self::new(NodeKind::Text, NodeData::Text(content), position)
    }

    pub(crate) fn latex(expression: String, is_block: bool, position: Option<usize>) -> Self {
        Self::new(
            NodeKind::Latex,
            NodeData::Latex(LatexData {
                expression,
                is_block,
            }),
            position,
        )
    }

    pub(crate) fn tag(
        kind: NodeKind,
        name: String,
        attributes: Attributes,
        position: Option<usize>,
    ) -> Self {
        Self::new(kind, NodeData::Tag(TagData { name, attributes }), position)
    }

    pub(crate) fn kind(&self) -> NodeKind {
        self.kind
    }

    pub(crate) fn position(&self) -> Option<usize> {
        self.position
    }

    /// Tag nodes open a content region unless their kind is self-closing.
    pub(crate) fn opens_region(&self) -> bool {
        matches!(self.data, NodeData::Tag(_)) && !self.kind.is_self_closing()
    }
}

/// A parsed ubb document.
///
/// Owns every node of the tree. Nodes are appended while parsing and never change afterwards,
/// read them through [`NodeRef`].
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, NodeData::Document, Some(0))],
            diagnostics: vec![],
        }
    }

    /// Attach `node` as the last child of `parent`.
    pub(crate) fn append(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        debug_assert!(!self.nodes[parent.0].kind.is_self_closing());
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            document: self,
            id: NodeId::ROOT,
        }
    }

    /// Get the node by handle.
    ///
    /// Only checks the handle is in range: a handle from another document may resolve to an
    /// unrelated node here.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { document: self, id })
    }

    /// Count of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Recoveries made while parsing, in the order they happened.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("root", &self.root())?;
        map.serialize_entry("diagnostics", &self.diagnostics)?;
        map.end()
    }
}

/// Read-only view of one node in a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        self.document.node(self.id)
    }

    fn with_id(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef {
            document: self.document,
            id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.node().kind
    }

    pub fn data(&self) -> &'a NodeData {
        &self.node().data
    }

    /// Character offset in source where this node starts, if known.
    pub fn position(&self) -> Option<usize> {
        self.node().position
    }

    /// `None` only for the root.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|x| self.with_id(x))
    }

    /// Children in source order.
    pub fn children(
        &self,
    ) -> impl ExactSizeIterator<Item = NodeRef<'a>> + DoubleEndedIterator + 'a {
        let document = self.document;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { document, id })
    }

    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        self.node().children.get(index).map(|&x| self.with_id(x))
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    /// All nodes below this one, depth-first, children in order.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants {
            document: self.document,
            stack: self.node().children.iter().rev().copied().collect(),
        }
    }

    /// Count of ancestors, 0 for the root.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), |x| x.parent()).count()
    }

    /// Content of a text node.
    pub fn as_text(&self) -> Option<&'a str> {
        match self.data() {
            NodeData::Text(content) => Some(content.as_str()),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&'a TagData> {
        match self.data() {
            NodeData::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn as_latex(&self) -> Option<&'a LatexData> {
        match self.data() {
            NodeData::Latex(latex) => Some(latex),
            _ => None,
        }
    }

    /// Tag name as written in source, for tag nodes.
    pub fn tag_name(&self) -> Option<&'a str> {
        self.as_tag().map(|x| x.name.as_str())
    }

    pub fn attributes(&self) -> Option<&'a Attributes> {
        self.as_tag().map(|x| &x.attributes)
    }

    /// Attribute of a tag node, see [`Attributes::get`].
    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.attributes().and_then(|x| x.get(key))
    }

    pub fn attribute_or(&self, key: &str, default: &'a str) -> &'a str {
        self.attribute(key).unwrap_or(default)
    }

    /// Concatenated content of all text nodes in this subtree.
    pub fn text_content(&self) -> String {
        std::iter::once(*self)
            .chain(self.descendants())
            .filter_map(|x| x.as_text())
            .collect()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("data", self.data())
            .field("children", &self.child_count())
            .finish()
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind())?;
        match self.data() {
            NodeData::Document => {}
            NodeData::Text(content) => map.serialize_entry("content", content)?,
            NodeData::Tag(tag) => {
                map.serialize_entry("name", &tag.name)?;
                if !tag.attributes.is_empty() {
                    map.serialize_entry("attributes", &tag.attributes)?;
                }
            }
            NodeData::Latex(latex) => {
                map.serialize_entry("expression", &latex.expression)?;
                map.serialize_entry("block", &latex.is_block)?;
            }
        }
        if self.node().opens_region() || self.kind() == NodeKind::Document {
            map.serialize_entry("children", &Children(*self))?;
        }
        map.end()
    }
}

struct Children<'a>(NodeRef<'a>);

impl Serialize for Children<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.child_count()))?;
        for child in self.0.children() {
            seq.serialize_element(&child)?;
        }
        seq.end()
    }
}

/// Depth-first iterator over a subtree, see [`NodeRef::descendants`].
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.document.node(id);
        self.stack.extend(node.children.iter().rev().copied());
        Some(NodeRef {
            document: self.document,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        // [quote=alice]hi[b]there[/b][hr]$x$
        let mut doc = Document::new();
        let quote = doc.append(
            NodeId::ROOT,
            Node::tag(
                NodeKind::Quote,
                "quote".into(),
                Attributes::new(vec!["alice".into()]),
                Some(0),
            ),
        );
        doc.append(quote, Node::text("hi".into(), Some(13)));
        let bold = doc.append(
            quote,
            Node::tag(NodeKind::Bold, "b".into(), Attributes::default(), Some(15)),
        );
        doc.append(bold, Node::text("there".into(), Some(18)));
        doc.append(
            quote,
            Node::tag(NodeKind::Divider, "hr".into(), Attributes::default(), Some(27)),
        );
        doc.append(quote, Node::latex("x".into(), false, Some(31)));
        doc
    }

    #[test]
    fn attribute_keys() {
        let attrs = Attributes::new(vec!["jpg".into(), "1".into(), "x".into()]);
        assert_eq!(Some("jpg"), attrs.get("default"));
        assert_eq!(Some("1"), attrs.get("1"));
        assert_eq!(Some("x"), attrs.get("2"));
        assert_eq!(None, attrs.get("3"));
        assert_eq!(None, attrs.get("0"));
        assert_eq!(None, attrs.get("01"));
        assert_eq!(None, attrs.get("Default"));
        assert_eq!("fallback", attrs.get_or("size", "fallback"));
        let pairs = attrs
            .iter()
            .map(|(k, v)| (k.into_owned(), v))
            .collect::<Vec<_>>();
        assert_eq!(
            vec![
                ("default".to_string(), "jpg"),
                ("1".to_string(), "1"),
                ("2".to_string(), "x")
            ],
            pairs
        );
    }

    #[test]
    fn parent_links_and_order() {
        let doc = sample();
        let root = doc.root();
        assert_eq!(None, root.parent());
        assert_eq!(NodeKind::Document, root.kind());

        let quote = root.child(0).unwrap();
        assert_eq!(Some(root), quote.parent());
        assert_eq!(Some("alice"), quote.attribute("default"));
        assert_eq!(
            vec![
                NodeKind::Text,
                NodeKind::Bold,
                NodeKind::Divider,
                NodeKind::Latex
            ],
            quote.children().map(|x| x.kind()).collect::<Vec<_>>()
        );
        for child in quote.children() {
            assert_eq!(Some(quote), child.parent());
        }
        assert_eq!(2, quote.child(1).unwrap().child(0).unwrap().depth());
    }

    #[test]
    fn descendants_are_preorder() {
        let doc = sample();
        let kinds = doc.root().descendants().map(|x| x.kind()).collect::<Vec<_>>();
        assert_eq!(
            vec![
                NodeKind::Quote,
                NodeKind::Text,
                NodeKind::Bold,
                NodeKind::Text,
                NodeKind::Divider,
                NodeKind::Latex
            ],
            kinds
        );
        assert_eq!(doc.node_count() - 1, doc.root().descendants().count());
    }

    #[test]
    fn text_content_skips_latex() {
        let doc = sample();
        assert_eq!("hithere", doc.root().text_content());
    }

    #[test]
    fn get_checks_range() {
        let doc = sample();
        assert!(doc.get(NodeId::ROOT).is_some());
        assert!(doc.get(NodeId(doc.node_count())).is_none());
    }
}
