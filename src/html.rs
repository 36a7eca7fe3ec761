use crate::error::ConvertError;

/// Ordered attribute list. Serialised in insertion order.
pub type Attrs = Vec<(String, String)>;

/// A renderable HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

/// Text content, optionally wrapped in a tag.
///
/// A leaf without a tag renders as its raw value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeafNode {
    pub tag: Option<String>,
    pub value: Option<String>,
    pub attrs: Attrs,
}

/// A tagged element whose content is its children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParentNode {
    pub tag: Option<String>,
    pub children: Vec<HtmlNode>,
    pub attrs: Attrs,
}

impl LeafNode {
    /// Untagged text passthrough.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            tag: None,
            value: Some(value.into()),
            attrs: Vec::new(),
        }
    }

    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attrs: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn render(&self) -> Result<String, ConvertError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), ConvertError> {
        let value = self.value.as_deref().ok_or(ConvertError::MissingValue)?;
        match &self.tag {
            None => out.push_str(value),
            Some(tag) => {
                open_tag(tag, &self.attrs, out);
                out.push_str(value);
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

impl ParentNode {
    pub fn new(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self {
            tag: Some(tag.into()),
            children,
            attrs: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn render(&self) -> Result<String, ConvertError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), ConvertError> {
        let tag = self.tag.as_deref().ok_or(ConvertError::MissingTag)?;
        if self.children.is_empty() {
            return Err(ConvertError::EmptyParent {
                tag: tag.to_string(),
            });
        }
        open_tag(tag, &self.attrs, out);
        for child in &self.children {
            child.write_html(out)?;
        }
        close_tag(tag, out);
        Ok(())
    }
}

impl HtmlNode {
    /// Serialise the tree to an HTML string.
    ///
    /// Fails on the first leaf without a value or parent without a tag or
    /// children, in document order.
    pub fn render(&self) -> Result<String, ConvertError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), ConvertError> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.write_html(out),
            HtmlNode::Parent(parent) => parent.write_html(out),
        }
    }
}

impl From<LeafNode> for HtmlNode {
    fn from(leaf: LeafNode) -> Self {
        HtmlNode::Leaf(leaf)
    }
}

impl From<ParentNode> for HtmlNode {
    fn from(parent: ParentNode) -> Self {
        HtmlNode::Parent(parent)
    }
}

/// Attribute values are emitted verbatim; quotes are not escaped.
pub fn attrs_to_html(attrs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out
}

fn open_tag(tag: &str, attrs: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push_str(&attrs_to_html(attrs));
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
