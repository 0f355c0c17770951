use std::borrow::Cow;

/// A parsed document. Everything outside the root element
/// (declaration, doctype, comments) is discarded.
#[derive(Debug, PartialEq, Eq)]
pub struct Document<'a> {
    pub root: Element<'a>,
}

/// One `name="value"` pair from a start tag.
#[derive(Debug, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name
    pub name: &'a str,
    /// Value exactly as written between the quotes.
    pub raw: &'a str,
    /// Value with entity and character references decoded.
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    /// Create an attribute whose decoded value is not yet known.
    pub(crate) fn undecoded(name: &'a str, raw: &'a str) -> Self {
        Self {
            name,
            raw,
            value: Cow::Borrowed(raw),
        }
    }
}

/// Anything that can appear between a start tag and its end tag.
#[derive(Debug, PartialEq, Eq)]
pub enum Node<'a> {
    /// A nested element.
    Element(Element<'a>),
    /// Character data, including the contents of CDATA sections.
    Text(&'a str),
    /// `<!-- ... -->`
    Comment(&'a str),
    /// `<? ... ?>`
    Instruction(&'a str),
}

/// An element with its attributes and children, in document order.
#[derive(Debug, PartialEq, Eq)]
pub struct Element<'a> {
    /// Tag name
    pub name: &'a str,
    /// Attributes in the order they were written.
    pub attributes: Vec<Attribute<'a>>,
    /// Child nodes in the order they were written.
    pub children: Vec<Node<'a>>,
    /// Name given in the end tag, `None` if the element was self-closing.
    pub close: Option<&'a str>,
}

impl<'a> Element<'a> {
    /// Decoded value of the attribute called `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_ref())
    }

    /// Child elements in document order, skipping text, comments etc.
    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element<'a>> + '_ {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Every element called `name` in this subtree, in pre-order, starting with `self`.
    /// The children of a matching element are not searched.
    pub fn find_all(&self, name: &str) -> Vec<&Element<'a>> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            if element.name == name {
                found.push(element);
            } else {
                // reversed so that children are popped in document order:
                stack.extend(element.child_elements().rev());
            }
        }
        found
    }
}
