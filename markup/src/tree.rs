use crate::ast::{Attribute, Element, Node};
use crate::parse::{offset, Error};

/// Deepest element nesting we accept. The tree is built without recursion,
/// but dropping it still recurses once per level.
pub const MAX_DEPTH: usize = 1024;

/// One lexical piece of a document, as produced by the grammar.
#[derive(Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name ...>`, or `<name .../>` if `empty`.
    Start {
        name: &'a str,
        attributes: Vec<Attribute<'a>>,
        empty: bool,
    },
    /// `</name>`
    End(&'a str),
    /// Contents of `<!DOCTYPE ...>`
    Doctype(&'a str),
    /// Text, CDATA, comments and processing instructions.
    Node(Node<'a>),
}

/// Assemble tokens into the root element, using an explicit stack of open elements.
/// Also checks what the grammar can't: matching end tags, a single root,
/// unique attribute names and well-formed references in attribute values
/// (which get decoded here).
pub fn build<'a>(text: &'a str, tokens: Vec<Token<'a>>) -> Result<Element<'a>, Error> {
    let mut open: Vec<Element<'a>> = Vec::with_capacity(16);
    let mut root: Option<Element<'a>> = None;

    for token in tokens {
        match token {
            Token::Start {
                name,
                mut attributes,
                empty,
            } => {
                if root.is_some() {
                    return Err(at(text, name, "content after the root element".to_owned()));
                }
                if open.len() >= MAX_DEPTH {
                    return Err(at(
                        text,
                        name,
                        format!("elements are nested more than {MAX_DEPTH} levels deep"),
                    ));
                }
                decode(text, name, &mut attributes)?;
                let element = Element {
                    name,
                    attributes,
                    children: Vec::new(),
                    close: None,
                };
                if empty {
                    attach(&mut open, &mut root, element);
                } else {
                    open.push(element);
                }
            }
            Token::End(name) => {
                let mut element = open
                    .pop()
                    .ok_or_else(|| at(text, name, format!("unexpected end tag '</{name}>'")))?;
                if name != element.name {
                    return Err(at(
                        text,
                        name,
                        format!(
                            "end tag '</{}>' does not match start tag '<{}>'",
                            name, element.name
                        ),
                    ));
                }
                element.close = Some(name);
                attach(&mut open, &mut root, element);
            }
            Token::Doctype(decl) => {
                if root.is_some() || !open.is_empty() {
                    return Err(at(
                        text,
                        decl,
                        "DOCTYPE must come before the root element".to_owned(),
                    ));
                }
                if decl.contains('[') {
                    return Err(at(
                        text,
                        decl,
                        "internal DTD subsets are not supported".to_owned(),
                    ));
                }
            }
            Token::Node(node) => match open.last_mut() {
                Some(parent) => parent.children.push(node),
                // comments and instructions outside the root are dropped.
                None => {
                    if let Node::Text(chars) = node {
                        if !chars.trim().is_empty() {
                            return Err(at(
                                text,
                                chars,
                                "text outside the root element".to_owned(),
                            ));
                        }
                    }
                }
            },
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(Error::new(
            text,
            text.len(),
            format!("'<{}>' is never closed", unclosed.name),
        ));
    }
    root.ok_or_else(|| Error::new(text, text.len(), "no root element".to_owned()))
}

fn attach<'a>(open: &mut [Element<'a>], root: &mut Option<Element<'a>>, element: Element<'a>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn decode<'a>(text: &'a str, element: &str, attributes: &mut [Attribute<'a>]) -> Result<(), Error> {
    for i in 0..attributes.len() {
        let attr = &attributes[i];
        if attributes[..i].iter().any(|a| a.name == attr.name) {
            return Err(at(
                text,
                attr.name,
                format!("duplicate attribute '{}' on '<{}>'", attr.name, element),
            ));
        }
        let value = crate::entity::unescape(attr.raw)
            .map_err(|e| Error::new(text, offset(text, attr.raw) + e.pos, e.to_string()))?;
        attributes[i].value = value;
    }
    Ok(())
}

fn at(text: &str, slice: &str, msg: String) -> Error {
    Error::new(text, offset(text, slice), msg)
}
