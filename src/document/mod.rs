//! Mutable HTML document model
//!
//! Pages are parsed into an owned `html5ever` tree so that individual
//! attributes can be rewritten in place and the whole document serialized
//! back to HTML. Nothing outside the attributes explicitly written through
//! [`Element::set_attr`] is modified.
//!
//! The tree is `Rc`-based: a `Document` and its `Element`s stay on the task
//! that parsed them.

use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::fmt;

/// A parsed HTML document
pub struct Document {
    dom: RcDom,
}

/// A handle to one element inside a [`Document`]
///
/// Cloning the handle does not clone the element; writes through any clone
/// are visible in the owning document.
#[derive(Clone)]
pub struct Element {
    handle: Handle,
}

impl Document {
    /// Parses HTML text into a document
    ///
    /// Parsing never fails: malformed markup is repaired the way a browser
    /// would repair it.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        Self { dom }
    }

    /// Returns every element matching `predicate`, in document order
    pub fn select_by<F>(&self, predicate: F) -> Vec<Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut matches = Vec::new();
        let mut stack = vec![self.dom.document.clone()];

        while let Some(node) = stack.pop() {
            if let NodeData::Element { .. } = node.data {
                let element = Element {
                    handle: node.clone(),
                };
                if predicate(&element) {
                    matches.push(element);
                }
            }

            // Reverse so the first child is popped first
            let children = node.children.borrow();
            stack.extend(children.iter().rev().cloned());
        }

        matches
    }

    /// Returns every `<tag>` element that carries the attribute `attr`
    pub fn select(&self, tag: &str, attr: &str) -> Vec<Element> {
        self.select_by(|element| element.tag() == tag && element.has_attr(attr))
    }

    /// Serializes the whole document back to HTML text
    pub fn to_html(&self) -> std::io::Result<String> {
        let mut buffer = Vec::new();
        let document: SerializableHandle = self.dom.document.clone().into();
        serialize(&mut buffer, &document, SerializeOpts::default())?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

impl Element {
    /// Lowercase local tag name (`img`, `link`, ...)
    pub fn tag(&self) -> &str {
        match &self.handle.data {
            NodeData::Element { name, .. } => &*name.local,
            _ => "",
        }
    }

    /// Returns the value of attribute `name`, if present
    pub fn attr(&self, name: &str) -> Option<String> {
        match &self.handle.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|attr| &*attr.name.local == name)
                .map(|attr| attr.value.to_string()),
            _ => None,
        }
    }

    /// Returns true if the element carries attribute `name`
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Returns true if the space-separated token list in `name` contains
    /// `token` (ASCII case-insensitive), as for `rel="icon shortcut"`
    pub fn attr_has_token(&self, name: &str, token: &str) -> bool {
        self.attr(name).map_or(false, |value| {
            value
                .split_ascii_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
    }

    /// Overwrites the value of an existing attribute
    ///
    /// Returns false, leaving the element untouched, if the attribute is absent.
    pub fn set_attr(&self, name: &str, value: &str) -> bool {
        match &self.handle.data {
            NodeData::Element { attrs, .. } => {
                let mut attrs = attrs.borrow_mut();
                match attrs.iter_mut().find(|attr| &*attr.name.local == name) {
                    Some(attr) => {
                        attr.value = StrTendril::from_slice(value);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element").field("tag", &self.tag()).finish()
    }
}
