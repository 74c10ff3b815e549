//! Document tree model shared by all corpus dialects

use indexmap::IndexMap;

/// A parsed XML document. Read-only after parse.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Element,
}

/// An element node: tag name, ordered attributes, ordered children.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// Child content of an element
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First child element with the given tag name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|el| el.name == name)
    }

    /// First child element with the given tag name, mutable
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|child| match child {
            Content::Element(el) if el.name == name => Some(el),
            _ => None,
        })
    }

    /// Child elements with the given tag name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |el| el.name == name)
    }

    /// All child elements, in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(el) => Some(el),
            Content::Text(_) => None,
        })
    }

    /// Direct text content, concatenated in document order
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let Content::Text(text) = child {
                out.push_str(text);
            }
        }
        out
    }

    /// All text content in the subtree, space-joined in document order
    pub fn deep_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, parts: &mut Vec<String>) {
        for child in &self.children {
            match child {
                Content::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        parts.push(trimmed.to_string());
                    }
                }
                Content::Element(el) => el.collect_text(parts),
            }
        }
    }

    /// Pre-order walk over this element and every element below it
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Replace the text of the named child element, creating the child if absent
    pub fn upsert_child_text(&mut self, name: &str, value: &str) {
        for child in &mut self.children {
            if let Content::Element(el) = child {
                if el.name == name {
                    el.children = vec![Content::Text(value.to_string())];
                    return;
                }
            }
        }
        let mut el = Element::new(name);
        el.children.push(Content::Text(value.to_string()));
        self.children.push(Content::Element(el));
    }
}

/// Iterator over an element subtree in document order (pre-order)
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let el = self.stack.pop()?;
        for child in el.children.iter().rev() {
            if let Content::Element(nested) = child {
                self.stack.push(nested);
            }
        }
        Some(el)
    }
}
