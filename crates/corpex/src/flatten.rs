//! Tree flattening: dotted path/value rows and their inverse
//!
//! Paths are the dot-joined tag names from the root down to a leaf.
//! Sibling elements sharing a tag name get a 1-based positional index
//! (`w[1]`, `w[2]`); the index is present only when the name repeats.
//! Attribute rows append the attribute name as the final segment.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::xml::model::{Content, Document, Element};

/// Leaf kind of a flattened row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Leaf {
    Text,
    Attribute,
}

/// One flattened row: dotted path, leaf value, leaf kind
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathValue {
    pub path: String,
    pub value: String,
    pub leaf: Leaf,
}

/// Flatten a document into path/value rows, depth-first in document order.
pub fn flatten(doc: &Document) -> Flattener<'_> {
    flatten_with_prefix(doc, "")
}

/// Flatten with a fixed path prefix prepended to the root segment.
pub fn flatten_with_prefix<'a>(doc: &'a Document, prefix: &str) -> Flattener<'a> {
    let root_path = if prefix.is_empty() {
        doc.root.name.clone()
    } else {
        format!("{prefix}.{}", doc.root.name)
    };
    Flattener {
        stack: vec![Step::Visit(&doc.root, root_path)],
    }
}

#[derive(Debug)]
enum Step<'a> {
    Row(PathValue),
    Visit(&'a Element, String),
}

/// Lazy iterator over flattened rows
#[derive(Debug)]
pub struct Flattener<'a> {
    stack: Vec<Step<'a>>,
}

impl Iterator for Flattener<'_> {
    type Item = PathValue;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(step) = self.stack.pop() {
            match step {
                Step::Row(row) => return Some(row),
                Step::Visit(element, path) => self.expand(element, path),
            }
        }
        None
    }
}

impl<'a> Flattener<'a> {
    /// Queue an element's attribute rows, text rows and child visits.
    /// Attributes come first, then children in document order.
    fn expand(&mut self, element: &'a Element, path: String) {
        let mut steps = Vec::new();

        for (name, value) in element.attributes.iter() {
            if value.trim().is_empty() {
                continue;
            }
            steps.push(Step::Row(PathValue {
                path: format!("{path}.{name}"),
                value: value.clone(),
                leaf: Leaf::Attribute,
            }));
        }

        let mut totals: HashMap<&str, usize> = HashMap::new();
        for el in element.elements() {
            *totals.entry(el.name.as_str()).or_insert(0) += 1;
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for child in &element.children {
            match child {
                Content::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        steps.push(Step::Row(PathValue {
                            path: path.clone(),
                            value: trimmed.to_string(),
                            leaf: Leaf::Text,
                        }));
                    }
                }
                Content::Element(el) => {
                    let n = seen.entry(el.name.as_str()).or_insert(0);
                    *n += 1;
                    let repeated = totals.get(el.name.as_str()).copied().unwrap_or(0) > 1;
                    let segment = if repeated {
                        format!("{}[{}]", el.name, n)
                    } else {
                        el.name.clone()
                    };
                    steps.push(Step::Visit(el, format!("{path}.{segment}")));
                }
            }
        }

        while let Some(step) = steps.pop() {
            self.stack.push(step);
        }
    }
}

/// One parsed path segment: tag (or attribute) name plus 1-based index
#[derive(Debug)]
struct Segment<'s> {
    name: &'s str,
    index: usize,
}

fn parse_segment<'s>(raw: &'s str, full: &str) -> Result<Segment<'s>> {
    if raw.is_empty() {
        return Err(Error::missing_path(full));
    }
    let Some(open) = raw.find('[') else {
        return Ok(Segment {
            name: raw,
            index: 1,
        });
    };
    let name = raw.get(..open).unwrap_or_default();
    let index = raw
        .strip_suffix(']')
        .and_then(|s| s.get(open + 1..))
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n >= 1);
    match index {
        Some(index) if !name.is_empty() => Ok(Segment { name, index }),
        _ => Err(Error::missing_path(full)),
    }
}

fn parse_path<'s>(path: &'s str) -> Result<Vec<Segment<'s>>> {
    path.split('.').map(|raw| parse_segment(raw, path)).collect()
}

/// Walk to the `index`-th child element named `name`, appending a new one
/// when the row introduces the next occurrence in document order.
fn descend<'el>(parent: &'el mut Element, seg: &Segment<'_>, full: &str) -> Result<&'el mut Element> {
    let mut count = 0usize;
    let mut target = None;
    for (i, child) in parent.children.iter().enumerate() {
        if let Content::Element(el) = child {
            if el.name == seg.name {
                count += 1;
                if count == seg.index {
                    target = Some(i);
                    break;
                }
            }
        }
    }

    let idx = match target {
        Some(i) => i,
        None if seg.index == count + 1 => {
            parent
                .children
                .push(Content::Element(Element::new(seg.name)));
            parent.children.len() - 1
        }
        None => return Err(Error::missing_path(full)),
    };

    match parent.children.get_mut(idx) {
        Some(Content::Element(el)) => Ok(el),
        _ => Err(Error::missing_path(full)),
    }
}

/// Rebuild a document tree from flattened rows. The inverse of [`flatten`]
/// for trees without mixed content, modulo whitespace-only leaves.
pub fn nest<I>(rows: I) -> Result<Document>
where
    I: IntoIterator<Item = PathValue>,
{
    let mut root: Option<Element> = None;

    for row in rows {
        let segments = parse_path(&row.path)?;
        let elem_count = match row.leaf {
            // last segment names the attribute, not an element
            Leaf::Attribute => segments.len().saturating_sub(1),
            Leaf::Text => segments.len(),
        };

        let mut iter = segments.iter();
        let Some(first) = iter.next() else {
            return Err(Error::missing_path(&row.path));
        };
        if elem_count == 0 || first.index != 1 {
            return Err(Error::missing_path(&row.path));
        }

        match &mut root {
            Some(el) if el.name == first.name => {}
            Some(_) => return Err(Error::missing_path(&row.path)),
            None => root = Some(Element::new(first.name)),
        }
        let Some(mut cur) = root.as_mut() else {
            continue;
        };

        for seg in iter.by_ref().take(elem_count - 1) {
            cur = descend(cur, seg, &row.path)?;
        }

        match row.leaf {
            Leaf::Text => cur.children.push(Content::Text(row.value)),
            Leaf::Attribute => {
                let Some(attr) = iter.next() else {
                    return Err(Error::missing_path(&row.path));
                };
                if attr.index != 1 {
                    return Err(Error::missing_path(&row.path));
                }
                cur.attributes.insert(attr.name.to_string(), row.value);
            }
        }
    }

    match root {
        Some(root) => Ok(Document { root }),
        None => Err(Error::missing_path("(no rows)")),
    }
}

/// Resolve a dotted path to a field value: the trimmed text of the target
/// element, or the value of the named attribute when no such element exists.
pub fn field(doc: &Document, path: &str) -> Result<String> {
    let segments = parse_path(path)?;
    let mut iter = segments.iter();
    let Some(first) = iter.next() else {
        return Err(Error::missing_path(path));
    };
    if doc.root.name != first.name || first.index != 1 {
        return Err(Error::missing_path(path));
    }

    let rest: Vec<&Segment<'_>> = iter.collect();
    let mut cur = &doc.root;
    for (i, seg) in rest.iter().enumerate() {
        let last = i + 1 == rest.len();
        match cur.children_named(seg.name).nth(seg.index - 1) {
            Some(el) => cur = el,
            None if last && seg.index == 1 => {
                return cur
                    .attr(seg.name)
                    .map(str::to_string)
                    .ok_or_else(|| Error::missing_path(path));
            }
            None => return Err(Error::missing_path(path)),
        }
    }

    let text = cur.text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(Error::missing_path(path))
    } else {
        Ok(trimmed.to_string())
    }
}
