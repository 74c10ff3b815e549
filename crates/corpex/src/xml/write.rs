//! XML serialization

use crate::xml::model::{Content, Document, Element};

/// Serialize a document with an XML declaration. Re-parsing the output
/// yields an equal tree.
pub fn document_to_string(doc: &Document) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_element(&doc.root, &mut out);
    out.push('\n');
    out
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);

    for (key, value) in element.attributes.iter() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            Content::Element(child) => write_element(child, out),
            Content::Text(text) => out.push_str(&escape(text)),
        }
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::xml::parser::Parser;

    #[test]
    fn test_serialize_simple() {
        let doc = Parser::new(b"<metadata><date>2019</date></metadata>")
            .parse()
            .unwrap();
        let out = document_to_string(&doc);
        assert!(out.starts_with("<?xml"));
        assert!(out.contains("<metadata><date>2019</date></metadata>"));
    }

    #[test]
    fn test_serialize_escapes() {
        let doc = Parser::new(b"<t a=\"x&amp;y\">1 &lt; 2</t>").parse().unwrap();
        let out = document_to_string(&doc);
        assert!(out.contains("a=\"x&amp;y\""));
        assert!(out.contains("1 &lt; 2"));
    }

    #[test]
    fn test_round_trip() {
        let doc = Parser::new(b"<CMD><Header Id=\"c-1\"/><Resources><Name>demo</Name></Resources></CMD>")
            .parse()
            .unwrap();
        let reparsed = Parser::new(document_to_string(&doc).as_bytes())
            .parse()
            .unwrap();
        assert_eq!(doc, reparsed);
    }
}
