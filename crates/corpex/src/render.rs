//! Single-document conversion front door

use tracing::debug;

use crate::dialect::Dialect;
use crate::error::Result;
use crate::flatten::{flatten, flatten_with_prefix};
use crate::sentence::{sentences, CleanConfig};
use crate::table::{csv_string, text_string};
use crate::xml::model::{Content, Document, Element};
use crate::xml::write::document_to_string;

/// Output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Target {
    /// Path/value rows with a source-file column
    Csv,
    /// One cleaned sentence per line
    Text,
    /// Re-serialized XML, optionally stamped
    Xml,
}

/// Options shared by all targets
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    pub clean: CleanConfig,
    /// Path prefix for flattened rows
    pub prefix: Option<String>,
    /// Source-file label for the CSV file column, "-" when absent
    pub source: Option<String>,
    /// Metadata key/value injected for the XML target
    pub stamp: Option<(String, String)>,
}

/// Parse one document and render it to the requested target. The dialect
/// is sniffed from the root tag when not given.
pub fn render(
    input: &str,
    dialect: Option<Dialect>,
    target: Target,
    options: &RenderOptions,
) -> Result<String> {
    let mut doc = crate::parse_str(input)?;
    let dialect = dialect.unwrap_or_else(|| Dialect::detect(&doc));
    debug!(?dialect, ?target, "rendering document");

    match target {
        Target::Csv => {
            let source = options.source.as_deref().unwrap_or("-");
            let rows = match options.prefix.as_deref() {
                Some(prefix) => flatten_with_prefix(&doc, prefix),
                None => flatten(&doc),
            };
            Ok(csv_string(source, rows))
        }
        Target::Text => {
            let rules = dialect.rules();
            Ok(text_string(sentences(&doc, &rules, &options.clean)))
        }
        Target::Xml => {
            if let Some((key, value)) = &options.stamp {
                stamp(&mut doc, dialect.metadata_container(), key, value);
            }
            Ok(document_to_string(&doc))
        }
    }
}

/// Inject or overwrite a metadata field under the named container element,
/// creating the container as the root's last child when absent.
pub fn stamp(doc: &mut Document, container: &str, key: &str, value: &str) {
    let target = match doc.root.child_mut(container) {
        Some(el) => el,
        None => {
            doc.root
                .children
                .push(Content::Element(Element::new(container)));
            match doc.root.children.last_mut() {
                Some(Content::Element(el)) => el,
                // just pushed an element
                _ => return,
            }
        }
    };
    target.upsert_child_text(key, value);
}
