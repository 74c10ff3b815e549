//! corpex - flatten and convert linguistic corpus XML
//!
//! Parses CMDI metadata, PSDX transcriptions and FLEx interlinear exports
//! into an ordered tree, then flattens the tree to dotted path/value rows,
//! extracts cleaned sentences, or re-serializes stamped XML.
//!
//! # Quick Start
//!
//! ```
//! use corpex::flatten_str;
//! # fn main() -> Result<(), corpex::Error> {
//! let rows = flatten_str("<metadata><date>2019</date></metadata>")?;
//! assert_eq!(rows[0].path, "metadata.date");
//! assert_eq!(rows[0].value, "2019");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod xml;
pub use xml::{Content, Document, Element, Parser};

pub mod dialect;
pub use dialect::{Dialect, TagRules, WordSource};

pub mod flatten;
pub use flatten::{field, flatten, flatten_with_prefix, nest, Flattener, Leaf, PathValue};

pub mod sentence;
pub use sentence::{clean, sentences, CleanConfig};

pub mod table;
pub use table::{csv_string, text_string, write_text, CsvWriter};

pub mod render;
pub use render::{render, stamp, RenderOptions, Target};

/// Parse an XML document from a string
pub fn parse_str(s: &str) -> Result<Document> {
    let mut parser = Parser::new(s.as_bytes());
    parser.parse()
}

/// Parse an XML document from bytes
pub fn parse_bytes(bytes: &[u8]) -> Result<Document> {
    let mut parser = Parser::new(bytes);
    parser.parse()
}

/// Parse and flatten in one step
pub fn flatten_str(s: &str) -> Result<Vec<PathValue>> {
    let doc = parse_str(s)?;
    Ok(flatten(&doc).collect())
}
