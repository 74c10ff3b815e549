//! XML parsing and serialization

pub mod cursor;
pub mod model;
pub mod parser;
pub mod write;

pub use model::{Content, Document, Element};
pub use parser::Parser;
pub use write::document_to_string;
