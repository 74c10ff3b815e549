//! Corpus dialects and their tag rules
//!
//! Tag dispatch is a fixed rule table resolved once per dialect, not
//! per-node runtime inspection.

use crate::xml::model::{Document, Element};

/// Supported corpus vocabularies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Dialect {
    /// CMDI metadata (root `CMD`)
    Cmdi,
    /// PSDX parsed transcription (root `forestGrp`)
    Psdx,
    /// FLEx interlinear export (root `document`)
    Flex,
    /// Unknown vocabulary, paragraph-level text
    Generic,
}

impl Dialect {
    /// Sniff the dialect from the root tag. Unknown roots are `Generic`.
    pub fn detect(doc: &Document) -> Self {
        match doc.root.name.as_str() {
            "CMD" => Self::Cmdi,
            "psdx" | "forestGrp" => Self::Psdx,
            "document" | "interlinear-text" => Self::Flex,
            _ => Self::Generic,
        }
    }

    /// Dialect from a file extension, when it is distinctive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "cmdi" => Some(Self::Cmdi),
            "psdx" => Some(Self::Psdx),
            "flextext" => Some(Self::Flex),
            _ => None,
        }
    }

    /// The tag rules for sentence extraction in this dialect.
    pub const fn rules(self) -> TagRules {
        match self {
            Self::Cmdi => TagRules {
                sentence: "Description",
                words: WordSource::Direct,
            },
            Self::Psdx => TagRules {
                sentence: "forest",
                words: WordSource::LeafAttribute {
                    tag: "eLeaf",
                    attr: "Text",
                },
            },
            Self::Flex => TagRules {
                sentence: "phrase",
                words: WordSource::TypedItem {
                    word: "word",
                    item: "item",
                    kind: "txt",
                },
            },
            Self::Generic => TagRules {
                sentence: "p",
                words: WordSource::Direct,
            },
        }
    }

    /// Root child that holds document metadata, the stamping target.
    pub const fn metadata_container(self) -> &'static str {
        match self {
            Self::Cmdi => "Header",
            Self::Psdx | Self::Flex | Self::Generic => "metadata",
        }
    }
}

/// Where a sentence's words come from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordSource {
    /// Words are attributes on descendant leaf elements
    LeafAttribute {
        tag: &'static str,
        attr: &'static str,
    },
    /// Words are typed `item` children of word elements
    TypedItem {
        word: &'static str,
        item: &'static str,
        kind: &'static str,
    },
    /// Sentence text is the subtree's own text content
    Direct,
}

/// Per-dialect tag table: the sentence container and its word source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagRules {
    pub sentence: &'static str,
    pub words: WordSource,
}

impl TagRules {
    /// Raw sentence text for one sentence container, words space-joined.
    pub fn sentence_text(&self, el: &Element) -> String {
        match self.words {
            WordSource::LeafAttribute { tag, attr } => el
                .descendants()
                .filter(|e| e.name == tag)
                .filter_map(|e| e.attr(attr))
                .collect::<Vec<_>>()
                .join(" "),
            WordSource::TypedItem { word, item, kind } => {
                let mut parts = Vec::new();
                for w in el.descendants().filter(|e| e.name == word) {
                    for it in w.children_named(item) {
                        if it.attr("type") == Some(kind) {
                            let text = it.text();
                            let trimmed = text.trim();
                            if !trimmed.is_empty() {
                                parts.push(trimmed.to_string());
                            }
                        }
                    }
                }
                parts.join(" ")
            }
            WordSource::Direct => el.deep_text(),
        }
    }
}
