//! Sentence extraction and text cleanup

use crate::dialect::TagRules;
use crate::xml::model::Document;

/// Punctuation strip set used when cleaning sentences. Passed explicitly;
/// there is no global configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CleanConfig {
    strip: Vec<char>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            strip: vec![',', '.', ';', ':', '!', '?', '"', '(', ')'],
        }
    }
}

impl CleanConfig {
    pub fn new(strip: impl IntoIterator<Item = char>) -> Self {
        Self {
            strip: strip.into_iter().collect(),
        }
    }

    pub fn strips(&self, ch: char) -> bool {
        self.strip.contains(&ch)
    }
}

/// Remove strip-set characters and normalize whitespace runs to single
/// spaces. Idempotent; text of only strip-set characters cleans to "".
pub fn clean(text: &str, config: &CleanConfig) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if config.strips(ch) {
            continue;
        }
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

/// Cleaned sentences in document order. Sentences that clean to empty are
/// omitted. No state is carried across sentences.
pub fn sentences<'a>(
    doc: &'a Document,
    rules: &'a TagRules,
    config: &'a CleanConfig,
) -> impl Iterator<Item = String> + 'a {
    doc.root
        .descendants()
        .filter(|el| el.name == rules.sentence)
        .map(|el| clean(&rules.sentence_text(el), config))
        .filter(|s| !s.is_empty())
}
