//! Property-based tests
//!
//! 1. Flatten/nest round-trip: rebuilding a tree from its rows recovers
//!    the original structure (for trees without mixed content).
//! 2. Cleaning is idempotent and erases strip-only strings.
//! 3. Flattening is deterministic.

#![allow(clippy::unwrap_used)]

use indexmap::IndexMap;
use proptest::prelude::*;

use corpex::{clean, flatten, nest, CleanConfig, Content, Document, Element};

fn arb_name() -> impl Strategy<Value = String> {
    "[a-f][a-z]{0,5}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,12}"
}

/// Trees without mixed content: every leaf carries non-empty text, inner
/// nodes hold only element children plus attributes.
fn arb_element() -> impl Strategy<Value = Element> {
    let leaf = (arb_name(), arb_text()).prop_map(|(name, text)| Element {
        name,
        attributes: IndexMap::new(),
        children: vec![Content::Text(text)],
    });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            arb_name(),
            prop::collection::vec(inner, 1..4),
            prop::collection::btree_map(arb_name(), arb_text(), 0..3),
        )
            .prop_map(|(name, children, attrs)| Element {
                name,
                attributes: attrs.into_iter().collect(),
                children: children.into_iter().map(Content::Element).collect(),
            })
    })
}

fn arb_strip() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(
        prop::sample::select(vec![',', '.', '!', '?', ';', ':', '"', '(', ')']),
        1..6,
    )
}

proptest! {
    #[test]
    fn prop_flatten_nest_round_trip(root in arb_element()) {
        let doc = Document { root };
        let rebuilt = nest(flatten(&doc)).unwrap();
        prop_assert_eq!(rebuilt, doc);
    }

    #[test]
    fn prop_flatten_deterministic(root in arb_element()) {
        let doc = Document { root };
        let first: Vec<_> = flatten(&doc).collect();
        let second: Vec<_> = flatten(&doc).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_clean_idempotent(text in "\\PC{0,40}", strip in arb_strip()) {
        let config = CleanConfig::new(strip);
        let once = clean(&text, &config);
        prop_assert_eq!(clean(&once, &config), once);
    }

    #[test]
    fn prop_strip_only_cleans_to_empty(strip in arb_strip(), len in 0usize..20) {
        let config = CleanConfig::new(strip.clone());
        let text: String = strip.iter().cycle().take(len).collect();
        prop_assert_eq!(clean(&text, &config), "");
    }

    #[test]
    fn prop_paths_start_with_root(root in arb_element()) {
        let doc = Document { root };
        let name = doc.root.name.clone();
        for row in flatten(&doc) {
            let ok = row.path == name || row.path.starts_with(&format!("{}.", name));
            prop_assert!(ok);
        }
    }
}
