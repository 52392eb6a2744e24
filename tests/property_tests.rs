mod common;

use idsplit::lexer::is_delimiter;
use idsplit::{Directive, SpecialTerms, Splitter, SplitterKind};
use proptest::prelude::*;

fn without_delimiters(identifier: &str) -> String {
    identifier.chars().filter(|&c| !is_delimiter(c)).collect()
}

proptest! {
    #[test]
    fn lexical_splitters_partition_the_identifier(id in "[A-Za-z0-9_$.]{0,24}") {
        for kind in SplitterKind::ALL {
            if let Some(split) = kind.lexical() {
                let tokens = split(&id);
                prop_assert_eq!(tokens.concat(), without_delimiters(&id), "splitter {}", kind);
                prop_assert!(tokens.iter().all(|t| !t.is_empty()));
            }
        }
    }

    #[test]
    fn ronin_partitions_the_identifier(id in "[A-Za-z0-9_]{0,20}") {
        let kb = common::knowledge_base();
        let tokens = Splitter::new(&kb).split(&id);
        prop_assert_eq!(tokens.concat(), without_delimiters(&id));
        prop_assert!(tokens.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn ronin_is_deterministic(id in "[a-zA-Z]{1,16}") {
        let kb = common::knowledge_base();
        let splitter = Splitter::new(&kb);
        prop_assert_eq!(splitter.split(&id), splitter.split(&id));
    }

    #[test]
    fn single_characters_are_single_tokens(c in "[A-Za-z0-9]") {
        let kb = common::knowledge_base();
        prop_assert_eq!(Splitter::new(&kb).split(&c), vec![c.clone()]);
        for kind in SplitterKind::ALL {
            if let Some(split) = kind.lexical() {
                prop_assert_eq!(split(&c), vec![c.clone()]);
            }
        }
    }
}

#[test]
fn test_empty_identifier_has_no_tokens() {
    let kb = common::knowledge_base();
    assert!(Splitter::new(&kb).split("").is_empty());
    for kind in SplitterKind::ALL {
        if let Some(split) = kind.lexical() {
            assert!(split("").is_empty(), "splitter {}", kind);
        }
    }
}

#[test]
fn test_atomic_terms_split_to_themselves() {
    let kb = common::knowledge_base();
    let splitter = Splitter::new(&kb);
    for (term, directive) in SpecialTerms::builtin().entries() {
        if directive == Directive::Atomic {
            assert_eq!(splitter.split(&term), vec![term.clone()]);
            let upper = term.to_uppercase();
            assert_eq!(splitter.split(&upper), vec![upper.clone()]);
        }
    }
}
