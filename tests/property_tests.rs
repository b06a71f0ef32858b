//! Property-based tests for branch listing parsing and name validation.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use branchdesk::core::types::BranchName;
use branchdesk::git::parse::{feature_choices, parse_branch_list, tracking_candidates, DEVELOP};

/// Strategy for generating branch name characters.
fn branch_name_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
        Just('/'),
    ]
}

/// Strategy for generating simple branch-like names (no spaces).
fn branch_like() -> impl Strategy<Value = String> {
    prop::collection::vec(branch_name_char(), 1..30)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for a `git branch` style listing line.
fn listing_line() -> impl Strategy<Value = String> {
    (branch_like(), any::<bool>(), 0usize..4).prop_map(|(name, current, pad)| {
        let marker = if current { "* " } else { "  " };
        format!("{}{}{}", marker, name, " ".repeat(pad))
    })
}

proptest! {
    #[test]
    fn parsed_entries_are_trimmed_and_non_empty(
        lines in prop::collection::vec(listing_line(), 0..20),
        keep_marker in any::<bool>(),
    ) {
        let text = lines.join("\n");
        for entry in parse_branch_list(&text, keep_marker) {
            prop_assert!(!entry.is_empty());
            prop_assert_eq!(entry.trim(), entry.as_str());
        }
    }

    #[test]
    fn stripping_marker_recovers_names(
        names in prop::collection::vec(branch_like(), 0..20),
        current in any::<prop::sample::Index>(),
    ) {
        let current = if names.is_empty() { None } else { Some(current.index(names.len())) };
        let text = names
            .iter()
            .enumerate()
            .map(|(i, n)| if Some(i) == current { format!("* {n}") } else { format!("  {n}") })
            .collect::<Vec<_>>()
            .join("\n");

        prop_assert_eq!(parse_branch_list(&text, false), names.clone());

        let kept = parse_branch_list(&text, true);
        prop_assert_eq!(kept.len(), names.len());
        prop_assert_eq!(kept.iter().filter(|e| e.starts_with("* ")).count(), current.iter().count());
    }

    #[test]
    fn blank_lines_never_add_entries(
        lines in prop::collection::vec(listing_line(), 0..10),
        blanks in 0usize..5,
    ) {
        let text = lines.join("\n");
        let padded = format!("{}{}", text, "\n   ".repeat(blanks));
        prop_assert_eq!(parse_branch_list(&text, false), parse_branch_list(&padded, false));
    }

    #[test]
    fn tracking_candidates_never_contain_mainline_or_spaces(
        lines in prop::collection::vec(listing_line(), 0..20),
    ) {
        let text = lines.join("\n");
        for candidate in tracking_candidates(&text, "master") {
            prop_assert!(!candidate.contains("master"));
            prop_assert!(!candidate.contains(' '));
            prop_assert!(!candidate.is_empty());
        }
    }

    #[test]
    fn feature_choices_end_with_develop(
        names in prop::collection::vec(branch_like(), 0..20),
    ) {
        let choices = feature_choices(&names);
        prop_assert_eq!(choices.last().map(String::as_str), Some(DEVELOP));
        prop_assert!(choices.len() <= names.len() + 1);
    }

    #[test]
    fn branch_names_with_refname_forbidden_characters_are_rejected(
        prefix in branch_like(),
        bad in prop::sample::select(vec![' ', '~', '^', ':', '\\', '?', '*', '[']),
        suffix in branch_like(),
    ) {
        let name = format!("{prefix}{bad}{suffix}");
        prop_assert!(BranchName::new(name).is_err());
    }

    #[test]
    fn shell_metacharacters_do_not_affect_validity(
        prefix in prop::collection::vec(prop::char::range('a', 'z'), 1..10),
        meta in prop::sample::select(vec![';', '&', '|', '$', '`', '<', '>', '\'']),
        suffix in prop::collection::vec(prop::char::range('a', 'z'), 1..10),
    ) {
        let prefix: String = prefix.into_iter().collect();
        let suffix: String = suffix.into_iter().collect();
        let name = format!("{prefix}{meta}{suffix}");
        prop_assert!(BranchName::new(name).is_ok());
    }
}
