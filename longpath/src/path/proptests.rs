//! Property-based tests for path canonicalization.

use super::normalize::normalize;
use super::regular::to_regular_form;
use super::types::{CanonicalPath, PathFormat};
use proptest::prelude::*;

const BASE: Option<&str> = Some(r"C:\base");

// Strategy for generating path components, including dots
fn component_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z0-9_ -]{0,12}[A-Za-z0-9_-]",
        1 => "[A-Za-z0-9_-]{1,8} {1,2}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

fn separator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\\"), Just("/"), Just("\\\\")]
}

fn root_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(r"\".to_string()),
        "[C-Z]:\\\\",
        "[c-z]:",
        Just(r"\\server\share\".to_string()),
        Just(r"\\?\C:\".to_string()),
    ]
}

fn path_strategy() -> impl Strategy<Value = String> {
    (
        root_strategy(),
        prop::collection::vec((component_strategy(), separator_strategy()), 1..8),
    )
        .prop_map(|(root, parts)| {
            let mut path = root;
            for (component, separator) in parts {
                path.push_str(&component);
                path.push_str(separator);
            }
            path
        })
}

fn clean_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z0-9_-]{1,12}", 1..8)
        .prop_map(|parts| format!(r"C:\{}", parts.join("\\")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Canonicalization is idempotent: normalize(normalize(p)) == normalize(p)
    #[test]
    fn normalize_idempotent(path in path_strategy()) {
        if let Ok(once) = normalize(&path, PathFormat::RelativePath, BASE) {
            let twice = normalize(once.as_str(), PathFormat::RelativePath, BASE).unwrap();
            prop_assert_eq!(&once, &twice);
            let trusted = normalize(once.as_str(), PathFormat::LongFullPath, None).unwrap();
            prop_assert_eq!(once, trusted);
        }
    }

    // Canonical paths never end with a separator unless they are a root
    #[test]
    fn normalize_no_trailing_separator(path in path_strategy()) {
        if let Ok(canonical) = normalize(&path, PathFormat::RelativePath, BASE) {
            prop_assert!(canonical.is_root() || !canonical.as_str().ends_with('\\'));
        }
    }

    // Resolved paths never contain dot components
    #[test]
    fn normalize_resolves_dots(path in path_strategy()) {
        if path.starts_with(r"\\?\") {
            return Ok(());
        }
        if let Ok(canonical) = normalize(&path, PathFormat::RelativePath, BASE) {
            let regular = canonical.to_regular();
            prop_assert!(!regular.split('\\').any(|c| c == "." || c == ".."));
            prop_assert!(!regular.contains('/'));
        }
    }

    // Round trip: the regular form of a canonical clean path is the input
    #[test]
    fn regular_form_round_trip(path in clean_path_strategy()) {
        let canonical = normalize(&path, PathFormat::FullPath, None).unwrap();
        prop_assert_eq!(to_regular_form(canonical.as_str()).unwrap(), path.clone());
        let relative = normalize(&path, PathFormat::RelativePath, BASE).unwrap();
        prop_assert_eq!(canonical, relative);
    }

    // Every level of a canonical path is itself canonical and a prefix of it
    #[test]
    fn levels_are_prefixes(path in clean_path_strategy()) {
        let canonical = normalize(&path, PathFormat::FullPath, None).unwrap();
        let levels = canonical.levels();
        prop_assert_eq!(levels.last(), Some(&canonical));
        for level in &levels {
            prop_assert!(canonical.as_str().starts_with(level.as_str()));
            let reparsed = CanonicalPath::new(level.as_str()).unwrap();
            prop_assert_eq!(&reparsed, level);
        }
    }
}
