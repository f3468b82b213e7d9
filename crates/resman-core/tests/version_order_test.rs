//! Version ordering through the public API.

use resman_core::types::{latest_version, sort_versions_descending};
use resman_core::{ResourceQuery, ResourceVersion};

#[test]
fn test_numeric_not_lexicographic() {
    let mut versions = vec!["1.0.9".to_string(), "1.0.10".to_string(), "2.0.0".to_string()];
    sort_versions_descending(&mut versions);
    assert_eq!(versions, ["2.0.0", "1.0.10", "1.0.9"]);
}

#[test]
fn test_latest_of_mixed_lengths() {
    assert_eq!(latest_version(["1.0", "1.0.0", "0.9.99"]), Some("1.0.0"));
    assert_eq!(latest_version(std::iter::empty::<&str>()), None);
}

#[test]
fn test_malformed_versions_sort_lowest() {
    assert!(ResourceVersion::parse("beta") < ResourceVersion::parse("0.0.1"));
    assert_eq!(latest_version(["beta", "0.0.1"]), Some("0.0.1"));
}

#[test]
fn test_latest_selector_spellings() {
    for selector in ["", "Latest"] {
        assert_eq!(ResourceQuery::exact("r", selector).pinned_version(), None);
    }
}
