use msg_stream_rust::{classify, classify_length, Category};
use proptest::prelude::*;

#[test]
fn test_boundary_table() {
    let cases = [
        (0, Category::Short),
        (2, Category::Short),
        (19, Category::Short),
        (20, Category::Medium),
        (35, Category::Medium),
        (50, Category::Medium),
        (51, Category::Long),
        (75, Category::Long),
    ];

    for (length, expected) in cases {
        assert_eq!(classify_length(length), expected, "length {length}");
        assert_eq!(classify(&"x".repeat(length)), expected, "length {length}");
    }
}

#[test]
fn test_classification_is_deterministic() {
    let content = "The arc of the moral universe is long";
    assert_eq!(classify(content), classify(content));
}

proptest! {
    // The rule restated independently: Short iff < 20, Medium iff 20..=50, Long iff > 50.
    #[test]
    fn prop_rule_holds_for_all_lengths(length in 0usize..500) {
        let category = classify_length(length);
        prop_assert_eq!(category == Category::Short, length < 20);
        prop_assert_eq!(category == Category::Medium, (20..=50).contains(&length));
        prop_assert_eq!(category == Category::Long, length > 50);
    }

    #[test]
    fn prop_content_and_length_agree(content in ".{0,120}") {
        prop_assert_eq!(classify(&content), classify_length(content.chars().count()));
    }
}
