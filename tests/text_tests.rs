use form_grounding::text::similarity::{max_similarity, similarity};

const SAMPLES: &[&str] = &[
    "First Name",
    "first_name",
    "Email",
    "your email address",
    "Country",
    "Submit Application",
    "abcd",
    "abxcd",
    "zzz",
];

#[test]
fn identical_strings_score_one() {
    for s in SAMPLES {
        assert_eq!(similarity(s, s), 1.0, "{}", s);
    }
}

#[test]
fn comparison_ignores_case() {
    assert_eq!(similarity("EMAIL", "email"), 1.0);
    assert_eq!(similarity("First Name", "first name"), 1.0);
}

#[test]
fn empty_input_scores_zero() {
    assert_eq!(similarity("", "email"), 0.0);
    assert_eq!(similarity("email", ""), 0.0);
    assert_eq!(similarity("", ""), 0.0);
    assert_eq!(similarity("   ", "email"), 0.0);
}

#[test]
fn similarity_is_symmetric_and_bounded() {
    for a in SAMPLES {
        for b in SAMPLES {
            let ab = similarity(a, b);
            let ba = similarity(b, a);
            assert_eq!(ab, ba, "asymmetric for '{}' / '{}'", a, b);
            assert!((0.0..=1.0).contains(&ab), "out of range: {}", ab);
        }
    }
}

#[test]
fn ratio_counts_matching_blocks() {
    // "ab" + "cd" match: 2 * 4 / 9
    let s = similarity("abcd", "abxcd");
    assert!((s - 8.0 / 9.0).abs() < 1e-12, "got {}", s);
}

#[test]
fn unrelated_strings_score_low() {
    assert_eq!(similarity("abc", "xyz"), 0.0);
    assert!(similarity("First Name", "Country") < 0.5);
}

#[test]
fn max_similarity_takes_best_candidate() {
    let candidates = vec!["enter first name".to_string(), "fname".to_string(), "first name".to_string()];
    assert_eq!(max_similarity(Some("First Name"), &candidates), 1.0);
}

#[test]
fn max_similarity_without_label_or_candidates_is_zero() {
    let candidates = vec!["email".to_string()];
    assert_eq!(max_similarity(None, &candidates), 0.0);
    let none: Vec<String> = vec![];
    assert_eq!(max_similarity(Some("Email"), &none), 0.0);
}
