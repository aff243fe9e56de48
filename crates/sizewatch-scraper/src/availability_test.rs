use serde_json::json;

use super::*;
use crate::flatten::flatten;
use crate::size_records::match_size_records;

fn records_from(values: &[serde_json::Value]) -> Vec<SizeRecord> {
    let flat: Vec<_> = values.iter().map(flatten).collect();
    match_size_records(&flat)
}

fn interpret(values: &[serde_json::Value], size: &str) -> Option<Verdict> {
    Interpreter::default().interpret(&records_from(values), size)
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

#[test]
fn every_truthy_literal_classifies_in_stock() {
    let vocab = AvailabilityVocabulary::default();
    for literal in TRUTHY_LITERALS {
        assert_eq!(
            vocab.classify(literal),
            Some(Availability::InStock),
            "literal {literal:?}"
        );
        assert_eq!(
            vocab.classify(&literal.to_uppercase()),
            Some(Availability::InStock),
            "upper-cased literal {literal:?}"
        );
    }
}

#[test]
fn every_falsy_literal_classifies_out_of_stock() {
    let vocab = AvailabilityVocabulary::default();
    for literal in FALSY_LITERALS {
        assert_eq!(
            vocab.classify(literal),
            Some(Availability::OutOfStock),
            "literal {literal:?}"
        );
    }
}

#[test]
fn patterns_match_inside_longer_values() {
    let vocab = AvailabilityVocabulary::default();
    assert_eq!(
        vocab.classify("https://schema.org/InStock"),
        Some(Availability::InStock)
    );
    assert_eq!(
        vocab.classify("https://schema.org/OutOfStock"),
        Some(Availability::OutOfStock)
    );
    assert_eq!(
        vocab.classify("https://schema.org/SoldOut"),
        Some(Availability::OutOfStock)
    );
    assert_eq!(
        vocab.classify("Only 2 left in stock"),
        Some(Availability::InStock)
    );
    assert_eq!(
        vocab.classify("Currently unavailable online"),
        Some(Availability::OutOfStock)
    );
}

#[test]
fn unrelated_values_are_undecided() {
    let vocab = AvailabilityVocabulary::default();
    for raw in ["ACTIVE", "preorder", "42", "", "limitedavailability"] {
        assert_eq!(vocab.classify(raw), None, "value {raw:?}");
    }
}

#[test]
fn injected_vocabulary_replaces_literal_sets() {
    static TRUTHY: [&str; 1] = ["ja"];
    static FALSY: [&str; 1] = ["nein"];
    let vocab = AvailabilityVocabulary {
        truthy: &TRUTHY,
        falsy: &FALSY,
    };
    assert_eq!(vocab.classify("Ja"), Some(Availability::InStock));
    assert_eq!(vocab.classify("nein"), Some(Availability::OutOfStock));
    assert_eq!(vocab.classify("yes"), None);

    let records = records_from(&[json!({"size": "M", "lieferbar": "nein"})]);
    // "lieferbar" is not an availability key, so nothing decides.
    assert!(Interpreter::new(vocab).interpret(&records, "M").is_none());

    let records = records_from(&[json!({"size": "M", "status": "nein"})]);
    let verdict = Interpreter::new(vocab).interpret(&records, "M").unwrap();
    assert_eq!(verdict.availability(), Availability::OutOfStock);
}

// ---------------------------------------------------------------------------
// Size matching
// ---------------------------------------------------------------------------

#[test]
fn size_match_is_exact_and_case_insensitive() {
    let verdict = interpret(&[json!({"size": "m", "availability": "InStock"})], "  M ").unwrap();
    assert_eq!(verdict.availability(), Availability::InStock);
}

#[test]
fn size_matches_as_whole_word_in_label() {
    let values = [json!({"variants": [{"label": "Tee - Size L / Blue", "stock": "in stock"}]})];
    let verdict = interpret(&values, "L").unwrap();
    assert_eq!(verdict.availability(), Availability::InStock);
}

#[test]
fn size_does_not_match_inside_other_words() {
    let values = [json!({"variants": [{"size": "XL", "available": true}]})];
    assert!(interpret(&values, "L").is_none());
}

#[test]
fn empty_target_matches_nothing() {
    let values = [json!({"size": "M", "available": true})];
    assert!(interpret(&values, "   ").is_none());
}

// ---------------------------------------------------------------------------
// Quantity and availability precedence
// ---------------------------------------------------------------------------

#[test]
fn positive_quantity_wins() {
    let verdict = interpret(&[json!({"size": "M", "quantity": 5})], "M").unwrap();
    assert_eq!(verdict, Verdict::in_stock("quantity=5"));
}

#[test]
fn quantity_must_be_all_digits_and_positive() {
    for qty in [json!(0), json!("0"), json!(-3), json!("2.5"), json!("many")] {
        let values = [json!({"size": "M", "qty": qty.clone()})];
        assert!(interpret(&values, "M").is_none(), "qty {qty}");
    }
    let verdict = interpret(&[json!({"size": "M", "qty": "12"})], "M").unwrap();
    assert_eq!(verdict.detail(), "quantity=12");
}

#[test]
fn quantity_anywhere_outranks_earlier_textual_signal() {
    let values = [json!({
        "variants": [
            {"size": "M", "availability": "OutOfStock"},
            {"size": "M", "inventory_quantity": 3}
        ]
    })];
    let verdict = interpret(&values, "M").unwrap();
    assert_eq!(verdict, Verdict::in_stock("quantity=3"));
}

#[test]
fn quantity_ignores_negative_text_in_non_matching_record() {
    let values = [
        json!({"variants": [{"size": "S", "availability": "sold out"}]}),
        json!({"variants": [{"size": "M", "quantity": 1}]}),
    ];
    let verdict = interpret(&values, "M").unwrap();
    assert_eq!(verdict, Verdict::in_stock("quantity=1"));
}

#[test]
fn first_matching_textual_signal_wins() {
    let values = [json!({
        "variants": [
            {"size": "L", "availability": "SoldOut"},
            {"size": "L", "availability": "InStock"}
        ]
    })];
    let verdict = interpret(&values, "L").unwrap();
    assert_eq!(verdict, Verdict::out_of_stock("SoldOut"));
}

#[test]
fn detail_is_raw_field_value() {
    let values = [json!({"offers": {"sku": "123-M", "label": "M", "availability": "https://schema.org/InStock"}})];
    let verdict = interpret(&values, "M").unwrap();
    assert_eq!(verdict.detail(), "https://schema.org/InStock");
}

#[test]
fn boolean_availability_fields_decide() {
    let verdict = interpret(&[json!({"size": "S", "isAvailable": false})], "S").unwrap();
    assert_eq!(verdict, Verdict::out_of_stock("false"));
}

#[test]
fn undecided_fields_fall_through_to_none() {
    let values = [json!({"size": "M", "status": "ACTIVE", "quantity": 0})];
    assert!(interpret(&values, "M").is_none());
}

#[test]
fn no_records_is_no_conclusive_result() {
    assert!(Interpreter::default().interpret(&[], "M").is_none());
}
