//! Tests for the severity bit vocabulary.

use prtlog::Severity;

#[test]
fn numeric_values_are_stable() {
    assert_eq!(Severity::DEBUG.bits(), 1);
    assert_eq!(Severity::NOTE.bits(), 2);
    assert_eq!(Severity::INFO.bits(), 4);
    assert_eq!(Severity::WARNING.bits(), 8);
    assert_eq!(Severity::ERROR.bits(), 16);
    assert_eq!(Severity::PROBLEM.bits(), 32);
    assert_eq!(Severity::BUG.bits(), 64);
    assert_eq!(Severity::ALL.bits(), 127);
}

#[test]
fn subset_test_requires_every_bit() {
    let mask = Severity::WARNING | Severity::ERROR;
    assert_eq!(mask.bits(), 24);

    assert!(!Severity::INFO.is_subset_of(mask));
    assert!(Severity::WARNING.is_subset_of(mask));
    assert!(!(Severity::WARNING | Severity::BUG).is_subset_of(mask));
    assert!((Severity::WARNING | Severity::ERROR).is_subset_of(mask));
}

#[test]
fn undefined_bits_fail_against_all() {
    assert!(!Severity::from_bits(128).is_subset_of(Severity::ALL));
}

#[test]
fn all_classes_in_numeric_order() {
    let bits: Vec<u64> = Severity::all_classes().map(Severity::bits).collect();
    assert_eq!(bits, vec![1, 2, 4, 8, 16, 32, 64]);
    assert!(Severity::all_classes().all(Severity::is_single));
}

#[test]
fn display_names_and_combinations() {
    assert_eq!(Severity::WARNING.to_string(), "Warning");
    assert_eq!((Severity::WARNING | Severity::ERROR).to_string(), "Warning|Error");
    assert_eq!(Severity::NONE.to_string(), "none");
    assert_eq!(Severity::from_bits(8 | 256).to_string(), "Warning|256");
}

#[test]
fn name_only_for_single_classes() {
    assert_eq!(Severity::PROBLEM.name(), Some("Problem"));
    assert_eq!((Severity::DEBUG | Severity::NOTE).name(), None);
}

#[test]
fn prefixes_per_class() {
    assert_eq!(Severity::WARNING.prefix(), "Warning: ");
    assert_eq!(Severity::BUG.prefix(), "Bug: ");
    assert_eq!((Severity::WARNING | Severity::ERROR).prefix(), "");
}

#[test]
fn parse_names_numbers_and_combinations() {
    assert_eq!("warning".parse::<Severity>().unwrap(), Severity::WARNING);
    assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::WARNING);
    assert_eq!("all".parse::<Severity>().unwrap(), Severity::ALL);
    assert_eq!("24".parse::<Severity>().unwrap().bits(), 24);
    assert_eq!(
        "warning | error".parse::<Severity>().unwrap(),
        Severity::WARNING | Severity::ERROR
    );
    assert_eq!(
        "note,bug".parse::<Severity>().unwrap(),
        Severity::NOTE | Severity::BUG
    );
}

#[test]
fn parse_invalid() {
    assert!("fatal".parse::<Severity>().is_err());
    assert!("".parse::<Severity>().is_err());
    assert!("warning|".parse::<Severity>().is_err());
}
