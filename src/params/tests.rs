#![allow(clippy::unwrap_used, reason = "allow in test files")]

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use super::*;

#[test]
fn dimensionality_accepts_two_and_three() {
    assert_eq!(Dimensionality::try_from(2).unwrap(), Dimensionality::Two);
    assert_eq!(Dimensionality::try_from(3).unwrap(), Dimensionality::Three);
    assert_eq!(usize::from(Dimensionality::Three), 3);
    assert_eq!(Dimensionality::Two.to_string(), "2-D");
}

#[quickcheck]
fn dimensionality_rejects_everything_else(val: i64) -> TestResult {
    if val == 2 || val == 3 {
        return TestResult::discard();
    }

    match Dimensionality::try_from(val) {
        Err(AverageError::UnsupportedDimensionality(got)) => TestResult::from_bool(got == val.to_string()),
        _ => TestResult::failed(),
    }
}

#[test]
fn dimensionality_parses_from_text() {
    assert_eq!("2".parse::<Dimensionality>().unwrap(), Dimensionality::Two);
    assert_eq!(" 3 ".parse::<Dimensionality>().unwrap(), Dimensionality::Three);

    for text in ["two", "2.5", "", "-3", "4"] {
        match text.parse::<Dimensionality>() {
            Err(AverageError::UnsupportedDimensionality(got)) => assert_eq!(got, text),
            other => panic!("{:?} parsed as {:?}", text, other),
        }
    }
}

#[test]
fn default_params() {
    let params = AverageParams::default();
    assert!(!params.normalize);
    assert!(params.sharpen);
    assert_eq!(params.sharpen_strength, DEFAULT_SHARPEN_STRENGTH);
    assert!(!params.sharpening_enabled());
}

#[test]
fn sharpening_requires_normalization() {
    assert!(AverageParams::with_normalize(true).sharpening_enabled());

    let params = AverageParams {
        sharpen: false,
        ..AverageParams::with_normalize(true)
    };
    assert!(!params.sharpening_enabled());

    let params = AverageParams {
        sharpen: true,
        ..AverageParams::with_normalize(false)
    };
    assert!(!params.sharpening_enabled());
}
