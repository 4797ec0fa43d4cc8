#![cfg(feature = "dev")]

use sasnum_rs::internals::primitives::errors::SasError;

#[test]
fn test_sas_error_display() {
    // EmptyInput
    let err = SasError::EmptyInput;
    assert_eq!(format!("{}", err), "Input arrays are empty");

    // TooFewPoints
    let err = SasError::TooFewPoints { got: 1, min: 2 };
    assert_eq!(format!("{}", err), "Too few points: got 1, need at least 2");

    // DimensionMismatch
    let err = SasError::DimensionMismatch {
        name: "B",
        expected: (4, 4),
        got: (4, 3),
    };
    assert_eq!(
        format!("{}", err),
        "Shape mismatch for 'B': expected 4x4, got 4x3"
    );

    // LengthMismatch
    let err = SasError::LengthMismatch {
        name: "sum_dia",
        expected: 8,
        got: 7,
    };
    assert_eq!(
        format!("{}", err),
        "Length mismatch for 'sum_dia': expected 8, got 7"
    );

    // BufferTooSmall
    let err = SasError::BufferTooSmall {
        name: "hist",
        needed: 10,
        got: 5,
    };
    assert_eq!(
        format!("{}", err),
        "Buffer 'hist' too small: need at least 10, got 5"
    );

    // InvalidNumericValue
    let err = SasError::InvalidNumericValue("P[3]=NaN".to_string());
    assert_eq!(format!("{}", err), "Invalid numeric value: P[3]=NaN");

    // InvalidRelaxation
    let err = SasError::InvalidRelaxation(1.5);
    assert_eq!(
        format!("{}", err),
        "Invalid relaxation factor: 1.5 (must be in (0, 1] and finite)"
    );

    // InvalidReduction
    let err = SasError::InvalidReduction(1.0);
    assert_eq!(
        format!("{}", err),
        "Invalid step reduction: 1 (must be > 1 and finite)"
    );

    // InvalidTolerance
    let err = SasError::InvalidTolerance(-0.5);
    assert_eq!(
        format!("{}", err),
        "Invalid tolerance: -0.5 (must be >= 0 and finite)"
    );

    // InvalidIterations
    let err = SasError::InvalidIterations {
        maxit: 10,
        minit: 20,
    };
    assert_eq!(
        format!("{}", err),
        "Invalid iteration bounds: minit 20 exceeds maxit 10"
    );

    // InvalidBinRange
    let err = SasError::InvalidBinRange { low: 5, high: 5 };
    assert_eq!(
        format!("{}", err),
        "Invalid bin range: (5, 5) selects no bins"
    );

    // MissingParameter
    let err = SasError::MissingParameter {
        parameter: "center",
    };
    assert_eq!(
        format!("{}", err),
        "Required parameter 'center' was not set"
    );
}

#[test]
fn test_sas_error_equality() {
    assert_eq!(SasError::EmptyInput, SasError::EmptyInput);
    assert_ne!(
        SasError::TooFewPoints { got: 1, min: 2 },
        SasError::TooFewPoints { got: 0, min: 2 }
    );
}

#[test]
fn test_sas_error_is_std_error() {
    fn assert_error<E: std::error::Error>() {}
    assert_error::<SasError>();
}
