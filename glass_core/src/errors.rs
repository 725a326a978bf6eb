//! # Error Types
//!
//! Structured error types for glass_core. Every failure names the contract
//! that was violated (the offending field, lookup key, table or state) so a
//! caller can report or fix the input programmatically.
//!
//! ## Example
//!
//! ```rust
//! use glass_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_mm: f64) -> CalcResult<()> {
//!     if span_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "span",
//!             span_mm.to_string(),
//!             "span must be greater than zero",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for glass_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A physical input is out of range (non-positive thickness, modulus, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A quantity of the wrong physical dimension was supplied
    #[error("Dimensionality error: cannot convert '{value}' ({found}) to a quantity of [{expected}]")]
    DimensionMismatch {
        value: String,
        expected: String,
        found: String,
    },

    /// A unit symbol could not be recognized
    #[error("Unknown unit '{unit}' in '{value}'")]
    UnknownUnit { value: String, unit: String },

    /// Nominal thickness has no entry in the metric or imperial table
    #[error("Could not find the nominal thickness of {nominal} in the nominal thickness lookup")]
    ThicknessNotFound { nominal: String },

    /// Surface treatment is not defined for the glass type
    #[error("Surface treatment '{treatment}' is not defined for glass type '{glass_type}'")]
    SurfaceTreatmentNotFound {
        glass_type: String,
        treatment: String,
    },

    /// Glass type name or abbreviation is not in the catalog
    #[error("Glass type not found: {key}")]
    GlassTypeNotFound { key: String },

    /// Interlayer product is not in the catalog
    #[error("The product '{product}' is not registered in the product registry")]
    ProductNotFound { product: String },

    /// Package shape is not valid for the chosen model
    #[error("Ply validation failed for {method}: {reason}")]
    InvalidPackage { method: String, reason: String },

    /// Interlayer product table does not form a complete grid
    #[error("The provided data for '{product}' is not rectangular: {reason}")]
    TableNotRectangular { product: String, reason: String },

    /// Temperature/duration requested on a static interlayer
    #[error("No product table provided for '{property}'. Static case being used")]
    StaticInterlayer { property: String },

    /// Table-driven interlayer read before its reference state was set
    #[error("Reference temperature and/or duration not set for '{product}'")]
    ReferenceConditionsNotSet { product: String },

    /// Interpolation point is outside the calibrated table envelope
    #[error("Extrapolating G for '{product}': the temperature-duration combination ({temperature}, {duration}) is outside of the data table bounds")]
    Extrapolation {
        product: String,
        temperature: String,
        duration: String,
    },

    /// Glass type name already registered
    #[error("Name identifier already in use. Deregister `{name}` first")]
    DuplicateName { name: String },

    /// Glass type abbreviation already registered
    #[error("Abbreviation identifier already in use. Deregister `{name}` first")]
    DuplicateAbbreviation { abbr: String, name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error
    pub fn dimension_mismatch(value: impl Into<String>, expected: impl Into<String>, found: impl Into<String>) -> Self {
        CalcError::DimensionMismatch {
            value: value.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an InvalidPackage error
    pub fn invalid_package(method: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidPackage {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Create a TableNotRectangular error
    pub fn not_rectangular(product: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::TableNotRectangular {
            product: product.into(),
            reason: reason.into(),
        }
    }

    /// Create a StaticInterlayer error
    pub fn static_interlayer(property: impl Into<String>) -> Self {
        CalcError::StaticInterlayer {
            property: property.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::ThicknessNotFound { .. } => "THICKNESS_NOT_FOUND",
            CalcError::SurfaceTreatmentNotFound { .. } => "SURFACE_TREATMENT_NOT_FOUND",
            CalcError::GlassTypeNotFound { .. } => "GLASS_TYPE_NOT_FOUND",
            CalcError::ProductNotFound { .. } => "PRODUCT_NOT_FOUND",
            CalcError::InvalidPackage { .. } => "INVALID_PACKAGE",
            CalcError::TableNotRectangular { .. } => "TABLE_NOT_RECTANGULAR",
            CalcError::StaticInterlayer { .. } => "STATIC_INTERLAYER",
            CalcError::ReferenceConditionsNotSet { .. } => "REFERENCE_CONDITIONS_NOT_SET",
            CalcError::Extrapolation { .. } => "EXTRAPOLATION",
            CalcError::DuplicateName { .. } => "DUPLICATE_NAME",
            CalcError::DuplicateAbbreviation { .. } => "DUPLICATE_ABBREVIATION",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("t", "-1.52 mm", "thickness must be greater than zero");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::static_interlayer("temperature").error_code(), "STATIC_INTERLAYER");
        assert_eq!(
            CalcError::DuplicateName { name: "Annealed".into() }.error_code(),
            "DUPLICATE_NAME"
        );
    }

    #[test]
    fn test_messages_name_the_contract() {
        let err = CalcError::DuplicateName {
            name: "Fully Tempered".into(),
        };
        assert_eq!(
            err.to_string(),
            "Name identifier already in use. Deregister `Fully Tempered` first"
        );

        let err = CalcError::ThicknessNotFound {
            nominal: "8.5 mm".into(),
        };
        assert!(err.to_string().contains("8.5 mm"));
    }
}
