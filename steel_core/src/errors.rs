//! # Error Types
//!
//! Structured error types for steel_core. Every failure is a deterministic
//! input-validation failure: nothing is retried and nothing is transient.
//! Evaluators never clamp or repair an out-of-domain input; they stop with
//! the specific error kind so that every PASS/FAIL verdict stays auditable.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_mm: f64) -> CalcResult<()> {
//!     if length_mm <= 0.0 {
//!         return Err(CalcError::invalid_geometry(
//!             "length_mm",
//!             length_mm.to_string(),
//!             "Unbraced length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_length(-1.0).unwrap_err().error_code(), "INVALID_GEOMETRY");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for steel_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for catalog queries and capacity evaluations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Unknown shape, material, grade or stock thickness
    #[error("{kind} not found: {name}")]
    NotFound { kind: String, name: String },

    /// Non-positive length, area, thickness, diameter or count
    #[error("Invalid geometry for '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// End-condition pair with no effective-length factor in the lookup table
    #[error("Unsupported boundary condition pair: {top}-{bottom}")]
    UnsupportedBoundaryCondition { top: String, bottom: String },

    /// A physical quantity was supplied in an incompatible unit
    #[error("Unit mismatch: expected {expected}, found {found}")]
    UnitMismatch { expected: String, found: String },

    /// Degenerate arithmetic (e.g. negative square-root argument from malformed data)
    #[error("Capacity computation failed at '{step}': {reason}")]
    CapacityComputationError { step: String, reason: String },

    /// A non-geometric input is out of range (Cb, resistance factor, demand sign)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The section family is not handled by the requested check
    #[error("Unsupported shape {shape} for {check}")]
    UnsupportedShape { shape: String, check: String },

    /// File I/O error while loading settings or catalog data
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
    /// Create a NotFound error
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        CalcError::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedBoundaryCondition error
    pub fn unsupported_boundary(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        CalcError::UnsupportedBoundaryCondition {
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    /// Create a UnitMismatch error
    pub fn unit_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        CalcError::UnitMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a CapacityComputationError
    pub fn computation(step: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CapacityComputationError {
            step: step.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedShape error
    pub fn unsupported_shape(shape: impl Into<String>, check: impl Into<String>) -> Self {
        CalcError::UnsupportedShape {
            shape: shape.into(),
            check: check.into(),
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
            CalcError::NotFound { .. } => "NOT_FOUND",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::UnsupportedBoundaryCondition { .. } => "UNSUPPORTED_BOUNDARY_CONDITION",
            CalcError::UnitMismatch { .. } => "UNIT_MISMATCH",
            CalcError::CapacityComputationError { .. } => "CAPACITY_COMPUTATION_ERROR",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnsupportedShape { .. } => "UNSUPPORTED_SHAPE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}

/// Reject non-positive or non-finite geometry.
pub(crate) fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_geometry(field, value.to_string(), reason))
    }
}
