//! # Glass Plies
//!
//! A single monolithic glass sheet, described by its minimum allowable
//! thickness (the value used in every calculation), its nominal thickness
//! when one was given, and its glass type identifier.
//!
//! Nominal thicknesses resolve to minimum thicknesses through fixed lookup
//! tables (ASTM E1300 Table 4). Only exact table entries are accepted.
//!
//! ## Example
//!
//! ```rust
//! use glass_core::materials::GlassPly;
//! use glass_core::units::{Inches, Millimeters};
//!
//! let metric = GlassPly::from_nominal_thickness(Millimeters(8.0), "FT").unwrap();
//! assert_eq!(metric.t_min(), Millimeters(7.42));
//!
//! let imperial = GlassPly::from_nominal_thickness(Inches(0.375).into(), "HS").unwrap();
//! assert_eq!(imperial.t_min(), Millimeters(9.02));
//!
//! assert!(GlassPly::from_nominal_thickness(Millimeters(8.5), "FT").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{GigaPascals, Inches, MegaPascals, Millimeters, Quantity};

/// Elastic modulus of soda-lime float glass
pub const GLASS_ELASTIC_MODULUS: GigaPascals = GigaPascals(71.7);

/// Metric nominal thickness (mm) to minimum thickness (mm)
const METRIC_MIN_THICKNESS: [(f64, f64); 11] = [
    (2.5, 2.16),
    (3.0, 2.92),
    (4.0, 3.78),
    (5.0, 4.57),
    (6.0, 5.56),
    (8.0, 7.42),
    (10.0, 9.02),
    (12.0, 11.91),
    (16.0, 15.09),
    (19.0, 18.26),
    (22.0, 21.44),
];

/// Imperial nominal thickness (in) to minimum thickness (mm)
const IMPERIAL_MIN_THICKNESS: [(f64, f64); 11] = [
    (0.093_75, 2.16),
    (0.125, 2.92),
    (0.156_25, 3.78),
    (0.187_5, 4.57),
    (0.25, 5.56),
    (0.312_5, 7.42),
    (0.375, 9.02),
    (0.5, 11.91),
    (0.625, 15.09),
    (0.75, 18.26),
    (0.875, 21.44),
];

/// Relative tolerance absorbing floating-point noise from unit conversion
const KEY_TOLERANCE: f64 = 1e-9;

fn lookup(table: &[(f64, f64)], key: f64) -> Option<f64> {
    table
        .iter()
        .find(|(nominal, _)| (nominal - key).abs() <= KEY_TOLERANCE * nominal.abs().max(1.0))
        .map(|&(_, t_min)| t_min)
}

/// Minimum allowable thickness for a nominal thickness.
///
/// Tries the metric table first, then the imperial table.
pub fn min_thickness_for_nominal(t_nom: Millimeters) -> Option<Millimeters> {
    let inches: Inches = t_nom.into();
    lookup(&METRIC_MIN_THICKNESS, t_nom.0)
        .or_else(|| lookup(&IMPERIAL_MIN_THICKNESS, inches.0))
        .map(Millimeters)
}

/// A single glass ply.
///
/// Immutable once built. Use one of the `from_*` constructors.
///
/// Deserialized plies go through the same thickness checks as the constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GlassPlyFields", into = "GlassPlyFields")]
pub struct GlassPly {
    t_min: Millimeters,
    t_nom: Option<Millimeters>,
    glass_type: String,
    e: MegaPascals,
}

/// Wire form of [`GlassPly`]
#[derive(Serialize, Deserialize)]
struct GlassPlyFields {
    t_min: Millimeters,
    #[serde(default)]
    t_nom: Option<Millimeters>,
    glass_type: String,
    e: MegaPascals,
}

impl GlassPly {
    /// Build a ply from a nominal thickness found in the metric or imperial table.
    pub fn from_nominal_thickness(t_nom: Millimeters, glass_type: impl Into<String>) -> CalcResult<Self> {
        let t_min = min_thickness_for_nominal(t_nom).ok_or_else(|| CalcError::ThicknessNotFound {
            nominal: t_nom.to_string(),
        })?;
        Ok(GlassPly {
            t_min,
            t_nom: Some(t_nom),
            glass_type: glass_type.into(),
            e: GLASS_ELASTIC_MODULUS.into(),
        })
    }

    /// Build a ply from a runtime quantity, which must be a length.
    pub fn from_nominal_quantity(t_nom: &Quantity, glass_type: impl Into<String>) -> CalcResult<Self> {
        let t_nom = Millimeters::try_from(t_nom)?;
        Self::from_nominal_thickness(t_nom, glass_type)
    }

    /// Build a ply from a measured thickness. No nominal thickness is recorded.
    pub fn from_actual_thickness(t_act: Millimeters, glass_type: impl Into<String>) -> CalcResult<Self> {
        validate_positive("t_min", t_act.0, t_act, "thickness must be greater than zero")?;
        Ok(GlassPly {
            t_min: t_act,
            t_nom: None,
            glass_type: glass_type.into(),
            e: GLASS_ELASTIC_MODULUS.into(),
        })
    }

    /// Minimum allowable thickness
    pub fn t_min(&self) -> Millimeters {
        self.t_min
    }

    /// Nominal thickness, `None` for plies built from an actual thickness
    pub fn t_nom(&self) -> Option<Millimeters> {
        self.t_nom
    }

    /// Glass type identifier (e.g. "FT")
    pub fn glass_type(&self) -> &str {
        &self.glass_type
    }

    /// Elastic modulus
    pub fn elastic_modulus(&self) -> MegaPascals {
        self.e
    }
}

fn validate_positive(field: &str, value: f64, shown: impl ToString, reason: &str) -> CalcResult<()> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(CalcError::invalid_input(field, shown.to_string(), reason));
    }
    Ok(())
}

impl TryFrom<GlassPlyFields> for GlassPly {
    type Error = CalcError;

    fn try_from(fields: GlassPlyFields) -> CalcResult<Self> {
        validate_positive("t_min", fields.t_min.0, fields.t_min, "thickness must be greater than zero")?;
        if let Some(t_nom) = fields.t_nom {
            validate_positive("t_nom", t_nom.0, t_nom, "thickness must be greater than zero")?;
        }
        validate_positive("E", fields.e.0, fields.e, "elastic modulus must be greater than zero")?;
        Ok(GlassPly {
            t_min: fields.t_min,
            t_nom: fields.t_nom,
            glass_type: fields.glass_type,
            e: fields.e,
        })
    }
}

impl From<GlassPly> for GlassPlyFields {
    fn from(ply: GlassPly) -> Self {
        GlassPlyFields {
            t_min: ply.t_min,
            t_nom: ply.t_nom,
            glass_type: ply.glass_type,
            e: ply.e,
        }
    }
}
