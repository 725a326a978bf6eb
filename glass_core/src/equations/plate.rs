//! # Four-Side Simply-Supported Rectangular Plate
//!
//! Closed-form maximum stress, deflection and edge reaction for a thin
//! rectangular plate, simply supported on all four edges, under uniform
//! lateral pressure.
//!
//! ## Notation
//!
//! - `a` = Long side
//! - `b` = Short side
//! - `r` = Aspect ratio a/b (≥ 1)
//! - `q` = Uniform pressure
//! - `t` = Plate thickness
//! - `E` = Modulus of elasticity
//! - `β, α, γ` = Stress, deflection and reaction coefficients
//!
//! ## Formulas (Roark's Table 11.4, Case 1a)
//!
//! ```text
//! σ_max = β q b² / t²          (center, tension face)
//! y_max = α q b⁴ / (E t³)      (center)
//! R_max = γ q b                (middle of the long edge)
//! ```
//!
//! Coefficients are tabulated for r = 1 … 5 and r = ∞ and interpolated
//! linearly in between. Any r beyond 5 takes the ∞ column.
//!
//! ## Sign Conventions
//!
//! - Pressure: positive toward the plate
//! - Deflection: positive in the direction of the pressure
//!
//! ## Example
//!
//! ```rust
//! use glass_core::equations::plate::FourSidedPlate;
//! use glass_core::units::{Feet, GigaPascals, Inches, Psf};
//!
//! let plate = FourSidedPlate::new(
//!     GigaPascals(71.7).into(),
//!     Feet(5.0).into(),
//!     Feet(10.0).into(),
//!     Inches(0.5).into(),
//! ).unwrap();
//!
//! let stress = plate.stress_max(Psf(20.0).into());
//! assert!((stress.0 - 8.414).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::interpolation::interpolate;
use crate::errors::{CalcError, CalcResult};
use crate::units::{MegaPascals, Millimeters, NewtonsPerMm};

/// Tabulated aspect ratios (the ∞ column is handled separately)
const ASPECT_RATIOS: [f64; 9] = [1.0, 1.2, 1.4, 1.6, 1.8, 2.0, 3.0, 4.0, 5.0];

/// Stress coefficient β for each aspect ratio, last entry is r = ∞
const BETA: [f64; 10] = [0.2874, 0.3762, 0.4530, 0.5172, 0.5688, 0.6102, 0.7134, 0.7410, 0.7476, 0.7500];

/// Deflection coefficient α for each aspect ratio, last entry is r = ∞
const ALPHA: [f64; 10] = [0.0440, 0.0616, 0.0770, 0.0906, 0.1017, 0.1110, 0.1335, 0.1400, 0.1417, 0.1421];

/// Reaction coefficient γ for each aspect ratio, last entry is r = ∞
const GAMMA: [f64; 10] = [0.420, 0.455, 0.478, 0.491, 0.499, 0.503, 0.505, 0.502, 0.501, 0.500];

/// Interpolated Roark coefficients for one aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoarkCoefficients {
    /// Aspect ratio long/short the coefficients were taken at
    pub aspect_ratio: f64,
    /// Stress coefficient β
    pub beta: f64,
    /// Deflection coefficient α
    pub alpha: f64,
    /// Reaction coefficient γ
    pub gamma: f64,
}

impl RoarkCoefficients {
    /// Look up the coefficients for a long/short ratio.
    ///
    /// Ratios below 1 are inverted, so the order of the sides does not matter.
    pub fn for_aspect_ratio(ratio: f64) -> Self {
        let r = if ratio < 1.0 { 1.0 / ratio } else { ratio };
        let last = ASPECT_RATIOS.len();
        if r > ASPECT_RATIOS[last - 1] {
            log::warn!("aspect ratio {:.3} is beyond the plate table, using the infinite-strip coefficients", r);
        }

        let pick = |table: &[f64; 10]| -> f64 {
            interpolate(&ASPECT_RATIOS, &table[..last], r).unwrap_or(table[last])
        };

        RoarkCoefficients {
            aspect_ratio: r,
            beta: pick(&BETA),
            alpha: pick(&ALPHA),
            gamma: pick(&GAMMA),
        }
    }
}

/// A rectangular plate simply supported on four sides.
///
/// All four properties are validated on construction and on every update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourSidedPlate {
    e: MegaPascals,
    dim_x: Millimeters,
    dim_y: Millimeters,
    t: Millimeters,
}

impl FourSidedPlate {
    /// Create a plate from its elastic modulus, two in-plane dimensions and thickness.
    pub fn new(e: MegaPascals, dim_x: Millimeters, dim_y: Millimeters, t: Millimeters) -> CalcResult<Self> {
        validate_elastic_modulus(e)?;
        validate_dimension("dim_x", dim_x)?;
        validate_dimension("dim_y", dim_y)?;
        validate_thickness(t)?;
        Ok(FourSidedPlate { e, dim_x, dim_y, t })
    }

    pub fn elastic_modulus(&self) -> MegaPascals {
        self.e
    }

    pub fn dim_x(&self) -> Millimeters {
        self.dim_x
    }

    pub fn dim_y(&self) -> Millimeters {
        self.dim_y
    }

    pub fn thickness(&self) -> Millimeters {
        self.t
    }

    pub fn set_elastic_modulus(&mut self, e: MegaPascals) -> CalcResult<()> {
        validate_elastic_modulus(e)?;
        self.e = e;
        Ok(())
    }

    pub fn set_dim_x(&mut self, dim_x: Millimeters) -> CalcResult<()> {
        validate_dimension("dim_x", dim_x)?;
        self.dim_x = dim_x;
        Ok(())
    }

    pub fn set_dim_y(&mut self, dim_y: Millimeters) -> CalcResult<()> {
        validate_dimension("dim_y", dim_y)?;
        self.dim_y = dim_y;
        Ok(())
    }

    pub fn set_thickness(&mut self, t: Millimeters) -> CalcResult<()> {
        validate_thickness(t)?;
        self.t = t;
        Ok(())
    }

    /// Short side `b`
    pub fn short_side(&self) -> Millimeters {
        if self.dim_x.0 <= self.dim_y.0 {
            self.dim_x
        } else {
            self.dim_y
        }
    }

    /// Coefficients for the current aspect ratio
    pub fn coefficients(&self) -> RoarkCoefficients {
        RoarkCoefficients::for_aspect_ratio(self.dim_x.0 / self.dim_y.0)
    }

    /// Maximum bending stress σ = β q b² / t²
    pub fn stress_max(&self, pressure: MegaPascals) -> MegaPascals {
        let b = self.short_side().0;
        let t = self.t.0;
        MegaPascals(self.coefficients().beta * pressure.0 * b.powi(2) / t.powi(2))
    }

    /// Maximum deflection y = α q b⁴ / (E t³)
    pub fn deflection_max(&self, pressure: MegaPascals) -> Millimeters {
        let b = self.short_side().0;
        let t = self.t.0;
        Millimeters(self.coefficients().alpha * pressure.0 * b.powi(4) / (self.e.0 * t.powi(3)))
    }

    /// Maximum edge reaction R = γ q b (force per unit edge length)
    pub fn reaction_max(&self, pressure: MegaPascals) -> NewtonsPerMm {
        let b = self.short_side().0;
        NewtonsPerMm(self.coefficients().gamma * pressure.0 * b)
    }
}

fn validate_dimension(field: &str, dim: Millimeters) -> CalcResult<()> {
    if !(dim.0 > 0.0) {
        return Err(CalcError::invalid_input(
            field,
            dim.to_string(),
            "dimensions must be greater than zero",
        ));
    }
    Ok(())
}

fn validate_thickness(t: Millimeters) -> CalcResult<()> {
    if !(t.0 > 0.0) {
        return Err(CalcError::invalid_input(
            "t",
            t.to_string(),
            "thickness must be greater than zero",
        ));
    }
    Ok(())
}

fn validate_elastic_modulus(e: MegaPascals) -> CalcResult<()> {
    if !(e.0 > 0.0) {
        return Err(CalcError::invalid_input(
            "E",
            e.to_string(),
            "elastic modulus must be greater than zero",
        ));
    }
    Ok(())
}
