//! # Glass Design Equations
//!
//! Fundamental formulas the material and calculation modules are built on.
//! Keeping them in one place makes them easy to check against references.
//!
//! ## Modules
//!
//! - [`plate`] - Four-side simply-supported plate (stress, deflection, reaction)
//! - [`statistics`] - Standard normal inverse CDF for breakage probability
//! - [`interpolation`] - Linear lookup on sorted tables
//!
//! ## Sign Conventions
//!
//! - **Pressure**: Positive toward the glass
//! - **Deflection**: Positive in the direction of the pressure
//! - **Stress**: Reported as the magnitude at the tension face
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 11.4
//! - ASTM E1300: Standard Practice for Determining Load Resistance of Glass in Buildings
//! - Bennison & Wolfel, effective thickness of laminated glass

pub mod interpolation;
pub mod plate;
pub mod statistics;

pub use interpolation::{interpolate, lerp, locate, AxisPosition};
pub use plate::{FourSidedPlate, RoarkCoefficients};
pub use statistics::norm_ppf;
