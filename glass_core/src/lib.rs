//! # glass_core - Laminated and Insulated Glass Design Engine
//!
//! `glass_core` computes the structural response of glass panels: equivalent
//! thicknesses of laminated packages, allowable stresses from breakage and
//! load duration factors, and load sharing between the lites of an insulating
//! glass unit (IGU). All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Explicit catalogs**: Glass types and interlayer tables are owned by the caller
//! - **Typed units**: Millimeters and MegaPascals internally, unit strings at the edges
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use glass_core::calculations::{solve, EquivalentThicknessMethod, Layer, Package, PanelInput};
//! use glass_core::materials::{GlassPly, Interlayer};
//! use glass_core::units::{KiloPascals, MegaPascals, Millimeters};
//!
//! let ply = |t: f64| GlassPly::from_nominal_thickness(Millimeters(t), "FT").unwrap();
//! let laminate = Package::new(vec![
//!     Layer::Ply(ply(8.0)),
//!     Layer::Interlayer(Interlayer::from_static(Millimeters(1.52), MegaPascals(0.44)).unwrap()),
//!     Layer::Ply(ply(6.0)),
//! ]).unwrap();
//! let single = Package::monolithic(ply(6.0));
//!
//! let method = EquivalentThicknessMethod::shear_transfer(Millimeters(2000.0));
//! let panel = PanelInput {
//!     label: "W-1".to_string(),
//!     dim_x: Millimeters(4000.0),
//!     dim_y: Millimeters(2000.0),
//!     pressure: KiloPascals(1.436).into(),
//!     buildups: vec![method.apply(&laminate).unwrap(), method.apply(&single).unwrap()],
//! };
//!
//! let result = solve(&panel).unwrap();
//! assert!((result.total_lsf() - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`design_input`] - JSON design files with unit strings, and whole-panel analysis
//! - [`calculations`] - Equivalent thickness and IGU demand calculations
//! - [`equations`] - Plate coefficients, table interpolation and statistics
//! - [`materials`] - Glass plies, glass types and interlayers
//! - [`units`] - Type-safe unit wrappers and quantity parsing
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod design_input;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use design_input::{analyze, load_design_input, parse_design_input, DesignInput, DesignReport};
pub use errors::{CalcError, CalcResult};
