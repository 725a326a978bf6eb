//! # Glass Calculations
//!
//! Calculation types follow the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - a pure function from one to the other returning `CalcResult`
//!
//! ## Available Calculations
//!
//! - [`equivalent_thickness`] - Effective thicknesses of a laminated package
//! - [`igu_demands`] - Load sharing, stress, deflection and edge reaction for an IGU panel

pub mod equivalent_thickness;
pub mod igu_demands;

pub use equivalent_thickness::{Buildup, EquivalentThicknessMethod, Layer, Package, DEFAULT_SHEAR_TRANSFER_BETA};
pub use igu_demands::{solve, BuildupDemand, PanelInput, PanelResult};
