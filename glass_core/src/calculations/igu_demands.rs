//! # IGU Wind Demands
//!
//! Distributes a uniform lateral pressure across the buildups (lites) of an
//! insulated glass unit and reports each lite's load share, deflection, edge
//! reaction and per-ply bending stress.
//!
//! ## Assumptions
//!
//! - Rectangular panel, simply supported on all four edges
//! - Uniform pressure, shared between lites in proportion to flexural stiffness
//! - Gas-space coupling treated as rigid (every lite deflects the same)
//! - All buildups use the same equivalent thickness model
//!
//! ## Formulas
//!
//! ```text
//! LSF_i   = E_i·h_efw,i³ / Σ E_j·h_efw,j³
//! y_i     = plate(h_efw,i).deflection_max(q·LSF_i)
//! σ_i,k   = plate(h_efs,i,k).stress_max(q·LSF_i)
//! R_i     = plate.reaction_max(q·LSF_i)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use glass_core::calculations::equivalent_thickness::{EquivalentThicknessMethod, Package};
//! use glass_core::calculations::igu_demands::{solve, PanelInput};
//! use glass_core::materials::GlassPly;
//! use glass_core::units::{KiloPascals, Millimeters};
//!
//! let outer = Package::monolithic(GlassPly::from_nominal_thickness(Millimeters(6.0), "FT").unwrap());
//! let inner = Package::monolithic(GlassPly::from_nominal_thickness(Millimeters(6.0), "FT").unwrap());
//! let method = EquivalentThicknessMethod::Monolithic;
//!
//! let input = PanelInput {
//!     label: "W-1".to_string(),
//!     dim_x: Millimeters(1500.0),
//!     dim_y: Millimeters(3000.0),
//!     pressure: KiloPascals(2.0).into(),
//!     buildups: vec![method.apply(&outer).unwrap(), method.apply(&inner).unwrap()],
//! };
//!
//! let result = solve(&input).unwrap();
//! assert!((result.buildups[0].lsf - 0.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::equivalent_thickness::Buildup;
use crate::equations::plate::{FourSidedPlate, RoarkCoefficients};
use crate::errors::{CalcError, CalcResult};
use crate::units::{MegaPascals, Millimeters, NewtonsPerMm};

/// A panel opening and the buildups filling it.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "W-1",
///   "dim_x": 4000.0,
///   "dim_y": 2000.0,
///   "pressure": 0.001436,
///   "buildups": [ ... ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelInput {
    /// User label for this panel (e.g., "W-1", "Storefront Bay 3")
    #[serde(default)]
    pub label: String,

    /// Panel width
    pub dim_x: Millimeters,

    /// Panel height
    pub dim_y: Millimeters,

    /// Uniform lateral pressure on the whole unit
    pub pressure: MegaPascals,

    /// Lites from one face to the other
    pub buildups: Vec<Buildup>,
}

impl PanelInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.dim_x.0 > 0.0) {
            return Err(CalcError::invalid_input(
                "dim_x",
                self.dim_x.to_string(),
                "dimensions must be greater than zero",
            ));
        }
        if !(self.dim_y.0 > 0.0) {
            return Err(CalcError::invalid_input(
                "dim_y",
                self.dim_y.to_string(),
                "dimensions must be greater than zero",
            ));
        }
        if !self.pressure.0.is_finite() {
            return Err(CalcError::invalid_input(
                "pressure",
                self.pressure.to_string(),
                "pressure must be a finite value",
            ));
        }

        let first = self.buildups.first().ok_or_else(|| {
            CalcError::invalid_input("buildups", "[]", "a panel needs at least one buildup")
        })?;
        if let Some(other) = self.buildups.iter().find(|b| !b.method.same_model(&first.method)) {
            return Err(CalcError::invalid_input(
                "buildups",
                format!("{} and {}", first.method.display_name(), other.method.display_name()),
                "mixing of effective thickness models, only one model should be used",
            ));
        }
        if let Some(bad) = self.buildups.iter().find(|b| b.plies.len() != b.h_efs.len()) {
            return Err(CalcError::invalid_input(
                "buildups",
                format!("{} plies, {} stress thicknesses", bad.plies.len(), bad.h_efs.len()),
                "every ply needs exactly one stress thickness",
            ));
        }
        Ok(())
    }

    /// Shorter panel dimension
    pub fn min_dimension(&self) -> Millimeters {
        if self.dim_x.0 <= self.dim_y.0 {
            self.dim_x
        } else {
            self.dim_y
        }
    }
}

/// Demand on one buildup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildupDemand {
    /// Load share factor
    pub lsf: f64,

    /// Pressure carried by this buildup (q·LSF)
    pub pressure: MegaPascals,

    /// Center deflection
    pub deflection: Millimeters,

    /// Maximum edge reaction per unit length
    pub edge_reaction: NewtonsPerMm,

    /// Bending stress per ply, aligned with the buildup's plies
    pub ply_stresses: Vec<MegaPascals>,
}

impl BuildupDemand {
    /// Largest ply stress in this buildup
    pub fn max_stress(&self) -> MegaPascals {
        MegaPascals(self.ply_stresses.iter().map(|s| s.0).fold(0.0, f64::max))
    }
}

/// Panel demand results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelResult {
    /// Plate coefficients for the panel aspect ratio
    pub coefficients: RoarkCoefficients,

    /// One entry per input buildup, in order
    pub buildups: Vec<BuildupDemand>,
}

impl PanelResult {
    /// Sum of the load share factors
    pub fn total_lsf(&self) -> f64 {
        self.buildups.iter().map(|b| b.lsf).sum()
    }

    /// Largest deflection over all buildups
    pub fn max_deflection(&self) -> Millimeters {
        Millimeters(self.buildups.iter().map(|b| b.deflection.0).fold(0.0, f64::max))
    }

    /// Largest ply stress over all buildups
    pub fn max_stress(&self) -> MegaPascals {
        MegaPascals(self.buildups.iter().map(|b| b.max_stress().0).fold(0.0, f64::max))
    }
}

/// Stiffness share of each buildup.
///
/// The last share is `1 - Σ(previous)`, so summing the shares in order gives
/// exactly 1.0.
fn load_share_factors(buildups: &[Buildup]) -> Vec<f64> {
    let total_stiffness: f64 = buildups.iter().map(Buildup::stiffness).sum();
    let mut shares: Vec<f64> = buildups.iter().map(|b| b.stiffness() / total_stiffness).collect();
    if let Some((last, previous)) = shares.split_last_mut() {
        let assigned: f64 = previous.iter().sum();
        *last = 1.0 - assigned;
    }
    shares
}

/// Solve the panel demands.
pub fn solve(input: &PanelInput) -> CalcResult<PanelResult> {
    input.validate()?;

    let shares = load_share_factors(&input.buildups);
    log::debug!(
        "solving panel '{}': {} x {}, {} buildups",
        input.label,
        input.dim_x,
        input.dim_y,
        input.buildups.len()
    );

    let mut coefficients = None;
    let mut demands = Vec::with_capacity(input.buildups.len());
    for (buildup, &lsf) in input.buildups.iter().zip(&shares) {
        let pressure = input.pressure * lsf;

        let mut plate = FourSidedPlate::new(buildup.e, input.dim_x, input.dim_y, buildup.h_efw)?;
        let deflection = plate.deflection_max(pressure);
        let edge_reaction = plate.reaction_max(pressure);
        coefficients.get_or_insert_with(|| plate.coefficients());

        let mut ply_stresses = Vec::with_capacity(buildup.h_efs.len());
        for &h_efs in &buildup.h_efs {
            plate.set_thickness(h_efs)?;
            ply_stresses.push(plate.stress_max(pressure));
        }

        log::debug!("  LSF {:.4}, deflection {:.3} mm", lsf, deflection.0);
        demands.push(BuildupDemand {
            lsf,
            pressure,
            deflection,
            edge_reaction,
            ply_stresses,
        });
    }

    let coefficients = coefficients.ok_or_else(|| {
        CalcError::invalid_input("buildups", "[]", "a panel needs at least one buildup")
    })?;

    Ok(PanelResult {
        coefficients,
        buildups: demands,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::equivalent_thickness::{EquivalentThicknessMethod, Layer, Package};
    use crate::materials::{GlassPly, Interlayer};
    use crate::units::KiloPascals;

    fn ply(nominal: f64) -> GlassPly {
        GlassPly::from_nominal_thickness(Millimeters(nominal), "FT").unwrap()
    }

    fn two_lite_input() -> PanelInput {
        let method = EquivalentThicknessMethod::Monolithic;
        let laminate = Package::new(vec![Layer::Ply(ply(6.0)), Layer::Ply(ply(6.0))]).unwrap();
        let single = Package::monolithic(ply(6.0));
        PanelInput {
            label: "IGU".to_string(),
            dim_x: Millimeters(4000.0),
            dim_y: Millimeters(2000.0),
            pressure: KiloPascals(1.436).into(),
            buildups: vec![method.apply(&laminate).unwrap(), method.apply(&single).unwrap()],
        }
    }

    #[test]
    fn test_load_share() {
        let result = solve(&two_lite_input()).unwrap();
        assert!((result.buildups[0].lsf - 8.0 / 9.0).abs() < 1e-12);
        assert!((result.buildups[1].lsf - 1.0 / 9.0).abs() < 1e-12);
        assert_eq!(result.total_lsf(), 1.0);
    }

    fn monolithic_panel(thicknesses: &[f64]) -> PanelInput {
        let method = EquivalentThicknessMethod::Monolithic;
        PanelInput {
            label: String::new(),
            dim_x: Millimeters(1000.0),
            dim_y: Millimeters(1500.0),
            pressure: KiloPascals(1.0).into(),
            buildups: thicknesses
                .iter()
                .map(|&t| {
                    let ply = GlassPly::from_actual_thickness(Millimeters(t), "FT").unwrap();
                    method.apply(&Package::monolithic(ply)).unwrap()
                })
                .collect(),
        }
    }

    #[test]
    fn test_load_share_sums_to_exactly_one() {
        let panels: [&[f64]; 5] = [
            &[2.37, 2.53, 2.29],
            &[3.0, 3.0, 3.0],
            &[5.56, 7.42, 9.02, 11.91],
            &[2.16, 21.44, 4.57, 15.09, 3.78],
            &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7],
        ];
        for thicknesses in panels {
            let result = solve(&monolithic_panel(thicknesses)).unwrap();
            assert_eq!(result.total_lsf(), 1.0, "thicknesses {:?}", thicknesses);
            assert!(result.buildups.iter().all(|b| b.lsf > 0.0));
        }
    }

    #[test]
    fn test_single_buildup_takes_full_load() {
        let result = solve(&monolithic_panel(&[6.0])).unwrap();
        assert_eq!(result.buildups[0].lsf, 1.0);
    }

    #[test]
    fn test_ply_stresses() {
        let result = solve(&two_lite_input()).unwrap();
        let laminate = &result.buildups[0].ply_stresses;
        assert!((laminate[0].0 - 25.195_590_3).abs() < 1e-6);
        assert!((laminate[1].0 - 25.195_590_3).abs() < 1e-6);
        assert!((result.buildups[1].ply_stresses[0].0 - 12.597_795_1).abs() < 1e-6);
        assert!((result.max_stress().0 - 25.195_590_3).abs() < 1e-6);
    }

    #[test]
    fn test_deflection_equal_across_buildups() {
        let result = solve(&two_lite_input()).unwrap();
        for demand in &result.buildups {
            assert!((demand.deflection.0 - 22.993_832_4).abs() < 1e-6);
        }
    }

    #[test]
    fn test_edge_reaction() {
        let input = two_lite_input();
        let result = solve(&input).unwrap();
        // gamma at r = 2 is 0.503, b = 2000 mm
        let total: f64 = result.buildups.iter().map(|b| b.edge_reaction.0).sum();
        assert!((total - 0.503 * input.pressure.0 * 2000.0).abs() < 1e-9);
        assert_eq!(result.coefficients.gamma, 0.503);
    }

    #[test]
    fn test_laminated_lite_stresses_differ_by_ply() {
        let laminate = Package::new(vec![
            Layer::Ply(ply(8.0)),
            Layer::Interlayer(Interlayer::from_static(Millimeters(1.52), MegaPascals(0.44)).unwrap()),
            Layer::Ply(ply(6.0)),
        ])
        .unwrap();
        let method = EquivalentThicknessMethod::shear_transfer(Millimeters(1000.0));
        let input = PanelInput {
            label: String::new(),
            dim_x: Millimeters(1000.0),
            dim_y: Millimeters(2000.0),
            pressure: KiloPascals(1.0).into(),
            buildups: vec![method.apply(&laminate).unwrap()],
        };
        let result = solve(&input).unwrap();
        let stresses = &result.buildups[0].ply_stresses;
        assert_eq!(result.buildups[0].lsf, 1.0);
        // thinner stress thickness on ply 1 means higher stress
        assert!(stresses[0].0 > stresses[1].0);
    }

    #[test]
    fn test_mixed_methods_rejected() {
        let mut input = two_lite_input();
        let single = Package::monolithic(ply(6.0));
        input.buildups[1] = EquivalentThicknessMethod::NonComposite.apply(&single).unwrap();
        let err = solve(&input).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "buildups"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_panel() {
        let mut input = two_lite_input();
        input.dim_x = Millimeters(0.0);
        assert!(solve(&input).is_err());

        let mut input = two_lite_input();
        input.buildups.clear();
        assert!(solve(&input).is_err());
    }

    #[test]
    fn test_single_lite_takes_full_load() {
        let mut input = two_lite_input();
        input.buildups.truncate(1);
        let result = solve(&input).unwrap();
        assert_eq!(result.buildups[0].lsf, 1.0);
        assert_eq!(result.buildups[0].pressure, input.pressure);
    }
}
