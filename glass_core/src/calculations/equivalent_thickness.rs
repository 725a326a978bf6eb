//! # Equivalent Thickness
//!
//! Reduces a laminated glass package to effective thicknesses that can be
//! used with single-plate formulas:
//!
//! - `h_efw` - one thickness governing deflection for the whole package
//! - `h_efs` - one thickness per glass ply governing that ply's bending stress
//!
//! ## Models
//!
//! - **Monolithic**: full composite action, interlayers ignored.
//!   `h_efw = h_efs = Σ h_i`
//! - **NonComposite**: plies act independently, no shear transfer.
//!   `h_efw = (Σ h_i³)^(1/3)`, `h_efs = (Σ h_i²)^(1/2)`
//! - **ShearTransferCoef**: two plies coupled through one interlayer
//!   (Bennison-Wolfel, ASTM E1300 Appendix X9). Span dependent.
//!
//! ## Shear Transfer Formulas
//!
//! ```text
//! h_s  = (h1 + h2)/2 + h_v
//! h_s1 = h_s·h1/(h1 + h2)        h_s2 = h_s·h2/(h1 + h2)
//! I_s  = h1·h_s2² + h2·h_s1²
//! Γ    = 1 / (1 + β·E·I_s·h_v / (G·h_s²·a²))
//! h_efw  = (h1³ + h2³ + 12·Γ·I_s)^(1/3)
//! h_efs1 = (h_efw³ / (h1 + 2·Γ·h_s2))^(1/2)
//! h_efs2 = (h_efw³ / (h2 + 2·Γ·h_s1))^(1/2)
//! ```
//!
//! Γ runs from 0 (layered) to 1 (monolithic). β = 9.6 for a four-side
//! supported panel under uniform load.
//!
//! ## Example
//!
//! ```rust
//! use glass_core::calculations::equivalent_thickness::{EquivalentThicknessMethod, Layer, Package};
//! use glass_core::materials::{GlassPly, Interlayer};
//! use glass_core::units::{MegaPascals, Millimeters};
//!
//! let package = Package::new(vec![
//!     Layer::Ply(GlassPly::from_nominal_thickness(Millimeters(8.0), "FT").unwrap()),
//!     Layer::Interlayer(Interlayer::from_static(Millimeters(1.52), MegaPascals(0.44)).unwrap()),
//!     Layer::Ply(GlassPly::from_nominal_thickness(Millimeters(6.0), "FT").unwrap()),
//! ]).unwrap();
//!
//! let method = EquivalentThicknessMethod::shear_transfer(Millimeters(1000.0));
//! let buildup = method.apply(&package).unwrap();
//! assert!((buildup.h_efw.0 - 9.533).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{GlassPly, Interlayer};
use crate::units::{MegaPascals, Millimeters};

/// Shear transfer β for a four-side simply-supported panel under uniform load
pub const DEFAULT_SHEAR_TRANSFER_BETA: f64 = 9.6;

// ============================================================================
// Package
// ============================================================================

/// One layer of a laminated package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Layer {
    Ply(GlassPly),
    Interlayer(Interlayer),
}

impl Layer {
    pub fn as_ply(&self) -> Option<&GlassPly> {
        match self {
            Layer::Ply(ply) => Some(ply),
            Layer::Interlayer(_) => None,
        }
    }

    pub fn as_interlayer(&self) -> Option<&Interlayer> {
        match self {
            Layer::Ply(_) => None,
            Layer::Interlayer(interlayer) => Some(interlayer),
        }
    }
}

impl From<GlassPly> for Layer {
    fn from(ply: GlassPly) -> Self {
        Layer::Ply(ply)
    }
}

impl From<Interlayer> for Layer {
    fn from(interlayer: Interlayer) -> Self {
        Layer::Interlayer(interlayer)
    }
}

/// An ordered stack of plies and interlayers.
///
/// Always starts and ends with a ply and never has two interlayers in a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct Package {
    layers: Vec<Layer>,
}

impl Package {
    /// Validate and wrap a layer stack
    pub fn new(layers: Vec<Layer>) -> CalcResult<Self> {
        let shape_error = |reason: &str| CalcError::invalid_package("Package", reason);

        match (layers.first(), layers.last()) {
            (Some(Layer::Ply(_)), Some(Layer::Ply(_))) => {}
            (None, _) => return Err(shape_error("a package needs at least one glass ply")),
            _ => return Err(shape_error("a package must start and end with a glass ply")),
        }
        let adjacent_interlayers = layers
            .windows(2)
            .any(|pair| matches!(pair, [Layer::Interlayer(_), Layer::Interlayer(_)]));
        if adjacent_interlayers {
            return Err(shape_error("interlayers must be separated by a glass ply"));
        }

        Ok(Package { layers })
    }

    /// Package with a single ply
    pub fn monolithic(ply: GlassPly) -> Self {
        Package {
            layers: vec![Layer::Ply(ply)],
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Glass plies in stacking order
    pub fn plies(&self) -> impl Iterator<Item = &GlassPly> {
        self.layers.iter().filter_map(Layer::as_ply)
    }

    /// Interlayers in stacking order
    pub fn interlayers(&self) -> impl Iterator<Item = &Interlayer> {
        self.layers.iter().filter_map(Layer::as_interlayer)
    }

    /// Mutable access to the interlayers, e.g. to update reference conditions
    pub fn interlayers_mut(&mut self) -> impl Iterator<Item = &mut Interlayer> {
        self.layers.iter_mut().filter_map(|layer| match layer {
            Layer::Interlayer(interlayer) => Some(interlayer),
            Layer::Ply(_) => None,
        })
    }
}

impl TryFrom<Vec<Layer>> for Package {
    type Error = CalcError;

    fn try_from(layers: Vec<Layer>) -> CalcResult<Self> {
        Package::new(layers)
    }
}

impl From<Package> for Vec<Layer> {
    fn from(package: Package) -> Self {
        package.layers
    }
}

// ============================================================================
// Methods
// ============================================================================

/// Equivalent thickness model.
///
/// ## JSON Example
///
/// ```json
/// { "type": "ShearTransferCoef", "span": 1000.0, "beta": 9.6 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type")]
pub enum EquivalentThicknessMethod {
    /// Full composite action
    #[default]
    Monolithic,
    /// No shear transfer between plies
    NonComposite,
    /// Two-ply shear transfer coefficient model
    ShearTransferCoef {
        /// Characteristic span `a`, the panel's smaller dimension
        span: Millimeters,
        #[serde(default = "default_beta")]
        beta: f64,
    },
}

fn default_beta() -> f64 {
    DEFAULT_SHEAR_TRANSFER_BETA
}

impl EquivalentThicknessMethod {
    /// Shear transfer model with the default β
    pub fn shear_transfer(span: Millimeters) -> Self {
        EquivalentThicknessMethod::ShearTransferCoef {
            span,
            beta: DEFAULT_SHEAR_TRANSFER_BETA,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EquivalentThicknessMethod::Monolithic => "Monolithic",
            EquivalentThicknessMethod::NonComposite => "Non-Composite",
            EquivalentThicknessMethod::ShearTransferCoef { .. } => "Shear Transfer Coefficient",
        }
    }

    /// True when both values are the same model, regardless of parameters
    pub fn same_model(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Compute the effective thicknesses of a package.
    pub fn apply(&self, package: &Package) -> CalcResult<Buildup> {
        let plies: Vec<GlassPly> = package.plies().cloned().collect();
        let e = common_elastic_modulus(self, &plies)?;

        let (h_efw, h_efs, shear_transfer_coef) = match *self {
            EquivalentThicknessMethod::Monolithic => {
                let total: Millimeters = plies.iter().map(GlassPly::t_min).sum();
                (total, vec![total; plies.len()], None)
            }
            EquivalentThicknessMethod::NonComposite => {
                let power_sum = |n: i32| plies.iter().map(|p| p.t_min().0.powi(n)).sum::<f64>().powf(1.0 / n as f64);
                let h_efs = Millimeters(power_sum(2));
                (Millimeters(power_sum(3)), vec![h_efs; plies.len()], None)
            }
            EquivalentThicknessMethod::ShearTransferCoef { span, beta } => {
                let (h_efw, h_efs, gamma) = shear_transfer(self, package, e, span, beta)?;
                (h_efw, h_efs, Some(gamma))
            }
        };

        log::debug!(
            "{} buildup of {} plies: h_efw = {:.4} mm",
            self.display_name(),
            plies.len(),
            h_efw.0
        );

        Ok(Buildup {
            method: *self,
            plies,
            h_efs,
            h_efw,
            e,
            shear_transfer_coef,
        })
    }
}

fn common_elastic_modulus(method: &EquivalentThicknessMethod, plies: &[GlassPly]) -> CalcResult<MegaPascals> {
    let first = plies
        .first()
        .ok_or_else(|| CalcError::invalid_package(method.display_name(), "a package needs at least one glass ply"))?;
    let e = first.elastic_modulus();
    if plies.iter().any(|ply| ply.elastic_modulus() != e) {
        return Err(CalcError::invalid_package(
            method.display_name(),
            "the plies must have the same elastic modulus",
        ));
    }
    Ok(e)
}

fn shear_transfer(
    method: &EquivalentThicknessMethod,
    package: &Package,
    e: MegaPascals,
    span: Millimeters,
    beta: f64,
) -> CalcResult<(Millimeters, Vec<Millimeters>, f64)> {
    let (ply_1, interlayer, ply_2) = match package.layers() {
        [Layer::Ply(p1), Layer::Interlayer(il), Layer::Ply(p2)] => (p1, il, p2),
        _ => {
            return Err(CalcError::invalid_package(
                method.display_name(),
                "method is only valid for [GlassPly, Interlayer, GlassPly]",
            ))
        }
    };
    if !(span.0 > 0.0) {
        return Err(CalcError::invalid_input("span", span.to_string(), "span must be greater than zero"));
    }
    if !(beta > 0.0) {
        return Err(CalcError::invalid_input("beta", beta.to_string(), "beta must be greater than zero"));
    }

    let h1 = ply_1.t_min().0;
    let h2 = ply_2.t_min().0;
    let hv = interlayer.thickness().0;
    let g = interlayer.shear_modulus()?.0;
    let a = span.0;

    let hs = 0.5 * (h1 + h2) + hv;
    let hs1 = hs * h1 / (h1 + h2);
    let hs2 = hs * h2 / (h1 + h2);
    let is = h1 * hs2.powi(2) + h2 * hs1.powi(2);
    let gamma = 1.0 / (1.0 + beta * e.0 * is * hv / (g * hs.powi(2) * a.powi(2)));

    let h_efw3 = h1.powi(3) + h2.powi(3) + 12.0 * gamma * is;
    let h_efs_1 = (h_efw3 / (h1 + 2.0 * gamma * hs2)).sqrt();
    let h_efs_2 = (h_efw3 / (h2 + 2.0 * gamma * hs1)).sqrt();

    Ok((
        Millimeters(h_efw3.cbrt()),
        vec![Millimeters(h_efs_1), Millimeters(h_efs_2)],
        gamma,
    ))
}

// ============================================================================
// Buildup
// ============================================================================

/// Effective thicknesses of one package under one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buildup {
    /// Model that produced the thicknesses
    pub method: EquivalentThicknessMethod,
    /// Glass plies in stacking order
    pub plies: Vec<GlassPly>,
    /// Stress thickness per ply, aligned with `plies`
    pub h_efs: Vec<Millimeters>,
    /// Deflection thickness
    pub h_efw: Millimeters,
    /// Package elastic modulus
    pub e: MegaPascals,
    /// Shear transfer coefficient Γ (shear transfer model only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shear_transfer_coef: Option<f64>,
}

impl Buildup {
    /// Flexural stiffness measure E·h_efw³ used for load sharing
    pub fn stiffness(&self) -> f64 {
        self.e.0 * self.h_efw.0.powi(3)
    }

    /// (ply, h_efs) pairs
    pub fn ply_thicknesses(&self) -> impl Iterator<Item = (&GlassPly, Millimeters)> {
        self.plies.iter().zip(self.h_efs.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::InterlayerCatalog;
    use crate::units::{Celsius, Seconds};

    fn ply(nominal: f64) -> Layer {
        Layer::Ply(GlassPly::from_nominal_thickness(Millimeters(nominal), "FT").unwrap())
    }

    fn pvb() -> Layer {
        Layer::Interlayer(Interlayer::from_static(Millimeters(1.52), MegaPascals(0.44)).unwrap())
    }

    #[test]
    fn test_package_shape() {
        assert!(Package::new(vec![ply(6.0)]).is_ok());
        assert!(Package::new(vec![ply(6.0), ply(6.0)]).is_ok());
        assert!(Package::new(vec![ply(6.0), pvb(), ply(6.0), pvb(), ply(6.0)]).is_ok());

        assert!(Package::new(vec![]).is_err());
        assert!(Package::new(vec![pvb(), ply(6.0)]).is_err());
        assert!(Package::new(vec![ply(6.0), pvb()]).is_err());
        let err = Package::new(vec![ply(6.0), pvb(), pvb(), ply(6.0)]).unwrap_err();
        assert!(matches!(err, CalcError::InvalidPackage { .. }));
    }

    #[test]
    fn test_monolithic() {
        let package = Package::new(vec![ply(8.0), ply(10.0)]).unwrap();
        let buildup = EquivalentThicknessMethod::Monolithic.apply(&package).unwrap();
        assert!((buildup.h_efw.0 - 16.44).abs() < 1e-9);
        assert_eq!(buildup.h_efs.len(), 2);
        for h_efs in &buildup.h_efs {
            assert!((h_efs.0 - 16.44).abs() < 1e-9);
        }
        assert_eq!(buildup.shear_transfer_coef, None);
    }

    #[test]
    fn test_monolithic_ignores_interlayers() {
        let with_interlayer = Package::new(vec![ply(8.0), pvb(), ply(10.0)]).unwrap();
        let buildup = EquivalentThicknessMethod::Monolithic.apply(&with_interlayer).unwrap();
        assert!((buildup.h_efw.0 - 16.44).abs() < 1e-9);
    }

    #[test]
    fn test_non_composite() {
        let package = Package::new(vec![ply(8.0), ply(6.0), ply(6.0)]).unwrap();
        let buildup = EquivalentThicknessMethod::NonComposite.apply(&package).unwrap();
        assert!((buildup.h_efw.0 - 9.09479).abs() < 1e-4);
        assert_eq!(buildup.h_efs.len(), 3);
        assert!((buildup.h_efs[2].0 - 10.81126).abs() < 1e-4);
    }

    #[test]
    fn test_non_composite_single_ply_matches_monolithic() {
        let package = Package::new(vec![ply(6.0)]).unwrap();
        let layered = EquivalentThicknessMethod::NonComposite.apply(&package).unwrap();
        let mono = EquivalentThicknessMethod::Monolithic.apply(&package).unwrap();
        assert!((layered.h_efw.0 - mono.h_efw.0).abs() < 1e-12);
        assert!((layered.h_efs[0].0 - mono.h_efs[0].0).abs() < 1e-12);
    }

    #[test]
    fn test_shear_transfer() {
        let package = Package::new(vec![ply(8.0), pvb(), ply(6.0)]).unwrap();
        let buildup = EquivalentThicknessMethod::shear_transfer(Millimeters(1000.0))
            .apply(&package)
            .unwrap();
        assert!((buildup.h_efw.0 - 9.533_043_52).abs() < 1e-6);
        assert!((buildup.h_efs[0].0 - 10.265_067_2).abs() < 1e-6);
        assert!((buildup.h_efs[1].0 - 11.431_051_5).abs() < 1e-6);
        let gamma = buildup.shear_transfer_coef.unwrap();
        assert!(gamma > 0.0 && gamma < 1.0);
    }

    #[test]
    fn test_shear_transfer_bounded_by_other_models() {
        let package = Package::new(vec![ply(8.0), pvb(), ply(6.0)]).unwrap();
        let layered = EquivalentThicknessMethod::NonComposite.apply(&package).unwrap();
        let mono = EquivalentThicknessMethod::Monolithic.apply(&package).unwrap();
        let shear = EquivalentThicknessMethod::shear_transfer(Millimeters(1000.0))
            .apply(&package)
            .unwrap();
        assert!(shear.h_efw.0 > layered.h_efw.0);
        assert!(shear.h_efw.0 < mono.h_efw.0);
    }

    #[test]
    fn test_shear_transfer_with_product_table() {
        let catalog = InterlayerCatalog::default();
        let mut interlayer = Interlayer::from_product_table(Millimeters(1.52), "PVB NCSEA", &catalog).unwrap();
        interlayer.set_temperature(Celsius(50.0)).unwrap();
        interlayer.set_duration(Seconds(3.0)).unwrap();
        let package = Package::new(vec![ply(8.0), Layer::Interlayer(interlayer), ply(6.0)]).unwrap();
        let buildup = EquivalentThicknessMethod::shear_transfer(Millimeters(1000.0))
            .apply(&package)
            .unwrap();
        // G = 0.44 MPa at 50 degC / 3 s
        assert!((buildup.h_efw.0 - 9.533_043_52).abs() < 1e-6);
    }

    #[test]
    fn test_shear_transfer_requires_two_ply_laminate() {
        let method = EquivalentThicknessMethod::shear_transfer(Millimeters(1000.0));
        for layers in [
            vec![ply(8.0), ply(6.0)],
            vec![ply(8.0)],
            vec![ply(8.0), pvb(), ply(6.0), pvb(), ply(6.0)],
        ] {
            let package = Package::new(layers).unwrap();
            match method.apply(&package).unwrap_err() {
                CalcError::InvalidPackage { reason, .. } => {
                    assert!(reason.contains("only valid for [GlassPly, Interlayer, GlassPly]"))
                }
                other => panic!("expected InvalidPackage, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_shear_transfer_needs_reference_conditions() {
        let catalog = InterlayerCatalog::default();
        let interlayer = Interlayer::from_product_table(Millimeters(1.52), "PVB NCSEA", &catalog).unwrap();
        let package = Package::new(vec![ply(8.0), Layer::Interlayer(interlayer), ply(6.0)]).unwrap();
        let err = EquivalentThicknessMethod::shear_transfer(Millimeters(1000.0))
            .apply(&package)
            .unwrap_err();
        assert!(matches!(err, CalcError::ReferenceConditionsNotSet { .. }));
    }

    #[test]
    fn test_thicknesses_positive() {
        let package = Package::new(vec![ply(3.0), pvb(), ply(22.0)]).unwrap();
        for method in [
            EquivalentThicknessMethod::Monolithic,
            EquivalentThicknessMethod::NonComposite,
            EquivalentThicknessMethod::shear_transfer(Millimeters(500.0)),
        ] {
            let buildup = method.apply(&package).unwrap();
            assert!(buildup.h_efw.0 > 0.0);
            assert!(buildup.h_efs.iter().all(|h| h.0 > 0.0));
        }
    }

    #[test]
    fn test_method_serialization() {
        let json = r#"{"type": "ShearTransferCoef", "span": 1000.0}"#;
        let method: EquivalentThicknessMethod = serde_json::from_str(json).unwrap();
        assert_eq!(method, EquivalentThicknessMethod::shear_transfer(Millimeters(1000.0)));

        let json = serde_json::to_string(&EquivalentThicknessMethod::Monolithic).unwrap();
        assert_eq!(json, r#"{"type":"Monolithic"}"#);
    }

    #[test]
    fn test_package_rejects_bad_shape_on_deserialize() {
        let package = Package::new(vec![ply(6.0), pvb(), ply(6.0)]).unwrap();
        let json = serde_json::to_string(&package).unwrap();
        let back: Package = serde_json::from_str(&json).unwrap();
        assert_eq!(package, back);

        let bad = serde_json::to_string(&vec![pvb()]).unwrap();
        assert!(serde_json::from_str::<Package>(&bad).is_err());
    }

    #[test]
    fn test_deserialized_package_is_validated() {
        let ragged_table = r#"[
            {"type":"Ply","t_min":7.42,"t_nom":8.0,"glass_type":"FT","e":71700.0},
            {"type":"Interlayer","t":1.52,"modulus":{"type":"TableDriven","product":"Custom",
                "table":{"temperatures":[10.0,20.0],"durations":[1.0,3.0],"values":[]},
                "temperature":15.0,"duration":2.0}},
            {"type":"Ply","t_min":5.56,"t_nom":6.0,"glass_type":"FT","e":71700.0}
        ]"#;
        assert!(serde_json::from_str::<Package>(ragged_table).is_err());

        let negative = r#"[
            {"type":"Ply","t_min":-8.0,"glass_type":"FT","e":71700.0},
            {"type":"Interlayer","t":1.52,"modulus":{"type":"Static","g":0.44}},
            {"type":"Ply","t_min":5.56,"glass_type":"FT","e":71700.0}
        ]"#;
        assert!(serde_json::from_str::<Package>(negative).is_err());

        let negative_g = r#"[
            {"type":"Ply","t_min":7.42,"glass_type":"FT","e":71700.0},
            {"type":"Interlayer","t":1.52,"modulus":{"type":"Static","g":-0.44}},
            {"type":"Ply","t_min":5.56,"glass_type":"FT","e":71700.0}
        ]"#;
        assert!(serde_json::from_str::<Package>(negative_g).is_err());

        let valid = negative_g.replace("-0.44", "0.44");
        let package: Package = serde_json::from_str(&valid).unwrap();
        let buildup = EquivalentThicknessMethod::shear_transfer(Millimeters(1000.0))
            .apply(&package)
            .unwrap();
        assert!((buildup.h_efw.0 - 9.533_043_52).abs() < 1e-6);
    }
}
