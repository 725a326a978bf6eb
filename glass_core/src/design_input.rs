//! # Design Input Files
//!
//! JSON description of one IGU panel, loaded from disk and turned into
//! engine types. Physical values are written with their units (`"6 mm"`,
//! `"3/8 in"`, `"1.436 kPa"`, `"10 year"`) and checked for dimension on load.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "label": "W-1",
//!   "dim_x": "4000 mm",
//!   "dim_y": "2000 mm",
//!   "pressure": "1.436 kPa",
//!   "method": { "type": "ShearTransferCoef" },
//!   "buildups": [
//!     {
//!       "label": "Outer lite",
//!       "layers": [
//!         { "type": "Ply", "nominal": "8 mm", "glass_type": "HS" },
//!         { "type": "Interlayer", "thickness": "1.52 mm", "product": "PVB NCSEA",
//!           "temperature": "30 degC", "duration": "3 sec" },
//!         { "type": "Ply", "nominal": "6 mm", "glass_type": "HS" }
//!       ]
//!     },
//!     {
//!       "label": "Inner lite",
//!       "layers": [ { "type": "Ply", "nominal": "1/4 in", "glass_type": "FT" } ]
//!     }
//!   ],
//!   "breakage": { "breakage_ratio": 0.001, "duration": "3 sec" }
//! }
//! ```
//!
//! `settings`, `breakage` and `glass_types` are optional. The shear transfer
//! span defaults to the shorter panel dimension.
//!
//! ## Example
//!
//! ```rust
//! use glass_core::design_input::{analyze, parse_design_input};
//!
//! let json = r#"{
//!     "dim_x": "4000 mm",
//!     "dim_y": "2000 mm",
//!     "pressure": "1.436 kPa",
//!     "method": { "type": "Monolithic" },
//!     "buildups": [
//!         { "layers": [ { "type": "Ply", "nominal": "6 mm", "glass_type": "FT" } ] }
//!     ]
//! }"#;
//!
//! let input = parse_design_input(json).unwrap();
//! let report = analyze(&input).unwrap();
//! assert_eq!(report.result.buildups[0].lsf, 1.0);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::equivalent_thickness::{EquivalentThicknessMethod, Layer, Package, DEFAULT_SHEAR_TRANSFER_BETA};
use crate::calculations::igu_demands::{solve, PanelInput, PanelResult};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{
    standard_surf_factors, AllowableStressInput, AllowableStressResult, GlassPly, GlassType, GlassTypeCatalog,
    Interlayer, InterlayerCatalog, StressLocation, REFERENCE_BREAKAGE_RATIO,
};
use crate::materials::glass_type::DEFAULT_COEF_VARIATION;
use crate::units::{Celsius, MegaPascals, Millimeters, Quantity, Seconds};

// ============================================================================
// Settings
// ============================================================================

/// Analysis constants a design input may override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// β of the shear transfer model (9.6 for four-side support, uniform load)
    #[serde(default = "default_beta")]
    pub shear_transfer_beta: f64,

    /// Breakage rate the base allowable stresses are calibrated to
    #[serde(default = "default_reference_ratio")]
    pub reference_breakage_ratio: f64,
}

fn default_beta() -> f64 {
    DEFAULT_SHEAR_TRANSFER_BETA
}

fn default_reference_ratio() -> f64 {
    REFERENCE_BREAKAGE_RATIO
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            shear_transfer_beta: DEFAULT_SHEAR_TRANSFER_BETA,
            reference_breakage_ratio: REFERENCE_BREAKAGE_RATIO,
        }
    }
}

// ============================================================================
// Input Schema
// ============================================================================

/// Equivalent thickness model as written in a design input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MethodSpec {
    Monolithic,
    NonComposite,
    ShearTransferCoef {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Quantity>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        beta: Option<f64>,
    },
}

/// One layer as written in a design input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerSpec {
    /// Give either `nominal` or `actual`
    Ply {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nominal: Option<Quantity>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        actual: Option<Quantity>,
        glass_type: String,
    },
    /// Give either `product` (with `temperature` and `duration`) or `shear_modulus`
    Interlayer {
        thickness: Quantity,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        product: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shear_modulus: Option<Quantity>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        temperature: Option<Quantity>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<Quantity>,
    },
}

/// One lite of the unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildupSpec {
    #[serde(default)]
    pub label: String,
    pub layers: Vec<LayerSpec>,
}

/// Conditions for the allowable stress of every ply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakageSpec {
    #[serde(default)]
    pub location: StressLocation,
    pub breakage_ratio: f64,
    pub duration: Quantity,
    #[serde(default = "default_surface_treatment")]
    pub surface_treatment: String,
}

fn default_surface_treatment() -> String {
    "None".to_string()
}

/// A glass type registered by the design input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlassTypeSpec {
    pub name: String,
    pub abbr: String,
    pub stress_surface: Quantity,
    pub stress_edge: Quantity,
    pub duration_factor: f64,
    #[serde(default = "default_coef_variation")]
    pub coef_variation: f64,
    #[serde(default = "standard_surf_factors")]
    pub surf_factors: BTreeMap<String, f64>,
}

fn default_coef_variation() -> f64 {
    DEFAULT_COEF_VARIATION
}

/// Root of a design input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    #[serde(default)]
    pub label: String,
    pub dim_x: Quantity,
    pub dim_y: Quantity,
    pub pressure: Quantity,
    pub method: MethodSpec,
    pub buildups: Vec<BuildupSpec>,
    #[serde(default)]
    pub settings: AnalysisSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakage: Option<BreakageSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub glass_types: Vec<GlassTypeSpec>,
}

// ============================================================================
// Conversion
// ============================================================================

impl GlassTypeSpec {
    fn to_glass_type(&self) -> CalcResult<GlassType> {
        GlassType::new(
            self.name.clone(),
            self.abbr.clone(),
            MegaPascals::try_from(&self.stress_surface)?,
            MegaPascals::try_from(&self.stress_edge)?,
            self.duration_factor,
            self.coef_variation,
            self.surf_factors.clone(),
        )
    }
}

impl LayerSpec {
    fn to_layer(&self, glass_types: &GlassTypeCatalog, interlayers: &InterlayerCatalog) -> CalcResult<Layer> {
        match self {
            LayerSpec::Ply {
                nominal,
                actual,
                glass_type,
            } => {
                glass_types.get(glass_type)?;
                let ply = match (nominal, actual) {
                    (Some(nominal), None) => GlassPly::from_nominal_quantity(nominal, glass_type.as_str())?,
                    (None, Some(actual)) => {
                        GlassPly::from_actual_thickness(Millimeters::try_from(actual)?, glass_type.as_str())?
                    }
                    _ => {
                        return Err(CalcError::invalid_input(
                            "ply",
                            glass_type.as_str(),
                            "give exactly one of 'nominal' or 'actual'",
                        ))
                    }
                };
                Ok(Layer::Ply(ply))
            }
            LayerSpec::Interlayer {
                thickness,
                product,
                shear_modulus,
                temperature,
                duration,
            } => {
                let t = Millimeters::try_from(thickness)?;
                let interlayer = match (product, shear_modulus) {
                    (Some(product), None) => {
                        let mut interlayer = Interlayer::from_product_table(t, product, interlayers)?;
                        if let Some(temperature) = temperature {
                            interlayer.set_temperature(Celsius::try_from(temperature)?)?;
                        }
                        if let Some(duration) = duration {
                            interlayer.set_duration(Seconds::try_from(duration)?)?;
                        }
                        interlayer
                    }
                    (None, Some(g)) => Interlayer::from_static(t, MegaPascals::try_from(g)?)?,
                    _ => {
                        return Err(CalcError::invalid_input(
                            "interlayer",
                            thickness.to_string(),
                            "give exactly one of 'product' or 'shear_modulus'",
                        ))
                    }
                };
                Ok(Layer::Interlayer(interlayer))
            }
        }
    }
}

impl DesignInput {
    /// Glass type catalog with the built-ins plus any types this input defines
    pub fn glass_type_catalog(&self) -> CalcResult<GlassTypeCatalog> {
        let mut catalog = GlassTypeCatalog::default();
        for spec in &self.glass_types {
            catalog.register(spec.to_glass_type()?)?;
        }
        Ok(catalog)
    }

    fn method(&self, dim_x: Millimeters, dim_y: Millimeters) -> CalcResult<EquivalentThicknessMethod> {
        Ok(match &self.method {
            MethodSpec::Monolithic => EquivalentThicknessMethod::Monolithic,
            MethodSpec::NonComposite => EquivalentThicknessMethod::NonComposite,
            MethodSpec::ShearTransferCoef { span, beta } => EquivalentThicknessMethod::ShearTransferCoef {
                span: match span {
                    Some(span) => Millimeters::try_from(span)?,
                    None => {
                        if dim_x.0 <= dim_y.0 {
                            dim_x
                        } else {
                            dim_y
                        }
                    }
                },
                beta: beta.unwrap_or(self.settings.shear_transfer_beta),
            },
        })
    }

    /// Resolve every quantity and build the panel for the solver.
    pub fn to_panel_input(
        &self,
        glass_types: &GlassTypeCatalog,
        interlayers: &InterlayerCatalog,
    ) -> CalcResult<PanelInput> {
        let dim_x = Millimeters::try_from(&self.dim_x)?;
        let dim_y = Millimeters::try_from(&self.dim_y)?;
        let pressure = MegaPascals::try_from(&self.pressure)?;
        let method = self.method(dim_x, dim_y)?;

        let mut buildups = Vec::with_capacity(self.buildups.len());
        for spec in &self.buildups {
            let layers = spec
                .layers
                .iter()
                .map(|layer| layer.to_layer(glass_types, interlayers))
                .collect::<CalcResult<Vec<_>>>()?;
            buildups.push(method.apply(&Package::new(layers)?)?);
        }

        Ok(PanelInput {
            label: self.label.clone(),
            dim_x,
            dim_y,
            pressure,
            buildups,
        })
    }

    /// Allowable stress conditions, if the input asks for them
    pub fn allowable_stress_input(&self) -> CalcResult<Option<AllowableStressInput>> {
        self.breakage
            .as_ref()
            .map(|breakage| {
                Ok(AllowableStressInput {
                    location: breakage.location,
                    breakage_ratio: breakage.breakage_ratio,
                    reference_ratio: self.settings.reference_breakage_ratio,
                    duration: Seconds::try_from(&breakage.duration)?,
                    surface_treatment: breakage.surface_treatment.clone(),
                })
            })
            .transpose()
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Everything computed for one design input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    pub label: String,
    /// Buildup labels, aligned with `panel.buildups`
    pub buildup_labels: Vec<String>,
    pub panel: PanelInput,
    pub result: PanelResult,
    /// Allowable stress per ply, aligned with `panel.buildups[i].plies`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowable: Vec<Vec<AllowableStressResult>>,
}

/// Build the panel from a design input, solve it and attach allowable stresses.
pub fn analyze(input: &DesignInput) -> CalcResult<DesignReport> {
    let glass_types = input.glass_type_catalog()?;
    let interlayers = InterlayerCatalog::default();
    analyze_with(input, &glass_types, &interlayers)
}

/// Same as [`analyze`] with caller-supplied catalogs.
pub fn analyze_with(
    input: &DesignInput,
    glass_types: &GlassTypeCatalog,
    interlayers: &InterlayerCatalog,
) -> CalcResult<DesignReport> {
    let panel = input.to_panel_input(glass_types, interlayers)?;
    let result = solve(&panel)?;

    let allowable = match input.allowable_stress_input()? {
        Some(conditions) => panel
            .buildups
            .iter()
            .map(|buildup| {
                buildup
                    .plies
                    .iter()
                    .map(|ply| glass_types.get(ply.glass_type())?.allowable_stress(&conditions))
                    .collect::<CalcResult<Vec<_>>>()
            })
            .collect::<CalcResult<Vec<_>>>()?,
        None => Vec::new(),
    };

    log::info!("analyzed '{}' with {} buildups", input.label, panel.buildups.len());

    Ok(DesignReport {
        label: input.label.clone(),
        buildup_labels: input.buildups.iter().map(|b| b.label.clone()).collect(),
        panel,
        result,
        allowable,
    })
}

// ============================================================================
// Loading
// ============================================================================

/// Parse a design input from JSON text.
pub fn parse_design_input(json: &str) -> CalcResult<DesignInput> {
    serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

/// Load a design input from a JSON file.
///
/// # Returns
///
/// * `Ok(DesignInput)` - Parsed successfully
/// * `Err(CalcError::FileError)` - File could not be read
/// * `Err(CalcError::SerializationError)` - Invalid JSON or a malformed quantity
pub fn load_design_input(path: &Path) -> CalcResult<DesignInput> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let input: DesignInput = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    log::debug!("loaded design input '{}' from {}", input.label, path.display());
    Ok(input)
}
