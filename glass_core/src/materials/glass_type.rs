//! # Glass Types
//!
//! Strength model for heat-treated and annealed float glass (NCSEA Glass
//! Design Guide). A glass type carries base allowable surface and edge
//! stresses and the factors that scale them:
//!
//! - **Probability of breakage**: normal-distribution scaling from the 8/1000
//!   reference breakage rate to the target rate
//! - **Load duration**: static fatigue relative to a 3 second load
//! - **Surface treatment**: reduction for etched or sandblasted faces
//!
//! ## Formulas
//!
//! ```text
//! k_ld = 1 / (t / 3 s)^(1/n)                   n = duration factor
//! DF(r) = 1 / (1 - CoV · Φ⁻¹(1 - r))
//! k_pb(r) = DF(0.008) / DF(r)
//! σ_allow = σ_base · k_pb · k_ld · k_st
//! ```
//!
//! ## Example
//!
//! ```rust
//! use glass_core::materials::GlassTypeCatalog;
//! use glass_core::units::Seconds;
//!
//! let catalog = GlassTypeCatalog::default();
//! let ft = catalog.from_abbr("FT").unwrap();
//!
//! let allowable = ft.stress_edge().0
//!     * ft.prob_breakage_factor(1.0 / 1000.0).unwrap()
//!     * ft.load_duration_factor(Seconds(3.0)).unwrap()
//!     * ft.surf_treat_factor("None").unwrap();
//! assert!((allowable - 66.448).abs() < 1e-2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::equations::statistics::norm_ppf;
use crate::errors::{CalcError, CalcResult};
use crate::units::{MegaPascals, Seconds};

/// Breakage rate the base allowable stresses are calibrated to
pub const REFERENCE_BREAKAGE_RATIO: f64 = 0.008;

/// Load duration the base allowable stresses are calibrated to
pub const REFERENCE_DURATION: Seconds = Seconds(3.0);

/// Coefficient of variation used when none is given
pub const DEFAULT_COEF_VARIATION: f64 = 0.2;

/// Surface treatment keys defined for the built-in glass types
pub const SURFACE_TREATMENTS: [&str; 4] = ["None", "Fritted", "Acid etching", "Sandblasting"];

/// Surface treatment factors shared by the built-in glass types
pub fn standard_surf_factors() -> BTreeMap<String, f64> {
    SURFACE_TREATMENTS
        .iter()
        .zip([1.0, 1.0, 0.5, 0.5])
        .map(|(name, factor)| (name.to_string(), factor))
        .collect()
}

// ============================================================================
// Glass Type
// ============================================================================

/// A glass strength classification.
///
/// Deserialized glass types are checked like [`GlassType::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GlassTypeFields", into = "GlassTypeFields")]
pub struct GlassType {
    name: String,
    abbr: String,
    stress_surface: MegaPascals,
    stress_edge: MegaPascals,
    duration_factor: f64,
    coef_variation: f64,
    surf_factors: BTreeMap<String, f64>,
}

/// Wire form of [`GlassType`]
#[derive(Serialize, Deserialize)]
struct GlassTypeFields {
    name: String,
    abbr: String,
    stress_surface: MegaPascals,
    stress_edge: MegaPascals,
    duration_factor: f64,
    coef_variation: f64,
    surf_factors: BTreeMap<String, f64>,
}

impl TryFrom<GlassTypeFields> for GlassType {
    type Error = CalcError;

    fn try_from(fields: GlassTypeFields) -> CalcResult<Self> {
        GlassType::new(
            fields.name,
            fields.abbr,
            fields.stress_surface,
            fields.stress_edge,
            fields.duration_factor,
            fields.coef_variation,
            fields.surf_factors,
        )
    }
}

impl From<GlassType> for GlassTypeFields {
    fn from(glass_type: GlassType) -> Self {
        GlassTypeFields {
            name: glass_type.name,
            abbr: glass_type.abbr,
            stress_surface: glass_type.stress_surface,
            stress_edge: glass_type.stress_edge,
            duration_factor: glass_type.duration_factor,
            coef_variation: glass_type.coef_variation,
            surf_factors: glass_type.surf_factors,
        }
    }
}

impl GlassType {
    /// Create a glass type, validating stresses and the duration factor.
    pub fn new(
        name: impl Into<String>,
        abbr: impl Into<String>,
        stress_surface: MegaPascals,
        stress_edge: MegaPascals,
        duration_factor: f64,
        coef_variation: f64,
        surf_factors: BTreeMap<String, f64>,
    ) -> CalcResult<Self> {
        let mut glass_type = GlassType {
            name: name.into(),
            abbr: abbr.into(),
            stress_surface: MegaPascals(0.0),
            stress_edge: MegaPascals(0.0),
            duration_factor: 0.0,
            coef_variation,
            surf_factors,
        };
        glass_type.set_stress_surface(stress_surface)?;
        glass_type.set_stress_edge(stress_edge)?;
        glass_type.set_duration_factor(duration_factor)?;
        Ok(glass_type)
    }

    /// Annealed glass (AN)
    pub fn annealed() -> Self {
        Self::builtin("Annealed", "AN", 23.3, 18.3, 16.0, 0.22)
    }

    /// Heat-strengthened glass (HS)
    pub fn heat_strengthened() -> Self {
        Self::builtin("Heat-Strengthened", "HS", 46.6, 36.5, 31.7, 0.15)
    }

    /// Fully tempered glass (FT)
    pub fn fully_tempered() -> Self {
        Self::builtin("Fully Tempered", "FT", 93.1, 73.0, 47.5, 0.10)
    }

    fn builtin(name: &str, abbr: &str, surface: f64, edge: f64, duration_factor: f64, cov: f64) -> Self {
        GlassType {
            name: name.to_string(),
            abbr: abbr.to_string(),
            stress_surface: MegaPascals(surface),
            stress_edge: MegaPascals(edge),
            duration_factor,
            coef_variation: cov,
            surf_factors: standard_surf_factors(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbr(&self) -> &str {
        &self.abbr
    }

    /// Base allowable surface stress
    pub fn stress_surface(&self) -> MegaPascals {
        self.stress_surface
    }

    /// Base allowable edge stress
    pub fn stress_edge(&self) -> MegaPascals {
        self.stress_edge
    }

    pub fn duration_factor(&self) -> f64 {
        self.duration_factor
    }

    pub fn coef_variation(&self) -> f64 {
        self.coef_variation
    }

    pub fn surf_factors(&self) -> &BTreeMap<String, f64> {
        &self.surf_factors
    }

    pub fn set_stress_surface(&mut self, value: MegaPascals) -> CalcResult<()> {
        if !(value.0 >= 0.0) {
            return Err(CalcError::invalid_input(
                "stress_surface",
                value.to_string(),
                "base allowable surface stress cannot be less than zero",
            ));
        }
        self.stress_surface = value;
        Ok(())
    }

    pub fn set_stress_edge(&mut self, value: MegaPascals) -> CalcResult<()> {
        if !(value.0 >= 0.0) {
            return Err(CalcError::invalid_input(
                "stress_edge",
                value.to_string(),
                "base allowable edge stress cannot be less than zero",
            ));
        }
        self.stress_edge = value;
        Ok(())
    }

    pub fn set_duration_factor(&mut self, value: f64) -> CalcResult<()> {
        // the load duration exponent is 1 / duration_factor
        if !(value > 0.0 && value.is_finite()) {
            return Err(CalcError::invalid_input(
                "duration_factor",
                value.to_string(),
                "duration factor must be greater than zero",
            ));
        }
        self.duration_factor = value;
        Ok(())
    }

    pub fn set_coef_variation(&mut self, value: f64) {
        self.coef_variation = value;
    }

    pub fn set_surf_factors(&mut self, value: BTreeMap<String, f64>) {
        self.surf_factors = value;
    }

    /// Load duration factor relative to a 3 second load.
    pub fn load_duration_factor(&self, duration: Seconds) -> CalcResult<f64> {
        if !(duration.0 > 0.0) {
            return Err(CalcError::invalid_input(
                "duration",
                duration.to_string(),
                "duration must be greater than zero",
            ));
        }
        Ok(1.0 / (duration.0 / REFERENCE_DURATION.0).powf(1.0 / self.duration_factor))
    }

    /// Factor converting the mean breaking stress to the stress at a breakage rate.
    pub fn design_factor(&self, ratio: f64) -> CalcResult<f64> {
        let invalid = |reason: &str| CalcError::invalid_input("ratio", ratio.to_string(), reason);

        let z = norm_ppf(1.0 - ratio).ok_or_else(|| invalid("breakage ratio must be between 0 and 1"))?;
        let denominator = 1.0 - self.coef_variation * z;
        if !(denominator > 0.0) {
            return Err(invalid("coefficient of variation too large for this breakage ratio"));
        }
        Ok(1.0 / denominator)
    }

    /// Probability of breakage factor for a target breakage rate (e.g. 1/1000).
    pub fn prob_breakage_factor(&self, ratio: f64) -> CalcResult<f64> {
        self.prob_breakage_factor_from(ratio, REFERENCE_BREAKAGE_RATIO)
    }

    /// Probability of breakage factor relative to a custom reference rate.
    pub fn prob_breakage_factor_from(&self, ratio: f64, reference_ratio: f64) -> CalcResult<f64> {
        Ok(self.design_factor(reference_ratio)? / self.design_factor(ratio)?)
    }

    /// Reduction factor for a surface treatment.
    pub fn surf_treat_factor(&self, treatment: &str) -> CalcResult<f64> {
        self.surf_factors
            .get(treatment)
            .copied()
            .ok_or_else(|| CalcError::SurfaceTreatmentNotFound {
                glass_type: self.name.clone(),
                treatment: treatment.to_string(),
            })
    }

    /// Allowable stress with every factor applied.
    pub fn allowable_stress(&self, input: &AllowableStressInput) -> CalcResult<AllowableStressResult> {
        let base_stress = match input.location {
            StressLocation::Surface => self.stress_surface,
            StressLocation::Edge => self.stress_edge,
        };
        let prob_breakage_factor = self.prob_breakage_factor_from(input.breakage_ratio, input.reference_ratio)?;
        let load_duration_factor = self.load_duration_factor(input.duration)?;
        let surf_treat_factor = self.surf_treat_factor(&input.surface_treatment)?;

        Ok(AllowableStressResult {
            glass_type: self.abbr.clone(),
            location: input.location,
            base_stress,
            prob_breakage_factor,
            load_duration_factor,
            surf_treat_factor,
            allowable_stress: base_stress * (prob_breakage_factor * load_duration_factor * surf_treat_factor),
        })
    }
}

// ============================================================================
// Allowable Stress
// ============================================================================

/// Where on the ply the stress is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StressLocation {
    #[default]
    Surface,
    Edge,
}

impl StressLocation {
    pub const ALL: [StressLocation; 2] = [StressLocation::Surface, StressLocation::Edge];

    pub fn display_name(&self) -> &'static str {
        match self {
            StressLocation::Surface => "Surface",
            StressLocation::Edge => "Edge",
        }
    }
}

/// Design conditions for an allowable stress.
///
/// ## JSON Example
///
/// ```json
/// {
///   "location": "Edge",
///   "breakage_ratio": 0.001,
///   "reference_ratio": 0.008,
///   "duration": 3.0,
///   "surface_treatment": "None"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowableStressInput {
    pub location: StressLocation,
    /// Target breakage rate (e.g. 0.001 for 1/1000)
    pub breakage_ratio: f64,
    /// Breakage rate of the base stresses
    #[serde(default = "default_reference_ratio")]
    pub reference_ratio: f64,
    /// Load duration (seconds)
    pub duration: Seconds,
    pub surface_treatment: String,
}

fn default_reference_ratio() -> f64 {
    REFERENCE_BREAKAGE_RATIO
}

impl Default for AllowableStressInput {
    fn default() -> Self {
        AllowableStressInput {
            location: StressLocation::Surface,
            breakage_ratio: 1.0 / 1000.0,
            reference_ratio: REFERENCE_BREAKAGE_RATIO,
            duration: REFERENCE_DURATION,
            surface_treatment: "None".to_string(),
        }
    }
}

/// Allowable stress and the factors that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowableStressResult {
    pub glass_type: String,
    pub location: StressLocation,
    pub base_stress: MegaPascals,
    pub prob_breakage_factor: f64,
    pub load_duration_factor: f64,
    pub surf_treat_factor: f64,
    pub allowable_stress: MegaPascals,
}

// ============================================================================
// Glass Type Catalog
// ============================================================================

/// Glass types reachable by full name and by abbreviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlassTypeCatalog {
    by_name: BTreeMap<String, GlassType>,
    name_by_abbr: BTreeMap<String, String>,
}

impl GlassTypeCatalog {
    /// An empty catalog
    pub fn new() -> Self {
        GlassTypeCatalog {
            by_name: BTreeMap::new(),
            name_by_abbr: BTreeMap::new(),
        }
    }

    /// A catalog holding AN, HS and FT
    pub fn with_builtin_types() -> Self {
        let mut catalog = Self::new();
        for glass_type in [
            GlassType::annealed(),
            GlassType::heat_strengthened(),
            GlassType::fully_tempered(),
        ] {
            catalog.name_by_abbr.insert(glass_type.abbr.clone(), glass_type.name.clone());
            catalog.by_name.insert(glass_type.name.clone(), glass_type);
        }
        catalog
    }

    /// Add a glass type. Both its name and abbreviation must be unused.
    pub fn register(&mut self, glass_type: GlassType) -> CalcResult<()> {
        if self.by_name.contains_key(&glass_type.name) {
            return Err(CalcError::DuplicateName {
                name: glass_type.name.clone(),
            });
        }
        if let Some(owner) = self.name_by_abbr.get(&glass_type.abbr) {
            return Err(CalcError::DuplicateAbbreviation {
                abbr: glass_type.abbr.clone(),
                name: owner.clone(),
            });
        }

        log::debug!("registered glass type '{}' ({})", glass_type.name, glass_type.abbr);
        self.name_by_abbr.insert(glass_type.abbr.clone(), glass_type.name.clone());
        self.by_name.insert(glass_type.name.clone(), glass_type);
        Ok(())
    }

    /// Remove a glass type by name, dropping its abbreviation too.
    pub fn deregister(&mut self, name: &str) -> CalcResult<GlassType> {
        let glass_type = self.by_name.remove(name).ok_or_else(|| CalcError::GlassTypeNotFound {
            key: name.to_string(),
        })?;
        self.name_by_abbr.remove(&glass_type.abbr);
        log::debug!("deregistered glass type '{}'", name);
        Ok(glass_type)
    }

    pub fn from_name(&self, name: &str) -> CalcResult<&GlassType> {
        self.by_name.get(name).ok_or_else(|| CalcError::GlassTypeNotFound {
            key: name.to_string(),
        })
    }

    pub fn from_abbr(&self, abbr: &str) -> CalcResult<&GlassType> {
        self.name_by_abbr
            .get(abbr)
            .and_then(|name| self.by_name.get(name))
            .ok_or_else(|| CalcError::GlassTypeNotFound {
                key: abbr.to_string(),
            })
    }

    /// Look up by abbreviation, falling back to the full name
    pub fn get(&self, key: &str) -> CalcResult<&GlassType> {
        self.from_abbr(key).or_else(|_| self.from_name(key))
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Registered abbreviations, sorted
    pub fn abbreviations(&self) -> impl Iterator<Item = &str> {
        self.name_by_abbr.keys().map(String::as_str)
    }
}

impl Default for GlassTypeCatalog {
    fn default() -> Self {
        Self::with_builtin_types()
    }
}
