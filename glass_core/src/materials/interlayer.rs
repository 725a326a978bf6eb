//! # Interlayers
//!
//! Polymer interlayers (PVB, ionoplast) bonding the plies of a laminate.
//! The interlayer's shear modulus G controls how much shear it transfers
//! between plies, and for real products G depends strongly on temperature
//! and load duration.
//!
//! An interlayer's modulus comes from one of two sources:
//!
//! - **Static**: a single constant G
//! - **Table-driven**: a registered product table, evaluated at a reference
//!   temperature and load duration that must both be set before G is read
//!
//! ## Table Interpolation
//!
//! Product tables are complete temperature × duration grids. Between grid
//! points G is interpolated bilinearly, with the duration axis measured in
//! log(seconds). Points outside the grid are refused rather than extrapolated.
//!
//! ## Example
//!
//! ```rust
//! use glass_core::materials::{Interlayer, InterlayerCatalog};
//! use glass_core::units::{Celsius, Millimeters, Seconds};
//!
//! let catalog = InterlayerCatalog::default();
//! let mut pvb = Interlayer::from_product_table(Millimeters(1.52), "PVB NCSEA", &catalog).unwrap();
//!
//! // G is unavailable until the reference conditions are set
//! assert!(pvb.shear_modulus().is_err());
//!
//! pvb.set_temperature(Celsius(30.0)).unwrap();
//! pvb.set_duration(Seconds(3.0)).unwrap();
//! assert!((pvb.shear_modulus().unwrap().0 - 0.971).abs() < 1e-12);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::equations::interpolation::{lerp, locate, AxisPosition};
use crate::errors::{CalcError, CalcResult};
use crate::units::{
    Celsius, MegaPascals, Millimeters, Seconds, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
    SECONDS_PER_MONTH, SECONDS_PER_YEAR,
};

/// Registered name of the built-in ionoplast table
pub const IONOPLAST_NCSEA: &str = "Ionoplast Interlayer NCSEA";

/// Registered name of the built-in PVB table
pub const PVB_NCSEA: &str = "PVB NCSEA";

// ============================================================================
// Shear Modulus Tables
// ============================================================================

/// One (temperature, duration, G) entry used to register a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearModulusPoint {
    pub temperature: Celsius,
    pub duration: Seconds,
    pub g: MegaPascals,
}

impl ShearModulusPoint {
    pub fn new(temperature: Celsius, duration: Seconds, g: MegaPascals) -> Self {
        ShearModulusPoint { temperature, duration, g }
    }
}

/// A complete temperature × duration grid of shear modulus values.
///
/// Axes are ascending. `values` is stored duration-major:
/// `values[d * temperatures.len() + t]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShearModulusGrid", into = "ShearModulusGrid")]
pub struct ShearModulusTable {
    temperatures: Vec<f64>,
    durations: Vec<f64>,
    values: Vec<f64>,
}

/// Wire form of [`ShearModulusTable`], checked on the way in
#[derive(Serialize, Deserialize)]
struct ShearModulusGrid {
    temperatures: Vec<f64>,
    durations: Vec<f64>,
    values: Vec<f64>,
}

impl TryFrom<ShearModulusGrid> for ShearModulusTable {
    type Error = CalcError;

    fn try_from(grid: ShearModulusGrid) -> CalcResult<Self> {
        ShearModulusTable::checked("table", grid.temperatures, grid.durations, grid.values)
    }
}

impl From<ShearModulusTable> for ShearModulusGrid {
    fn from(table: ShearModulusTable) -> Self {
        ShearModulusGrid {
            temperatures: table.temperatures,
            durations: table.durations,
            values: table.values,
        }
    }
}

impl ShearModulusTable {
    /// Build a table from scattered points, which must cover every
    /// temperature/duration combination exactly once.
    pub fn from_points(product: &str, points: &[ShearModulusPoint]) -> CalcResult<Self> {
        if points.is_empty() {
            return Err(CalcError::not_rectangular(product, "no data points provided"));
        }

        let temperatures = unique_sorted(points.iter().map(|p| p.temperature.0));
        let durations = unique_sorted(points.iter().map(|p| p.duration.0));
        let expected = temperatures.len() * durations.len();
        if expected != points.len() {
            return Err(CalcError::not_rectangular(
                product,
                format!(
                    "{} temperatures x {} durations requires {} points, found {}",
                    temperatures.len(),
                    durations.len(),
                    expected,
                    points.len()
                ),
            ));
        }

        let mut cells: Vec<Option<f64>> = vec![None; expected];
        for point in points {
            let t = index_of(&temperatures, point.temperature.0);
            let d = index_of(&durations, point.duration.0);
            let cell = &mut cells[d * temperatures.len() + t];
            if cell.is_some() {
                return Err(CalcError::not_rectangular(
                    product,
                    format!("duplicate point at ({}, {})", point.temperature, point.duration),
                ));
            }
            *cell = Some(point.g.0);
        }

        // Count matched and no cell was written twice, so every cell is filled
        let values = cells.into_iter().flatten().collect();
        Self::checked(product, temperatures, durations, values)
    }

    /// Check a full grid: ascending axes, positive durations and moduli, one value per cell.
    fn checked(product: &str, temperatures: Vec<f64>, durations: Vec<f64>, values: Vec<f64>) -> CalcResult<Self> {
        let not_rectangular = |reason: String| CalcError::not_rectangular(product, reason);

        for (name, axis) in [("temperature", &temperatures), ("duration", &durations)] {
            if axis.is_empty() {
                return Err(not_rectangular(format!("{} axis is empty", name)));
            }
            if axis.iter().any(|v| !v.is_finite()) || axis.windows(2).any(|pair| !(pair[0] < pair[1])) {
                return Err(not_rectangular(format!("{} axis must be finite and strictly ascending", name)));
            }
        }
        if !(durations[0] > 0.0) {
            return Err(not_rectangular("durations must be greater than zero".to_string()));
        }

        let expected = temperatures.len() * durations.len();
        if values.len() != expected {
            return Err(not_rectangular(format!(
                "{} temperatures x {} durations requires {} values, found {}",
                temperatures.len(),
                durations.len(),
                expected,
                values.len()
            )));
        }
        if values.iter().any(|g| !(*g > 0.0 && g.is_finite())) {
            return Err(not_rectangular("shear modulus values must be greater than zero".to_string()));
        }

        Ok(ShearModulusTable {
            temperatures,
            durations,
            values,
        })
    }

    /// Build a table from already sorted axes and duration-major rows.
    fn from_grid(temperatures: &[f64], durations: &[f64], rows: &[&[f64]]) -> Self {
        ShearModulusTable {
            temperatures: temperatures.to_vec(),
            durations: durations.to_vec(),
            values: rows.iter().flat_map(|row| row.iter().copied()).collect(),
        }
    }

    /// Tabulated temperatures, ascending
    pub fn temperatures(&self) -> impl Iterator<Item = Celsius> + '_ {
        self.temperatures.iter().map(|&t| Celsius(t))
    }

    /// Tabulated durations, ascending
    pub fn durations(&self) -> impl Iterator<Item = Seconds> + '_ {
        self.durations.iter().map(|&d| Seconds(d))
    }

    fn value(&self, t: usize, d: usize) -> f64 {
        self.values[d * self.temperatures.len() + t]
    }

    /// Evaluate G at a temperature and duration inside the grid.
    ///
    /// Grid points return the tabulated value unchanged.
    pub fn shear_modulus(&self, product: &str, temperature: Celsius, duration: Seconds) -> CalcResult<MegaPascals> {
        let out_of_bounds = || CalcError::Extrapolation {
            product: product.to_string(),
            temperature: temperature.to_string(),
            duration: duration.to_string(),
        };

        let (t_lo, t_hi, t_frac) = bracket(locate(&self.temperatures, temperature.0)).ok_or_else(out_of_bounds)?;

        let log_durations: Vec<f64> = self.durations.iter().map(|d| d.ln()).collect();
        let d_position = if duration.0 > 0.0 {
            locate(&log_durations, duration.0.ln())
        } else {
            AxisPosition::OutOfBounds
        };
        let (d_lo, d_hi, d_frac) = bracket(d_position).ok_or_else(out_of_bounds)?;

        let short = lerp(self.value(t_lo, d_lo), self.value(t_hi, d_lo), t_frac);
        let long = lerp(self.value(t_lo, d_hi), self.value(t_hi, d_hi), t_frac);
        Ok(MegaPascals(lerp(short, long, d_frac)))
    }
}

fn bracket(position: AxisPosition) -> Option<(usize, usize, f64)> {
    match position {
        AxisPosition::Exact(i) => Some((i, i, 0.0)),
        AxisPosition::Between { lo, t } => Some((lo, lo + 1, t)),
        AxisPosition::OutOfBounds => None,
    }
}

/// Relative tolerance for merging axis values that differ only by unit-conversion noise
const AXIS_TOLERANCE: f64 = 1e-9;

fn same_axis_value(a: f64, b: f64) -> bool {
    (a - b).abs() <= AXIS_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

fn unique_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup_by(|a, b| same_axis_value(*a, *b));
    sorted
}

fn index_of(axis: &[f64], value: f64) -> usize {
    axis.iter()
        .position(|&v| same_axis_value(v, value))
        .unwrap_or_default()
}

// ============================================================================
// Built-in Products
// ============================================================================

static IONOPLAST_TABLE: Lazy<Arc<ShearModulusTable>> = Lazy::new(|| {
    let temperatures = [10.0, 20.0, 24.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];
    let durations = [
        1.0,
        3.0,
        SECONDS_PER_MINUTE,
        SECONDS_PER_HOUR,
        SECONDS_PER_DAY,
        SECONDS_PER_MONTH,
        10.0 * SECONDS_PER_YEAR,
    ];
    let rows: [&[f64]; 7] = [
        &[240.0, 217.0, 200.0, 151.0, 77.0, 36.2, 11.8, 3.77, 1.55],
        &[236.0, 211.0, 193.0, 141.0, 63.0, 26.4, 8.18, 2.93, 1.32],
        &[225.0, 195.0, 173.0, 110.0, 30.7, 11.3, 3.64, 1.88, 0.83],
        &[206.0, 169.0, 142.0, 59.9, 9.28, 4.20, 1.70, 0.84, 0.32],
        &[190.0, 146.0, 111.0, 49.7, 4.54, 2.82, 1.29, 0.59, 0.25],
        &[171.0, 112.0, 73.2, 11.6, 3.29, 2.18, 1.08, 0.48, 0.21],
        &[153.0, 86.6, 26.0, 5.31, 2.95, 2.00, 0.97, 0.45, 0.18],
    ];
    Arc::new(ShearModulusTable::from_grid(&temperatures, &durations, &rows))
});

static PVB_TABLE: Lazy<Arc<ShearModulusTable>> = Lazy::new(|| {
    let temperatures = [20.0, 30.0, 40.0, 50.0];
    let durations = [
        3.0,
        SECONDS_PER_MINUTE,
        SECONDS_PER_HOUR,
        SECONDS_PER_DAY,
        SECONDS_PER_MONTH,
        SECONDS_PER_YEAR,
    ];
    let rows: [&[f64]; 6] = [
        &[8.060, 0.971, 0.610, 0.440],
        &[1.640, 0.753, 0.455, 0.290],
        &[0.840, 0.441, 0.234, 0.052],
        &[0.508, 0.281, 0.234, 0.052],
        &[0.372, 0.069, 0.052, 0.052],
        &[0.266, 0.052, 0.052, 0.052],
    ];
    Arc::new(ShearModulusTable::from_grid(&temperatures, &durations, &rows))
});

// ============================================================================
// Interlayer Catalog
// ============================================================================

/// Registry of interlayer product tables, keyed by product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterlayerCatalog {
    products: BTreeMap<String, Arc<ShearModulusTable>>,
}

impl InterlayerCatalog {
    /// An empty catalog
    pub fn new() -> Self {
        InterlayerCatalog {
            products: BTreeMap::new(),
        }
    }

    /// A catalog holding the ionoplast and PVB tables
    pub fn with_builtin_products() -> Self {
        let mut products = BTreeMap::new();
        products.insert(IONOPLAST_NCSEA.to_string(), Arc::clone(&IONOPLAST_TABLE));
        products.insert(PVB_NCSEA.to_string(), Arc::clone(&PVB_TABLE));
        InterlayerCatalog { products }
    }

    /// Register a product table. An existing product of the same name is replaced.
    pub fn register_product(&mut self, name: impl Into<String>, points: &[ShearModulusPoint]) -> CalcResult<()> {
        let name = name.into();
        let table = ShearModulusTable::from_points(&name, points)?;
        log::debug!(
            "registered interlayer product '{}' ({} temperatures x {} durations)",
            name,
            table.temperatures.len(),
            table.durations.len()
        );
        if self.products.insert(name.clone(), Arc::new(table)).is_some() {
            log::debug!("interlayer product '{}' replaced an existing table", name);
        }
        Ok(())
    }

    /// Remove a product
    pub fn deregister_product(&mut self, name: &str) -> CalcResult<()> {
        self.products
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CalcError::ProductNotFound {
                product: name.to_string(),
            })
    }

    /// Look up a product table
    pub fn product(&self, name: &str) -> CalcResult<Arc<ShearModulusTable>> {
        self.products
            .get(name)
            .cloned()
            .ok_or_else(|| CalcError::ProductNotFound {
                product: name.to_string(),
            })
    }

    /// Registered product names, sorted
    pub fn product_names(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }
}

impl Default for InterlayerCatalog {
    fn default() -> Self {
        Self::with_builtin_products()
    }
}

// ============================================================================
// Interlayer
// ============================================================================

/// Source of an interlayer's shear modulus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShearModulus {
    /// Constant G
    Static { g: MegaPascals },
    /// G from a product table at a reference temperature and duration
    TableDriven {
        product: String,
        table: Arc<ShearModulusTable>,
        temperature: Option<Celsius>,
        duration: Option<Seconds>,
    },
}

/// An interlayer of a laminated package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InterlayerFields", into = "InterlayerFields")]
pub struct Interlayer {
    t: Millimeters,
    modulus: ShearModulus,
}

/// Wire form of [`Interlayer`]
#[derive(Serialize, Deserialize)]
struct InterlayerFields {
    t: Millimeters,
    modulus: ShearModulus,
}

impl TryFrom<InterlayerFields> for Interlayer {
    type Error = CalcError;

    fn try_from(fields: InterlayerFields) -> CalcResult<Self> {
        match fields.modulus {
            ShearModulus::Static { g } => Interlayer::from_static(fields.t, g),
            ShearModulus::TableDriven {
                product,
                table,
                temperature,
                duration,
            } => {
                validate_thickness(fields.t)?;
                let mut interlayer = Interlayer {
                    t: fields.t,
                    modulus: ShearModulus::TableDriven {
                        product,
                        table,
                        temperature,
                        duration: None,
                    },
                };
                if let Some(duration) = duration {
                    interlayer.set_duration(duration)?;
                }
                Ok(interlayer)
            }
        }
    }
}

impl From<Interlayer> for InterlayerFields {
    fn from(interlayer: Interlayer) -> Self {
        InterlayerFields {
            t: interlayer.t,
            modulus: interlayer.modulus,
        }
    }
}

impl Interlayer {
    /// Interlayer with a constant shear modulus
    pub fn from_static(t: Millimeters, g: MegaPascals) -> CalcResult<Self> {
        validate_thickness(t)?;
        if !(g.0 > 0.0 && g.0.is_finite()) {
            return Err(CalcError::invalid_input(
                "G",
                g.to_string(),
                "shear modulus must be greater than zero",
            ));
        }
        Ok(Interlayer {
            t,
            modulus: ShearModulus::Static { g },
        })
    }

    /// Interlayer backed by a product registered in `catalog`.
    ///
    /// Temperature and duration start unset.
    pub fn from_product_table(t: Millimeters, product: &str, catalog: &InterlayerCatalog) -> CalcResult<Self> {
        validate_thickness(t)?;
        let table = catalog.product(product)?;
        Ok(Interlayer {
            t,
            modulus: ShearModulus::TableDriven {
                product: product.to_string(),
                table,
                temperature: None,
                duration: None,
            },
        })
    }

    /// Thickness
    pub fn thickness(&self) -> Millimeters {
        self.t
    }

    /// Source of the shear modulus
    pub fn modulus_source(&self) -> &ShearModulus {
        &self.modulus
    }

    /// Reference temperature, `None` until set
    pub fn temperature(&self) -> CalcResult<Option<Celsius>> {
        match &self.modulus {
            ShearModulus::Static { .. } => Err(CalcError::static_interlayer("temperature")),
            ShearModulus::TableDriven { temperature, .. } => Ok(*temperature),
        }
    }

    /// Reference load duration, `None` until set
    pub fn duration(&self) -> CalcResult<Option<Seconds>> {
        match &self.modulus {
            ShearModulus::Static { .. } => Err(CalcError::static_interlayer("duration")),
            ShearModulus::TableDriven { duration, .. } => Ok(*duration),
        }
    }

    pub fn set_temperature(&mut self, value: Celsius) -> CalcResult<()> {
        match &mut self.modulus {
            ShearModulus::Static { .. } => Err(CalcError::static_interlayer("temperature")),
            ShearModulus::TableDriven { temperature, .. } => {
                *temperature = Some(value);
                Ok(())
            }
        }
    }

    pub fn set_duration(&mut self, value: Seconds) -> CalcResult<()> {
        if !(value.0 > 0.0) {
            return Err(CalcError::invalid_input(
                "duration",
                value.to_string(),
                "duration must be greater than zero",
            ));
        }
        match &mut self.modulus {
            ShearModulus::Static { .. } => Err(CalcError::static_interlayer("duration")),
            ShearModulus::TableDriven { duration, .. } => {
                *duration = Some(value);
                Ok(())
            }
        }
    }

    /// Shear modulus G at the current reference conditions
    pub fn shear_modulus(&self) -> CalcResult<MegaPascals> {
        match &self.modulus {
            ShearModulus::Static { g } => Ok(*g),
            ShearModulus::TableDriven {
                product,
                table,
                temperature,
                duration,
            } => match (temperature, duration) {
                (Some(temperature), Some(duration)) => table.shear_modulus(product, *temperature, *duration),
                _ => Err(CalcError::ReferenceConditionsNotSet {
                    product: product.clone(),
                }),
            },
        }
    }
}

fn validate_thickness(t: Millimeters) -> CalcResult<()> {
    if !(t.0 > 0.0 && t.0.is_finite()) {
        return Err(CalcError::invalid_input(
            "t",
            t.to_string(),
            "thickness must be greater than zero",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ionoplast(temperature: f64, duration: Seconds) -> Interlayer {
        let catalog = InterlayerCatalog::default();
        let mut layer = Interlayer::from_product_table(Millimeters(1.52), IONOPLAST_NCSEA, &catalog).unwrap();
        layer.set_temperature(Celsius(temperature)).unwrap();
        layer.set_duration(duration).unwrap();
        layer
    }

    #[test]
    fn test_static_interlayer() {
        let layer = Interlayer::from_static(Millimeters(1.52), MegaPascals(0.44)).unwrap();
        assert_eq!(layer.shear_modulus().unwrap(), MegaPascals(0.44));
        assert_eq!(layer.thickness(), Millimeters(1.52));
    }

    #[test]
    fn test_static_invalid_inputs() {
        match Interlayer::from_static(Millimeters(-1.52), MegaPascals(0.44)).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "t"),
            other => panic!("unexpected {:?}", other),
        }
        match Interlayer::from_static(Millimeters(1.52), MegaPascals(-0.44)).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "G"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_static_has_no_reference_conditions() {
        let mut layer = Interlayer::from_static(Millimeters(1.52), MegaPascals(0.44)).unwrap();
        assert!(matches!(layer.temperature(), Err(CalcError::StaticInterlayer { .. })));
        assert!(matches!(layer.duration(), Err(CalcError::StaticInterlayer { .. })));
        assert!(layer.set_temperature(Celsius(30.0)).is_err());
        assert!(layer.set_duration(Seconds(3.0)).is_err());
    }

    #[test]
    fn test_product_table_lookup() {
        let catalog = InterlayerCatalog::default();
        let layer = Interlayer::from_product_table(Millimeters(1.52), IONOPLAST_NCSEA, &catalog).unwrap();
        assert_eq!(layer.temperature().unwrap(), None);
        assert_eq!(layer.duration().unwrap(), None);
        assert!(matches!(
            layer.shear_modulus(),
            Err(CalcError::ReferenceConditionsNotSet { .. })
        ));

        let err = Interlayer::from_product_table(Millimeters(1.52), "Not a product", &catalog).unwrap_err();
        assert!(matches!(err, CalcError::ProductNotFound { .. }));
        let err = Interlayer::from_product_table(Millimeters(0.0), PVB_NCSEA, &catalog).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_grid_point_returns_table_value() {
        let layer = ionoplast(40.0, Seconds::from_months(1.0));
        assert_eq!(layer.shear_modulus().unwrap(), MegaPascals(3.29));

        let layer = ionoplast(80.0, Seconds::from_years(10.0));
        assert_eq!(layer.shear_modulus().unwrap(), MegaPascals(0.18));
    }

    #[test]
    fn test_interpolate_temperature() {
        let layer = ionoplast(35.0, Seconds::from_days(1.0));
        let g = layer.shear_modulus().unwrap();
        assert!((g.0 - (49.7 + 4.54) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_log_duration() {
        // Halfway between 1 s and 3 s in log space is sqrt(3) s
        let layer = ionoplast(10.0, Seconds(3f64.sqrt()));
        let g = layer.shear_modulus().unwrap();
        assert!((g.0 - 238.0).abs() < 1e-9);
    }

    #[test]
    fn test_extrapolation_refused() {
        let layer = ionoplast(35.0, Seconds::from_years(20.0));
        assert!(matches!(layer.shear_modulus(), Err(CalcError::Extrapolation { .. })));

        let layer = ionoplast(5.0, Seconds(3.0));
        assert!(matches!(layer.shear_modulus(), Err(CalcError::Extrapolation { .. })));
    }

    #[test]
    fn test_register_rectangular_product() {
        let mut catalog = InterlayerCatalog::new();
        let points = [
            ShearModulusPoint::new(Celsius(20.0), Seconds(3.0), MegaPascals(240.0)),
            ShearModulusPoint::new(Celsius(30.0), Seconds(3.0), MegaPascals(217.0)),
            ShearModulusPoint::new(Celsius(20.0), Seconds(10.0), MegaPascals(200.0)),
            ShearModulusPoint::new(Celsius(30.0), Seconds(10.0), MegaPascals(151.0)),
        ];
        catalog.register_product("product 1", &points).unwrap();
        assert_eq!(catalog.product_names().collect::<Vec<_>>(), vec!["product 1"]);

        let mut layer = Interlayer::from_product_table(Millimeters(1.52), "product 1", &catalog).unwrap();
        layer.set_temperature(Celsius(30.0)).unwrap();
        layer.set_duration(Seconds(10.0)).unwrap();
        assert_eq!(layer.shear_modulus().unwrap(), MegaPascals(151.0));
    }

    #[test]
    fn test_register_rejects_ragged_table() {
        let mut catalog = InterlayerCatalog::new();
        let points = [
            ShearModulusPoint::new(Celsius(20.0), Seconds(3.0), MegaPascals(240.0)),
            ShearModulusPoint::new(Celsius(30.0), Seconds(3.0), MegaPascals(217.0)),
            ShearModulusPoint::new(Celsius(40.0), Seconds(3.0), MegaPascals(200.0)),
            ShearModulusPoint::new(Celsius(20.0), Seconds(10.0), MegaPascals(151.0)),
            ShearModulusPoint::new(Celsius(30.0), Seconds(10.0), MegaPascals(77.0)),
        ];
        let err = catalog.register_product("product 1", &points).unwrap_err();
        assert!(matches!(err, CalcError::TableNotRectangular { .. }));
        assert_eq!(catalog.product_names().count(), 0);
    }

    #[test]
    fn test_register_rejects_duplicate_points() {
        let mut catalog = InterlayerCatalog::new();
        let points = [
            ShearModulusPoint::new(Celsius(20.0), Seconds(3.0), MegaPascals(240.0)),
            ShearModulusPoint::new(Celsius(20.0), Seconds(3.0), MegaPascals(217.0)),
            ShearModulusPoint::new(Celsius(30.0), Seconds(10.0), MegaPascals(200.0)),
            ShearModulusPoint::new(Celsius(30.0), Seconds(10.0), MegaPascals(151.0)),
        ];
        let err = catalog.register_product("product 1", &points).unwrap_err();
        assert!(matches!(err, CalcError::TableNotRectangular { .. }));
    }

    #[test]
    fn test_deregister_product() {
        let mut catalog = InterlayerCatalog::default();
        catalog.deregister_product(PVB_NCSEA).unwrap();
        assert!(catalog.product(PVB_NCSEA).is_err());
        assert!(catalog.deregister_product(PVB_NCSEA).is_err());
        assert!(catalog.product(IONOPLAST_NCSEA).is_ok());
    }

    #[test]
    fn test_builtin_tables_are_shared() {
        let a = InterlayerCatalog::default().product(PVB_NCSEA).unwrap();
        let b = InterlayerCatalog::default().product(PVB_NCSEA).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.temperatures().count(), 4);
        assert_eq!(a.durations().count(), 6);
    }

    #[test]
    fn test_serde_keeps_table_and_conditions() {
        let layer = ionoplast(24.0, Seconds(3.0));
        let json = serde_json::to_string(&layer).unwrap();
        let back: Interlayer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layer);
        assert_eq!(back.shear_modulus().unwrap().0, 193.0);
    }

    #[test]
    fn test_deserialize_rejects_ragged_table() {
        let json = r#"{"t":1.52,"modulus":{"type":"TableDriven","product":"Custom",
            "table":{"temperatures":[10.0,20.0],"durations":[1.0,3.0],"values":[]},
            "temperature":15.0,"duration":2.0}}"#;
        let err = serde_json::from_str::<Interlayer>(json).unwrap_err();
        assert!(err.to_string().contains("requires 4 values"));

        let unsorted = r#"{"temperatures":[20.0,10.0],"durations":[3.0],"values":[1.0,2.0]}"#;
        assert!(serde_json::from_str::<ShearModulusTable>(unsorted).is_err());

        let empty = r#"{"temperatures":[],"durations":[3.0],"values":[]}"#;
        assert!(serde_json::from_str::<ShearModulusTable>(empty).is_err());
    }

    #[test]
    fn test_deserialize_rejects_non_positive_values() {
        let negative_g = r#"{"t":1.52,"modulus":{"type":"Static","g":-0.44}}"#;
        assert!(serde_json::from_str::<Interlayer>(negative_g).is_err());

        let zero_t = r#"{"t":0.0,"modulus":{"type":"Static","g":0.44}}"#;
        assert!(serde_json::from_str::<Interlayer>(zero_t).is_err());

        let mut catalog = InterlayerCatalog::new();
        let points = [ShearModulusPoint::new(Celsius(20.0), Seconds(3.0), MegaPascals(-1.0))];
        assert!(matches!(
            catalog.register_product("negative", &points),
            Err(CalcError::TableNotRectangular { .. })
        ));
        assert!(catalog.product("negative").is_err());

        let good = r#"{"t":1.52,"modulus":{"type":"Static","g":0.44}}"#;
        let layer: Interlayer = serde_json::from_str(good).unwrap();
        assert_eq!(layer.shear_modulus().unwrap(), MegaPascals(0.44));
    }
}
