//! # Unit Types
//!
//! Type-safe wrappers for the physical quantities used in glass design, plus a
//! runtime [`Quantity`] for values that arrive as text (design input files,
//! the CLI) and must have their dimension checked before use.
//!
//! ## Design Philosophy
//!
//! - Engine internals work in one consistent set: millimeters, megapascals
//!   (N/mm²), seconds, degrees Celsius and N/mm for edge line loads.
//! - Other units convert in through `From`, so passing a pressure where a
//!   length is expected does not compile.
//! - Text input goes through [`Quantity`], where a wrong dimension is a
//!   [`CalcError::DimensionMismatch`] and never a silent coercion.
//!
//! ## Example
//!
//! ```rust
//! use glass_core::units::{Inches, Millimeters, Quantity};
//!
//! let t: Millimeters = Inches(0.375).into();
//! assert!((t.0 - 9.525).abs() < 1e-12);
//!
//! let q: Quantity = "3/8 in".parse().unwrap();
//! let t = Millimeters::try_from(&q).unwrap();
//! assert!((t.0 - 9.525).abs() < 1e-12);
//!
//! let p: Quantity = "1.436 kPa".parse().unwrap();
//! assert!(Millimeters::try_from(&p).is_err());
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;
/// Millimeters per foot
pub const MM_PER_FOOT: f64 = 304.8;
/// Newtons per pound-force
pub const N_PER_LBF: f64 = 4.448_221_615_260_5;
/// Megapascals per pound per square foot
pub const MPA_PER_PSF: f64 = N_PER_LBF / (MM_PER_FOOT * MM_PER_FOOT);
/// Megapascals per pound per square inch
pub const MPA_PER_PSI: f64 = N_PER_LBF / (MM_PER_INCH * MM_PER_INCH);
/// N/mm per pound per linear foot
pub const N_PER_MM_PER_PLF: f64 = N_PER_LBF / MM_PER_FOOT;

/// Seconds per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;
/// Seconds per hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Seconds per week
pub const SECONDS_PER_WEEK: f64 = 7.0 * SECONDS_PER_DAY;
/// Seconds per Julian year (365.25 days)
pub const SECONDS_PER_YEAR: f64 = 365.25 * SECONDS_PER_DAY;
/// Seconds per month (1/12 Julian year)
pub const SECONDS_PER_MONTH: f64 = SECONDS_PER_YEAR / 12.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

impl From<Inches> for Millimeters {
    fn from(inches: Inches) -> Self {
        Millimeters(inches.0 * MM_PER_INCH)
    }
}

impl From<Millimeters> for Inches {
    fn from(mm: Millimeters) -> Self {
        Inches(mm.0 / MM_PER_INCH)
    }
}

impl From<Feet> for Millimeters {
    fn from(ft: Feet) -> Self {
        Millimeters(ft.0 * MM_PER_FOOT)
    }
}

impl From<Millimeters> for Feet {
    fn from(mm: Millimeters) -> Self {
        Feet(mm.0 / MM_PER_FOOT)
    }
}

// ============================================================================
// Pressure / Stress / Modulus Units
// ============================================================================

/// Pressure or stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

/// Modulus in gigapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GigaPascals(pub f64);

/// Pressure in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloPascals(pub f64);

/// Pressure in pounds per square foot
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psf(pub f64);

impl From<GigaPascals> for MegaPascals {
    fn from(gpa: GigaPascals) -> Self {
        MegaPascals(gpa.0 * 1_000.0)
    }
}

impl From<KiloPascals> for MegaPascals {
    fn from(kpa: KiloPascals) -> Self {
        MegaPascals(kpa.0 / 1_000.0)
    }
}

impl From<MegaPascals> for KiloPascals {
    fn from(mpa: MegaPascals) -> Self {
        KiloPascals(mpa.0 * 1_000.0)
    }
}

impl From<Psf> for MegaPascals {
    fn from(psf: Psf) -> Self {
        MegaPascals(psf.0 * MPA_PER_PSF)
    }
}

impl From<MegaPascals> for Psf {
    fn from(mpa: MegaPascals) -> Self {
        Psf(mpa.0 / MPA_PER_PSF)
    }
}

// ============================================================================
// Time and Temperature
// ============================================================================

/// Load duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

impl Seconds {
    /// Duration from a number of minutes
    pub fn from_minutes(minutes: f64) -> Self {
        Seconds(minutes * SECONDS_PER_MINUTE)
    }

    /// Duration from a number of hours
    pub fn from_hours(hours: f64) -> Self {
        Seconds(hours * SECONDS_PER_HOUR)
    }

    /// Duration from a number of days
    pub fn from_days(days: f64) -> Self {
        Seconds(days * SECONDS_PER_DAY)
    }

    /// Duration from a number of months (1/12 Julian year)
    pub fn from_months(months: f64) -> Self {
        Seconds(months * SECONDS_PER_MONTH)
    }

    /// Duration from a number of Julian years
    pub fn from_years(years: f64) -> Self {
        Seconds(years * SECONDS_PER_YEAR)
    }
}

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

// ============================================================================
// Line Load (edge reaction)
// ============================================================================

/// Force per unit length in newtons per millimeter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerMm(pub f64);

/// Force per unit length in pounds per linear foot
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plf(pub f64);

impl From<Plf> for NewtonsPerMm {
    fn from(plf: Plf) -> Self {
        NewtonsPerMm(plf.0 * N_PER_MM_PER_PLF)
    }
}

impl From<NewtonsPerMm> for Plf {
    fn from(n_mm: NewtonsPerMm) -> Self {
        Plf(n_mm.0 / N_PER_MM_PER_PLF)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty, $symbol:expr) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.0, $symbol)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters, "mm");
impl_arithmetic!(Inches, "in");
impl_arithmetic!(Feet, "ft");
impl_arithmetic!(MegaPascals, "MPa");
impl_arithmetic!(GigaPascals, "GPa");
impl_arithmetic!(KiloPascals, "kPa");
impl_arithmetic!(Psf, "psf");
impl_arithmetic!(Seconds, "s");
impl_arithmetic!(Celsius, "degC");
impl_arithmetic!(NewtonsPerMm, "N/mm");
impl_arithmetic!(Plf, "plf");

// ============================================================================
// Runtime Quantities
// ============================================================================

/// Physical dimension of a [`Quantity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Length,
    Pressure,
    Time,
    Temperature,
    Dimensionless,
}

impl Dimension {
    /// Bracketed name used in error messages (e.g. "length")
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Length => "length",
            Dimension::Pressure => "pressure",
            Dimension::Time => "time",
            Dimension::Temperature => "temperature",
            Dimension::Dimensionless => "dimensionless",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Units understood by [`Quantity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    Foot,
    Pascal,
    KiloPascal,
    MegaPascal,
    GigaPascal,
    Psf,
    Psi,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
    DegreeCelsius,
    DegreeFahrenheit,
    Kelvin,
    Dimensionless,
}

impl Unit {
    /// Parse a unit symbol. Accepts the common spellings.
    pub fn from_symbol(symbol: &str) -> Option<Unit> {
        let unit = match symbol {
            "mm" | "millimeter" | "millimeters" => Unit::Millimeter,
            "cm" | "centimeter" | "centimeters" => Unit::Centimeter,
            "m" | "meter" | "meters" => Unit::Meter,
            "in" | "inch" | "inches" | "\"" => Unit::Inch,
            "ft" | "foot" | "feet" | "'" => Unit::Foot,
            "Pa" | "pascal" => Unit::Pascal,
            "kPa" | "kilopascal" => Unit::KiloPascal,
            "MPa" | "megapascal" | "N/mm2" | "N/mm^2" => Unit::MegaPascal,
            "GPa" | "gigapascal" => Unit::GigaPascal,
            "psf" => Unit::Psf,
            "psi" => Unit::Psi,
            "s" | "sec" | "second" | "seconds" => Unit::Second,
            "min" | "minute" | "minutes" => Unit::Minute,
            "h" | "hr" | "hour" | "hours" => Unit::Hour,
            "d" | "day" | "days" => Unit::Day,
            "week" | "weeks" => Unit::Week,
            "month" | "months" => Unit::Month,
            "yr" | "year" | "years" => Unit::Year,
            "degC" | "°C" | "C" => Unit::DegreeCelsius,
            "degF" | "°F" | "F" => Unit::DegreeFahrenheit,
            "K" | "kelvin" => Unit::Kelvin,
            "" => Unit::Dimensionless,
            _ => return None,
        };
        Some(unit)
    }

    /// Canonical symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Millimeter => "mm",
            Unit::Centimeter => "cm",
            Unit::Meter => "m",
            Unit::Inch => "in",
            Unit::Foot => "ft",
            Unit::Pascal => "Pa",
            Unit::KiloPascal => "kPa",
            Unit::MegaPascal => "MPa",
            Unit::GigaPascal => "GPa",
            Unit::Psf => "psf",
            Unit::Psi => "psi",
            Unit::Second => "sec",
            Unit::Minute => "min",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Year => "year",
            Unit::DegreeCelsius => "degC",
            Unit::DegreeFahrenheit => "degF",
            Unit::Kelvin => "K",
            Unit::Dimensionless => "",
        }
    }

    /// Physical dimension of the unit
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Millimeter | Unit::Centimeter | Unit::Meter | Unit::Inch | Unit::Foot => Dimension::Length,
            Unit::Pascal
            | Unit::KiloPascal
            | Unit::MegaPascal
            | Unit::GigaPascal
            | Unit::Psf
            | Unit::Psi => Dimension::Pressure,
            Unit::Second
            | Unit::Minute
            | Unit::Hour
            | Unit::Day
            | Unit::Week
            | Unit::Month
            | Unit::Year => Dimension::Time,
            Unit::DegreeCelsius | Unit::DegreeFahrenheit | Unit::Kelvin => Dimension::Temperature,
            Unit::Dimensionless => Dimension::Dimensionless,
        }
    }
}

/// A magnitude tagged with its unit, checked for dimension on conversion.
///
/// Serializes as text, e.g. `"6 mm"`, `"3/8 in"`, `"1.436 kPa"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    /// Create a quantity
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Dimension of this quantity
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Fail unless the quantity has the expected dimension
    pub fn expect_dimension(&self, expected: Dimension) -> CalcResult<()> {
        if self.dimension() != expected {
            return Err(CalcError::dimension_mismatch(
                self.to_string(),
                expected.name(),
                self.dimension().name(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit == Unit::Dimensionless {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol())
        }
    }
}

impl FromStr for Quantity {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (number, unit) = text.split_at(magnitude_len(text));
        let value = parse_number(number.trim()).ok_or_else(|| {
            CalcError::invalid_input("quantity", text, "could not parse a numeric magnitude")
        })?;
        let unit_symbol = unit.trim();
        let unit = Unit::from_symbol(unit_symbol).ok_or_else(|| CalcError::UnknownUnit {
            value: text.to_string(),
            unit: unit_symbol.to_string(),
        })?;
        Ok(Quantity { value, unit })
    }
}

impl TryFrom<String> for Quantity {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Quantity> for String {
    fn from(q: Quantity) -> Self {
        q.to_string()
    }
}

/// Length of the leading magnitude: a signed decimal with an optional
/// exponent, optionally followed by `/denominator`.
fn magnitude_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        start
            + bytes[start..]
                .iter()
                .take_while(|b| b.is_ascii_digit() || **b == b'.')
                .count()
    };
    let signed_digits_from = |start: usize| {
        let start = match bytes.get(start) {
            Some(b'+') | Some(b'-') => start + 1,
            _ => start,
        };
        digits_from(start)
    };

    let mut end = signed_digits_from(0);
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let exponent_end = signed_digits_from(end + 1);
        if bytes[end + 1..exponent_end].iter().any(u8::is_ascii_digit) {
            end = exponent_end;
        }
    }
    if bytes.get(end) == Some(&b'/') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = digits_from(end + 1);
    }
    end
}

/// Parse "6", "1.52", "3/8" or "1e3"
fn parse_number(text: &str) -> Option<f64> {
    match text.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                None
            } else {
                Some(num / den)
            }
        }
        None => text.parse().ok(),
    }
}

impl TryFrom<&Quantity> for Millimeters {
    type Error = CalcError;

    fn try_from(q: &Quantity) -> CalcResult<Self> {
        q.expect_dimension(Dimension::Length)?;
        let factor = match q.unit {
            Unit::Millimeter => 1.0,
            Unit::Centimeter => 10.0,
            Unit::Meter => 1_000.0,
            Unit::Inch => MM_PER_INCH,
            Unit::Foot => MM_PER_FOOT,
            _ => unreachable!("dimension checked above"),
        };
        Ok(Millimeters(q.value * factor))
    }
}

impl TryFrom<&Quantity> for MegaPascals {
    type Error = CalcError;

    fn try_from(q: &Quantity) -> CalcResult<Self> {
        q.expect_dimension(Dimension::Pressure)?;
        let factor = match q.unit {
            Unit::Pascal => 1e-6,
            Unit::KiloPascal => 1e-3,
            Unit::MegaPascal => 1.0,
            Unit::GigaPascal => 1e3,
            Unit::Psf => MPA_PER_PSF,
            Unit::Psi => MPA_PER_PSI,
            _ => unreachable!("dimension checked above"),
        };
        Ok(MegaPascals(q.value * factor))
    }
}

impl TryFrom<&Quantity> for Seconds {
    type Error = CalcError;

    fn try_from(q: &Quantity) -> CalcResult<Self> {
        q.expect_dimension(Dimension::Time)?;
        let factor = match q.unit {
            Unit::Second => 1.0,
            Unit::Minute => SECONDS_PER_MINUTE,
            Unit::Hour => SECONDS_PER_HOUR,
            Unit::Day => SECONDS_PER_DAY,
            Unit::Week => SECONDS_PER_WEEK,
            Unit::Month => SECONDS_PER_MONTH,
            Unit::Year => SECONDS_PER_YEAR,
            _ => unreachable!("dimension checked above"),
        };
        Ok(Seconds(q.value * factor))
    }
}

impl TryFrom<&Quantity> for Celsius {
    type Error = CalcError;

    fn try_from(q: &Quantity) -> CalcResult<Self> {
        q.expect_dimension(Dimension::Temperature)?;
        let celsius = match q.unit {
            Unit::DegreeCelsius => q.value,
            Unit::DegreeFahrenheit => (q.value - 32.0) * 5.0 / 9.0,
            Unit::Kelvin => q.value - 273.15,
            _ => unreachable!("dimension checked above"),
        };
        Ok(Celsius(celsius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_mm() {
        let t: Millimeters = Inches(0.5).into();
        assert!((t.0 - 12.7).abs() < 1e-12);
        let back: Inches = t.into();
        assert!((back.0 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_psf_to_mpa() {
        let p: MegaPascals = Psf(20.0).into();
        assert!((p.0 - 9.576_051_8e-4).abs() < 1e-9);
    }

    #[test]
    fn test_plf_round_trip() {
        let w: NewtonsPerMm = Plf(100.0).into();
        assert!((w.0 - 1.459_39).abs() < 1e-4);
    }

    #[test]
    fn test_arithmetic() {
        let a = Millimeters(7.42);
        let b = Millimeters(9.02);
        assert!(((a + b).0 - 16.44).abs() < 1e-12);
        assert!(((b - a).0 - 1.6).abs() < 1e-12);
        assert_eq!((a * 2.0).0, 14.84);
        let total: Millimeters = vec![a, b].into_iter().sum();
        assert!((total.0 - 16.44).abs() < 1e-12);
    }

    #[test]
    fn test_time_helpers() {
        assert_eq!(Seconds::from_days(1.0).0, 86_400.0);
        assert_eq!(Seconds::from_years(10.0).0, 315_576_000.0);
        assert_eq!(Seconds::from_months(12.0).0, SECONDS_PER_YEAR);
    }

    #[test]
    fn test_parse_quantities() {
        let q: Quantity = "6 mm".parse().unwrap();
        assert_eq!(q, Quantity::new(6.0, Unit::Millimeter));

        let q: Quantity = "3/8 in".parse().unwrap();
        assert_eq!(q.value, 0.375);
        assert_eq!(q.unit, Unit::Inch);

        let q: Quantity = "1.436kPa".parse().unwrap();
        assert_eq!(q.unit, Unit::KiloPascal);

        let q: Quantity = "24 degC".parse().unwrap();
        assert_eq!(Celsius::try_from(&q).unwrap(), Celsius(24.0));

        let q: Quantity = "8".parse().unwrap();
        assert_eq!(q.dimension(), Dimension::Dimensionless);
    }

    #[test]
    fn test_unknown_unit() {
        let err = "6 furlongs".parse::<Quantity>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_dimension_mismatch() {
        let q: Quantity = "8".parse().unwrap();
        let err = Millimeters::try_from(&q).unwrap_err();
        assert!(matches!(err, CalcError::DimensionMismatch { .. }));
        assert!(err.to_string().contains("[length]"));

        let q: Quantity = "10 year".parse().unwrap();
        assert!(MegaPascals::try_from(&q).is_err());
        assert_eq!(Seconds::try_from(&q).unwrap(), Seconds::from_years(10.0));
    }

    #[test]
    fn test_temperature_conversions() {
        let q = Quantity::new(212.0, Unit::DegreeFahrenheit);
        assert!((Celsius::try_from(&q).unwrap().0 - 100.0).abs() < 1e-12);
        let q = Quantity::new(273.15, Unit::Kelvin);
        assert!(Celsius::try_from(&q).unwrap().0.abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let t = Millimeters(12.5);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "12.5");

        let q: Quantity = serde_json::from_str("\"1.52 mm\"").unwrap();
        assert_eq!(q, Quantity::new(1.52, Unit::Millimeter));
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"1.52 mm\"");
    }

    #[test]
    fn test_malformed_magnitude_reports_unit() {
        let err = "3-e mm".parse::<Quantity>().unwrap_err();
        match err {
            CalcError::UnknownUnit { unit, .. } => assert_eq!(unit, "-e mm"),
            other => panic!("expected UnknownUnit, got {:?}", other),
        }

        let q: Quantity = "1e3 mm".parse().unwrap();
        assert_eq!(q, Quantity::new(1000.0, Unit::Millimeter));
        let q: Quantity = "-40 degF".parse().unwrap();
        assert_eq!(q, Quantity::new(-40.0, Unit::DegreeFahrenheit));
        let q: Quantity = "3 sec".parse().unwrap();
        assert_eq!(q, Quantity::new(3.0, Unit::Second));

        let err = "mm".parse::<Quantity>().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }
}
