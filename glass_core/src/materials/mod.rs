//! # Materials Database
//!
//! Material definitions and property lookups for glass design.
//!
//! ## Material Types
//!
//! - **Glass ply**: A monolithic float glass sheet with its minimum thickness
//! - **Interlayer**: PVB or ionoplast with a static or table-driven shear modulus
//! - **Glass type**: Strength classification (annealed, heat-strengthened,
//!   fully tempered) with breakage, duration and surface treatment factors
//!
//! Product tables and glass types live in explicit catalogs that callers
//! own and pass by reference. `Default` gives a catalog seeded with the
//! built-in entries.
//!
//! ## Example
//!
//! ```rust
//! use glass_core::materials::{GlassPly, GlassTypeCatalog, Interlayer, InterlayerCatalog};
//! use glass_core::units::{Celsius, Millimeters, Seconds};
//!
//! let glass_types = GlassTypeCatalog::default();
//! let interlayers = InterlayerCatalog::default();
//!
//! let ply = GlassPly::from_nominal_thickness(Millimeters(6.0), "HS").unwrap();
//! let glass_type = glass_types.get(ply.glass_type()).unwrap();
//! println!("{}: surface stress {}", glass_type.name(), glass_type.stress_surface());
//!
//! let mut sgp = Interlayer::from_product_table(
//!     Millimeters(1.52),
//!     "Ionoplast Interlayer NCSEA",
//!     &interlayers,
//! ).unwrap();
//! sgp.set_temperature(Celsius(24.0)).unwrap();
//! sgp.set_duration(Seconds(3.0)).unwrap();
//! assert_eq!(sgp.shear_modulus().unwrap().0, 193.0);
//! ```

pub mod glass_ply;
pub mod glass_type;
pub mod interlayer;

pub use glass_ply::{min_thickness_for_nominal, GlassPly, GLASS_ELASTIC_MODULUS};
pub use glass_type::{
    AllowableStressInput, AllowableStressResult, GlassType, GlassTypeCatalog, StressLocation,
    REFERENCE_BREAKAGE_RATIO, REFERENCE_DURATION, SURFACE_TREATMENTS, standard_surf_factors,
};
pub use interlayer::{
    Interlayer, InterlayerCatalog, ShearModulus, ShearModulusPoint, ShearModulusTable, IONOPLAST_NCSEA, PVB_NCSEA,
};
