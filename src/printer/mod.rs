//! # Printer Module
//!
//! Physical label settings supplied by the host.
//!
//! ## Modules
//!
//! - [`config`]: Print density and preview configuration
//! - [`units`]: Physical units ↔ device dots

pub mod config;
pub mod units;

pub use config::{Density, PreviewConfig};
pub use units::{Unit, to_dots, to_unit};
