//! High-level operations.
//!
//! This module contains the implementation of the recipe phases.

pub mod doctor;
pub mod pipeline;
pub mod recipe_build;
pub mod recipe_package;
pub mod recipe_source;

pub use doctor::{doctor, format_report, require_build_tools, DoctorReport};
pub use pipeline::{Phase, PhaseOutcome, RecipeExecutor};
pub use recipe_build::build;
pub use recipe_package::{package, PackageResult};
pub use recipe_source::fetch_source;
