//! Configuration and value conversion for command-line arguments.

pub mod profile;
pub mod size;

pub use profile::{Profile, ProfileError};
pub use size::{ConversionError, SizeOutput, SizeWithUnitConverter};
