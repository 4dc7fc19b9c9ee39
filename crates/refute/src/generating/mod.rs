//! Generating inference rules.

pub mod common;
pub mod resolution;

pub use common::{collect_literals_except, GeneratingInference, InferenceResult};
pub use resolution::{resolve, ResolutionRule};
