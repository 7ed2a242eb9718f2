//! CLI command implementations.

pub mod analyze;
pub mod common;
pub mod fit;
pub mod layout;
pub mod levels;
pub mod mathieu;
pub mod matrix;
pub mod version;
