//! CLI command implementations.

pub mod common;
pub mod figures;
pub mod infidelity;
pub mod inspect;
pub mod synth;
pub mod version;
