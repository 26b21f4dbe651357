//! Command-line workflows

pub mod orchestration;
