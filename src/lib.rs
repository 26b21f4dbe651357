pub mod boundary;
pub mod ci;
pub mod cli;
pub mod config;
pub mod docker;
pub mod domain;
pub mod error;
pub mod git;
pub mod github;
pub mod propagation;
pub mod releases;
pub mod resolver;
pub mod shell;
pub mod ui;

pub use domain::natural::natural_sort;
pub use error::{Result, TaggerError};
pub use propagation::{propagate, PropagationOptions, VersionTagPropagator};
pub use resolver::{find_closest, ClosestVersionResolver};
