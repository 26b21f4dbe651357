//! Resolution of the closest published release for a target version

pub mod closest;

pub use closest::{find_closest, ClosestVersionResolver};
