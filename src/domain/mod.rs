//! Domain logic - pure string and ordering rules, independent of docker, git or the network

pub mod meta;
pub mod natural;
pub mod reference;
pub mod tag;
pub mod template;
pub mod version;

pub use meta::AllowedMeta;
pub use natural::NaturalSortKey;
pub use reference::ImageReference;
pub use tag::ParsedTag;
pub use template::Template;
pub use version::increment_version;
