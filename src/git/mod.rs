//! Git tag access through the system git binary.

pub mod runner;
pub mod tags;

pub use runner::{GitRunner, SystemGit};
pub use tags::{RelateTag, SortOrder, Tag, TagReader};
