//! tagwalk - reads git tags and orders them for changelog tooling.
//!
//! # Overview
//!
//! tagwalk shells out to `git for-each-ref`, parses the returned tag
//! metadata, filters tag names by a regular expression, sorts the survivors
//! by semantic version or by date, and gives every tag a detached copy of
//! its previous and next neighbor. Changelog generators iterate over the
//! resulting list to build one section per release.

pub mod error;
pub mod git;

// Re-export commonly used types
pub use error::{RunnerError, TagError};
pub use git::{GitRunner, RelateTag, SortOrder, SystemGit, Tag, TagReader};
