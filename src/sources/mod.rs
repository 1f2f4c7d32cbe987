//! Source acquisition: the upstream archive and the local patches.

pub mod archive;
pub mod patches;

pub use archive::{ArchiveFormat, HttpFetcher, SourceFetcher};
pub use patches::{GitApply, PatchApplier, PatchSet};
