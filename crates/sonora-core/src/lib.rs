//! Core catalog model for sonora.
//!
//! This crate defines the immutable track catalog (`Track`, `Corpus`) that
//! every index in `sonora-search` is aligned to, plus the small policy types
//! shared between configuration and retrieval.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod features;
pub mod model;
pub mod policy;

pub use error::{Error, Result};
pub use features::DEFAULT_FEATURES;
pub use model::{Corpus, Track};
pub use policy::SelfExclusion;
