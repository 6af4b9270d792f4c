//! Routed pages.

pub mod archive;
