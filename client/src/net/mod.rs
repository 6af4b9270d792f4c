//! Networking modules for the archive gateway's REST surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and `types` defines the shared wire schema
//! that the gateway serializes and the browser decodes.

pub mod api;
pub mod types;
