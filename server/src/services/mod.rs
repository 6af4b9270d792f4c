//! Backend-facing services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own wire formats and backend calls so route handlers can
//! stay focused on protocol translation and auth plumbing.

pub mod backend;
pub mod firebase;
pub mod firestore;
pub mod identity;
pub mod session;
pub mod storage;
