//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate geometry, formatting, and browser measurement from
//! component logic so the interesting parts stay pure and testable.

pub mod format;
pub mod layout;
pub mod measure;
pub mod virtual_list;
