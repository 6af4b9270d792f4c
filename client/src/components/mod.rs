//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components receive their data as props from the app shell; none of them
//! reach for global state. The list keeps its own selection and scroll offset.

pub mod app_shell;
pub mod article_list;
pub mod content_viewer;
pub mod session_button;
pub mod top_bar;
