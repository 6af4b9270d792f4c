//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `articles`, `view`) so each piece of
//! view state has exactly one writer. The structs are plain data with pure
//! transition methods; components hold them in signals.

pub mod articles;
pub mod session;
pub mod view;
