//! Comment system module
//!
//! Comment and reply records and the ordering rules applied to them.

pub mod model;

pub use model::*;
