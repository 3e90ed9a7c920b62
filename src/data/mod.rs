// src/data/mod.rs

//! The `data` module is specialized data containers and helper functions
//! for the readers in the [`readers`] module.
//!
//! [`readers`]: crate::readers

pub mod accesslog;
pub mod datetime;
