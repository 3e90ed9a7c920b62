// src/debug/mod.rs

//! Macros for debug and error printing.

pub mod printers;
