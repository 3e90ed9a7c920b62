// src/tests/mod.rs

//! Tests of the library, one module per tested module.

pub mod common;

pub mod windowreader_tests;
