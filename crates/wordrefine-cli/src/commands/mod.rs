//! Command implementations.

pub mod refine;
