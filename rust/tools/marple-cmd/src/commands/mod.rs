//! Command implementations for marple-cmd

pub mod docvalues;
pub mod fields;
