//! The tools module provides helper functions for huffpack.
//!
//! The tools are:
//! - cli: Command line interface for huffpack.
//! - data_io: Whole-file input and output, with overwrite and keep handling.
//! - freq_count: Frequency count of the input bytes.
//!
pub mod cli;
pub mod data_io;
pub mod freq_count;
