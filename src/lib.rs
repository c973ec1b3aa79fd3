//! Greedy reconstruction of images cut into grids of rectangular pieces
//!
//! Pieces are modelled as four oriented edges on an integer lattice. The
//! solver speculatively joins assemblies at every compatible edge pairing,
//! scores each join by pixel mismatch along the seams it closes, and commits
//! the globally cheapest join until a single assembled image remains.

#![forbid(unsafe_code)]

/// Core assembly, merge-trial, and greedy-solver implementation
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Pieces, boundaries, and grid positions
pub mod spatial;

pub use io::error::{Result, SolverError};
