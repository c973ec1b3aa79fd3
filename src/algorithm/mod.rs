//! Core reconstruction algorithm
//!
//! Assemblies grow by transactional merge trials scored on edge mismatch;
//! the greedy solver repeatedly commits the globally cheapest join until a
//! single assembly remains.

/// Assemblies, pure join trials, seams, and rendering
pub mod assembly;
/// Candidate enumeration and seam scoring
pub mod engine;
/// Greedy reduction loop with memoised pair scores
pub mod solver;

pub use assembly::{Assembly, AssemblyId, JoinRejection, Merge, Seam};
pub use engine::{Candidate, best_connection, find_connections, score_seams};
pub use solver::{GreedySolver, MergeReport};
