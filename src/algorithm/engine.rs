//! Candidate enumeration and seam scoring between assembly pairs
//!
//! Every size-compatible pairing of open edges between two assemblies is
//! trialled with a speculative join; rejections (overlap, degenerate anchor)
//! are silently discarded. Surviving candidates are scored by the mean raw
//! mismatch over every seam the join would close at once.

use std::cmp::Ordering;

use crate::algorithm::assembly::{Assembly, Seam};
use crate::spatial::position::EdgePos;

/// A speculative, not-yet-committed join between two assemblies
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Anchor edge position on the kept assembly
    pub anchor: EdgePos,
    /// Anchor edge position on the moved assembly, in its own frame
    pub other_anchor: EdgePos,
    /// Number of seams the join closes simultaneously
    pub seam_count: usize,
    /// Mean raw mismatch across all closed seams
    pub cost: f64,
}

/// Mean raw mismatch of a seam set
///
/// A candidate closing several seams at once is scored by the average over
/// every seam, rewarding multi-seam fits that are simultaneously consistent.
/// This averaging is the single scoring policy knob; an empty set scores
/// infinite so it can never win.
pub fn score_seams(seams: &[Seam]) -> f64 {
    if seams.is_empty() {
        return f64::INFINITY;
    }
    let total: u64 = seams.iter().map(Seam::mismatch).sum();
    total as f64 / seams.len() as f64
}

/// Enumerate every collision-free join between two assemblies
///
/// Walks the Cartesian product of both assemblies' open edges, skipping
/// pairs of differing edge length, and keeps one candidate per successful
/// trial join.
pub fn find_connections(kept: &Assembly, moved: &Assembly) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for near in kept.external_boundaries() {
        for far in moved.external_boundaries() {
            if !near.is_compatible_with(far) {
                continue;
            }
            if let Ok(merge) = kept.join(moved, near.position(), far.position()) {
                candidates.push(Candidate {
                    anchor: near.position(),
                    other_anchor: far.position(),
                    seam_count: merge.seams.len(),
                    cost: score_seams(&merge.seams),
                });
            }
        }
    }

    candidates
}

/// The cheapest candidate join between two assemblies, if any exists
///
/// Ties are broken deterministically: by cost under [`f64::total_cmp`], then
/// by anchor position, then by the moved assembly's anchor position.
pub fn best_connection(kept: &Assembly, moved: &Assembly) -> Option<Candidate> {
    find_connections(kept, moved)
        .into_iter()
        .min_by(candidate_order)
}

// Total order used for candidate selection; documented on best_connection.
fn candidate_order(a: &Candidate, b: &Candidate) -> Ordering {
    a.cost
        .total_cmp(&b.cost)
        .then_with(|| a.anchor.cmp(&b.anchor))
        .then_with(|| a.other_anchor.cmp(&b.other_anchor))
}
