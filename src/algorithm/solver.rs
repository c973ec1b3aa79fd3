//! Greedy reduction of a piece set to a single assembly
//!
//! The solver owns the live assemblies and a memo table of the best known
//! join per assembly pair. Each step fills the table for pairs not yet
//! scored, commits the globally cheapest join, and drops every table entry
//! touching either merged assembly. The table exists for the lifetime of one
//! solver and is never shared.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::algorithm::assembly::{Assembly, AssemblyId};
use crate::algorithm::engine::{Candidate, best_connection};
use crate::io::error::{Result, SolverError, computation_error};
use crate::spatial::piece::Piece;

/// Unordered assembly pair, stored with the smaller id first
type PairKey = (AssemblyId, AssemblyId);

/// Outcome of one committed merge step
#[derive(Clone, Debug)]
pub struct MergeReport {
    /// Id the combined assembly lives under
    pub survivor: AssemblyId,
    /// Id that ceased to exist in this step
    pub absorbed: AssemblyId,
    /// Score of the committed candidate
    pub cost: f64,
    /// Seams closed by the commit
    pub seams_closed: usize,
    /// Live assemblies remaining after the commit
    pub remaining: usize,
}

/// Greedy solver reducing assemblies until one remains
pub struct GreedySolver {
    assemblies: BTreeMap<AssemblyId, Assembly>,
    memo: HashMap<PairKey, Option<Candidate>>,
    iteration: usize,
}

impl GreedySolver {
    /// Create a solver with one trivial assembly per piece
    ///
    /// Ids are assigned in piece order, so a deterministically ordered input
    /// yields a fully reproducible run.
    pub fn new(pieces: Vec<Piece>) -> Self {
        let assemblies = pieces
            .into_iter()
            .enumerate()
            .map(|(index, piece)| {
                let id = AssemblyId::new(index as u32);
                (id, Assembly::single(id, piece))
            })
            .collect();

        Self {
            assemblies,
            memo: HashMap::new(),
            iteration: 0,
        }
    }

    /// Live assemblies in id order
    pub fn assemblies(&self) -> impl Iterator<Item = &Assembly> {
        self.assemblies.values()
    }

    /// Look up a live assembly by id
    pub fn assembly(&self, id: AssemblyId) -> Option<&Assembly> {
        self.assemblies.get(&id)
    }

    /// Number of live assemblies
    pub fn remaining(&self) -> usize {
        self.assemblies.len()
    }

    /// Merge steps committed so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether the reduction has finished
    pub fn is_solved(&self) -> bool {
        self.assemblies.len() <= 1
    }

    /// Commit the globally cheapest join
    ///
    /// Returns `Ok(None)` once a single assembly remains. Pair selection is
    /// deterministic: cost under total order, then the ordered id pair.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::DisjointPieces`] when no pair of live
    /// assemblies admits any valid join, and a computation error if a
    /// memoised candidate fails re-validation at commit time (which a
    /// correctly invalidated table rules out).
    pub fn step(&mut self) -> Result<Option<MergeReport>> {
        if self.assemblies.len() <= 1 {
            return Ok(None);
        }
        self.iteration += 1;

        self.refresh_memo();

        let Some(((left_id, right_id), candidate)) = self.best_pair() else {
            let remaining = self.assemblies.values().map(Assembly::name).collect();
            return Err(SolverError::DisjointPieces { remaining });
        };

        let (Some(left), Some(right)) = (
            self.assemblies.remove(&left_id),
            self.assemblies.remove(&right_id),
        ) else {
            return Err(computation_error(
                "merge commit",
                &"memoised pair references a discarded assembly",
            ));
        };

        let merge = match left.join(&right, candidate.anchor, candidate.other_anchor) {
            Ok(merge) => merge,
            Err(rejection) => {
                return Err(computation_error(
                    "merge commit",
                    &format!("validated join rejected: {rejection}"),
                ));
            }
        };

        let survivor = merge.assembly.id();
        let absorbed = if survivor == left_id { right_id } else { left_id };
        let seams_closed = merge.seams.len();
        self.assemblies.insert(survivor, merge.assembly);

        self.memo.retain(|&(a, b), _| {
            a != left_id && a != right_id && b != left_id && b != right_id
        });

        Ok(Some(MergeReport {
            survivor,
            absorbed,
            cost: candidate.cost,
            seams_closed,
            remaining: self.assemblies.len(),
        }))
    }

    /// Run the reduction to completion and return the final assembly
    ///
    /// # Errors
    ///
    /// Propagates any [`Self::step`] error; also fails if the solver was
    /// created with no pieces at all.
    pub fn run(&mut self) -> Result<&Assembly> {
        while self.step()?.is_some() {}

        self.assemblies
            .values()
            .next()
            .ok_or_else(|| computation_error("solver", &"no pieces were supplied"))
    }

    // Scores every live pair missing from the memo table. A `None` entry
    // records that the pair has no valid join and is skipped until one of
    // its assemblies changes.
    fn refresh_memo(&mut self) {
        let ids: Vec<AssemblyId> = self.assemblies.keys().copied().collect();

        for (index, &left) in ids.iter().enumerate() {
            for &right in ids.iter().skip(index + 1) {
                let key = (left, right);
                if self.memo.contains_key(&key) {
                    continue;
                }
                let candidate = match (self.assemblies.get(&left), self.assemblies.get(&right)) {
                    (Some(kept), Some(moved)) => best_connection(kept, moved),
                    _ => None,
                };
                self.memo.insert(key, candidate);
            }
        }
    }

    // Globally cheapest memoised candidate with a deterministic tie-break
    // on the ordered pair key.
    fn best_pair(&self) -> Option<(PairKey, Candidate)> {
        let mut best: Option<(PairKey, Candidate)> = None;

        for (&key, entry) in &self.memo {
            let Some(candidate) = entry else { continue };
            let better = best.as_ref().is_none_or(|(best_key, best_candidate)| {
                match candidate.cost.total_cmp(&best_candidate.cost) {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => key < *best_key,
                }
            });
            if better {
                best = Some((key, candidate.clone()));
            }
        }

        best
    }
}
