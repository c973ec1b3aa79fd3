//! Assemblies: connected groups of pieces treated as a single unit
//!
//! An assembly owns its pieces and exposes derived views of which edges are
//! still open. Joining two assemblies is a pure value operation: it reads
//! both inputs and hands back a fresh assembly, so a speculative trial and a
//! committed merge are the same call, and a rejected trial leaves no trace.

use std::collections::{HashMap, HashSet};
use std::fmt;

use ndarray::Array2;

use crate::spatial::boundary::{Boundary, Rgb};
use crate::spatial::piece::Piece;
use crate::spatial::position::{EdgePos, GridPos};

/// Stable assembly identifier
///
/// Assigned once per source piece at solver start; the survivor of a merge
/// keeps the smaller of the two ids, so an id never refers to two different
/// live assemblies at the same time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssemblyId(u32);

impl AssemblyId {
    /// Create an identifier from its raw index
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw index value, used for deterministic artifact naming
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AssemblyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{:03}", self.0)
    }
}

/// A pair of boundaries that became shared when two assemblies joined
///
/// `near` belongs to the kept assembly and is reported at its live position;
/// `far` belongs to the moved assembly and is reported in that assembly's
/// original frame, so the join shift can be re-derived from the pair.
#[derive(Clone, Debug)]
pub struct Seam {
    /// Edge of the kept assembly
    pub near: Boundary,
    /// Edge of the moved assembly, at its pre-shift position
    pub far: Boundary,
}

impl Seam {
    /// Raw mismatch between the two edges of the seam
    pub fn mismatch(&self) -> u64 {
        self.near.difference_from(&self.far)
    }
}

/// Successful join outcome: the combined assembly and the seams it closed
#[derive(Clone, Debug)]
pub struct Merge {
    /// The joined assembly, owning every piece of both inputs
    pub assembly: Assembly,
    /// All boundary pairs that became internal, anchor pair included
    pub seams: Vec<Seam>,
}

/// Why a speculative join was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinRejection {
    /// Two pieces would occupy the same grid position
    Overlap,
    /// The nominated anchor pair cannot close a seam
    ///
    /// Raised for perpendicular anchor edges, whose positions differ by a
    /// half-cell and can never coincide under whole-cell translation.
    OpenAnchor,
}

impl fmt::Display for JoinRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlap => write!(f, "pieces would overlap"),
            Self::OpenAnchor => write!(f, "anchor pair closes no seam"),
        }
    }
}

/// A connected group of one or more pieces
#[derive(Clone, Debug)]
pub struct Assembly {
    id: AssemblyId,
    pieces: Vec<Piece>,
}

impl Assembly {
    /// Create the trivial assembly around a single piece
    pub fn single(id: AssemblyId, piece: Piece) -> Self {
        Self {
            id,
            pieces: vec![piece],
        }
    }

    /// Stable identifier of this assembly
    pub const fn id(&self) -> AssemblyId {
        self.id
    }

    /// Member pieces, kept half first after a join
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Display label: hyphen-join of member piece names
    pub fn name(&self) -> String {
        self.pieces
            .iter()
            .map(Piece::name)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Edges not yet matched into a seam
    pub fn external_boundaries(&self) -> impl Iterator<Item = &Boundary> {
        self.pieces
            .iter()
            .flat_map(|piece| piece.boundaries().iter())
            .filter(|boundary| !boundary.is_internal())
    }

    /// Edges already shared between two member pieces
    pub fn internal_boundaries(&self) -> impl Iterator<Item = &Boundary> {
        self.pieces
            .iter()
            .flat_map(|piece| piece.boundaries().iter())
            .filter(|boundary| boundary.is_internal())
    }

    /// Attempt to join `other` onto this assembly at an anchor edge pair
    ///
    /// Translates every piece of `other` so that its `other_anchor` edge
    /// lands on `anchor`, validates that no two pieces collide, flags every
    /// newly coincident external edge pair as internal, and returns the
    /// combined assembly together with the closed seams. Neither input is
    /// mutated.
    ///
    /// # Errors
    ///
    /// Returns [`JoinRejection::Overlap`] when two pieces would share a grid
    /// position, and [`JoinRejection::OpenAnchor`] when the anchor pair
    /// cannot coincide (perpendicular edges) or closes no seam.
    pub fn join(
        &self,
        other: &Self,
        anchor: EdgePos,
        other_anchor: EdgePos,
    ) -> Result<Merge, JoinRejection> {
        let Some(delta) = anchor.cell_delta_from(other_anchor) else {
            return Err(JoinRejection::OpenAnchor);
        };

        let mut pieces = self.pieces.clone();
        let split = pieces.len();
        for piece in &other.pieces {
            let mut moved = piece.clone();
            let target = moved.position().offset_by(delta);
            moved.translate_to(target);
            pieces.push(moved);
        }

        let mut occupied: HashSet<GridPos> = HashSet::with_capacity(pieces.len());
        for piece in &pieces {
            if !occupied.insert(piece.position()) {
                return Err(JoinRejection::Overlap);
            }
        }

        // Open edges of the kept half, by position. Within one assembly no
        // two external edges share a position, so the map is lossless.
        let mut open_edges: HashMap<EdgePos, (usize, usize)> = HashMap::new();
        for (piece_index, piece) in pieces.iter().take(split).enumerate() {
            for (side_index, boundary) in piece.boundaries().iter().enumerate() {
                if !boundary.is_internal() {
                    open_edges.insert(boundary.position(), (piece_index, side_index));
                }
            }
        }

        let mut matches: Vec<((usize, usize), (usize, usize))> = Vec::new();
        for (piece_index, piece) in pieces.iter().enumerate().skip(split) {
            for (side_index, boundary) in piece.boundaries().iter().enumerate() {
                if boundary.is_internal() {
                    continue;
                }
                if let Some(&near) = open_edges.get(&boundary.position()) {
                    matches.push((near, (piece_index, side_index)));
                }
            }
        }

        let mut seams = Vec::with_capacity(matches.len());
        let mut anchor_closed = false;
        for &((near_piece, near_side), (far_piece, far_side)) in &matches {
            let Some(near) = flag_internal(&mut pieces, near_piece, near_side) else {
                continue;
            };
            let Some(mut far) = flag_internal(&mut pieces, far_piece, far_side) else {
                continue;
            };

            anchor_closed |= near.position() == anchor;

            // Report the far edge in the moved assembly's original frame.
            far.translate(delta.reversed());
            seams.push(Seam { near, far });
        }

        if !anchor_closed {
            return Err(JoinRejection::OpenAnchor);
        }

        Ok(Merge {
            assembly: Self {
                id: self.id.min(other.id),
                pieces,
            },
            seams,
        })
    }

    /// Paste every piece into a single image covering the bounding box
    ///
    /// Pieces are assumed uniform in size, as validated at ingestion. Pure:
    /// repeated calls on an unmodified assembly yield identical output. An
    /// empty assembly renders to an empty grid.
    pub fn rendered_image(&self) -> Array2<Rgb> {
        let Some(first) = self.pieces.first() else {
            return Array2::from_elem((0, 0), [0, 0, 0]);
        };
        let (piece_rows, piece_cols) = first.image().dim();

        let min_x = self.pieces.iter().map(|p| p.position().x).min().unwrap_or(0);
        let max_x = self.pieces.iter().map(|p| p.position().x).max().unwrap_or(0);
        let min_y = self.pieces.iter().map(|p| p.position().y).min().unwrap_or(0);
        let max_y = self.pieces.iter().map(|p| p.position().y).max().unwrap_or(0);

        let grid_rows = (max_y - min_y + 1) as usize;
        let grid_cols = (max_x - min_x + 1) as usize;
        let mut canvas = Array2::from_elem((grid_rows * piece_rows, grid_cols * piece_cols), [0, 0, 0]);

        for piece in &self.pieces {
            let row_origin = (piece.position().y - min_y) as usize * piece_rows;
            let col_origin = (piece.position().x - min_x) as usize * piece_cols;
            for ((row, col), &pixel) in piece.image().indexed_iter() {
                if let Some(cell) = canvas.get_mut((row_origin + row, col_origin + col)) {
                    *cell = pixel;
                }
            }
        }

        canvas
    }
}

// Flags a boundary internal in place and returns a copy of the flagged edge.
fn flag_internal(pieces: &mut [Piece], piece_index: usize, side_index: usize) -> Option<Boundary> {
    let boundary = pieces
        .get_mut(piece_index)?
        .boundaries_mut()
        .get_mut(side_index)?;
    boundary.mark_internal();
    Some(boundary.clone())
}
