//! Piece ingestion from puzzle directories
//!
//! A puzzle is a directory of equally sized PNG piece images. Files are
//! loaded in sorted order so piece naming and assembly ids are reproducible
//! across runs, and every validation the core model relies on (non-empty
//! group, non-empty images, uniform dimensions) happens here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ndarray::Array2;

use crate::io::configuration::{MAX_PIECES, PIECE_EXTENSION};
use crate::io::error::{Result, SolverError, computation_error, invalid_parameter};
use crate::spatial::boundary::Rgb;
use crate::spatial::piece::Piece;

/// Load every piece of one puzzle from a directory of PNG files
///
/// Piece names are the file stems; load order (and therefore assembly id
/// assignment) is the sorted path order.
///
/// # Errors
///
/// Returns an error if the directory cannot be read, contains no piece
/// images or more than [`MAX_PIECES`], any image fails to decode or is
/// empty, or the pieces are not uniform in size.
pub fn load_piece_directory(dir: &Path) -> Result<Vec<Piece>> {
    let mut paths = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| SolverError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;
    for entry in entries {
        let path = entry
            .map_err(|e| SolverError::FileSystem {
                path: dir.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();
        if path.extension().and_then(|s| s.to_str()) == Some(PIECE_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(SolverError::InvalidPieceData {
            reason: format!("no piece images found in '{}'", dir.display()),
        });
    }
    if paths.len() > MAX_PIECES {
        return Err(invalid_parameter(
            "pieces",
            &paths.len(),
            &format!("at most {MAX_PIECES} pieces are supported per puzzle"),
        ));
    }

    let mut pieces = Vec::with_capacity(paths.len());
    let mut group_dims: Option<(usize, usize)> = None;

    for path in &paths {
        let name = piece_name(path);
        let grid = load_pixel_grid(path)?;
        let dims = grid.dim();

        if dims.0 == 0 || dims.1 == 0 {
            return Err(SolverError::InvalidPieceData {
                reason: format!("piece '{name}' is empty"),
            });
        }

        match group_dims {
            None => group_dims = Some(dims),
            Some(expected) if expected != dims => {
                return Err(SolverError::PieceSizeMismatch {
                    name,
                    expected,
                    actual: dims,
                });
            }
            Some(_) => {}
        }

        pieces.push(Piece::new(name, Arc::new(grid)));
    }

    Ok(pieces)
}

/// Decode a PNG file into a pixel grid indexed `(row, col)`
///
/// # Errors
///
/// Returns an error if the file cannot be decoded or its buffer does not
/// match its reported dimensions.
pub fn load_pixel_grid(path: &Path) -> Result<Array2<Rgb>> {
    let decoded = image::open(path).map_err(|e| SolverError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels: Vec<Rgb> = rgb.pixels().map(|pixel| pixel.0).collect();

    Array2::from_shape_vec((height as usize, width as usize), pixels)
        .map_err(|e| computation_error("pixel grid construction", &e))
}

/// Derive a piece name from its source path
pub fn piece_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Collect the puzzle directories under a target path
///
/// A directory containing piece images is itself a single puzzle; otherwise
/// every immediate subdirectory containing piece images is one puzzle.
/// Results are sorted for reproducible batch order.
///
/// # Errors
///
/// Returns an error if the target is not a directory or cannot be read.
pub fn collect_puzzle_directories(target: &Path) -> Result<Vec<PathBuf>> {
    if !target.is_dir() {
        return Err(invalid_parameter(
            "target",
            &target.display(),
            &"target must be a puzzle directory or a directory of puzzles",
        ));
    }

    if directory_has_pieces(target)? {
        return Ok(vec![target.to_path_buf()]);
    }

    let mut puzzles = Vec::new();
    let entries = std::fs::read_dir(target).map_err(|e| SolverError::FileSystem {
        path: target.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;
    for entry in entries {
        let path = entry
            .map_err(|e| SolverError::FileSystem {
                path: target.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();
        if path.is_dir() && directory_has_pieces(&path)? {
            puzzles.push(path);
        }
    }
    puzzles.sort();
    Ok(puzzles)
}

fn directory_has_pieces(dir: &Path) -> Result<bool> {
    let entries = std::fs::read_dir(dir).map_err(|e| SolverError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;
    for entry in entries {
        let path = entry
            .map_err(|e| SolverError::FileSystem {
                path: dir.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();
        if path.extension().and_then(|s| s.to_str()) == Some(PIECE_EXTENSION) {
            return Ok(true);
        }
    }
    Ok(false)
}
