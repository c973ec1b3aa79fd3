//! PNG export of rendered assemblies

use image::{ImageBuffer, Rgb as RgbPixel};
use ndarray::Array2;

use crate::algorithm::assembly::Assembly;
use crate::io::error::{Result, SolverError};
use crate::spatial::boundary::Rgb;

/// Export an assembly's rendered image as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The assembly contains no pieces (nothing to render)
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_assembly_as_png(assembly: &Assembly, output_path: &str) -> Result<()> {
    let rendered = assembly.rendered_image();
    export_pixel_grid_as_png(&rendered, output_path)
}

/// Export a pixel grid indexed `(row, col)` as a PNG file
///
/// # Errors
///
/// Returns an error if the grid is empty, the parent directory cannot be
/// created, or the image cannot be saved.
pub fn export_pixel_grid_as_png(grid: &Array2<Rgb>, output_path: &str) -> Result<()> {
    let (rows, cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return Err(SolverError::InvalidPieceData {
            reason: "nothing to render: the pixel grid is empty".to_string(),
        });
    }

    let img = ImageBuffer::from_fn(cols as u32, rows as u32, |x, y| {
        let pixel = grid
            .get((y as usize, x as usize))
            .copied()
            .unwrap_or([0, 0, 0]);
        RgbPixel(pixel)
    });

    if let Some(parent) = std::path::Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| SolverError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
