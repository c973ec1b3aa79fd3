//! Command-line interface for batch puzzle solving

use crate::algorithm::assembly::AssemblyId;
use crate::algorithm::solver::GreedySolver;
use crate::io::configuration::{OUTPUT_SUFFIX, PIECE_EXTENSION, SNAPSHOT_DIR_SUFFIX};
use crate::io::error::{Result, io_error};
use crate::io::image::export_assembly_as_png;
use crate::io::pieces::{collect_puzzle_directories, load_piece_directory};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "seamsolve")]
#[command(
    author,
    version,
    about = "Reassemble sliced images by greedy edge matching"
)]
/// Command-line arguments for the reconstruction tool
pub struct Cli {
    /// Puzzle directory, or a directory of puzzle directories
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Write an intermediate render after every committed merge
    #[arg(short, long)]
    pub snapshots: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Solve puzzles even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch solving of puzzle directories with progress tracking
pub struct PuzzleProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl PuzzleProcessor {
    /// Create a new puzzle processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve every puzzle under the CLI target
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, ingestion, solving, or export
    /// fails for any puzzle.
    pub fn process(&mut self) -> Result<()> {
        let puzzles: Vec<PathBuf> = collect_puzzle_directories(&self.cli.target)?
            .into_iter()
            .filter(|puzzle| self.should_process_puzzle(puzzle))
            .collect();

        if puzzles.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(puzzles.len());
        }

        for puzzle in &puzzles {
            Self::solve_puzzle(
                puzzle,
                self.cli.snapshots,
                self.progress_manager.as_mut(),
            )?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn should_process_puzzle(&self, puzzle: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(puzzle);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", puzzle.display());
            }
            false
        } else {
            true
        }
    }

    fn solve_puzzle(
        puzzle: &Path,
        snapshots: bool,
        mut progress: Option<&mut ProgressManager>,
    ) -> Result<()> {
        let pieces = load_piece_directory(puzzle)?;
        let total_merges = pieces.len().saturating_sub(1);

        if let Some(ref mut pm) = progress {
            pm.start_puzzle(&Self::puzzle_label(puzzle), total_merges);
        }

        let snapshot_dir = snapshots.then(|| Self::get_snapshot_dir(puzzle));
        let mut solver = GreedySolver::new(pieces);

        while let Some(report) = solver.step()? {
            if let Some(ref pm) = progress {
                pm.update_merge(solver.iteration());
            }

            if let Some(ref dir) = snapshot_dir {
                Self::export_snapshot(&solver, dir, report.survivor)?;
            }
        }

        let solved = solver
            .assemblies()
            .next()
            .ok_or_else(|| io_error("puzzle produced no assembly"))?;
        let output_path = Self::get_output_path(puzzle);
        export_assembly_as_png(
            solved,
            output_path
                .to_str()
                .ok_or_else(|| io_error("Invalid output path"))?,
        )?;

        if let Some(ref mut pm) = progress {
            pm.complete_puzzle();
        }

        Ok(())
    }

    fn export_snapshot(
        solver: &GreedySolver,
        snapshot_dir: &Path,
        survivor: AssemblyId,
    ) -> Result<()> {
        let Some(assembly) = solver.assembly(survivor) else {
            return Ok(());
        };

        let snapshot_path = snapshot_dir.join(format!(
            "step_{:03}_{survivor}.{PIECE_EXTENSION}",
            solver.iteration()
        ));
        export_assembly_as_png(
            assembly,
            snapshot_path
                .to_str()
                .ok_or_else(|| io_error("Invalid snapshot path"))?,
        )
    }

    fn puzzle_label(puzzle: &Path) -> String {
        puzzle
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    fn get_output_path(puzzle: &Path) -> PathBuf {
        let name = format!(
            "{}{OUTPUT_SUFFIX}.{PIECE_EXTENSION}",
            Self::puzzle_label(puzzle)
        );

        puzzle.parent().map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
    }

    fn get_snapshot_dir(puzzle: &Path) -> PathBuf {
        let name = format!("{}{SNAPSHOT_DIR_SUFFIX}", Self::puzzle_label(puzzle));

        puzzle.parent().map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
    }
}
