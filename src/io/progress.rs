//! Merge progress tracking across batches of puzzles

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display for batch solving
///
/// Shows one bar per puzzle (merges committed out of the merges required)
/// for small batches, and a single batch bar counting puzzles for large
/// ones to avoid terminal spam.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    puzzle_bar: Option<ProgressBar>,
    puzzle_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static MERGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len} merges")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Puzzles: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            puzzle_bar: None,
            puzzle_count: 0,
        }
    }

    /// Initialize the batch display for a known puzzle count
    pub fn initialize(&mut self, puzzle_count: usize) {
        self.puzzle_count = puzzle_count;

        if puzzle_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(puzzle_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Start the bar for one puzzle, sized by the merges it needs
    pub fn start_puzzle(&mut self, name: &str, total_merges: usize) {
        if self.puzzle_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            return;
        }

        let bar = ProgressBar::new(total_merges as u64);
        bar.set_style(MERGE_STYLE.clone());
        bar.set_message(name.to_string());
        self.puzzle_bar = Some(self.multi_progress.add(bar));
    }

    /// Record one committed merge on the current puzzle
    pub fn update_merge(&self, merges_done: usize) {
        if let Some(ref bar) = self.puzzle_bar {
            bar.set_position(merges_done as u64);
        }
    }

    /// Mark the current puzzle as finished
    pub fn complete_puzzle(&mut self) {
        if let Some(bar) = self.puzzle_bar.take() {
            bar.finish();
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All puzzles solved");
        }
        let _ = self.multi_progress.clear();
    }
}
