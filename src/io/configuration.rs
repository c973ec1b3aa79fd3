//! Runtime configuration defaults and safety limits

/// Suffix added to solved output filenames
pub const OUTPUT_SUFFIX: &str = "_solved";

/// Suffix added to the per-puzzle snapshot directory
pub const SNAPSHOT_DIR_SUFFIX: &str = "_steps";

/// File extension accepted for piece images
pub const PIECE_EXTENSION: &str = "png";

// Safety limit: candidate enumeration is quadratic in pieces
/// Maximum pieces accepted per puzzle
pub const MAX_PIECES: usize = 1024;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
