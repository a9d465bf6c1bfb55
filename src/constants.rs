//! Crate-wide constants.
//!
//! Centralizes magic numbers used by the loaders, the table engine and the
//! command line front end.

// ============================================================================
// Pagination
// ============================================================================

/// Page size options offered to the user
pub const PAGE_SIZE_OPTIONS: &[usize] = &[10, 25, 50, 100];

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: usize = 25;

// ============================================================================
// Data Loading Limits
// ============================================================================

/// Maximum CSV file size (in MB) for eager loading
pub const MAX_CSV_SIZE_MB: usize = 100;

/// Maximum number of rows accepted by the eager loaders
pub const MAX_CSV_ROWS: usize = 100_000;

/// Number of rows sampled when inferring a column's type
pub const TYPE_INFERENCE_SAMPLE: usize = 100;

// ============================================================================
// Export
// ============================================================================

/// Default field delimiter for exports
pub const DEFAULT_EXPORT_DELIMITER: char = ',';

/// File name used when a title slugifies to nothing
pub const DEFAULT_EXPORT_NAME: &str = "table";

// ============================================================================
// Timing
// ============================================================================

/// Recompute time (ms) above which a slow-operation warning is logged
pub const SLOW_OPERATION_MS: f64 = 50.0;
