//! Autonomous scan agent
//!
//! The scanner runs the query/rank cycle; the cache keeps the last
//! report on disk so repeated launches inside the freshness window skip
//! the network entirely.

pub mod cache;
pub mod scanner;

// Re-export commonly used types
pub use cache::{CacheConfig, ScanCache};
pub use scanner::{GuidelineScanner, ScanReport, UPDATE_SOURCE};
