//! Scan orchestration
//!
//! Reads rows, classifies each record and forwards the results according to
//! the configured policy.

pub mod coordinator;
pub mod summary;

pub use coordinator::ScanCoordinator;
pub use summary::ScanSummary;
