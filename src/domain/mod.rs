//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RecordId`])
//! - **Row models** ([`InputRecord`], [`OutputRecord`])
//! - **Error types** ([`RedactorError`], [`RowError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible operations outside the classification engine return
//! [`Result<T, RedactorError>`]:
//!
//! ```rust,no_run
//! use pii_redactor::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = pii_redactor::config::load_config("pii-redactor.toml")?;
//!     println!("{}", config.scan.output_path.display());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{RedactorError, RowError};
pub use ids::RecordId;
pub use record::{InputRecord, OutputRecord};
pub use result::Result;
