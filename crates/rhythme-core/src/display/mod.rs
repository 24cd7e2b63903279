//! Display implementations for domain models.
//!
//! Formatting lives here rather than on the model definitions to keep data
//! structures separate from presentation. Output is plain markdown-flavored
//! text suitable for a terminal.

pub mod datetime;
pub mod models;

pub use datetime::LocalDateTime;
