//! Foundation types for the expression toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Name`], [`Interner`] - String interning
//! - [`ExpressionSnapshot`] - Editor text plus caret offset
//!
//! This module has NO dependencies on other exprcore modules.

mod intern;
mod snapshot;
mod span;

pub use intern::{Interner, Name};
pub use snapshot::{ExpressionSnapshot, SnapshotError};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
