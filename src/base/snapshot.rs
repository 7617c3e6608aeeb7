//! Editor text snapshots.

use std::sync::Arc;

use super::span::TextSize;

/// Errors raised when constructing an [`ExpressionSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The caret offset lies past the end of the text.
    #[error("caret offset {caret} is out of bounds for text of length {len}")]
    CaretOutOfBounds { caret: u32, len: u32 },
    /// The caret offset splits a multi-byte character.
    #[error("caret offset {caret} is not on a character boundary")]
    CaretNotCharBoundary { caret: u32 },
}

/// The full expression text plus the caret offset, as captured on one
/// keystroke.
///
/// The caret is a byte offset into `text`, `0 ≤ caret ≤ text.len()`,
/// measured in the same text the user edits. Snapshots are immutable;
/// the editing layer builds a fresh one per relevant keystroke.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionSnapshot {
    text: Arc<str>,
    caret: TextSize,
}

impl ExpressionSnapshot {
    /// Create a snapshot, validating the caret offset.
    pub fn new(text: impl Into<Arc<str>>, caret: TextSize) -> Result<Self, SnapshotError> {
        let text = text.into();
        let caret_raw: u32 = caret.into();

        if caret_raw as usize > text.len() {
            return Err(SnapshotError::CaretOutOfBounds {
                caret: caret_raw,
                len: text.len() as u32,
            });
        }
        if !text.is_char_boundary(caret_raw as usize) {
            return Err(SnapshotError::CaretNotCharBoundary { caret: caret_raw });
        }

        Ok(Self { text, caret })
    }

    /// Create a snapshot with the caret at the end of the text.
    pub fn at_end(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let caret = TextSize::from(text.len() as u32);
        Self { text, caret }
    }

    /// The full text buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The caret offset.
    pub fn caret(&self) -> TextSize {
        self.caret
    }

    /// The text strictly before the caret.
    ///
    /// This is what the completion resolver compiles: the trigger
    /// character already sits in the buffer, so the prefix ends at the
    /// dot the user just typed.
    pub fn prefix(&self) -> &str {
        &self.text[..u32::from(self.caret) as usize]
    }

    /// Whether there is any text before the caret.
    pub fn is_prefix_empty(&self) -> bool {
        self.caret == TextSize::from(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_prefix() {
        let snap = ExpressionSnapshot::new("DateTime.Now.", TextSize::from(9)).unwrap();
        assert_eq!(snap.prefix(), "DateTime.");
    }

    #[test]
    fn test_snapshot_at_end() {
        let snap = ExpressionSnapshot::at_end("42.");
        assert_eq!(snap.caret(), TextSize::from(3));
        assert_eq!(snap.prefix(), "42.");
    }

    #[test]
    fn test_snapshot_caret_out_of_bounds() {
        let err = ExpressionSnapshot::new("ab", TextSize::from(3)).unwrap_err();
        assert_eq!(err, SnapshotError::CaretOutOfBounds { caret: 3, len: 2 });
    }

    #[test]
    fn test_snapshot_caret_mid_char() {
        // 'é' is two bytes; offset 1 lands inside it
        let err = ExpressionSnapshot::new("é", TextSize::from(1)).unwrap_err();
        assert_eq!(err, SnapshotError::CaretNotCharBoundary { caret: 1 });
    }

    #[test]
    fn test_snapshot_empty_text() {
        let snap = ExpressionSnapshot::new("", TextSize::from(0)).unwrap();
        assert!(snap.is_prefix_empty());
        assert_eq!(snap.prefix(), "");
    }
}
