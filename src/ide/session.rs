//! Stateful editing sessions.

use parking_lot::Mutex;

use crate::base::{ExpressionSnapshot, SnapshotError, TextSize};
use crate::sem::{ImportedNamespaces, LocalVariable, ReferenceSet};

use super::completion::{resolve_with_locals, CompletionCandidate, MEMBER_ACCESS_TRIGGER};

/// Whether a typed character commits the selected completion item
/// rather than extending the filter word.
///
/// Identifier-continue characters keep filtering; everything else (a
/// dot, a parenthesis, an operator, whitespace) commits.
pub fn should_commit(c: char) -> bool {
    !unicode_ident::is_xid_continue(c)
}

struct SessionState {
    text: String,
    caret: TextSize,
}

/// One expression-editing session.
///
/// Owns the hosting context (references, imports, locals), which is
/// fixed for the session's lifetime, and the mutable text buffer and
/// caret. Resolution itself stays stateless: every call re-derives its
/// answer from a fresh snapshot of the buffer.
pub struct EditorSession {
    references: ReferenceSet,
    imports: ImportedNamespaces,
    locals: Vec<LocalVariable>,
    state: Mutex<SessionState>,
}

impl EditorSession {
    pub fn new(
        references: ReferenceSet,
        imports: ImportedNamespaces,
        locals: Vec<LocalVariable>,
    ) -> Self {
        Self {
            references,
            imports,
            locals,
            state: Mutex::new(SessionState {
                text: String::new(),
                caret: TextSize::from(0),
            }),
        }
    }

    pub fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    pub fn caret(&self) -> TextSize {
        self.state.lock().caret
    }

    /// Move the caret. Returns false (and leaves the caret alone) if
    /// the offset is out of bounds or splits a character.
    pub fn set_caret(&self, caret: TextSize) -> bool {
        let mut state = self.state.lock();
        let at = u32::from(caret) as usize;
        if at > state.text.len() || !state.text.is_char_boundary(at) {
            return false;
        }
        state.caret = caret;
        true
    }

    /// Replace the whole buffer and put the caret at the end.
    pub fn replace_text(&self, text: &str) {
        let mut state = self.state.lock();
        state.text = text.to_string();
        state.caret = TextSize::of(text);
    }

    /// Insert text at the caret, advancing the caret past it.
    ///
    /// When the insertion ends with the member-access trigger, the
    /// completion resolver runs against the updated buffer and its
    /// candidates are returned; otherwise the list is empty.
    pub fn insert_text(&self, insertion: &str) -> Vec<CompletionCandidate> {
        let snapshot = {
            let mut state = self.state.lock();
            let at = u32::from(state.caret) as usize;
            state.text.insert_str(at, insertion);
            state.caret += TextSize::of(insertion);

            if !insertion.ends_with(MEMBER_ACCESS_TRIGGER) {
                return Vec::new();
            }
            ExpressionSnapshot::new(state.text.as_str(), state.caret)
        };

        match snapshot {
            Ok(snapshot) => resolve_with_locals(
                &self.references,
                &self.imports,
                &self.locals,
                &snapshot,
                MEMBER_ACCESS_TRIGGER,
            ),
            Err(_) => Vec::new(),
        }
    }

    /// Snapshot the current buffer and caret.
    pub fn snapshot(&self) -> Result<ExpressionSnapshot, SnapshotError> {
        let state = self.state.lock();
        ExpressionSnapshot::new(state.text.as_str(), state.caret)
    }

    /// Re-run completion at the current caret, as if the character just
    /// before it had been typed now.
    pub fn resolve_at_caret(&self) -> Vec<CompletionCandidate> {
        match self.snapshot() {
            Ok(snapshot) => resolve_with_locals(
                &self.references,
                &self.imports,
                &self.locals,
                &snapshot,
                MEMBER_ACCESS_TRIGGER,
            ),
            Err(_) => Vec::new(),
        }
    }
}
