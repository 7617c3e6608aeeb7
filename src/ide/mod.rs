//! Editor-facing features.
//!
//! Everything in this module is a pure function over explicit inputs:
//! references, imports, locals, and a text snapshot go in, data comes
//! out. Nothing is cached between calls. [`EditorSession`] is the one
//! stateful piece, a thin owner of the text buffer and caret that
//! re-derives everything else per keystroke.

mod completion;
mod session;
mod validation;

pub use completion::{
    resolve, resolve_with_locals, CompletionCandidate, ResolvedSymbolGroup, SyntheticUnit,
    MEMBER_ACCESS_TRIGGER,
};
pub use session::{should_commit, EditorSession};
pub use validation::{ValidationError, ValidationReport, Validator};
