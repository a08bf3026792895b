use thiserror::Error;

use crate::tree::ValueKind;

/// Failed cursor movement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("trying to go to nonexistent parent element")]
    InvalidMoveUp,

    #[error("trying to go to nonexistent child element: {0}")]
    InvalidMoveDown(String),

    /// A multi-step traversal failed partway; the cursor was rolled back.
    #[error("path '{path}' guides to nonexistent element")]
    InvalidPath {
        path: String,
        #[source]
        cause: Box<MoveError>,
    },
}

impl MoveError {
    /// The innermost move that actually failed.
    pub fn root_cause(&self) -> &MoveError {
        match self {
            MoveError::InvalidPath { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

/// Misuse of the editing layer. Missing paths are never reported here; they
/// surface as `Ok(false)` from the `*_to` / `*_from` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("cannot add child '{name}' to a {kind} value")]
    NotContainer { name: String, kind: ValueKind },

    #[error("sequence index '{name}' is out of range (len {len})")]
    IndexOutOfRange { name: String, len: usize },

    #[error("'{0}' is a reserved step token, not a child name")]
    ReservedName(String),

    #[error("wildcard path '{0}' cannot be created")]
    WildcardPath(String),
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("invalid tree structure: root must be a mapping or sequence, got {0}")]
    Structure(ValueKind),

    #[error("invalid steps list: {0}")]
    Steps(String),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("tree is still borrowed through another cursor: {0}")]
    Borrowed(#[from] std::cell::BorrowMutError),

    #[error("invalid path pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TreeError {
    pub fn is_move(&self) -> bool {
        matches!(self, TreeError::Move(_))
    }
}

pub type Result<T, E = TreeError> = std::result::Result<T, E>;
