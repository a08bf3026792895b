//! arbor-core: Path-addressed navigation and editing of JSON-like trees
//!
//! This crate focuses on a small, well-factored surface:
//! - `Cursor`: a `(root, steps)` position with single-step and simple-path
//!   moves that roll back on failure
//! - `resolve`: expansion of `*` / `**` wildcard paths into simple paths
//! - `TreeEditor`: read/write/add/remove/copy by simple path, with optional
//!   implicit path creation
//! - JSON file load/save and timestamped backups for CLI use
//!
//! Paths are `/`-separated steps: a child name, `""` (root), `.` (current),
//! `..` (parent), `*` (any one child) or `**` (any number of levels).
//!
//! ```
//! use arbor_core::{Cursor, TreeEditor, resolve};
//! use serde_json::json;
//!
//! let cursor = Cursor::new(json!({"a": {"x": 1, "y": 2}, "b": {"x": 3}})).unwrap();
//! assert_eq!(resolve::expand(&cursor, "*/x").unwrap(), vec!["a/x", "b/x"]);
//!
//! let mut ed = TreeEditor::new(cursor);
//! ed.write_to("c/d", json!(5), true).unwrap();
//! assert_eq!(ed.cursor().steps(), ["c", "d"]);
//! ```
pub mod cursor;
pub mod editor;
pub mod error;
pub mod io;
pub mod path;
pub mod resolve;
pub mod tree;

pub use cursor::{Cursor, SharedTree};
pub use editor::TreeEditor;
pub use error::{EditError, MoveError, Result, TreeError};
pub use io::{OutputOpts, backup_file, load_tree, render_tree, save_tree};
pub use path::{Step, is_simple};
pub use tree::{ChildInfo, ValueKind};
