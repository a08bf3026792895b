//! Wildcard path expansion.
//!
//! A path with `*` or `**` steps names a set of positions. [`expand`] turns it
//! into the concrete simple paths it denotes, in two independent phases:
//! every node below the literal prefix is enumerated as a candidate step
//! list ([`Candidates`]), and each candidate is tested against the path
//! compiled into a [`StepPattern`].
//!
//! The caller's cursor is never moved; all exploration happens on a clone.

use regex::Regex;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::path::{self, Step};

pub use crate::path::is_simple;

/// Compiled, anchored matcher for one path.
///
/// Literal steps match themselves exactly, `*` matches exactly one segment
/// and `**` matches zero or more whole segments.
#[derive(Debug, Clone)]
pub struct StepPattern {
    re: Regex,
}

impl StepPattern {
    pub fn compile(path: &str) -> Result<Self> {
        // Every segment is matched together with its leading separator so that
        // `**` can swallow zero segments without leaving a stray `/` behind.
        let mut src = String::from("^");
        for step in path::steps(path) {
            match step {
                Step::Any => src.push_str("/[^/]*"),
                Step::AnyDepth => src.push_str("(?:/[^/]*)*"),
                other => {
                    src.push('/');
                    src.push_str(&regex::escape(other.as_str()));
                }
            }
        }
        src.push('$');
        Ok(Self { re: Regex::new(&src)? })
    }

    pub fn is_match_steps<S: AsRef<str>>(&self, steps: &[S]) -> bool {
        let mut candidate = String::new();
        for s in steps {
            candidate.push(path::SEPARATOR);
            candidate.push_str(s.as_ref());
        }
        self.re.is_match(&candidate)
    }

    /// Match a simple path string.
    pub fn is_match(&self, simple_path: &str) -> bool {
        let steps: Vec<&str> = path::tokens(simple_path).collect();
        self.is_match_steps(&steps)
    }
}

/// Pre-order walk over every node of the subtree at a cursor's position,
/// yielding `prefix ++ steps-below-start` for each node (the start node
/// itself first). Children come in the tree's native order.
pub struct Candidates {
    cursor: Cursor,
    base: usize,
    prefix: Vec<String>,
    stack: Vec<Vec<String>>,
}

impl Candidates {
    pub fn new(cursor: Cursor, prefix: Vec<String>) -> Self {
        let start = cursor.steps().to_vec();
        let base = start.len();
        Self { cursor, base, prefix, stack: vec![start] }
    }
}

impl Iterator for Candidates {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let steps = self.stack.pop()?;
        self.cursor.restore_steps(steps.clone());
        for name in self.cursor.child_names().into_iter().rev() {
            let mut child = steps.clone();
            child.push(name);
            self.stack.push(child);
        }
        let mut out = self.prefix.clone();
        out.extend_from_slice(&steps[self.base..]);
        Some(out)
    }
}

/// Expand `path` into the simple paths it matches below `cursor`'s position.
///
/// Results are relative to that position and can be passed straight to
/// [`Cursor::follow_simple_path`] on the same cursor. A path without
/// wildcards yields itself if it exists. An unreachable literal prefix fails
/// with the usual [`crate::MoveError`]; no match at all is an empty list.
pub fn expand(cursor: &Cursor, path: &str) -> Result<Vec<String>> {
    let pattern = StepPattern::compile(path)?;
    let mut scout = cursor.clone();

    let (prefix, wildcard) = path::split_prefix(path);
    if !wildcard {
        let found = scout.path_exists(path);
        return Ok(if found { vec![path.to_string()] } else { Vec::new() });
    }
    if !prefix.is_empty() {
        scout.follow_simple_path(&prefix.join("/"))?;
    }

    let prefix: Vec<String> = prefix.into_iter().map(str::to_string).collect();
    let matches: Vec<String> = Candidates::new(scout, prefix)
        .filter(|steps| pattern.is_match_steps(steps))
        .map(|steps| path::join(&steps))
        .collect();
    tracing::debug!(path, matches = matches.len(), "expanded wildcard path");
    Ok(matches)
}
