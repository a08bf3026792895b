// Simple-path CRUD on top of a Cursor.
// Contract for every `*_to` / `*_from` call:
// - success leaves the cursor parked at the affected path, so chained edits
//   at one location do not re-navigate;
// - an absent path (without creation) returns Ok(false) and touches nothing;
// - an error restores the cursor position. Nodes that `create_path` already
//   added before the error stay in the tree.
use serde_json::{Map, Value};
use std::cell::Ref;

use crate::cursor::Cursor;
use crate::error::{EditError, Result};
use crate::path::{self, Step};
use crate::tree::{self, ValueKind};

#[derive(Debug, Clone)]
pub struct TreeEditor {
    cursor: Cursor,
}

impl TreeEditor {
    pub fn new(cursor: Cursor) -> Self {
        Self { cursor }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    pub fn into_cursor(self) -> Cursor {
        self.cursor
    }

    pub fn read(&self) -> Ref<'_, Value> {
        self.cursor.current()
    }

    /// Value at `path`, or `None` when it does not exist.
    pub fn read_from(&mut self, path: &str) -> Option<Ref<'_, Value>> {
        if !self.cursor.path_exists(path) {
            return None;
        }
        self.cursor.follow_simple_path(path).ok()
    }

    pub fn write(&mut self, value: Value) -> Result<()> {
        self.cursor.set_current(value)?;
        Ok(())
    }

    pub fn write_to(&mut self, path: &str, value: Value, create_if_missing: bool) -> Result<bool> {
        self.at(path, create_if_missing, |ed| ed.write(value))
    }

    /// Remove child `name` of the current value. Returns whether anything was
    /// removed; an absent child is not an error, a dangling position is.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        self.cursor.with_current_mut(|cur| match cur {
            Value::Object(map) => map.shift_remove(name).is_some(),
            Value::Array(arr) => match tree::parse_index(name) {
                Some(i) if i < arr.len() => {
                    arr.remove(i);
                    true
                }
                _ => false,
            },
            _ => false,
        })
    }

    /// Remove child `name` below an existing `path`. `Ok(false)` if `path` is
    /// absent; a missing `name` under an existing path is still `Ok(true)`.
    pub fn remove_from(&mut self, path: &str, name: &str) -> Result<bool> {
        self.at(path, false, |ed| {
            ed.remove(name)?;
            Ok(())
        })
    }

    /// Set child `name` of the current value, overwriting it if present.
    pub fn add(&mut self, name: &str, value: Value) -> Result<()> {
        check_name(name)?;
        self.cursor.with_current_mut(|cur| insert_child(cur, name, value))??;
        Ok(())
    }

    pub fn add_to(&mut self, path: &str, name: &str, value: Value, create_if_missing: bool) -> Result<bool> {
        self.at(path, create_if_missing, |ed| ed.add(name, value))
    }

    /// Merge all entries of `values` into the current value, in map order.
    pub fn add_many(&mut self, values: Map<String, Value>) -> Result<()> {
        values.keys().try_for_each(|name| check_name(name))?;
        self.cursor.with_current_mut(|cur| {
            values
                .into_iter()
                .try_for_each(|(name, value)| insert_child(cur, &name, value))
        })??;
        Ok(())
    }

    pub fn add_many_to(&mut self, path: &str, values: Map<String, Value>, create_if_missing: bool) -> Result<bool> {
        self.at(path, create_if_missing, |ed| ed.add_many(values))
    }

    /// Make sure `path` exists.
    ///
    /// An existing path is left alone and the cursor does not move. Otherwise
    /// missing literal steps are created as empty mappings, navigation tokens
    /// (`""`, `.`, `..`) are just performed, and the cursor ends at `path`.
    /// Existing nodes are never replaced.
    pub fn create_path(&mut self, path: &str) -> Result<()> {
        if !path::is_simple(path) {
            return Err(EditError::WildcardPath(path.to_string()).into());
        }
        if self.cursor.path_exists(path) {
            return Ok(());
        }
        let saved = self.cursor.steps().to_vec();
        let res = self.create_steps(path);
        if res.is_err() {
            self.cursor.restore_steps(saved);
        }
        res
    }

    fn create_steps(&mut self, path: &str) -> Result<()> {
        for tok in path::tokens(path) {
            if let Step::Name(name) = Step::parse(tok)
                && !self.cursor.has_child(name)
            {
                tracing::debug!(name, at = %path::join(self.cursor.steps()), "creating node");
                self.add(name, Value::Object(Map::new()))?;
            }
            self.cursor.step(tok)?;
        }
        Ok(())
    }

    /// Copy the value at `src` to `dst`. The source is read through a cloned
    /// cursor and deep-copied, so the two locations are independent afterwards.
    pub fn copy(&mut self, src: &str, dst: &str, create_if_missing: bool) -> Result<bool> {
        let mut source = self.cursor.clone();
        if !source.path_exists(src) {
            return Ok(false);
        }
        let value = source.follow_simple_path(src)?.clone();
        self.write_to(dst, value, create_if_missing)
    }

    // Navigate to `path` (creating it if allowed), then run `edit` there.
    fn at(&mut self, path: &str, create_if_missing: bool, edit: impl FnOnce(&mut Self) -> Result<()>) -> Result<bool> {
        let saved = self.cursor.steps().to_vec();
        if self.cursor.path_exists(path) {
            self.cursor.follow_simple_path(path)?;
        } else if create_if_missing {
            self.create_path(path)?;
        } else {
            return Ok(false);
        }
        if let Err(e) = edit(self) {
            self.cursor.restore_steps(saved);
            return Err(e);
        }
        Ok(true)
    }
}

fn check_name(name: &str) -> Result<(), EditError> {
    if path::is_reserved(name) {
        return Err(EditError::ReservedName(name.to_string()));
    }
    Ok(())
}

fn insert_child(cur: &mut Value, name: &str, value: Value) -> Result<(), EditError> {
    if cur.is_null() {
        *cur = Value::Object(Map::new());
    }
    match cur {
        Value::Object(map) => {
            map.insert(name.to_string(), value);
            Ok(())
        }
        Value::Array(arr) => match tree::parse_index(name) {
            Some(i) if i < arr.len() => {
                arr[i] = value;
                Ok(())
            }
            Some(i) if i == arr.len() => {
                arr.push(value);
                Ok(())
            }
            _ => Err(EditError::IndexOutOfRange { name: name.to_string(), len: arr.len() }),
        },
        other => Err(EditError::NotContainer { name: name.to_string(), kind: ValueKind::of(other) }),
    }
}
