//! Stateful position in a shared tree.
//!
//! A [`Cursor`] is a `(root, steps)` pair. The current position is never
//! cached: it is resolved from the root through the step list whenever it is
//! needed, so it always shows the latest content at that address even after
//! ancestors were replaced.
//!
//! Cloning a cursor shares the root (writes through any clone are seen by
//! all of them) and copies the step list, so clones move independently.

use serde_json::Value;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::error::{MoveError, Result, TreeError};
use crate::path::{self, Step};
use crate::tree::{self, ChildInfo, ValueKind};

pub type SharedTree = Rc<RefCell<Value>>;

// Read fallback for a dangling position.
static NULL: Value = Value::Null;

#[derive(Debug, Clone)]
pub struct Cursor {
    root: SharedTree,
    steps: Vec<String>,
}

impl Cursor {
    /// Attach a root value with the cursor at the root.
    pub fn new(root: Value) -> Result<Self> {
        Self::attach(root, None)
    }

    /// Attach a root value, optionally restoring a saved position.
    ///
    /// The steps are not checked against the tree; a dangling position fails
    /// on the first navigation or write that needs the missing node.
    pub fn attach(root: Value, steps: Option<Vec<String>>) -> Result<Self> {
        let kind = ValueKind::of(&root);
        if !kind.is_container() {
            return Err(TreeError::Structure(kind));
        }
        Self::from_shared(Rc::new(RefCell::new(root)), steps)
    }

    /// Restore a position serialized as a JSON array of child names.
    pub fn attach_json_steps(root: Value, steps: &Value) -> Result<Self> {
        let Value::Array(items) = steps else {
            return Err(TreeError::Steps(format!("expected an array, got {}", ValueKind::of(steps))));
        };
        let steps = items
            .iter()
            .map(|s| match s {
                Value::String(s) => Ok(s.clone()),
                // sequence indices may have been stored as numbers
                Value::Number(n) if n.is_u64() => Ok(n.to_string()),
                other => Err(TreeError::Steps(format!("expected a string step, got {}", ValueKind::of(other)))),
            })
            .collect::<Result<Vec<_>>>()?;
        Self::attach(root, Some(steps))
    }

    /// New cursor over a tree another cursor already shares.
    pub fn from_shared(root: SharedTree, steps: Option<Vec<String>>) -> Result<Self> {
        let steps = steps.unwrap_or_default();
        if let Some(bad) = steps.iter().find(|s| path::is_reserved(s)) {
            return Err(TreeError::Steps(format!("reserved token '{bad}' is not a child name")));
        }
        Ok(Self { root, steps })
    }

    pub fn root(&self) -> Ref<'_, Value> {
        self.root.borrow()
    }

    /// Deep copy of the whole tree.
    pub fn root_value(&self) -> Value {
        self.root.borrow().clone()
    }

    pub fn shared_root(&self) -> SharedTree {
        Rc::clone(&self.root)
    }

    /// Value at the current position. A dangling position reads as `null`.
    pub fn current(&self) -> Ref<'_, Value> {
        Ref::map(self.root.borrow(), |root| tree::resolve(root, &self.steps).unwrap_or(&NULL))
    }

    /// Replace the value at the current position.
    ///
    /// Fails if the position is dangling, or if a value read through any
    /// cursor sharing this tree is still held.
    pub fn set_current(&self, value: Value) -> Result<()> {
        self.with_current_mut(|slot| *slot = value)
    }

    // Edit the current value in place. `f` must not touch the shared root.
    pub(crate) fn with_current_mut<R>(&self, f: impl FnOnce(&mut Value) -> R) -> Result<R> {
        let mut root = self.root.try_borrow_mut()?;
        let slot = tree::resolve_mut(&mut root, &self.steps)?;
        Ok(f(slot))
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn has_parent(&self) -> bool {
        !self.steps.is_empty()
    }

    pub fn child_names(&self) -> Vec<String> {
        tree::child_names(&self.current())
    }

    pub fn children(&self) -> Vec<ChildInfo> {
        tree::children(&self.current())
    }

    pub fn has_child(&self, name: &str) -> bool {
        tree::has_child(&self.current(), name)
    }

    pub fn to_root(&mut self) {
        self.steps.clear();
    }

    pub fn reset(&mut self) {
        self.to_root();
    }

    pub fn up(&mut self) -> Result<(), MoveError> {
        match self.steps.pop() {
            Some(_) => Ok(()),
            None => Err(MoveError::InvalidMoveUp),
        }
    }

    pub fn down(&mut self, name: &str) -> Result<(), MoveError> {
        if !self.has_child(name) {
            return Err(MoveError::InvalidMoveDown(name.to_string()));
        }
        self.steps.push(name.to_string());
        Ok(())
    }

    /// Perform a single step token.
    ///
    /// `*` and `**` are not expanded here: they are looked up as literal child
    /// names. Use [`crate::resolve::expand`] for wildcard paths.
    pub fn step(&mut self, token: &str) -> Result<(), MoveError> {
        tracing::trace!(token, depth = self.steps.len(), "step");
        match Step::parse(token) {
            Step::Root => {
                self.to_root();
                Ok(())
            }
            Step::Current => Ok(()),
            Step::Parent => self.up(),
            Step::Any | Step::AnyDepth | Step::Name(_) => self.down(token),
        }
    }

    /// Follow a simple path from the current position.
    ///
    /// On failure the cursor goes back to where it was before the call and the
    /// cause is wrapped in [`MoveError::InvalidPath`].
    pub fn follow_simple_path(&mut self, path: &str) -> Result<Ref<'_, Value>, MoveError> {
        let saved = self.steps.clone();
        if let Err(cause) = self.walk(path) {
            tracing::debug!(path, %cause, "path failed, rolling back");
            self.steps = saved;
            return Err(MoveError::InvalidPath { path: path.to_string(), cause: Box::new(cause) });
        }
        Ok(self.current())
    }

    /// Check whether a simple path exists. Never moves the cursor.
    pub fn path_exists(&mut self, path: &str) -> bool {
        let saved = self.steps.clone();
        let found = self.walk(path).is_ok();
        self.steps = saved;
        found
    }

    fn walk(&mut self, path: &str) -> Result<(), MoveError> {
        path::tokens(path).try_for_each(|tok| self.step(tok))
    }

    // Used by the resolver to jump between enumerated nodes.
    pub(crate) fn restore_steps(&mut self, steps: Vec<String>) {
        self.steps = steps;
    }
}
