//! Scoped name → value storage.
//!
//! The source keys entries by a CRC-32 hash of the name's bytes, which
//! spec's own design notes flag as a correctness risk under collision;
//! this keys by the interned `Symbol` instead — already a cheap,
//! collision-free handle.
//!
//! Scoping is depth-tagged rather than a stack of tables: each name maps
//! to a small history of `{depth, value}` entries rather than one slot,
//! because leaving a scope must *hide* entries recorded at a deeper
//! level without discarding the shallower one `lookup` should then see
//! again. `push` always appends a new entry; `overwrite` mutates the
//! most recently pushed entry still visible at the current depth, or
//! falls back to `push` if none is.

use glint_ast::NodeRef;
use glint_util::Symbol;
use rustc_hash::FxHashMap;

use crate::error::RuntimeError;

struct Entry {
    depth: u32,
    value: NodeRef,
}

pub struct Storage {
    depth: u32,
    table: FxHashMap<Symbol, Vec<Entry>>,
}

impl Storage {
    pub fn new() -> Self {
        Self {
            depth: 0,
            table: FxHashMap::default(),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn begin_scope(&mut self) {
        self.depth += 1;
    }

    pub fn end_scope(&mut self) -> Result<(), RuntimeError> {
        if self.depth == 0 {
            return Err(RuntimeError::ScopeUnderflow);
        }
        self.depth -= 1;
        Ok(())
    }

    /// Acquires a new scope for the duration of the returned guard;
    /// the scope is released on drop, including on an early return via
    /// `?` partway through evaluating the guarded block.
    pub fn scope_guard(&mut self) -> ScopeGuard<'_> {
        self.begin_scope();
        ScopeGuard { storage: self }
    }

    pub fn push(&mut self, name: Symbol, value: NodeRef) {
        let depth = self.depth;
        self.table.entry(name).or_default().push(Entry { depth, value });
    }

    pub fn overwrite(&mut self, name: Symbol, value: NodeRef) {
        let depth = self.depth;
        if let Some(entries) = self.table.get_mut(&name) {
            if let Some(e) = entries.iter_mut().rev().find(|e| e.depth <= depth) {
                e.value = value;
                return;
            }
        }
        self.push(name, value);
    }

    pub fn lookup(&self, name: Symbol) -> Option<NodeRef> {
        let depth = self.depth;
        self.table
            .get(&name)?
            .iter()
            .rev()
            .find(|e| e.depth <= depth)
            .map(|e| e.value.clone())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ScopeGuard<'a> {
    storage: &'a mut Storage,
}

impl std::ops::Deref for ScopeGuard<'_> {
    type Target = Storage;
    fn deref(&self) -> &Storage {
        self.storage
    }
}

impl std::ops::DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Storage {
        self.storage
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        let _ = self.storage.end_scope();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_ast::Node;

    fn sym(s: &str) -> Symbol {
        Symbol::intern(s)
    }

    #[test]
    fn scope_hiding_matches_the_documented_property() {
        let mut storage = Storage::new();
        let x = sym("x");
        storage.push(x, Node::integer(1));
        assert_eq!(int_value(&storage, x), 1);

        storage.begin_scope();
        storage.push(x, Node::integer(2));
        assert_eq!(int_value(&storage, x), 2);

        storage.end_scope().unwrap();
        assert_eq!(int_value(&storage, x), 1);
    }

    #[test]
    fn end_scope_at_depth_zero_is_rejected() {
        let mut storage = Storage::new();
        assert_eq!(storage.end_scope(), Err(RuntimeError::ScopeUnderflow));
    }

    #[test]
    fn overwrite_without_prior_entry_behaves_like_push() {
        let mut storage = Storage::new();
        let x = sym("y");
        storage.overwrite(x, Node::integer(5));
        assert_eq!(int_value(&storage, x), 5);
    }

    #[test]
    fn overwrite_mutates_the_visible_entry_in_place() {
        let mut storage = Storage::new();
        let x = sym("z");
        storage.push(x, Node::integer(1));
        storage.begin_scope();
        storage.overwrite(x, Node::integer(9));
        assert_eq!(int_value(&storage, x), 9);
        storage.end_scope().unwrap();
        // the shallower entry was never shadowed by a deeper push, so the
        // mutation (which found and updated that same entry) is visible here too.
        assert_eq!(int_value(&storage, x), 9);
    }

    #[test]
    fn scope_guard_releases_on_drop() {
        let mut storage = Storage::new();
        assert_eq!(storage.depth(), 0);
        {
            let _guard = storage.scope_guard();
        }
        assert_eq!(storage.depth(), 0);
    }

    #[test]
    fn lookup_of_undefined_name_is_none() {
        let storage = Storage::new();
        assert!(storage.lookup(sym("nope")).is_none());
    }

    fn int_value(storage: &Storage, name: Symbol) -> i32 {
        match storage.lookup(name).unwrap().as_ref() {
            Node::Integer(c) => c.get(),
            other => panic!("expected integer, got {other:?}"),
        }
    }
}
