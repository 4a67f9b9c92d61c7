//! String interning for identifiers, lambda names, and record field names.
//!
//! A [`Symbol`] is a 4-byte handle into a process-wide string table. Two
//! symbols compare equal iff their underlying strings compare equal, and
//! the comparison itself is `O(1)` (index equality) instead of `O(n)`
//! string comparison.
//!
//! The interpreter is single-threaded (see the crate-level concurrency
//! notes in `glint-rt`), so the table lives behind a `RefCell` rather than
//! a concurrent map — there is never a second thread to contend with it.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;

thread_local! {
    static INTERNER: RefCell<Interner> = RefCell::new(Interner::new());
}

struct Interner {
    strings: Vec<&'static str>,
    ids: FxHashMap<&'static str, u32>,
}

impl Interner {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            ids: FxHashMap::default(),
        }
    }

    fn intern(&mut self, text: &str) -> u32 {
        if let Some(&id) = self.ids.get(text) {
            return id;
        }
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        let id = self.strings.len() as u32;
        self.strings.push(leaked);
        self.ids.insert(leaked, id);
        id
    }

    fn resolve(&self, id: u32) -> &'static str {
        self.strings[id as usize]
    }
}

/// A compact, interned identifier.
///
/// Interned strings are leaked (never freed): the interpreter runs for one
/// process invocation, source programs are small, and this avoids a
/// lifetime parameter threading through every AST node.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(text: &str) -> Self {
        INTERNER.with(|i| Symbol(i.borrow_mut().intern(text)))
    }

    pub fn as_str(self) -> &'static str {
        INTERNER.with(|i| i.borrow().resolve(self.0))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
