//! String interning for identifiers and qualified type names.
//!
//! Qualified names (location + identifier chain) are compared for nominal
//! type identity extremely often — by the checker during name resolution
//! and by the type system during composite/interface equality. Interning
//! turns those comparisons into integer equality.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// An interned string. Cheap to copy and compare.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom(u32);

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({})", self.0)
    }
}

/// A single-threaded string interner.
///
/// Not `Sync`; each checker/interpreter run owns one. A single transaction
/// executes on one thread at a time, so there is no need for a sharded or
/// concurrent interner here.
pub struct Interner {
    strings: RefCell<Vec<Rc<str>>>,
    lookup: RefCell<FxHashMap<Rc<str>, Atom>>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    #[must_use]
    pub fn new() -> Self {
        Interner {
            strings: RefCell::new(Vec::new()),
            lookup: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn intern(&self, s: &str) -> Atom {
        if let Some(&atom) = self.lookup.borrow().get(s) {
            return atom;
        }
        let rc: Rc<str> = Rc::from(s);
        let mut strings = self.strings.borrow_mut();
        let atom = Atom(strings.len() as u32);
        strings.push(Rc::clone(&rc));
        self.lookup.borrow_mut().insert(rc, atom);
        atom
    }

    #[must_use]
    pub fn resolve(&self, atom: Atom) -> Rc<str> {
        Rc::clone(&self.strings.borrow()[atom.0 as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_the_same_atom() {
        let interner = Interner::new();
        let a = interner.intern("Vault");
        let b = interner.intern("Vault");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_text_interns_to_distinct_atoms() {
        let interner = Interner::new();
        let a = interner.intern("Vault");
        let b = interner.intern("Receiver");
        assert_ne!(a, b);
        assert_eq!(&*interner.resolve(a), "Vault");
        assert_eq!(&*interner.resolve(b), "Receiver");
    }
}
