//! Interned identifiers.
//!
//! A tree interns every identifier and literal token once; expressions carry
//! the 32-bit [`Name`] instead of owned strings.

use rustc_hash::FxHashMap;
use std::fmt;

/// Interned string identifier, valid for the tree that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// Append-only string table.
///
/// Interning happens while a tree is assembled (`&mut self`); once the tree
/// is frozen lookups are plain slice reads.
#[derive(Clone)]
pub struct StringInterner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    pub fn new() -> Self {
        let mut interner = StringInterner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        interner.intern("");
        interner
    }

    /// Intern a string, returning the existing name when already present.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }
        let name = Name(u32::try_from(self.strings.len()).unwrap_or(u32::MAX));
        self.strings.push(s.into());
        self.map.insert(s.into(), name);
        name
    }

    /// Look up the string for a name. Unknown names resolve to `""`.
    #[inline]
    pub fn lookup(&self, name: Name) -> &str {
        self.strings
            .get(name.0 as usize)
            .map_or("", |s| s.as_ref())
    }

    /// Find an already interned string without inserting it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.strings.len())
            .finish()
    }
}
