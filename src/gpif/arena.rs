//! Id-indexed arenas, one per GPIF section
//!
//! GPIF cross-references its sections with string ids. Each section is
//! loaded once into an [`Arena`]; references are turned into typed
//! [`Handle`]s at load time so later stages never look up strings.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::{TabError, TabResult};

/// Cross-referenced sections of a GPIF document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Rhythms,
    Notes,
    Beats,
    Voices,
    Bars,
    MasterBars,
    Tracks,
    Diagrams,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Rhythms => "Rhythms",
            Section::Notes => "Notes",
            Section::Beats => "Beats",
            Section::Voices => "Voices",
            Section::Bars => "Bars",
            Section::MasterBars => "MasterBars",
            Section::Tracks => "Tracks",
            Section::Diagrams => "Diagrams",
        };
        f.write_str(name)
    }
}

/// Typed index of an element in its section's arena
pub struct Handle<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: usize) -> Self {
        Handle { index, _marker: PhantomData }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

// Manual impls: derives would put bounds on T.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.index)
    }
}

/// Elements of one section with their declared ids
pub struct Arena<T> {
    section: Section,
    items: Vec<T>,
    ids: Vec<String>,
    by_id: HashMap<String, Handle<T>>,
}

impl<T> Arena<T> {
    pub fn new(section: Section) -> Self {
        Arena {
            section,
            items: Vec::new(),
            ids: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Add an element. A repeated id shadows the earlier declaration.
    pub fn insert(&mut self, id: impl Into<String>, item: T) -> Handle<T> {
        let id = id.into();
        let handle = Handle::new(self.items.len());
        self.items.push(item);
        self.ids.push(id.clone());
        self.by_id.insert(id, handle);
        handle
    }

    /// Look up a declared id, failing with `MissingReference`
    pub fn resolve(&self, id: &str) -> TabResult<Handle<T>> {
        self.lookup(id)
            .ok_or_else(|| TabError::missing(self.section, id))
    }

    pub fn lookup(&self, id: &str) -> Option<Handle<T>> {
        self.by_id.get(id.trim()).copied()
    }

    pub fn get(&self, handle: Handle<T>) -> &T {
        &self.items[handle.index]
    }

    pub fn id_of(&self, handle: Handle<T>) -> &str {
        &self.ids[handle.index]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (Handle::new(i), item))
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("section", &self.section)
            .field("len", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_and_get() {
        let mut arena = Arena::new(Section::Voices);
        let a = arena.insert("7", "first");
        let b = arena.insert("3", "second");
        assert_eq!(arena.resolve("3").unwrap(), b);
        assert_eq!(*arena.get(a), "first");
        assert_eq!(arena.id_of(b), "3");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_missing_id_names_section() {
        let arena: Arena<u8> = Arena::new(Section::Beats);
        match arena.resolve("12") {
            Err(TabError::MissingReference { section, id }) => {
                assert_eq!(section, Section::Beats);
                assert_eq!(id, "12");
            }
            other => panic!("Expected MissingReference, got {:?}", other),
        }
    }
}
