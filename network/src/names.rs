//! Object names.
//!
//! Names are kept outside of the objects, in a [`NameManager`] owned by each network. Lookup by
//! name is per object kind, so that e.g. a primary input and a primary output can share a name as
//! is common for ports of a design.
use std::hash::BuildHasherDefault;

use hashbrown::{HashMap, HashTable};
use ntk_lit::ObjectId;
use zwohash::ZwoHasher;

use crate::{hash::hash_value, object::ObjKind};

/// Error returned when assigning a name that is already used by an object of the same kind.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NameTakenError {
    /// The rejected name, including any suffix.
    pub name: String,
    /// The kind of both objects.
    pub kind: ObjKind,
    /// The object that already has this name.
    pub owner: ObjectId,
}

impl std::fmt::Display for NameTakenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "name {:?} is already used by {} {}",
            self.name, self.kind, self.owner
        )
    }
}

impl std::error::Error for NameTakenError {}

#[derive(Clone, Debug)]
struct NameEntry {
    kind: ObjKind,
    name: String,
}

/// Bidirectional mapping between object ids and names.
#[derive(Clone, Default)]
pub struct NameManager {
    entries: HashMap<ObjectId, NameEntry, BuildHasherDefault<ZwoHasher>>,
    by_name: HashTable<ObjectId>,
}

impl std::fmt::Debug for NameManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(id, entry)| (id, &entry.name)))
            .finish()
    }
}

impl NameManager {
    /// Assigns the name `name` followed by `suffix` to an object.
    ///
    /// Returns the stored name. If the object already has a name, that name is kept and returned.
    pub fn assign(
        &mut self,
        id: ObjectId,
        kind: ObjKind,
        name: &str,
        suffix: Option<&str>,
    ) -> Result<&str, NameTakenError> {
        if self.entries.contains_key(&id) {
            return Ok(&self.entries[&id].name);
        }

        let mut stored = String::with_capacity(name.len() + suffix.map_or(0, str::len));
        stored.push_str(name);
        if let Some(suffix) = suffix {
            stored.push_str(suffix);
        }

        let hash = hash_value((kind, stored.as_str()));
        let entries = &self.entries;
        if let Some(&owner) = self.by_name.find(hash, |other| {
            let entry = &entries[other];
            entry.kind == kind && entry.name == stored
        }) {
            return Err(NameTakenError {
                name: stored,
                kind,
                owner,
            });
        }

        log::trace!("naming {kind} {id} {stored:?}");

        self.entries.insert(id, NameEntry { kind, name: stored });
        let entries = &self.entries;
        self.by_name.insert_unique(hash, id, |other| {
            let entry = &entries[other];
            hash_value((entry.kind, entry.name.as_str()))
        });

        Ok(&self.entries[&id].name)
    }

    /// Returns the name of an object.
    pub fn lookup_name(&self, id: ObjectId) -> Option<&str> {
        self.entries.get(&id).map(|entry| entry.name.as_str())
    }

    /// Returns the object of the given kind with the given name.
    pub fn lookup_id(&self, name: &str, kind: ObjKind) -> Option<ObjectId> {
        let entries = &self.entries;
        self.by_name
            .find(hash_value((kind, name)), |other| {
                let entry = &entries[other];
                entry.kind == kind && entry.name == name
            })
            .copied()
    }

    /// Removes the name of an object, returning it.
    pub fn remove(&mut self, id: ObjectId) -> Option<String> {
        let entry = self.entries.get(&id)?;
        let hash = hash_value((entry.kind, entry.name.as_str()));
        if let Ok(found) = self.by_name.find_entry(hash, |&other| other == id) {
            found.remove();
        }
        self.entries.remove(&id).map(|entry| entry.name)
    }

    /// Returns the number of named objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no object is named.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all named objects in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &str)> {
        self.entries
            .iter()
            .map(|(&id, entry)| (id, entry.name.as_str()))
    }
}
