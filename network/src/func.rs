//! Interfaces to the functionality managers owning node functions.
//!
//! The network never interprets node functions. It only stores handles in object payloads and
//! calls into the manager when a payload is copied to another network or released on deletion.
use std::{any::Any, fmt::Debug};

use hashbrown::HashTable;
use ntk_ids::{define_id, id_vec::IdVec};

use crate::hash::hash_value;

define_id! {
    /// Identifies an interned cover in a [`CoverPool`].
    pub struct CoverId;
}

define_id! {
    /// Opaque handle of a function owned by a [`BddManager`].
    pub struct BddHandle;
}

define_id! {
    /// Opaque handle of a local function owned by an external AIG manager.
    pub struct AigHandle;
}

define_id! {
    /// Opaque identifier of a gate of an external cell library.
    pub struct GateId;
}

/// Interning storage for the covers of SOP and multi-valued networks.
///
/// Covers are stored in their textual form, one cube per line. Registering the same text twice
/// returns the same id.
#[derive(Clone, Default)]
pub struct CoverPool {
    covers: IdVec<CoverId, String>,
    table: HashTable<CoverId>,
}

impl Debug for CoverPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverPool")
            .field("len", &self.covers.len())
            .finish()
    }
}

impl CoverPool {
    /// Returns the id of a cover, registering it when it is new.
    pub fn register(&mut self, cover: &str) -> CoverId {
        let hash = hash_value(cover);
        let covers = &self.covers;
        if let Some(&found) = self.table.find(hash, |&id| covers[id] == cover) {
            return found;
        }
        let id = self.covers.push(cover.to_owned());
        let covers = &self.covers;
        self.table
            .insert_unique(hash, id, |&id| hash_value(covers[id].as_str()));
        id
    }

    /// Returns the text of a registered cover.
    pub fn cover(&self, id: CoverId) -> &str {
        &self.covers[id]
    }

    /// Returns the number of distinct registered covers.
    pub fn len(&self) -> usize {
        self.covers.len()
    }

    /// Returns `true` if no cover was registered.
    pub fn is_empty(&self) -> bool {
        self.covers.is_empty()
    }
}

/// The BDD package seam.
///
/// Implementors own the BDD nodes referenced by [`BddHandle`]s stored in a network.
pub trait BddManager: Debug {
    /// Creates an empty manager of the same configuration, for use by a copied network.
    fn start_new(&self) -> Box<dyn BddManager>;

    /// Copies a function owned by `source` into this manager.
    fn transfer(&mut self, source: &dyn BddManager, func: BddHandle) -> BddHandle;

    /// Releases a function that is no longer referenced by the network.
    fn release(&mut self, func: BddHandle);

    /// Upcast used by implementations to access a `source` manager of their own type.
    fn as_any(&self) -> &dyn Any;
}

/// The functionality manager held by a network.
#[derive(Debug, Default)]
pub enum FuncManager {
    /// No manager, node functions are owned externally or not present.
    #[default]
    None,
    /// Cover storage of SOP and multi-valued networks.
    Covers(CoverPool),
    /// A BDD package.
    Bdd(Box<dyn BddManager>),
}

impl FuncManager {
    /// Returns the cover pool, if this is one.
    pub fn covers(&self) -> Option<&CoverPool> {
        match self {
            FuncManager::Covers(pool) => Some(pool),
            _ => None,
        }
    }

    /// Returns the cover pool mutably, if this is one.
    pub fn covers_mut(&mut self) -> Option<&mut CoverPool> {
        match self {
            FuncManager::Covers(pool) => Some(pool),
            _ => None,
        }
    }

    /// Returns the BDD manager, if this is one.
    pub fn bdd(&self) -> Option<&dyn BddManager> {
        match self {
            FuncManager::Bdd(manager) => Some(&**manager),
            _ => None,
        }
    }

    /// Returns the BDD manager mutably, if this is one.
    pub fn bdd_mut(&mut self) -> Option<&mut (dyn BddManager + 'static)> {
        match self {
            FuncManager::Bdd(manager) => Some(&mut **manager),
            _ => None,
        }
    }

    /// Creates an empty manager of the same kind.
    pub(crate) fn start_new(&self) -> Self {
        match self {
            FuncManager::None => FuncManager::None,
            FuncManager::Covers(_) => FuncManager::Covers(CoverPool::default()),
            FuncManager::Bdd(manager) => FuncManager::Bdd(manager.start_new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_are_interned() {
        let mut pool = CoverPool::default();
        let and = pool.register("11 1\n");
        let or = pool.register("1- 1\n-1 1\n");
        assert_ne!(and, or);
        assert_eq!(pool.register("11 1\n"), and);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.cover(or), "1- 1\n-1 1\n");
    }
}
