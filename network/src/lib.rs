//! Mutable circuit networks of objects.
//!
//! A [`Network`] owns a table of [`Object`]s: primary inputs and outputs, internal logic nodes,
//! nets of netlists, latches and hierarchical boxes together with their terminals. Objects refer
//! to each other through fanin and fanout lists that are kept symmetric by the edge editing
//! methods of the network. Edges into 2-input AND nodes of structurally hashed networks may be
//! complemented, which is represented by per-slot complement bits and exposed through
//! [`NodeRef`].
//!
//! Graph algorithms use a network wide traversal generation counter to mark visited objects, so no
//! per-pass reset of all objects is needed. Passes that need scratch storage beyond that acquire
//! it through [`CopyPass`] and [`MarkPass`], which check that no stale data is left over.
//!
//! The functional representation of nodes (covers, BDDs, mapped gates, AIG handles) is owned by
//! external managers that are only reachable through the [`func`] interfaces. This crate only
//! maintains the graph structure.
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(missing_docs)]

pub mod check;
pub mod cycle;
pub mod design;
pub mod dfs;
pub mod fanio;
pub mod func;
mod hash;
pub mod level;
pub mod lifecycle;
pub mod names;
pub mod network;
pub mod object;
pub mod pass;
mod scc;
pub mod trav;

pub use ntk_lit::{NodeRef, ObjectId, Pol};

pub use check::{CheckError, Violation};
pub use cycle::{CombinationalLoop, LoopStep};
pub use design::{Design, DesignError, ModuleId};
pub use level::ChoiceLevelPolicy;
pub use network::{FuncMode, Network, NetworkType};
pub use object::{LatchInfo, LatchInit, ObjFlags, ObjKind, Object, Payload};
pub use pass::{CopyPass, Mark, MarkPass};
