//! Object identifiers and polarity tagged references into a network.
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(missing_docs)]

pub mod node_ref;
pub mod obj_id;
pub mod pol;

pub use node_ref::NodeRef;
pub use obj_id::ObjectId;
pub use pol::Pol;
