//! Hierarchical designs.
//!
//! A [`Design`] is a library of modules, each given as a [`Network`]. Boxes of a network refer to
//! the module implementing them through a [`Payload::Model`] payload. The input and output
//! terminals of a box correspond, in order, to the primary inputs and outputs of its module.
use std::{fmt, hash::BuildHasherDefault};

use hashbrown::HashMap;
use ntk_ids::{define_id, id_vec::IdVec};
use ntk_lit::ObjectId;
use zwohash::ZwoHasher;

use crate::{object::ObjKind, Network, Payload};

define_id! {
    /// Identifies a module of a [`Design`].
    pub struct ModuleId;
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", ntk_ids::Id::id_index(*self))
    }
}

/// Errors in the module structure of a design.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DesignError {
    /// A module with this name is already part of the design.
    DuplicateModule {
        /// The module name.
        name: String,
    },
    /// A box refers to a module that is not part of the design.
    UnknownModule {
        /// The box, if the module was referenced by one.
        bx: Option<ObjectId>,
        /// The missing module.
        module: ModuleId,
    },
    /// The terminals of a box do not match the ports of its module.
    BoxSignalMismatch {
        /// The box.
        bx: ObjectId,
        /// The name of the module.
        module: String,
        /// Number of input and output terminals of the box.
        box_signals: (usize, usize),
        /// Number of primary inputs and outputs of the module.
        model_signals: (usize, usize),
    },
}

impl fmt::Display for DesignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignError::DuplicateModule { name } => {
                write!(f, "module {name:?} is defined more than once")
            }
            DesignError::UnknownModule { bx: Some(bx), module } => {
                write!(f, "box {bx} refers to unknown module {module}")
            }
            DesignError::UnknownModule { bx: None, module } => {
                write!(f, "unknown module {module}")
            }
            DesignError::BoxSignalMismatch {
                bx,
                module,
                box_signals,
                model_signals,
            } => write!(
                f,
                "box {bx} has {} inputs and {} outputs \
                 but module {module:?} has {} inputs and {} outputs",
                box_signals.0, box_signals.1, model_signals.0, model_signals.1
            ),
        }
    }
}

impl std::error::Error for DesignError {}

/// A collection of named modules.
#[derive(Debug, Default)]
pub struct Design {
    name: Option<String>,
    modules: IdVec<ModuleId, Network>,
    by_name: HashMap<String, ModuleId, BuildHasherDefault<ZwoHasher>>,
}

impl Design {
    /// Creates an empty design.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The name of the design.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Adds a module, using the name of the network as module name.
    ///
    /// # Panics
    ///
    /// Panics if the network has no name.
    pub fn add_module(&mut self, ntk: Network) -> Result<ModuleId, DesignError> {
        let Some(name) = ntk.name() else {
            panic!("modules of a design need a name");
        };
        if self.by_name.contains_key(name) {
            let err = DesignError::DuplicateModule {
                name: name.to_owned(),
            };
            log::warn!("{err}");
            return Err(err);
        }
        let name = name.to_owned();
        log::debug!("adding module {name:?} with {} objects", ntk.obj_count());
        let id = self.modules.push(ntk);
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// The number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if there are no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Returns a module.
    pub fn module(&self, id: ModuleId) -> Option<&Network> {
        self.modules.get(id)
    }

    /// Returns a module mutably.
    pub fn module_mut(&mut self, id: ModuleId) -> Option<&mut Network> {
        self.modules.get_mut(id)
    }

    /// Finds a module by name.
    pub fn find_module(&self, name: &str) -> Option<ModuleId> {
        self.by_name.get(name).copied()
    }

    /// Iterates over all modules in the order they were added.
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Network)> {
        self.modules.iter()
    }

    /// Creates a box instantiating `module` in `ntk`.
    ///
    /// The box gets one input terminal per primary input and one output terminal per primary
    /// output of the module.
    pub fn instantiate(
        &self,
        ntk: &mut Network,
        module: ModuleId,
        kind: ObjKind,
    ) -> Result<ObjectId, DesignError> {
        assert!(
            matches!(kind, ObjKind::Whitebox | ObjKind::Blackbox),
            "modules are instantiated as whiteboxes or blackboxes, not as {kind}"
        );
        let Some(model) = self.module(module) else {
            let err = DesignError::UnknownModule { bx: None, module };
            log::warn!("{err}");
            return Err(err);
        };
        let bx = ntk.create_box(kind, model.pis().len(), model.pos().len());
        ntk.set_payload(bx, Payload::Model(module));
        if let Some(name) = model.name() {
            log::trace!("instantiated module {name:?} as {kind} {bx}");
        }
        Ok(bx)
    }

    /// Checks that a box refers to a module of this design with matching ports.
    ///
    /// Boxes without a model are accepted.
    pub fn check_box(&self, ntk: &Network, bx: ObjectId) -> Result<(), DesignError> {
        let Payload::Model(module) = ntk.payload(bx) else {
            return Ok(());
        };
        let result = match self.module(module) {
            None => Err(DesignError::UnknownModule {
                bx: Some(bx),
                module,
            }),
            Some(model) => {
                let box_signals = (ntk.fanins(bx).len(), ntk.fanouts(bx).len());
                let model_signals = (model.pis().len(), model.pos().len());
                if box_signals == model_signals {
                    Ok(())
                } else {
                    Err(DesignError::BoxSignalMismatch {
                        bx,
                        module: model.name().unwrap_or_default().to_owned(),
                        box_signals,
                        model_signals,
                    })
                }
            }
        };
        if let Err(err) = &result {
            log::warn!("{err}");
        }
        result
    }

    /// Checks all boxes of all modules, see [`check_box`][Self::check_box].
    pub fn check(&self) -> Result<(), DesignError> {
        for (_, ntk) in self.modules() {
            for &bx in ntk.boxes() {
                self.check_box(ntk, bx)?;
            }
        }
        Ok(())
    }
}
