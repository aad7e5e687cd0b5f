//! Objects stored in a network.
use ntk_lit::{NodeRef, ObjectId, Pol};

use crate::{
    design::ModuleId,
    func::{AigHandle, BddHandle, CoverId, GateId},
};

/// The kind of an object.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum ObjKind {
    /// The constant one node of a structurally hashed network.
    Const1,
    /// A primary input.
    PrimaryIn,
    /// A primary output.
    PrimaryOut,
    /// An input terminal of a box, driving the box.
    BoxIn,
    /// An output terminal of a box, driven by the box.
    BoxOut,
    /// An assertion output.
    Assert,
    /// A net of a netlist.
    Net,
    /// An internal logic node.
    Node,
    /// A latch box.
    Latch,
    /// A box whose contents are known.
    Whitebox,
    /// A box whose contents are opaque.
    Blackbox,
}

impl ObjKind {
    /// Number of distinct kinds.
    pub const COUNT: usize = 11;

    /// All kinds in declaration order.
    pub const ALL: [ObjKind; Self::COUNT] = [
        ObjKind::Const1,
        ObjKind::PrimaryIn,
        ObjKind::PrimaryOut,
        ObjKind::BoxIn,
        ObjKind::BoxOut,
        ObjKind::Assert,
        ObjKind::Net,
        ObjKind::Node,
        ObjKind::Latch,
        ObjKind::Whitebox,
        ObjKind::Blackbox,
    ];

    /// Position of this kind in [`ObjKind::ALL`].
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Combinational inputs are primary inputs and box outputs.
    #[inline]
    pub fn is_ci(self) -> bool {
        matches!(self, ObjKind::PrimaryIn | ObjKind::BoxOut)
    }

    /// Combinational outputs are primary outputs, box inputs and assertions.
    #[inline]
    pub fn is_co(self) -> bool {
        matches!(self, ObjKind::PrimaryOut | ObjKind::BoxIn | ObjKind::Assert)
    }

    /// Boxes are latches, whiteboxes and blackboxes.
    #[inline]
    pub fn is_box(self) -> bool {
        matches!(self, ObjKind::Latch | ObjKind::Whitebox | ObjKind::Blackbox)
    }

    /// Returns `true` for objects that end a combinational traversal.
    ///
    /// These are the combinational inputs and outputs as well as the constant.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self.is_ci() || self.is_co() || self == ObjKind::Const1
    }

    /// Short lowercase name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ObjKind::Const1 => "const1",
            ObjKind::PrimaryIn => "pi",
            ObjKind::PrimaryOut => "po",
            ObjKind::BoxIn => "bi",
            ObjKind::BoxOut => "bo",
            ObjKind::Assert => "assert",
            ObjKind::Net => "net",
            ObjKind::Node => "node",
            ObjKind::Latch => "latch",
            ObjKind::Whitebox => "whitebox",
            ObjKind::Blackbox => "blackbox",
        }
    }
}

impl std::fmt::Display for ObjKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Freely usable flags of an object.
///
/// None of these flags is interpreted by the network itself. The two marks are scratch storage
/// for passes, see [`MarkPass`][crate::MarkPass] for checked use.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct ObjFlags {
    /// Multipurpose mark.
    pub mark_a: bool,
    /// Multipurpose mark.
    pub mark_b: bool,
    /// Phase of the node.
    pub phase: bool,
    /// Set for the root of an EXOR structure.
    pub exor: bool,
    /// Set for objects that must not be removed by sweeping passes.
    pub persist: bool,
}

/// Initial value of a latch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum LatchInit {
    /// Not specified yet.
    #[default]
    None,
    /// Initialized to zero.
    Zero,
    /// Initialized to one.
    One,
    /// Initial value is irrelevant.
    DontCare,
}

/// Clocking behavior of a latch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LatchType {
    /// Captures on the falling clock edge.
    FallingEdge,
    /// Captures on the rising clock edge.
    RisingEdge,
    /// Transparent while the clock is high.
    ActiveHigh,
    /// Transparent while the clock is low.
    ActiveLow,
    /// Not clocked.
    Asynchronous,
}

/// Per-latch data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct LatchInfo {
    /// Initial value.
    pub init: LatchInit,
    /// Clocking behavior, `None` when undefined.
    pub latch_type: Option<LatchType>,
}

/// Representation specific data attached to an object.
///
/// Which variants may appear is determined by the functional mode and type of the owning network,
/// see [`FuncMode::admits`][crate::FuncMode::admits].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Payload {
    /// No data.
    #[default]
    None,
    /// A cover registered in the network's cover pool.
    Cover(CoverId),
    /// A function owned by the network's BDD manager.
    Bdd(BddHandle),
    /// A local AIG function owned by an external AIG manager.
    Aig(AigHandle),
    /// A library gate.
    Gate(GateId),
    /// The next member of a choice node's equivalence class.
    Equiv(ObjectId),
    /// The model implementing a box.
    Model(ModuleId),
}

impl Payload {
    /// Short name of the variant used in diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Payload::None => "none",
            Payload::Cover(_) => "cover",
            Payload::Bdd(_) => "bdd",
            Payload::Aig(_) => "aig",
            Payload::Gate(_) => "gate",
            Payload::Equiv(_) => "equiv",
            Payload::Model(_) => "model",
        }
    }
}

/// One node, terminal, net or box of a network.
#[derive(Clone, Debug)]
pub struct Object {
    pub(crate) id: ObjectId,
    pub(crate) kind: ObjKind,
    pub(crate) trav_id: u32,
    pub(crate) level: u32,
    pub(crate) flags: ObjFlags,
    pub(crate) compl: [bool; 2],
    pub(crate) fanins: Vec<ObjectId>,
    pub(crate) fanouts: Vec<ObjectId>,
    pub(crate) payload: Payload,
    pub(crate) latch: Option<LatchInfo>,
    pub(crate) copy_ref: Option<ObjectId>,
    pub(crate) equiv_prev: Option<ObjectId>,
}

impl Object {
    pub(crate) fn new(id: ObjectId, kind: ObjKind) -> Self {
        Self {
            id,
            kind,
            trav_id: 0,
            level: 0,
            flags: ObjFlags::default(),
            compl: [false; 2],
            fanins: vec![],
            fanouts: vec![],
            payload: Payload::None,
            latch: (kind == ObjKind::Latch).then(LatchInfo::default),
            copy_ref: None,
            equiv_prev: None,
        }
    }

    /// The id of this object.
    #[inline(always)]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The kind of this object.
    #[inline(always)]
    pub fn kind(&self) -> ObjKind {
        self.kind
    }

    /// The traversal generation in which this object was last marked.
    #[inline(always)]
    pub fn trav_id(&self) -> u32 {
        self.trav_id
    }

    /// The level as last assigned by a level computation.
    #[inline(always)]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The flags of this object.
    #[inline(always)]
    pub fn flags(&self) -> ObjFlags {
        self.flags
    }

    /// The fanins in slot order.
    #[inline(always)]
    pub fn fanins(&self) -> &[ObjectId] {
        &self.fanins
    }

    /// The fanouts in the order they were connected.
    #[inline(always)]
    pub fn fanouts(&self) -> &[ObjectId] {
        &self.fanouts
    }

    /// Returns `true` when fanin `slot` is complemented.
    ///
    /// Only slots `0` and `1` can be complemented.
    #[inline(always)]
    pub fn fanin_compl(&self, slot: usize) -> bool {
        self.compl.get(slot).copied().unwrap_or(false)
    }

    /// Returns fanin `slot` as a reference carrying the slot's complement bit.
    #[inline]
    pub fn child(&self, slot: usize) -> NodeRef {
        NodeRef::new(self.fanins[slot], Pol::neg_if(self.fanin_compl(slot)))
    }

    /// The first fanin together with its complement bit.
    #[inline]
    pub fn child0(&self) -> NodeRef {
        self.child(0)
    }

    /// The second fanin together with its complement bit.
    #[inline]
    pub fn child1(&self) -> NodeRef {
        self.child(1)
    }

    /// The representation specific data.
    #[inline(always)]
    pub fn payload(&self) -> Payload {
        self.payload
    }

    /// Latch data, present exactly for latches.
    #[inline(always)]
    pub fn latch(&self) -> Option<&LatchInfo> {
        self.latch.as_ref()
    }

    /// The copy of this object made by the last duplication.
    #[inline(always)]
    pub fn copy_ref(&self) -> Option<ObjectId> {
        self.copy_ref
    }

    /// Returns the next member of this object's equivalence class.
    #[inline]
    pub fn equiv_next(&self) -> Option<ObjectId> {
        match self.payload {
            Payload::Equiv(next) => Some(next),
            _ => None,
        }
    }

    /// Returns the object whose equivalence link points to this object.
    #[inline(always)]
    pub fn equiv_prev(&self) -> Option<ObjectId> {
        self.equiv_prev
    }
}
