//! The network container.
use std::borrow::Cow;

use ntk_ids::id_vec::IdVec;
use ntk_lit::{NodeRef, ObjectId};

use crate::{
    func::{BddManager, CoverId, CoverPool, FuncManager},
    names::{NameManager, NameTakenError},
    object::{LatchInfo, LatchInit, ObjFlags, ObjKind, Object, Payload},
};

/// The structural type of a network.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NetworkType {
    /// Nodes are connected through explicit net objects.
    Netlist,
    /// Nodes are connected directly and carry arbitrary local functions.
    Logic,
    /// Nodes are 2-input ANDs with complemented edges, sharing structure.
    Strash,
}

/// The representation of node functions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FuncMode {
    /// Sum-of-products covers.
    Sop,
    /// BDDs.
    Bdd,
    /// And-inverter graphs.
    Aig,
    /// Gates of a cell library.
    Map,
    /// Multi-valued tables.
    BlifMv,
    /// No functions at all.
    Blackbox,
}

impl FuncMode {
    /// Returns `true` when an object of kind `kind` in a network of type `ntype` using this mode
    /// may carry `payload`.
    pub fn admits(self, ntype: NetworkType, kind: ObjKind, payload: &Payload) -> bool {
        match payload {
            Payload::None => true,
            Payload::Model(_) => matches!(kind, ObjKind::Whitebox | ObjKind::Blackbox),
            Payload::Equiv(_) => ntype == NetworkType::Strash && kind == ObjKind::Node,
            Payload::Cover(_) => {
                matches!(self, FuncMode::Sop | FuncMode::BlifMv) && kind == ObjKind::Node
            }
            Payload::Bdd(_) => self == FuncMode::Bdd && kind == ObjKind::Node,
            Payload::Aig(_) => {
                self == FuncMode::Aig && ntype != NetworkType::Strash && kind == ObjKind::Node
            }
            Payload::Gate(_) => self == FuncMode::Map && kind == ObjKind::Node,
        }
    }
}

/// A network of objects.
///
/// The network owns all objects. Objects are addressed by [`ObjectId`]s which index the object
/// table. Deleting an object leaves a hole in the table; ids are never handed out again during
/// the lifetime of a network.
///
/// Besides the table, the network maintains per-role lists of objects (primary inputs and
/// outputs, combinational inputs and outputs, assertions and boxes) in creation order, and the
/// number of live objects per kind.
#[derive(Debug)]
pub struct Network {
    name: Option<String>,
    ntype: NetworkType,
    mode: FuncMode,
    pub(crate) objs: IdVec<ObjectId, Option<Object>>,
    pis: Vec<ObjectId>,
    pos: Vec<ObjectId>,
    cis: Vec<ObjectId>,
    cos: Vec<ObjectId>,
    pios: Vec<ObjectId>,
    asserts: Vec<ObjectId>,
    boxes: Vec<ObjectId>,
    obj_count: usize,
    kind_counts: [usize; ObjKind::COUNT],
    pub(crate) trav_id: u32,
    func: FuncManager,
    names: NameManager,
    pub(crate) reverse_levels: Option<IdVec<ObjectId, u32>>,
    const1: Option<ObjectId>,
}

impl Network {
    /// Creates an empty network.
    ///
    /// Structurally hashed networks must use [`FuncMode::Aig`] and start out with their constant
    /// node. SOP and multi-valued networks get a cover pool. A BDD network starts without a
    /// manager, see [`Network::set_bdd_manager`].
    pub fn new(ntype: NetworkType, mode: FuncMode) -> Self {
        assert!(
            ntype != NetworkType::Strash || mode == FuncMode::Aig,
            "structurally hashed networks use AIG functions, not {mode:?}"
        );
        let func = match mode {
            FuncMode::Sop | FuncMode::BlifMv => FuncManager::Covers(CoverPool::default()),
            _ => FuncManager::None,
        };
        let mut ntk = Self {
            name: None,
            ntype,
            mode,
            objs: IdVec::default(),
            pis: vec![],
            pos: vec![],
            cis: vec![],
            cos: vec![],
            pios: vec![],
            asserts: vec![],
            boxes: vec![],
            obj_count: 0,
            kind_counts: [0; ObjKind::COUNT],
            trav_id: 1,
            func,
            names: NameManager::default(),
            reverse_levels: None,
            const1: None,
        };
        if ntype == NetworkType::Strash {
            ntk.create(ObjKind::Const1);
        }
        ntk
    }

    /// Creates an empty BDD network using the given manager.
    pub fn with_bdd_manager(ntype: NetworkType, manager: Box<dyn BddManager>) -> Self {
        let mut ntk = Self::new(ntype, FuncMode::Bdd);
        ntk.set_bdd_manager(manager);
        ntk
    }

    /// Installs the BDD manager of a BDD network.
    pub fn set_bdd_manager(&mut self, manager: Box<dyn BddManager>) {
        assert_eq!(self.mode, FuncMode::Bdd, "only BDD networks have a BDD manager");
        self.func = FuncManager::Bdd(manager);
    }

    /// The structural type.
    #[inline(always)]
    pub fn ntype(&self) -> NetworkType {
        self.ntype
    }

    /// The functional mode.
    #[inline(always)]
    pub fn func_mode(&self) -> FuncMode {
        self.mode
    }

    /// Returns `true` for netlists.
    #[inline(always)]
    pub fn is_netlist(&self) -> bool {
        self.ntype == NetworkType::Netlist
    }

    /// Returns `true` for logic networks.
    #[inline(always)]
    pub fn is_logic(&self) -> bool {
        self.ntype == NetworkType::Logic
    }

    /// Returns `true` for structurally hashed networks.
    #[inline(always)]
    pub fn is_strash(&self) -> bool {
        self.ntype == NetworkType::Strash
    }

    /// The name of the network.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the name of the network.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// The functionality manager.
    pub fn func(&self) -> &FuncManager {
        &self.func
    }

    /// The functionality manager, mutably.
    pub fn func_mut(&mut self) -> &mut FuncManager {
        &mut self.func
    }

    pub(crate) fn start_func_from(&mut self, other: &Network) {
        if self.mode == other.mode {
            self.func = other.func.start_new();
        }
    }

    /// The object names.
    pub fn names(&self) -> &NameManager {
        &self.names
    }

    /// Creates a new object of the given kind.
    ///
    /// The object gets the next unused id and is added to the role lists of its kind. Latches
    /// get fresh latch data with an unspecified initial value.
    pub fn create(&mut self, kind: ObjKind) -> ObjectId {
        let id = self.objs.next_unused_key();
        match kind {
            ObjKind::Const1 => {
                assert!(self.const1.is_none(), "network already has a constant node");
                self.const1 = Some(id);
            }
            ObjKind::PrimaryIn => {
                self.pis.push(id);
                self.cis.push(id);
            }
            ObjKind::PrimaryOut => {
                self.pos.push(id);
                self.cos.push(id);
            }
            ObjKind::BoxIn => self.cos.push(id),
            ObjKind::BoxOut => self.cis.push(id),
            ObjKind::Assert => {
                self.asserts.push(id);
                self.cos.push(id);
            }
            ObjKind::Latch | ObjKind::Whitebox | ObjKind::Blackbox => self.boxes.push(id),
            ObjKind::Net | ObjKind::Node => (),
        }
        self.objs.push(Some(Object::new(id, kind)));
        self.obj_count += 1;
        self.kind_counts[kind.index()] += 1;
        log::trace!("created {kind} {id}");
        id
    }

    /// Deletes an object that has no remaining edges.
    ///
    /// The object is removed from its role lists and counts, its name is removed and its payload
    /// is released. A member of an equivalence class is unlinked, so its predecessor continues
    /// with its successor. The id is not reused.
    ///
    /// # Panics
    ///
    /// Panics if the object still has fanins or fanouts.
    pub fn delete(&mut self, id: ObjectId) {
        let obj = self.obj(id);
        let kind = obj.kind;
        assert!(
            obj.fanins.is_empty() && obj.fanouts.is_empty(),
            "cannot delete {kind} {id} with {} fanins and {} fanouts",
            obj.fanins.len(),
            obj.fanouts.len()
        );
        let payload = obj.payload;
        let (equiv_prev, equiv_next) = (obj.equiv_prev, obj.equiv_next());

        fn remove_from(list: &mut Vec<ObjectId>, id: ObjectId) {
            if let Some(pos) = list.iter().position(|&entry| entry == id) {
                list.remove(pos);
            }
        }

        match kind {
            ObjKind::Const1 => self.const1 = None,
            ObjKind::PrimaryIn => {
                remove_from(&mut self.pis, id);
                remove_from(&mut self.cis, id);
                remove_from(&mut self.pios, id);
            }
            ObjKind::PrimaryOut => {
                remove_from(&mut self.pos, id);
                remove_from(&mut self.cos, id);
                remove_from(&mut self.pios, id);
            }
            ObjKind::BoxIn => remove_from(&mut self.cos, id),
            ObjKind::BoxOut => remove_from(&mut self.cis, id),
            ObjKind::Assert => {
                remove_from(&mut self.asserts, id);
                remove_from(&mut self.cos, id);
            }
            ObjKind::Latch | ObjKind::Whitebox | ObjKind::Blackbox => {
                remove_from(&mut self.boxes, id)
            }
            ObjKind::Net | ObjKind::Node => (),
        }

        if let Some(prev) = equiv_prev {
            self.obj_mut(prev).payload = equiv_next.map_or(Payload::None, Payload::Equiv);
        }
        if let Some(next) = equiv_next {
            self.obj_mut(next).equiv_prev = equiv_prev;
        }
        if equiv_prev.is_some() || equiv_next.is_some() {
            log::trace!("unlinked {id} from its equivalence class");
        }

        if let (Payload::Bdd(func), Some(manager)) = (payload, self.func.bdd_mut()) {
            manager.release(func);
        }

        self.names.remove(id);
        self.obj_count -= 1;
        self.kind_counts[kind.index()] -= 1;
        self.objs[id] = None;
        log::trace!("deleted {kind} {id}");
    }

    /// Returns `true` if `id` refers to a live object.
    #[inline]
    pub fn is_live(&self, id: ObjectId) -> bool {
        matches!(self.objs.get(id), Some(Some(_)))
    }

    /// Returns the object with the given id, or `None` if it was deleted or never existed.
    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objs.get(id).and_then(Option::as_ref)
    }

    /// Returns the object with the given id.
    ///
    /// # Panics
    ///
    /// Panics if there is no live object with this id.
    #[inline]
    #[track_caller]
    pub fn obj(&self, id: ObjectId) -> &Object {
        match self.get(id) {
            Some(obj) => obj,
            None => panic!("{id} is not a live object"),
        }
    }

    #[inline]
    #[track_caller]
    pub(crate) fn obj_mut(&mut self, id: ObjectId) -> &mut Object {
        match self.objs.get_mut(id).and_then(Option::as_mut) {
            Some(obj) => obj,
            None => panic!("{id} is not a live object"),
        }
    }

    /// The kind of an object.
    #[inline]
    #[track_caller]
    pub fn kind(&self, id: ObjectId) -> ObjKind {
        self.obj(id).kind
    }

    /// The fanins of an object.
    #[inline]
    #[track_caller]
    pub fn fanins(&self, id: ObjectId) -> &[ObjectId] {
        &self.obj(id).fanins
    }

    /// The fanouts of an object.
    #[inline]
    #[track_caller]
    pub fn fanouts(&self, id: ObjectId) -> &[ObjectId] {
        &self.obj(id).fanouts
    }

    /// Fanin `slot` of an object.
    #[inline]
    #[track_caller]
    pub fn fanin(&self, id: ObjectId, slot: usize) -> ObjectId {
        self.obj(id).fanins[slot]
    }

    /// The first fanin of an object.
    #[inline]
    #[track_caller]
    pub fn fanin0(&self, id: ObjectId) -> ObjectId {
        self.fanin(id, 0)
    }

    /// Fanout `index` of an object.
    #[inline]
    #[track_caller]
    pub fn fanout(&self, id: ObjectId, index: usize) -> ObjectId {
        self.obj(id).fanouts[index]
    }

    /// The first fanout of an object.
    #[inline]
    #[track_caller]
    pub fn fanout0(&self, id: ObjectId) -> ObjectId {
        self.fanout(id, 0)
    }

    /// Fanin 0 including its complement bit.
    #[inline]
    #[track_caller]
    pub fn child0(&self, id: ObjectId) -> NodeRef {
        self.obj(id).child0()
    }

    /// Fanin 1 including its complement bit.
    #[inline]
    #[track_caller]
    pub fn child1(&self, id: ObjectId) -> NodeRef {
        self.obj(id).child1()
    }

    /// Resolves the object driving a fanin, skipping the net in netlists.
    ///
    /// For other network types this is the identity.
    #[inline]
    #[track_caller]
    pub fn fanin0_ntk(&self, fanin: ObjectId) -> ObjectId {
        let obj = self.obj(fanin);
        if obj.kind == ObjKind::Net {
            match obj.fanins.first() {
                Some(&driver) => driver,
                None => panic!("net {fanin} has no driver"),
            }
        } else {
            fanin
        }
    }

    /// Resolves the net driven by an object in a netlist.
    ///
    /// For other network types, or objects not driving a net, this is the identity.
    #[inline]
    #[track_caller]
    pub fn fanout0_ntk(&self, id: ObjectId) -> ObjectId {
        if !self.is_netlist() {
            return id;
        }
        match self.obj(id).fanouts.first() {
            Some(&net) if self.kind(net) == ObjKind::Net => net,
            _ => id,
        }
    }

    /// The number of live objects.
    #[inline(always)]
    pub fn obj_count(&self) -> usize {
        self.obj_count
    }

    /// The size of the object table including holes, one past the largest id used so far.
    #[inline(always)]
    pub fn obj_count_max(&self) -> usize {
        self.objs.len()
    }

    /// The number of live objects of a kind.
    #[inline(always)]
    pub fn kind_count(&self, kind: ObjKind) -> usize {
        self.kind_counts[kind.index()]
    }

    /// The number of internal nodes.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.kind_count(ObjKind::Node)
    }

    /// The number of latches.
    #[inline(always)]
    pub fn latch_count(&self) -> usize {
        self.kind_count(ObjKind::Latch)
    }

    /// The number of primary inputs.
    #[inline(always)]
    pub fn pi_count(&self) -> usize {
        self.pis.len()
    }

    /// The number of primary outputs.
    #[inline(always)]
    pub fn po_count(&self) -> usize {
        self.pos.len()
    }

    /// The number of combinational inputs.
    #[inline(always)]
    pub fn ci_count(&self) -> usize {
        self.cis.len()
    }

    /// The number of combinational outputs.
    #[inline(always)]
    pub fn co_count(&self) -> usize {
        self.cos.len()
    }

    /// The primary inputs in creation order.
    #[inline(always)]
    pub fn pis(&self) -> &[ObjectId] {
        &self.pis
    }

    /// The primary outputs in creation order.
    #[inline(always)]
    pub fn pos(&self) -> &[ObjectId] {
        &self.pos
    }

    /// The combinational inputs in creation order.
    #[inline(always)]
    pub fn cis(&self) -> &[ObjectId] {
        &self.cis
    }

    /// The combinational outputs in creation order.
    #[inline(always)]
    pub fn cos(&self) -> &[ObjectId] {
        &self.cos
    }

    /// Primary inputs and outputs registered as bidirectional ports.
    #[inline(always)]
    pub fn pios(&self) -> &[ObjectId] {
        &self.pios
    }

    /// The assertion outputs in creation order.
    #[inline(always)]
    pub fn asserts(&self) -> &[ObjectId] {
        &self.asserts
    }

    /// The boxes, including latches, in creation order.
    #[inline(always)]
    pub fn boxes(&self) -> &[ObjectId] {
        &self.boxes
    }

    /// Registers a primary input or output as part of a bidirectional port.
    pub fn register_pio(&mut self, id: ObjectId) {
        let kind = self.kind(id);
        assert!(
            matches!(kind, ObjKind::PrimaryIn | ObjKind::PrimaryOut),
            "{kind} {id} cannot be part of a bidirectional port"
        );
        if !self.pios.contains(&id) {
            self.pios.push(id);
        }
    }

    /// The constant node, present in structurally hashed networks.
    #[inline(always)]
    pub fn const1(&self) -> Option<ObjectId> {
        self.const1
    }

    /// Iterates over all live objects in id order.
    pub fn objs(&self) -> impl Iterator<Item = &Object> + '_ {
        self.objs.values().iter().flatten()
    }

    /// Iterates over the ids of all live objects in id order.
    pub fn obj_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objs().map(|obj| obj.id)
    }

    /// Iterates over the ids of all live objects of a kind in id order.
    pub fn ids_of_kind(&self, kind: ObjKind) -> impl Iterator<Item = ObjectId> + '_ {
        self.objs()
            .filter(move |obj| obj.kind == kind)
            .map(|obj| obj.id)
    }

    /// Iterates over all internal nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.ids_of_kind(ObjKind::Node)
    }

    /// Iterates over all latches in creation order.
    pub fn latches(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.boxes
            .iter()
            .copied()
            .filter(move |&id| self.kind(id) == ObjKind::Latch)
    }

    /// The level of an object as assigned by the last level computation.
    #[inline]
    pub fn level(&self, id: ObjectId) -> u32 {
        self.obj(id).level
    }

    /// Overrides the level of an object.
    #[inline]
    pub fn set_level(&mut self, id: ObjectId, level: u32) {
        self.obj_mut(id).level = level;
    }

    /// Mutable access to the freely usable flags of an object.
    #[inline]
    pub fn flags_mut(&mut self, id: ObjectId) -> &mut ObjFlags {
        &mut self.obj_mut(id).flags
    }

    /// The payload of an object.
    #[inline]
    pub fn payload(&self, id: ObjectId) -> Payload {
        self.obj(id).payload
    }

    /// Sets the payload of an object.
    ///
    /// # Panics
    ///
    /// Panics if the payload variant is not admitted for this object in this network, see
    /// [`FuncMode::admits`].
    #[track_caller]
    pub fn set_payload(&mut self, id: ObjectId, payload: Payload) {
        let kind = self.kind(id);
        assert!(
            self.mode.admits(self.ntype, kind, &payload),
            "{} payload is not allowed on {kind} {id} of a {:?} {:?} network",
            payload.variant_name(),
            self.ntype,
            self.mode
        );
        if let Payload::Equiv(next) = payload {
            assert_eq!(
                self.kind(next),
                ObjKind::Node,
                "equivalence of {id} must be a node"
            );
            assert_ne!(next, id, "{id} cannot be its own equivalence");
            if let Some(prev) = self.obj(next).equiv_prev {
                assert_eq!(prev, id, "{next} already follows {prev} in an equivalence class");
            }
        }
        let old = std::mem::replace(&mut self.obj_mut(id).payload, payload);
        if let Payload::Equiv(old_next) = old {
            self.obj_mut(old_next).equiv_prev = None;
        }
        if let Payload::Equiv(next) = payload {
            self.obj_mut(next).equiv_prev = Some(id);
        }
    }

    /// Registers a cover and assigns it to a node.
    pub fn set_cover(&mut self, id: ObjectId, cover: &str) -> CoverId {
        let Some(pool) = self.func.covers_mut() else {
            panic!("{:?} networks have no cover pool", self.mode)
        };
        let cover = pool.register(cover);
        self.set_payload(id, Payload::Cover(cover));
        cover
    }

    /// Returns the text of the cover of a node.
    pub fn cover(&self, id: ObjectId) -> Option<&str> {
        match (self.payload(id), self.func.covers()) {
            (Payload::Cover(cover), Some(pool)) => Some(pool.cover(cover)),
            _ => None,
        }
    }

    /// Latch data of a latch.
    #[track_caller]
    pub fn latch_info(&self, latch: ObjectId) -> &LatchInfo {
        match &self.obj(latch).latch {
            Some(info) => info,
            None => panic!("{} {latch} is not a latch", self.kind(latch)),
        }
    }

    /// Mutable latch data of a latch.
    #[track_caller]
    pub fn latch_info_mut(&mut self, latch: ObjectId) -> &mut LatchInfo {
        let kind = self.kind(latch);
        match &mut self.obj_mut(latch).latch {
            Some(info) => info,
            None => panic!("{kind} {latch} is not a latch"),
        }
    }

    /// The initial value of a latch.
    pub fn latch_init(&self, latch: ObjectId) -> LatchInit {
        self.latch_info(latch).init
    }

    /// Sets the initial value of a latch.
    pub fn set_latch_init(&mut self, latch: ObjectId, init: LatchInit) {
        self.latch_info_mut(latch).init = init;
    }

    /// The box input terminal of a latch.
    ///
    /// # Panics
    ///
    /// Panics if `latch` is not a latch or has no input terminal. Latches made by
    /// [`create_latch`][Self::create_latch] always have one, a latch made by
    /// [`create`][Self::create] gets it only once a box input is added as its fanin.
    #[track_caller]
    pub fn latch_input(&self, latch: ObjectId) -> ObjectId {
        assert_eq!(self.kind(latch), ObjKind::Latch, "{latch} is not a latch");
        match self.fanins(latch).first() {
            Some(&bi) => bi,
            None => panic!("latch {latch} has no input terminal"),
        }
    }

    /// The box output terminal of a latch.
    ///
    /// # Panics
    ///
    /// Panics if `latch` is not a latch or has no output terminal, see
    /// [`latch_input`][Self::latch_input].
    #[track_caller]
    pub fn latch_output(&self, latch: ObjectId) -> ObjectId {
        assert_eq!(self.kind(latch), ObjKind::Latch, "{latch} is not a latch");
        match self.fanouts(latch).first() {
            Some(&bo) => bo,
            None => panic!("latch {latch} has no output terminal"),
        }
    }

    /// Assigns a name to an object, see [`NameManager::assign`].
    pub fn assign_name(
        &mut self,
        id: ObjectId,
        name: &str,
        suffix: Option<&str>,
    ) -> Result<&str, NameTakenError> {
        let kind = self.kind(id);
        self.names.assign(id, kind, name, suffix)
    }

    /// Returns the name of an object or a placeholder derived from its id.
    pub fn obj_name(&self, id: ObjectId) -> Cow<'_, str> {
        match self.names.lookup_name(id) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(id.to_string()),
        }
    }

    /// Finds an object of the given kind by name.
    pub fn find_by_name(&self, name: &str, kind: ObjKind) -> Option<ObjectId> {
        self.names.lookup_id(name, kind)
    }

    /// Finds a combinational input by name, preferring primary inputs.
    pub fn find_ci(&self, name: &str) -> Option<ObjectId> {
        self.find_by_name(name, ObjKind::PrimaryIn)
            .or_else(|| self.find_by_name(name, ObjKind::BoxOut))
    }

    /// Finds a combinational output by name, preferring primary outputs.
    pub fn find_co(&self, name: &str) -> Option<ObjectId> {
        self.find_by_name(name, ObjKind::PrimaryOut)
            .or_else(|| self.find_by_name(name, ObjKind::BoxIn))
            .or_else(|| self.find_by_name(name, ObjKind::Assert))
    }

    /// Finds an internal node by name.
    pub fn find_node(&self, name: &str) -> Option<ObjectId> {
        self.find_by_name(name, ObjKind::Node)
    }

    /// Finds a net by name.
    pub fn find_net(&self, name: &str) -> Option<ObjectId> {
        self.find_by_name(name, ObjKind::Net)
    }
}

/// Typed construction helpers.
impl Network {
    /// Creates a primary input.
    pub fn create_pi(&mut self) -> ObjectId {
        self.create(ObjKind::PrimaryIn)
    }

    /// Creates a primary output driven by `driver`.
    pub fn create_po(&mut self, driver: NodeRef) -> ObjectId {
        let po = self.create(ObjKind::PrimaryOut);
        self.add_fanin(po, driver);
        po
    }

    /// Creates an assertion output driven by `driver`.
    pub fn create_assert(&mut self, driver: NodeRef) -> ObjectId {
        let id = self.create(ObjKind::Assert);
        self.add_fanin(id, driver);
        id
    }

    /// Creates a net driven by `driver`.
    pub fn create_net(&mut self, driver: ObjectId) -> ObjectId {
        assert!(self.is_netlist(), "nets only exist in netlists");
        let net = self.create(ObjKind::Net);
        self.add_fanin(net, driver.into());
        net
    }

    /// Creates an internal node with the given fanins.
    pub fn create_node(&mut self, fanins: &[NodeRef]) -> ObjectId {
        let node = self.create(ObjKind::Node);
        for &fanin in fanins {
            self.add_fanin(node, fanin);
        }
        node
    }

    /// Creates a 2-input AND node of a structurally hashed network.
    ///
    /// No structural hashing is performed here, the caller is responsible for looking up an
    /// existing node first.
    pub fn create_and(&mut self, a: NodeRef, b: NodeRef) -> ObjectId {
        assert!(self.is_strash(), "AND nodes belong to structurally hashed networks");
        self.create_node(&[a, b])
    }

    /// Creates a box with the given number of input and output terminals.
    pub fn create_box(&mut self, kind: ObjKind, inputs: usize, outputs: usize) -> ObjectId {
        assert!(kind.is_box(), "{kind} is not a box kind");
        let bx = self.create(kind);
        for _ in 0..inputs {
            let bi = self.create(ObjKind::BoxIn);
            self.add_fanin(bx, bi.into());
        }
        for _ in 0..outputs {
            let bo = self.create(ObjKind::BoxOut);
            self.add_fanin(bo, bx.into());
        }
        bx
    }

    /// Creates a latch with its input and output terminals.
    ///
    /// The input terminal still needs a driver.
    pub fn create_latch(&mut self) -> ObjectId {
        self.create_box(ObjKind::Latch, 1, 1)
    }

    /// Returns `true` for representatives of an equivalence class with fanouts.
    #[inline]
    pub fn is_choice(&self, id: ObjectId) -> bool {
        let obj = self.obj(id);
        self.is_strash() && obj.equiv_next().is_some() && !obj.fanouts.is_empty()
    }

    /// Iterates over the members of an equivalence class following `id`.
    pub fn equiv_members(&self, id: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        std::iter::successors(self.obj(id).equiv_next(), move |&member| {
            self.obj(member).equiv_next()
        })
    }

    /// Adds `member` to the end of the equivalence class represented by `repr`.
    ///
    /// Members of an equivalence class must not have fanouts, they are reachable only through
    /// the class chain.
    ///
    /// # Panics
    ///
    /// Panics if `member` already belongs to an equivalence class, or if `repr` is a member
    /// instead of a representative.
    pub fn make_choice(&mut self, repr: ObjectId, member: ObjectId) {
        assert!(self.is_strash(), "choices belong to structurally hashed networks");
        assert_ne!(repr, member, "a node cannot be its own choice");
        assert_eq!(self.kind(repr), ObjKind::Node);
        assert_eq!(self.kind(member), ObjKind::Node);
        assert!(
            self.fanouts(member).is_empty(),
            "choice member {member} has fanouts"
        );
        assert_eq!(
            self.payload(member),
            Payload::None,
            "{member} is already part of an equivalence class"
        );
        assert!(
            self.obj(member).equiv_prev.is_none(),
            "{member} is already part of an equivalence class"
        );
        assert!(
            self.obj(repr).equiv_prev.is_none(),
            "{repr} is a member of another equivalence class"
        );
        let last = self.equiv_members(repr).last().unwrap_or(repr);
        self.set_payload(last, Payload::Equiv(member));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_lists_and_counts() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let a = ntk.create_node(&[x.into()]);
        let po = ntk.create_po(a.into());
        let latch = ntk.create_latch();
        let bi = ntk.latch_input(latch);
        let bo = ntk.latch_output(latch);

        assert_eq!(ntk.pis(), &[x]);
        assert_eq!(ntk.cis(), &[x, bo]);
        assert_eq!(ntk.cos(), &[po, bi]);
        assert_eq!(ntk.boxes(), &[latch]);
        assert_eq!((ntk.ci_count(), ntk.co_count()), (2, 2));
        assert_eq!(ntk.obj_count(), 6);
        assert_eq!(ntk.kind_count(ObjKind::BoxIn), 1);
        assert_eq!(ntk.latch_info(latch).init, LatchInit::None);

        ntk.delete_po(po);
        assert!(ntk.pos().is_empty());
        assert_eq!(ntk.cos(), &[bi]);
        assert_eq!(ntk.obj_count(), 5);
        assert_eq!(ntk.obj_count_max(), 6);
        assert!(ntk.get(po).is_none());

        let y = ntk.create_pi();
        assert_eq!(y.index(), 6);
    }

    #[test]
    fn strash_networks_start_with_constant() {
        let ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let const1 = ntk.const1().unwrap();
        assert_eq!(ntk.kind(const1), ObjKind::Const1);
        assert_eq!(ntk.obj_count(), 1);
        assert!(ntk.cis().is_empty());
    }

    #[test]
    fn names_are_found_by_role() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let po = ntk.create_po(x.into());
        ntk.assign_name(x, "a", None).unwrap();
        ntk.assign_name(po, "a", None).unwrap();
        assert_eq!(ntk.find_ci("a"), Some(x));
        assert_eq!(ntk.find_co("a"), Some(po));
        assert_eq!(ntk.obj_name(po), "a");

        let node = ntk.create_node(&[x.into()]);
        assert_eq!(ntk.obj_name(node), node.to_string());
    }

    #[test]
    #[should_panic(expected = "has no input terminal")]
    fn bare_latch_has_no_input() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let latch = ntk.create(ObjKind::Latch);
        ntk.latch_input(latch);
    }

    #[test]
    #[should_panic(expected = "has no output terminal")]
    fn bare_latch_has_no_output() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let latch = ntk.create(ObjKind::Latch);
        ntk.latch_output(latch);
    }

    fn choice_candidates() -> (Network, [ObjectId; 3]) {
        let mut ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let x = ntk.create_pi();
        let y = ntk.create_pi();
        let a = ntk.create_and(NodeRef::pos(x), NodeRef::pos(y));
        let b = ntk.create_and(NodeRef::neg(x), NodeRef::pos(y));
        let c = ntk.create_and(NodeRef::pos(x), NodeRef::neg(y));
        (ntk, [a, b, c])
    }

    #[test]
    fn choice_links_are_mirrored() {
        let (mut ntk, [a, b, c]) = choice_candidates();
        ntk.make_choice(a, b);
        ntk.make_choice(a, c);
        assert_eq!(ntk.equiv_members(a).collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(ntk.obj(b).equiv_prev(), Some(a));
        assert_eq!(ntk.obj(c).equiv_prev(), Some(b));
        assert_eq!(ntk.obj(a).equiv_prev(), None);

        ntk.set_payload(b, Payload::None);
        assert_eq!(ntk.obj(c).equiv_prev(), None);
        assert_eq!(ntk.equiv_members(a).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    #[should_panic(expected = "already part of an equivalence class")]
    fn tail_member_joins_no_second_class() {
        let (mut ntk, [a, b, c]) = choice_candidates();
        ntk.make_choice(a, b);
        ntk.make_choice(c, b);
    }

    #[test]
    #[should_panic(expected = "is a member of another equivalence class")]
    fn member_is_no_representative() {
        let (mut ntk, [a, b, c]) = choice_candidates();
        ntk.make_choice(a, b);
        ntk.make_choice(b, c);
    }

    #[test]
    #[should_panic(expected = "cover payload is not allowed")]
    fn payload_must_match_mode() {
        let mut ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let x = ntk.create_pi();
        let mut pool = CoverPool::default();
        let cover = pool.register("1 1\n");
        ntk.set_payload(x, Payload::Cover(cover));
    }
}
