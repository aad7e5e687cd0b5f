//! Duplication and deletion of objects.
use ntk_lit::{NodeRef, ObjectId};

use crate::{
    object::{ObjKind, Payload},
    Network,
};

impl Network {
    /// Copies the object `obj` of `source` into this network.
    ///
    /// The copy has the same kind but no edges. When `copy_name` is set, names are copied for
    /// boxes, nets and, unless this network is a netlist, for combinational inputs and outputs.
    /// The payload is carried over if both networks use the same functional mode: covers are
    /// registered in this network's pool, BDDs are transferred between the managers and gates and
    /// box models are kept. AIG functions and equivalence links are left for the caller to
    /// rebuild. Latch data is always copied.
    ///
    /// The copy reference of `obj` in `source` is set to the new object.
    pub fn dup_obj(&mut self, source: &mut Network, obj: ObjectId, copy_name: bool) -> ObjectId {
        let src = source.obj(obj);
        let kind = src.kind;
        let payload = src.payload;
        let latch = src.latch;

        let new = match (kind, self.const1()) {
            (ObjKind::Const1, Some(const1)) => const1,
            _ => self.create(kind),
        };

        if copy_name {
            if let Some(name) = source.copied_name(obj, self.is_netlist()) {
                let name = name.to_owned();
                if let Err(err) = self.assign_name(new, &name, None) {
                    log::warn!("not copying name of {kind} {obj}: {err}");
                }
            }
        }

        let payload = if source.func_mode() == self.func_mode() {
            self.transfer_payload(source, payload)
        } else {
            match payload {
                Payload::Model(model) => Payload::Model(model),
                _ => Payload::None,
            }
        };
        if payload != Payload::None {
            self.set_payload(new, payload);
        }
        if latch.is_some() {
            self.obj_mut(new).latch = latch;
        }

        source.obj_mut(obj).copy_ref = Some(new);
        new
    }

    fn copied_name(&self, obj: ObjectId, target_is_netlist: bool) -> Option<&str> {
        let kind = self.kind(obj);
        let named = if kind.is_ci() {
            if target_is_netlist {
                return None;
            }
            self.fanout0_ntk(obj)
        } else if kind.is_co() {
            if target_is_netlist {
                return None;
            }
            match self.fanins(obj).first() {
                Some(&net) if kind == ObjKind::PrimaryOut && self.is_netlist() => net,
                _ => obj,
            }
        } else if kind.is_box() || kind == ObjKind::Net {
            obj
        } else {
            return None;
        };
        self.names().lookup_name(named)
    }

    fn transfer_payload(&mut self, source: &Network, payload: Payload) -> Payload {
        match payload {
            Payload::Cover(cover) => {
                match (source.func().covers(), self.func_mut().covers_mut()) {
                    (Some(from), Some(to)) => Payload::Cover(to.register(from.cover(cover))),
                    _ => Payload::None,
                }
            }
            Payload::Bdd(func) => match (source.func().bdd(), self.func_mut().bdd_mut()) {
                (Some(from), Some(to)) => Payload::Bdd(to.transfer(from, func)),
                (None, None) => Payload::Bdd(func),
                _ => panic!("cannot copy BDD {func:?} between networks with and without manager"),
            },
            Payload::Gate(gate) => Payload::Gate(gate),
            Payload::Model(model) => Payload::Model(model),
            Payload::None | Payload::Aig(_) | Payload::Equiv(_) => Payload::None,
        }
    }

    /// Copies a box of `source` together with its terminals into this network.
    pub fn dup_box(&mut self, source: &mut Network, bx: ObjectId, copy_name: bool) -> ObjectId {
        assert!(source.kind(bx).is_box(), "{} {bx} is not a box", source.kind(bx));
        let new_box = self.dup_obj(source, bx, copy_name);
        for bi in source.fanins(bx).to_vec() {
            let new_bi = self.dup_obj(source, bi, false);
            self.add_fanin(new_box, new_bi.into());
        }
        for bo in source.fanouts(bx).to_vec() {
            let new_bo = self.dup_obj(source, bo, false);
            self.add_fanin(new_bo, new_box.into());
        }
        new_box
    }

    /// Creates an object of the same kind with the same fanins, including complement bits.
    pub fn clone_obj(&mut self, obj: ObjectId) -> ObjectId {
        let src = self.obj(obj);
        let kind = src.kind;
        let children: Vec<NodeRef> = (0..src.fanins.len()).map(|slot| src.child(slot)).collect();
        let clone = self.create(kind);
        for child in children {
            self.add_fanin(clone, child);
        }
        clone
    }

    /// Creates a copy of this network.
    ///
    /// Objects are copied in id order, edges keep their slots and complement bits and
    /// equivalence classes are linked between the copies.
    pub fn duplicate(&mut self) -> Network {
        let (ntype, mode) = (self.ntype(), self.func_mode());
        let mut pass = self.copy_pass();
        let mut new = pass.start_network(ntype, mode);

        let ids: Vec<ObjectId> = pass.obj_ids().collect();
        for &id in &ids {
            if pass.obj(id).copy_ref().is_none() {
                let is_net = pass.kind(id) == ObjKind::Net;
                new.dup_obj(&mut pass, id, is_net);
            }
        }

        for &id in &ids {
            let obj = pass.obj(id);
            if obj.kind().is_box() || obj.kind() == ObjKind::BoxOut {
                continue;
            }
            let copy = pass.copy_of(id);
            for slot in 0..obj.fanins().len() {
                let child = obj.child(slot);
                let fanin = pass.copy_of(child.id());
                new.add_fanin(copy, NodeRef::new(fanin, child.pol()));
            }
        }

        for &id in &ids {
            if let Some(next) = pass.obj(id).equiv_next() {
                new.set_payload(pass.copy_of(id), Payload::Equiv(pass.copy_of(next)));
            }
        }

        log::debug!(
            "duplicated network with {} objects into {} objects",
            pass.obj_count(),
            new.obj_count()
        );
        new
    }

    /// Deletes an object after removing its fanins.
    ///
    /// # Panics
    ///
    /// Panics if the object has fanouts.
    #[track_caller]
    pub fn delete_obj(&mut self, id: ObjectId) {
        let obj = self.obj(id);
        assert!(
            obj.fanouts.is_empty(),
            "cannot delete {} {id} with {} fanouts",
            obj.kind,
            obj.fanouts.len()
        );
        self.remove_fanins(id);
        self.delete(id);
    }

    /// Deletes a primary output.
    pub fn delete_po(&mut self, po: ObjectId) {
        assert_eq!(self.kind(po), ObjKind::PrimaryOut, "{po} is not a primary output");
        self.delete_obj(po);
    }

    /// Deletes a box together with its input and output terminals.
    ///
    /// # Panics
    ///
    /// Panics if any output terminal of the box is still used.
    pub fn delete_box(&mut self, bx: ObjectId) {
        assert!(self.kind(bx).is_box(), "{} {bx} is not a box", self.kind(bx));
        for bo in self.fanouts(bx).to_vec() {
            self.delete_obj(bo);
        }
        let inputs = self.fanins(bx).to_vec();
        self.delete_obj(bx);
        for bi in inputs {
            self.delete_obj(bi);
        }
    }

    /// Deletes an object and every object of its fanin cone that loses its last fanout.
    ///
    /// Primary inputs and the constant are never deleted. With `nodes_only`, only internal nodes
    /// are deleted along with `obj`.
    ///
    /// # Panics
    ///
    /// Panics if `obj` is a primary input or has fanouts.
    pub fn delete_cascading(&mut self, obj: ObjectId, nodes_only: bool) {
        assert_ne!(
            self.kind(obj),
            ObjKind::PrimaryIn,
            "primary input {obj} cannot be deleted"
        );
        let deleted = self.delete_cone(obj, |kind| !nodes_only || kind == ObjKind::Node);
        log::debug!("deleted {deleted} objects from the cone of {obj}");
    }

    /// Deletes an object and every non-node object of its fanin cone that loses its last fanout.
    ///
    /// This removes the dangling nets of a netlist after deleting a node or an output.
    pub fn delete_all_cascading(&mut self, obj: ObjectId) {
        let deleted = self.delete_cone(obj, |kind| kind != ObjKind::Node);
        log::debug!("deleted {deleted} objects with {obj}");
    }

    fn delete_cone(&mut self, root: ObjectId, cascades: impl Fn(ObjKind) -> bool) -> usize {
        assert!(
            self.fanouts(root).is_empty(),
            "cannot delete {} {root} with fanouts",
            self.kind(root)
        );
        let mut stack = vec![root];
        let mut fanins = vec![];
        let mut deleted = 0;

        while let Some(id) = stack.pop() {
            if !self.is_live(id) || !self.fanouts(id).is_empty() {
                continue;
            }
            fanins.clear();
            fanins.extend_from_slice(self.fanins(id));
            self.delete_obj(id);
            deleted += 1;

            for &fanin in fanins.iter().rev() {
                let Some(obj) = self.get(fanin) else {
                    continue;
                };
                let protected = matches!(obj.kind, ObjKind::PrimaryIn | ObjKind::Const1);
                if obj.fanouts.is_empty() && !protected && cascades(obj.kind) {
                    stack.push(fanin);
                }
            }
        }
        deleted
    }
}

#[cfg(test)]
mod tests {
    use crate::{FuncMode, LatchInit, NetworkType};

    use super::*;

    #[test]
    fn deleting_choice_member_unlinks_class() {
        let mut ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let x = ntk.create_pi();
        let y = ntk.create_pi();
        let z = ntk.create_pi();
        let repr = ntk.create_and(NodeRef::pos(x), NodeRef::pos(y));
        let xz = ntk.create_and(NodeRef::pos(x), NodeRef::pos(z));
        let member = ntk.create_and(NodeRef::pos(xz), NodeRef::pos(y));
        ntk.make_choice(repr, member);
        ntk.create_po(NodeRef::pos(repr));
        assert!(ntk.is_choice(repr));

        ntk.delete_cascading(member, true);
        assert!(!ntk.is_live(member) && !ntk.is_live(xz));
        assert_eq!(ntk.payload(repr), Payload::None);
        assert!(!ntk.is_choice(repr));
        assert_eq!(ntk.check(), Ok(()));
        assert_eq!(ntk.dfs(false), vec![repr]);
    }

    #[test]
    fn deleting_middle_member_relinks_class() {
        let mut ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let x = ntk.create_pi();
        let y = ntk.create_pi();
        let repr = ntk.create_and(NodeRef::pos(x), NodeRef::pos(y));
        let first = ntk.create_and(NodeRef::neg(x), NodeRef::pos(y));
        let last = ntk.create_and(NodeRef::pos(x), NodeRef::neg(y));
        ntk.make_choice(repr, first);
        ntk.make_choice(repr, last);
        ntk.create_po(NodeRef::pos(repr));

        ntk.delete_obj(first);
        assert_eq!(ntk.equiv_members(repr).collect::<Vec<_>>(), vec![last]);
        assert_eq!(ntk.obj(last).equiv_prev(), Some(repr));
        assert_eq!(ntk.check(), Ok(()));
        assert_eq!(ntk.dfs(false), vec![last, repr]);
    }

    #[test]
    fn cascading_delete_of_chain() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let c = ntk.create_node(&[x.into()]);
        let b = ntk.create_node(&[c.into()]);
        let a = ntk.create_node(&[b.into()]);

        ntk.delete_cascading(a, true);
        assert!(!ntk.is_live(a));
        assert!(!ntk.is_live(b));
        assert!(!ntk.is_live(c));
        assert!(ntk.is_live(x));
        assert!(ntk.fanouts(x).is_empty());
        assert_eq!(ntk.node_count(), 0);
    }

    #[test]
    fn cascading_delete_stops_at_shared_node() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let c = ntk.create_node(&[x.into()]);
        let b = ntk.create_node(&[c.into()]);
        let a = ntk.create_node(&[b.into()]);
        let po = ntk.create_po(c.into());

        ntk.delete_cascading(a, true);
        assert!(!ntk.is_live(a));
        assert!(!ntk.is_live(b));
        assert!(ntk.is_live(c));
        assert_eq!(ntk.fanouts(c), &[po]);
        assert_eq!(ntk.node_count(), 1);
    }

    #[test]
    fn cascading_delete_with_repeated_fanin() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let b = ntk.create_node(&[x.into()]);
        let a = ntk.create_node(&[b.into(), b.into(), x.into()]);
        let po = ntk.create_po(a.into());

        ntk.delete_po(po);
        ntk.delete_cascading(a, true);
        assert_eq!(ntk.obj_count(), 1);
        assert_eq!(ntk.pos().len(), 0);
    }

    #[test]
    fn nodes_only_keeps_terminals() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let latch = ntk.create_latch();
        let bo = ntk.latch_output(latch);
        let a = ntk.create_node(&[bo.into()]);

        ntk.delete_cascading(a, true);
        assert!(ntk.is_live(bo));

        let b = ntk.create_node(&[bo.into()]);
        ntk.delete_cascading(b, false);
        assert!(!ntk.is_live(bo));
        assert!(!ntk.is_live(latch));
        assert_eq!(ntk.boxes().len(), 0);
        assert_eq!(ntk.cis().len(), 0);
        assert_eq!(ntk.cos().len(), 0);
        assert_eq!(ntk.obj_count(), 0);
    }

    #[test]
    fn netlist_delete_removes_nets() {
        let mut ntk = Network::new(NetworkType::Netlist, FuncMode::Sop);
        let x = ntk.create_pi();
        let nx = ntk.create_net(x);
        let node = ntk.create_node(&[nx.into()]);
        let nn = ntk.create_net(node);
        let po = ntk.create_po(nn.into());

        ntk.delete_all_cascading(po);
        assert!(!ntk.is_live(nn));
        assert!(ntk.is_live(node));

        ntk.delete_obj(node);
        ntk.delete_all_cascading(nx);
        assert!(!ntk.is_live(nx));
        assert!(ntk.is_live(x));
    }

    #[test]
    fn delete_box_with_terminals() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let bx = ntk.create_box(ObjKind::Whitebox, 2, 1);
        for bi in ntk.fanins(bx).to_vec() {
            ntk.add_fanin(bi, x.into());
        }
        assert_eq!(ntk.cos().len(), 2);
        assert_eq!(ntk.cis().len(), 2);

        ntk.delete_box(bx);
        assert_eq!(ntk.obj_count(), 1);
        assert_eq!(ntk.cos().len(), 0);
        assert_eq!(ntk.cis(), &[x]);
        assert!(ntk.fanouts(x).is_empty());
    }

    #[test]
    fn dup_obj_copies_cover_and_name() {
        let mut src = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = src.create_pi();
        src.assign_name(x, "x", None).unwrap();
        let node = src.create_node(&[x.into()]);
        src.set_cover(node, "0 1\n");

        let mut dst = Network::new(NetworkType::Logic, FuncMode::Sop);
        let new_x = dst.dup_obj(&mut src, x, true);
        let new_node = dst.dup_obj(&mut src, node, true);
        assert_eq!(src.copy_of(x), new_x);
        assert_eq!(src.copy_of(node), new_node);
        assert_eq!(dst.find_ci("x"), Some(new_x));
        assert_eq!(dst.cover(new_node), Some("0 1\n"));
        assert!(dst.fanins(new_node).is_empty());

        let mut aig = Network::new(NetworkType::Logic, FuncMode::Aig);
        let other = aig.dup_obj(&mut src, node, false);
        assert_eq!(aig.payload(other), Payload::None);
    }

    #[test]
    fn dup_latch_keeps_init() {
        let mut src = Network::new(NetworkType::Logic, FuncMode::Sop);
        let latch = src.create_latch();
        src.set_latch_init(latch, LatchInit::One);
        src.assign_name(latch, "q", None).unwrap();

        let mut dst = Network::new(NetworkType::Strash, FuncMode::Aig);
        let new_latch = dst.dup_box(&mut src, latch, true);
        assert_eq!(dst.latch_init(new_latch), LatchInit::One);
        assert_eq!(dst.obj_name(new_latch), "q");
        assert_eq!(dst.kind(dst.latch_input(new_latch)), ObjKind::BoxIn);
        assert_eq!(dst.kind(dst.latch_output(new_latch)), ObjKind::BoxOut);
    }

    #[test]
    fn clone_keeps_complements() {
        let mut ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let x = ntk.create_pi();
        let y = ntk.create_pi();
        let node = ntk.create_and(NodeRef::neg(x), NodeRef::pos(y));
        let clone = ntk.clone_obj(node);
        assert_eq!(ntk.child0(clone), NodeRef::neg(x));
        assert_eq!(ntk.child1(clone), NodeRef::pos(y));
        assert_eq!(ntk.fanouts(x), &[node, clone]);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let a = ntk.create_node(&[x.into()]);
        ntk.delete_obj(a);
        let b = ntk.create_node(&[x.into()]);
        assert_ne!(a, b);
        assert_eq!(ntk.obj_count_max(), 3);
        assert!(ntk.get(a).is_none());
    }
}
