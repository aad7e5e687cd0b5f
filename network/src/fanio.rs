//! Fanin and fanout edges.
//!
//! Every edge is stored twice, once in the fanin list of the driven object and once in the fanout
//! list of the driver. All methods here update both sides together. Edge lists are ordered and may
//! contain duplicates; the position of a fanin determines which complement bit applies to it.
use ntk_lit::{NodeRef, ObjectId};

use crate::{object::ObjKind, Network};

fn remove_first(list: &mut Vec<ObjectId>, id: ObjectId) -> Option<usize> {
    let pos = list.iter().position(|&entry| entry == id)?;
    list.remove(pos);
    Some(pos)
}

impl Network {
    /// Appends `fanin` to the fanins of `owner`.
    ///
    /// A complemented reference sets the complement bit of the new slot, which must be slot `0` or
    /// `1`.
    ///
    /// # Panics
    ///
    /// Panics when `owner` is a primary input or the constant, or when `fanin` is a primary output
    /// or an assertion.
    #[track_caller]
    pub fn add_fanin(&mut self, owner: ObjectId, fanin: NodeRef) {
        let fanin_id = fanin.id();
        let owner_kind = self.kind(owner);
        let fanin_kind = self.kind(fanin_id);
        assert!(
            !matches!(owner_kind, ObjKind::PrimaryIn | ObjKind::Const1),
            "{owner_kind} {owner} cannot have fanins"
        );
        assert!(
            !matches!(fanin_kind, ObjKind::PrimaryOut | ObjKind::Assert),
            "{fanin_kind} {fanin_id} cannot have fanouts"
        );

        let obj = self.obj_mut(owner);
        let slot = obj.fanins.len();
        obj.fanins.push(fanin_id);
        if fanin.is_complemented() {
            assert!(slot < 2, "fanin slot {slot} of {owner} cannot be complemented");
            obj.compl[slot] = true;
        } else if slot < 2 {
            obj.compl[slot] = false;
        }
        self.obj_mut(fanin_id).fanouts.push(owner);
        log::trace!("added fanin {fanin} to {owner}");
    }

    /// Removes the first occurrence of `fanin` from the fanins of `owner`.
    ///
    /// The remaining fanins keep their relative order and their complement bits.
    ///
    /// # Panics
    ///
    /// Panics if there is no such edge.
    #[track_caller]
    pub fn delete_fanin(&mut self, owner: ObjectId, fanin: ObjectId) {
        let obj = self.obj_mut(owner);
        let Some(slot) = remove_first(&mut obj.fanins, fanin) else {
            panic!("{fanin} is not a fanin of {owner}");
        };
        match slot {
            0 => obj.compl = [obj.compl[1], false],
            1 => obj.compl[1] = false,
            _ => (),
        }
        let found = remove_first(&mut self.obj_mut(fanin).fanouts, owner);
        assert!(found.is_some(), "fanout list of {fanin} is missing {owner}");
        log::trace!("deleted fanin {fanin} from {owner}");
    }

    /// Replaces the fanin `old` of `owner` by `new` in place.
    ///
    /// The slot keeps its complement bit, which is flipped if `new` is complemented.
    ///
    /// # Panics
    ///
    /// Panics if `old` is not a fanin of `owner` or if `new` refers to `old`.
    #[track_caller]
    pub fn patch_fanin(&mut self, owner: ObjectId, old: ObjectId, new: NodeRef) {
        let new_id = new.id();
        assert_ne!(old, new_id, "patching {owner} with its own fanin {old}");
        let new_kind = self.kind(new_id);
        assert!(
            !matches!(new_kind, ObjKind::PrimaryOut | ObjKind::Assert),
            "{new_kind} {new_id} cannot have fanouts"
        );

        let obj = self.obj_mut(owner);
        let Some(slot) = obj.fanins.iter().position(|&entry| entry == old) else {
            panic!("{old} is not a fanin of {owner}");
        };
        obj.fanins[slot] = new_id;
        if new.is_complemented() {
            assert!(slot < 2, "fanin slot {slot} of {owner} cannot be complemented");
            obj.compl[slot] ^= true;
        }

        let found = remove_first(&mut self.obj_mut(old).fanouts, owner);
        assert!(found.is_some(), "fanout list of {old} is missing {owner}");
        self.obj_mut(new_id).fanouts.push(owner);
        log::trace!("patched fanin {old} of {owner} to {new}");
    }

    /// Flips the complement bit of fanin `slot` of `owner`.
    pub fn xor_fanin_compl(&mut self, owner: ObjectId, slot: usize) {
        assert!(slot < 2, "fanin slot {slot} of {owner} cannot be complemented");
        let obj = self.obj_mut(owner);
        assert!(slot < obj.fanins.len(), "{owner} has no fanin slot {slot}");
        obj.compl[slot] ^= true;
    }

    /// Sets the complement bit of fanin `slot` of `owner`.
    pub fn set_fanin_compl(&mut self, owner: ObjectId, slot: usize, compl: bool) {
        assert!(slot < 2, "fanin slot {slot} of {owner} cannot be complemented");
        let obj = self.obj_mut(owner);
        assert!(slot < obj.fanins.len(), "{owner} has no fanin slot {slot}");
        obj.compl[slot] = compl;
    }

    /// Returns `true` when fanin `slot` of `owner` is complemented.
    #[inline]
    #[track_caller]
    pub fn fanin_compl(&self, owner: ObjectId, slot: usize) -> bool {
        self.obj(owner).fanin_compl(slot)
    }

    /// Removes all fanins of `owner`, last to first.
    pub fn remove_fanins(&mut self, owner: ObjectId) {
        while let Some(&fanin) = self.obj(owner).fanins.last() {
            self.delete_fanin_last(owner, fanin);
        }
    }

    fn delete_fanin_last(&mut self, owner: ObjectId, fanin: ObjectId) {
        let obj = self.obj_mut(owner);
        let slot = obj.fanins.len() - 1;
        obj.fanins.pop();
        if slot < 2 {
            obj.compl[slot] = false;
        }
        // The same fanin may occur more often, any matching fanout entry represents this edge.
        let found = remove_first(&mut self.obj_mut(fanin).fanouts, owner);
        assert!(found.is_some(), "fanout list of {fanin} is missing {owner}");
    }

    /// Moves every fanout edge of `from` over to `to`.
    ///
    /// Each fanout is patched individually, so a complemented `to` complements every moved edge.
    ///
    /// # Panics
    ///
    /// Panics when `from` and `to` refer to the same object, or either is a primary output.
    pub fn transfer_fanout(&mut self, from: ObjectId, to: NodeRef) {
        let to_id = to.id();
        assert_ne!(from, to_id, "transferring fanouts of {from} onto itself");
        assert_ne!(self.kind(from), ObjKind::PrimaryOut);
        assert_ne!(self.kind(to_id), ObjKind::PrimaryOut);

        let fanouts = self.obj(from).fanouts.clone();
        let moved = fanouts.len();
        for fanout in fanouts {
            self.patch_fanin(fanout, from, to);
        }
        debug_assert!(self.obj(from).fanouts.is_empty());
        log::debug!("transferred {moved} fanouts from {from} to {to}");
    }

    /// Replaces `old` by `new` in all fanouts and deletes `old` together with the part of its
    /// fanin cone that becomes unused.
    pub fn replace(&mut self, old: ObjectId, new: NodeRef) {
        self.transfer_fanout(old, new);
        self.delete_cascading(old, true);
    }

    /// Inserts a new object of kind `kind` on the edge from `node_in` to `node_out`.
    ///
    /// The new object takes the place of `node_in` among the fanins of `node_out` and has
    /// `node_in` as its only fanin.
    pub fn insert_between(
        &mut self,
        node_in: ObjectId,
        node_out: ObjectId,
        kind: ObjKind,
    ) -> ObjectId {
        let new = self.create(kind);
        self.patch_fanin(node_out, node_in, new.into());
        self.add_fanin(new, node_in.into());
        new
    }

    /// Returns the slot of `fanin` among the fanins of `fanout`.
    ///
    /// # Panics
    ///
    /// Panics if `fanin` is not a fanin of `fanout`.
    pub fn fanout_fanin_index(&self, fanout: ObjectId, fanin: ObjectId) -> usize {
        match self.fanins(fanout).iter().position(|&entry| entry == fanin) {
            Some(slot) => slot,
            None => panic!("{fanin} is not a fanin of {fanout}"),
        }
    }
}
