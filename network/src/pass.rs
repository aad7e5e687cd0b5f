//! Checked acquisition of per-object scratch storage.
//!
//! The copy references and the two marks of every object are shared by all passes. A pass that
//! uses them acquires a guard which checks that no earlier pass left stale values behind and which
//! clears them again when dropped.
use std::ops::{Deref, DerefMut};

use ntk_lit::ObjectId;

use crate::{FuncMode, Network, NetworkType};

impl Network {
    /// Resets the copy references of all objects.
    pub fn clear_copy_refs(&mut self) {
        for obj in self.objs.values_mut().iter_mut().flatten() {
            obj.copy_ref = None;
        }
    }

    /// Starts a duplication pass.
    ///
    /// # Panics
    ///
    /// Panics if any object still has a copy reference.
    #[track_caller]
    pub fn copy_pass(&mut self) -> CopyPass<'_> {
        if let Some(stale) = self.objs().find(|obj| obj.copy_ref.is_some()) {
            panic!(
                "stale copy reference {:?} on {} {} at the start of a copy pass",
                stale.copy_ref,
                stale.kind,
                stale.id
            );
        }
        CopyPass { ntk: self }
    }

    /// Returns the copy of an object made during the current duplication.
    ///
    /// # Panics
    ///
    /// Panics if the object has not been copied.
    #[track_caller]
    pub fn copy_of(&self, id: ObjectId) -> ObjectId {
        match self.obj(id).copy_ref {
            Some(copy) => copy,
            None => panic!("{} {id} has not been copied", self.kind(id)),
        }
    }

    /// Resets one of the marks of all objects.
    pub fn clean_marks(&mut self, mark: Mark) {
        for obj in self.objs.values_mut().iter_mut().flatten() {
            *mark.flag(&mut obj.flags) = false;
        }
    }

    /// Starts a pass using one of the marks.
    ///
    /// # Panics
    ///
    /// Panics if any object has the mark set.
    #[track_caller]
    pub fn mark_pass(&mut self, mark: Mark) -> MarkPass<'_> {
        if let Some(stale) = self.objs().find(|obj| mark.get(obj.flags)) {
            panic!(
                "stale {mark:?} on {} {} at the start of a mark pass",
                stale.kind, stale.id
            );
        }
        MarkPass { ntk: self, mark }
    }
}

/// A duplication pass over a network.
///
/// While this guard exists, copy references set by [`Network::dup_obj`] remain available through
/// [`Network::copy_of`]. Dropping the guard clears all copy references.
pub struct CopyPass<'a> {
    ntk: &'a mut Network,
}

impl CopyPass<'_> {
    /// Creates a new network with copies of all inputs, outputs and boxes.
    ///
    /// Names, latch data and box models are copied along. The copy references of the copied
    /// objects, and of the constant node when both networks have one, are set.
    pub fn start_network(&mut self, ntype: NetworkType, mode: FuncMode) -> Network {
        let src = &mut *self.ntk;
        let mut new = Network::new(ntype, mode);
        new.start_func_from(src);
        if let Some(name) = src.name() {
            new.set_name(name);
        }

        if let (Some(const1), Some(new_const1)) = (src.const1(), new.const1()) {
            src.obj_mut(const1).copy_ref = Some(new_const1);
        }

        for pi in src.pis().to_vec() {
            new.dup_obj(src, pi, true);
        }
        for po in src.pos().to_vec() {
            new.dup_obj(src, po, true);
        }
        for assert in src.asserts().to_vec() {
            new.dup_obj(src, assert, true);
        }
        for bx in src.boxes().to_vec() {
            new.dup_box(src, bx, true);
        }
        for &pio in src.pios() {
            new.register_pio(src.copy_of(pio));
        }

        log::debug!(
            "started network with {} inputs and {} outputs",
            new.cis().len(),
            new.cos().len()
        );
        new
    }
}

impl Deref for CopyPass<'_> {
    type Target = Network;

    fn deref(&self) -> &Self::Target {
        self.ntk
    }
}

impl DerefMut for CopyPass<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ntk
    }
}

impl Drop for CopyPass<'_> {
    fn drop(&mut self) {
        self.ntk.clear_copy_refs();
    }
}

/// One of the two multipurpose marks of an object.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mark {
    /// [`ObjFlags::mark_a`][crate::ObjFlags::mark_a]
    A,
    /// [`ObjFlags::mark_b`][crate::ObjFlags::mark_b]
    B,
}

impl Mark {
    fn get(self, flags: crate::ObjFlags) -> bool {
        match self {
            Mark::A => flags.mark_a,
            Mark::B => flags.mark_b,
        }
    }

    fn flag(self, flags: &mut crate::ObjFlags) -> &mut bool {
        match self {
            Mark::A => &mut flags.mark_a,
            Mark::B => &mut flags.mark_b,
        }
    }
}

/// A pass using one of the marks of all objects.
///
/// Dropping the guard clears the mark on all objects.
pub struct MarkPass<'a> {
    ntk: &'a mut Network,
    mark: Mark,
}

impl MarkPass<'_> {
    /// Sets the mark of an object.
    pub fn set(&mut self, id: ObjectId) {
        let mark = self.mark;
        *mark.flag(&mut self.ntk.obj_mut(id).flags) = true;
    }

    /// Clears the mark of an object.
    pub fn clear(&mut self, id: ObjectId) {
        let mark = self.mark;
        *mark.flag(&mut self.ntk.obj_mut(id).flags) = false;
    }

    /// Returns `true` if the mark of an object is set.
    pub fn is_set(&self, id: ObjectId) -> bool {
        self.mark.get(self.ntk.obj(id).flags)
    }
}

impl Deref for MarkPass<'_> {
    type Target = Network;

    fn deref(&self) -> &Self::Target {
        self.ntk
    }
}

impl DerefMut for MarkPass<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ntk
    }
}

impl Drop for MarkPass<'_> {
    fn drop(&mut self) {
        self.ntk.clean_marks(self.mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_pass_clears_on_drop() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let y = ntk.create_pi();
        {
            let mut pass = ntk.mark_pass(Mark::A);
            pass.set(x);
            assert!(pass.is_set(x));
            assert!(!pass.is_set(y));
            assert!(!pass.obj(x).flags().mark_b);
        }
        assert!(!ntk.obj(x).flags().mark_a);
        let _pass = ntk.mark_pass(Mark::A);
    }

    #[test]
    #[should_panic(expected = "stale")]
    fn stale_mark_is_detected() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        ntk.flags_mut(x).mark_b = true;
        let _pass = ntk.mark_pass(Mark::B);
    }

    #[test]
    #[should_panic(expected = "stale copy reference")]
    fn stale_copy_ref_is_detected() {
        let mut src = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = src.create_pi();
        let mut dst = Network::new(NetworkType::Logic, FuncMode::Sop);
        dst.dup_obj(&mut src, x, false);
        let _pass = src.copy_pass();
    }

    #[test]
    fn copy_pass_clears_on_drop() {
        let mut src = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = src.create_pi();
        let mut dst;
        {
            let mut pass = src.copy_pass();
            dst = pass.start_network(NetworkType::Logic, FuncMode::Sop);
            assert_eq!(dst.pis(), &[pass.copy_of(x)]);
        }
        assert_eq!(src.obj(x).copy_ref(), None);
        let y = dst.create_pi();
        assert_eq!(dst.pis().len(), 2);
        assert!(dst.is_live(y));
    }
}
