//! Traversal generations.
//!
//! Every object stores the generation in which it was last marked. A pass advances the network's
//! generation and compares object marks against it, so marks from earlier passes never need to be
//! cleared. Relative to the current generation `g` an object is
//!
//! * unvisited, if its mark is below `g - 1`,
//! * previous, if its mark is `g - 1`,
//! * current, if its mark is `g`.
//!
//! Passes that distinguish previous from current marks must reserve both generations at once
//! using [`Network::advance_trav_ids`].
use ntk_lit::ObjectId;

use crate::Network;

/// The generation counter never reaches this value.
///
/// Advancing past it resets all marks to `0` and restarts counting at `0`.
pub const TRAV_ID_LIMIT: u32 = (1 << 30) - 1;

impl Network {
    /// The current traversal generation.
    #[inline(always)]
    pub fn trav_id(&self) -> u32 {
        self.trav_id
    }

    /// Starts a new traversal generation.
    ///
    /// After a reset of the counter, every object appears marked with the previous generation.
    /// Passes that rely on previous marks need to use [`advance_trav_ids`][Self::advance_trav_ids]
    /// with `n = 2`.
    #[inline]
    pub fn advance_trav_id(&mut self) {
        self.advance_trav_ids(1)
    }

    /// Starts `n` new traversal generations at once.
    ///
    /// If the counter would reach [`TRAV_ID_LIMIT`], all object marks and the counter are reset to
    /// `0` first. This guarantees that the `n` reserved generations are all above every existing
    /// mark.
    pub fn advance_trav_ids(&mut self, n: u32) {
        assert!(n > 0 && n < TRAV_ID_LIMIT);
        if self.trav_id >= TRAV_ID_LIMIT - n {
            log::debug!("traversal generation limit reached, resetting marks");
            for obj in self.objs.values_mut().iter_mut().flatten() {
                obj.trav_id = 0;
            }
            self.trav_id = 0;
        }
        self.trav_id += n;
    }

    /// Returns `true` if `id` is marked with the current generation.
    #[inline]
    pub fn is_trav_id_current(&self, id: ObjectId) -> bool {
        self.obj(id).trav_id == self.trav_id
    }

    /// Returns `true` if `id` is marked with the previous generation.
    #[inline]
    pub fn is_trav_id_previous(&self, id: ObjectId) -> bool {
        self.obj(id).trav_id.wrapping_add(1) == self.trav_id
    }

    /// Marks `id` with the current generation.
    #[inline]
    pub fn set_trav_id_current(&mut self, id: ObjectId) {
        let trav_id = self.trav_id;
        self.obj_mut(id).trav_id = trav_id;
    }

    /// Marks `id` with the previous generation.
    #[inline]
    pub fn set_trav_id_previous(&mut self, id: ObjectId) {
        let trav_id = self.trav_id - 1;
        self.obj_mut(id).trav_id = trav_id;
    }
}

#[cfg(test)]
mod tests {
    use crate::{FuncMode, Network, NetworkType};

    use super::TRAV_ID_LIMIT;

    fn small_network() -> (Network, [ntk_lit::ObjectId; 3]) {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let a = ntk.create_pi();
        let b = ntk.create_pi();
        let c = ntk.create_pi();
        (ntk, [a, b, c])
    }

    fn check_two_generation_pass(ntk: &mut Network, [a, b, c]: [ntk_lit::ObjectId; 3]) {
        ntk.advance_trav_ids(2);
        ntk.set_trav_id_previous(a);
        ntk.set_trav_id_current(b);

        assert!(ntk.is_trav_id_previous(a));
        assert!(!ntk.is_trav_id_current(a));
        assert!(ntk.is_trav_id_current(b));
        assert!(!ntk.is_trav_id_previous(b));
        assert!(!ntk.is_trav_id_current(c));
        assert!(!ntk.is_trav_id_previous(c));
    }

    fn check_single_generation_passes(ntk: &mut Network, [a, b, _]: [ntk_lit::ObjectId; 3]) {
        ntk.advance_trav_id();
        ntk.set_trav_id_current(a);
        assert!(ntk.is_trav_id_current(a));
        assert!(!ntk.is_trav_id_current(b));

        ntk.advance_trav_id();
        assert!(!ntk.is_trav_id_current(a));
        assert!(ntk.is_trav_id_previous(a));
        ntk.set_trav_id_current(b);
        assert!(ntk.is_trav_id_current(b));
    }

    #[test]
    fn generations_distinguish_marks() {
        let (mut ntk, ids) = small_network();
        check_two_generation_pass(&mut ntk, ids);
        check_single_generation_passes(&mut ntk, ids);
    }

    #[test]
    fn reset_before_two_generation_pass() {
        let (mut ntk, ids) = small_network();
        ntk.trav_id = TRAV_ID_LIMIT - 3;
        for &id in &ids {
            ntk.set_trav_id_current(id);
        }
        ntk.advance_trav_id();
        assert_eq!(ntk.trav_id(), TRAV_ID_LIMIT - 2);

        // Two more generations would reach the limit.
        check_two_generation_pass(&mut ntk, ids);
        assert_eq!(ntk.trav_id(), 2);
        check_single_generation_passes(&mut ntk, ids);
    }

    #[test]
    fn reset_before_single_generation_pass() {
        let (mut ntk, ids) = small_network();
        ntk.trav_id = TRAV_ID_LIMIT - 1;
        for &id in &ids {
            ntk.set_trav_id_current(id);
        }
        check_single_generation_passes(&mut ntk, ids);
        assert!(ntk.trav_id() < 3);
        check_two_generation_pass(&mut ntk, ids);
    }

    #[test]
    fn new_objects_are_unvisited() {
        let (mut ntk, _) = small_network();
        ntk.advance_trav_ids(2);
        let d = ntk.create_pi();
        assert!(!ntk.is_trav_id_current(d));
        assert!(!ntk.is_trav_id_previous(d));
    }
}
