//! Logic levels.
use ntk_ids::id_vec::IdVec;
use ntk_lit::ObjectId;

use crate::{object::ObjKind, Network};

/// How [`Network::set_choice_levels`] reconciles the levels of an equivalence class.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ChoiceLevelPolicy {
    /// Every member gets the largest level of the class.
    ///
    /// Sorting nodes by these levels yields a topological order that includes the choices.
    #[default]
    Maximum,
    /// Every member gets the smallest level of the class.
    Minimum,
}

impl Network {
    fn node_level_from_fanins(&self, node: ObjectId) -> u32 {
        let fanins = self.fanins(node);
        if fanins.is_empty() {
            return 0;
        }
        1 + fanins
            .iter()
            .map(|&fanin| self.level(self.fanin0_ntk(fanin)))
            .max()
            .unwrap_or(0)
    }

    fn reset_levels(&mut self) {
        for obj in self.objs.values_mut().iter_mut().flatten() {
            obj.level = 0;
        }
    }

    /// Computes the level of every object and returns the largest node level.
    ///
    /// Terminals have level `0`, as do nodes without fanins. Every other node is one level above
    /// its highest fanin.
    pub fn compute_levels(&mut self) -> u32 {
        self.reset_levels();
        let mut max = 0;
        for node in self.dfs(true) {
            let level = self.node_level_from_fanins(node);
            self.set_level(node, level);
            max = max.max(level);
        }
        log::debug!("network has {max} levels");
        max
    }

    /// Computes the distance of every node to the outputs and returns the largest one.
    ///
    /// Combinational outputs are at reverse level `0`. A node is at the largest reverse level of
    /// its fanouts, plus one if it has fanins. The result is kept in a separate table, forward
    /// levels are not changed.
    pub fn compute_reverse_levels(&mut self) -> u32 {
        let order = self.dfs(true);
        let mut levels: IdVec<ObjectId, u32> = IdVec::default();
        levels.resize(self.obj_count_max(), 0);

        let mut max = 0;
        for &node in order.iter().rev() {
            let source = self.fanout0_ntk(node);
            let above = self
                .fanouts(source)
                .iter()
                .filter(|&&fanout| self.kind(fanout) == ObjKind::Node)
                .map(|&fanout| levels[fanout])
                .max()
                .unwrap_or(0);
            let level = above + u32::from(!self.fanins(node).is_empty());
            levels[node] = level;
            max = max.max(level);
        }

        self.reverse_levels = Some(levels);
        log::debug!("network has {max} reverse levels");
        max
    }

    /// The reverse level of an object, see [`compute_reverse_levels`][Self::compute_reverse_levels].
    ///
    /// Returns `None` if no reverse levels were computed or `id` was created afterwards.
    pub fn reverse_level(&self, id: ObjectId) -> Option<u32> {
        self.reverse_levels.as_ref()?.get(id).copied()
    }

    /// Discards the reverse levels.
    pub fn clear_reverse_levels(&mut self) {
        self.reverse_levels = None;
    }

    /// Computes levels taking the choices of a structurally hashed network into account.
    ///
    /// After a node's level is computed from its fanins, all members of its equivalence class are
    /// set to a common level according to `policy`. Returns the largest level of an output driver.
    pub fn set_choice_levels(&mut self, policy: ChoiceLevelPolicy) -> u32 {
        self.reset_levels();
        for node in self.dfs(true) {
            let level = self.node_level_from_fanins(node);
            self.set_level(node, level);
            if !self.is_choice(node) {
                continue;
            }
            let members: Vec<_> = self.equiv_members(node).collect();
            let levels = members.iter().map(|&member| self.level(member));
            let shared = match policy {
                ChoiceLevelPolicy::Maximum => levels.fold(level, u32::max),
                ChoiceLevelPolicy::Minimum => levels.fold(level, u32::min),
            };
            self.set_level(node, shared);
            for member in members {
                self.set_level(member, shared);
            }
        }

        let max = self
            .cos()
            .iter()
            .filter_map(|&co| self.fanins(co).first())
            .map(|&fanin| self.level(self.fanin0_ntk(fanin)))
            .max()
            .unwrap_or(0);
        log::debug!("network has {max} levels with {policy:?} choice levels");
        max
    }

    /// Groups the nodes by level.
    ///
    /// Entry `i` of the result lists the nodes of level `i` in topological order.
    pub fn levelize(&mut self) -> Vec<Vec<ObjectId>> {
        let max = self.compute_levels();
        self.bucket_by_level(max)
    }

    fn bucket_by_level(&mut self, max: u32) -> Vec<Vec<ObjectId>> {
        let mut buckets = vec![vec![]; max as usize + 1];
        for node in self.dfs(true) {
            let level = self.level(node) as usize;
            if level >= buckets.len() {
                buckets.resize_with(level + 1, Vec::new);
            }
            buckets[level].push(node);
        }
        buckets
    }

    /// Returns the nodes of a structurally hashed network sorted by their choice levels.
    ///
    /// Levels are computed with [`ChoiceLevelPolicy::Maximum`], which makes this a topological
    /// order in which each choice follows all members of its class. With `collect_cis`, the
    /// combinational inputs are listed first.
    pub fn levelized_order(&mut self, collect_cis: bool) -> Vec<ObjectId> {
        assert!(self.is_strash(), "levelized order needs a structurally hashed network");
        let max = self.set_choice_levels(ChoiceLevelPolicy::Maximum);
        let mut order = if collect_cis { self.cis().to_vec() } else { vec![] };
        for bucket in self.bucket_by_level(max) {
            order.extend(bucket);
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use ntk_lit::NodeRef;

    use crate::{FuncMode, NetworkType};

    use super::*;

    #[test]
    fn forward_and_reverse_levels() {
        let mut ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let x = ntk.create_pi();
        let y = ntk.create_pi();
        let z = ntk.create_pi();
        let a = ntk.create_and(NodeRef::pos(x), NodeRef::neg(y));
        let b = ntk.create_and(NodeRef::pos(a), NodeRef::pos(z));
        let c = ntk.create_and(NodeRef::pos(x), NodeRef::pos(z));
        ntk.create_po(b.into());
        ntk.create_po(c.into());

        assert_eq!(ntk.compute_levels(), 2);
        assert_eq!(ntk.level(a), 1);
        assert_eq!(ntk.level(b), 2);
        assert_eq!(ntk.level(c), 1);
        assert_eq!(ntk.level(x), 0);

        assert_eq!(ntk.compute_reverse_levels(), 2);
        assert_eq!(ntk.reverse_level(a), Some(2));
        assert_eq!(ntk.reverse_level(b), Some(1));
        assert_eq!(ntk.reverse_level(c), Some(1));
        assert_eq!(ntk.level(a), 1);

        assert_eq!(ntk.levelize(), vec![vec![], vec![a, c], vec![b]]);

        ntk.clear_reverse_levels();
        assert_eq!(ntk.reverse_level(a), None);
    }

    #[test]
    fn constant_nodes_are_level_zero() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let constant = ntk.create_node(&[]);
        let node = ntk.create_node(&[constant.into(), x.into()]);
        ntk.create_po(node.into());

        assert_eq!(ntk.compute_levels(), 1);
        assert_eq!(ntk.level(constant), 0);
        assert_eq!(ntk.level(node), 1);
        assert_eq!(ntk.compute_reverse_levels(), 1);
        assert_eq!(ntk.reverse_level(constant), Some(1));
    }

    fn choice_network() -> (Network, [ObjectId; 4]) {
        let mut ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let x = ntk.create_pi();
        let y = ntk.create_pi();
        let z = ntk.create_pi();
        // Level 1 representative with a level 3 alternative.
        let repr = ntk.create_and(NodeRef::pos(x), NodeRef::pos(y));
        let p = ntk.create_and(NodeRef::pos(x), NodeRef::pos(z));
        let q = ntk.create_and(NodeRef::pos(p), NodeRef::pos(y));
        let member = ntk.create_and(NodeRef::pos(q), NodeRef::neg(z));
        ntk.make_choice(repr, member);
        let top = ntk.create_and(NodeRef::pos(repr), NodeRef::pos(z));
        ntk.create_po(top.into());
        (ntk, [repr, member, q, top])
    }

    #[test]
    fn maximum_choice_levels() {
        let (mut ntk, [repr, member, q, top]) = choice_network();
        assert_eq!(ntk.set_choice_levels(ChoiceLevelPolicy::Maximum), 4);
        assert_eq!(ntk.level(repr), 3);
        assert_eq!(ntk.level(member), 3);
        assert_eq!(ntk.level(q), 2);
        assert_eq!(ntk.level(top), 4);

        let order = ntk.levelized_order(false);
        let pos = |id| order.iter().position(|&entry| entry == id).unwrap();
        assert!(pos(member) < pos(repr));
        assert!(pos(q) < pos(member));
        assert_eq!(order.last(), Some(&top));

        let with_cis = ntk.levelized_order(true);
        assert_eq!(&with_cis[..3], ntk.cis());
        assert_eq!(with_cis.len(), order.len() + 3);
    }

    #[test]
    fn minimum_choice_levels() {
        let (mut ntk, [repr, member, q, top]) = choice_network();
        assert_eq!(ntk.set_choice_levels(ChoiceLevelPolicy::Minimum), 2);
        assert_eq!(ntk.level(repr), 1);
        assert_eq!(ntk.level(member), 1);
        assert_eq!(ntk.level(q), 2);
        assert_eq!(ntk.level(top), 2);
    }
}
