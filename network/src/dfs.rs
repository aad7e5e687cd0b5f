//! Depth-first orderings of the nodes of a network.
//!
//! All traversals use a single traversal generation. Combinational inputs, the constant and other
//! terminals are marked when reached but are never part of a node order. Nets of netlists are
//! skipped, so that the orderings only contain internal nodes.
use ntk_lit::ObjectId;

use crate::{object::ObjKind, Network};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Direction {
    Fanins,
    Fanouts,
}

/// Reusable storage for iterative traversals.
///
/// Children of all nodes on the current path share one buffer, each frame remembers where its
/// children start.
#[derive(Default)]
struct DfsStack {
    frames: Vec<(ObjectId, usize)>,
    pending: Vec<ObjectId>,
}

impl Network {
    /// Appends the objects a traversal in `direction` continues with after `node`.
    ///
    /// The children are appended in reverse, so that popping them yields them in order.
    fn push_dfs_children(&self, node: ObjectId, direction: Direction, out: &mut Vec<ObjectId>) {
        let start = out.len();
        match direction {
            Direction::Fanins => {
                for &fanin in self.fanins(node) {
                    out.push(self.fanin0_ntk(fanin));
                }
                if self.is_choice(node) {
                    out.extend(self.equiv_members(node));
                }
            }
            Direction::Fanouts => {
                out.extend_from_slice(self.fanouts(self.fanout0_ntk(node)));
            }
        }
        out[start..].reverse();
    }

    /// Visits `root` and all unvisited nodes reachable from it, appending the nodes in post-order.
    ///
    /// Non-node objects are marked and passed to `terminal` but not expanded.
    fn dfs_walk(
        &mut self,
        root: ObjectId,
        direction: Direction,
        stack: &mut DfsStack,
        order: &mut Vec<ObjectId>,
        terminal: &mut impl FnMut(ObjectId),
    ) {
        if !self.enter_dfs(root, terminal) {
            return;
        }
        debug_assert!(stack.frames.is_empty() && stack.pending.is_empty());
        stack.frames.push((root, 0));
        self.push_dfs_children(root, direction, &mut stack.pending);

        while let Some(&(node, base)) = stack.frames.last() {
            let child = if stack.pending.len() > base {
                stack.pending.pop()
            } else {
                None
            };
            match child {
                Some(child) => {
                    if self.enter_dfs(child, terminal) {
                        stack.frames.push((child, stack.pending.len()));
                        self.push_dfs_children(child, direction, &mut stack.pending);
                    }
                }
                None => {
                    stack.frames.pop();
                    order.push(node);
                }
            }
        }
    }

    /// Marks an object, returning `true` if it is a node that needs to be expanded.
    fn enter_dfs(&mut self, id: ObjectId, terminal: &mut impl FnMut(ObjectId)) -> bool {
        if self.is_trav_id_current(id) {
            return false;
        }
        self.set_trav_id_current(id);
        if self.kind(id) == ObjKind::Node {
            true
        } else {
            terminal(id);
            false
        }
    }

    /// Returns the object driving a combinational output, skipping nets.
    pub(crate) fn co_driver(&self, co: ObjectId) -> Option<ObjectId> {
        let &fanin = self.fanins(co).first()?;
        Some(self.fanin0_ntk(fanin))
    }

    /// Returns the internal nodes in topological order.
    ///
    /// Combinational outputs are processed in order, each followed by the cone of its driver. The
    /// fanins of a node, and for a choice node the members of its equivalence class, are listed
    /// before the node. With `collect_all`, nodes not reachable from any output are appended,
    /// visiting their cones in id order.
    pub fn dfs(&mut self, collect_all: bool) -> Vec<ObjectId> {
        self.advance_trav_id();
        let mut stack = DfsStack::default();
        let mut order = vec![];

        for i in 0..self.cos().len() {
            let co = self.cos()[i];
            self.set_trav_id_current(co);
            if let Some(driver) = self.co_driver(co) {
                self.dfs_walk(driver, Direction::Fanins, &mut stack, &mut order, &mut |_| ());
            }
        }

        if collect_all {
            for node in self.nodes().collect::<Vec<_>>() {
                self.dfs_walk(node, Direction::Fanins, &mut stack, &mut order, &mut |_| ());
            }
        }

        log::debug!("dfs collected {} of {} nodes", order.len(), self.node_count());
        order
    }

    /// Recursive version of [`dfs`][Self::dfs], producing the same order.
    ///
    /// The recursion depth is bounded by the logic depth of the network.
    pub fn dfs_recursive(&mut self, collect_all: bool) -> Vec<ObjectId> {
        self.advance_trav_id();
        let mut order = vec![];

        for i in 0..self.cos().len() {
            let co = self.cos()[i];
            self.set_trav_id_current(co);
            if let Some(driver) = self.co_driver(co) {
                self.dfs_rec(driver, Direction::Fanins, &mut order);
            }
        }

        if collect_all {
            for node in self.nodes().collect::<Vec<_>>() {
                self.dfs_rec(node, Direction::Fanins, &mut order);
            }
        }
        order
    }

    fn dfs_rec(&mut self, id: ObjectId, direction: Direction, order: &mut Vec<ObjectId>) {
        if !self.enter_dfs(id, &mut |_| ()) {
            return;
        }
        let mut children = vec![];
        self.push_dfs_children(id, direction, &mut children);
        for &child in children.iter().rev() {
            self.dfs_rec(child, direction, order);
        }
        order.push(id);
    }

    /// Returns the internal nodes in the transitive fanin of `roots` in topological order.
    ///
    /// Combinational outputs among the roots are replaced by their drivers.
    pub fn dfs_nodes(&mut self, roots: &[ObjectId]) -> Vec<ObjectId> {
        self.advance_trav_id();
        let mut stack = DfsStack::default();
        let mut order = vec![];

        for &root in roots {
            let start = if self.kind(root).is_co() {
                self.set_trav_id_current(root);
                match self.co_driver(root) {
                    Some(driver) => driver,
                    None => continue,
                }
            } else {
                root
            };
            self.dfs_walk(start, Direction::Fanins, &mut stack, &mut order, &mut |_| ());
        }
        order
    }

    /// Returns the internal nodes in reverse topological order, starting from the inputs.
    ///
    /// Every node is listed after all of its fanouts. Nodes without fanins are not reachable
    /// from the inputs; except for structurally hashed networks they are appended at the end.
    pub fn dfs_reverse(&mut self) -> Vec<ObjectId> {
        self.advance_trav_id();
        let mut stack = DfsStack::default();
        let mut order = vec![];

        for i in 0..self.cis().len() {
            let ci = self.cis()[i];
            self.set_trav_id_current(ci);
            let source = self.fanout0_ntk(ci);
            for fanout in self.fanouts(source).to_vec() {
                self.dfs_walk(fanout, Direction::Fanouts, &mut stack, &mut order, &mut |_| ());
            }
        }
        self.append_constant_nodes(&mut order);

        log::debug!("reverse dfs collected {} of {} nodes", order.len(), self.node_count());
        order
    }

    /// Recursive version of [`dfs_reverse`][Self::dfs_reverse], producing the same order.
    pub fn dfs_reverse_recursive(&mut self) -> Vec<ObjectId> {
        self.advance_trav_id();
        let mut order = vec![];

        for i in 0..self.cis().len() {
            let ci = self.cis()[i];
            self.set_trav_id_current(ci);
            let source = self.fanout0_ntk(ci);
            for fanout in self.fanouts(source).to_vec() {
                self.dfs_rec(fanout, Direction::Fanouts, &mut order);
            }
        }
        self.append_constant_nodes(&mut order);
        order
    }

    fn append_constant_nodes(&self, order: &mut Vec<ObjectId>) {
        if self.is_strash() {
            return;
        }
        order.extend(
            self.objs()
                .filter(|obj| obj.kind() == ObjKind::Node && obj.fanins().is_empty())
                .map(|obj| obj.id()),
        );
    }

    /// Returns `true` if every node has a larger id than its fanins and choice members.
    pub fn is_dfs_ordered(&mut self) -> bool {
        self.advance_trav_id();
        for id in self.obj_ids().collect::<Vec<_>>() {
            if self.kind(id) != ObjKind::Node {
                // Nets are ordered by their drivers.
                if self.kind(id) != ObjKind::Net {
                    self.set_trav_id_current(id);
                }
                continue;
            }
            let mut children = vec![];
            self.push_dfs_children(id, Direction::Fanins, &mut children);
            if let Some(&late) = children
                .iter()
                .find(|&&child| self.kind(child) == ObjKind::Node && !self.is_trav_id_current(child))
            {
                log::debug!("node {id} precedes its fanin {late}");
                return false;
            }
            self.set_trav_id_current(id);
        }
        true
    }

    /// Returns the combinational inputs in the transitive fanin of all outputs.
    ///
    /// Inputs are listed in the order they are reached, followed by the unused inputs, so that
    /// the result is a permutation of [`cis`][Self::cis].
    pub fn support(&mut self) -> Vec<ObjectId> {
        let cos = self.cos().to_vec();
        let mut support = self.node_support(&cos);
        self.advance_trav_id();
        for &ci in &support {
            self.set_trav_id_current(ci);
        }
        support.extend(
            self.cis()
                .iter()
                .copied()
                .filter(|&ci| !self.is_trav_id_current(ci))
                .collect::<Vec<_>>(),
        );
        support
    }

    /// Returns the combinational inputs in the transitive fanin of `roots`, in the order they are
    /// reached.
    pub fn node_support(&mut self, roots: &[ObjectId]) -> Vec<ObjectId> {
        self.advance_trav_id();
        let mut stack = DfsStack::default();
        let mut nodes = vec![];
        let mut support = vec![];
        let mut found = vec![];

        for &root in roots {
            let start = if self.kind(root).is_co() {
                self.set_trav_id_current(root);
                match self.co_driver(root) {
                    Some(driver) => driver,
                    None => continue,
                }
            } else {
                root
            };
            self.dfs_walk(start, Direction::Fanins, &mut stack, &mut nodes, &mut |id| {
                found.push(id)
            });
            support.extend(found.drain(..).filter(|&id| self.kind(id).is_ci()));
        }
        support
    }
}
