//! Detection of combinational loops.
//!
//! The checks walk backwards from the combinational outputs using two traversal generations. An
//! object on the current path is marked with the current generation, an object whose cone was
//! fully explored without finding a loop with the previous one. Reaching an object marked current
//! closes a loop.
use std::fmt;

use ntk_lit::ObjectId;

use crate::{object::ObjKind, scc::TopoSortedSccs, Network};

/// One object on the path of a [`CombinationalLoop`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LoopStep {
    /// The object.
    pub obj: ObjectId,
    /// The name of the object at the time of detection.
    pub name: String,
    /// Set when this object was reached as a member of the equivalence class of a choice node.
    pub choice_of: Option<ObjectId>,
}

impl fmt::Display for LoopStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(repr) = self.choice_of {
            write!(f, " (choice of {repr})")?;
        }
        Ok(())
    }
}

/// A combinational loop found by [`Network::check_acyclic`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CombinationalLoop {
    /// The combinational output whose cone contains the loop.
    pub output: ObjectId,
    /// The name of that output.
    pub output_name: String,
    /// The object that was reached twice, followed by the path leading back to the driver of
    /// the output.
    ///
    /// Each step is a fanin of the following one. The loop consists of the steps up to the next
    /// occurrence of the first object.
    pub path: Vec<LoopStep>,
}

impl CombinationalLoop {
    /// The object reached twice.
    pub fn obj(&self) -> ObjectId {
        self.path[0].obj
    }

    /// The steps forming the loop, starting and ending with [`obj`][Self::obj].
    pub fn cycle(&self) -> &[LoopStep] {
        let end = self.path[1..]
            .iter()
            .position(|step| step.obj == self.path[0].obj)
            .map_or(self.path.len(), |pos| pos + 2);
        &self.path[..end]
    }
}

impl fmt::Display for CombinationalLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "combinational loop in the cone of output {:?}: ", self.output_name)?;
        for (i, step) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CombinationalLoop {}

#[derive(Default)]
struct LoopSearch {
    frames: Vec<(ObjectId, usize, Option<ObjectId>)>,
    pending: Vec<(ObjectId, Option<ObjectId>)>,
}

impl Network {
    /// Resolves a fanin for the box aware check: box outputs continue at their box.
    fn box_aware_driver(&self, fanin: ObjectId) -> ObjectId {
        let driver = self.fanin0_ntk(fanin);
        if self.kind(driver) == ObjKind::BoxOut {
            if let Some(&bx) = self.fanins(driver).first() {
                return bx;
            }
        }
        driver
    }

    fn is_loop_search_expanded(&self, id: ObjectId, through_boxes: bool) -> bool {
        match self.kind(id) {
            ObjKind::Node => true,
            ObjKind::Whitebox => through_boxes,
            _ => false,
        }
    }

    fn push_loop_children(
        &self,
        node: ObjectId,
        through_boxes: bool,
        out: &mut Vec<(ObjectId, Option<ObjectId>)>,
    ) {
        let start = out.len();
        if through_boxes && self.kind(node).is_box() {
            for &bi in self.fanins(node) {
                if let Some(&fanin) = self.fanins(bi).first() {
                    out.push((self.box_aware_driver(fanin), None));
                }
            }
        } else {
            for &fanin in self.fanins(node) {
                let driver = if through_boxes {
                    self.box_aware_driver(fanin)
                } else {
                    self.fanin0_ntk(fanin)
                };
                out.push((driver, None));
            }
            if self.is_choice(node) {
                out.extend(self.equiv_members(node).map(|member| (member, Some(node))));
            }
        }
        out[start..].reverse();
    }

    /// Searches the cone of `root` for a loop, returning the path if one is found.
    fn find_loop(
        &mut self,
        root: ObjectId,
        through_boxes: bool,
        search: &mut LoopSearch,
    ) -> Option<Vec<(ObjectId, Option<ObjectId>)>> {
        if !self.is_loop_search_expanded(root, through_boxes) || self.is_trav_id_previous(root) {
            return None;
        }
        self.set_trav_id_current(root);
        search.frames.push((root, 0, None));
        self.push_loop_children(root, through_boxes, &mut search.pending);

        while let Some(&(node, base, _)) = search.frames.last() {
            let child = if search.pending.len() > base {
                search.pending.pop()
            } else {
                None
            };
            let Some((child, choice_of)) = child else {
                search.frames.pop();
                self.set_trav_id_previous(node);
                continue;
            };

            if !self.is_loop_search_expanded(child, through_boxes)
                || self.is_trav_id_previous(child)
            {
                continue;
            }
            if self.is_trav_id_current(child) {
                let mut path = vec![(child, choice_of)];
                path.extend(
                    search
                        .frames
                        .drain(..)
                        .rev()
                        .map(|(obj, _, choice_of)| (obj, choice_of)),
                );
                search.pending.clear();
                return Some(path);
            }

            self.set_trav_id_current(child);
            search.frames.push((child, search.pending.len(), choice_of));
            self.push_loop_children(child, through_boxes, &mut search.pending);
        }
        None
    }

    fn check_roots_acyclic(
        &mut self,
        roots: Vec<ObjectId>,
        through_boxes: bool,
    ) -> Result<(), CombinationalLoop> {
        self.advance_trav_ids(2);
        let mut search = LoopSearch::default();

        for output in roots {
            let Some(&fanin) = self.fanins(output).first() else {
                continue;
            };
            let driver = if through_boxes {
                self.box_aware_driver(fanin)
            } else {
                self.fanin0_ntk(fanin)
            };
            let Some(path) = self.find_loop(driver, through_boxes, &mut search) else {
                continue;
            };

            let err = CombinationalLoop {
                output,
                output_name: self.obj_name(output).into_owned(),
                path: path
                    .into_iter()
                    .map(|(obj, choice_of)| LoopStep {
                        obj,
                        name: self.obj_name(obj).into_owned(),
                        choice_of,
                    })
                    .collect(),
            };
            log::warn!("{err}");
            return Err(err);
        }
        Ok(())
    }

    /// Checks that the logic between the combinational inputs and outputs has no loops.
    ///
    /// The cones of all combinational outputs are searched, following choice classes. The search
    /// stops at the first loop found.
    pub fn check_acyclic(&mut self) -> Result<(), CombinationalLoop> {
        let roots = self.cos().to_vec();
        self.check_roots_acyclic(roots, false)
    }

    /// Checks for loops also passing through whiteboxes.
    ///
    /// Box outputs are traced back to their box, and a whitebox to the drivers of its inputs.
    /// Latches and blackboxes break loops. The primary outputs are searched first, then the
    /// input terminals of the latches.
    pub fn check_acyclic_with_boxes(&mut self) -> Result<(), CombinationalLoop> {
        let mut roots = self.pos().to_vec();
        roots.extend(
            self.latches()
                .filter_map(|latch| self.fanins(latch).first().copied())
                .collect::<Vec<_>>(),
        );
        self.check_roots_acyclic(roots, true)
    }

    /// Returns all groups of nodes that form combinational loops.
    ///
    /// Each group is a strongly connected component of the node graph, including choice class
    /// edges, that has more than one node or a node which is its own fanin. Groups are returned in
    /// topological order.
    pub fn combinational_loops(&self) -> Vec<Vec<ObjectId>> {
        let mut sccs = TopoSortedSccs::default();
        let mut loops = vec![];

        let preds = |node: ObjectId, out: &mut Vec<ObjectId>| {
            for &fanin in self.fanins(node) {
                let driver = self.fanin0_ntk(fanin);
                if self.kind(driver) == ObjKind::Node {
                    out.push(driver);
                }
            }
            if self.is_choice(node) {
                out.extend(self.equiv_members(node));
            }
        };

        sccs.process(self.nodes(), preds, |scc| {
            let self_loop = |&node: &ObjectId| {
                self.fanins(node)
                    .iter()
                    .any(|&fanin| self.fanin0_ntk(fanin) == node)
            };
            if scc.len() > 1 || scc.iter().any(self_loop) {
                loops.push(scc.to_vec());
            }
        });

        if !loops.is_empty() {
            log::warn!("found {} combinational loops", loops.len());
        }
        loops
    }
}

#[cfg(test)]
mod tests {
    use ntk_lit::NodeRef;

    use crate::{FuncMode, NetworkType};

    use super::*;

    #[test]
    fn loop_path_is_reported() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let a = ntk.create_node(&[x.into()]);
        let b = ntk.create_node(&[a.into()]);
        let c = ntk.create_node(&[b.into()]);
        let po = ntk.create_po(c.into());
        ntk.assign_name(po, "out", None).unwrap();
        ntk.assign_name(b, "b", None).unwrap();
        assert_eq!(ntk.check_acyclic(), Ok(()));
        assert!(ntk.combinational_loops().is_empty());

        ntk.patch_fanin(a, x, c.into());
        let err = ntk.check_acyclic().unwrap_err();
        assert_eq!(err.output, po);
        assert_eq!(err.output_name, "out");
        let path: Vec<_> = err.path.iter().map(|step| step.obj).collect();
        assert_eq!(path, vec![c, a, b, c]);
        assert_eq!(err.cycle().len(), 4);
        assert_eq!(err.path[2].name, "b");
        assert_eq!(
            err.to_string(),
            format!("combinational loop in the cone of output \"out\": {c} -> {a} -> b -> {c}")
        );

        let loops = ntk.combinational_loops();
        assert_eq!(loops.len(), 1);
        let mut nodes = loops[0].clone();
        nodes.sort();
        assert_eq!(nodes, vec![a, b, c]);
    }

    #[test]
    fn self_loop() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let a = ntk.create_node(&[x.into()]);
        ntk.create_po(a.into());
        ntk.add_fanin(a, a.into());
        assert_eq!(ntk.check_acyclic().unwrap_err().obj(), a);
        assert_eq!(ntk.combinational_loops(), vec![vec![a]]);
    }

    #[test]
    fn loop_through_choice() {
        let mut ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let x = ntk.create_pi();
        let y = ntk.create_pi();
        let repr = ntk.create_and(NodeRef::pos(x), NodeRef::pos(y));
        let member = ntk.create_and(NodeRef::neg(x), NodeRef::pos(y));
        ntk.make_choice(repr, member);
        let top = ntk.create_and(NodeRef::pos(repr), NodeRef::neg(y));
        ntk.create_po(top.into());
        assert_eq!(ntk.check_acyclic(), Ok(()));

        ntk.patch_fanin(member, x, NodeRef::pos(top));
        let err = ntk.check_acyclic().unwrap_err();
        let steps: Vec<_> = err.path.iter().map(|s| (s.obj, s.choice_of)).collect();
        assert_eq!(
            steps,
            vec![(top, None), (member, Some(repr)), (repr, None), (top, None)]
        );
        assert!(err.to_string().contains(&format!("(choice of {repr})")));
    }

    #[test]
    fn latches_break_loops() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let latch = ntk.create_latch();
        let bo = ntk.latch_output(latch);
        let node = ntk.create_node(&[x.into(), bo.into()]);
        ntk.add_fanin(ntk.latch_input(latch), node.into());
        ntk.create_po(node.into());

        assert_eq!(ntk.check_acyclic(), Ok(()));
        assert_eq!(ntk.check_acyclic_with_boxes(), Ok(()));
    }

    #[test]
    fn latch_without_terminals() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        ntk.create(ObjKind::Latch);
        ntk.create_po(x.into());
        assert_eq!(ntk.check_acyclic_with_boxes(), Ok(()));
    }

    #[test]
    fn loop_through_whitebox() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let bx = ntk.create_box(ObjKind::Whitebox, 1, 1);
        let bi = ntk.fanin0(bx);
        let bo = ntk.fanout0(bx);
        let node = ntk.create_node(&[x.into(), bo.into()]);
        ntk.add_fanin(bi, node.into());
        let po = ntk.create_po(node.into());

        assert_eq!(ntk.check_acyclic(), Ok(()));
        let err = ntk.check_acyclic_with_boxes().unwrap_err();
        assert_eq!(err.output, po);
        let path: Vec<_> = err.path.iter().map(|step| step.obj).collect();
        assert_eq!(path, vec![node, bx, node]);
    }
}
