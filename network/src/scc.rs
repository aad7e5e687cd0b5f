//! Strongly connected components of the object graph.
use ntk_ids::id_vec::IdVec;
use ntk_lit::ObjectId;

struct DfsEntry {
    node: ObjectId,
    incoming_left: usize,
    lowlink: u32,
}

/// Marks nodes of already emitted components, which never lower a lowlink.
const EMITTED: u32 = u32::MAX;

/// Detects strongly connected components, emitting them in topological order.
///
/// This is Tarjan's algorithm, implemented without recursion so that it works for arbitrarily
/// deep graphs.
#[derive(Default)]
pub(crate) struct TopoSortedSccs {
    dfs_index: IdVec<ObjectId, Option<u32>>,
    dfs_stack: Vec<DfsEntry>,
    incoming_iter_stack: Vec<ObjectId>,
    component_stack: Vec<ObjectId>,
    next_dfs_index: u32,
}

impl TopoSortedSccs {
    fn index_of(&self, node: ObjectId) -> Option<u32> {
        self.dfs_index.get(node).copied().flatten()
    }

    fn set_index(&mut self, node: ObjectId, index: u32) {
        self.dfs_index.grow_for_key(node, None);
        self.dfs_index[node] = Some(index);
    }

    /// Processes the components containing `nodes` and their predecessors.
    ///
    /// `incoming` appends the predecessors of a node, `component` is called once per newly found
    /// component.
    pub fn process(
        &mut self,
        nodes: impl IntoIterator<Item = ObjectId>,
        mut incoming: impl FnMut(ObjectId, &mut Vec<ObjectId>),
        mut component: impl FnMut(&[ObjectId]),
    ) {
        for node in nodes {
            self.process_one(node, &mut incoming, &mut component);
        }
    }

    fn process_one(
        &mut self,
        mut node: ObjectId,
        incoming: &mut impl FnMut(ObjectId, &mut Vec<ObjectId>),
        component: &mut impl FnMut(&[ObjectId]),
    ) {
        if self.index_of(node).is_some() {
            return;
        }

        'dfs_search: loop {
            // First visit of `node`.
            let mut lowlink = self.next_dfs_index;
            self.next_dfs_index += 1;
            self.set_index(node, lowlink);
            self.component_stack.push(node);

            let before = self.incoming_iter_stack.len();
            incoming(node, &mut self.incoming_iter_stack);
            let mut incoming_left = self.incoming_iter_stack.len() - before;

            loop {
                let next = if incoming_left > 0 {
                    self.incoming_iter_stack.pop()
                } else {
                    None
                };

                if let Some(pred) = next {
                    incoming_left -= 1;
                    if let Some(pred_index) = self.index_of(pred) {
                        // Nodes of emitted components are at `EMITTED`, so no check whether
                        // `pred` is still on the component stack is needed.
                        lowlink = lowlink.min(pred_index);
                    } else {
                        self.dfs_stack.push(DfsEntry {
                            node,
                            incoming_left,
                            lowlink,
                        });
                        node = pred;
                        continue 'dfs_search;
                    }
                } else {
                    if self.index_of(node) == Some(lowlink) {
                        let mut start = self.component_stack.len();
                        loop {
                            start -= 1;
                            if self.component_stack[start] == node {
                                break;
                            }
                        }

                        component(&self.component_stack[start..]);

                        for i in start..self.component_stack.len() {
                            let member = self.component_stack[i];
                            self.set_index(member, EMITTED);
                        }
                        self.component_stack.truncate(start);
                    }

                    let Some(parent) = self.dfs_stack.pop() else {
                        return;
                    };
                    node = parent.node;
                    incoming_left = parent.incoming_left;
                    lowlink = lowlink.min(parent.lowlink);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> ObjectId {
        ObjectId::from_index(index)
    }

    #[test]
    fn components_in_topological_order() {
        // 0 <- 1 <- 2 <- 1, 3 <- 3, 4 <- 2
        let preds: Vec<Vec<usize>> = vec![vec![], vec![0, 2], vec![1], vec![3], vec![2]];
        let mut sccs = TopoSortedSccs::default();
        let mut found = vec![];
        sccs.process(
            (0..5).rev().map(id),
            |node, out| out.extend(preds[node.index()].iter().map(|&p| id(p))),
            |scc| {
                let mut scc = scc.to_vec();
                scc.sort();
                found.push(scc);
            },
        );
        assert_eq!(
            found,
            vec![vec![id(0)], vec![id(1), id(2)], vec![id(4)], vec![id(3)]]
        );
    }
}
