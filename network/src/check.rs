//! Structural consistency checks.
use std::fmt;

use ntk_lit::ObjectId;

use crate::{object::ObjKind, Network, NetworkType};

/// A single inconsistency found by [`Network::check`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Violation {
    /// An object is stored under a different id.
    IdMismatch {
        /// The table slot.
        slot: ObjectId,
        /// The id of the object stored there.
        stored: ObjectId,
    },
    /// An edge refers to a deleted object.
    DeadReference {
        /// The object holding the reference.
        obj: ObjectId,
        /// The deleted object.
        target: ObjectId,
    },
    /// The fanin and fanout lists disagree on the number of edges between two objects.
    AsymmetricEdge {
        /// The driving object.
        fanin: ObjectId,
        /// The driven object.
        fanout: ObjectId,
        /// Occurrences of `fanin` among the fanins of `fanout`.
        in_fanins: usize,
        /// Occurrences of `fanout` among the fanouts of `fanin`.
        in_fanouts: usize,
    },
    /// The live count of a kind is wrong.
    CountMismatch {
        /// The kind, or `None` for the total count.
        kind: Option<ObjKind>,
        /// The stored count.
        stored: usize,
        /// The number of live objects.
        actual: usize,
    },
    /// A role list does not list exactly the live objects of the corresponding kinds.
    RoleList {
        /// The name of the list.
        list: &'static str,
        /// The offending object.
        obj: ObjectId,
    },
    /// An object has a number of fanins or fanouts its kind does not allow.
    Arity {
        /// The object.
        obj: ObjectId,
        /// The kind of the object.
        kind: ObjKind,
        /// Number of fanins.
        fanins: usize,
        /// Number of fanouts.
        fanouts: usize,
    },
    /// A latch is not connected to a box input and a box output.
    LatchTerminals {
        /// The latch.
        latch: ObjectId,
    },
    /// An object carries a payload not admitted by the network's mode.
    Payload {
        /// The object.
        obj: ObjectId,
        /// The variant name of the payload.
        payload: &'static str,
    },
    /// The forward and backward links of an equivalence class disagree.
    EquivLink {
        /// The object holding the forward link.
        obj: ObjectId,
        /// The object that should follow it.
        next: ObjectId,
    },
    /// A complement bit is set on a slot without fanin.
    DanglingComplement {
        /// The object.
        obj: ObjectId,
        /// The slot.
        slot: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::IdMismatch { slot, stored } => {
                write!(f, "object {stored} is stored in slot {slot}")
            }
            Violation::DeadReference { obj, target } => {
                write!(f, "{obj} refers to deleted object {target}")
            }
            Violation::AsymmetricEdge {
                fanin,
                fanout,
                in_fanins,
                in_fanouts,
            } => write!(
                f,
                "edge {fanin} -> {fanout} occurs {in_fanins} times as fanin \
                 and {in_fanouts} times as fanout"
            ),
            Violation::CountMismatch {
                kind,
                stored,
                actual,
            } => match kind {
                Some(kind) => write!(f, "{stored} {kind} objects counted, {actual} live"),
                None => write!(f, "{stored} objects counted, {actual} live"),
            },
            Violation::RoleList { list, obj } => write!(f, "{obj} is misplaced in {list}"),
            Violation::Arity {
                obj,
                kind,
                fanins,
                fanouts,
            } => write!(f, "{kind} {obj} has {fanins} fanins and {fanouts} fanouts"),
            Violation::LatchTerminals { latch } => {
                write!(f, "latch {latch} is not connected to box terminals")
            }
            Violation::Payload { obj, payload } => {
                write!(f, "{obj} has a {payload} payload not allowed in this network")
            }
            Violation::EquivLink { obj, next } => {
                write!(f, "equivalence link from {obj} to {next} is not mirrored")
            }
            Violation::DanglingComplement { obj, slot } => {
                write!(f, "{obj} has a complement bit on empty slot {slot}")
            }
        }
    }
}

/// The inconsistencies found by [`Network::check`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CheckError {
    /// All violations, in the order they were found.
    pub violations: Vec<Violation>,
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "network check failed with {} violations", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CheckError {}

impl Network {
    /// Checks the structural invariants of the network.
    ///
    /// This verifies the object table, edge symmetry, live counts, role lists, the number of
    /// edges allowed per kind, latch terminals, payloads and equivalence links. All violations
    /// are collected.
    pub fn check(&self) -> Result<(), CheckError> {
        let mut violations = vec![];
        self.check_objects(&mut violations);
        self.check_counts(&mut violations);
        self.check_role_lists(&mut violations);

        if violations.is_empty() {
            return Ok(());
        }
        let err = CheckError { violations };
        log::warn!("{err}");
        Err(err)
    }

    fn check_objects(&self, violations: &mut Vec<Violation>) {
        for (slot, obj) in self.objs.iter() {
            let Some(obj) = obj else { continue };
            let id = obj.id();
            if id != slot {
                violations.push(Violation::IdMismatch { slot, stored: id });
            }

            for (i, &fanin) in obj.fanins().iter().enumerate() {
                if obj.fanins()[..i].contains(&fanin) {
                    continue;
                }
                match self.get(fanin) {
                    None => violations.push(Violation::DeadReference { obj: id, target: fanin }),
                    Some(driver) => {
                        let in_fanins = obj.fanins().iter().filter(|&&f| f == fanin).count();
                        let in_fanouts = driver.fanouts().iter().filter(|&&f| f == id).count();
                        if in_fanins != in_fanouts {
                            violations.push(Violation::AsymmetricEdge {
                                fanin,
                                fanout: id,
                                in_fanins,
                                in_fanouts,
                            });
                        }
                    }
                }
            }
            for &fanout in obj.fanouts() {
                match self.get(fanout) {
                    None => violations.push(Violation::DeadReference { obj: id, target: fanout }),
                    Some(driven) if !driven.fanins().contains(&id) => {
                        violations.push(Violation::AsymmetricEdge {
                            fanin: id,
                            fanout,
                            in_fanins: 0,
                            in_fanouts: obj.fanouts().iter().filter(|&&f| f == fanout).count(),
                        })
                    }
                    Some(_) => (),
                }
            }

            for slot in obj.fanins().len()..2 {
                if obj.fanin_compl(slot) {
                    violations.push(Violation::DanglingComplement { obj: id, slot });
                }
            }

            if !self.has_valid_arity(id) {
                violations.push(Violation::Arity {
                    obj: id,
                    kind: obj.kind(),
                    fanins: obj.fanins().len(),
                    fanouts: obj.fanouts().len(),
                });
            }

            if obj.kind() == ObjKind::Latch && !self.has_latch_terminals(id) {
                violations.push(Violation::LatchTerminals { latch: id });
            }

            let payload = obj.payload();
            if !self.func_mode().admits(self.ntype(), obj.kind(), &payload) {
                violations.push(Violation::Payload {
                    obj: id,
                    payload: payload.variant_name(),
                });
            }
            if let Some(next) = obj.equiv_next() {
                match self.get(next) {
                    Some(member) if member.kind() == ObjKind::Node => {
                        if member.equiv_prev() != Some(id) {
                            violations.push(Violation::EquivLink { obj: id, next });
                        }
                    }
                    _ => violations.push(Violation::DeadReference { obj: id, target: next }),
                }
            }
            if let Some(prev) = obj.equiv_prev() {
                match self.get(prev) {
                    None => violations.push(Violation::DeadReference { obj: id, target: prev }),
                    Some(owner) if owner.equiv_next() != Some(id) => {
                        violations.push(Violation::EquivLink { obj: prev, next: id })
                    }
                    Some(_) => (),
                }
            }
        }
    }

    fn has_valid_arity(&self, id: ObjectId) -> bool {
        let obj = self.obj(id);
        let (fanins, fanouts) = (obj.fanins().len(), obj.fanouts().len());
        let is_kind = |other: ObjectId, test: fn(ObjKind) -> bool| {
            self.get(other).is_some_and(|other| test(other.kind()))
        };
        match obj.kind() {
            ObjKind::Const1 | ObjKind::PrimaryIn => fanins == 0,
            ObjKind::PrimaryOut | ObjKind::Assert => fanins == 1 && fanouts == 0,
            ObjKind::BoxIn => {
                fanins <= 1 && fanouts == 1 && is_kind(obj.fanouts()[0], ObjKind::is_box)
            }
            ObjKind::BoxOut => fanins == 1 && is_kind(obj.fanins()[0], ObjKind::is_box),
            ObjKind::Net => fanins <= 1,
            ObjKind::Node => self.ntype() != NetworkType::Strash || fanins == 2,
            ObjKind::Latch | ObjKind::Whitebox | ObjKind::Blackbox => {
                let is_bi: fn(ObjKind) -> bool = |kind| kind == ObjKind::BoxIn;
                let is_bo: fn(ObjKind) -> bool = |kind| kind == ObjKind::BoxOut;
                obj.fanins().iter().all(|&bi| is_kind(bi, is_bi))
                    && obj.fanouts().iter().all(|&bo| is_kind(bo, is_bo))
            }
        }
    }

    fn has_latch_terminals(&self, latch: ObjectId) -> bool {
        let obj = self.obj(latch);
        obj.fanins().len() == 1 && obj.fanouts().len() == 1
    }

    fn check_counts(&self, violations: &mut Vec<Violation>) {
        let mut actual = [0; ObjKind::COUNT];
        for obj in self.objs() {
            actual[obj.kind().index()] += 1;
        }
        for kind in ObjKind::ALL {
            let stored = self.kind_count(kind);
            if stored != actual[kind.index()] {
                violations.push(Violation::CountMismatch {
                    kind: Some(kind),
                    stored,
                    actual: actual[kind.index()],
                });
            }
        }
        let total: usize = actual.iter().sum();
        if self.obj_count() != total {
            violations.push(Violation::CountMismatch {
                kind: None,
                stored: self.obj_count(),
                actual: total,
            });
        }
    }

    fn check_role_lists(&self, violations: &mut Vec<Violation>) {
        let lists: [(&'static str, &[ObjectId], fn(ObjKind) -> bool); 6] = [
            ("pis", self.pis(), |kind| kind == ObjKind::PrimaryIn),
            ("pos", self.pos(), |kind| kind == ObjKind::PrimaryOut),
            ("cis", self.cis(), ObjKind::is_ci),
            ("cos", self.cos(), ObjKind::is_co),
            ("asserts", self.asserts(), |kind| kind == ObjKind::Assert),
            ("boxes", self.boxes(), ObjKind::is_box),
        ];

        for (list, entries, member) in lists {
            for &id in entries {
                if !self.get(id).is_some_and(|obj| member(obj.kind())) {
                    violations.push(Violation::RoleList { list, obj: id });
                }
            }
            let listed = entries.len();
            let expected = self.objs().filter(|obj| member(obj.kind())).count();
            if listed != expected {
                for obj in self.objs() {
                    if member(obj.kind()) && !entries.contains(&obj.id()) {
                        violations.push(Violation::RoleList { list, obj: obj.id() });
                    }
                }
            }
        }

        for &id in self.pios() {
            if !self
                .get(id)
                .is_some_and(|obj| matches!(obj.kind(), ObjKind::PrimaryIn | ObjKind::PrimaryOut))
            {
                violations.push(Violation::RoleList { list: "pios", obj: id });
            }
        }
        if let Some(const1) = self.const1() {
            if !self.get(const1).is_some_and(|obj| obj.kind() == ObjKind::Const1) {
                violations.push(Violation::RoleList {
                    list: "const1",
                    obj: const1,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ntk_lit::NodeRef;

    use crate::{FuncMode, Payload};

    use super::*;

    #[test]
    fn consistent_networks_pass() {
        let mut ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let x = ntk.create_pi();
        let y = ntk.create_pi();
        let a = ntk.create_and(NodeRef::pos(x), NodeRef::neg(y));
        let latch = ntk.create_latch();
        ntk.add_fanin(ntk.latch_input(latch), a.into());
        let b = ntk.create_and(NodeRef::pos(a), NodeRef::pos(ntk.latch_output(latch)));
        ntk.create_po(NodeRef::neg(b));
        assert_eq!(ntk.check(), Ok(()));

        ntk.delete_fanin(b, a);
        let err = ntk.check().unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::Arity {
                obj: b,
                kind: ObjKind::Node,
                fanins: 1,
                fanouts: 1
            }]
        );
    }

    #[test]
    fn broken_edges_are_reported() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        let a = ntk.create_node(&[x.into(), x.into()]);
        ntk.create_po(a.into());
        assert_eq!(ntk.check(), Ok(()));

        ntk.obj_mut(x).fanouts.pop();
        ntk.obj_mut(a).payload = Payload::Equiv(x);
        let err = ntk.check().unwrap_err();
        assert!(err.violations.contains(&Violation::AsymmetricEdge {
            fanin: x,
            fanout: a,
            in_fanins: 2,
            in_fanouts: 1
        }));
        assert!(err.violations.contains(&Violation::Payload {
            obj: a,
            payload: "equiv"
        }));
        assert!(err.to_string().starts_with("network check failed"));
    }

    #[test]
    fn unmirrored_equivalence_is_reported() {
        let mut ntk = Network::new(NetworkType::Strash, FuncMode::Aig);
        let x = ntk.create_pi();
        let y = ntk.create_pi();
        let a = ntk.create_and(NodeRef::pos(x), NodeRef::pos(y));
        let b = ntk.create_and(NodeRef::neg(x), NodeRef::neg(y));
        let c = ntk.create_and(NodeRef::pos(x), NodeRef::neg(y));
        ntk.create_po(a.into());
        ntk.make_choice(a, b);
        assert_eq!(ntk.check(), Ok(()));

        ntk.obj_mut(b).equiv_prev = None;
        ntk.obj_mut(c).equiv_prev = Some(a);
        let err = ntk.check().unwrap_err();
        assert!(err.violations.contains(&Violation::EquivLink { obj: a, next: b }));
        assert!(err.violations.contains(&Violation::EquivLink { obj: a, next: c }));
    }

    #[test]
    fn counts_and_lists_are_checked() {
        let mut ntk = Network::new(NetworkType::Logic, FuncMode::Sop);
        let x = ntk.create_pi();
        ntk.objs[x].as_mut().unwrap().kind = ObjKind::Node;
        let err = ntk.check().unwrap_err();
        assert!(err.violations.contains(&Violation::CountMismatch {
            kind: Some(ObjKind::Node),
            stored: 0,
            actual: 1
        }));
        assert!(err.violations.contains(&Violation::RoleList {
            list: "pis",
            obj: x
        }));
    }
}
