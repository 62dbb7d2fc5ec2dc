//! # Unification engine, constraint dispatcher, and query layer
//!
//! [`Solver`] owns the disjoint-set store and type arena (via
//! [`TypeArena`]) and the name registry produced by the pre-pass. It is the
//! single entry point: [`Solver::analyze`] runs the pre-pass, dispatches
//! every constraint, and hands back a solver ready for querying plus a
//! [`SolveStats`] summary.

use std::collections::BTreeSet;

use crate::arena::{TypeArena, TypeId, TypeRecord};
use crate::constraint::{Constraint, Name};
use crate::error::{ArityKind, SolverError};
use crate::prepass::{self, PrePassResult};
use crate::stats::SolveStats;

#[derive(Debug)]
pub struct Solver {
    arena: TypeArena,
    registry: std::collections::BTreeMap<Name, TypeId>,
}

impl Solver {
    /// Runs the pre-pass and dispatches every constraint. This is the only
    /// way to obtain a [`Solver`]: there is no meaningful "empty" solver to
    /// query before an analysis has run.
    pub fn analyze(constraints: Vec<Constraint>) -> Result<(Solver, SolveStats), SolverError> {
        let mut arena = TypeArena::new();
        let PrePassResult {
            registry,
            constraints,
        } = prepass::run(constraints, &mut arena);

        let mut solver = Solver { arena, registry };
        let constraints_processed = count_constraints(&constraints);
        solver.dispatch_all(&constraints)?;

        let stats = SolveStats {
            constraints_processed,
            equivalence_classes: solver.arena.classes().len(),
        };
        Ok((solver, stats))
    }

    fn id_of(&self, name: &Name) -> Result<TypeId, SolverError> {
        self.registry
            .get(name)
            .copied()
            .ok_or_else(|| SolverError::UnknownName(name.clone()))
    }

    // ---- dispatcher -----------------------------------------------------

    fn dispatch_all(&mut self, constraints: &[Constraint]) -> Result<(), SolverError> {
        for constraint in constraints {
            self.dispatch(constraint)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, constraint: &Constraint) -> Result<(), SolverError> {
        match constraint {
            Constraint::Assign { lhs, rhs } => self.handle_assign(lhs, rhs),
            Constraint::AddrOf { lhs, rhs } => self.handle_addr_of(lhs, rhs),
            Constraint::Deref { lhs, rhs } => self.handle_deref(lhs, rhs),
            Constraint::Store { lhs, rhs } => self.handle_store(lhs, rhs),
            Constraint::Op {
                lhs,
                operand_variables,
            } => self.handle_op(lhs, operand_variables),
            Constraint::Allocate { lhs } => self.handle_allocate(lhs),
            Constraint::FunDef {
                lhs,
                params,
                returns,
                body,
            } => self.handle_fun_def(lhs, params, returns, body),
            Constraint::FunApp {
                lhs,
                fun_name,
                arg_variables,
            } => self.handle_fun_app(lhs, fun_name, arg_variables),
        }
    }

    /// `x := y` unifies the two variables' own ECRs directly (not merely
    /// their τ/λ axes): this is an equality, and Steensgaard's analysis is
    /// equality-based. A version built from `cjoin(τ(x), τ(y))` alone can
    /// leave `x` and `y` permanently unmerged whenever both sides are still
    /// bottom at assignment time and neither is ever dereferenced again —
    /// see `DESIGN.md`.
    fn handle_assign(&mut self, lhs: &Name, rhs: &Name) -> Result<(), SolverError> {
        let x = self.id_of(lhs)?;
        let y = self.id_of(rhs)?;
        self.join(x, y)
    }

    fn handle_addr_of(&mut self, lhs: &Name, rhs: &Name) -> Result<(), SolverError> {
        let x = self.id_of(lhs)?;
        let y = self.id_of(rhs)?;
        let tx = self.get_tau(x)?;
        let ry = self.arena.find(y)?;
        self.join(tx, ry)
    }

    fn handle_deref(&mut self, lhs: &Name, rhs: &Name) -> Result<(), SolverError> {
        let x = self.id_of(lhs)?;
        let y = self.id_of(rhs)?;
        let ty = self.get_tau(y)?;
        if self.arena.record_of(ty)?.is_bottom() {
            self.settype(ty, x)
        } else {
            let tx = self.get_tau(x)?;
            let tty = self.get_tau(ty)?;
            self.cjoin(tx, tty)?;
            let lx = self.get_lam(x)?;
            let lty = self.get_lam(ty)?;
            self.cjoin(lx, lty)
        }
    }

    fn handle_store(&mut self, lhs: &Name, rhs: &Name) -> Result<(), SolverError> {
        let x = self.id_of(lhs)?;
        let y = self.id_of(rhs)?;
        let tx = self.get_tau(x)?;
        if self.arena.record_of(tx)?.is_bottom() {
            self.settype(tx, y)
        } else {
            let ttx = self.get_tau(tx)?;
            let ty = self.get_tau(y)?;
            self.cjoin(ttx, ty)?;
            let ltx = self.get_lam(tx)?;
            let ly = self.get_lam(y)?;
            self.cjoin(ltx, ly)
        }
    }

    fn handle_op(&mut self, lhs: &Name, operand_variables: &[Name]) -> Result<(), SolverError> {
        let x = self.id_of(lhs)?;
        for operand in operand_variables {
            let y = self.id_of(operand)?;
            let tx = self.get_tau(x)?;
            let ty = self.get_tau(y)?;
            self.cjoin(tx, ty)?;
            let lx = self.get_lam(x)?;
            let ly = self.get_lam(y)?;
            self.cjoin(lx, ly)?;
        }
        Ok(())
    }

    fn handle_allocate(&mut self, lhs: &Name) -> Result<(), SolverError> {
        let x = self.id_of(lhs)?;
        let rx = self.arena.find(x)?;
        if self.arena.record_at(rx)?.tau.is_none() {
            self.get_tau(x)?;
        }
        Ok(())
    }

    fn handle_fun_def(
        &mut self,
        lhs: &Name,
        params: &[Name],
        returns: &[Name],
        body: &[Constraint],
    ) -> Result<(), SolverError> {
        let f = self.id_of(lhs)?;
        let param_ids: Vec<TypeId> = params
            .iter()
            .map(|p| self.id_of(p))
            .collect::<Result<_, _>>()?;
        let return_ids: Vec<TypeId> = returns
            .iter()
            .map(|r| self.id_of(r))
            .collect::<Result<_, _>>()?;

        let h = self.get_lam(f)?;
        if self.arena.record_of(h)?.is_bottom() {
            {
                let record = self.arena.record_of_mut(h)?;
                record.lambda_args = param_ids;
                record.lambda_rets = return_ids;
                record.lambda = Some(h);
            }
            self.drain_pending(h)?;
        } else {
            let existing = self.arena.record_of(h)?.clone();
            if existing.lambda_args.len() != param_ids.len() {
                return Err(SolverError::ArityMismatch {
                    expected: existing.lambda_args.len(),
                    found: param_ids.len(),
                    kind: ArityKind::Params,
                });
            }
            if existing.lambda_rets.len() != return_ids.len() {
                return Err(SolverError::ArityMismatch {
                    expected: existing.lambda_rets.len(),
                    found: return_ids.len(),
                    kind: ArityKind::Returns,
                });
            }
            for (slot, fresh) in existing.lambda_args.iter().zip(param_ids.iter()) {
                self.join(*slot, *fresh)?;
            }
            for (slot, fresh) in existing.lambda_rets.iter().zip(return_ids.iter()) {
                self.join(*slot, *fresh)?;
            }
        }

        self.dispatch_all(body)
    }

    fn handle_fun_app(
        &mut self,
        lhs: &Name,
        fun_name: &Name,
        arg_variables: &[Name],
    ) -> Result<(), SolverError> {
        let x = self.id_of(lhs)?;
        let p = self.id_of(fun_name)?;
        let args: Vec<TypeId> = arg_variables
            .iter()
            .map(|a| self.id_of(a))
            .collect::<Result<_, _>>()?;

        let h = self.get_lam(p)?;
        if self.arena.record_of(h)?.is_bottom() {
            let ret_slot = self.arena.fresh();
            {
                let record = self.arena.record_of_mut(h)?;
                record.lambda_args = args;
                record.lambda_rets = vec![ret_slot];
                record.lambda = Some(h);
            }
            self.drain_pending(h)?;
            self.cjoin(x, ret_slot)
        } else {
            let existing = self.arena.record_of(h)?.clone();
            if existing.lambda_args.len() != args.len() {
                return Err(SolverError::ArityMismatch {
                    expected: existing.lambda_args.len(),
                    found: args.len(),
                    kind: ArityKind::Params,
                });
            }
            for (slot, actual) in existing.lambda_args.iter().zip(args.iter()) {
                self.cjoin(*slot, *actual)?;
            }
            if let Some(&ret_slot) = existing.lambda_rets.first() {
                self.cjoin(x, ret_slot)?;
            }
            Ok(())
        }
    }

    // ---- unification engine ----------------------------------------------

    /// `τ(e)`: the pointee ECR, lazily minting a fresh cell if `e`'s
    /// pointee axis was still bottom.
    fn get_tau(&mut self, e: TypeId) -> Result<TypeId, SolverError> {
        let r = self.arena.find(e)?;
        if let Some(t) = self.arena.record_at(r)?.tau {
            return Ok(t);
        }
        let fresh = self.arena.fresh();
        self.arena.record_at_mut(r)?.tau = Some(fresh);
        self.drain_pending(r)?;
        Ok(fresh)
    }

    /// `λ(e)`: the function-handle ECR, lazily minting one if `e`'s
    /// function axis was still bottom.
    fn get_lam(&mut self, e: TypeId) -> Result<TypeId, SolverError> {
        let r = self.arena.find(e)?;
        if let Some(l) = self.arena.record_at(r)?.lambda {
            return Ok(l);
        }
        let fresh = self.arena.fresh();
        self.arena.record_at_mut(r)?.lambda = Some(fresh);
        self.drain_pending(r)?;
        Ok(fresh)
    }

    /// Drains `r`'s pending set through `join`, re-resolving `r`'s
    /// representative before each call since earlier joins in the drain may
    /// have moved it. Only has an effect once `r`'s record is non-bottom.
    fn drain_pending(&mut self, r: TypeId) -> Result<(), SolverError> {
        let mut r = self.arena.find(r)?;
        let record = self.arena.record_at(r)?.clone();
        if record.is_bottom() || record.pending.is_empty() {
            return Ok(());
        }
        self.arena.record_at_mut(r)?.pending.clear();
        for p in record.pending {
            r = self.arena.find(r)?;
            self.join(r, p)?;
        }
        Ok(())
    }

    /// Copies `src`'s structural fields into `e` and drains `e`'s pending
    /// set. `e` must currently be bottom; in that case this is exactly
    /// `join(e, src)`'s bottom-side behaviour, so it is implemented as a
    /// direct call to `join` (see `DESIGN.md`).
    fn settype(&mut self, e: TypeId, src: TypeId) -> Result<(), SolverError> {
        self.join(e, src)
    }

    /// Conditional join: defers unifying `e1` with `e2` until `e2` becomes
    /// non-bottom.
    fn cjoin(&mut self, e1: TypeId, e2: TypeId) -> Result<(), SolverError> {
        let r2 = self.arena.find(e2)?;
        if self.arena.record_at(r2)?.is_bottom() {
            self.arena.record_at_mut(r2)?.pending.insert(e1);
            Ok(())
        } else {
            self.join(e1, e2)
        }
    }

    /// Unconditional join. Implemented as an explicit worklist rather than
    /// recursion so pathological inputs cannot exhaust the stack.
    fn join(&mut self, e1: TypeId, e2: TypeId) -> Result<(), SolverError> {
        let mut worklist = vec![(e1, e2)];
        while let Some((a, b)) = worklist.pop() {
            self.join_step(a, b, &mut worklist)?;
        }
        Ok(())
    }

    fn join_step(
        &mut self,
        a: TypeId,
        b: TypeId,
        worklist: &mut Vec<(TypeId, TypeId)>,
    ) -> Result<(), SolverError> {
        let r1 = self.arena.find(a)?;
        let r2 = self.arena.find(b)?;
        if r1 == r2 {
            return Ok(());
        }

        let rec1 = self.arena.record_at(r1)?.clone();
        let rec2 = self.arena.record_at(r2)?.clone();
        let r = self.arena.union(r1, r2)?;

        let merged = match (rec1.is_bottom(), rec2.is_bottom()) {
            (true, true) => {
                let mut pending = rec1.pending;
                pending.extend(rec2.pending);
                TypeRecord {
                    pending,
                    ..Default::default()
                }
            }
            (false, true) => {
                for p in rec2.pending {
                    worklist.push((r, p));
                }
                TypeRecord {
                    pending: BTreeSet::new(),
                    ..rec1
                }
            }
            (true, false) => {
                for p in rec1.pending {
                    worklist.push((r, p));
                }
                TypeRecord {
                    pending: BTreeSet::new(),
                    ..rec2
                }
            }
            (false, false) => self.unify_structural(&rec1, &rec2, worklist)?,
        };

        self.arena.install(r, merged);
        Ok(())
    }

    /// Both sides of a join are already non-bottom: install either's fields
    /// and push the differing structural components onto the worklist so
    /// they get unified too.
    fn unify_structural(
        &mut self,
        rec1: &TypeRecord,
        rec2: &TypeRecord,
        worklist: &mut Vec<(TypeId, TypeId)>,
    ) -> Result<TypeRecord, SolverError> {
        if let (Some(t1), Some(t2)) = (rec1.tau, rec2.tau) {
            if self.arena.find(t1)? != self.arena.find(t2)? {
                worklist.push((t1, t2));
            }
        }
        if let (Some(l1), Some(l2)) = (rec1.lambda, rec2.lambda) {
            if self.arena.find(l1)? != self.arena.find(l2)? {
                worklist.push((l1, l2));
            }
        }
        if !rec1.lambda_args.is_empty() && !rec2.lambda_args.is_empty() {
            if rec1.lambda_args.len() != rec2.lambda_args.len() {
                return Err(SolverError::ArityMismatch {
                    expected: rec1.lambda_args.len(),
                    found: rec2.lambda_args.len(),
                    kind: ArityKind::Params,
                });
            }
            worklist.extend(rec1.lambda_args.iter().copied().zip(rec2.lambda_args.iter().copied()));
        }
        if !rec1.lambda_rets.is_empty() && !rec2.lambda_rets.is_empty() {
            if rec1.lambda_rets.len() != rec2.lambda_rets.len() {
                return Err(SolverError::ArityMismatch {
                    expected: rec1.lambda_rets.len(),
                    found: rec2.lambda_rets.len(),
                    kind: ArityKind::Returns,
                });
            }
            worklist.extend(rec1.lambda_rets.iter().copied().zip(rec2.lambda_rets.iter().copied()));
        }

        Ok(TypeRecord {
            tau: rec1.tau.or(rec2.tau),
            lambda: rec1.lambda.or(rec2.lambda),
            lambda_args: if rec1.lambda_args.is_empty() {
                rec2.lambda_args.clone()
            } else {
                rec1.lambda_args.clone()
            },
            lambda_rets: if rec1.lambda_rets.is_empty() {
                rec2.lambda_rets.clone()
            } else {
                rec1.lambda_rets.clone()
            },
            pending: BTreeSet::new(),
        })
    }

    // ---- query / export ---------------------------------------------------

    /// Every variable name registered by the pre-pass (including names
    /// synthesised for nested `fun_def` bodies), sorted for deterministic
    /// output.
    pub fn variable_names(&self) -> Vec<Name> {
        self.registry.keys().cloned().collect()
    }

    pub fn representative(&mut self, name: &Name) -> Result<TypeId, SolverError> {
        let id = self.id_of(name)?;
        self.arena.find(id)
    }

    /// The τ chain's first step for `name`, or `None` if bottom.
    pub fn points_to(&mut self, name: &Name) -> Result<Option<TypeId>, SolverError> {
        let r = self.representative(name)?;
        let tau = self.arena.record_at(r)?.tau;
        match tau {
            Some(t) => Ok(Some(self.arena.find(t)?)),
            None => Ok(None),
        }
    }

    pub fn shape_graph(&mut self) -> Result<ShapeGraph, SolverError> {
        let mut members: std::collections::BTreeMap<TypeId, Vec<Name>> = std::collections::BTreeMap::new();
        for (name, id) in self.registry.clone() {
            let r = self.arena.find(id)?;
            members.entry(r).or_default().push(name);
        }

        let mut edges = Vec::new();
        for &r in members.keys() {
            if let Some(t) = self.arena.record_at(r)?.tau {
                let target = self.arena.find(t)?;
                edges.push((r, target));
            }
        }

        Ok(ShapeGraph {
            nodes: members.into_iter().collect(),
            edges,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeGraph {
    pub nodes: Vec<(TypeId, Vec<Name>)>,
    pub edges: Vec<(TypeId, TypeId)>,
}

fn count_constraints(constraints: &[Constraint]) -> usize {
    constraints
        .iter()
        .map(|c| match c {
            Constraint::FunDef { body, .. } => 1 + count_constraints(body),
            _ => 1,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assign(lhs: &str, rhs: &str) -> Constraint {
        Constraint::Assign {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }
    fn addr_of(lhs: &str, rhs: &str) -> Constraint {
        Constraint::AddrOf {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }
    fn deref(lhs: &str, rhs: &str) -> Constraint {
        Constraint::Deref {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }
    fn store(lhs: &str, rhs: &str) -> Constraint {
        Constraint::Store {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }
    fn allocate(lhs: &str) -> Constraint {
        Constraint::Allocate { lhs: lhs.into() }
    }
    fn op(lhs: &str, operands: &[&str]) -> Constraint {
        Constraint::Op {
            lhs: lhs.into(),
            operand_variables: operands.iter().map(|s| (*s).into()).collect(),
        }
    }

    fn same_ecr(solver: &mut Solver, a: &str, b: &str) -> bool {
        solver.representative(&a.into()).unwrap() == solver.representative(&b.into()).unwrap()
    }

    // ---- algebraic laws (spec section "TESTABLE PROPERTIES") ----

    #[test]
    fn law_order_independence() {
        let forward = vec![addr_of("p", "x"), addr_of("q", "y"), assign("p", "q")];
        let backward = vec![assign("p", "q"), addr_of("q", "y"), addr_of("p", "x")];

        let (mut s1, _) = Solver::analyze(forward).unwrap();
        let (mut s2, _) = Solver::analyze(backward).unwrap();

        assert_eq!(same_ecr(&mut s1, "p", "q"), same_ecr(&mut s2, "p", "q"));
        assert_eq!(same_ecr(&mut s1, "x", "y"), same_ecr(&mut s2, "x", "y"));
        assert!(same_ecr(&mut s1, "p", "q"));
        assert!(same_ecr(&mut s1, "x", "y"));
    }

    #[test]
    fn law_idempotence() {
        let once = vec![addr_of("p", "x"), assign("p", "p")];
        let twice = vec![addr_of("p", "x"), assign("p", "p"), assign("p", "p")];

        let (mut s1, _) = Solver::analyze(once).unwrap();
        let (mut s2, _) = Solver::analyze(twice).unwrap();
        assert_eq!(s1.representative(&"p".into()), s1.representative(&"p".into()));
        assert_eq!(same_ecr(&mut s1, "p", "x"), same_ecr(&mut s2, "p", "x"));
    }

    #[test]
    fn law_monotonic_merging() {
        let (mut solver, _) = Solver::analyze(vec![
            addr_of("p", "x"),
            addr_of("q", "y"),
            assign("p", "q"),
        ])
        .unwrap();
        assert!(same_ecr(&mut solver, "x", "y"));

        // further constraints never split an existing class
        let extra = vec![allocate("z")];
        let (mut solver2, _) =
            Solver::analyze([vec![addr_of("p", "x"), addr_of("q", "y"), assign("p", "q")], extra].concat())
                .unwrap();
        assert!(same_ecr(&mut solver2, "x", "y"));
    }

    #[test]
    fn law_pending_drainage() {
        // op("x", ["y"]) defers cjoin(τ(x), τ(y)) onto τ(y)'s still-bottom
        // class; store("y", "w") later gives τ(y) real content and must
        // drain that deferral rather than stranding it.
        let (mut solver, _) = Solver::analyze(vec![
            op("x", &["y"]),
            addr_of("w", "z"),
            store("y", "w"),
        ])
        .unwrap();

        for name in ["x", "y", "w", "z"] {
            let rep = solver.representative(&name.into()).unwrap();
            let record = solver.arena.record_at(rep).unwrap();
            assert!(!(!record.is_bottom() && !record.pending.is_empty()));
        }

        let tau_x = solver.points_to(&"x".into()).unwrap();
        let tau_y = solver.points_to(&"y".into()).unwrap();
        assert_eq!(tau_x, tau_y);
        assert!(tau_x.is_some());
    }

    #[test]
    fn law_arity_safety() {
        let matched = vec![
            Constraint::FunDef {
                lhs: "f".into(),
                params: vec!["a".into()],
                returns: vec!["r".into()],
                body: vec![],
            },
            Constraint::FunDef {
                lhs: "g".into(),
                params: vec!["a".into()],
                returns: vec!["r".into()],
                body: vec![],
            },
            assign("f", "g"),
        ];
        assert!(Solver::analyze(matched).is_ok());

        let mismatched = vec![
            Constraint::FunDef {
                lhs: "f".into(),
                params: vec!["a".into(), "b".into()],
                returns: vec!["r".into()],
                body: vec![],
            },
            Constraint::FunDef {
                lhs: "g".into(),
                params: vec!["a".into()],
                returns: vec!["r".into()],
                body: vec![],
            },
            assign("f", "g"),
        ];
        assert!(matches!(
            Solver::analyze(mismatched),
            Err(SolverError::ArityMismatch { .. })
        ));
    }

    // ---- concrete scenarios (spec section "TESTABLE PROPERTIES") ----

    #[test]
    fn scenario_a_chained_address_of() {
        let (mut solver, _) = Solver::analyze(vec![
            addr_of("p", "x"),
            addr_of("q", "y"),
            assign("p", "q"),
        ])
        .unwrap();

        assert!(same_ecr(&mut solver, "p", "q"));
        assert!(same_ecr(&mut solver, "x", "y"));
    }

    #[test]
    fn scenario_b_allocation_and_load() {
        let (mut solver, _) = Solver::analyze(vec![
            allocate("p"),
            allocate("q"),
            assign("p", "q"),
            deref("x", "p"),
        ])
        .unwrap();

        assert!(same_ecr(&mut solver, "p", "q"));
        // both allocations flow into the same pointer variable before the
        // load, so x ends up sharing the one surviving synthesised cell
        let cell = solver.points_to(&"p".into()).unwrap().expect("p has a cell");
        let x = solver.representative(&"x".into()).unwrap();
        assert_eq!(x, cell);
    }

    #[test]
    fn scenario_c_conditional_join_via_assign() {
        let (mut solver, _) = Solver::analyze(vec![
            assign("a", "b"),
            addr_of("c", "d"),
            assign("a", "c"),
        ])
        .unwrap();

        let tau_a = solver.points_to(&"a".into()).unwrap();
        let tau_b = solver.points_to(&"b".into()).unwrap();
        let tau_c = solver.points_to(&"c".into()).unwrap();
        let d = solver.representative(&"d".into()).unwrap();

        assert_eq!(tau_a, tau_b);
        assert_eq!(tau_b, tau_c);
        assert_eq!(tau_c, Some(d));
    }

    #[test]
    fn scenario_d_store_through_pointer() {
        let (mut solver, _) = Solver::analyze(vec![
            addr_of("p", "x"),
            addr_of("q", "y"),
            store("p", "q"),
        ])
        .unwrap();

        assert!(same_ecr(&mut solver, "x", "q"));
        let tau_x = solver.points_to(&"x".into()).unwrap();
        let tau_q = solver.points_to(&"q".into()).unwrap();
        let y = solver.representative(&"y".into()).unwrap();
        assert_eq!(tau_x, tau_q);
        assert_eq!(tau_x, Some(y));
    }

    #[test]
    fn scenario_e_first_class_function() {
        let (mut solver, _) = Solver::analyze(vec![
            Constraint::FunDef {
                lhs: "f".into(),
                params: vec!["a".into()],
                returns: vec!["r".into()],
                body: vec![assign("r", "a")],
            },
            addr_of("x", "u"),
            Constraint::FunApp {
                lhs: "y".into(),
                fun_name: "f".into(),
                arg_variables: vec!["x".into()],
            },
        ])
        .unwrap();

        let tau_y = solver.points_to(&"y".into()).unwrap();
        let tau_x = solver.points_to(&"x".into()).unwrap();
        let u = solver.representative(&"u".into()).unwrap();
        assert_eq!(tau_y, tau_x);
        assert_eq!(tau_x, Some(u));
    }

    #[test]
    fn scenario_f_arity_mismatch() {
        let result = Solver::analyze(vec![
            Constraint::FunDef {
                lhs: "f".into(),
                params: vec!["a".into(), "b".into()],
                returns: vec!["r".into()],
                body: vec![],
            },
            Constraint::FunDef {
                lhs: "g".into(),
                params: vec!["a".into()],
                returns: vec!["r".into()],
                body: vec![],
            },
            assign("f", "g"),
        ]);

        assert!(matches!(result, Err(SolverError::ArityMismatch { .. })));
    }

    #[test]
    fn shape_graph_has_an_edge_per_known_pointer() {
        let (mut solver, _) =
            Solver::analyze(vec![addr_of("p", "x"), addr_of("q", "y")]).unwrap();
        let graph = solver.shape_graph().unwrap();
        assert_eq!(graph.edges.len(), 2);
    }
}
