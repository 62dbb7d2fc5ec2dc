//! # Constraint interface
//!
//! The wire format a frontend (tokenizer, parser, AST-to-constraint
//! extractor — all out of scope here) feeds into the solver: a flat,
//! JSON-representable tagged union. `Name` is an opaque source-level
//! identifier; the pre-pass (see [`crate::prepass`]) resolves every `Name`
//! to a [`crate::arena::TypeId`] before the dispatcher runs.

use serde::{Deserialize, Serialize};

pub type Name = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// `x := y`
    Assign { lhs: Name, rhs: Name },
    /// `x := &y`
    AddrOf { lhs: Name, rhs: Name },
    /// `x := *y`
    Deref { lhs: Name, rhs: Name },
    /// `*x := y`
    Store { lhs: Name, rhs: Name },
    /// `x := op(y1, y2, ...)`
    Op {
        lhs: Name,
        operand_variables: Vec<Name>,
    },
    /// `x := allocate(...)`
    Allocate { lhs: Name },
    /// `f := fun(p1, ...) -> (r1, ...) { body }`
    FunDef {
        lhs: Name,
        params: Vec<Name>,
        returns: Vec<Name>,
        body: Vec<Constraint>,
    },
    /// `x := p(y1, ...)`
    FunApp {
        lhs: Name,
        fun_name: Name,
        arg_variables: Vec<Name>,
    },
}
