//! # Pre-pass
//!
//! Runs before dispatch: renames every variable local to a `fun_def` body to
//! `<funname>_<var>` so the solver can treat names as a single flat
//! namespace, collects every name referenced, and registers a fresh
//! [`TypeId`] for each. The original prototype this was distilled from only
//! prefixes one level deep; a `fun_def` nested inside another `fun_def`'s
//! body is renamed relative to its own (already-prefixed) enclosing name, so
//! nesting to any depth cannot collide.

use std::collections::BTreeMap;

use crate::arena::{TypeArena, TypeId};
use crate::constraint::{Constraint, Name};

pub struct PrePassResult {
    pub registry: BTreeMap<Name, TypeId>,
    pub constraints: Vec<Constraint>,
}

pub fn run(constraints: Vec<Constraint>, arena: &mut TypeArena) -> PrePassResult {
    let renamed: Vec<Constraint> = rename_all(constraints, None);

    let mut names = std::collections::BTreeSet::new();
    for c in &renamed {
        collect_names(c, &mut names);
    }

    let mut registry = BTreeMap::new();
    for name in names {
        registry.insert(name, arena.fresh());
    }

    PrePassResult {
        registry,
        constraints: renamed,
    }
}

fn prefixed(name: &str, prefix: Option<&str>) -> Name {
    match prefix {
        Some(p) => format!("{p}_{name}"),
        None => name.to_string(),
    }
}

fn rename_all(constraints: Vec<Constraint>, prefix: Option<&str>) -> Vec<Constraint> {
    constraints
        .into_iter()
        .map(|c| rename_one(c, prefix))
        .collect()
}

fn rename_one(constraint: Constraint, prefix: Option<&str>) -> Constraint {
    match constraint {
        Constraint::Assign { lhs, rhs } => Constraint::Assign {
            lhs: prefixed(&lhs, prefix),
            rhs: prefixed(&rhs, prefix),
        },
        Constraint::AddrOf { lhs, rhs } => Constraint::AddrOf {
            lhs: prefixed(&lhs, prefix),
            rhs: prefixed(&rhs, prefix),
        },
        Constraint::Deref { lhs, rhs } => Constraint::Deref {
            lhs: prefixed(&lhs, prefix),
            rhs: prefixed(&rhs, prefix),
        },
        Constraint::Store { lhs, rhs } => Constraint::Store {
            lhs: prefixed(&lhs, prefix),
            rhs: prefixed(&rhs, prefix),
        },
        Constraint::Op {
            lhs,
            operand_variables,
        } => Constraint::Op {
            lhs: prefixed(&lhs, prefix),
            operand_variables: operand_variables
                .iter()
                .map(|v| prefixed(v, prefix))
                .collect(),
        },
        Constraint::Allocate { lhs } => Constraint::Allocate {
            lhs: prefixed(&lhs, prefix),
        },
        Constraint::FunDef {
            lhs,
            params,
            returns,
            body,
        } => {
            let lhs = prefixed(&lhs, prefix);
            let params = params.iter().map(|p| prefixed(p, Some(&lhs))).collect();
            let returns = returns.iter().map(|r| prefixed(r, Some(&lhs))).collect();
            let body = rename_all(body, Some(&lhs));
            Constraint::FunDef {
                lhs,
                params,
                returns,
                body,
            }
        }
        Constraint::FunApp {
            lhs,
            fun_name,
            arg_variables,
        } => Constraint::FunApp {
            lhs: prefixed(&lhs, prefix),
            fun_name: prefixed(&fun_name, prefix),
            arg_variables: arg_variables.iter().map(|v| prefixed(v, prefix)).collect(),
        },
    }
}

fn collect_names(constraint: &Constraint, names: &mut std::collections::BTreeSet<Name>) {
    match constraint {
        Constraint::Assign { lhs, rhs }
        | Constraint::AddrOf { lhs, rhs }
        | Constraint::Deref { lhs, rhs }
        | Constraint::Store { lhs, rhs } => {
            names.insert(lhs.clone());
            names.insert(rhs.clone());
        }
        Constraint::Op {
            lhs,
            operand_variables,
        } => {
            names.insert(lhs.clone());
            names.extend(operand_variables.iter().cloned());
        }
        Constraint::Allocate { lhs } => {
            names.insert(lhs.clone());
        }
        Constraint::FunDef {
            lhs,
            params,
            returns,
            body,
        } => {
            names.insert(lhs.clone());
            names.extend(params.iter().cloned());
            names.extend(returns.iter().cloned());
            for c in body {
                collect_names(c, names);
            }
        }
        Constraint::FunApp {
            lhs,
            fun_name,
            arg_variables,
        } => {
            names.insert(lhs.clone());
            names.insert(fun_name.clone());
            names.extend(arg_variables.iter().cloned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renames_flat_body_variables() {
        let constraints = vec![Constraint::FunDef {
            lhs: "f".into(),
            params: vec!["a".into()],
            returns: vec!["r".into()],
            body: vec![Constraint::Assign {
                lhs: "r".into(),
                rhs: "a".into(),
            }],
        }];
        let mut arena = TypeArena::new();
        let result = run(constraints, &mut arena);

        assert!(result.registry.contains_key("f"));
        assert!(result.registry.contains_key("f_a"));
        assert!(result.registry.contains_key("f_r"));
        assert!(!result.registry.contains_key("a"));
    }

    #[test]
    fn renames_nested_fun_def_relative_to_enclosing_name() {
        let constraints = vec![Constraint::FunDef {
            lhs: "outer".into(),
            params: vec!["x".into()],
            returns: vec![],
            body: vec![Constraint::FunDef {
                lhs: "inner".into(),
                params: vec!["y".into()],
                returns: vec![],
                body: vec![Constraint::Allocate { lhs: "y".into() }],
            }],
        }];
        let mut arena = TypeArena::new();
        let result = run(constraints, &mut arena);

        assert!(result.registry.contains_key("outer"));
        assert!(result.registry.contains_key("outer_x"));
        assert!(result.registry.contains_key("outer_inner"));
        assert!(result.registry.contains_key("outer_inner_y"));
    }
}
