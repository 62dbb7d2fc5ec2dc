use std::{fs, path::Path};

use serde::Deserialize;
use steensgaard_core::{Constraint, Solver, SolverError};

/// The on-disk shape of a fixture: a constraint program plus the assertions
/// to check against the solved result.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub constraints: Vec<Constraint>,

    /// Groups of variable names expected to share an ECR after analysis.
    #[serde(default)]
    pub same_ecr: Vec<Vec<String>>,

    /// Groups of variable names expected to be pairwise in *different* ECRs.
    #[serde(default)]
    pub distinct_ecr: Vec<Vec<String>>,

    /// Names expected to be their own pointee: `find(τ(find(name))) == find(name)`.
    #[serde(default)]
    pub self_pointing: Vec<String>,

    /// `[name, target]` pairs asserting `name`'s pointee is `target`'s ECR —
    /// i.e. `find(τ(find(name))) == find(target)`, without requiring `name`
    /// and `target` to share an ECR themselves.
    #[serde(default)]
    pub points_to: Vec<(String, String)>,

    /// If set, the analysis is expected to fail with a [`SolverError`] of
    /// this kind (`"unknown_id"` or `"arity_mismatch"`) instead of succeeding.
    #[serde(default)]
    pub expect_error: Option<String>,
}

fn error_kind(err: &SolverError) -> &'static str {
    match err {
        SolverError::UnknownId(_) => "unknown_id",
        SolverError::UnknownName(_) => "unknown_name",
        SolverError::ArityMismatch { .. } => "arity_mismatch",
    }
}

/// Loads a fixture from `path`, runs it through the solver, and checks its
/// assertions. Panics (with the solver error or the mismatched ECRs in the
/// message) on failure, the way `cargo test` expects.
pub fn run_fixture(path: &Path) {
    let raw = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    let fixture: Fixture = serde_json::from_str(&raw)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()));

    let result = Solver::analyze(fixture.constraints);

    match (&fixture.expect_error, result) {
        (Some(expected), Err(err)) => {
            let actual = error_kind(&err);
            assert_eq!(
                expected, actual,
                "fixture {}: expected error kind {expected:?}, got {actual:?} ({err})",
                path.display()
            );
        }
        (Some(expected), Ok(_)) => {
            panic!(
                "fixture {}: expected error {expected:?}, but analysis succeeded",
                path.display()
            );
        }
        (None, Err(err)) => {
            panic!("fixture {}: unexpected solver error: {err}", path.display());
        }
        (None, Ok((mut solver, _stats))) => {
            for group in &fixture.same_ecr {
                let reps: Vec<_> = group
                    .iter()
                    .map(|name| {
                        solver
                            .representative(name)
                            .unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()))
                    })
                    .collect();
                let all_same = reps.windows(2).all(|w| w[0] == w[1]);
                assert!(
                    all_same,
                    "fixture {}: expected {group:?} to share an ECR, got representatives {reps:?}",
                    path.display()
                );
            }

            for name in &fixture.self_pointing {
                let rep = solver
                    .representative(name)
                    .unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()));
                let pointee = solver
                    .points_to(name)
                    .unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()));
                assert_eq!(
                    pointee,
                    Some(rep),
                    "fixture {}: expected {name:?} to point to itself, got pointee {pointee:?} (self is {rep})",
                    path.display()
                );
            }

            for (name, target) in &fixture.points_to {
                let target_rep = solver
                    .representative(target)
                    .unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()));
                let pointee = solver
                    .points_to(name)
                    .unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()));
                assert_eq!(
                    pointee,
                    Some(target_rep),
                    "fixture {}: expected {name:?} to point to {target:?}, got pointee {pointee:?} (target is {target_rep})",
                    path.display()
                );
            }

            for group in &fixture.distinct_ecr {
                let reps: Vec<_> = group
                    .iter()
                    .map(|name| {
                        (
                            name,
                            solver
                                .representative(name)
                                .unwrap_or_else(|e| panic!("fixture {}: {e}", path.display())),
                        )
                    })
                    .collect();
                for i in 0..reps.len() {
                    for j in (i + 1)..reps.len() {
                        assert_ne!(
                            reps[i].1, reps[j].1,
                            "fixture {}: expected {:?} and {:?} to be in distinct ECRs, both resolved to {}",
                            path.display(),
                            reps[i].0,
                            reps[j].0,
                            reps[i].1
                        );
                    }
                }
            }
        }
    }
}
