//! One generated test per file in `tests/fixtures`, covering constraint
//! programs beyond the six named scenarios exercised directly in
//! `src/solver.rs` — recursive τ cycles, deep `fun_def` nesting, and
//! permutation-invariance.

steensgaard_test_macro::generate_fixture_tests!("tests/fixtures");
