//! # steensgaard-core
//!
//! Steensgaard's equality-based, flow- and context-insensitive points-to
//! analysis. Bottom-up: a disjoint-set store ([`disjoint_set`]) backs a type
//! arena ([`arena`]) of structural records; the unification engine and
//! constraint dispatcher ([`solver`]) mutate both in response to a
//! constraint stream ([`constraint`]) prepared by [`prepass`]; [`Solver`]
//! exposes the query layer once analysis is complete.
//!
//! This crate does no I/O and performs no logging — see `steensgaard-cli`
//! and `steensgaard-service` for the binaries that wrap it.

pub mod arena;
pub mod constraint;
pub mod disjoint_set;
pub mod error;
pub mod prepass;
pub mod solver;
pub mod stats;

pub use arena::TypeId;
pub use constraint::Constraint;
pub use error::SolverError;
pub use solver::{ShapeGraph, Solver};
pub use stats::SolveStats;
