//! # Type arena
//!
//! Maintains the mapping from an equivalence-class representative to its
//! [`TypeRecord`]. Only the representative's record is authoritative; once
//! two classes merge, the losing side's record is left in place but
//! unreachable (`record_of` always resolves through [`DisjointSet::find`]
//! first), mirroring the teacher's type graph where a node ID, once
//! superseded, is simply never visited again.

use std::collections::{BTreeMap, BTreeSet};

use steensgaard_iota::Iota;

use crate::disjoint_set::DisjointSet;
use crate::error::SolverError;

pub type TypeId = usize;

/// The structural record attached to an equivalence class. A record is
/// **bottom** iff both `tau` and `lambda` are `None`; `lambda_args` and
/// `lambda_rets` are populated independently of that flag (they describe a
/// function-handle record whose own `tau`/`lambda` stay bottom, see
/// `DESIGN.md`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRecord {
    pub tau: Option<TypeId>,
    pub lambda: Option<TypeId>,
    pub lambda_args: Vec<TypeId>,
    pub lambda_rets: Vec<TypeId>,
    pub pending: BTreeSet<TypeId>,
}

impl TypeRecord {
    pub fn is_bottom(&self) -> bool {
        self.tau.is_none() && self.lambda.is_none()
    }
}

#[derive(Debug, Default)]
pub struct TypeArena {
    iota: Iota,
    disjoint_set: DisjointSet,
    nodes: BTreeMap<TypeId, TypeRecord>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a new ID, registers it in the disjoint-set store, and installs
    /// a bottom record with an empty pending set.
    pub fn fresh(&mut self) -> TypeId {
        let id = self.iota.next();
        self.disjoint_set.add(id);
        self.nodes.insert(id, TypeRecord::default());
        id
    }

    pub fn find(&mut self, id: TypeId) -> Result<TypeId, SolverError> {
        self.disjoint_set.find(id)
    }

    pub fn union(&mut self, a: TypeId, b: TypeId) -> Result<TypeId, SolverError> {
        self.disjoint_set.union(a, b)
    }

    /// `nodes[find(id)]`.
    pub fn record_of(&mut self, id: TypeId) -> Result<&TypeRecord, SolverError> {
        let r = self.find(id)?;
        self.record_at(r)
    }

    pub fn record_of_mut(&mut self, id: TypeId) -> Result<&mut TypeRecord, SolverError> {
        let r = self.find(id)?;
        self.record_at_mut(r)
    }

    /// Looks a record up by a representative ID directly, without re-resolving
    /// through `find`. Used by the unification engine once it already holds a
    /// representative.
    pub fn record_at(&self, representative: TypeId) -> Result<&TypeRecord, SolverError> {
        self.nodes
            .get(&representative)
            .ok_or(SolverError::UnknownId(representative))
    }

    pub fn record_at_mut(&mut self, representative: TypeId) -> Result<&mut TypeRecord, SolverError> {
        self.nodes
            .get_mut(&representative)
            .ok_or(SolverError::UnknownId(representative))
    }

    /// Installs `record` as the authoritative record at `representative`,
    /// overwriting whatever was there (used by the engine once it has
    /// computed a merged record for a freshly-unioned class).
    pub fn install(&mut self, representative: TypeId, record: TypeRecord) {
        self.nodes.insert(representative, record);
    }

    pub fn classes(&mut self) -> Vec<(TypeId, Vec<TypeId>)> {
        self.disjoint_set.classes()
    }
}
