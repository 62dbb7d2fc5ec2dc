//! # Disjoint-set store
//!
//! A union-find structure over [`TypeId`]s with path compression and
//! union-by-rank, giving `find`/`union` amortised near-O(α(n)) cost. IDs are
//! minted monotonically by [`crate::arena::TypeArena`] and are always added in
//! order, so the backing storage is a plain, index-addressed `Vec` rather
//! than a hash map.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::arena::TypeId;
use crate::error::SolverError;

#[derive(Debug, Default)]
pub struct DisjointSet {
    parent: Vec<TypeId>,
    rank: Vec<usize>,
}

impl DisjointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` as a singleton class. Idempotent: re-adding an
    /// already-registered id (or one below it) is a no-op.
    pub fn add(&mut self, id: TypeId) {
        while self.parent.len() <= id {
            let next = self.parent.len();
            self.parent.push(next);
            self.rank.push(0);
        }
    }

    /// Returns the representative of `id`'s class, compressing the path
    /// to it. Fails with [`SolverError::UnknownId`] if `id` was never added.
    pub fn find(&mut self, id: TypeId) -> Result<TypeId, SolverError> {
        if id >= self.parent.len() {
            return Err(SolverError::UnknownId(id));
        }
        if self.parent[id] != id {
            let root = self.find(self.parent[id])?;
            self.parent[id] = root;
        }
        Ok(self.parent[id])
    }

    /// Merges the classes of `a` and `b`, returning the new representative.
    /// `union(a, a)` is a no-op that returns `find(a)`.
    pub fn union(&mut self, a: TypeId, b: TypeId) -> Result<TypeId, SolverError> {
        let ra = self.find(a)?;
        let rb = self.find(b)?;
        if ra == rb {
            return Ok(ra);
        }

        let (winner, loser) = match self.rank[ra].cmp(&self.rank[rb]) {
            Ordering::Less => (rb, ra),
            Ordering::Greater => (ra, rb),
            Ordering::Equal => {
                self.rank[ra] += 1;
                (ra, rb)
            }
        };
        self.parent[loser] = winner;
        Ok(winner)
    }

    /// All classes, as `(representative, members)`, ordered by representative.
    /// Used only by the query layer.
    pub fn classes(&mut self) -> Vec<(TypeId, Vec<TypeId>)> {
        let mut by_root: BTreeMap<TypeId, Vec<TypeId>> = BTreeMap::new();
        for id in 0..self.parent.len() {
            let root = self.find(id).expect("id in 0..len was added by construction");
            by_root.entry(root).or_default().push(id);
        }
        by_root.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_is_idempotent() {
        let mut ds = DisjointSet::new();
        ds.add(0);
        ds.add(0);
        ds.add(3);
        assert_eq!(ds.find(0).unwrap(), 0);
        assert_eq!(ds.find(3).unwrap(), 3);
    }

    #[test]
    fn union_merges_and_returns_shared_representative() {
        let mut ds = DisjointSet::new();
        ds.add(0);
        ds.add(1);
        ds.add(2);

        let r = ds.union(0, 1).unwrap();
        assert_eq!(ds.find(0).unwrap(), r);
        assert_eq!(ds.find(1).unwrap(), r);

        ds.union(1, 2).unwrap();
        assert_eq!(ds.find(0).unwrap(), ds.find(2).unwrap());
    }

    #[test]
    fn union_of_self_is_noop() {
        let mut ds = DisjointSet::new();
        ds.add(0);
        let before = ds.find(0).unwrap();
        let after = ds.union(0, 0).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn find_on_unregistered_id_fails() {
        let mut ds = DisjointSet::new();
        ds.add(0);
        assert_eq!(ds.find(5), Err(SolverError::UnknownId(5)));
    }

    #[test]
    fn classes_partitions_all_members() {
        let mut ds = DisjointSet::new();
        for id in 0..5 {
            ds.add(id);
        }
        ds.union(0, 1).unwrap();
        ds.union(1, 2).unwrap();
        ds.union(3, 4).unwrap();

        let classes = ds.classes();
        let total: usize = classes.iter().map(|(_, members)| members.len()).sum();
        assert_eq!(total, 5);
        assert_eq!(classes.len(), 2);
    }
}
