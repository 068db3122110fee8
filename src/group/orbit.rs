//! Incremental orbit representatives of a permutation group whose generators are discovered
//! while iterating.
use crate::group::PermutationGroup;
use crate::permutable::{Perm, Permutable};
use itertools::Itertools;
use num_bigint::BigUint;
use std::cell::OnceCell;
use std::fmt::{Display, Formatter};

/// A permutation group on `0..len` together with an iterator over orbit representatives.
///
/// Iteration walks a list of seed points and yields a seed only if no earlier yielded seed
/// lies in its orbit under the generators known at that moment. Generators added during
/// iteration merge orbits immediately, so later seeds in the same orbit are skipped.
#[derive(Clone, Debug)]
pub struct PermutationGroupOrbit {
    len: usize,
    generators: Vec<Perm>,
    seeds: Vec<usize>,
    cursor: usize,
    /// Union-find forest over points.
    parent: Vec<usize>,
    /// Per union-find root: whether a point of that orbit was yielded.
    seen: Vec<bool>,
    order: OnceCell<BigUint>,
}

impl PermutationGroupOrbit {
    pub fn new(len: usize, generators: Vec<Perm>, seeds: Vec<usize>) -> Self {
        let mut out = Self {
            len,
            generators: vec![],
            seeds,
            cursor: 0,
            parent: (0..len).collect(),
            seen: vec![false; len],
            order: OnceCell::new(),
        };
        for g in generators {
            out.add_generator(g);
        }
        out
    }

    /// The trivial group, iterating over all points.
    pub fn trivial(len: usize) -> Self { Self::new(len, vec![], (0..len).collect()) }

    pub fn len(&self) -> usize { self.len }

    pub fn generators(&self) -> &[Perm] { &self.generators }

    pub fn num_generators(&self) -> usize { self.generators.len() }

    pub fn group(&self) -> PermutationGroup { PermutationGroup::new(self.len, self.generators.clone()) }

    /// Exact group order, computed on first use.
    pub fn cardinality(&self) -> &BigUint {
        self.order.get_or_init(|| self.group().order())
    }

    pub fn add_generator(&mut self, g: Perm) {
        assert_eq!(g.len(), self.len);
        for (i, &gi) in g.0.iter().enumerate() {
            self.union(i, gi);
        }
        self.generators.push(g);
        self.order = OnceCell::new();
    }

    pub fn same_orbit(&mut self, i: usize, j: usize) -> bool { self.find(i) == self.find(j) }

    /// Restarts iteration over all points `0..len`.
    pub fn reset_iterator(&mut self) {
        self.reset_iterator_with((0..self.len).collect());
    }

    pub fn reset_iterator_with(&mut self, seeds: Vec<usize>) {
        self.seeds = seeds;
        self.cursor = 0;
        self.seen.iter_mut().for_each(|s| *s = false);
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, i: usize, j: usize) {
        let (ri, rj) = (self.find(i), self.find(j));
        if ri != rj {
            self.parent[rj] = ri;
            self.seen[ri] |= self.seen[rj];
        }
    }
}

impl Iterator for PermutationGroupOrbit {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(&i) = self.seeds.get(self.cursor) {
            self.cursor += 1;
            let root = self.find(i);
            if !self.seen[root] {
                self.seen[root] = true;
                return Some(i);
            }
        }
        None
    }
}

impl Display for PermutationGroupOrbit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PermutationGroupOrbit({}, [{}])", self.len, self.generators.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_yields_every_point() {
        let mut o = PermutationGroupOrbit::trivial(4);
        assert_eq!(o.by_ref().collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(o.cardinality(), &BigUint::from(1u32));
        o.reset_iterator();
        assert_eq!(o.collect_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn generators_merge_orbits() {
        let g = Perm::from(vec![1, 0, 3, 2, 4]);
        let mut o = PermutationGroupOrbit::new(5, vec![g], vec![0, 1, 2, 3, 4]);
        assert_eq!(o.by_ref().collect_vec(), vec![0, 2, 4]);
        assert!(o.same_orbit(2, 3));
        assert_eq!(o.cardinality(), &BigUint::from(2u32));
        assert_eq!(o.to_string(), "PermutationGroupOrbit(5, [(0,1)(2,3)])");
    }

    #[test]
    fn generator_added_while_iterating() {
        let mut o = PermutationGroupOrbit::new(6, vec![], vec![0, 2, 4, 5]);
        assert_eq!(o.next(), Some(0));
        // 4 joins the orbit of 0 before it is reached.
        o.add_generator(Perm::from(vec![4, 1, 2, 3, 0, 5]));
        assert_eq!(o.next(), Some(2));
        assert_eq!(o.next(), Some(5));
        assert_eq!(o.next(), None);

        o.reset_iterator();
        assert_eq!(o.collect_vec(), vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn merging_yielded_orbits_keeps_them_seen() {
        let mut o = PermutationGroupOrbit::new(4, vec![], vec![0, 1, 2, 3]);
        assert_eq!(o.next(), Some(0));
        assert_eq!(o.next(), Some(1));
        o.add_generator(Perm::from(vec![0, 3, 2, 1]));
        assert_eq!(o.next(), Some(2));
        assert_eq!(o.next(), None);
        assert_eq!(o.cardinality(), &BigUint::from(2u32));
    }
}
