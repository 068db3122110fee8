//! Permutation groups given by generators: orbits, stabilizer chains and exact orders.
use crate::permutable::{FHashMap, Perm, Permutable, Permutation};
use num_bigint::BigUint;
use num_traits::One;
use std::collections::BTreeSet;
use std::ops::Deref;

pub mod orbit;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermutationGroup {
    pub len: usize,
    pub generators: Vec<Perm>,
}

pub struct OrbitStabilizerInfo {
    pub orbit: Vec<usize>,
    pub stabilizer: PermutationGroup,
    /// For each orbit element, a group element mapping it back to the base point.
    pub from: FHashMap<usize, Perm>,
}

/// Basic orbits with transversals, for the base points in order.
#[derive(Clone, Debug)]
pub struct StabilizerChain(Vec<(Vec<usize>, FHashMap<usize, Perm>)>);

impl Deref for StabilizerChain {
    type Target = Vec<(Vec<usize>, FHashMap<usize, Perm>)>;
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl StabilizerChain {
    /// Group order: product of basic orbit lengths.
    pub fn order(&self) -> BigUint {
        self.iter().map(|(orbit, _)| BigUint::from(orbit.len())).product()
    }
}

impl PermutationGroup {
    pub fn new(len: usize, generators: Vec<Perm>) -> Self {
        for g in &generators {
            assert_eq!(len, g.len());
        }
        Self { len, generators }
    }

    pub fn trivial(len: usize) -> Self { Self::new(len, vec![]) }

    pub fn is_trivial(&self) -> bool { self.generators.iter().all(|g| g.is_identity()) }

    /// Return an element's orbit and stabilizer group.
    /// See K. H. Rosen: Computational Group Theory, p. 79.
    pub fn orbit_stabilizer(&self, element: usize) -> OrbitStabilizerInfo {
        let mut orbit = vec![element];
        let mut from = FHashMap::default();
        from.insert(element, Perm::identity(self.len));
        let mut generators = BTreeSet::new();
        let mut i = 0;
        while let Some(&e) = orbit.get(i) {
            let from_e = from[&e].clone();
            for g in self.generators.iter() {
                let new = g * e;
                let from_new = &from_e * &g.inverse();
                debug_assert_eq!(&from_new * new, element);
                if let Some(from_new_) = from.get(&new) {
                    let stab_g = &from_new * &from_new_.inverse();
                    if !stab_g.is_identity() {
                        debug_assert_eq!(&stab_g * element, element);
                        generators.insert(stab_g);
                    }
                } else {
                    from.insert(new, from_new);
                    orbit.push(new);
                }
            }

            i += 1;
        }

        let stabilizer = PermutationGroup::new(self.len, generators.into_iter().collect());
        OrbitStabilizerInfo { orbit, stabilizer, from }
    }

    /// Stabilizer chain for base 0..self.len, cut off once the stabilizer is trivial.
    /// OPTIMIZE: Use Schreier-Sims algorithm to compute stabilizer chain more quickly.
    pub fn lex_stabilizer_chain(&self) -> StabilizerChain {
        let mut group = self.clone();
        let mut chain = vec![];
        for element in 0..self.len {
            if group.is_trivial() {
                break;
            }
            let OrbitStabilizerInfo { orbit, stabilizer, from } = group.orbit_stabilizer(element);
            chain.push((orbit, from));
            group = stabilizer;
        }
        StabilizerChain(chain)
    }

    /// Exact number of group elements.
    pub fn order(&self) -> BigUint {
        if self.is_trivial() { BigUint::one() } else { self.lex_stabilizer_chain().order() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_stabilizer_trivial() {
        let trivial = PermutationGroup::trivial(3);
        let r = trivial.orbit_stabilizer(2);
        assert_eq!(r.orbit, vec![2]);
        assert_eq!(r.stabilizer.generators, vec![]);
        assert_eq!(trivial.order(), BigUint::one());
    }

    #[test]
    fn orbit_stabilizer() {
        let g = PermutationGroup::new(4, vec![Perm::from(vec![0, 1, 3, 2])]);
        let r = g.orbit_stabilizer(2);
        assert_eq!(r.orbit, vec![2, 3]);
        assert_eq!(r.stabilizer.generators, vec![]);
        for (e, from_e) in r.from.iter() {
            assert_eq!(from_e * *e, 2);
        }
    }

    #[test]
    fn orbit_stabilizer2() {
        let generators = vec![Perm::from(vec![0, 1, 3, 2]), Perm::from(vec![1, 0, 2, 3])];
        let g = PermutationGroup::new(4, generators);
        let r = g.orbit_stabilizer(2);
        assert_eq!(r.orbit, vec![2, 3]);
        assert_eq!(r.stabilizer.generators, vec![Perm::from(vec![1, 0, 2, 3])]);
        assert_eq!(g.order(), BigUint::from(4u32));
        assert_eq!(g.orbit_stabilizer(0).orbit, vec![0, 1]);
    }

    #[test]
    fn symmetric_group_order() {
        let cycle = Perm::from(vec![1, 2, 3, 4, 0]);
        let swap = Perm::create_swap(5, 0, 1);
        let s5 = PermutationGroup::new(5, vec![cycle.clone(), swap]);
        assert_eq!(s5.order(), BigUint::from(120u32));
        let c5 = PermutationGroup::new(5, vec![cycle]);
        assert_eq!(c5.order(), BigUint::from(5u32));
    }
}
