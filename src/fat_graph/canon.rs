//! Canonical labellings and automorphism groups of fat graphs.
//!
//! A labelling is grown from a start dart by walking faces breadth-first: the start dart gets
//! label 0, each newly reached edge gets the next even label for the dart met first and the
//! following odd label for its partner. The sequence of labels in walk order, together with the
//! face degrees in walk order, determines the fat graph up to isomorphism, so comparing these
//! sequences across candidate start darts yields a canonical form. Candidate starts are first
//! narrowed to darts maximizing a cheap invariant (see [`FatGraph::good_starts`]).
use crate::fat_graph::{Dart, FatGraph};
use crate::group::orbit::PermutationGroupOrbit;
use crate::permutable::cycles::{invert, UNSET};
use crate::permutable::{Canonizable, Perm};
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Result of a breadth-first face walk from a start dart.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Labelling {
    /// Labels of the darts in the order they were visited.
    pub walk: Vec<usize>,
    /// Degrees of the faces in the order they were visited.
    pub face_degrees: Vec<usize>,
    /// Dart to label.
    pub relabelling: Vec<usize>,
}

impl Labelling {
    /// Lexicographic comparison of `(walk, face_degrees)`; smaller is better.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.walk.cmp(&other.walk).then_with(|| self.face_degrees.cmp(&other.face_degrees))
    }
}

/// Larger is better. See [`FatGraph::good_starts`].
type StartKey = (usize, usize, bool, usize, usize);

struct Walker {
    relabelling: Vec<usize>,
    walk: Vec<usize>,
    face_degrees: Vec<usize>,
    wait: VecDeque<Dart>,
    next: usize,
}

impl Walker {
    fn face(&mut self, g: &FatGraph, start: Dart) {
        self.walk.push(self.relabelling[start]);
        let mut degree = 1;
        let mut i = g.fp[start];
        while i != start {
            if self.relabelling[i] == UNSET {
                let j = g.ep[i];
                if self.relabelling[j] != UNSET {
                    self.relabelling[i] = self.relabelling[j] + 1;
                } else {
                    self.relabelling[i] = self.next;
                    self.next += 2;
                    self.wait.push_back(j);
                }
            }
            self.walk.push(self.relabelling[i]);
            degree += 1;
            i = g.fp[i];
        }
        self.face_degrees.push(degree);
    }
}

impl FatGraph {
    /// Canonical labelling grown from `start`.
    pub fn canonical_labelling_from(&self, start: Dart) -> Labelling {
        let n = self.n;
        let mut w = Walker {
            relabelling: vec![UNSET; n],
            walk: Vec::with_capacity(n),
            face_degrees: Vec::with_capacity(self.nf),
            wait: VecDeque::from([self.ep[start]]),
            next: 2,
        };
        w.relabelling[start] = 0;
        w.face(self, start);
        while let Some(i) = w.wait.pop_front() {
            if w.relabelling[i] != UNSET {
                continue;
            }
            w.relabelling[i] = w.relabelling[self.ep[i]] + 1;
            w.face(self, i);
        }
        debug_assert_eq!(w.walk.len(), n);
        Labelling { walk: w.walk, face_degrees: w.face_degrees, relabelling: w.relabelling }
    }

    /// Invariant of a start dart `i` with partner `j = ep[i]`, or `None` if `i` is never a
    /// good start. With several vertices, starts are darts of edges joining two distinct
    /// vertices, ranked by the two vertex degrees, whether the edge also separates two faces,
    /// and the two face degrees. With one vertex and several faces, starts are darts of edges
    /// separating two faces, ranked by the face degrees. With one vertex and one face, every
    /// dart is a start and shorter face distances to the partner rank higher.
    fn start_key(&self, i: Dart) -> Option<StartKey> {
        let j = self.ep[i];
        if self.nv > 1 {
            (self.vl[i] != self.vl[j]).then(|| (self.vd[self.vl[i]], self.vd[self.vl[j]], self.fl[i] != self.fl[j],
                                                 self.fd[self.fl[i]], self.fd[self.fl[j]]))
        } else if self.nf > 1 {
            (self.fl[i] != self.fl[j]).then(|| (self.fd[self.fl[i]], self.fd[self.fl[j]], false, 0, 0))
        } else {
            let gap = (self.fa[j] + self.n - self.fa[i]) % self.n;
            Some((self.n - gap, 0, false, 0, 0))
        }
    }

    /// Darts maximizing the start invariant. If `first` is given, it comes first in the result,
    /// and `None` is returned if another dart beats it.
    pub fn good_starts(&self, first: Option<Dart>) -> Option<Vec<Dart>> {
        let mut best = match first {
            Some(i0) => Some(self.start_key(i0)?),
            None => None,
        };
        let mut starts: Vec<Dart> = first.into_iter().collect();
        for i in 0..self.n {
            if Some(i) == first {
                continue;
            }
            let Some(key) = self.start_key(i) else { continue };
            match best.map(|b| key.cmp(&b)) {
                Some(Ordering::Less) => {}
                Some(Ordering::Equal) => starts.push(i),
                Some(Ordering::Greater) if first.is_some() => return None,
                _ => {
                    best = Some(key);
                    starts.clear();
                    starts.push(i);
                }
            }
        }
        Some(starts)
    }

    /// Whether `i0` starts a minimal canonical labelling. If so, also returns the automorphism
    /// group found along the way, ready to iterate over orbit representatives of all darts.
    pub fn is_canonical(&self, i0: Dart) -> Option<PermutationGroupOrbit> {
        let roots = self.good_starts(Some(i0))?;
        if roots.len() == 1 {
            return Some(PermutationGroupOrbit::trivial(self.n));
        }
        let mut group = PermutationGroupOrbit::new(self.n, vec![], roots);
        let first = group.next();
        debug_assert_eq!(first, Some(i0));
        let best = self.canonical_labelling_from(i0);
        let best_inverse = invert(&best.relabelling);
        while let Some(i) = group.next() {
            let cur = self.canonical_labelling_from(i);
            match cur.cmp_key(&best) {
                Ordering::Less => return None,
                Ordering::Equal => group.add_generator(automorphism(&cur, &best_inverse)),
                Ordering::Greater => {}
            }
        }
        group.reset_iterator();
        Some(group)
    }

    /// Minimal labelling over all good starts, with the automorphism group.
    fn search(&self) -> (Option<Labelling>, PermutationGroupOrbit) {
        let roots = self.good_starts(None).unwrap_or_default();
        let mut group = PermutationGroupOrbit::new(self.n, vec![], roots);
        let Some(i0) = group.next() else {
            group.reset_iterator();
            return (None, group);
        };
        let mut best = self.canonical_labelling_from(i0);
        let mut best_inverse = invert(&best.relabelling);
        while let Some(i) = group.next() {
            let cur = self.canonical_labelling_from(i);
            match cur.cmp_key(&best) {
                Ordering::Less => {
                    best_inverse = invert(&cur.relabelling);
                    best = cur;
                }
                Ordering::Equal => group.add_generator(automorphism(&cur, &best_inverse)),
                Ordering::Greater => {}
            }
        }
        group.reset_iterator();
        (Some(best), group)
    }

    /// The automorphism group, ready to iterate over orbit representatives of all darts.
    pub fn automorphism_group(&self) -> PermutationGroupOrbit {
        self.search().1
    }

    /// The minimal labelling over all good starts.
    pub fn canonical_labelling(&self) -> Option<Labelling> {
        self.search().0
    }
}

/// Maps each dart labelled `l` by `cur` to the dart labelled `l` by the best labelling.
fn automorphism(cur: &Labelling, best_inverse: &[Dart]) -> Perm {
    Perm(cur.relabelling.iter().map(|&l| best_inverse[l]).collect())
}

impl Canonizable for FatGraph {
    fn canon(&self) -> Perm {
        match self.canonical_labelling() {
            Some(l) => Perm(l.relabelling),
            None => Perm(vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fat_graph::tests::{some_fat_graphs, torus};
    use crate::permutable::Permutable;
    use itertools::Itertools;
    use num_bigint::BigUint;

    fn from_word(word: &[usize]) -> FatGraph {
        FatGraph::from_unicellular_word(word).unwrap()
    }

    #[test]
    fn torus_labelling() {
        let g = torus();
        let l = g.canonical_labelling_from(0);
        assert_eq!(l.walk, vec![0, 2, 1, 3]);
        assert_eq!(l.face_degrees, vec![4]);
        assert_eq!(l.relabelling, vec![0, 1, 2, 3]);
        assert_eq!(g.automorphism_group().cardinality(), &BigUint::from(4u32));
    }

    #[test]
    fn unicellular_automorphism_orders() {
        for (word, order) in [(vec![0, 1, 0, 1, 2, 3, 2, 3], 2u32), (vec![0, 1, 0, 2, 1, 3, 2, 3], 1),
                              (vec![0, 1, 0, 2, 3, 1, 2, 3], 1), (vec![0, 1, 2, 3, 0, 1, 2, 3], 8),
                              (vec![0, 1, 2, 3, 0, 4, 1, 2, 3, 4], 2)] {
            let g = from_word(&word);
            assert_eq!(g.automorphism_group().cardinality(), &BigUint::from(order), "{word:?}");
            assert_eq!(g.dual().unwrap().automorphism_group().cardinality(), &BigUint::from(order));
        }
    }

    #[test]
    fn two_faces_swapped_by_automorphism() {
        let g = FatGraph::from_cycles(Some("(0,9,5,6,7,4,8,1,2,3)"), Some("(0,2)(1,3)(4,6)(5,7)(8,9)"),
                                      Some("(0,1,2,3,8)(4,5,6,7,9)")).unwrap();
        let a = g.automorphism_group();
        assert_eq!(a.cardinality(), &BigUint::from(2u32));
        assert_eq!(a.generators(), &[Perm::from_cycles("(0,4)(1,5)(2,6)(3,7)(8,9)", 10).unwrap()]);
        assert_eq!(a.to_string(), "PermutationGroupOrbit(10, [(0,4)(1,5)(2,6)(3,7)(8,9)])");
    }

    #[test]
    fn canonical_darts_of_symmetric_torus_map() {
        let g = FatGraph::from_cycles(Some("(0,8,6,4,3,7)(1,9,11,5,2,10)"),
                                      Some("(0,1)(2,3)(4,5)(6,7)(8,9)(10,11)"),
                                      Some("(0,10,9)(2,4,11)(1,7,8)(3,5,6)")).unwrap();
        let canonical = (0..g.num_darts()).filter_map(|i| g.is_canonical(i).map(|a| (i, a))).collect_vec();
        assert_eq!(canonical.len(), 4);
        for (_, a) in &canonical {
            assert_eq!(a.cardinality(), &BigUint::from(4u32));
        }
        assert_eq!(g.automorphism_group().cardinality(), &BigUint::from(4u32));
    }

    #[test]
    fn canonical_darts_form_one_orbit() {
        for g in some_fat_graphs() {
            let order = g.automorphism_group().cardinality().clone();
            let canonical = (0..g.num_darts()).filter(|&i| g.is_canonical(i).is_some()).count();
            assert_eq!(BigUint::from(canonical), order);
            for i in 0..g.num_darts() {
                if let Some(a) = g.is_canonical(i) {
                    assert_eq!(a.cardinality(), &order);
                }
            }
        }
    }

    #[test]
    fn automorphisms_fix_the_map() {
        for g in some_fat_graphs() {
            let a = g.automorphism_group();
            let best = g.canonical_labelling().unwrap();
            for aut in a.generators() {
                let mut h = g.clone();
                h.relabel(&aut.0).unwrap();
                assert_eq!(h, g);
                assert_eq!(h.canonical_labelling().unwrap().cmp_key(&best), Ordering::Equal);
            }
        }
    }

    #[test]
    fn orbit_representatives_cover_all_darts() {
        for g in some_fat_graphs() {
            let mut a = g.automorphism_group();
            let order: usize = a.cardinality().try_into().unwrap();
            let reps = a.by_ref().collect_vec();
            assert_eq!(reps.len() * order, g.num_darts());
        }
    }

    #[test]
    fn canon() {
        for (seed, g) in some_fat_graphs().into_iter().enumerate() {
            let (y, _) = g.test_canon(seed);
            assert!(g.canonized().is_isomorphic(&y));
            assert_eq!(y.automorphism_group().cardinality(), g.automorphism_group().cardinality());
        }
    }

    #[test]
    fn non_isomorphic_maps_differ() {
        let graphs = some_fat_graphs();
        for (a, b) in graphs.iter().tuple_combinations() {
            let same = a.num_darts() == b.num_darts()
                && (0..b.num_darts()).any(|s| {
                    let r = b.canonical_labelling_from(s).relabelling;
                    a.permuted(&a.canon()) == b.permuted(&Perm(r))
                });
            assert_eq!(a.is_isomorphic(b), same);
        }
        assert!(torus().is_isomorphic(&torus().dual().unwrap()));
    }
}
