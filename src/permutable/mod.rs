//! Ordered objects / permutable classes, and dense permutations acting on them.
use fxhash::FxBuildHasher;
#[cfg(test)]
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ops::Mul;

pub mod cycles;

pub(crate) type FBuildHasher = FxBuildHasher;
pub(crate) type FHashMap<K, V> = HashMap<K, V, FBuildHasher>;
pub(crate) type FHashSet<K> = HashSet<K, FBuildHasher>;

/// An ordered object. Each type implementing this represents a permutable class.
pub trait Permutable: Clone {
    /// Length of the ordered object. The order of the corresponding permutable class.
    fn len(&self) -> usize;

    /// Swap two indices of the ordered object.
    fn swap(&mut self, i: usize, j: usize);

    /// Permutes the ordered object by a given permutation: index `i` becomes `x(i)`.
    fn permuted(&self, x: &impl Permutation) -> Self;

    /// Shuffles the ordered object by a random permutation uniformly sampled with the given seed.
    fn shuffled(&self, seed: usize) -> Self {
        self.permuted(&PermutationUniform::<Perm>::new(self.len()).sample(seed))
    }

    /// Test left group action axioms for this ordered object.
    /// Any implementation should pass this test for any ordered object and seed.
    #[cfg(test)]
    fn test_left_group_action_axioms(&self, seed: usize)
    where
        Self: Eq + Debug,
    {
        let (p0, p1) = &PermutationUniform::<Perm>::new(self.len()).samples(2, seed).into_iter().collect_tuple().unwrap();
        assert_eq!((p0 * self).len(), self.len());
        assert_eq!(&(&Perm::identity(self.len()) * self), self);
        assert_eq!(p1 * &(p0 * self), &(p1 * p0) * self);
    }
}

/// Permutation a given length.
pub trait Permutation: Permutable + From<Vec<usize>> + Clone + Debug + Eq {
    fn identity(len: usize) -> Self;

    fn inverse(&self) -> Self;

    fn iter(&self) -> impl Iterator<Item=usize> + '_;

    fn apply(&self, i: usize) -> usize;

    fn is_identity(&self) -> bool {
        self.iter().enumerate().all(|(i, x)| i == x)
    }

    fn create_swap(len: usize, i: usize, j: usize) -> Self {
        let mut out = Self::identity(len);
        out.swap(i, j);
        out
    }
}

/// Permutation a given length, densely represented.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Perm(pub Vec<usize>);

impl Perm {
    /// Parses cycle notation such as `(0,2,1,3)(4)`. Elements not mentioned are fixed points
    /// up to the given minimum length.
    pub fn from_cycles(s: &str, min_len: usize) -> Result<Self, crate::PermutationError> {
        Ok(Self(cycles::perm_from_cycles(&cycles::parse_cycles(s)?, min_len)?))
    }

    pub fn cycles(&self) -> Vec<Vec<usize>> { cycles::cycles(&self.0) }

    pub fn as_slice(&self) -> &[usize] { &self.0 }
}

impl Display for Perm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&cycles::cycle_string(&self.0))
    }
}

impl Permutable for Perm {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    fn permuted(&self, x: &impl Permutation) -> Self {
        Perm((0..self.len()).map(|i| x.apply(self.0[i])).collect())
    }
}

impl From<Vec<usize>> for Perm {
    fn from(items: Vec<usize>) -> Self {
        debug_assert!(cycles::is_permutation(&items));
        Self(items)
    }
}

impl Permutation for Perm {
    fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    fn inverse(&self) -> Self {
        Self(cycles::invert(&self.0))
    }

    fn iter(&self) -> impl Iterator<Item=usize> + '_ {
        self.0.iter().cloned()
    }

    fn apply(&self, i: usize) -> usize {
        self.0[i]
    }
}

impl Mul<usize> for &Perm {
    type Output = usize;

    fn mul(self, rhs: usize) -> usize { self.apply(rhs) }
}

/// Left action: `&p * x` relabels index `i` of `x` as `p(i)`. For permutations, `&p * &q` is `p∘q`.
impl<P: Permutable> Mul<&P> for &Perm {
    type Output = P;

    fn mul(self, rhs: &P) -> P { P::permuted(rhs, self) }
}

/// Uniform distribution over permutations of a given length, sampled with the modern
/// Fisher-Yates shuffle in O(len).
#[derive(Clone, Debug)]
pub struct PermutationUniform<P: Permutation = Perm> {
    pub len: usize,
    phantom: PhantomData<P>,
}

impl<P: Permutation> PermutationUniform<P> {
    pub fn new(len: usize) -> Self { Self { len, phantom: PhantomData } }

    pub fn sample(&self, seed: usize) -> P {
        self.sample_with(&mut Pcg64Mcg::seed_from_u64(seed as u64))
    }

    pub fn samples(&self, count: usize, seed: usize) -> Vec<P> {
        let mut rng = Pcg64Mcg::seed_from_u64(seed as u64);
        (0..count).map(|_| self.sample_with(&mut rng)).collect()
    }

    pub fn sample_with(&self, rng: &mut impl Rng) -> P {
        let mut p = P::identity(self.len);
        for i in (1..self.len).rev() {
            let j = rng.gen_range(0..=i);
            p.swap(i, j);
        }
        p
    }
}

/// Ordered object with a canonical ordering function allowing to compute canonical labellings,
/// and therefore canonized objects.
pub trait Canonizable: Permutable {
    /// Returns the canonical ordering of the given object.
    fn canon(&self) -> Perm;

    fn canonized_and_canon(&self) -> (Self, Perm) {
        let c = self.canon();
        (&c * self, c)
    }

    fn canonized(&self) -> Self {
        self.canonized_and_canon().0
    }

    fn is_isomorphic(&self, other: &Self) -> bool
    where
        Self: Eq,
    {
        self.len() == other.len() && self.canonized() == other.canonized()
    }

    #[cfg(test)]
    /// Any implementation should pass this test for any seed.
    fn test_canon(&self, seed: usize) -> (Self, Perm)
    where
        Self: Eq + Debug,
    {
        self.test_left_group_action_axioms(seed);

        let p = PermutationUniform::new(self.len()).sample(seed);

        // Canonical labelling axiom, expressed in 4 equivalent ways:
        let y = &p * self;
        let y_canon = y.canon();
        assert_eq!(y.permuted(&y_canon), self.permuted(&self.canon()));
        assert_eq!(&y_canon * &y, &self.canon() * self);
        assert_eq!(y.canonized(), self.canonized());
        assert!(y.is_isomorphic(self));

        (y, y_canon)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn perm_and_uniform() {
        test_perm_and_uniform::<Perm>()
    }

    pub fn test_perm_and_uniform<P: Permutation>() {
        let uniform = PermutationUniform::<P>::new(9);
        let fixed = P::from(vec![8, 5, 0, 2, 1, 3, 4, 6, 7]);
        fixed.test_left_group_action_axioms(0);
        for perm in uniform.samples(100, 0) {
            assert!(cycles::is_permutation(&perm.iter().collect_vec()));
            assert_eq!(perm.inverse().inverse(), perm);
            perm.test_left_group_action_axioms(0);
        }
    }

    #[test]
    fn composition_applies_right_factor_first() {
        let p = Perm::from(vec![1, 2, 0]);
        let q = Perm::from(vec![0, 2, 1]);
        let pq = &p * &q;
        for i in 0..3 {
            assert_eq!(&pq * i, &p * (&q * i));
        }
        assert!((&p * &p.inverse()).is_identity());
    }

    #[test]
    fn samples_are_reproducible_and_uniform_enough() {
        let uniform = PermutationUniform::<Perm>::new(3);
        assert_eq!(uniform.samples(10, 7), uniform.samples(10, 7));
        let counts = uniform.samples(6000, 1).into_iter().counts();
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&c| c > 800 && c < 1200));
    }

    #[test]
    fn display_uses_cycle_notation() {
        let p = Perm::from_cycles("(0,2,1)(4,5)", 7).unwrap();
        assert_eq!(p, Perm(vec![2, 0, 1, 3, 5, 4, 6]));
        assert_eq!(p.to_string(), "(0,2,1)(4,5)");
        assert_eq!(Perm::identity(3).to_string(), "()");
    }
}
