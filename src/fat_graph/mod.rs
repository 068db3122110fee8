//! Fat graphs (combinatorial maps) on darts `0..n`.
//!
//! A fat graph is a triple of permutations `(vp, ep, fp)` with `fp[ep[vp[i]]] == i` for every
//! dart `i`, where `ep` is a fixed-point-free involution. Cycles of `vp` are vertices, cycles of
//! `ep` are edges and cycles of `fp` are faces. Alongside the permutations, the structure keeps
//! dense vertex and face labels, their degrees, and the angle of each dart within its face
//! (0 on the smallest dart of the face, increasing along `fp`).
//!
//! Storage is preallocated: all arrays have the same capacity, darts `0..n` are active and
//! slots beyond `n` are scratch space for the mutators in [`mutate`].
use crate::error::{Cell, FatGraphError, Result};
use crate::permutable::cycles::{check_permutation, cycle, cycle_string, cycle_type, cycles,
                                dense_cycles_and_angles, invert, num_cycles, parse_cycles,
                                perm_from_cycles, UNSET};
use crate::permutable::{FHashMap, Permutable, Permutation};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

pub mod canon;
pub mod mutate;

/// Index of a half-edge.
pub type Dart = usize;

#[derive(Clone, Debug)]
pub struct FatGraph {
    n: usize,
    nv: usize,
    nf: usize,
    vp: Vec<Dart>,
    ep: Vec<Dart>,
    fp: Vec<Dart>,
    /// Dart to vertex label.
    vl: Vec<usize>,
    /// Dart to face label.
    fl: Vec<usize>,
    /// Dart to angle within its face.
    fa: Vec<usize>,
    /// Vertex label to degree.
    vd: Vec<usize>,
    /// Face label to degree.
    fd: Vec<usize>,
}

impl FatGraph {
    /// Fat graph from all three permutations, which must satisfy `fp[ep[vp[i]]] == i`.
    pub fn new(vp: Vec<Dart>, ep: Vec<Dart>, fp: Vec<Dart>) -> Result<Self> {
        Self::complete(Some(vp), Some(ep), Some(fp))
    }

    pub fn from_vertices_and_edges(vp: Vec<Dart>, ep: Vec<Dart>) -> Result<Self> {
        Self::complete(Some(vp), Some(ep), None)
    }

    pub fn from_edges_and_faces(ep: Vec<Dart>, fp: Vec<Dart>) -> Result<Self> {
        Self::complete(None, Some(ep), Some(fp))
    }

    pub fn from_vertices_and_faces(vp: Vec<Dart>, fp: Vec<Dart>) -> Result<Self> {
        Self::complete(Some(vp), None, Some(fp))
    }

    /// Fat graph from permutations in cycle notation, any two of which suffice.
    /// Darts missing from a cycle string are fixed points.
    ///
    /// ```
    /// use fat_graphs::FatGraph;
    /// let torus = FatGraph::from_cycles(Some("(0,2,1,3)"), Some("(0,1)(2,3)"), None).unwrap();
    /// assert_eq!(torus.face_permutation(), &[2, 3, 1, 0]);
    /// assert_eq!(torus.genus(), 1);
    /// ```
    pub fn from_cycles(vp: Option<&str>, ep: Option<&str>, fp: Option<&str>) -> Result<Self> {
        let parsed = [vp, ep, fp].map(|s| s.map(parse_cycles).transpose());
        let [vp, ep, fp] = parsed;
        let (vp, ep, fp) = (vp?, ep?, fp?);
        let n = [&vp, &ep, &fp].into_iter().flatten().flatten().flatten().map(|&x| x + 1).max().unwrap_or(0);
        let dense = |c: Option<Vec<Vec<usize>>>| c.map(|c| perm_from_cycles(&c, n)).transpose();
        Self::complete(dense(vp)?, dense(ep)?, dense(fp)?)
    }

    /// Fat graph with a single face `0, 1, ..., n - 1` whose edges glue the two occurrences of
    /// each symbol of the word.
    ///
    /// ```
    /// use fat_graphs::FatGraph;
    /// let g = FatGraph::from_unicellular_word(&[0, 1, 0, 2, 3, 4, 1, 4, 3, 2]).unwrap();
    /// assert_eq!(g.to_string(), "Fat graph with passport ([10], [4, 2, 2, 2])\n \
    ///     vp = (0,3)(1,2,6,7)(4,9)(5,8)\n ep = (0,2)(1,6)(3,9)(4,8)(5,7)\n fp = (0,1,2,3,4,5,6,7,8,9)");
    /// ```
    pub fn from_unicellular_word(word: &[usize]) -> Result<Self> {
        let n = word.len();
        if n % 2 != 0 {
            return Err(FatGraphError::InvalidWord(format!("odd length {n}")));
        }
        let fp = (0..n).map(|i| (i + 1) % n).collect_vec();
        let mut ep = vec![UNSET; n];
        let mut vp = vec![UNSET; n];
        let mut first = FHashMap::default();
        for (i, &x) in word.iter().enumerate() {
            match first.get(&x).copied() {
                None => { first.insert(x, i); }
                Some(j) if ep[j] == UNSET => {
                    ep[i] = j;
                    ep[j] = i;
                    vp[(j + 1) % n] = i;
                    vp[(i + 1) % n] = j;
                }
                Some(_) => return Err(FatGraphError::InvalidWord(format!("symbol {x} occurs more than twice"))),
            }
        }
        if let Some(i) = ep.iter().position(|&j| j == UNSET) {
            return Err(FatGraphError::InvalidWord(format!("symbol {} occurs only once", word[i])));
        }
        Self::new(vp, ep, fp)
    }

    fn complete(vp: Option<Vec<Dart>>, ep: Option<Vec<Dart>>, fp: Option<Vec<Dart>>) -> Result<Self> {
        let len = |p: &Option<Vec<Dart>>| p.as_ref().map(Vec::len);
        let n = len(&vp).or(len(&ep)).or(len(&fp)).unwrap_or(0);
        if [&vp, &ep, &fp].into_iter().any(|p| len(p).is_some_and(|l| l != n)) {
            let [v, e, f] = [&vp, &ep, &fp].map(|p| len(p).unwrap_or(n));
            return Err(FatGraphError::LengthMismatch { vp: v, ep: e, fp: f });
        }
        for (p, cell) in [(&vp, Cell::Vertex), (&ep, Cell::Edge), (&fp, Cell::Face)] {
            if let Some(p) = p {
                check_permutation(p).map_err(|source| FatGraphError::InvalidPermutation { cell, source })?;
            }
        }
        let (vp, ep, fp) = match (vp, ep, fp) {
            (Some(vp), Some(ep), Some(fp)) => (vp, ep, fp),
            (Some(vp), Some(ep), None) => {
                let vp_inv = invert(&vp);
                let fp = (0..n).map(|i| vp_inv[ep[i]]).collect();
                (vp, ep, fp)
            }
            (Some(vp), None, Some(fp)) => {
                let (vp_inv, fp_inv) = (invert(&vp), invert(&fp));
                let ep = (0..n).map(|i| fp_inv[vp_inv[i]]).collect();
                (vp, ep, fp)
            }
            (None, Some(ep), Some(fp)) => {
                let fp_inv = invert(&fp);
                let vp = (0..n).map(|i| ep[fp_inv[i]]).collect();
                (vp, ep, fp)
            }
            _ => return Err(FatGraphError::MissingPermutations),
        };
        Self::from_triple(vp, ep, fp)
    }

    fn from_triple(vp: Vec<Dart>, ep: Vec<Dart>, fp: Vec<Dart>) -> Result<Self> {
        let n = vp.len();
        for i in 0..n {
            if ep[i] == i || ep[ep[i]] != i {
                return Err(FatGraphError::InvalidEdgePermutation(i));
            }
            if fp[ep[vp[i]]] != i {
                return Err(FatGraphError::InconsistentTriple { dart: i, actual: fp[ep[vp[i]]] });
            }
        }
        let (vl, _, mut vd) = dense_cycles_and_angles(&vp);
        let (fl, fa, mut fd) = dense_cycles_and_angles(&fp);
        let (nv, nf) = (vd.len(), fd.len());
        vd.resize(n, UNSET);
        fd.resize(n, UNSET);
        let out = Self { n, nv, nf, vp, ep, fp, vl, fl, fa, vd, fd };
        out.check_connected()?;
        Ok(out)
    }

    /// Grows the preallocated storage to hold at least `max_darts` darts.
    pub fn realloc(&mut self, max_darts: usize) {
        if max_darts <= self.capacity() {
            return;
        }
        for a in [&mut self.vp, &mut self.ep, &mut self.fp, &mut self.vl, &mut self.fl, &mut self.fa,
                  &mut self.vd, &mut self.fd] {
            a.resize(max_darts, UNSET);
        }
    }

    pub fn with_capacity(mut self, max_darts: usize) -> Self {
        self.realloc(max_darts);
        self
    }

    pub fn capacity(&self) -> usize { self.vp.len() }

    pub fn num_darts(&self) -> usize { self.n }

    pub fn num_edges(&self) -> usize { self.n / 2 }

    /// The empty map is the sphere with one vertex and one face.
    pub fn num_vertices(&self) -> usize { if self.n == 0 { 1 } else { self.nv } }

    pub fn num_faces(&self) -> usize { if self.n == 0 { 1 } else { self.nf } }

    pub fn vertex_permutation(&self) -> &[Dart] { &self.vp[..self.n] }

    pub fn edge_permutation(&self) -> &[Dart] { &self.ep[..self.n] }

    pub fn face_permutation(&self) -> &[Dart] { &self.fp[..self.n] }

    /// Degrees indexed by vertex label.
    pub fn vertex_degrees(&self) -> &[usize] { &self.vd[..self.nv] }

    /// Degrees indexed by face label.
    pub fn face_degrees(&self) -> &[usize] { &self.fd[..self.nf] }

    pub fn vertex_label(&self, dart: Dart) -> usize { self.vl[dart] }

    pub fn face_label(&self, dart: Dart) -> usize { self.fl[dart] }

    pub fn face_angle(&self, dart: Dart) -> usize { self.fa[dart] }

    pub fn vertex_degree(&self, dart: Dart) -> usize { self.vd[self.vl[dart]] }

    pub fn face_degree(&self, dart: Dart) -> usize { self.fd[self.fl[dart]] }

    /// Vertex degrees in decreasing order.
    pub fn vertex_profile(&self) -> Vec<usize> { self.vertex_degrees().iter().copied().sorted_unstable_by(|a, b| b.cmp(a)).collect() }

    /// Face degrees in decreasing order.
    pub fn face_profile(&self) -> Vec<usize> { self.face_degrees().iter().copied().sorted_unstable_by(|a, b| b.cmp(a)).collect() }

    pub fn vertices(&self) -> Vec<Vec<Dart>> { cycles(self.vertex_permutation()) }

    pub fn edges(&self) -> Vec<(Dart, Dart)> {
        (0..self.n).filter(|&i| i < self.ep[i]).map(|i| (i, self.ep[i])).collect()
    }

    pub fn faces(&self) -> Vec<Vec<Dart>> { cycles(self.face_permutation()) }

    /// `V - E + F`.
    pub fn euler_characteristic(&self) -> isize {
        self.num_vertices() as isize - (self.n / 2) as isize + self.num_faces() as isize
    }

    pub fn genus(&self) -> usize {
        let chi = self.euler_characteristic();
        debug_assert!(chi <= 2 && chi % 2 == 0);
        ((2 - chi) / 2) as usize
    }

    /// The dual fat graph, exchanging vertices and faces.
    pub fn dual(&self) -> Result<Self> {
        Self::new(invert(self.face_permutation()), self.edge_permutation().to_vec(),
                  invert(self.vertex_permutation()))
    }

    /// Relabels dart `i` as `r[i]`, conjugating all permutations. Vertex and face labels
    /// travel with their darts.
    pub fn relabel(&mut self, r: &[usize]) -> Result<()> {
        if r.len() != self.n {
            return Err(FatGraphError::LengthMismatch { vp: self.n, ep: self.n, fp: r.len() });
        }
        check_permutation(r)?;
        self.conjugate(r);
        Ok(())
    }

    fn conjugate(&mut self, r: &[usize]) {
        let n = self.n;
        for p in [&mut self.vp, &mut self.ep, &mut self.fp] {
            let mut q = vec![0; n];
            for i in 0..n {
                q[r[i]] = r[p[i]];
            }
            p[..n].copy_from_slice(&q);
        }
        for l in [&mut self.vl, &mut self.fl] {
            let mut m = vec![0; n];
            for i in 0..n {
                m[r[i]] = l[i];
            }
            l[..n].copy_from_slice(&m);
        }
        let (_, fa, _) = dense_cycles_and_angles(&self.fp[..n]);
        self.fa[..n].copy_from_slice(&fa);
    }

    /// Same permutations, labels, degrees and angles.
    pub fn identical(&self, other: &Self) -> bool {
        let n = self.n;
        self == other
            && self.vl[..n] == other.vl[..n]
            && self.fl[..n] == other.fl[..n]
            && self.fa[..n] == other.fa[..n]
            && self.vertex_degrees() == other.vertex_degrees()
            && self.face_degrees() == other.face_degrees()
    }

    fn check_connected(&self) -> Result<()> {
        if self.n == 0 {
            return Ok(());
        }
        let mut seen = vec![false; self.n];
        let mut stack = vec![0];
        seen[0] = true;
        while let Some(i) = stack.pop() {
            for j in [self.vp[i], self.ep[i]] {
                if !seen[j] {
                    seen[j] = true;
                    stack.push(j);
                }
            }
        }
        match seen.iter().position(|s| !s) {
            Some(i) => Err(FatGraphError::Disconnected(i)),
            None => Ok(()),
        }
    }

    /// Verifies every structural invariant, reporting the first violation found.
    pub fn check(&self) -> Result<()> {
        let n = self.n;
        if n > self.capacity() || n % 2 != 0 {
            return Err(FatGraphError::InconsistentCounts(format!("{n} darts with capacity {}", self.capacity())));
        }
        for (p, cell) in [(self.vertex_permutation(), Cell::Vertex), (self.edge_permutation(), Cell::Edge),
                          (self.face_permutation(), Cell::Face)] {
            check_permutation(p).map_err(|source| FatGraphError::InvalidPermutation { cell, source })?;
        }
        let (vp, ep, fp) = (&self.vp, &self.ep, &self.fp);
        for i in 0..n {
            if ep[i] == i || ep[ep[i]] != i {
                return Err(FatGraphError::InvalidEdgePermutation(i));
            }
            if fp[ep[vp[i]]] != i {
                return Err(FatGraphError::InconsistentTriple { dart: i, actual: fp[ep[vp[i]]] });
            }
        }
        self.check_cells(Cell::Vertex, vp, &self.vl, &self.vd, self.nv)?;
        self.check_cells(Cell::Face, fp, &self.fl, &self.fd, self.nf)?;

        let mut face_min = vec![UNSET; self.nf];
        for i in 0..n {
            face_min[self.fl[i]] = face_min[self.fl[i]].min(i);
        }
        for i in 0..n {
            let j = fp[i];
            let expected = if j == face_min[self.fl[j]] { 0 } else { self.fa[i] + 1 };
            if self.fa[j] != expected {
                return Err(FatGraphError::Inconsistent {
                    dart: j, what: "face angle", expected: expected.to_string(), actual: self.fa[j].to_string(),
                });
            }
        }
        self.check_connected()
    }

    fn check_cells(&self, cell: Cell, p: &[Dart], labels: &[usize], degrees: &[usize], count: usize) -> Result<()> {
        let p = &p[..self.n];
        let cycles = num_cycles(p);
        if cycles != count {
            return Err(FatGraphError::InconsistentCounts(format!("{count} {cell} labels for {cycles} {cell} cycles")));
        }
        let what = match cell {
            Cell::Vertex => "vertex label",
            _ => "face label",
        };
        let mut counted = vec![0; count];
        for i in 0..self.n {
            if labels[i] >= count {
                return Err(FatGraphError::Inconsistent {
                    dart: i, what, expected: format!("< {count}"), actual: labels[i].to_string(),
                });
            }
            if labels[p[i]] != labels[i] {
                return Err(FatGraphError::Inconsistent {
                    dart: p[i], what, expected: labels[i].to_string(), actual: labels[p[i]].to_string(),
                });
            }
            counted[labels[i]] += 1;
        }
        for (label, (&c, &d)) in counted.iter().zip(&degrees[..count]).enumerate() {
            if c == 0 || c != d {
                return Err(FatGraphError::InconsistentCounts(format!("{cell} {label} has degree {c}, recorded {d}")));
            }
        }
        Ok(())
    }
}

/// Compares the permutations only: labels depend on how a fat graph was built.
impl PartialEq for FatGraph {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.nv == other.nv && self.nf == other.nf
            && self.vertex_permutation() == other.vertex_permutation()
            && self.edge_permutation() == other.edge_permutation()
            && self.face_permutation() == other.face_permutation()
    }
}

impl Eq for FatGraph {}

impl Display for FatGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fat graph with passport ({:?}, {:?})\n vp = {}\n ep = {}\n fp = {}",
               self.face_profile(), self.vertex_profile(),
               cycle_string(self.vertex_permutation()),
               cycle_string(self.edge_permutation()),
               cycle_string(self.face_permutation()))
    }
}

/// Darts are the permuted indices; `permuted` relabels darts.
impl Permutable for FatGraph {
    fn len(&self) -> usize { self.n }

    fn swap(&mut self, i: usize, j: usize) {
        let mut r = (0..self.n).collect_vec();
        r.swap(i, j);
        self.conjugate(&r);
    }

    fn permuted(&self, x: &impl Permutation) -> Self {
        assert_eq!(self.len(), x.len());
        let mut out = self.clone();
        out.conjugate(&x.iter().collect_vec());
        out
    }
}

impl FatGraph {
    /// Cycle type of the vertex permutation, as `(degree, multiplicity)` pairs in decreasing degree.
    pub fn vertex_passport(&self) -> Vec<(usize, usize)> {
        cycle_type(self.vertex_permutation()).into_iter().dedup_with_count().map(|(c, d)| (d, c)).collect()
    }

    pub(crate) fn vertex_successor(&self, dart: Dart) -> Dart { self.vp[dart] }

    pub(crate) fn face_successor(&self, dart: Dart) -> Dart { self.fp[dart] }

    #[cfg(test)]
    pub(crate) fn vertex_cycle(&self, start: Dart) -> impl Iterator<Item=Dart> + '_ { cycle(&self.vp, start) }

    pub(crate) fn face_cycle(&self, start: Dart) -> impl Iterator<Item=Dart> + '_ { cycle(&self.fp, start) }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::permutable::Perm;

    pub fn torus() -> FatGraph {
        FatGraph::from_cycles(Some("(0,2,1,3)"), Some("(0,1)(2,3)"), Some("(0,2,1,3)")).unwrap()
    }

    pub fn unicellular_words() -> Vec<Vec<usize>> {
        vec![vec![0, 1, 0, 1, 2, 3, 2, 3],
             vec![0, 1, 0, 2, 1, 3, 2, 3],
             vec![0, 1, 0, 2, 3, 1, 2, 3],
             vec![0, 1, 2, 3, 0, 1, 2, 3],
             vec![0, 0, 1, 2, 3, 2, 3, 1],
             vec![0, 0, 1, 2, 3, 3, 1, 2],
             vec![0, 1, 0, 2, 3, 1, 3, 2],
             vec![0, 1, 2, 0, 3, 2, 1, 3],
             vec![0, 1, 0, 2, 3, 4, 1, 4, 3, 2],
             vec![0, 1, 2, 3, 0, 4, 1, 2, 3, 4],
             vec![0, 1, 2, 3, 4, 0, 1, 2, 3, 4]]
    }

    /// Unicellular fat graphs with their one-vertex duals, and a few with several faces and vertices.
    pub fn some_fat_graphs() -> Vec<FatGraph> {
        let mut out = vec![];
        for word in unicellular_words() {
            let g = FatGraph::from_unicellular_word(&word).unwrap();
            let dual = g.dual().unwrap();
            out.push(g);
            out.push(dual);
        }
        out.push(FatGraph::from_cycles(Some("(0,9,5,6,7,4,8,1,2,3)"), Some("(0,2)(1,3)(4,6)(5,7)(8,9)"),
                                       Some("(0,1,2,3,8)(4,5,6,7,9)")).unwrap());
        out.push(FatGraph::from_cycles(
            Some("(0,15,3,6,8)(1,14,18,10,9,12,5,19)(2,7,4,17,11)(13,16)"),
            Some("(0,1)(2,3)(4,5)(6,7)(8,9)(10,11)(12,13)(14,15)(16,17)(18,19)"),
            Some("(0,19,14)(1,8,10,17,13,9,6,2,15)(3,11,18,5,7)(4,12,16)")).unwrap());
        out
    }

    #[test]
    fn torus_queries() {
        let g = torus();
        g.check().unwrap();
        assert_eq!((g.num_darts(), g.num_edges(), g.num_vertices(), g.num_faces()), (4, 2, 1, 1));
        assert_eq!(g.euler_characteristic(), 0);
        assert_eq!(g.genus(), 1);
        assert_eq!(g.vertex_degrees(), &[4]);
        assert_eq!(g.face_degrees(), &[4]);
        assert_eq!(g.edges(), vec![(0, 1), (2, 3)]);
        assert_eq!(g.faces(), vec![vec![0, 2, 1, 3]]);
        assert_eq!(g.to_string(), "Fat graph with passport ([4], [4])\n vp = (0,2,1,3)\n ep = (0,1)(2,3)\n fp = (0,2,1,3)");
    }

    #[test]
    fn empty_map_is_a_sphere() {
        let g = FatGraph::new(vec![], vec![], vec![]).unwrap();
        g.check().unwrap();
        assert_eq!((g.num_darts(), g.num_edges(), g.num_vertices(), g.num_faces()), (0, 0, 1, 1));
        assert_eq!(g.euler_characteristic(), 2);
        assert_eq!(g.genus(), 0);
    }

    #[test]
    fn any_two_permutations_suffice() {
        let g = torus();
        let vp = g.vertex_permutation().to_vec();
        let ep = g.edge_permutation().to_vec();
        let fp = g.face_permutation().to_vec();
        assert_eq!(FatGraph::from_vertices_and_edges(vp.clone(), ep.clone()).unwrap(), g);
        assert_eq!(FatGraph::from_edges_and_faces(ep.clone(), fp.clone()).unwrap(), g);
        assert_eq!(FatGraph::from_vertices_and_faces(vp, fp).unwrap(), g);

        let sphere = FatGraph::from_cycles(None, Some("(0,1)"), Some("(0)(1)")).unwrap();
        assert_eq!(sphere.vertex_permutation(), &[1, 0]);
        assert_eq!(sphere.to_string(), "Fat graph with passport ([1, 1], [2])\n vp = (0,1)\n ep = (0,1)\n fp = ()");
    }

    #[test]
    fn construction_errors() {
        assert_eq!(FatGraph::from_cycles(Some("(0,1)"), None, None), Err(FatGraphError::MissingPermutations));
        assert_eq!(FatGraph::new(vec![0, 1], vec![1, 0], vec![0]),
                   Err(FatGraphError::LengthMismatch { vp: 2, ep: 2, fp: 1 }));
        assert!(matches!(FatGraph::new(vec![0, 0], vec![1, 0], vec![1, 0]),
                         Err(FatGraphError::InvalidPermutation { cell: Cell::Vertex, .. })));
        assert_eq!(FatGraph::from_cycles(Some("(0,1)"), Some("(0)(1)"), None),
                   Err(FatGraphError::InvalidEdgePermutation(0)));
        assert!(matches!(FatGraph::new(vec![1, 0], vec![1, 0], vec![1, 0]),
                         Err(FatGraphError::InconsistentTriple { .. })));
        assert_eq!(FatGraph::from_cycles(Some("(0,1)(2,3)"), Some("(0,1)(2,3)"), None),
                   Err(FatGraphError::Disconnected(2)));
        assert!(matches!(FatGraph::from_unicellular_word(&[0, 1, 0]), Err(FatGraphError::InvalidWord(_))));
        assert!(matches!(FatGraph::from_unicellular_word(&[0, 0, 0, 0]), Err(FatGraphError::InvalidWord(_))));
        assert!(matches!(FatGraph::from_unicellular_word(&[0, 1, 2, 0]), Err(FatGraphError::InvalidWord(_))));
    }

    #[test]
    fn fixtures_are_consistent() {
        for g in some_fat_graphs() {
            g.check().unwrap();
            assert_eq!(g.vertex_degrees().iter().sum::<usize>(), g.num_darts());
            assert_eq!(g.face_degrees().iter().sum::<usize>(), g.num_darts());
            assert_eq!(g.dual().unwrap().dual().unwrap(), g);
            let d = g.dual().unwrap();
            assert_eq!(d.vertex_profile(), g.face_profile());
            assert_eq!(d.euler_characteristic(), g.euler_characteristic());
        }
    }

    #[test]
    fn degrees_of_larger_example() {
        let g = some_fat_graphs().pop().unwrap();
        assert_eq!(g.face_profile(), vec![9, 5, 3, 3]);
        assert_eq!(g.vertex_profile(), vec![8, 5, 5, 2]);
        assert_eq!(g.vertex_passport(), vec![(8, 1), (5, 2), (2, 1)]);
        assert_eq!(g.genus(), 2);
    }

    #[test]
    fn relabel_conjugates() {
        for (seed, g) in some_fat_graphs().into_iter().enumerate() {
            g.test_left_group_action_axioms(seed);
            let h = g.shuffled(seed);
            h.check().unwrap();
            assert_eq!(h.face_profile(), g.face_profile());
            assert_eq!(h.vertex_profile(), g.vertex_profile());
            let p = crate::PermutationUniform::<Perm>::new(g.len()).sample(seed);
            let mut k = g.clone();
            k.relabel(&p.0).unwrap();
            assert_eq!(k, &p * &g);
            k.relabel(&p.inverse().0).unwrap();
            assert!(k.identical(&g));
        }
    }

    #[test]
    fn relabel_errors() {
        let mut g = torus();
        assert!(g.relabel(&[0, 1, 2]).is_err());
        assert!(g.relabel(&[0, 1, 1, 3]).is_err());
        g.check().unwrap();
    }

    #[test]
    fn check_reports_corruption() {
        let mut g = torus();
        g.fa[0] = 1;
        assert!(matches!(g.check(), Err(FatGraphError::Inconsistent { what: "face angle", .. })));
        let mut g = torus();
        g.vd[0] = 3;
        assert!(matches!(g.check(), Err(FatGraphError::InconsistentCounts(_))));
        let mut g = torus();
        g.nf = 2;
        assert!(matches!(g.check(), Err(FatGraphError::InconsistentCounts(_))));
    }

    #[test]
    fn realloc_keeps_structure() {
        let g = torus();
        let h = g.clone().with_capacity(20);
        assert_eq!(h.capacity(), 20);
        assert!(h.identical(&g));
        h.check().unwrap();
    }
}
