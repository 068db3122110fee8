//! Isomorphism-free enumeration of connected fat graphs by canonical augmentation.
//!
//! Every fat graph of genus `g` with `nf` faces and `nv` vertices is reached from a small seed
//! in three stages: face trisections raise the genus of a one-vertex one-face map, face splits
//! add faces, and vertex splits add vertices. A child is kept only if its newest dart `n`
//! starts a canonical labelling, which makes the edge just added the canonical one to remove;
//! augmentations are tried from one dart per orbit of the parent's automorphism group. Together
//! this yields each isomorphism class exactly once.
//!
//! The search runs on a single [`FatGraph`] that is mutated in place and restored with the
//! exact inverse mutations while backtracking.
use crate::error::{FatGraphError, Result};
use crate::fat_graph::{Dart, FatGraph};
use crate::group::orbit::PermutationGroupOrbit;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Which fat graphs to enumerate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Enumeration {
    pub genus: usize,
    pub num_faces: usize,
    pub num_vertices: usize,
    /// Vertex splits never create vertices of lower degree than this.
    pub vertex_min_degree: usize,
    /// Also yield the fat graphs with fewer faces and/or vertices met along the way.
    pub intermediate: bool,
}

impl Enumeration {
    pub fn new(genus: usize, num_faces: usize, num_vertices: usize) -> Self {
        Self { genus, num_faces, num_vertices, vertex_min_degree: 1, intermediate: false }
    }

    pub fn vertex_min_degree(mut self, degree: usize) -> Self {
        self.vertex_min_degree = degree;
        self
    }

    pub fn intermediate(mut self, intermediate: bool) -> Self {
        self.intermediate = intermediate;
        self
    }

    pub fn iter(&self) -> Result<FatGraphs> { FatGraphs::new(self) }

    /// Number of fat graphs and the sum of the inverses of their automorphism group orders.
    pub fn count(&self) -> Result<(usize, BigRational)> { count_and_weight(self.iter()?) }

    /// Edges of every fat graph enumerated: `2g + nf + nv - 2`, or `None` without any face or vertex.
    pub fn num_edges(&self) -> Option<usize> {
        (2 * self.genus + self.num_faces + self.num_vertices).checked_sub(2)
            .filter(|_| self.num_faces > 0 && self.num_vertices > 0)
    }
}

/// Shorthand for `Enumeration::new(genus, num_faces, num_vertices)` with the given options.
pub fn fat_graphs(genus: usize, num_faces: usize, num_vertices: usize, vertex_min_degree: usize,
                  intermediate: bool) -> Result<FatGraphs> {
    Enumeration::new(genus, num_faces, num_vertices)
        .vertex_min_degree(vertex_min_degree)
        .intermediate(intermediate)
        .iter()
}

/// Number of items and the sum of the inverses of their automorphism group orders.
pub fn count_and_weight(graphs: impl IntoIterator<Item=Result<(FatGraph, PermutationGroupOrbit)>>) -> Result<(usize, BigRational)> {
    let mut count = 0;
    let mut weight = BigRational::zero();
    for item in graphs {
        let (_, aut) = item?;
        count += 1;
        weight += BigRational::new(BigInt::from(1), BigInt::from(aut.cardinality().clone()));
    }
    Ok((count, weight))
}

/// Counts for every `1 <= faces <= max_faces` and `1 <= vertices <= max_vertices`, each
/// computed by its own enumeration, in parallel.
pub fn counts_table(genus: usize, max_faces: usize, max_vertices: usize, vertex_min_degree: usize)
                    -> Result<Vec<((usize, usize), (usize, BigRational))>> {
    let cells: Vec<_> = (1..=max_faces).flat_map(|f| (1..=max_vertices).map(move |v| (f, v))).collect();
    cells.into_par_iter()
        .map(|(f, v)| {
            let counts = Enumeration::new(genus, f, v).vertex_min_degree(vertex_min_degree).count()?;
            Ok(((f, v), counts))
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stage {
    /// Raise the genus of a one-vertex one-face map.
    Trisect,
    SplitFace,
    SplitVertex,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Augmentation {
    Trisect(Dart, Dart, Dart),
    SplitFace(Dart, Dart),
    SplitVertex(Dart, Dart),
}

/// Position of a frame in its sequence of candidate augmentations: the orbit representative
/// `i`, the current second dart `j` and the number of steps taken from `i` to `j`. Trisections
/// also track the third dart `k` and its steps from `j`.
#[derive(Clone, Copy, Debug)]
struct Cursor {
    i: Dart,
    j: Dart,
    sj: usize,
    k: Dart,
    sk: usize,
}

/// One node of the search in one stage.
#[derive(Debug)]
struct Frame {
    stage: Stage,
    /// Remaining augmentations of this frame's stage.
    depth: usize,
    /// Remaining augmentations of the later stages.
    faces: usize,
    vertices: usize,
    aut: PermutationGroupOrbit,
    entered: bool,
    cursor: Option<Cursor>,
    /// Augmentation currently applied for a child frame above this one.
    applied: Option<Augmentation>,
}

impl Frame {
    fn new(stage: Stage, depth: usize, faces: usize, vertices: usize, aut: PermutationGroupOrbit) -> Self {
        Self { stage, depth, faces, vertices, aut, entered: false, cursor: None, applied: None }
    }

    fn next_augmentation(&mut self, g: &FatGraph, min_degree: usize) -> Option<Augmentation> {
        loop {
            if let Some(c) = &mut self.cursor {
                match self.stage {
                    Stage::Trisect => {
                        let d = g.face_degree(c.i);
                        if c.sj < d {
                            if c.sk < d - c.sj + usize::from(c.i != c.j) {
                                let out = Augmentation::Trisect(c.i, c.j, c.k);
                                c.k = g.face_successor(c.k);
                                c.sk += 1;
                                return Some(out);
                            }
                            c.j = g.face_successor(c.j);
                            c.sj += 1;
                            c.k = c.j;
                            c.sk = 0;
                            continue;
                        }
                    }
                    Stage::SplitFace => {
                        if c.sj < g.face_degree(c.i) {
                            let out = Augmentation::SplitFace(c.i, c.j);
                            c.j = g.face_successor(c.j);
                            c.sj += 1;
                            return Some(out);
                        }
                    }
                    Stage::SplitVertex => {
                        if c.sj + min_degree <= g.vertex_degree(c.i) {
                            let out = Augmentation::SplitVertex(c.i, c.j);
                            c.j = g.vertex_successor(c.j);
                            c.sj += 1;
                            return Some(out);
                        }
                    }
                }
            }
            let i = self.aut.next()?;
            let mut j = i;
            if self.stage == Stage::SplitVertex {
                for _ in 1..min_degree {
                    j = g.vertex_successor(j);
                }
            }
            self.cursor = Some(Cursor { i, j, sj: 0, k: j, sk: 0 });
        }
    }
}

impl Augmentation {
    fn apply(self, g: &mut FatGraph) -> Result<()> {
        match self {
            Augmentation::Trisect(i, j, k) => g.trisect_face(i, j, k),
            Augmentation::SplitFace(i, j) => g.split_face(i, j),
            Augmentation::SplitVertex(i, j) => g.split_vertex(i, j),
        }
    }

    /// Undoes this augmentation, whose first new dart is `x`.
    fn undo(self, g: &mut FatGraph, x: Dart) -> Result<()> {
        match self {
            Augmentation::Trisect(..) => g.remove_face_trisection(x),
            Augmentation::SplitFace(..) => g.remove_edge(x),
            Augmentation::SplitVertex(..) => g.contract_edge(x),
        }
    }
}

/// Iterator over fat graphs with their automorphism groups. See [`Enumeration`].
#[derive(Debug)]
pub struct FatGraphs {
    graph: FatGraph,
    stack: Vec<Frame>,
    min_degree: usize,
    intermediate: bool,
    /// The empty map, yielded once when it is the only result.
    pending: Option<FatGraph>,
}

impl FatGraphs {
    pub fn new(e: &Enumeration) -> Result<Self> {
        let &Enumeration { genus, num_faces, num_vertices, vertex_min_degree, intermediate } = e;
        if num_faces == 0 || num_vertices == 0 {
            return Err(FatGraphError::InvalidParameters(format!(
                "at least one face and one vertex are required, got {num_faces} faces and {num_vertices} vertices")));
        }
        let mut out = Self { graph: FatGraph::new(vec![], vec![], vec![])?, stack: vec![], min_degree: vertex_min_degree,
                             intermediate, pending: None };
        let (seed, genus_left, faces, vertices) = if genus == 0 && num_faces == 1 && num_vertices == 1 {
            if vertex_min_degree == 0 {
                out.pending = Some(out.graph.clone());
            }
            debug!(genus, num_faces, num_vertices, "only the empty fat graph");
            return Ok(out);
        } else if genus == 0 && num_vertices > 1 {
            (FatGraph::from_cycles(Some("(0)(1)"), Some("(0,1)"), Some("(0,1)"))?, 0, num_faces - 1, num_vertices - 2)
        } else if genus == 0 {
            (FatGraph::from_cycles(Some("(0,1)"), Some("(0,1)"), Some("(0)(1)"))?, 0, num_faces - 2, 0)
        } else {
            (FatGraph::from_unicellular_word(&[0, 1, 0, 1])?, genus - 1, num_faces - 1, num_vertices - 1)
        };
        let max_darts = 2 * (2 * genus + num_faces + num_vertices - 2);
        out.graph = seed.with_capacity(max_darts);
        debug!(genus, num_faces, num_vertices, vertex_min_degree, intermediate, max_darts, seed = %out.graph,
               "enumerating fat graphs");
        let aut = out.graph.automorphism_group();
        out.stack.push(Frame::new(Stage::Trisect, genus_left, faces, vertices, aut));
        Ok(out)
    }

    /// Advances the search to the next fat graph to yield.
    fn advance(&mut self) -> Result<Option<(FatGraph, PermutationGroupOrbit)>> {
        while let Some(frame) = self.stack.last_mut() {
            if !frame.entered {
                frame.entered = true;
                match frame.stage {
                    Stage::Trisect if frame.depth == 0 => {
                        frame.stage = Stage::SplitFace;
                        frame.depth = frame.faces;
                        frame.entered = false;
                        continue;
                    }
                    Stage::SplitFace if self.intermediate || frame.depth == 0 => {
                        let child = Frame::new(Stage::SplitVertex, frame.vertices, 0, 0, frame.aut.clone());
                        self.stack.push(child);
                        continue;
                    }
                    Stage::SplitVertex if self.intermediate || frame.depth == 0 => {
                        return Ok(Some((self.graph.clone(), frame.aut.clone())));
                    }
                    _ => {}
                }
            }

            let x = self.graph.num_darts();
            if let Some(applied) = frame.applied.take() {
                let added = match applied {
                    Augmentation::Trisect(..) => 4,
                    _ => 2,
                };
                applied.undo(&mut self.graph, x - added)?;
            }
            if frame.depth == 0 {
                self.stack.pop();
                continue;
            }

            let n = self.graph.num_darts();
            let Some(augmentation) = frame.next_augmentation(&self.graph, self.min_degree.max(1)) else {
                self.stack.pop();
                continue;
            };
            augmentation.apply(&mut self.graph)?;
            match self.graph.is_canonical(n) {
                Some(aut) => {
                    trace!(?augmentation, darts = self.graph.num_darts(), "canonical extension");
                    frame.applied = Some(augmentation);
                    let child = Frame::new(frame.stage, frame.depth - 1, frame.faces, frame.vertices, aut);
                    self.stack.push(child);
                }
                None => augmentation.undo(&mut self.graph, n)?,
            }
        }
        Ok(None)
    }
}

impl Iterator for FatGraphs {
    type Item = Result<(FatGraph, PermutationGroupOrbit)>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(empty) = self.pending.take() {
            return Some(Ok((empty, PermutationGroupOrbit::trivial(0))));
        }
        match self.advance() {
            Ok(item) => item.map(Ok),
            Err(e) => {
                self.stack.clear();
                Some(Err(e))
            }
        }
    }
}
