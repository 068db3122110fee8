//! Local surgeries on fat graphs, each with an exact inverse.
//!
//! | operation | inverse | darts | vertices | faces |
//! |---|---|---|---|---|
//! | [`FatGraph::split_face`] | [`FatGraph::remove_edge`] | +2 | | +1 |
//! | [`FatGraph::split_vertex`] | [`FatGraph::contract_edge`] | +2 | +1 | |
//! | [`FatGraph::trisect_face`] | [`FatGraph::remove_face_trisection`] | +4 | | |
//!
//! New darts are always numbered `n, n + 1, ...` and new vertex/face labels are `nv`/`nf`, so
//! applying the inverse to the most recent darts restores every array exactly. Mutators never
//! grow storage; see [`FatGraph::realloc`].
use crate::error::{Cell, FatGraphError, Result};
use crate::fat_graph::{Dart, FatGraph};

impl FatGraph {
    /// Inserts an edge between the corners before `i` and before `j` of a common face, splitting
    /// it in two. The new darts are `x = n` (in the face of `i`) and `y = n + 1` (in the new face
    /// of `j`, labelled `nf`). For `i == j`, the new face is a monogon made of `y`.
    ///
    /// ```
    /// use fat_graphs::FatGraph;
    /// let mut g = FatGraph::from_cycles(Some("(0,2,1,3)"), Some("(0,1)(2,3)"), None).unwrap().with_capacity(6);
    /// g.split_face(2, 0).unwrap();
    /// assert_eq!(g.to_string(), "Fat graph with passport ([4, 2], [6])\n \
    ///     vp = (0,4,2,5,1,3)\n ep = (0,1)(2,3)(4,5)\n fp = (0,5)(1,3,4,2)");
    /// g.remove_edge(4).unwrap();
    /// assert_eq!(g.num_faces(), 1);
    /// ```
    pub fn split_face(&mut self, i: Dart, j: Dart) -> Result<()> {
        self.check_dart(i)?;
        self.check_dart(j)?;
        if self.fl[i] != self.fl[j] {
            return Err(FatGraphError::NotSameCell { cell: Cell::Face, i, j });
        }
        self.ensure_capacity(self.n + 2)?;

        let (x, y) = (self.n, self.n + 1);
        let ii = self.ep[self.vp[i]];
        let jj = self.ep[self.vp[j]];
        self.ep[x] = y;
        self.ep[y] = x;
        self.n += 2;
        let f = self.nf;
        self.nf += 1;

        if i == j {
            self.fp[ii] = x;
            self.fp[x] = i;
            self.fp[y] = y;
            self.vp[x] = self.vp[i];
            self.vp[y] = x;
            self.vp[i] = y;
            self.vl[x] = self.vl[i];
            self.vl[y] = self.vl[i];
            self.fl[x] = self.fl[i];
            self.fl[y] = f;
            self.fd[self.fl[i]] += 1;
            self.fd[f] = 1;
            self.vd[self.vl[i]] += 2;
        } else {
            self.fp[jj] = x;
            self.fp[x] = i;
            self.fp[ii] = y;
            self.fp[y] = j;
            self.vp[y] = self.vp[i];
            self.vp[i] = y;
            self.vp[x] = self.vp[j];
            self.vp[j] = x;
            self.vl[x] = self.vl[j];
            self.vl[y] = self.vl[i];
            self.fl[x] = self.fl[i];
            let dy = self.relabel_face(y, f);
            let fx = self.fl[x];
            self.fd[fx] = self.fd[fx] + 2 - dy;
            self.fd[f] = dy;
            self.vd[self.vl[x]] += 1;
            self.vd[self.vl[y]] += 1;
        }
        self.reset_face_angles(x);
        self.reset_face_angles(y);
        Ok(())
    }

    /// Removes the edge of dart `i`, merging the two faces on its sides. Inverse of
    /// [`FatGraph::split_face`]: the edge must be the last one (darts `n - 2, n - 1`) and one of
    /// its faces must carry the last face label.
    pub fn remove_edge(&mut self, i: Dart) -> Result<()> {
        self.check_dart(i)?;
        let j = self.ep[i];
        let (fi, fj) = (self.fl[i], self.fl[j]);
        if fi == fj {
            return Err(FatGraphError::NotSeparating { cell: Cell::Face, dart: i });
        }
        if i.min(j) != self.n - 2 || fi.max(fj) != self.nf - 1 {
            return Err(FatGraphError::NotLastEdge { cell: Cell::Face, dart: i });
        }
        if self.n == 2 {
            return Err(FatGraphError::LastEdge);
        }

        let ii = self.ep[self.vp[i]];
        let jj = self.ep[self.vp[j]];
        let merged = self.fd[fi] + self.fd[fj] - 2;
        let start = if self.fd[fi] == 1 {
            self.fp[jj] = self.fp[j];
            self.vp[self.fp[j]] = self.vp[j];
            self.fp[j]
        } else if self.fd[fj] == 1 {
            self.fp[ii] = self.fp[i];
            self.vp[self.fp[i]] = self.vp[i];
            self.fp[i]
        } else {
            self.fp[ii] = self.fp[j];
            self.fp[jj] = self.fp[i];
            self.vp[self.fp[j]] = self.vp[i];
            self.vp[self.fp[i]] = self.vp[j];
            self.fp[i]
        };
        self.vd[self.vl[i]] -= 1;
        self.vd[self.vl[j]] -= 1;
        self.n -= 2;
        self.nf -= 1;

        let f = fi.min(fj);
        let d = self.relabel_face(start, f);
        debug_assert_eq!(d, merged);
        self.fd[f] = d;
        self.reset_face_angles(start);
        Ok(())
    }

    /// Inserts an edge splitting the vertex of `i` and `j` in two: the corners from `i` up to
    /// (excluding) `j` stay, the others move to a new vertex labelled `nv`. New darts are
    /// `x = n` (at the vertex of `i`) and `y = n + 1` (at the new vertex). For `i == j`, the new
    /// vertex is a leaf made of `y`.
    pub fn split_vertex(&mut self, i: Dart, j: Dart) -> Result<()> {
        self.check_dart(i)?;
        self.check_dart(j)?;
        if self.vl[i] != self.vl[j] {
            return Err(FatGraphError::NotSameCell { cell: Cell::Vertex, i, j });
        }
        self.ensure_capacity(self.n + 2)?;

        let (x, y) = (self.n, self.n + 1);
        let ii = self.vp[i];
        let jj = self.vp[j];
        self.ep[x] = y;
        self.ep[y] = x;
        self.n += 2;
        let v = self.nv;
        self.nv += 1;

        if i == j {
            self.vp[x] = ii;
            self.vp[i] = x;
            self.vp[y] = y;
            self.fp[y] = i;
            self.fp[x] = y;
            self.fp[self.ep[ii]] = x;
            self.fl[x] = self.fl[i];
            self.fl[y] = self.fl[i];
            self.vl[x] = self.vl[i];
            self.vl[y] = v;
            self.vd[self.vl[i]] += 1;
            self.vd[v] = 1;
            self.fd[self.fl[i]] += 2;
            self.reset_face_angles(x);
        } else {
            self.vp[x] = jj;
            self.vp[i] = x;
            self.vp[y] = ii;
            self.vp[j] = y;
            self.fp[self.ep[jj]] = x;
            self.fp[x] = j;
            self.fp[self.ep[ii]] = y;
            self.fp[y] = i;
            self.fl[x] = self.fl[j];
            self.fl[y] = self.fl[i];
            self.vl[x] = self.vl[i];
            let dy = self.relabel_vertex(y, v);
            let vx = self.vl[x];
            self.vd[vx] = self.vd[vx] + 2 - dy;
            self.vd[v] = dy;
            self.fd[self.fl[x]] += 1;
            self.fd[self.fl[y]] += 1;
            self.reset_face_angles(x);
            if self.fl[x] != self.fl[y] {
                self.reset_face_angles(y);
            }
        }
        Ok(())
    }

    /// Contracts the edge of dart `i`, merging the two vertices at its ends. Inverse of
    /// [`FatGraph::split_vertex`]: the edge must be the last one and one of its ends must carry
    /// the last vertex label.
    pub fn contract_edge(&mut self, i: Dart) -> Result<()> {
        self.check_dart(i)?;
        let j = self.ep[i];
        let (vi, vj) = (self.vl[i], self.vl[j]);
        if vi == vj {
            return Err(FatGraphError::NotSeparating { cell: Cell::Vertex, dart: i });
        }
        if i.min(j) != self.n - 2 || vi.max(vj) != self.nv - 1 {
            return Err(FatGraphError::NotLastEdge { cell: Cell::Vertex, dart: i });
        }
        if self.n == 2 {
            return Err(FatGraphError::LastEdge);
        }

        let ii = self.ep[self.vp[i]];
        let jj = self.ep[self.vp[j]];
        let merged = self.vd[vi] + self.vd[vj] - 2;
        let (start, touched) = if self.vd[vi] == 1 {
            self.vp[self.fp[i]] = self.vp[j];
            self.fp[jj] = self.fp[i];
            (self.vp[j], [self.fp[i], self.fp[i]])
        } else if self.vd[vj] == 1 {
            self.vp[self.fp[j]] = self.vp[i];
            self.fp[ii] = self.fp[j];
            (self.vp[i], [self.fp[j], self.fp[j]])
        } else {
            self.vp[self.fp[i]] = self.vp[i];
            self.vp[self.fp[j]] = self.vp[j];
            self.fp[ii] = self.fp[i];
            self.fp[jj] = self.fp[j];
            (self.vp[i], [self.fp[i], self.fp[j]])
        };
        self.fd[self.fl[i]] -= 1;
        self.fd[self.fl[j]] -= 1;
        self.n -= 2;
        self.nv -= 1;

        let v = vi.min(vj);
        let d = self.relabel_vertex(start, v);
        debug_assert_eq!(d, merged);
        self.vd[v] = d;
        for t in touched {
            self.reset_face_angles(t);
        }
        Ok(())
    }

    /// Adds two crossing edges inside the face of `i`, `j` and `k`, raising the genus by one
    /// while keeping the vertex and face counts. The darts must be in counter-clockwise order
    /// around their face (repetitions allowed). New darts are `x, y, xx, yy = n, ..., n + 3`
    /// with edges `(x, y)` and `(xx, yy)`; the face reads `x xx i .. j y k .. yy` around
    /// the corners involved.
    ///
    /// ```
    /// use fat_graphs::FatGraph;
    /// let mut g = FatGraph::from_cycles(Some("(0,2,1,3)"), Some("(0,1)(2,3)"), None).unwrap().with_capacity(8);
    /// g.trisect_face(0, 2, 1).unwrap();
    /// assert_eq!(g.genus(), 2);
    /// assert_eq!(g.to_string(), "Fat graph with passport ([8], [8])\n \
    ///     vp = (0,7,2,6,5,1,4,3)\n ep = (0,1)(2,3)(4,5)(6,7)\n fp = (0,5,1,3,7,2,4,6)");
    /// g.remove_face_trisection(4).unwrap();
    /// assert_eq!(g.genus(), 1);
    /// ```
    pub fn trisect_face(&mut self, i: Dart, j: Dart, k: Dart) -> Result<()> {
        self.check_dart(i)?;
        self.check_dart(j)?;
        self.check_dart(k)?;
        if self.fl[i] != self.fl[j] {
            return Err(FatGraphError::NotSameCell { cell: Cell::Face, i, j });
        }
        if self.fl[i] != self.fl[k] {
            return Err(FatGraphError::NotSameCell { cell: Cell::Face, i, j: k });
        }
        let (ai, aj, ak) = (self.fa[i], self.fa[j], self.fa[k]);
        if !((ai <= aj && aj <= ak) || (aj <= ak && ak <= ai) || (ak <= ai && ai <= aj)) {
            return Err(FatGraphError::NotCounterClockwise { i, j, k });
        }
        self.ensure_capacity(self.n + 4)?;

        let ii = self.ep[self.vp[i]];
        let jj = self.ep[self.vp[j]];
        let kk = self.ep[self.vp[k]];
        let (x, y, xx, yy) = (self.n, self.n + 1, self.n + 2, self.n + 3);
        self.n += 4;
        self.ep[x] = y;
        self.ep[y] = x;
        self.ep[xx] = yy;
        self.ep[yy] = xx;
        let f = self.fl[i];
        for d in [x, y, xx, yy] {
            self.fl[d] = f;
        }
        self.vl[x] = self.vl[k];
        self.vl[xx] = self.vl[j];
        self.vl[y] = self.vl[j];
        self.vl[yy] = self.vl[i];
        self.fd[f] += 4;
        self.vd[self.vl[i]] += 1;
        self.vd[self.vl[j]] += 2;
        self.vd[self.vl[k]] += 1;

        let (vp, fp) = (&mut self.vp, &mut self.fp);
        if i == j && j == k {
            vp[x] = vp[j];
            vp[yy] = x;
            vp[y] = yy;
            vp[xx] = y;
            vp[j] = xx;
            fp[kk] = x;
            fp[x] = xx;
            fp[xx] = y;
            fp[y] = yy;
            fp[yy] = j;
        } else if i == j {
            vp[yy] = vp[j];
            vp[y] = yy;
            vp[xx] = y;
            vp[j] = xx;
            vp[x] = vp[k];
            vp[k] = x;
            fp[ii] = yy;
            fp[yy] = j;
            fp[kk] = x;
            fp[x] = xx;
            fp[xx] = y;
            fp[y] = k;
        } else if j == k {
            vp[yy] = vp[i];
            vp[i] = yy;
            vp[y] = vp[k];
            vp[xx] = y;
            vp[x] = xx;
            vp[k] = x;
            fp[ii] = yy;
            fp[yy] = x;
            fp[x] = xx;
            fp[xx] = i;
            fp[jj] = y;
            fp[y] = k;
        } else if k == i {
            vp[y] = vp[j];
            vp[xx] = y;
            vp[j] = xx;
            vp[x] = vp[i];
            vp[yy] = x;
            vp[i] = yy;
            fp[kk] = x;
            fp[x] = xx;
            fp[xx] = i;
            fp[jj] = y;
            fp[y] = yy;
            fp[yy] = j;
        } else {
            vp[yy] = vp[i];
            vp[i] = yy;
            vp[y] = vp[j];
            vp[xx] = y;
            vp[j] = xx;
            vp[x] = vp[k];
            vp[k] = x;
            fp[kk] = x;
            fp[x] = xx;
            fp[xx] = i;
            fp[jj] = y;
            fp[y] = k;
            fp[ii] = yy;
            fp[yy] = j;
        }
        self.reset_face_angles(i);
        Ok(())
    }

    /// Removes the two crossing edges added by [`FatGraph::trisect_face`], given its first new
    /// dart `x`. The four darts `x, fp[x], ep[x], ep[fp[x]]` must be the last four darts and
    /// appear in this cyclic order around one face.
    pub fn remove_face_trisection(&mut self, x: Dart) -> Result<()> {
        self.check_dart(x)?;
        let xx = self.fp[x];
        let y = self.ep[x];
        let yy = self.ep[xx];
        let mut darts = [x, y, xx, yy];
        darts.sort_unstable();
        if self.n < 6 || darts != [self.n - 4, self.n - 3, self.n - 2, self.n - 1] {
            return Err(FatGraphError::NotTrisection(x));
        }
        let f = self.fl[x];
        if [xx, y, yy].iter().any(|&d| self.fl[d] != f) {
            return Err(FatGraphError::NotTrisection(x));
        }
        let (a, b, c, d) = (self.fa[x], self.fa[xx], self.fa[y], self.fa[yy]);
        if !((a < b && b < c && c < d) || (b < c && c < d && d < a)
            || (c < d && d < a && a < b) || (d < a && a < b && b < c)) {
            return Err(FatGraphError::NotTrisection(x));
        }

        let i = self.fp[xx];
        let k = self.fp[y];
        let j = self.fp[yy];
        let ii = self.ep[self.vp[yy]];
        let jj = self.ep[self.vp[y]];
        let kk = self.ep[self.vp[x]];

        let (vp, fp) = (&mut self.vp, &mut self.fp);
        if fp[xx] == y && fp[y] == yy {
            vp[j] = vp[x];
            fp[kk] = j;
        } else if fp[xx] == y {
            vp[j] = vp[yy];
            vp[k] = vp[x];
            fp[kk] = k;
            fp[ii] = j;
        } else if fp[yy] == x {
            vp[i] = vp[yy];
            vp[k] = vp[y];
            fp[ii] = i;
            fp[jj] = k;
        } else if fp[y] == yy {
            vp[i] = vp[x];
            vp[j] = vp[y];
            fp[kk] = i;
            fp[jj] = j;
        } else {
            vp[i] = vp[yy];
            vp[j] = vp[y];
            vp[k] = vp[x];
            fp[jj] = j;
            fp[kk] = k;
            fp[ii] = i;
        }

        self.n -= 4;
        self.fd[f] -= 4;
        self.vd[self.vl[i]] -= 1;
        self.vd[self.vl[j]] -= 2;
        self.vd[self.vl[k]] -= 1;
        let start = [i, j, k].into_iter().find(|&d| d < self.n).ok_or(FatGraphError::NotTrisection(x))?;
        self.reset_face_angles(start);
        Ok(())
    }

    fn check_dart(&self, dart: Dart) -> Result<()> {
        if dart < self.n { Ok(()) } else { Err(FatGraphError::DartOutOfRange { dart, n: self.n }) }
    }

    fn ensure_capacity(&self, needed: usize) -> Result<()> {
        let capacity = self.capacity();
        if needed <= capacity { Ok(()) } else { Err(FatGraphError::CapacityExceeded { needed, capacity }) }
    }

    /// Sets the face label along the face of `start`, returning the face degree.
    fn relabel_face(&mut self, start: Dart, label: usize) -> usize {
        let mut degree = 0;
        let mut d = start;
        loop {
            self.fl[d] = label;
            degree += 1;
            d = self.fp[d];
            if d == start {
                return degree;
            }
        }
    }

    /// Sets the vertex label around the vertex of `start`, returning the vertex degree.
    fn relabel_vertex(&mut self, start: Dart, label: usize) -> usize {
        let mut degree = 0;
        let mut d = start;
        loop {
            self.vl[d] = label;
            degree += 1;
            d = self.vp[d];
            if d == start {
                return degree;
            }
        }
    }

    /// Recomputes the angles of the face of `start`: 0 on its smallest dart.
    fn reset_face_angles(&mut self, start: Dart) {
        let Some(min) = self.face_cycle(start).min() else { return };
        let mut angle = 0;
        let mut d = min;
        loop {
            self.fa[d] = angle;
            angle += 1;
            d = self.fp[d];
            if d == min {
                return;
            }
        }
    }
}
