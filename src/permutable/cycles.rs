//! Slice-level permutation primitives: cycle walks, dense cycle labels and cycle notation.
//! All functions treat `p` as a permutation of `0..p.len()`.
use crate::error::PermutationError;
use itertools::Itertools;

/// Marks a slot that has not been assigned yet.
pub const UNSET: usize = usize::MAX;

/// Iterator over the cycle of `p` containing `start`, beginning with `start`.
#[derive(Clone, Debug)]
pub struct CycleIter<'a> {
    p: &'a [usize],
    start: usize,
    next: Option<usize>,
}

impl Iterator for CycleIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        let following = self.p[current];
        self.next = (following != self.start).then_some(following);
        Some(current)
    }
}

pub fn cycle(p: &[usize], start: usize) -> CycleIter<'_> {
    CycleIter { p, start, next: Some(start) }
}

pub fn is_permutation(p: &[usize]) -> bool {
    check_permutation(p).is_ok()
}

pub fn check_permutation(p: &[usize]) -> Result<(), PermutationError> {
    let mut seen = vec![false; p.len()];
    for &x in p {
        if x >= p.len() || seen[x] {
            return Err(PermutationError::NotAPermutation { len: p.len(), value: x });
        }
        seen[x] = true;
    }
    Ok(())
}

pub fn invert(p: &[usize]) -> Vec<usize> {
    let mut out = vec![0; p.len()];
    for (i, &x) in p.iter().enumerate() {
        out[x] = i;
    }
    out
}

/// Cycle labels, angles and cycle lengths. Cycles are numbered in order of their smallest
/// element, which also gets angle 0; the angle increases by one along the cycle.
pub fn dense_cycles_and_angles(p: &[usize]) -> (Vec<usize>, Vec<usize>, Vec<usize>) {
    let mut labels = vec![UNSET; p.len()];
    let mut angles = vec![0; p.len()];
    let mut degrees = vec![];
    for i in 0..p.len() {
        if labels[i] != UNSET {
            continue;
        }
        let label = degrees.len();
        let mut degree = 0;
        for j in cycle(p, i) {
            labels[j] = label;
            angles[j] = degree;
            degree += 1;
        }
        degrees.push(degree);
    }
    (labels, angles, degrees)
}

/// Cycles, each starting with its smallest element, sorted by that element.
pub fn cycles(p: &[usize]) -> Vec<Vec<usize>> {
    let mut seen = vec![false; p.len()];
    let mut out = vec![];
    for i in 0..p.len() {
        if !seen[i] {
            let c = cycle(p, i).collect_vec();
            c.iter().for_each(|&j| seen[j] = true);
            out.push(c);
        }
    }
    out
}

pub fn num_cycles(p: &[usize]) -> usize {
    dense_cycles_and_angles(p).2.len()
}

/// Cycle lengths in decreasing order.
pub fn cycle_type(p: &[usize]) -> Vec<usize> {
    dense_cycles_and_angles(p).2.into_iter().sorted_unstable_by(|a, b| b.cmp(a)).collect()
}

/// Cycle notation without fixed points, `()` for the identity.
pub fn cycle_string(p: &[usize]) -> String {
    let s = cycles(p).into_iter()
        .filter(|c| c.len() > 1)
        .map(|c| format!("({})", c.iter().join(",")))
        .join("");
    if s.is_empty() { "()".to_string() } else { s }
}

/// Parses cycle notation like `(0,2,1,3)(4)`. Whitespace is ignored; `""` and `"()"` are the
/// empty product.
pub fn parse_cycles(s: &str) -> Result<Vec<Vec<usize>>, PermutationError> {
    let error = |reason: &str| PermutationError::Parse { input: s.to_string(), reason: reason.to_string() };
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() || compact == "()" {
        return Ok(vec![]);
    }
    let body = compact.strip_prefix('(').and_then(|b| b.strip_suffix(')'))
        .ok_or_else(|| error("expected cycles enclosed in parentheses"))?;
    body.split(")(")
        .filter(|c| !c.is_empty())
        .map(|c| c.split(',')
            .map(|x| x.parse::<usize>().map_err(|_| error(&format!("{x:?} is not a non-negative integer"))))
            .collect())
        .collect()
}

/// Dense permutation from cycles, of length at least `min_len`.
pub fn perm_from_cycles(cycles: &[Vec<usize>], min_len: usize) -> Result<Vec<usize>, PermutationError> {
    let len = cycles.iter().flatten().map(|&x| x + 1).max().unwrap_or(0).max(min_len);
    let mut p = (0..len).collect_vec();
    let mut seen = vec![false; len];
    for c in cycles {
        for (t, &x) in c.iter().enumerate() {
            if seen[x] {
                return Err(PermutationError::RepeatedElement(x));
            }
            seen[x] = true;
            p[x] = c[(t + 1) % c.len()];
        }
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_walk() {
        let p = [2, 0, 1, 3];
        assert_eq!(cycle(&p, 0).collect_vec(), vec![0, 2, 1]);
        assert_eq!(cycle(&p, 1).collect_vec(), vec![1, 0, 2]);
        assert_eq!(cycle(&p, 3).collect_vec(), vec![3]);
    }

    #[test]
    fn dense_labels_start_at_smallest_element() {
        let p = perm_from_cycles(&parse_cycles("(0,3,1)(4)(2,5,6,7)").unwrap(), 0).unwrap();
        let (labels, angles, degrees) = dense_cycles_and_angles(&p);
        assert_eq!(labels, vec![0, 0, 1, 0, 2, 1, 1, 1]);
        assert_eq!(angles, vec![0, 2, 0, 1, 0, 1, 2, 3]);
        assert_eq!(degrees, vec![3, 4, 1]);
        assert_eq!(cycle_type(&p), vec![4, 3, 1]);
        assert_eq!(num_cycles(&p), 3);
    }

    #[test]
    fn parse_and_print() {
        let c = parse_cycles(" (0, 5)(1,3,4,2) ").unwrap();
        assert_eq!(c, vec![vec![0, 5], vec![1, 3, 4, 2]]);
        let p = perm_from_cycles(&c, 8).unwrap();
        assert_eq!(p.len(), 8);
        assert_eq!(cycle_string(&p), "(0,5)(1,3,4,2)");
        assert_eq!(parse_cycles("").unwrap(), Vec::<Vec<usize>>::new());
        assert_eq!(parse_cycles("()").unwrap(), Vec::<Vec<usize>>::new());
        assert_eq!(cycle_string(&[0, 1]), "()");
    }

    #[test]
    fn invalid_input() {
        assert!(matches!(parse_cycles("0,1"), Err(PermutationError::Parse { .. })));
        assert!(matches!(parse_cycles("(0,x)"), Err(PermutationError::Parse { .. })));
        assert_eq!(perm_from_cycles(&parse_cycles("(0,1)(1,2)").unwrap(), 0), Err(PermutationError::RepeatedElement(1)));
        assert_eq!(check_permutation(&[0, 0]), Err(PermutationError::NotAPermutation { len: 2, value: 0 }));
        assert!(!is_permutation(&[0, 2]));
        assert!(is_permutation(&[1, 0]));
    }

    #[test]
    fn inverse() {
        let p = [2, 0, 3, 1];
        let q = invert(&p);
        assert!((0..4).all(|i| q[p[i]] == i));
    }
}
