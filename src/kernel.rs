//! Edit-distance kernels.
//!
//! Two implementations share one contract: [`ReferenceKernel`] fills full
//! `ndarray` matrices and is easy to audit, [`FastKernel`] keeps a single DP
//! row for distances, works on bytes when both inputs are ASCII and uses a
//! flat buffer for alignment. Callers pick one by injection; the test suite
//! checks that they agree field for field.

use ndarray::Array2;

use crate::types::{Alignment, EditOp, GAP};

/// Unit-cost edit distance and global alignment over characters.
pub trait SimilarityKernel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Levenshtein distance in characters
    fn distance(&self, a: &str, b: &str) -> usize;

    /// Minimum-cost global alignment with traceback
    fn align(&self, a: &str, b: &str) -> Alignment;

    /// `1 - distance / max(len)`, or 1.0 when both strings are empty
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return 1.0;
        }
        1.0 - (self.distance(a, b) as f64 / max_len as f64)
    }
}

/// Full-matrix implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceKernel;

impl ReferenceKernel {
    fn cost_matrix(a: &[char], b: &[char]) -> Array2<usize> {
        let len_a = a.len();
        let len_b = b.len();
        let mut dp = Array2::<usize>::zeros((len_a + 1, len_b + 1));

        for i in 0..=len_a {
            dp[[i, 0]] = i;
        }
        for j in 0..=len_b {
            dp[[0, j]] = j;
        }

        for i in 1..=len_a {
            for j in 1..=len_b {
                let cost = usize::from(a[i - 1] != b[j - 1]);
                dp[[i, j]] = (dp[[i - 1, j]] + 1)
                    .min(dp[[i, j - 1]] + 1)
                    .min(dp[[i - 1, j - 1]] + cost);
            }
        }

        dp
    }
}

impl SimilarityKernel for ReferenceKernel {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn distance(&self, a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let dp = Self::cost_matrix(&a, &b);
        dp[[a.len(), b.len()]]
    }

    fn align(&self, a: &str, b: &str) -> Alignment {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let dp = Self::cost_matrix(&a, &b);
        traceback(&a, &b, |i, j| dp[[i, j]])
    }
}

/// Single-row / flat-buffer implementation with an ASCII fast path
#[derive(Debug, Clone, Copy, Default)]
pub struct FastKernel;

impl SimilarityKernel for FastKernel {
    fn name(&self) -> &'static str {
        "fast"
    }

    fn distance(&self, a: &str, b: &str) -> usize {
        if a.is_ascii() && b.is_ascii() {
            row_distance(a.as_bytes(), b.as_bytes())
        } else {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            row_distance(&a, &b)
        }
    }

    fn align(&self, a: &str, b: &str) -> Alignment {
        if a.is_ascii() && b.is_ascii() {
            flat_align(a.as_bytes(), b.as_bytes())
        } else {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            flat_align(&a, &b)
        }
    }
}

/// Levenshtein distance keeping only two DP rows
fn row_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let len_a = a.len();
    let len_b = b.len();

    if len_a == 0 {
        return len_b;
    }
    if len_b == 0 {
        return len_a;
    }

    let mut prev_row: Vec<usize> = (0..=len_b).collect();
    let mut curr_row = vec![0; len_b + 1];

    for (i, seg_a) in a.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, seg_b) in b.iter().enumerate() {
            let cost = usize::from(seg_a != seg_b);

            curr_row[j + 1] = std::cmp::min(
                std::cmp::min(curr_row[j] + 1, prev_row[j + 1] + 1),
                prev_row[j] + cost,
            );
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len_b]
}

fn flat_align<T: Copy + PartialEq + Into<char>>(a: &[T], b: &[T]) -> Alignment {
    let len_a = a.len();
    let len_b = b.len();
    let width = len_b + 1;
    let mut dp = vec![0usize; (len_a + 1) * width];

    for i in 0..=len_a {
        dp[i * width] = i;
    }
    for j in 0..=len_b {
        dp[j] = j;
    }

    for i in 1..=len_a {
        let row = i * width;
        let prev = (i - 1) * width;
        for j in 1..=len_b {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            dp[row + j] = (dp[prev + j] + 1)
                .min(dp[row + j - 1] + 1)
                .min(dp[prev + j - 1] + cost);
        }
    }

    traceback(a, b, |i, j| dp[i * width + j])
}

/// Walk a filled cost matrix from the bottom-right corner back to the origin.
///
/// Move order at each cell: exact-match diagonal, substitution diagonal,
/// deletion from `a` (vertical), insertion into `b` (horizontal).
fn traceback<T, F>(a: &[T], b: &[T], cost: F) -> Alignment
where
    T: Copy + PartialEq + Into<char>,
    F: Fn(usize, usize) -> usize,
{
    let mut i = a.len();
    let mut j = b.len();
    let capacity = i + j;
    let mut aligned_a: Vec<char> = Vec::with_capacity(capacity);
    let mut aligned_b: Vec<char> = Vec::with_capacity(capacity);
    let mut operations = Vec::with_capacity(capacity);

    while i > 0 || j > 0 {
        let here = cost(i, j);

        if i > 0 && j > 0 && a[i - 1] == b[j - 1] && here == cost(i - 1, j - 1) {
            operations.push(EditOp::Match);
            aligned_a.push(a[i - 1].into());
            aligned_b.push(b[j - 1].into());
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && a[i - 1] != b[j - 1] && here == cost(i - 1, j - 1) + 1 {
            operations.push(EditOp::Substitute);
            aligned_a.push(a[i - 1].into());
            aligned_b.push(b[j - 1].into());
            i -= 1;
            j -= 1;
        } else if i > 0 && (j == 0 || here == cost(i - 1, j) + 1) {
            operations.push(EditOp::Delete);
            aligned_a.push(a[i - 1].into());
            aligned_b.push(GAP);
            i -= 1;
        } else {
            operations.push(EditOp::Insert);
            aligned_a.push(GAP);
            aligned_b.push(b[j - 1].into());
            j -= 1;
        }
    }

    // Reverse since we backtracked
    operations.reverse();
    aligned_a.reverse();
    aligned_b.reverse();

    let mask = operations.iter().map(|op| *op == EditOp::Match).collect();

    Alignment {
        aligned_a: aligned_a.into_iter().collect(),
        aligned_b: aligned_b.into_iter().collect(),
        mask,
        operations,
        cost: cost(a.len(), b.len()),
    }
}
