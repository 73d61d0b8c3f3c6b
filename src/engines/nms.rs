//! Suppression bookkeeping shared by the engines.

use crate::common::{BoxSet, IouMethod};
use crate::engines::Backend;
use crate::{RboxError, Result};

/// Boxes covered by one suppression mask word.
pub(crate) const MASK_BITS: usize = u64::BITS as usize;

/// Strict comparison on the same `f32` value the IoU matrix reports, so
/// `IoU == threshold` never suppresses.
pub(crate) fn exceeds(iou: f64, iou_threshold: f32) -> bool {
    (iou as f32) > iou_threshold
}

/// Classic greedy scan over boxes in input order. `suppresses(i, j)` tells
/// whether kept box `i` removes the later box `j`.
pub(crate) fn greedy_suppress(n: usize, suppresses: impl Fn(usize, usize) -> bool) -> Vec<usize> {
    let mut keep = Vec::new();
    let mut suppressed = vec![false; n];

    for i in 0..n {
        if suppressed[i] {
            continue;
        }
        keep.push(i);

        for j in (i + 1)..n {
            if !suppressed[j] && suppresses(i, j) {
                suppressed[j] = true;
            }
        }
    }

    keep
}

/// Number of mask words per row for `n` boxes.
pub(crate) fn mask_blocks(n: usize) -> usize {
    n.div_ceil(MASK_BITS)
}

/// Word `block` of row `i`: bit `k` is set when box `i` would suppress box
/// `block * 64 + k`. Only boxes after `i` are considered.
pub(crate) fn mask_word(i: usize, block: usize, n: usize, suppresses: impl Fn(usize) -> bool) -> u64 {
    let start = (block * MASK_BITS).max(i + 1);
    let end = ((block + 1) * MASK_BITS).min(n);

    let mut word = 0u64;
    for j in start..end {
        if suppresses(j) {
            word |= 1u64 << (j - block * MASK_BITS);
        }
    }
    word
}

/// Walks the rows in input order and keeps every box not yet removed by an
/// earlier kept box. `masks` holds `mask_blocks(n)` words per row.
pub(crate) fn resolve_masks(n: usize, masks: &[u64]) -> Vec<usize> {
    let blocks = mask_blocks(n);
    let mut removed = vec![0u64; blocks];
    let mut keep = Vec::new();

    for i in 0..n {
        let (block, bit) = (i / MASK_BITS, i % MASK_BITS);
        if removed[block] & (1u64 << bit) != 0 {
            continue;
        }
        keep.push(i);

        let row = &masks[i * blocks..(i + 1) * blocks];
        for (r, m) in removed[block..].iter_mut().zip(&row[block..]) {
            *r |= m;
        }
    }

    keep
}

/// Expands kept indices into one flag per box.
pub fn keep_mask(n: usize, keep: &[usize]) -> Vec<bool> {
    let mut mask = vec![false; n];
    for &i in keep {
        mask[i] = true;
    }
    mask
}

/// Indices ordered by descending score. Ties keep input order and NaN
/// scores are dropped.
pub fn sort_by_score(scores: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).filter(|&i| !scores[i].is_nan()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// Sorts by score, suppresses, and maps survivors back to input indices.
/// The result is in descending-score order.
pub(crate) fn suppress_scored(
    backend: &dyn Backend,
    boxes: &BoxSet,
    scores: &[f32],
    iou_threshold: f32,
    method: IouMethod,
) -> Result<Vec<usize>> {
    if scores.len() != boxes.len() {
        return Err(RboxError::ShapeMismatch(format!(
            "{} boxes but {} scores",
            boxes.len(),
            scores.len()
        )));
    }

    let order = sort_by_score(scores);
    let sorted = boxes.select(&order);
    let keep = backend.suppress_with(&sorted, iou_threshold, method);
    Ok(keep.into_iter().map(|k| order[k]).collect())
}
