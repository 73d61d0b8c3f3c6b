use ndarray::{Array2, Zip};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use crate::common::{BoxSet, ComputeDevice, IouMethod};
use crate::engines::nms::{exceeds, mask_blocks, mask_word, resolve_masks};
use crate::engines::{pair_iou, Backend};
use crate::{RboxError, Result};

/// Data-parallel engine on a rayon pool.
///
/// IoU cells and NMS mask words are independent tasks, each written exactly
/// once. NMS then resolves the masks sequentially after the parallel phase
/// has joined, so the kept sequence matches the reference engine bit for bit.
#[derive(Debug)]
pub struct AcceleratedEngine {
    threads: usize,
    pool: Option<ThreadPool>,
}

impl AcceleratedEngine {
    /// `threads == 0` runs on the global pool; otherwise a dedicated pool is
    /// built.
    pub fn new(threads: usize) -> Result<Self> {
        let pool = match threads {
            0 => None,
            n => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("rbox-worker-{i}"))
                    .build()
                    .map_err(|err| RboxError::DeviceUnavailable(err.to_string()))?,
            ),
        };
        Ok(Self { threads, pool })
    }

    /// Worker threads actually available to this engine.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Runs `op` on this engine's pool and blocks until it has joined.
    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Backend for AcceleratedEngine {
    fn device(&self) -> ComputeDevice {
        ComputeDevice::Accelerated(self.threads)
    }

    fn iou_matrix_with(&self, a: &BoxSet, b: &BoxSet, method: IouMethod) -> Array2<f32> {
        log::debug!("Accelerated IoU: {} x {} boxes on {} threads ({method})", a.len(), b.len(), self.num_threads());
        let mut out = Array2::<f32>::zeros((a.len(), b.len()));
        self.install(|| {
            Zip::indexed(&mut out).par_for_each(|(i, j), cell| {
                *cell = pair_iou(&a[i], &b[j], method) as f32;
            })
        });
        out
    }

    fn suppress_with(&self, boxes: &BoxSet, iou_threshold: f32, method: IouMethod) -> Vec<usize> {
        let n = boxes.len();
        log::debug!("Accelerated NMS: {n} boxes, threshold {iou_threshold} on {} threads ({method})", self.num_threads());
        if n == 0 {
            return Vec::new();
        }

        // Phase 1: every (row, block) word of the upper-triangular overlap
        // relation is an independent task.
        let blocks = mask_blocks(n);
        let mut masks = vec![0u64; n * blocks];
        self.install(|| {
            masks.par_iter_mut().enumerate().for_each(|(k, word)| {
                let (i, block) = (k / blocks, k % blocks);
                *word = mask_word(i, block, n, |j| {
                    exceeds(pair_iou(&boxes[i], &boxes[j], method), iou_threshold)
                });
            })
        });

        // Phase 2: install() has joined, every word is final.
        resolve_masks(n, &masks)
    }
}
