use std::time::{Duration, Instant};
use ndarray::{Array2, ArrayView1, ArrayView2};
use crate::common::{BoxElement, BoxSet, ComputeDevice};
use crate::data::{ConfigRbox, TimeCalc};
use crate::engines::{backend_for, suppress_scored, Backend};
use crate::utils;
use crate::Result;

const STAGE_PREPROCESS: usize = 0;
const STAGE_COMPUTE: usize = 1;

/// Config-driven front end over one backend.
///
/// Each call runs the same pipeline: validate the raw arrays into box sets,
/// run the engine, and record per-stage timings.
pub struct RboxRunner {
    config: ConfigRbox,
    backend: Box<dyn Backend>,
    pub time: TimeCalc,
}

impl std::fmt::Debug for RboxRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RboxRunner")
            .field("config", &self.config)
            .field("device", &self.backend.device())
            .field("time", &self.time)
            .finish()
    }
}

impl RboxRunner {
    pub fn new(config: ConfigRbox) -> Result<Self> {
        let backend = backend_for(config.device)?;
        log::info!(
            "Initializing rbox runner with ({}) backend, {} IoU, threshold {}",
            backend.device(),
            config.method,
            config.iou_threshold
        );
        Ok(Self {
            config,
            backend,
            time: TimeCalc::default(),
        })
    }

    pub fn device(&self) -> ComputeDevice {
        self.backend.device()
    }

    /// Pairwise IoU matrix between two `N x 5` box arrays.
    pub fn iou<T: BoxElement>(&mut self, boxes_a: ArrayView2<T>, boxes_b: ArrayView2<T>) -> Result<Array2<f32>> {
        let start = Instant::now();
        let (a, b) = (BoxSet::from_array(boxes_a)?, BoxSet::from_array(boxes_b)?);
        let t_pre = utils::trace("TIME", "Preprocessing boxes", start, Duration::ZERO);

        let ys = self.backend.iou_matrix_with(&a, &b, self.config.method);
        let t_exe = utils::trace("TIME", "IoU", start, t_pre).saturating_sub(t_pre);

        self.record(t_pre, t_exe);
        Ok(ys)
    }

    /// NMS over boxes already sorted by descending score, using the
    /// configured threshold.
    pub fn nms<T: BoxElement>(&mut self, boxes: ArrayView2<T>) -> Result<Vec<usize>> {
        let start = Instant::now();
        let set = BoxSet::from_array(boxes)?;
        let t_pre = utils::trace("TIME", "Preprocessing boxes", start, Duration::ZERO);

        let keep = self.backend.suppress_with(&set, self.config.iou_threshold, self.config.method);
        let t_exe = utils::trace("TIME", "NMS", start, t_pre).saturating_sub(t_pre);

        self.record(t_pre, t_exe);
        Ok(keep)
    }

    /// NMS over unsorted boxes with one score each. Returns input indices in
    /// descending-score order.
    pub fn nms_scored<T: BoxElement>(&mut self, boxes: ArrayView2<T>, scores: ArrayView1<f32>) -> Result<Vec<usize>> {
        let start = Instant::now();
        let set = BoxSet::from_array(boxes)?;
        let scores = scores.to_vec();
        let t_pre = utils::trace("TIME", "Preprocessing boxes", start, Duration::ZERO);

        let keep = suppress_scored(
            self.backend.as_ref(),
            &set,
            &scores,
            self.config.iou_threshold,
            self.config.method,
        )?;
        let t_exe = utils::trace("TIME", "Scored NMS", start, t_pre).saturating_sub(t_pre);

        self.record(t_pre, t_exe);
        Ok(keep)
    }

    fn record(&mut self, t_pre: Duration, t_exe: Duration) {
        self.time.add_or_push(STAGE_PREPROCESS, t_pre);
        self.time.add_or_push(STAGE_COMPUTE, t_exe);

        if self.config.profile {
            log::info!(
                "> Preprocess: {t_pre:?} ({:?} avg) | Compute: {t_exe:?} ({:?} avg)",
                self.time.avg_i(STAGE_PREPROCESS).unwrap_or_default(),
                self.time.avg_i(STAGE_COMPUTE).unwrap_or_default(),
            );
        }
    }
}
