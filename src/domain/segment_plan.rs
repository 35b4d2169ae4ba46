/// How an oversized audio artifact is cut into time-bounded segments.
///
/// `count` is the number of segments needed to bring every piece under the
/// size ceiling; `segment_duration_secs` is the length of every segment but
/// the last, which runs to end-of-stream and absorbs the rounding remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPlan {
    pub count: u64,
    pub segment_duration_secs: u64,
}

/// Floor of `total_duration / count` can reach zero for short, barely
/// over-ceiling inputs, which would make ffmpeg emit empty segments. Clamp
/// to one second; the open-ended last segment keeps the partition complete.
const MIN_SEGMENT_DURATION_SECS: u64 = 1;

impl SegmentPlan {
    pub fn compute(size_bytes: u64, ceiling_bytes: u64, total_duration_secs: f64) -> Self {
        let count = size_bytes.div_ceil(ceiling_bytes).max(1);
        let duration = (total_duration_secs.max(0.0) as u64) / count;
        Self {
            count,
            segment_duration_secs: duration.max(MIN_SEGMENT_DURATION_SECS),
        }
    }

    /// Start offset of segment `index` in seconds.
    pub fn start_of(&self, index: u64) -> u64 {
        index * self.segment_duration_secs
    }

    /// Extraction length for segment `index`; `None` means run to
    /// end-of-stream (always the case for the last segment).
    pub fn duration_of(&self, index: u64) -> Option<u64> {
        if index + 1 == self.count {
            None
        } else {
            Some(self.segment_duration_secs)
        }
    }

    pub fn is_single(&self) -> bool {
        self.count == 1
    }
}
