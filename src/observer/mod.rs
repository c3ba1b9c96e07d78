use crate::segment::Segment;

/// A read-only snapshot of a segment's batch.
///
/// Design intent:
/// - Observers cannot mutate or steer the batch.
/// - Snapshotting is *on-demand* and can allocate; the pipeline stays
///   unchanged.
#[derive(Debug, Clone)]
pub struct SegmentSnapshot {
    pub id: u64,
    pub start_depth: u64,
    pub unit_count: usize,

    /// Joint outcomes surviving the retention floor; 0 when the batch fell
    /// back to classical.
    pub retained_outcomes: usize,
    pub dominant_outcome: Option<String>,

    pub seal: Option<String>,
}

pub struct SegmentAdapter<'a> {
    segment: &'a Segment,
}

impl<'a> SegmentAdapter<'a> {
    pub fn new(segment: &'a Segment) -> Self {
        Self { segment }
    }

    pub fn snapshot(&self) -> SegmentSnapshot {
        let joint = self.segment.joint_state();

        SegmentSnapshot {
            id: self.segment.id(),
            start_depth: self.segment.start_depth(),
            unit_count: self.segment.units().len(),
            retained_outcomes: joint.map(|j| j.retained()).unwrap_or(0),
            dominant_outcome: joint.and_then(|j| j.dominant()).map(str::to_string),
            seal: self.segment.seal().map(str::to_string),
        }
    }
}
