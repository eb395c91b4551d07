//! Aggregation of defect areas into fixed-size runs of survey positions.
//!
//! Positions are visited in index order. Every `segment_size` consecutive
//! positions form one segment; a trailing partial run forms a shorter one.
//! Boundaries follow the position order, never the numeric pile values.

use crate::error::{ReportError, Result};
use crate::measure::{ClassAreas, DefectClass};
use crate::position::PileKey;
use crate::types::{Measurement, SegmentSummary};
use tracing::debug;

/// Running totals for the segment currently being filled.
///
/// A fresh accumulator is opened at every segment start and consumed when the
/// segment closes, so no totals carry over between segments.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAccumulator {
    start_pile: PileKey,
    first_position: usize,
    area_by_class: ClassAreas,
}

impl SegmentAccumulator {
    pub fn open(start_pile: PileKey, first_position: usize) -> Self {
        Self {
            start_pile,
            first_position,
            area_by_class: ClassAreas::new(),
        }
    }

    pub fn add(&mut self, class: DefectClass, area_m2: f64) {
        self.area_by_class.add(class, area_m2);
    }

    /// Close the segment at `end_pile`, producing its summary.
    pub fn close(self, end_pile: PileKey, last_position: usize) -> SegmentSummary {
        SegmentSummary {
            start_pile: self.start_pile,
            end_pile,
            area_by_class: self.area_by_class,
            first_position: self.first_position,
            last_position,
        }
    }
}

/// Splits the ordered position sequence into segments.
///
/// # Example
///
/// ```
/// use pavement_report::position::PileKey;
/// use pavement_report::segment::SegmentAggregator;
///
/// let mut aggregator = SegmentAggregator::new(5, 2).unwrap();
/// for i in 0..12u64 {
///     aggregator.observe(&PileKey::new(format!("{}", 100 + 2 * i)), &[]).unwrap();
/// }
/// let segments = aggregator.finish();
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[0].start_pile.as_str(), "98");
/// assert_eq!(segments[2].position_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentAggregator {
    segment_size: usize,
    start_offset_m: u64,
    next_position: usize,
    last_pile: Option<PileKey>,
    current: Option<SegmentAccumulator>,
    summaries: Vec<SegmentSummary>,
}

impl SegmentAggregator {
    /// Create an aggregator.
    ///
    /// # Arguments
    ///
    /// * `segment_size` - Positions per segment, at least 1
    /// * `start_offset_m` - Meters subtracted from a segment's first pile to
    ///   obtain its start pile
    pub fn new(segment_size: usize, start_offset_m: u64) -> Result<Self> {
        if segment_size == 0 {
            return Err(ReportError::InvalidConfig(
                "segment size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            segment_size,
            start_offset_m,
            next_position: 0,
            last_pile: None,
            current: None,
            summaries: Vec::new(),
        })
    }

    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    /// Feed the next position in index order with the measurements taken there.
    ///
    /// Returns the summary of the segment this position completes, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidPile`] if this position opens a segment
    /// and its pile cannot be offset.
    pub fn observe(
        &mut self,
        pile: &PileKey,
        measurements: &[Measurement],
    ) -> Result<Option<SegmentSummary>> {
        let position = self.next_position;

        let mut accumulator = if position % self.segment_size == 0 {
            let start_pile = pile.offset_back(self.start_offset_m)?;
            debug!(position, start = %start_pile, "opening segment");
            SegmentAccumulator::open(start_pile, position)
        } else {
            self.current.take().ok_or_else(|| {
                ReportError::InvalidConfig(format!(
                    "position {} observed without an open segment",
                    position
                ))
            })?
        };
        for m in measurements {
            accumulator.add(m.class, m.area_m2);
        }

        self.next_position += 1;
        self.last_pile = Some(pile.clone());

        if position % self.segment_size == self.segment_size - 1 {
            let summary = accumulator.close(pile.clone(), position);
            self.summaries.push(summary.clone());
            Ok(Some(summary))
        } else {
            self.current = Some(accumulator);
            Ok(None)
        }
    }

    /// Close any partial trailing segment at the last observed pile and
    /// return every summary in emission order.
    pub fn finish(mut self) -> Vec<SegmentSummary> {
        if let (Some(accumulator), Some(last_pile)) = (self.current.take(), self.last_pile.take()) {
            let last_position = self.next_position - 1;
            self.summaries.push(accumulator.close(last_pile, last_position));
        }
        self.summaries
    }
}
