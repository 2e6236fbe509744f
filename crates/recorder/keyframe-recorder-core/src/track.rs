//! In-flight recording of one (object, property) time series.
//!
//! Samples are appended once per update. A sample identical to the two before it makes
//! the middle one redundant, so the middle one is dropped before appending: every run
//! of equal values keeps exactly its first and last sample. Dropping "equal to previous"
//! on insert instead would turn an instantaneous change into a ramp starting at the run's
//! first sample.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::interpolation::Interpolation;
use crate::sampler::Sampler;
use crate::scene::SceneGraph;
use crate::value::Value;

/// Type-erased track as stored per recorded object.
pub trait AnimationTrack<S: SceneGraph> {
    fn property_name(&self) -> &str;

    fn interpolation(&self) -> Interpolation;

    /// Strictly increasing, session-relative sample times.
    fn times(&self) -> &[f64];

    /// Recorded values, converted for the sink. Parallel to [`times`](Self::times).
    fn values(&self) -> Vec<Value>;

    fn len(&self) -> usize {
        self.times().len()
    }

    fn is_empty(&self) -> bool {
        self.times().is_empty()
    }

    fn last_time(&self) -> Option<f64> {
        self.times().last().copied()
    }

    /// Read the property now and append it if it is not redundant.
    fn sample_if_changed(&mut self, scene: &S, node: S::Node, time: f64);
}

/// Outcome of offering one sample to a track.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Appended; the previous sample was kept.
    Appended,
    /// Appended after dropping the previous sample as the redundant middle of a run.
    Replaced,
    /// Same timestamp as the last sample; the existing sample wins.
    DuplicateTime,
    /// Earlier than the last sample.
    OutOfOrder,
}

impl RecordOutcome {
    #[inline]
    pub fn is_recorded(self) -> bool {
        matches!(self, RecordOutcome::Appended | RecordOutcome::Replaced)
    }
}

/// Typed track for sampler `P`.
pub struct Track<S: SceneGraph, P: Sampler<S>> {
    sampler: Arc<P>,
    times: Vec<f64>,
    values: Vec<P::Data>,
    _scene: PhantomData<fn() -> S>,
}

impl<S: SceneGraph, P: Sampler<S>> Track<S, P> {
    /// Track with no samples yet.
    pub fn new(sampler: Arc<P>) -> Self {
        Self {
            sampler,
            times: Vec::new(),
            values: Vec::new(),
            _scene: PhantomData,
        }
    }

    /// Track seeded with the sampler's current read at `time`.
    pub fn start(sampler: Arc<P>, scene: &S, node: S::Node, time: f64) -> Self {
        let mut track = Self::new(sampler);
        track.sample_at(scene, node, time);
        track
    }

    /// Track seeded with `initial(current read)` at `time` instead of the raw read.
    pub fn start_with(
        sampler: Arc<P>,
        scene: &S,
        node: S::Node,
        time: f64,
        initial: impl FnOnce(Option<P::Data>) -> Option<P::Data>,
    ) -> Self {
        let mut track = Self::new(sampler);
        if let Some(value) = initial(track.sampler.sample(scene, node)) {
            track.record(time, value);
        }
        track
    }

    pub fn sampler(&self) -> &Arc<P> {
        &self.sampler
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Typed values, parallel to [`times`](Self::times).
    pub fn data(&self) -> &[P::Data] {
        &self.values
    }

    pub fn last(&self) -> Option<(f64, &P::Data)> {
        Some((*self.times.last()?, self.values.last()?))
    }

    pub fn second_to_last(&self) -> Option<(f64, &P::Data)> {
        let n = self.times.len();
        if n < 2 {
            return None;
        }
        Some((self.times[n - 2], &self.values[n - 2]))
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Read through the sampler and record; a missing target records nothing.
    pub fn sample_at(&mut self, scene: &S, node: S::Node, time: f64) -> Option<RecordOutcome> {
        let value = self.sampler.sample(scene, node)?;
        Some(self.record(time, value))
    }

    /// Append `(time, value)` unless it breaks time ordering, eliding a redundant middle.
    pub fn record(&mut self, time: f64, value: P::Data) -> RecordOutcome {
        if let Some((last_time, last_value)) = self.last() {
            if time == last_time {
                if !self.sampler.equals(last_value, &value) {
                    log::warn!(
                        "'{}': two different values sampled at time {}; keeping {:?}, dropping {:?}",
                        self.sampler.property_name(),
                        time,
                        last_value,
                        value
                    );
                }
                return RecordOutcome::DuplicateTime;
            }
            if time < last_time {
                log::warn!(
                    "'{}': sample at {} is earlier than last sample at {}; ignored",
                    self.sampler.property_name(),
                    time,
                    last_time
                );
                return RecordOutcome::OutOfOrder;
            }
        }

        let redundant_middle = match (self.second_to_last(), self.last()) {
            (Some((_, before)), Some((_, last))) => {
                self.sampler.equals(last, before) && self.sampler.equals(last, &value)
            }
            _ => false,
        };
        if redundant_middle {
            self.times.pop();
            self.values.pop();
        }

        self.times.push(time);
        self.values.push(value);
        if redundant_middle {
            RecordOutcome::Replaced
        } else {
            RecordOutcome::Appended
        }
    }
}

impl<S, P> AnimationTrack<S> for Track<S, P>
where
    S: SceneGraph,
    P: Sampler<S>,
{
    fn property_name(&self) -> &str {
        self.sampler.property_name()
    }

    fn interpolation(&self) -> Interpolation {
        self.sampler.interpolation()
    }

    fn times(&self) -> &[f64] {
        &self.times
    }

    fn values(&self) -> Vec<Value> {
        self.values.iter().cloned().map(Into::into).collect()
    }

    fn sample_if_changed(&mut self, scene: &S, node: S::Node, time: f64) {
        self.sample_at(scene, node, time);
    }
}

impl<S: SceneGraph, P: Sampler<S>> std::fmt::Debug for Track<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Track")
            .field("property", &self.sampler.property_name())
            .field("times", &self.times)
            .field("values", &self.values)
            .finish()
    }
}
