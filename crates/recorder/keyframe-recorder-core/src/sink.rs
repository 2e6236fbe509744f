//! Export surface: curves handed to an [`AnimationSink`], export observers and the
//! in-memory [`CurveCollector`].

use serde::{Deserialize, Serialize};

use crate::interpolation::Interpolation;
use crate::value::Value;

/// One finished curve of one object, borrowed from the recorder for the duration of the
/// sink call.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedCurve<'a, N> {
    pub node: N,
    pub property_name: &'a str,
    pub interpolation: Interpolation,
    pub times: &'a [f64],
    pub values: &'a [Value],
}

impl<N> ExportedCurve<'_, N> {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Consumer of exported curves, typically a file format writer.
pub trait AnimationSink<N> {
    /// Receive one curve of the animation named `animation`.
    fn add_animation_data(&mut self, animation: &str, curve: &ExportedCurve<'_, N>);
}

/// Called with every curve right before it is reduced and handed to the sink.
pub type CurveObserver<N> = Box<dyn Fn(&ExportedCurve<'_, N>)>;

/// Called once after an export finished.
pub type ExportObserver = Box<dyn Fn(&ExportReport)>;

/// Axis-aligned box.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds {
    pub fn from_point(p: [f32; 3]) -> Self {
        Self { min: p, max: p }
    }

    /// Grow to contain `p`.
    pub fn encapsulate(&mut self, p: [f32; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis]);
        }
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// Summary of one export.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportReport {
    pub animation: String,
    pub objects: usize,
    pub curves: usize,
    /// Keyframes handed to the sink, after reduction.
    pub keyframes: usize,
    /// Bounds of every exported translation value, before reduction.
    pub translation_bounds: Option<Bounds>,
}

impl ExportReport {
    pub(crate) fn include_translation(&mut self, p: [f32; 3]) {
        match self.translation_bounds.as_mut() {
            Some(bounds) => bounds.encapsulate(p),
            None => self.translation_bounds = Some(Bounds::from_point(p)),
        }
    }
}

/// Owned copy of an exported curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedCurve<N> {
    pub animation: String,
    pub node: N,
    pub property_name: String,
    pub interpolation: Interpolation,
    pub times: Vec<f64>,
    pub values: Vec<Value>,
}

/// Sink that keeps every curve in memory.
#[derive(Clone, Debug)]
pub struct CurveCollector<N> {
    curves: Vec<RecordedCurve<N>>,
}

impl<N> Default for CurveCollector<N> {
    fn default() -> Self {
        Self { curves: Vec::new() }
    }
}

impl<N> CurveCollector<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn curves(&self) -> &[RecordedCurve<N>] {
        &self.curves
    }

    pub fn into_curves(self) -> Vec<RecordedCurve<N>> {
        self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn clear(&mut self) {
        self.curves.clear();
    }

    pub fn total_keyframes(&self) -> usize {
        self.curves.iter().map(|c| c.times.len()).sum()
    }
}

impl<N: PartialEq> CurveCollector<N> {
    /// First curve collected for `node` and `property_name`.
    pub fn find(&self, node: &N, property_name: &str) -> Option<&RecordedCurve<N>> {
        self.curves
            .iter()
            .find(|c| &c.node == node && c.property_name == property_name)
    }
}

impl<N: Serialize> CurveCollector<N> {
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(&self.curves)
    }
}

impl<N: Clone> AnimationSink<N> for CurveCollector<N> {
    fn add_animation_data(&mut self, animation: &str, curve: &ExportedCurve<'_, N>) {
        self.curves.push(RecordedCurve {
            animation: animation.to_string(),
            node: curve.node.clone(),
            property_name: curve.property_name.to_string(),
            interpolation: curve.interpolation,
            times: curve.times.to_vec(),
            values: curve.values.to_vec(),
        });
    }
}
