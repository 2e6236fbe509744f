//! Recording session: discovers objects under a root, samples them once per update and
//! exports the result to an [`AnimationSink`].
//!
//! Times passed to [`Recorder::start`] and [`Recorder::update`] are absolute (e.g. the
//! host's clock); recorded keyframes are relative to the start of the session.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use hashbrown::HashSet;
use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::config::RecorderConfig;
use crate::data::AnimationData;
use crate::error::{RecorderError, Result};
use crate::interpolation::Interpolation;
use crate::merge::{merge_visibility_and_scale, MergedScaleCurve, ScaleSeries, VisibilitySeries};
use crate::reduce::remove_unneeded_keyframes;
use crate::sampler::{Sampler, SamplerRegistry, WorldSpacePredicate};
use crate::samplers::{VisibilitySampler, SCALE, TRANSLATION};
use crate::scene::SceneGraph;
use crate::sink::{AnimationSink, CurveObserver, ExportObserver, ExportReport, ExportedCurve};
use crate::value::Value;
use crate::visibility_track::VisibilityTrack;

type RegisterSampler<S> = Box<dyn FnOnce(&mut SamplerRegistry<S>)>;

/// Configures and creates a [`Recorder`].
pub struct RecorderBuilder<S: SceneGraph> {
    root: S::Node,
    config: RecorderConfig,
    world_space: Option<WorldSpacePredicate<S>>,
    custom_samplers: Vec<RegisterSampler<S>>,
    recording_filter: Option<HashSet<S::Node>>,
    curve_observers: Vec<CurveObserver<S::Node>>,
    export_observers: Vec<ExportObserver>,
}

impl<S: SceneGraph> RecorderBuilder<S> {
    pub fn new(root: S::Node) -> Self {
        Self {
            root,
            config: RecorderConfig::default(),
            world_space: None,
            custom_samplers: Vec::new(),
            recording_filter: None,
            curve_observers: Vec::new(),
            export_observers: Vec::new(),
        }
    }

    pub fn config(mut self, config: RecorderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn animation_name(mut self, name: impl Into<String>) -> Self {
        self.config.animation_name = name.into();
        self
    }

    pub fn record_visibility(mut self, enabled: bool) -> Self {
        self.config.record_visibility = enabled;
        self
    }

    /// Sample transforms in world space for nodes matching `predicate`.
    pub fn world_space(mut self, predicate: impl Fn(&S, S::Node) -> bool + 'static) -> Self {
        self.world_space = Some(Arc::new(predicate));
        self
    }

    /// Record an extra property. Registering a second sampler for the same target and
    /// data types replaces the first.
    pub fn custom_sampler<P: Sampler<S> + 'static>(mut self, sampler: P) -> Self {
        self.custom_samplers.push(Box::new(move |registry| {
            registry.register_custom(sampler);
        }));
        self
    }

    /// Only record the given nodes (they still have to be under the root).
    pub fn recording_filter(mut self, nodes: impl IntoIterator<Item = S::Node>) -> Self {
        self.recording_filter = Some(nodes.into_iter().collect());
        self
    }

    pub fn on_before_add_curve(
        mut self,
        observer: impl Fn(&ExportedCurve<'_, S::Node>) + 'static,
    ) -> Self {
        self.curve_observers.push(Box::new(observer));
        self
    }

    pub fn on_after_export(mut self, observer: impl Fn(&ExportReport) + 'static) -> Self {
        self.export_observers.push(Box::new(observer));
        self
    }

    /// Resolve samplers and validate the root against `scene`.
    pub fn build(self, scene: &S) -> Result<Recorder<S>> {
        if !scene.contains(self.root) {
            return Err(RecorderError::MissingRoot {
                root: format!("{:?}", self.root),
            });
        }

        let mut samplers = SamplerRegistry::from_config(&self.config, self.world_space);
        for register in self.custom_samplers {
            register(&mut samplers);
        }
        log::debug!("recorder for {:?} built with {:?}", self.root, samplers);

        Ok(Recorder {
            root: self.root,
            config: self.config,
            samplers,
            recording_filter: self.recording_filter,
            objects: IndexMap::new(),
            node_cache: Vec::new(),
            start_time: 0.0,
            last_recorded_time: 0.0,
            is_recording: false,
            has_recording: false,
            curve_observers: self.curve_observers,
            export_observers: self.export_observers,
        })
    }
}

/// Records every object under a root node.
///
/// Lifecycle: `start` → any number of `update`/`update_for` → `end` → `export` (any
/// number of times). A new `start` discards the previous recording.
pub struct Recorder<S: SceneGraph> {
    root: S::Node,
    config: RecorderConfig,
    samplers: SamplerRegistry<S>,
    recording_filter: Option<HashSet<S::Node>>,
    objects: IndexMap<S::Node, AnimationData<S>>,
    node_cache: Vec<S::Node>,
    start_time: f64,
    last_recorded_time: f64,
    is_recording: bool,
    has_recording: bool,
    curve_observers: Vec<CurveObserver<S::Node>>,
    export_observers: Vec<ExportObserver>,
}

impl<S: SceneGraph> Recorder<S> {
    pub fn builder(root: S::Node) -> RecorderBuilder<S> {
        RecorderBuilder::new(root)
    }

    /// Begin a session at absolute time `time` and record the initial state of every
    /// object under the root.
    pub fn start(&mut self, scene: &S, time: f64) -> Result<()> {
        if !time.is_finite() {
            return Err(RecorderError::InvalidTime { time });
        }
        if self.is_recording {
            log::warn!("start ignored: already recording since {}", self.start_time);
            return Err(RecorderError::AlreadyRecording {
                started_at: self.start_time,
            });
        }
        if !scene.contains(self.root) {
            return Err(RecorderError::MissingRoot {
                root: format!("{:?}", self.root),
            });
        }

        self.start_time = time;
        self.last_recorded_time = time;
        self.objects.clear();

        let mut nodes = std::mem::take(&mut self.node_cache);
        nodes.clear();
        scene.collect_subtree(self.root, &mut nodes);
        for &node in &nodes {
            if !self.is_allowed(node) {
                continue;
            }
            let data = AnimationData::new(&self.samplers, scene, node, 0.0);
            self.objects.insert(node, data);
        }
        nodes.clear();
        self.node_cache = nodes;

        self.is_recording = true;
        self.has_recording = true;
        log::debug!(
            "recording started at {} with {} objects",
            time,
            self.objects.len()
        );
        Ok(())
    }

    /// Sample every object currently under the root at absolute time `time`.
    /// Objects seen for the first time start their tracks here.
    pub fn update(&mut self, scene: &S, time: f64) -> Result<()> {
        self.check_update_time(time)?;

        let mut nodes = std::mem::take(&mut self.node_cache);
        nodes.clear();
        if scene.contains(self.root) {
            scene.collect_subtree(self.root, &mut nodes);
        } else {
            log::warn!("recording root {:?} left the scene", self.root);
        }
        self.record_nodes(scene, time, &nodes);
        nodes.clear();
        self.node_cache = nodes;
        Ok(())
    }

    /// Sample only `nodes` at absolute time `time`. Every node must be the root or one
    /// of its descendants; otherwise nothing is sampled.
    pub fn update_for(&mut self, scene: &S, time: f64, nodes: &[S::Node]) -> Result<()> {
        self.check_update_time(time)?;
        if let Some(outside) = nodes
            .iter()
            .find(|&&n| n != self.root && !scene.is_descendant_of(n, self.root))
        {
            log::warn!("{:?} is not under recording root {:?}", outside, self.root);
            return Err(RecorderError::NotUnderRoot {
                node: format!("{:?}", outside),
            });
        }
        self.record_nodes(scene, time, nodes);
        Ok(())
    }

    fn check_update_time(&self, time: f64) -> Result<()> {
        if !self.is_recording {
            log::warn!("update ignored: not recording");
            return Err(RecorderError::NotRecording);
        }
        if !time.is_finite() {
            return Err(RecorderError::InvalidTime { time });
        }
        if time <= self.last_recorded_time {
            log::warn!(
                "can't record backwards in time: {} <= {}",
                time,
                self.last_recorded_time
            );
            return Err(RecorderError::NonMonotonicTime {
                time,
                last: self.last_recorded_time,
            });
        }
        Ok(())
    }

    fn record_nodes(&mut self, scene: &S, time: f64, nodes: &[S::Node]) {
        let session_time = time - self.start_time;
        for &node in nodes {
            if !self.is_allowed(node) {
                continue;
            }
            match self.objects.entry(node) {
                Entry::Occupied(entry) => entry.into_mut().update(scene, session_time),
                Entry::Vacant(entry) => {
                    log::trace!("{:?} first seen at {}", node, session_time);
                    entry.insert(AnimationData::new(&self.samplers, scene, node, session_time));
                }
            }
        }
        self.last_recorded_time = time;
    }

    fn is_allowed(&self, node: S::Node) -> bool {
        self.recording_filter
            .as_ref()
            .map_or(true, |filter| filter.contains(&node))
    }

    /// Stop recording. Returns `false` when there was no active recording.
    pub fn end(&mut self) -> bool {
        if !self.is_recording {
            return false;
        }
        self.is_recording = false;
        self.node_cache = Vec::new();
        log::info!(
            "recording '{}' finished: {} objects, {} keyframes over {}s",
            self.config.animation_name,
            self.objects.len(),
            self.objects.values().map(AnimationData::keyframe_count).sum::<usize>(),
            self.last_recorded_time - self.start_time
        );
        true
    }

    /// Hand every recorded curve to `sink` under the configured animation name.
    ///
    /// Export does not consume the recording; exporting twice produces the same curves.
    pub fn export<K>(&self, sink: &mut K) -> Result<ExportReport>
    where
        K: AnimationSink<S::Node> + ?Sized,
    {
        if !self.has_recording {
            return Err(RecorderError::NoRecording);
        }

        let mut report = ExportReport {
            animation: self.config.animation_name.clone(),
            objects: self.objects.len(),
            ..ExportReport::default()
        };

        for data in self.objects.values() {
            let node = data.node();
            let mut scale_exported = false;

            for track in data.tracks() {
                if track.is_empty() {
                    continue;
                }
                let values = track.values();
                if track.property_name() == VisibilitySampler::MERGED_INTO {
                    let merged = merged_scale(
                        data.visibility(),
                        track.times(),
                        &values,
                        track.interpolation(),
                    );
                    if let Some(merged) = merged {
                        self.export_merged_scale(sink, &mut report, node, &merged);
                        scale_exported = true;
                        continue;
                    }
                }
                self.export_curve(
                    sink,
                    &mut report,
                    ExportedCurve {
                        node,
                        property_name: track.property_name(),
                        interpolation: track.interpolation(),
                        times: track.times(),
                        values: &values,
                    },
                );
            }

            if !scale_exported {
                let visibility = data
                    .visibility()
                    .filter(|v| !v.is_empty())
                    .map(|v| VisibilitySeries {
                        times: v.times(),
                        visibilities: v.visibilities(),
                    });
                if let Some(merged) = merge_visibility_and_scale(visibility, None) {
                    self.export_merged_scale(sink, &mut report, node, &merged);
                }
            }
        }

        log::debug!(
            "exported '{}': {} curves, {} keyframes",
            report.animation,
            report.curves,
            report.keyframes
        );
        for observer in &self.export_observers {
            observer(&report);
        }
        Ok(report)
    }

    /// [`end`](Self::end) followed by [`export`](Self::export). `Ok(None)` when there was
    /// no active recording to end.
    pub fn end_and_export<K>(&mut self, sink: &mut K) -> Result<Option<ExportReport>>
    where
        K: AnimationSink<S::Node> + ?Sized,
    {
        if !self.end() {
            return Ok(None);
        }
        self.export(sink).map(Some)
    }

    fn export_merged_scale<K>(
        &self,
        sink: &mut K,
        report: &mut ExportReport,
        node: S::Node,
        merged: &MergedScaleCurve,
    ) where
        K: AnimationSink<S::Node> + ?Sized,
    {
        let values: Vec<Value> = merged.scales.iter().copied().map(Value::Vec3).collect();
        self.export_curve(
            sink,
            report,
            ExportedCurve {
                node,
                property_name: SCALE,
                interpolation: merged.interpolation,
                times: &merged.times,
                values: &values,
            },
        );
    }

    fn export_curve<K>(
        &self,
        sink: &mut K,
        report: &mut ExportReport,
        curve: ExportedCurve<'_, S::Node>,
    ) where
        K: AnimationSink<S::Node> + ?Sized,
    {
        for observer in &self.curve_observers {
            observer(&curve);
        }

        if curve.property_name == TRANSLATION {
            for p in curve.values.iter().filter_map(Value::as_vec3) {
                report.include_translation(p);
            }
        }

        let (times, values) = if self.config.remove_redundant_keyframes {
            remove_unneeded_keyframes(curve.times, curve.values)
        } else {
            (Cow::Borrowed(curve.times), Cow::Borrowed(curve.values))
        };

        sink.add_animation_data(
            &self.config.animation_name,
            &ExportedCurve {
                times: &times,
                values: &values,
                ..curve
            },
        );
        report.curves += 1;
        report.keyframes += times.len();
    }

    /// Restrict recording to `filter`, or record everything under the root with `None`.
    /// Already recorded objects outside the filter keep their data but stop updating.
    pub fn set_recording_filter(&mut self, filter: Option<HashSet<S::Node>>) {
        self.recording_filter = filter;
    }

    pub fn recording_filter(&self) -> Option<&HashSet<S::Node>> {
        self.recording_filter.as_ref()
    }

    pub fn root(&self) -> S::Node {
        self.root
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn animation_name(&self) -> &str {
        &self.config.animation_name
    }

    pub fn samplers(&self) -> &SamplerRegistry<S> {
        &self.samplers
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Whether a recording exists, active or finished.
    pub fn has_recording(&self) -> bool {
        self.has_recording
    }

    /// Absolute time passed to [`start`](Self::start).
    pub fn recording_start_time(&self) -> f64 {
        self.start_time
    }

    /// Absolute time of the most recent accepted update (or of `start`).
    pub fn last_recorded_time(&self) -> f64 {
        self.last_recorded_time
    }

    /// Recorded objects in discovery order.
    pub fn tracked_objects(&self) -> impl Iterator<Item = S::Node> + '_ {
        self.objects.keys().copied()
    }

    pub fn object_data(&self, node: S::Node) -> Option<&AnimationData<S>> {
        self.objects.get(&node)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

/// Fold the visibility track into a recorded scale track.
fn merged_scale<S: SceneGraph>(
    visibility: Option<&VisibilityTrack<S>>,
    times: &[f64],
    values: &[Value],
    interpolation: Interpolation,
) -> Option<MergedScaleCurve> {
    let visibility = visibility.filter(|v| !v.is_empty())?;
    let scales: Vec<[f32; 3]> = values.iter().filter_map(Value::as_vec3).collect();
    if scales.len() != times.len() {
        log::warn!("scale track holds non-vector values; exported without visibility");
        return None;
    }
    merge_visibility_and_scale(
        Some(VisibilitySeries {
            times: visibility.times(),
            visibilities: visibility.visibilities(),
        }),
        Some(ScaleSeries {
            times,
            scales: &scales,
            interpolation,
        }),
    )
}

impl<S: SceneGraph> fmt::Debug for Recorder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("samplers", &self.samplers)
            .field("objects", &self.objects.len())
            .field("is_recording", &self.is_recording)
            .field("has_recording", &self.has_recording)
            .field("start_time", &self.start_time)
            .field("last_recorded_time", &self.last_recorded_time)
            .finish()
    }
}
