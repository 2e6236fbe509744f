//! Sampler contract and the registry resolved once per recorder.
//!
//! A [`Sampler`] describes one animatable property: where it lives on a node, how to read
//! it, its curve name, interpolation and value equality. Samplers are stateless; several
//! tracks may call the same sampler many times per instant.

use std::any::TypeId;
use std::fmt::{self, Debug};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::config::RecorderConfig;
use crate::interpolation::Interpolation;
use crate::samplers::{
    BaseColorSampler, BlendWeightSampler, RotationSampler, ScaleSampler, TranslationSampler,
    VisibilitySampler, BASE_COLOR_FACTOR, ROTATION, SCALE, TRANSLATION, WEIGHTS,
};
use crate::scene::SceneGraph;
use crate::track::{AnimationTrack, Track};
use crate::value::Value;

/// Decides per node whether transforms are sampled in world space (`true`) or local space.
pub type WorldSpacePredicate<S> = Arc<dyn Fn(&S, <S as SceneGraph>::Node) -> bool>;

/// One animatable property of a scene node.
pub trait Sampler<S: SceneGraph> {
    /// Sub-target the value is read from (transform, material, ...).
    type Target: 'static;
    /// Domain value type of the property.
    type Data: Clone + PartialEq + Debug + Into<Value> + 'static;

    /// Curve name handed to the sink (e.g. "translation").
    fn property_name(&self) -> &str;

    fn interpolation(&self) -> Interpolation {
        Interpolation::Linear
    }

    /// Locate the sub-target on `node`; `None` when the node lacks it.
    fn target_of(&self, scene: &S, node: S::Node) -> Option<Self::Target>;

    /// Read the current value; `None` means nothing is recorded for this instant.
    fn read(&self, scene: &S, node: S::Node, target: &Self::Target) -> Option<Self::Data>;

    /// Value equality used for redundant sample elision. Exact by default.
    fn equals(&self, a: &Self::Data, b: &Self::Data) -> bool {
        a == b
    }

    /// Resolve the target and read through it.
    fn sample(&self, scene: &S, node: S::Node) -> Option<Self::Data> {
        let target = self.target_of(scene, node)?;
        self.read(scene, node, &target)
    }
}

/// Type-erased view of a [`Sampler`] used to start tracks for heterogeneous data types.
pub trait DynSampler<S: SceneGraph> {
    fn sampler_name(&self) -> &str;

    /// Start a track for `node` at `time`, or `None` if the node lacks the sub-target.
    fn start_track(
        self: Arc<Self>,
        scene: &S,
        node: S::Node,
        time: f64,
    ) -> Option<Box<dyn AnimationTrack<S>>>;
}

impl<S, P> DynSampler<S> for P
where
    S: SceneGraph,
    P: Sampler<S> + 'static,
{
    fn sampler_name(&self) -> &str {
        self.property_name()
    }

    fn start_track(
        self: Arc<Self>,
        scene: &S,
        node: S::Node,
        time: f64,
    ) -> Option<Box<dyn AnimationTrack<S>>> {
        self.target_of(scene, node)?;
        Some(Box::new(Track::start(self, scene, node, time)))
    }
}

/// Curve names reserved for built-in samplers, whether or not the config enables them.
const BUILTIN_CURVES: [&str; 5] = [TRANSLATION, ROTATION, SCALE, WEIGHTS, BASE_COLOR_FACTOR];

/// Registry key for caller-supplied samplers: (target type, data type).
pub type SamplerKey = (TypeId, TypeId);

/// Samplers available to a recorder.
///
/// The visibility sampler is held apart from the rest: its track is sampled first and is
/// merged into `scale` on export instead of being exported on its own.
pub struct SamplerRegistry<S: SceneGraph> {
    visibility: Option<Arc<VisibilitySampler>>,
    builtin: Vec<Arc<dyn DynSampler<S>>>,
    custom: IndexMap<SamplerKey, Arc<dyn DynSampler<S>>>,
}

impl<S: SceneGraph> Default for SamplerRegistry<S> {
    fn default() -> Self {
        Self {
            visibility: None,
            builtin: Vec::new(),
            custom: IndexMap::new(),
        }
    }
}

impl<S: SceneGraph> SamplerRegistry<S> {
    /// Empty registry; no property is recorded until samplers are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in samplers selected by `cfg`: transform samplers always, visibility,
    /// blend weights and base color depending on the flags.
    pub fn from_config(cfg: &RecorderConfig, world_space: Option<WorldSpacePredicate<S>>) -> Self {
        let mut registry = Self::new();
        if cfg.record_visibility {
            registry.visibility = Some(Arc::new(VisibilitySampler));
        }
        registry.push_builtin(TranslationSampler::new(world_space.clone()));
        registry.push_builtin(RotationSampler::new(world_space.clone()));
        registry.push_builtin(ScaleSampler::new(world_space));
        if cfg.record_blend_shapes {
            registry.push_builtin(BlendWeightSampler);
        }
        if cfg.record_animation_pointer {
            registry.push_builtin(BaseColorSampler);
        }
        registry
    }

    fn push_builtin<P: Sampler<S> + 'static>(&mut self, sampler: P) {
        self.builtin.push(Arc::new(sampler));
    }

    /// Register a caller-supplied sampler. At most one sampler exists per
    /// (target type, data type) pair; a later registration replaces the earlier one.
    ///
    /// Curve names already used by a built-in sampler (or by visibility) are rejected;
    /// returns whether the sampler was registered.
    pub fn register_custom<P: Sampler<S> + 'static>(&mut self, sampler: P) -> bool {
        let key = (TypeId::of::<P::Target>(), TypeId::of::<P::Data>());
        let name = sampler.property_name().to_string();
        if self.is_builtin_name(&name) {
            log::warn!(
                "custom sampler '{}' ignored: the curve name belongs to a built-in sampler",
                name
            );
            return false;
        }
        if let Some(previous) = self.custom.insert(key, Arc::new(sampler)) {
            log::debug!(
                "custom sampler '{}' replaces '{}' for the same target/data types",
                name,
                previous.sampler_name()
            );
        }
        true
    }

    fn is_builtin_name(&self, name: &str) -> bool {
        name == VisibilitySampler::PROPERTY_NAME || BUILTIN_CURVES.contains(&name)
    }

    pub fn visibility(&self) -> Option<&Arc<VisibilitySampler>> {
        self.visibility.as_ref()
    }

    /// All non-visibility samplers, built-ins first, then custom ones in registration order.
    pub fn samplers(&self) -> impl Iterator<Item = &Arc<dyn DynSampler<S>>> {
        self.builtin.iter().chain(self.custom.values())
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.custom.len() + usize::from(self.visibility.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: SceneGraph> Debug for SamplerRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SamplerRegistry")
            .field("visibility", &self.visibility.is_some())
            .field(
                "samplers",
                &self.samplers().map(|s| s.sampler_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
