//! Scene collaborator contract.
//!
//! The recorder never owns the scene. Hosts implement [`SceneGraph`] over their own
//! node storage and pass `&scene` into every recorder call; samplers read through it.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::value::Quat;

/// Translation, rotation and scale of one node in one space (local or world).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: [f32; 3],
    pub rotation: Quat,
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: [0.0, 0.0, 0.0],
            rotation: Quat::IDENTITY,
            scale: [1.0, 1.0, 1.0],
        }
    }
}

/// Read-only view of the host scene graph.
///
/// Accessors return `None` when the node (or the component) no longer exists; the
/// recorder treats that as "nothing to record at this instant".
pub trait SceneGraph: 'static {
    /// Stable node identity. Used as the key of per-object recording state.
    type Node: Copy + Eq + Hash + Debug + 'static;

    /// Whether `node` currently exists in the scene.
    fn contains(&self, node: Self::Node) -> bool;

    /// Append `root` and all of its descendants (inactive ones included) to `out`.
    fn collect_subtree(&self, root: Self::Node, out: &mut Vec<Self::Node>);

    /// Whether `node` is `root` or one of its descendants.
    fn is_descendant_of(&self, node: Self::Node, root: Self::Node) -> bool;

    fn local_transform(&self, node: Self::Node) -> Option<Transform>;

    fn world_transform(&self, node: Self::Node) -> Option<Transform>;

    /// The node's own active flag (not inherited from parents).
    fn active_self(&self, node: Self::Node) -> Option<bool>;

    fn has_skinned_mesh(&self, _node: Self::Node) -> bool {
        false
    }

    /// Current blend shape weights of the node's skinned mesh.
    fn blend_shape_weights(&self, _node: Self::Node) -> Option<Vec<f32>> {
        None
    }

    fn has_material(&self, _node: Self::Node) -> bool {
        false
    }

    /// Color property `property` of the node's primary material, if it defines it.
    fn material_color(&self, _node: Self::Node, _property: &str) -> Option<[f32; 4]> {
        None
    }
}

/// Sub-target markers: which part of a node a sampler reads from.
/// Also used as the target half of custom sampler registry keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TransformRef;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeRef;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SkinnedMeshRef;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MaterialRef;
