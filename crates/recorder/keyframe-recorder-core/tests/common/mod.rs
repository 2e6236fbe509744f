#![allow(dead_code)]

use std::collections::BTreeMap;

use keyframe_recorder_core::{SceneGraph, Transform};

pub type NodeId = u32;

#[derive(Clone, Debug)]
struct MockNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: Transform,
    active: bool,
    weights: Option<Vec<f32>>,
    color: Option<[f32; 4]>,
}

impl MockNode {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            local: Transform::default(),
            active: true,
            weights: None,
            color: None,
        }
    }
}

/// Minimal scene: node 0 is the root; world transforms compose translation and scale
/// only (rotation is copied from the local transform).
#[derive(Clone, Debug)]
pub struct MockScene {
    nodes: BTreeMap<NodeId, MockNode>,
    next_id: NodeId,
}

pub const ROOT: NodeId = 0;

impl MockScene {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT, MockNode::new(None));
        Self { nodes, next_id: 1 }
    }

    pub fn add(&mut self, parent: NodeId) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, MockNode::new(Some(parent)));
        self.nodes
            .get_mut(&parent)
            .expect("parent exists")
            .children
            .push(id);
        id
    }

    /// Node outside the root's hierarchy.
    pub fn add_detached(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, MockNode::new(None));
        id
    }

    /// Remove `id` and its subtree.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
                parent.children.retain(|c| *c != id);
            }
            for child in node.children {
                self.remove(child);
            }
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut MockNode {
        self.nodes.get_mut(&id).expect("node exists")
    }

    pub fn set_translation(&mut self, id: NodeId, t: [f32; 3]) {
        self.node_mut(id).local.translation = t;
    }

    pub fn set_scale(&mut self, id: NodeId, s: [f32; 3]) {
        self.node_mut(id).local.scale = s;
    }

    pub fn set_active(&mut self, id: NodeId, active: bool) {
        self.node_mut(id).active = active;
    }

    pub fn set_weights(&mut self, id: NodeId, weights: Vec<f32>) {
        self.node_mut(id).weights = Some(weights);
    }

    pub fn set_color(&mut self, id: NodeId, color: [f32; 4]) {
        self.node_mut(id).color = Some(color);
    }

    fn collect(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(node) = self.nodes.get(&id) {
            out.push(id);
            for child in &node.children {
                self.collect(*child, out);
            }
        }
    }
}

impl SceneGraph for MockScene {
    type Node = NodeId;

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn collect_subtree(&self, root: NodeId, out: &mut Vec<NodeId>) {
        self.collect(root, out);
    }

    fn is_descendant_of(&self, node: NodeId, root: NodeId) -> bool {
        if node == root {
            return self.contains(node);
        }
        let mut current = self.nodes.get(&node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == root {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn local_transform(&self, node: NodeId) -> Option<Transform> {
        self.nodes.get(&node).map(|n| n.local)
    }

    fn world_transform(&self, node: NodeId) -> Option<Transform> {
        let mut world = self.nodes.get(&node)?.local;
        let mut current = self.nodes.get(&node).and_then(|n| n.parent);
        while let Some(id) = current {
            let parent = self.nodes.get(&id)?;
            for axis in 0..3 {
                world.translation[axis] =
                    parent.local.translation[axis] + parent.local.scale[axis] * world.translation[axis];
                world.scale[axis] *= parent.local.scale[axis];
            }
            current = parent.parent;
        }
        Some(world)
    }

    fn active_self(&self, node: NodeId) -> Option<bool> {
        self.nodes.get(&node).map(|n| n.active)
    }

    fn has_skinned_mesh(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.weights.is_some())
    }

    fn blend_shape_weights(&self, node: NodeId) -> Option<Vec<f32>> {
        self.nodes.get(&node).and_then(|n| n.weights.clone())
    }

    fn has_material(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.color.is_some())
    }

    fn material_color(&self, node: NodeId, property: &str) -> Option<[f32; 4]> {
        if property != "_BaseColor" {
            return None;
        }
        self.nodes.get(&node).and_then(|n| n.color)
    }
}

pub fn approx_vec3(a: [f32; 3], b: [f32; 3], eps: f32) {
    for axis in 0..3 {
        assert!(
            (a[axis] - b[axis]).abs() <= eps,
            "left={a:?} right={b:?} eps={eps}"
        );
    }
}
