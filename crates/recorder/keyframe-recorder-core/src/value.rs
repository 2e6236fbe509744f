//! Recorded values and the typed sample data produced by the built-in samplers.
//! All numeric components use f32, matching what the curve consumers store.

use serde::{Deserialize, Serialize};

/// Lightweight kind enum for quick dispatch without matching payloads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    Bool,
    Vec3,
    Quat,
    ColorRgba,
    Vector,
}

/// A single recorded value as handed to an [`AnimationSink`](crate::sink::AnimationSink).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// Boolean (step)
    Bool(bool),

    /// 3D vector (translation, scale)
    Vec3([f32; 3]),

    /// Quaternion (x, y, z, w)
    Quat([f32; 4]),

    /// RGBA color (linear by convention)
    #[serde(rename = "color")]
    ColorRgba([f32; 4]),

    /// Variable-length numeric vector (blend shape weights)
    Vector(Vec<f32>),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Quat(_) => ValueKind::Quat,
            Value::ColorRgba(_) => ValueKind::ColorRgba,
            Value::Vector(_) => ValueKind::Vector,
        }
    }

    #[inline]
    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        match self {
            Value::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Rotation quaternion (x, y, z, w).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quat(pub [f32; 4]);

impl Quat {
    pub const IDENTITY: Quat = Quat([0.0, 0.0, 0.0, 1.0]);
}

/// Linear RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba(pub [f32; 4]);

/// Blend shape weights of one mesh at one instant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Weights(pub Vec<f32>);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<[f32; 3]> for Value {
    fn from(v: [f32; 3]) -> Self {
        Value::Vec3(v)
    }
}

impl From<Quat> for Value {
    fn from(q: Quat) -> Self {
        Value::Quat(q.0)
    }
}

impl From<ColorRgba> for Value {
    fn from(c: ColorRgba) -> Self {
        Value::ColorRgba(c.0)
    }
}

impl From<Weights> for Value {
    fn from(w: Weights) -> Self {
        Value::Vector(w.0)
    }
}

pub const VEC3_ZERO: [f32; 3] = [0.0, 0.0, 0.0];
pub const VEC3_ONE: [f32; 3] = [1.0, 1.0, 1.0];

/// Unclamped component-wise linear interpolation.
#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}
