use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    merges: HashMap<String, String>,
    reductions: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

fn sorted_keys<T>(map: &HashMap<String, T>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

/// Timestamp in an expected curve: either exact, or "the closest representable time
/// before" the given value.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FixtureTime {
    Exact(f64),
    Before { before: f64 },
}

impl FixtureTime {
    /// Concrete time; `before` maps a `Before` entry to its neighbour.
    pub fn resolve(self, before: impl Fn(f64) -> f64) -> f64 {
        match self {
            FixtureTime::Exact(t) => t,
            FixtureTime::Before { before: t } => before(t),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Series<T, V> {
    pub times: Vec<T>,
    pub values: Vec<V>,
}

pub mod merges {
    use super::*;

    /// Visibility and scale inputs with the merged scale curve they should produce.
    #[derive(Clone, Debug, Deserialize)]
    pub struct MergeFixture {
        #[serde(default)]
        pub description: String,
        pub scale: Option<Series<f64, [f32; 3]>>,
        pub visibility: Option<Series<f64, bool>>,
        pub expected: Option<Series<FixtureTime, [f32; 3]>>,
    }

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.merges)
    }

    pub fn load(name: &str) -> Result<MergeFixture> {
        let rel = lookup(&MANIFEST.merges, "merge", name)?;
        super::load_json(rel)
    }
}

pub mod reductions {
    use super::*;

    /// Keyframes before and after redundant keyframe removal.
    #[derive(Clone, Debug, Deserialize)]
    pub struct ReductionFixture {
        pub times: Vec<f64>,
        pub values: Vec<f64>,
        pub expected: Series<f64, f64>,
    }

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.reductions)
    }

    pub fn load(name: &str) -> Result<ReductionFixture> {
        let rel = lookup(&MANIFEST.reductions, "reduction", name)?;
        super::load_json(rel)
    }
}
