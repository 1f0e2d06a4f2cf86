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
    quizzes: HashMap<String, QuizEntry>,
    #[serde(rename = "scene-configs", default)]
    scene_configs: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuizEntry {
    Path(String),
    Detailed {
        path: String,
        /// Expected scene length in seconds with the default scene config.
        #[serde(default)]
        duration: Option<f32>,
    },
}

impl QuizEntry {
    fn as_path(&self) -> &str {
        match self {
            QuizEntry::Path(path) => path,
            QuizEntry::Detailed { path, .. } => path,
        }
    }

    fn duration(&self) -> Option<f32> {
        match self {
            QuizEntry::Path(_) => None,
            QuizEntry::Detailed { duration, .. } => *duration,
        }
    }
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

pub mod quizzes {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.quizzes.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.quizzes, "quiz", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.quizzes, "quiz", name)?;
        super::load_json(entry.as_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.quizzes, "quiz", name)?;
        Ok(resolve_path(entry.as_path()))
    }

    /// Expected scene duration recorded in the manifest, if any.
    pub fn expected_duration(name: &str) -> Result<Option<f32>> {
        let entry = lookup(&MANIFEST.quizzes, "quiz", name)?;
        Ok(entry.duration())
    }
}

pub mod scene_configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.scene_configs.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.scene_configs, "scene config", name)?;
        read_to_string(rel)
    }
}
