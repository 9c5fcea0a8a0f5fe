use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsStr;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run parameters recorded next to an output file.
pub struct Payload {
    pub params: Value,
    pub seed: Option<u64>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self { params, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Write `<artifact>.provenance.json` with the code revision, callsite, params, and seed.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "tool": "tangram",
        "version": tangram::VERSION,
        "code_rev": current_git_rev(),
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "seed": payload.seed,
        "params": payload.params,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    tracing::debug!(path = %provenance_path.display(), "provenance written");
    Ok(provenance_path)
}

/// `<dir>/<stem>.provenance.json` beside the artifact.
fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact.file_stem().unwrap_or(OsStr::new("artifact")).to_os_string();
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit the binary was built from, or `"unknown"` outside a checkout.
///
/// `GIT_COMMIT` wins when set at compile time or in the environment.
pub fn current_git_rev() -> String {
    let pinned = option_env!("GIT_COMMIT")
        .filter(|rev| !rev.is_empty())
        .map(str::to_owned)
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|rev| !rev.is_empty()));
    if let Some(rev) = pinned {
        return rev;
    }
    let head = Command::new("git").args(["rev-parse", "--short=12", "HEAD"]).output();
    match head {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_owned(),
        _ => "unknown".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_name_follows_the_board_file() {
        assert_eq!(
            provenance_path(Path::new("runs/level-3/hinted.json")),
            Path::new("runs/level-3/hinted.provenance.json")
        );
        assert_eq!(
            provenance_path(Path::new("stats.csv")),
            Path::new("stats.provenance.json")
        );
    }

    #[test]
    fn hinted_board_sidecar_names_level_seed_and_build() {
        let dir = tempdir().unwrap();
        let board = dir.path().join("boards").join("hinted.json");
        let payload = Payload::new(json!({ "level": 3, "pos_tol": 30.0 })).with_seed(17);
        let sidecar = write_sidecar(&board, payload).unwrap();
        assert_eq!(sidecar, dir.path().join("boards").join("hinted.provenance.json"));

        let doc: Value = serde_json::from_slice(&fs::read(&sidecar).unwrap()).unwrap();
        assert_eq!(doc["tool"], "tangram");
        assert_eq!(doc["version"], tangram::VERSION);
        assert_eq!(doc["seed"], 17);
        assert_eq!(doc["params"]["level"], 3);
        assert_eq!(doc["outputs"][0], board.to_string_lossy().as_ref());
        assert!(!doc["code_rev"].as_str().unwrap().is_empty());
    }

    #[test]
    fn unseeded_outputs_record_a_null_seed() {
        let dir = tempdir().unwrap();
        let csv = dir.path().join("stats.csv");
        let sidecar = write_sidecar(&csv, Payload::new(json!({}))).unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
        assert!(doc["seed"].is_null());
    }
}
