//! Per-level statistics table built from saved progress.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tangram::api::{LevelSet, Progress};

/// One row per level: id, name, difficulty, unlocked, completed, attempts, best time.
pub fn stats_frame(levels: &LevelSet, progress: &Progress) -> PolarsResult<DataFrame> {
    let mut ids = Vec::new();
    let mut names = Vec::new();
    let mut difficulties = Vec::new();
    let mut unlocked = Vec::new();
    let mut completed = Vec::new();
    let mut attempts = Vec::new();
    let mut best = Vec::new();
    for level in &levels.levels {
        let s = progress.stats(level.id);
        ids.push(level.id);
        names.push(level.name.clone());
        difficulties.push(format!("{:?}", level.difficulty));
        unlocked.push(progress.is_unlocked(levels, level.difficulty));
        completed.push(progress.is_completed(level.id));
        attempts.push(s.attempts);
        best.push(s.best_time);
    }
    df!(
        "level" => ids,
        "name" => names,
        "difficulty" => difficulties,
        "unlocked" => unlocked,
        "completed" => completed,
        "attempts" => attempts,
        "best_time" => best
    )
}

pub fn write_csv(df: &mut DataFrame, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
