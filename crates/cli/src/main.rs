use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use std::path::{Path, PathBuf};
use tangram::api::{
    apply_hint, assign, is_board_solved, BoardFrame, LevelSession, LevelSet, MatchCfg,
    PieceInstance, Progress,
};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod script;
mod stats;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "tangram")]
#[command(about = "Tangram placement validator and hint engine")]
struct Cmd {
    /// Level definitions (JSON)
    #[arg(long, global = true, default_value = "data/levels.json")]
    levels: PathBuf,

    #[command(subcommand)]
    action: Action,
}

/// Match tolerances; `--strict` switches to 10 units / 1°.
#[derive(Args, Clone, Copy)]
struct TolArgs {
    #[arg(long)]
    strict: bool,
    /// Per-axis position tolerance in board units
    #[arg(long)]
    pos_tol: Option<f64>,
    /// Rotation tolerance in degrees
    #[arg(long)]
    rot_tol: Option<f64>,
}

impl TolArgs {
    fn cfg(self) -> MatchCfg {
        let mut cfg = if self.strict {
            MatchCfg::strict()
        } else {
            MatchCfg::default()
        };
        if let Some(t) = self.pos_tol {
            cfg.position_tolerance = t;
        }
        if let Some(t) = self.rot_tol {
            cfg.rotation_tolerance = t;
        }
        cfg
    }
}

#[derive(Subcommand)]
enum Action {
    /// Check whether a board of pieces solves a level
    Check {
        #[arg(long)]
        level: u32,
        /// Piece states (JSON array)
        #[arg(long)]
        pieces: PathBuf,
        #[command(flatten)]
        tol: TolArgs,
    },
    /// Snap one unsolved piece into place and write the new board
    Hint {
        #[arg(long)]
        level: u32,
        #[arg(long)]
        pieces: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[command(flatten)]
        tol: TolArgs,
    },
    /// Replay a scripted session of moves, rotations, ticks and hints
    Play {
        #[arg(long)]
        level: u32,
        #[arg(long)]
        script: PathBuf,
        #[arg(long, default_value = "data/progress.json")]
        progress: PathBuf,
        /// Optional final board output
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[command(flatten)]
        tol: TolArgs,
    },
    /// Write per-level statistics from saved progress as CSV
    Stats {
        #[arg(long, default_value = "data/progress.json")]
        progress: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Check { level, pieces, tol } => check(&cmd.levels, level, &pieces, tol.cfg()),
        Action::Hint {
            level,
            pieces,
            out,
            seed,
            tol,
        } => hint(&cmd.levels, level, &pieces, &out, seed, tol.cfg()),
        Action::Play {
            level,
            script,
            progress,
            out,
            seed,
            tol,
        } => play(&cmd.levels, level, &script, &progress, out.as_deref(), seed, tol.cfg()),
        Action::Stats { progress, out } => stats(&cmd.levels, &progress, &out),
        Action::Report => report(),
    }
}

fn read_pieces(path: &Path) -> Result<Vec<PieceInstance>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing pieces {}", path.display()))
}

fn write_json(path: &Path, value: &impl serde::Serialize) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn check(levels: &Path, level: u32, pieces: &Path, cfg: MatchCfg) -> Result<()> {
    let set = LevelSet::load(levels)?;
    let target = &set.get(level)?.target_shape;
    let board = read_pieces(pieces)?;
    let frame = BoardFrame::default();
    let assignment = assign(&board, target, &frame, &cfg);
    let solved = is_board_solved(&board, Some(target), &frame, &cfg);
    tracing::info!(level, solved, matched = assignment.matched_count(), "check");
    let pairs: Vec<_> = assignment
        .piece_slot
        .iter()
        .zip(&board)
        .map(|(slot, p)| json!({ "piece": p.id, "slot": slot.map(|j| &target.slots[j].id) }))
        .collect();
    let obj = json!({
        "level": level,
        "solved": solved,
        "matched": assignment.matched_count(),
        "slots": target.slots.len(),
        "assignment": pairs,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn hint(levels: &Path, level: u32, pieces: &Path, out: &Path, seed: u64, cfg: MatchCfg) -> Result<()> {
    let set = LevelSet::load(levels)?;
    let target = &set.get(level)?.target_shape;
    let mut board = read_pieces(pieces)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let hint = apply_hint(&mut board, Some(target), &BoardFrame::default(), &cfg, &mut rng);
    match &hint {
        Some(h) => tracing::info!(piece = %h.piece_id, slot = h.slot_index, penalty = h.penalty_secs, "hint"),
        None => tracing::info!("no piece eligible for a hint"),
    }
    write_json(out, &board)?;
    let params = json!({
        "level": level,
        "pieces": pieces.to_string_lossy(),
        "piece": hint.as_ref().map(|h| h.piece_id.clone()),
        "penalty_secs": hint.as_ref().map(|h| h.penalty_secs),
    });
    write_sidecar(out, Payload::new(params).with_seed(seed))?;
    Ok(())
}

fn play(
    levels: &Path,
    level: u32,
    script_path: &Path,
    progress_path: &Path,
    out: Option<&Path>,
    seed: u64,
    cfg: MatchCfg,
) -> Result<()> {
    let set = LevelSet::load(levels)?;
    let lvl = set.get(level)?;
    let actions = script::load(script_path)?;
    let mut progress = Progress::load(progress_path)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut session = LevelSession::resume(lvl, &mut progress, cfg, &mut rng);
    let summary = script::replay(&mut session, &actions, &mut progress, &mut rng);
    if let Some(out) = out {
        write_json(out, &session.pieces())?;
        let params = json!({
            "level": level,
            "script": script_path.to_string_lossy(),
            "summary": summary,
        });
        write_sidecar(out, Payload::new(params).with_seed(seed))?;
    }
    session.suspend(&mut progress);
    progress.save(progress_path)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn stats(levels: &Path, progress: &Path, out: &Path) -> Result<()> {
    let set = LevelSet::load(levels)?;
    let progress = Progress::load(progress)?;
    let mut df = stats::stats_frame(&set, &progress)?;
    tracing::info!(rows = df.height(), cols = df.width(), "stats table");
    stats::write_csv(&mut df, out)?;
    write_sidecar(out, Payload::new(json!({ "levels": levels.to_string_lossy() })))?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "tool": "tangram",
        "version": tangram::VERSION,
        "code_rev": provenance::current_git_rev(),
        "defaults": {
            "position_tolerance": MatchCfg::default().position_tolerance,
            "rotation_tolerance": MatchCfg::default().rotation_tolerance,
            "hint_penalty_secs": tangram::api::HINT_PENALTY_SECS,
        }
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
