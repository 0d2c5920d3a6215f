//! Micro-worldtest harness for deterministic, tick-based replays.
//!
//! A micro-worldtest steps a tiny simulation for a fixed number of ticks and
//! records selected state each tick. Reports from two independent runs are
//! compared frame by frame through their canonical JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use sidecraft_core::SimTick;

/// Configuration for a micro-worldtest.
#[derive(Debug, Clone)]
pub struct MicroWorldtestConfig {
    /// Human-readable name (written into the report).
    pub name: String,
    /// Number of ticks to step (report includes the initial snapshot at tick 0).
    pub ticks: u64,
}

impl MicroWorldtestConfig {
    /// Config for `ticks` steps under `name`.
    pub fn new(name: impl Into<String>, ticks: u64) -> Self {
        Self {
            name: name.into(),
            ticks,
        }
    }
}

/// Single snapshot frame captured at a given tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MicroWorldtestFrame<S> {
    /// Tick number.
    pub tick: u64,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Every frame of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MicroWorldtestReport<S> {
    /// Name from the config.
    pub name: String,
    /// Frames in tick order.
    pub frames: Vec<MicroWorldtestFrame<S>>,
}

impl<S: Serialize> MicroWorldtestReport<S> {
    /// Final frame's snapshot.
    pub fn last(&self) -> Option<&S> {
        self.frames.last().map(|f| &f.snapshot)
    }

    /// Canonical JSON rendering used for comparisons.
    pub fn to_canonical_json(&self) -> Result<String> {
        canonical_json(self)
    }
}

/// Run a micro-worldtest and return its report.
///
/// Captures the initial snapshot at tick 0, then steps `config.ticks` times,
/// capturing a snapshot after each step (so the report contains `ticks + 1`
/// frames).
pub fn run_micro_worldtest<State, Snapshot, StepFn, SnapFn>(
    config: MicroWorldtestConfig,
    mut state: State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> Result<MicroWorldtestReport<Snapshot>>
where
    Snapshot: Serialize,
    StepFn: FnMut(SimTick, &mut State),
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let mut frames = Vec::with_capacity(config.ticks as usize + 1);

    let mut tick = SimTick::ZERO;
    frames.push(MicroWorldtestFrame {
        tick: tick.0,
        snapshot: snapshot(tick, &state),
    });

    for _ in 0..config.ticks {
        step(tick, &mut state);
        tick = tick.advance(1);
        frames.push(MicroWorldtestFrame {
            tick: tick.0,
            snapshot: snapshot(tick, &state),
        });
    }

    Ok(MicroWorldtestReport {
        name: config.name,
        frames,
    })
}

/// Fail with the first diverging tick when two runs differ.
pub fn assert_same_replay<S: Serialize>(
    a: &MicroWorldtestReport<S>,
    b: &MicroWorldtestReport<S>,
) -> Result<()> {
    if a.frames.len() != b.frames.len() {
        anyhow::bail!(
            "Replay length mismatch: {} vs {} frames",
            a.frames.len(),
            b.frames.len()
        );
    }
    for (fa, fb) in a.frames.iter().zip(&b.frames) {
        if canonical_json(&fa.snapshot)? != canonical_json(&fb.snapshot)? {
            anyhow::bail!("Replays diverge at tick {}", fa.tick);
        }
    }
    Ok(())
}

/// Pretty JSON plus a trailing newline. Goes through [`serde_json::Value`],
/// whose default map keeps object keys sorted at every depth.
fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize replay frame")?;
    let mut out = serde_json::to_string_pretty(&value).context("Failed to format replay JSON")?;
    out.push('\n');
    Ok(out)
}
