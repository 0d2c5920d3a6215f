use crate::scripted_input::{Offset, ScriptedInputPlayer, ScriptedTick};
use anyhow::Result;
use serde::Serialize;
use sidecraft_core::BlockType;
use sidecraft_physics::PlayerState;
use sidecraft_testkit::{EventRecord, JsonlSink};
use sidecraft_world::{SimConfig, Simulation};
use tracing::{debug, info};

pub struct HeadlessConfig {
    pub sim: SimConfig,
    pub script: Option<ScriptedInputPlayer>,
    pub ticks: u64,
    pub event_log: Option<JsonlSink>,
}

#[derive(Debug, Serialize)]
struct StepPayload {
    player: PlayerState,
    blocks: usize,
    chunks: usize,
    generated: usize,
}

#[derive(Debug, Serialize)]
struct EditPayload {
    x: f64,
    y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    block: Option<BlockType>,
    accepted: bool,
}

/// End-of-run numbers printed by the runner.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub player: PlayerState,
    pub blocks: usize,
    pub chunks: usize,
    pub placed: usize,
    pub removed: usize,
}

pub fn run(mut cfg: HeadlessConfig) -> Result<RunSummary> {
    let seed = cfg.sim.seed;
    let mut sim = Simulation::new(cfg.sim);
    let (mut placed, mut removed) = (0, 0);

    info!(seed, ticks = cfg.ticks, "Starting headless run");
    for _ in 0..cfg.ticks {
        let scripted = match cfg.script.as_mut() {
            Some(script) => script.advance(),
            None => ScriptedTick::default(),
        };

        if let Some(action) = scripted.place {
            let (x, y) = target(&sim, action.offset);
            let accepted = sim.try_place_block(x, y, action.block_type, action.mode);
            placed += usize::from(accepted);
            log_event(
                &mut cfg.event_log,
                &sim,
                "place",
                EditPayload {
                    x,
                    y,
                    block: Some(action.block_type),
                    accepted,
                },
            )?;
        }
        if let Some(offset) = scripted.remove {
            let (x, y) = target(&sim, offset);
            let accepted = sim.try_remove_block(x, y);
            removed += usize::from(accepted);
            log_event(
                &mut cfg.event_log,
                &sim,
                "remove",
                EditPayload {
                    x,
                    y,
                    block: None,
                    accepted,
                },
            )?;
        }

        let chunks_before = sim.chunks().len();
        let player = sim.step(scripted.input);
        let payload = StepPayload {
            player,
            blocks: sim.world().len(),
            chunks: sim.chunks().len(),
            generated: sim.chunks().len() - chunks_before,
        };
        if payload.generated > 0 {
            debug!(tick = sim.tick().0, generated = payload.generated, "streamed chunks");
        }
        log_event(&mut cfg.event_log, &sim, "step", payload)?;
    }

    if let Some(sink) = cfg.event_log.as_mut() {
        sink.flush()?;
    }

    let summary = RunSummary {
        seed,
        ticks: sim.tick().0,
        player: *sim.player(),
        blocks: sim.world().len(),
        chunks: sim.chunks().len(),
        placed,
        removed,
    };
    info!(
        ticks = summary.ticks,
        x = summary.player.x,
        y = summary.player.y,
        blocks = summary.blocks,
        chunks = summary.chunks,
        "Headless run complete"
    );
    Ok(summary)
}

fn target(sim: &Simulation, offset: Offset) -> (f64, f64) {
    let centre = sim.player_rect().center();
    (centre.x + offset.dx, centre.y + offset.dy)
}

fn log_event<P: Serialize>(
    sink: &mut Option<JsonlSink>,
    sim: &Simulation,
    kind: &str,
    payload: P,
) -> Result<()> {
    match sink {
        Some(sink) => sink.write(&EventRecord {
            tick: sim.tick(),
            kind,
            payload,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_run_settles_on_the_ground() {
        let summary = run(HeadlessConfig {
            sim: SimConfig::with_seed(3),
            script: None,
            ticks: 90,
            event_log: None,
        })
        .unwrap();
        assert_eq!(summary.ticks, 90);
        assert!(summary.player.on_ground);
        assert_eq!(summary.player.y, -50.0);
        assert_eq!(summary.chunks, 49);
    }

    #[test]
    fn scripted_edits_are_counted() {
        let script = ScriptedInputPlayer::from_json(
            r#"{ "steps": [
                { "ticks": 60 },
                { "ticks": 1, "place": { "dx": 75, "dy": 0, "block": "wood", "mode": "creative" } },
                { "ticks": 1, "remove": { "dx": 75, "dy": 0 } }
            ] }"#,
        )
        .unwrap();
        let summary = run(HeadlessConfig {
            sim: SimConfig::with_seed(3),
            script: Some(script),
            ticks: 62,
            event_log: None,
        })
        .unwrap();
        assert_eq!(summary.placed, 1);
        assert_eq!(summary.removed, 1);
    }
}
