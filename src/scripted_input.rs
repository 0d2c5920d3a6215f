use anyhow::{Context, Result};
use serde::Deserialize;
use sidecraft_core::{BlockType, GameMode};
use sidecraft_physics::MoveInput;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptedStep {
    ticks: u64,
    #[serde(default)]
    left: bool,
    #[serde(default)]
    right: bool,
    #[serde(default)]
    jump: bool,
    #[serde(default)]
    place: Option<PlaceSpec>,
    #[serde(default)]
    remove: Option<Offset>,
}

#[derive(Debug, Clone, Deserialize)]
struct PlaceSpec {
    #[serde(flatten)]
    offset: Offset,
    block: String,
    #[serde(default)]
    mode: GameMode,
}

/// Offset from the player's centre, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

/// A block placement requested by the script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceAction {
    pub offset: Offset,
    pub block_type: BlockType,
    pub mode: GameMode,
}

/// Everything the script asks for on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScriptedTick {
    pub input: MoveInput,
    pub place: Option<PlaceAction>,
    pub remove: Option<Offset>,
}

#[derive(Debug, Clone)]
struct ResolvedStep {
    ticks: u64,
    input: MoveInput,
    place: Option<PlaceAction>,
    remove: Option<Offset>,
}

/// Plays back a JSON input script one tick at a time.
///
/// Edits fire on the first tick of their step; movement is held for the
/// whole step. After the last step the player idles.
pub struct ScriptedInputPlayer {
    steps: Vec<ResolvedStep>,
    index: usize,
    tick_in_step: u64,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("Invalid script {}", path.display()))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        let steps = file
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| step.resolve().with_context(|| format!("step {i}")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            steps,
            index: 0,
            tick_in_step: 0,
        })
    }

    /// Ticks covered by the script.
    pub fn total_ticks(&self) -> u64 {
        self.steps.iter().map(|s| s.ticks).sum()
    }

    /// Input for the next tick.
    pub fn advance(&mut self) -> ScriptedTick {
        while let Some(step) = self.steps.get(self.index) {
            if self.tick_in_step < step.ticks {
                break;
            }
            self.index += 1;
            self.tick_in_step = 0;
        }
        let Some(step) = self.steps.get(self.index) else {
            return ScriptedTick::default();
        };

        let first = self.tick_in_step == 0;
        self.tick_in_step += 1;
        ScriptedTick {
            input: step.input,
            place: step.place.filter(|_| first),
            remove: step.remove.filter(|_| first),
        }
    }
}

impl ScriptedStep {
    fn resolve(self) -> Result<ResolvedStep> {
        let place = match self.place {
            Some(requested) => Some(PlaceAction {
                offset: requested.offset,
                block_type: requested.block.parse::<BlockType>()?,
                mode: requested.mode,
            }),
            None => None,
        };
        Ok(ResolvedStep {
            ticks: self.ticks,
            input: MoveInput {
                left: self.left,
                right: self.right,
                jump: self.jump,
            },
            place,
            remove: self.remove,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "steps": [
            { "ticks": 2, "right": true, "place": { "dx": 50, "dy": 0, "block": "Stone", "mode": "creative" } },
            { "ticks": 0, "left": true },
            { "ticks": 1, "jump": true, "remove": { "dx": 0, "dy": 50 } }
        ]
    }"#;

    #[test]
    fn steps_hold_input_and_fire_edits_once() {
        let mut player = ScriptedInputPlayer::from_json(SCRIPT).unwrap();
        assert_eq!(player.total_ticks(), 3);

        let first = player.advance();
        assert!(first.input.right);
        let place = first.place.unwrap();
        assert_eq!(place.block_type, BlockType::Stone);
        assert_eq!(place.mode, GameMode::Creative);
        assert_eq!(place.offset, Offset { dx: 50.0, dy: 0.0 });

        let second = player.advance();
        assert!(second.input.right);
        assert!(second.place.is_none());

        // Zero-length steps are skipped.
        let third = player.advance();
        assert!(third.input.jump && !third.input.left);
        assert_eq!(third.remove, Some(Offset { dx: 0.0, dy: 50.0 }));

        assert_eq!(player.advance(), ScriptedTick::default());
        assert_eq!(player.advance(), ScriptedTick::default());
    }

    #[test]
    fn unknown_block_names_are_rejected() {
        let script = r#"{ "steps": [ { "ticks": 1, "place": { "dx": 0, "dy": 0, "block": "obsidian" } } ] }"#;
        let err = ScriptedInputPlayer::from_json(script).err().unwrap();
        assert!(format!("{err:#}").contains("obsidian"));
    }

    #[test]
    fn empty_scripts_are_rejected() {
        assert!(ScriptedInputPlayer::from_json(r#"{ "steps": [] }"#).is_err());
    }
}
