//! Command-line parsing for the `blockfall` binary.
//!
//! ```text
//! blockfall [FLAGS]                         interactive terminal game
//! blockfall headless [FLAGS] [--steps N] [--step-ms MS] [--intents a,b,c]
//!
//! FLAGS: --width N --height N --fall-ms MS --soft-drop-ms MS
//!        --clear-delay-ms MS --piece KIND
//! ```

use anyhow::{anyhow, Context, Result};

use crate::core::GameConfig;
use crate::types::{Intent, PieceKind, TICK_MS};

/// Options for a scripted run without a terminal
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessOptions {
    pub config: GameConfig,
    pub steps: u32,
    pub step_ms: u32,
    /// Applied one per step, before that step runs
    pub intents: Vec<Intent>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play(GameConfig),
    Headless(HeadlessOptions),
}

pub fn parse_args(args: &[String]) -> Result<Command> {
    let (headless, rest) = match args.first().map(String::as_str) {
        Some("headless") => (true, &args[1..]),
        _ => (false, args),
    };

    let mut config = GameConfig::default();
    let mut steps: u32 = 1000;
    let mut step_ms: u32 = TICK_MS;
    let mut intents = Vec::new();

    let mut i = 0usize;
    while i < rest.len() {
        let flag = rest[i].as_str();
        let value = || flag_value(rest, i, flag);
        match flag {
            "--width" => config.width = parse_num(flag, value()?)?,
            "--height" => config.height = parse_num(flag, value()?)?,
            "--fall-ms" => config.base_fall_ms = parse_num(flag, value()?)?,
            "--soft-drop-ms" => config.soft_drop_fall_ms = parse_num(flag, value()?)?,
            "--clear-delay-ms" => config.clear_delay_ms = parse_num(flag, value()?)?,
            "--piece" => {
                let v = value()?;
                config.spawn_kind =
                    PieceKind::from_str(v).ok_or_else(|| anyhow!("unknown piece kind: {}", v))?;
            }
            "--steps" if headless => steps = parse_num(flag, value()?)?,
            "--step-ms" if headless => step_ms = parse_num(flag, value()?)?,
            "--intents" if headless => intents = parse_intents(value()?)?,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 2;
    }

    config.validate().context("invalid game configuration")?;

    Ok(if headless {
        Command::Headless(HeadlessOptions {
            config,
            steps,
            step_ms,
            intents,
        })
    } else {
        Command::Play(config)
    })
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn parse_num<T: std::str::FromStr>(flag: &str, v: &str) -> Result<T> {
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

fn parse_intents(list: &str) -> Result<Vec<Intent>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Intent::from_str(s).ok_or_else(|| anyhow!("unknown intent: {}", s)))
        .collect()
}
