//! Line-based gesture scripts.
//!
//! Settings come first, then steps:
//!
//! ```text
//! axis x              # x | y | both
//! throwable
//! friction 0.8
//! container 400 100
//! limits 0 0 300 100  # left top width height, `nan` for an open edge
//! start 10 0 [pointer]
//! wait 8              # ms, fires due timers
//! move 40 0 [pointer]
//! end | cancel
//! frames [max]        # run display frames until idle
//! position 50 0       # percent of the container
//! ```

use anyhow::{anyhow, bail, Context, Result};
use swipekit_ui::{Axis, DraggableConfig, Limits, Size, Vector2};

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Start(Vector2, Option<u64>),
    Move(Vector2, Option<u64>),
    End,
    Cancel,
    Wait(u64),
    Frames(usize),
    Position(f32, f32),
}

#[derive(Debug, Clone)]
pub struct Script {
    pub config: DraggableConfig,
    pub container: Size,
    pub limits: Limits,
    pub steps: Vec<Step>,
}

const DEFAULT_MAX_FRAMES: usize = 10_000;

pub fn parse(source: &str) -> Result<Script> {
    let mut script = Script {
        config: DraggableConfig::default(),
        container: Size::new(400.0, 400.0),
        limits: Limits::UNBOUNDED,
        steps: Vec::new(),
    };

    for (index, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        parse_line(&mut script, line)
            .with_context(|| format!("line {}: `{}`", index + 1, raw.trim()))?;
    }
    Ok(script)
}

fn parse_line(script: &mut Script, line: &str) -> Result<()> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    match command {
        "axis" => {
            script.config.axis = match args.first().copied() {
                Some("x") => Axis::X,
                Some("y") => Axis::Y,
                Some("both") => Axis::Both,
                other => bail!("unknown axis {other:?}"),
            };
        }
        "throwable" => script.config.is_throwable = true,
        "friction" => script.config.friction = number(&args, 0)?,
        "amplifier" => script.config.amplifier = number(&args, 0)?,
        "container" => script.container = Size::new(number(&args, 0)?, number(&args, 1)?),
        "limits" => {
            script.limits = Limits::new(
                number(&args, 0)?,
                number(&args, 1)?,
                number(&args, 2)?,
                number(&args, 3)?,
            )
        }
        "start" => script.steps.push(Step::Start(point(&args)?, pointer(&args)?)),
        "move" => script.steps.push(Step::Move(point(&args)?, pointer(&args)?)),
        "end" => script.steps.push(Step::End),
        "cancel" => script.steps.push(Step::Cancel),
        "wait" => script.steps.push(Step::Wait(integer(&args, 0)?)),
        "frames" => {
            let max = if args.is_empty() {
                DEFAULT_MAX_FRAMES
            } else {
                integer(&args, 0)? as usize
            };
            script.steps.push(Step::Frames(max));
        }
        "position" => script
            .steps
            .push(Step::Position(number(&args, 0)?, number(&args, 1)?)),
        other => bail!("unknown command `{other}`"),
    }
    Ok(())
}

fn arg<'a>(args: &[&'a str], index: usize) -> Result<&'a str> {
    args.get(index)
        .copied()
        .ok_or_else(|| anyhow!("missing argument {}", index + 1))
}

fn number(args: &[&str], index: usize) -> Result<f32> {
    let text = arg(args, index)?;
    text.parse()
        .with_context(|| format!("`{text}` is not a number"))
}

fn integer(args: &[&str], index: usize) -> Result<u64> {
    let text = arg(args, index)?;
    text.parse()
        .with_context(|| format!("`{text}` is not a whole number"))
}

fn point(args: &[&str]) -> Result<Vector2> {
    Ok(Vector2::new(number(args, 0)?, number(args, 1)?))
}

fn pointer(args: &[&str]) -> Result<Option<u64>> {
    if args.len() > 2 {
        integer(args, 2).map(Some)
    } else {
        Ok(None)
    }
}
