mod script;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use swipekit_core::Runtime;
use swipekit_ui::{
    DragTarget, Draggable, GestureEvent, GestureEventKind, GestureEventSource, InputEvent,
    InputKind, Size,
};

use crate::script::{Script, Step};

/// Replays a scripted pointer gesture and logs every gesture event.
#[derive(Parser, Debug)]
#[command(name = "drag-replay", version)]
struct Args {
    /// Gesture script to replay; the bundled `default.gesture` when omitted
    script: Option<PathBuf>,
}

const FRAME_NANOS: u64 = 16_666_667;
const FRAME_MILLIS: u64 = 16;

struct ReplaySurface {
    container: Size,
}

impl DragTarget for ReplaySurface {
    fn id(&self) -> u64 {
        1
    }

    fn container_size(&self) -> Size {
        self.container
    }
}

fn log_event(event: &GestureEvent) {
    log::info!(
        "{:?}: delta=({:.1}, {:.1}) dt={}ms velocity=({:.3}, {:.3}) dir={:?}/{:?} pixel=({:.1}, {:.1}) percent=({:.1}, {:.1}){}",
        event.kind,
        event.delta.x,
        event.delta.y,
        event.delta_time,
        event.current_velocity.x,
        event.current_velocity.y,
        event.direction,
        event.axis_direction,
        event.position.pixel.x,
        event.position.pixel.y,
        event.position.percent.x,
        event.position.percent.y,
        if event.was_cancelled { " (cancelled)" } else { "" },
    );
}

fn replay(script: Script) -> Result<()> {
    let (runtime, clock) = Runtime::manual(0);
    let surface = Rc::new(ReplaySurface {
        container: script.container,
    });
    let draggable = Draggable::new(runtime.handle(), surface, script.config)
        .context("draggable rejected the script settings")?;
    draggable
        .set_limits(script.limits)
        .context("applying limits")?;

    for kind in [
        GestureEventKind::Start,
        GestureEventKind::Move,
        GestureEventKind::End,
        GestureEventKind::Settle,
    ] {
        draggable.on(kind, log_event);
    }
    draggable.set_position_applier(|position| {
        log::debug!("apply ({:.2}, {:.2})", position.pixel.x, position.pixel.y);
    });

    let mut frame = 0u64;
    let mut pointer = None;
    for step in script.steps {
        match step {
            Step::Start(at, id) | Step::Move(at, id) => {
                let kind = if matches!(step, Step::Start(..)) {
                    InputKind::Start
                } else {
                    InputKind::Move
                };
                let mut input = InputEvent::new(kind, at);
                input.pointer_id = id;
                pointer = Some((at, id));
                if !draggable.handle_input(&input) {
                    log::warn!("{kind:?} at ({}, {}) was ignored", at.x, at.y);
                }
            }
            Step::End | Step::Cancel => {
                let kind = if step == Step::End {
                    InputKind::End
                } else {
                    InputKind::Cancel
                };
                let (at, id) = pointer.unwrap_or_default();
                let mut input = InputEvent::new(kind, at);
                input.pointer_id = id;
                draggable.handle_input(&input);
            }
            Step::Wait(millis) => {
                clock.advance(millis);
                runtime.pump_timers();
            }
            Step::Frames(max) => {
                let mut ran = 0;
                while ran < max && runtime.has_frame_callbacks() {
                    frame += 1;
                    ran += 1;
                    clock.advance(FRAME_MILLIS);
                    runtime.drain_frame_callbacks(frame * FRAME_NANOS);
                }
                log::info!("ran {ran} frames");
            }
            Step::Position(x, y) => {
                draggable
                    .set_position(x, y)
                    .with_context(|| format!("setting position to {x}%, {y}%"))?;
            }
        }
    }

    let final_position = draggable.get_position(false)?;
    println!("final position: ({}, {})", final_position.x, final_position.y);
    draggable.dispose();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let source = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => include_str!("../default.gesture").to_owned(),
    };
    let script = script::parse(&source)?;
    replay(script)
}
