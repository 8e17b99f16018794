use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossbeam_channel::{Receiver, bounded};
use hand_pointer::{
    FrameScheduler, InteractionEvent, TickOutcome, TrackingConfig, TrackingControls, UiContext,
    drag::LayoutMode,
    pipeline::ChannelSink,
    surface::{Element, ElementRegistry, PanelPositionTable, PanelRegistry, PanelSpec},
    synthetic::{HandPose, ScriptStep, ScriptedSource},
    types::{Frame, Point, Rect},
};

const DISPLAY_INTERVAL: Duration = Duration::from_millis(16);
const CAMERA_WIDTH: u32 = 640;
const CAMERA_HEIGHT: u32 = 480;

fn main() -> Result<()> {
    env_logger::init();

    let config = TrackingConfig::from_env()?;
    let controls = TrackingControls::new(config.sensitivity);
    let script = demo_script();
    let script_len = script.len();

    let (outbound_tx, outbound_rx) = bounded(1);
    let uplink = spawn_uplink(outbound_rx);

    let mut scheduler = FrameScheduler::new(&config, controls.clone(), move || {
        Ok(ScriptedSource::new(script.clone()))
    })?
    .with_sink(ChannelSink::new(outbound_tx));

    let elements = ElementRegistry::new([
        Element::container("chat", Rect::new(100.0, 100.0, 480.0, 360.0)),
        Element::control("chat-send", Rect::new(480.0, 400.0, 80.0, 40.0)).with_parent("chat"),
        Element::control("mic", Rect::new(920.0, 520.0, 80.0, 40.0)),
    ]);
    let panels = PanelRegistry::new([PanelSpec {
        id: "chat".into(),
        width: 480.0,
        height: 360.0,
    }]);
    let mut positions = PanelPositionTable::new([("chat".to_string(), Point::new(100.0, 100.0))]);
    let mut activate = |id: &str| log::info!("activated {id}");

    controls.enable();
    let started = Instant::now();
    // Camera runs at half the display rate, so every other tick repeats a timestamp.
    let display_frames = script_len * 2 + 2;
    for tick in 0..display_frames {
        if tick == display_frames - 1 {
            controls.disable();
        }
        let frame = Frame {
            rgba: vec![0; (CAMERA_WIDTH * CAMERA_HEIGHT * 4) as usize],
            width: CAMERA_WIDTH,
            height: CAMERA_HEIGHT,
            timestamp_ms: (tick / 2) as u64 * 33,
        };
        let mut ui = UiContext {
            elements: &elements,
            panels: &panels,
            positions: &mut positions,
            layout: LayoutMode::Modular,
            activator: &mut activate,
        };

        let outcome = scheduler.tick(&frame, &mut ui);
        match &outcome {
            TickOutcome::Processed(events) | TickOutcome::Stopped(events) => {
                events.iter().for_each(log_event)
            }
            TickOutcome::Skipped(reason) => log::trace!("skipped display frame: {reason:?}"),
        }
        if !outcome.should_reschedule() {
            break;
        }
        thread::sleep(DISPLAY_INTERVAL);
    }

    drop(scheduler);
    let uplinked = uplink.join().unwrap_or(0);
    log::info!(
        "demo finished in {:?}; chat panel at {:?}; {uplinked} frames forwarded",
        started.elapsed(),
        positions.get("chat")
    );
    Ok(())
}

/// Move onto the mic button, click it, then grab the chat panel and drag it right.
fn demo_script() -> Vec<ScriptStep> {
    let mut steps = ScriptedSource::sweep(HandPose::Open, (0.3, 0.3), (0.5, 0.5), 30);
    steps.extend([Some((HandPose::Pinch, 0.5, 0.5)); 5]);
    steps.extend([Some((HandPose::Open, 0.5, 0.5)); 5]);
    steps.push(None);
    steps.extend(ScriptedSource::sweep(HandPose::Open, (0.5, 0.5), (0.15, 0.3), 30));
    steps.extend(ScriptedSource::sweep(HandPose::Fist, (0.15, 0.3), (0.35, 0.4), 30));
    steps.extend([Some((HandPose::Open, 0.35, 0.4)); 5]);
    steps
}

fn spawn_uplink(rx: Receiver<Frame>) -> thread::JoinHandle<usize> {
    thread::spawn(move || {
        let mut forwarded = 0;
        while let Ok(frame) = rx.recv() {
            log::debug!(
                "uplink frame {} ({} bytes)",
                frame.timestamp_ms,
                frame.rgba.len()
            );
            forwarded += 1;
        }
        forwarded
    })
}

fn log_event(event: &InteractionEvent) {
    match event {
        InteractionEvent::CursorMoved { position, pinch } => {
            log::trace!("cursor ({:.0}, {:.0}) pinch={pinch}", position.x, position.y)
        }
        other => log::info!("{other:?}"),
    }
}
