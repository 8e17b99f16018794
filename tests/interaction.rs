use hand_pointer::{
    FrameScheduler, InteractionEvent, TickOutcome, TrackingConfig, TrackingControls, UiContext,
    drag::LayoutMode,
    surface::{Element, ElementRegistry, PanelPositionTable, PanelRegistry, PanelSpec},
    synthetic::{HandPose, ScriptStep, ScriptedSource},
    types::{Frame, Point, Rect},
};

const W: f32 = 1920.0;
const H: f32 = 1080.0;

struct Desk {
    elements: ElementRegistry,
    panels: PanelRegistry,
    positions: PanelPositionTable,
    layout: LayoutMode,
    clicks: Vec<(usize, String)>,
    frame_no: usize,
}

impl Desk {
    fn new() -> Self {
        Self {
            elements: ElementRegistry::new([
                Element::control("mic", Rect::new(940.0, 520.0, 40.0, 40.0)),
                Element::container("mic-glyph", Rect::new(950.0, 530.0, 20.0, 20.0))
                    .with_parent("mic"),
            ]),
            panels: PanelRegistry::new([PanelSpec {
                id: "chat".into(),
                width: 400.0,
                height: 300.0,
            }]),
            positions: PanelPositionTable::new([("chat".to_string(), Point::new(100.0, 100.0))]),
            layout: LayoutMode::Modular,
            clicks: Vec::new(),
            frame_no: 0,
        }
    }

    fn tick(&mut self, scheduler: &mut FrameScheduler<ScriptedSource>) -> TickOutcome {
        let frame = Frame {
            rgba: Vec::new(),
            width: 640,
            height: 480,
            timestamp_ms: self.frame_no as u64 * 33,
        };
        let frame_no = self.frame_no;
        self.frame_no += 1;

        let clicks = &mut self.clicks;
        let mut activator = |id: &str| clicks.push((frame_no, id.to_string()));
        let mut ui = UiContext {
            elements: &self.elements,
            panels: &self.panels,
            positions: &mut self.positions,
            layout: self.layout,
            activator: &mut activator,
        };
        scheduler.tick(&frame, &mut ui)
    }
}

fn start(steps: Vec<ScriptStep>, sensitivity: f32) -> (FrameScheduler<ScriptedSource>, TrackingControls) {
    let controls = TrackingControls::new(sensitivity);
    controls.enable();
    let scheduler = FrameScheduler::new(&TrackingConfig::default(), controls.clone(), move || {
        Ok(ScriptedSource::new(steps.clone()))
    })
    .unwrap();
    (scheduler, controls)
}

#[test]
fn amplified_motion_clamps_to_screen_edge() {
    let steps = ScriptedSource::sweep(HandPose::Open, (0.5, 0.5), (0.1, 0.5), 8);
    let frames = steps.len();
    let (mut scheduler, _controls) = start(steps, 2.0);
    let mut desk = Desk::new();

    let mut last_x = f32::MAX;
    for _ in 0..frames {
        assert!(matches!(desk.tick(&mut scheduler), TickOutcome::Processed(_)));
        let x = scheduler.engine().cursor().position().x;
        assert!(x >= 0.0 && x <= last_x);
        last_x = x;
    }

    let state = scheduler.engine().cursor().state();
    assert!((state.raw_target.x - -0.3).abs() < 1e-5);
    assert_eq!(state.clamped_screen_pos.x, 0.0);
    assert_eq!(state.clamped_screen_pos.y, 0.5 * H);
}

#[test]
fn pinch_sequence_activates_exactly_once() {
    let poses = [
        HandPose::Open,
        HandPose::Open,
        HandPose::Pinch,
        HandPose::Pinch,
        HandPose::Open,
    ];
    let steps = poses.iter().map(|p| Some((*p, 0.5, 0.5))).collect();
    let (mut scheduler, _controls) = start(steps, 1.0);
    let mut desk = Desk::new();

    for _ in 0..poses.len() {
        desk.tick(&mut scheduler);
    }
    // The glyph is hit first; its actionable ancestor receives the click.
    assert_eq!(desk.clicks, vec![(2, "mic".to_string())]);
}

#[test]
fn dropped_frame_during_pinch_does_not_double_click() {
    let steps = vec![
        Some((HandPose::Open, 0.5, 0.5)),
        Some((HandPose::Pinch, 0.5, 0.5)),
        None,
        Some((HandPose::Pinch, 0.5, 0.5)),
        Some((HandPose::Open, 0.5, 0.5)),
    ];
    let (mut scheduler, _controls) = start(steps, 1.0);
    let mut desk = Desk::new();
    for _ in 0..5 {
        desk.tick(&mut scheduler);
    }
    assert_eq!(desk.clicks.len(), 1);
}

#[test]
fn drag_moves_panel_by_sum_of_cursor_deltas() {
    let mut steps = vec![Some((HandPose::Open, 0.15, 0.2))];
    steps.extend(ScriptedSource::sweep(HandPose::Fist, (0.15, 0.2), (0.3, 0.3), 10));
    steps.push(None);
    steps.push(Some((HandPose::Fist, 0.3, 0.3)));
    steps.push(Some((HandPose::Open, 0.3, 0.3)));
    let frames = steps.len();
    let (mut scheduler, _controls) = start(steps, 1.0);
    let mut desk = Desk::new();

    let mut grab_cursor = None;
    let mut last_drag_cursor = None;
    let mut released = false;
    for _ in 0..frames {
        if let TickOutcome::Processed(events) = desk.tick(&mut scheduler) {
            let cursor = scheduler.engine().cursor().position();
            if events.contains(&InteractionEvent::DragStarted("chat".into())) {
                grab_cursor = Some(cursor);
            }
            if scheduler.engine().is_dragging() {
                last_drag_cursor = Some(cursor);
            }
            released |= events.contains(&InteractionEvent::DragEnded("chat".into()));
        }
    }

    let grab = grab_cursor.expect("fist over the chat panel starts a drag");
    let last = last_drag_cursor.expect("drag frames recorded");
    assert!(released, "opening the hand ends the drag");
    let moved = desk.positions.get("chat").unwrap();
    let expected = Point::new(100.0, 100.0) + (last - grab);
    assert!((moved.x - expected.x).abs() < 1e-2, "{moved:?} vs {expected:?}");
    assert!((moved.y - expected.y).abs() < 1e-2, "{moved:?} vs {expected:?}");
    assert!(moved.x > 100.0 && moved.y > 100.0);
}

#[test]
fn fixed_layout_leaves_panels_alone() {
    let steps = ScriptedSource::sweep(HandPose::Fist, (0.15, 0.2), (0.3, 0.3), 10);
    let frames = steps.len();
    let (mut scheduler, _controls) = start(steps, 1.0);
    let mut desk = Desk::new();
    desk.layout = LayoutMode::Fixed;
    for _ in 0..frames {
        desk.tick(&mut scheduler);
    }
    assert_eq!(desk.positions.get("chat"), Some(Point::new(100.0, 100.0)));
}

#[test]
fn disabling_clears_snap_emphasis_and_stops() {
    let steps = vec![Some((HandPose::Open, 0.5, 0.5)); 4];
    let (mut scheduler, controls) = start(steps, 1.0);
    let mut desk = Desk::new();

    let TickOutcome::Processed(events) = desk.tick(&mut scheduler) else {
        panic!("first frame should be processed");
    };
    assert!(events.contains(&InteractionEvent::Armed("mic".into())));
    assert_eq!(scheduler.overlay().position, Point::new(W / 2.0, H / 2.0));

    controls.disable();
    let outcome = desk.tick(&mut scheduler);
    assert_eq!(
        outcome,
        TickOutcome::Stopped(vec![InteractionEvent::Disarmed("mic".into())])
    );
    assert!(!outcome.should_reschedule());
    assert!(!scheduler.overlay().visible);
    assert!(!scheduler.engine().snap_state().is_snapped());
}

#[test]
fn sensitivity_changes_apply_next_frame() {
    let steps = vec![Some((HandPose::Open, 0.6, 0.5)); 2];
    let (mut scheduler, controls) = start(steps, 1.0);
    let mut desk = Desk::new();

    desk.tick(&mut scheduler);
    let first = scheduler.engine().cursor().state().clamped_screen_pos.x;
    controls.set_sensitivity(3.0);
    desk.tick(&mut scheduler);
    let second = scheduler.engine().cursor().state().clamped_screen_pos.x;

    assert!((first - 0.6 * W).abs() < 1e-2);
    assert!((second - 0.8 * W).abs() < 1e-2);
}
