//! Scripted chat screen: three message bubbles with hold menus, driven by a
//! real-time frame loop and synthetic touches.

mod clock;

use anyhow::{bail, Result};
use clock::{FrameRequests, WebClock};
use holdmenu_core::{app_channel, AppTaskQueue, Clock, Runtime};
use holdmenu_foundation::{Point, PointerDispatcher, PointerEvent, PointerEventKind};
use holdmenu_ui::{
    DefaultMenuHeightEstimator, HapticFeedback, HapticStyle, HoldItem, HoldItemConfig, HoldItemState, HoldMenuBackdrop,
    HoldMenuContext, HoldMenuProvider, MeasureError, MenuItem, MenuSpec, ScreenMetrics, Theme,
    TransformOrigin,
};
use holdmenu_ui_graphics::{EdgeInsets, Rect};
use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;
use web_time::Instant;

const FRAME: Duration = Duration::from_millis(16);

struct ConsoleHaptics;

impl HapticFeedback for ConsoleHaptics {
    fn impact(&self, style: HapticStyle) {
        println!("  * haptic {style:?}");
    }
}

struct Bubble {
    name: &'static str,
    bounds: Rect,
    item: HoldItem,
}

impl Bubble {
    fn with_font_scale(self, font_scale: f32) -> Self {
        let estimator = DefaultMenuHeightEstimator::default().with_font_scale(font_scale);
        Self {
            item: self.item.with_menu_height_estimator(estimator),
            ..self
        }
    }

    fn center(&self) -> Point {
        Point::new(
            self.bounds.x + self.bounds.width / 2.0,
            self.bounds.y + self.bounds.height / 2.0,
        )
    }
}

struct Screen {
    runtime: Runtime,
    requests: Arc<FrameRequests>,
    app_tasks: AppTaskQueue,
    clock: WebClock,
    started: Instant,
    input: RefCell<PointerDispatcher>,
    context: HoldMenuContext,
    backdrop: HoldMenuBackdrop,
    bubbles: Vec<Bubble>,
}

impl Screen {
    fn now_nanos(&self) -> u64 {
        self.clock.elapsed_nanos(self.started)
    }

    fn touch(&self, kind: PointerEventKind, at: Point) {
        let event = PointerEvent::new(kind, at, self.now_nanos());
        self.input.borrow_mut().push(event);
    }

    /// Delivers queued input top-down: floating overlays, then the backdrop
    /// while a menu is open, otherwise the bubble under the pointer. Moves
    /// and lifts always reach the bubbles so the one that was pressed sees
    /// the end of its gesture even after the backdrop appeared over it.
    fn route_input(&self) {
        self.input.borrow_mut().drain(|event| {
            for bubble in &self.bubbles {
                bubble.item.on_overlay_pointer_event(&event);
            }
            let is_press = event.kind == PointerEventKind::Down;
            if !is_press {
                for bubble in &self.bubbles {
                    bubble.item.on_pointer_event(&event);
                }
            }
            if self.backdrop.visual_state().visible {
                self.backdrop.on_pointer_event(&event);
            } else if is_press {
                let position = event.position;
                for bubble in &self.bubbles {
                    if bubble.bounds.contains(position.x, position.y) {
                        bubble.item.on_pointer_event(&event);
                    }
                }
            }
        });
    }

    /// Runs frames for `duration`, draining app tasks after each one.
    fn run_for(&self, duration: Duration) {
        let end = Instant::now() + duration;
        while Instant::now() < end {
            self.route_input();
            std::thread::sleep(FRAME);
            if self.requests.take() || self.runtime.needs_frame() {
                self.runtime.handle().drain_frame_callbacks(self.now_nanos());
            }
            self.app_tasks.run_pending();
        }
    }

    fn hold(&self, bubble: &Bubble) {
        let at = bubble.center();
        let hold = bubble.item.config().long_press_min_duration_millis + 300;
        self.touch(PointerEventKind::Down, at);
        self.run_for(Duration::from_millis(hold));
        self.touch(PointerEventKind::Up, at);
        self.run_for(Duration::from_millis(900));
    }

    fn tap(&self, at: Point) {
        self.touch(PointerEventKind::Down, at);
        self.run_for(FRAME);
        self.touch(PointerEventKind::Up, at);
        self.run_for(Duration::from_millis(400));
    }

    fn report(&self, bubble: &Bubble) {
        let visual = bubble.item.visual_state();
        let backdrop = self.backdrop.visual_state();
        println!(
            "  {}: {:?} origin={:?} translate_y={:.1} scale={:.3} opacity={:.1} | phase={:?} backdrop opacity={:.2} blur={:.0}",
            bubble.name,
            bubble.item.state(),
            bubble.item.origin(),
            visual.translate_y,
            visual.scale,
            visual.opacity,
            self.context.phase(),
            backdrop.opacity,
            backdrop.blur_intensity,
        );
    }
}

fn bubble_content(rect: Rect) -> impl Fn() -> Result<Rect, MeasureError> {
    move || Ok(rect)
}

fn message_menu() -> MenuSpec {
    MenuSpec::new()
        .with_item(MenuItem::title("Actions"))
        .with_item(MenuItem::new("Reply", || println!("  > reply")))
        .with_item(MenuItem::new("Copy", || println!("  > copy")).with_separator())
        .with_item(MenuItem::new("Delete", || println!("  > delete")).destructive())
}

fn bubble(
    context: &HoldMenuContext,
    name: &'static str,
    bounds: Rect,
    config: HoldItemConfig,
) -> Bubble {
    Bubble {
        name,
        bounds,
        item: HoldItem::new(context, bubble_content(bounds), message_menu(), config),
    }
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let requests = Arc::new(FrameRequests::default());
    let (dispatcher, app_tasks) = app_channel();
    let runtime = Runtime::new(requests.clone(), dispatcher);

    let context = HoldMenuProvider::new()
        .with_theme(Theme::Dark)
        .with_screen(ScreenMetrics::new(390.0, 844.0))
        .with_safe_area_insets(EdgeInsets::from_components(0.0, 47.0, 0.0, 34.0))
        .with_haptics(Arc::new(ConsoleHaptics))
        .on_open(|| println!("  * menu opened"))
        .on_close(|| println!("  * menu closed"))
        .build(runtime.handle());
    let backdrop = HoldMenuBackdrop::new(&context);

    let bubbles = vec![
        bubble(
            &context,
            "incoming",
            Rect::new(16.0, 180.0, 240.0, 64.0),
            HoldItemConfig::default(),
        ),
        bubble(
            &context,
            "outgoing",
            Rect::new(134.0, 720.0, 240.0, 64.0),
            HoldItemConfig::default().with_close_on_tap(true),
        ),
        bubble(
            &context,
            "pinned",
            Rect::new(134.0, 60.0, 240.0, 48.0),
            HoldItemConfig::default().with_anchor(TransformOrigin::BottomRight),
        )
        // Large accessibility text.
        .with_font_scale(1.3),
    ];

    let screen = Screen {
        runtime,
        requests,
        app_tasks,
        clock: WebClock,
        started: Instant::now(),
        input: RefCell::new(PointerDispatcher::new()),
        context,
        backdrop,
        bubbles,
    };

    println!("=== holdmenu demo ===");
    for bubble in &screen.bubbles {
        println!("hold {}", bubble.name);
        screen.hold(bubble);
        screen.report(bubble);
        if bubble.item.state() != HoldItemState::Active {
            bail!("{} did not open", bubble.name);
        }
        match bubble.name {
            "outgoing" => {
                println!("select row 1");
                bubble.item.select_item(1);
                screen.run_for(Duration::from_millis(400));
            }
            _ => {
                println!("tap backdrop");
                screen.tap(Point::new(20.0, 420.0));
            }
        }
        screen.report(bubble);
    }

    let first = &screen.bubbles[0];
    println!("hold {} again", first.name);
    screen.hold(first);
    screen.report(first);
    if first.item.state() != HoldItemState::Active {
        bail!("{} did not reopen", first.name);
    }
    screen.tap(Point::new(20.0, 420.0));
    screen.report(first);
    Ok(())
}
