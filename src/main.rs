//! Tether demo - tooltips and menus in the terminal
//!
//! Hover "Help" or "Info" for tooltips, click "File" (or Tab to it and press
//! Enter) for a menu. Escape or a click elsewhere closes the menu; `q` or
//! Ctrl+C quits.

use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::time::Duration;

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use tether::binder::{HitRegions, InputEvent, PointerTracker, Target};
use tether::config::{EngineConfig, OverlayOptions};
use tether::error::ResultExt;
use tether::geometry::{self, OverlaySize, ViewportSize};
use tether::id::OverlayId;
use tether::logging;
use tether::placement::Placement;
use tether::registry::OverlayRegistry;
use tether::render::{self, OverlayTheme};
use tether::scheduler::{TokioScheduler, WakeupReceiver};
use tether::traits::LayoutHost;

type DemoTerminal = Terminal<CrosstermBackend<Stdout>>;

/// A trigger button and the overlay it drives.
struct DemoItem {
    id: &'static str,
    label: &'static str,
    lines: &'static [&'static str],
    options: fn() -> OverlayOptions,
}

const ITEMS: &[DemoItem] = &[
    DemoItem {
        id: "file",
        label: " File ",
        lines: &["1  New", "2  Open...", "3  Save"],
        options: OverlayOptions::persisted,
    },
    DemoItem {
        id: "help",
        label: " Help ",
        lines: &["Hover tooltips stay open", "while the pointer is inside."],
        options: OverlayOptions::hover,
    },
    DemoItem {
        id: "info",
        label: " Info ",
        lines: &["Only placed above or below"],
        options: vertical_tooltip,
    },
];

fn vertical_tooltip() -> OverlayOptions {
    OverlayOptions::hover().with_allowed(vec![Placement::Top, Placement::Bottom])
}

// ============================================================================
// Layout snapshot
// ============================================================================

/// Geometry captured during the last draw, served to controllers on demand.
#[derive(Debug, Default)]
struct FrameLayout {
    viewport: ViewportSize,
    triggers: HashMap<OverlayId, Rect>,
    sizes: HashMap<OverlayId, OverlaySize>,
}

impl LayoutHost for FrameLayout {
    fn trigger_rect(&self, id: &OverlayId) -> Option<geometry::Rect> {
        self.triggers.get(id).map(|rect| geometry::Rect::from(*rect))
    }

    fn overlay_size(&self, id: &OverlayId) -> Option<OverlaySize> {
        self.sizes.get(id).copied()
    }

    fn viewport(&self) -> ViewportSize {
        self.viewport
    }
}

// ============================================================================
// Demo state
// ============================================================================

struct Demo {
    registry: OverlayRegistry<TokioScheduler>,
    layout: FrameLayout,
    regions: HitRegions,
    pointer: PointerTracker,
    mouse: Option<(u16, u16)>,
    focus: Option<usize>,
    status: String,
    theme: OverlayTheme,
    resized: bool,
    quit: bool,
}

impl Demo {
    fn new(config: EngineConfig, scheduler: TokioScheduler) -> Self {
        let mut registry = OverlayRegistry::new(scheduler, config);
        for item in ITEMS {
            registry.register_trigger(item.id);
            registry.mount(item.id, (item.options)());
        }
        Self {
            registry,
            layout: FrameLayout::default(),
            regions: HitRegions::new(),
            pointer: PointerTracker::new(),
            mouse: None,
            focus: None,
            status: "Tab: focus  Enter: open  q: quit".to_string(),
            theme: OverlayTheme::default(),
            resized: false,
            quit: false,
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.regions.clear();
        self.layout.viewport = ViewportSize::from(area);
        self.layout.triggers.clear();

        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(" tether ")
                .border_style(Style::default().fg(Color::DarkGray)),
            area,
        );

        // Spread triggers: top-left, center, bottom-right.
        let anchors = [
            (area.x + 2, area.y + 1),
            (area.x + area.width / 2, area.y + area.height / 2),
            (
                area.right().saturating_sub(10),
                area.bottom().saturating_sub(3),
            ),
        ];
        for (index, (item, (x, y))) in ITEMS.iter().zip(anchors).enumerate() {
            let id = OverlayId::from(item.id);
            let rect = Rect::new(x, y, item.label.len() as u16, 1).intersection(area);
            let mut style = Style::default().fg(Color::White).bg(Color::Blue);
            if self.focus == Some(index) {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            frame.render_widget(Paragraph::new(Span::styled(item.label, style)), rect);
            self.regions.register_trigger(rect, id.clone());
            self.layout.triggers.insert(id.clone(), rect);
            self.layout.sizes.insert(id, render::measure(item.lines));
        }

        let status_area = Rect::new(area.x + 2, area.bottom().saturating_sub(2), area.width.saturating_sub(14), 1);
        frame.render_widget(Paragraph::new(Line::from(self.status.as_str())), status_area.intersection(area));

        // Overlays on top, registered after triggers so they win hit tests.
        for item in ITEMS {
            if !self.registry.is_shown(item.id) {
                continue;
            }
            let (Some(placement), Some(trigger)) = (
                self.registry.placement(item.id),
                self.layout.triggers.get(item.id).copied(),
            ) else {
                continue;
            };
            let drawn = render::render_overlay(
                frame.buffer_mut(),
                trigger,
                item.lines,
                placement,
                self.registry.config(),
                &self.theme,
            );
            self.regions.register_overlay(drawn, OverlayId::from(item.id));
        }
    }

    /// Run pending show frames against the layout just drawn.
    ///
    /// Returns whether anything changed and the screen needs another draw.
    fn after_draw(&mut self) -> bool {
        let mut changed = self.registry.flush_frames(&self.layout) > 0;
        // The layout now reflects the new terminal size.
        if std::mem::take(&mut self.resized) && self.registry.reposition(&self.layout) > 0 {
            changed = true;
        }
        if let Some((column, row)) = self.mouse {
            for event in self.pointer.refresh(column, row, &self.regions) {
                self.registry.dispatch(&event);
                changed = true;
            }
        }
        changed
    }

    fn handle_event(&mut self, event: &Event) {
        if let Event::Resize(..) = event {
            self.resized = true;
            return;
        }
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.quit = true;
                    return;
                }
                KeyCode::Char('q') => {
                    self.quit = true;
                    return;
                }
                KeyCode::Tab => {
                    self.cycle_focus();
                    return;
                }
                KeyCode::Enter => {
                    if let Some(index) = self.focus {
                        let target = Target::Trigger(OverlayId::from(ITEMS[index].id));
                        self.registry.dispatch(&InputEvent::Click(target));
                    }
                    return;
                }
                KeyCode::Char(c @ '1'..='3') if self.registry.is_shown("file") => {
                    self.pick_menu_entry(c);
                    return;
                }
                _ => {}
            }
        }

        if let Event::Mouse(mouse) = event {
            if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                self.mouse = Some((mouse.column, mouse.row));
            }
        }
        for input in self.pointer.translate(event, &self.regions) {
            self.registry.dispatch(&input);
        }
    }

    fn cycle_focus(&mut self) {
        let next = match self.focus {
            Some(index) => (index + 1) % ITEMS.len(),
            None => 0,
        };
        if let Some(previous) = self.focus {
            self.registry
                .dispatch(&InputEvent::Blur(OverlayId::from(ITEMS[previous].id)));
        }
        self.focus = Some(next);
        self.registry
            .dispatch(&InputEvent::Focus(OverlayId::from(ITEMS[next].id)));
    }

    fn pick_menu_entry(&mut self, entry: char) {
        let label = ITEMS[0]
            .lines
            .iter()
            .find(|line| line.starts_with(entry))
            .map(|line| line[1..].trim())
            .unwrap_or("?");
        self.status = format!("Picked: {}", label);
        tracing::info!(entry = label, "Menu entry picked");
        self.registry.close("file");
    }
}

// ============================================================================
// Entry point
// ============================================================================

fn main() -> Result<()> {
    color_eyre::install()?;
    setup_panic_hook();

    if let Err(err) = logging::init(&logging::default_log_dir()) {
        eprintln!("tether: logging disabled ({})", err);
    }
    let config = load_config();
    tracing::info!(?config, "Starting demo");

    let runtime = tokio::runtime::Runtime::new()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = runtime.block_on(async {
        let (scheduler, wakeups) = TokioScheduler::new();
        let mut demo = Demo::new(config, scheduler);
        run_app(&mut terminal, &mut demo, wakeups).await
    });

    restore_terminal(&mut terminal)?;
    result
}

/// Load `--config <path>` if given, then apply environment overrides.
fn load_config() -> EngineConfig {
    let mut args = std::env::args().skip(1);
    let mut config = EngineConfig::default();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                config = EngineConfig::load(PathBuf::from(path)).or_warn("load_config", config);
            }
        }
    }
    config.with_env_overrides()
}

async fn run_app(terminal: &mut DemoTerminal, demo: &mut Demo, mut wakeups: WakeupReceiver) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| demo.draw(f))?;
            needs_redraw = demo.after_draw();
            if needs_redraw {
                continue;
            }
        }

        let tick = tokio::time::sleep(Duration::from_millis(250));

        tokio::select! {
            _ = tick => {}

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(event)) => {
                        demo.handle_event(&event);
                        needs_redraw = true;
                    }
                    Some(Err(err)) => return Err(err.into()),
                    None => return Ok(()),
                }
            }

            wakeup = wakeups.recv() => {
                demo.registry.deliver(wakeup?, &demo.layout);
                needs_redraw = true;
            }
        }

        if demo.quit {
            return Ok(());
        }
    }
}

/// Setup panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen,
            Show
        );
        let _ = io::stdout().flush();
        original_hook(panic_info);
    }));
}

/// Restore terminal to normal mode
fn restore_terminal(terminal: &mut DemoTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
