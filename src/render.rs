//! Floating overlay box for ratatui hosts.
//!
//! Draws a bordered box next to a trigger according to a committed
//! [`Placement`]. Sizing uses terminal display width so wide glyphs are
//! measured the same way the terminal lays them out.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::EngineConfig;
use crate::geometry::{self, OverlaySize, ViewportSize};
use crate::placement::{self, Placement};

// ============================================================================
// Constants
// ============================================================================

/// Maximum width for overlay content (not including border)
pub const MAX_CONTENT_WIDTH: u16 = 40;

/// Padding on each side of content
const HORIZONTAL_PADDING: u16 = 1;

/// Border width (1 on each side)
const BORDER_WIDTH: u16 = 2;

// ============================================================================
// Theme
// ============================================================================

/// Colors used for an overlay box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTheme {
    pub border: Color,
    pub text: Color,
    pub background: Color,
}

impl Default for OverlayTheme {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            text: Color::Cyan,
            background: Color::Black,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Outer size of an overlay box for `lines`, including border and padding.
pub fn measure(lines: &[&str]) -> OverlaySize {
    let content_width = lines
        .iter()
        .map(|line| line.width())
        .max()
        .unwrap_or(0)
        .min(usize::from(MAX_CONTENT_WIDTH)) as u16;
    let width = content_width + HORIZONTAL_PADDING * 2 + BORDER_WIDTH;
    let height = (lines.len().min(usize::from(u16::MAX - BORDER_WIDTH)) as u16) + BORDER_WIDTH;
    OverlaySize::new(f32::from(width), f32::from(height))
}

/// Cell rect an overlay of `size` occupies next to `trigger` in `area`.
pub fn overlay_area(
    area: Rect,
    trigger: Rect,
    size: OverlaySize,
    placement: Placement,
    config: &EngineConfig,
) -> Rect {
    let rect = placement::position(
        &geometry::Rect::from(trigger),
        size,
        placement,
        config.gap,
        ViewportSize::from(area),
        config.edge_padding,
    );
    Rect::from(rect).intersection(area)
}

/// Render an overlay box for `lines` next to `trigger`.
///
/// Returns the rect that was drawn so the host can register it as a hit
/// region.
pub fn render_overlay(
    buf: &mut Buffer,
    trigger: Rect,
    lines: &[&str],
    placement: Placement,
    config: &EngineConfig,
    theme: &OverlayTheme,
) -> Rect {
    let area = buf.area;
    let rect = overlay_area(area, trigger, measure(lines), placement, config);
    render_box(buf, rect, lines, theme);
    rect
}

// ============================================================================
// Rendering Functions
// ============================================================================

fn render_box(buf: &mut Buffer, rect: Rect, lines: &[&str], theme: &OverlayTheme) {
    if rect.width < 3 || rect.height < 3 {
        return;
    }

    let border_style = Style::default().fg(theme.border).bg(theme.background);
    let text_style = Style::default().fg(theme.text).bg(theme.background);

    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(' ').set_style(text_style);
            }
        }
    }

    draw_border(buf, rect, border_style);

    let content_x = rect.x + 1 + HORIZONTAL_PADDING;
    let max_width = usize::from(rect.width.saturating_sub(BORDER_WIDTH + HORIZONTAL_PADDING * 2));
    let rows = usize::from(rect.height - BORDER_WIDTH);
    for (row, line) in lines.iter().take(rows).enumerate() {
        let text = truncate_to_width(line, max_width);
        buf.set_stringn(content_x, rect.y + 1 + row as u16, &text, max_width, text_style);
    }
}

/// Draw box border using box-drawing characters
fn draw_border(buf: &mut Buffer, rect: Rect, style: Style) {
    let x1 = rect.x;
    let x2 = rect.right().saturating_sub(1);
    let y1 = rect.y;
    let y2 = rect.bottom().saturating_sub(1);

    let mut set = |x: u16, y: u16, ch: char| {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(ch).set_style(style);
        }
    };

    set(x1, y1, '\u{250C}');
    set(x2, y1, '\u{2510}');
    set(x1, y2, '\u{2514}');
    set(x2, y2, '\u{2518}');
    for x in (x1 + 1)..x2 {
        set(x, y1, '\u{2500}');
        set(x, y2, '\u{2500}');
    }
    for y in (y1 + 1)..y2 {
        set(x1, y, '\u{2502}');
        set(x2, y, '\u{2502}');
    }
}

/// Cut `text` to at most `max_width` display columns, ending in "..." if cut.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if max_width >= 3 {
        out.push_str("...");
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
