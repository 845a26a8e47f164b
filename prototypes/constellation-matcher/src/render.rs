//! Everything about how the game looks. None of this feeds back into the session.

use macroquad::prelude::*;
use starlines::{Pattern, Session};

const BACKGROUND: Color = Color::new(0.05, 0.06, 0.11, 1.0);
const PANEL: Color = Color::new(0.09, 0.1, 0.18, 1.0);
const STAR: Color = Color::new(0.4, 0.9, 1.0, 1.0);
const STAR_LIT: Color = Color::new(0.7, 0.95, 1.0, 1.0);
const TRACE: Color = Color::new(0.2, 0.87, 1.0, 1.0);
const TEXT: Color = Color::new(0.85, 0.88, 0.95, 1.0);
const MUTED: Color = Color::new(0.55, 0.6, 0.7, 1.0);
const ACCENT: Color = Color::new(0.83, 0.4, 1.0, 1.0);
const GLOW: Color = Color::new(0.2, 0.8, 1.0, 0.25);
const BANNER: Color = Color::new(0.83, 0.4, 1.0, 0.2);
const TOAST: Color = Color::new(0.1, 0.12, 0.22, 0.95);

/// Overlay colors are picked per constellation; anything else gets gray.
fn overlay_color(name: &str) -> Color {
    match name {
        "Orion" => Color::new(0.83, 0.4, 1.0, 1.0),
        "Big Dipper" => Color::new(1.0, 0.83, 0.3, 1.0),
        "Cassiopeia" => Color::new(1.0, 0.4, 0.8, 1.0),
        "Leo" => Color::new(0.3, 1.0, 0.77, 1.0),
        _ => LIGHTGRAY,
    }
}

/// A popup for a discovery, shown for a few seconds.
pub struct Toast {
    pub title: String,
    pub description: String,
    pub shown_at: f64,
}

fn draw_dashed_line(from: Vec2, to: Vec2, thickness: f32, color: Color) {
    const DASH: f32 = 5.0;
    let length = from.distance(to);
    if length == 0.0 {
        return;
    }
    let dir = (to - from) / length;
    let mut start = 0.0;
    while start < length {
        let end = (start + DASH).min(length);
        let a = from + dir * start;
        let b = from + dir * end;
        draw_line(a.x, a.y, b.x, b.y, thickness, color);
        start += DASH * 2.0;
    }
}

fn draw_overlay(session: &Session, pattern: &Pattern) {
    let layout = session.layout();
    let color = overlay_color(pattern.name());
    for pair in pattern.points().windows(2) {
        draw_dashed_line(
            layout.cell_center(pair[0]),
            layout.cell_center(pair[1]),
            2.0,
            color,
        );
    }
}

fn draw_trace(session: &Session) {
    let layout = session.layout();
    for pair in session.trace().windows(2) {
        let a = layout.cell_center(pair[0]);
        let b = layout.cell_center(pair[1]);
        draw_line(a.x, a.y, b.x, b.y, 3.0, TRACE);
    }
}

fn draw_stars(session: &Session) {
    let layout = session.layout();
    for cell in layout.cells() {
        let center = layout.cell_center(cell);
        if session.is_connected(cell) {
            draw_circle(center.x, center.y, layout.dot_radius * 1.4, GLOW);
            draw_circle(center.x, center.y, layout.dot_radius, STAR_LIT);
        } else {
            draw_circle(center.x, center.y, layout.dot_radius * 0.7, STAR);
        }
    }
}

fn draw_panel(session: &Session, x: f32, width: f32) {
    let height = screen_height();
    draw_rectangle(x, 0.0, width, height, PANEL);

    let left = x + 20.0;
    let mut y = 40.0;
    draw_text("Constellation Matcher", left, y, 30.0, ACCENT);
    y += 30.0;
    draw_text("Connect the stars to discover", left, y, 20.0, MUTED);
    y += 20.0;
    draw_text("constellations.", left, y, 20.0, MUTED);

    y += 40.0;
    draw_text("Available constellations:", left, y, 22.0, TEXT);
    let selected = session.selected_pattern().map(Pattern::name);
    for pattern in session.library() {
        y += 26.0;
        let is_selected = Some(pattern.name()) == selected;
        let marker = if is_selected { ">" } else { "*" };
        let color = if is_selected { overlay_color(pattern.name()) } else { TEXT };
        draw_text(
            &format!("{} {} - {}", marker, pattern.name(), pattern.description()),
            left,
            y,
            20.0,
            color,
        );
    }

    y += 40.0;
    let overlay = if session.overlay_active() { "shown" } else { "hidden" };
    draw_text(&format!("Guide: {}", overlay), left, y, 20.0, TEXT);

    y += 40.0;
    for line in [
        "drag across stars to trace",
        "space: show/hide guide",
        "left/right: pick guide",
        "r: reset   esc: quit",
    ] {
        draw_text(line, left, y, 18.0, MUTED);
        y += 20.0;
    }

    if let Some(pattern) = session.matched() {
        let banner_y = height - 70.0;
        draw_rectangle(x + 10.0, banner_y, width - 20.0, 50.0, BANNER);
        let title = format!("* {} *", pattern.name());
        draw_text(&title, left, banner_y + 33.0, 28.0, ACCENT);
    }
}

fn draw_toast(toast: &Toast, canvas: f32) {
    let width = canvas - 40.0;
    let x = 20.0;
    let y = canvas - 90.0;
    draw_rectangle(x, y, width, 70.0, TOAST);
    draw_rectangle_lines(x, y, width, 70.0, 2.0, ACCENT);
    let title = format!("Constellation Discovered: {}", toast.title);
    draw_text(&title, x + 16.0, y + 30.0, 24.0, TEXT);
    draw_text(&toast.description, x + 16.0, y + 55.0, 20.0, MUTED);
}

/// Draws the grid, the guide, the trace and the side panel.
pub fn draw(session: &Session, toast: Option<&Toast>, panel_width: f32) {
    clear_background(BACKGROUND);
    if let Some(pattern) = session.overlay() {
        draw_overlay(session, pattern);
    }
    draw_trace(session);
    draw_stars(session);

    let canvas = session.layout().canvas_size();
    draw_panel(session, canvas, panel_width);
    if let Some(toast) = toast {
        draw_toast(toast, canvas);
    }
}

