//! Connect the stars on an 8×8 grid until they make a constellation.
//!
//! All the rules live in `starlines`; this just moves the mouse data in and the pictures out.

use std::path::Path;
use std::sync::OnceLock;

use flexi_logger::{Logger, LoggerHandle};
use log::{info, warn};
use macroquad::prelude::*;
use starlines::{Session, SessionEvent};

mod config;
mod render;

use config::AppConfig;
use render::Toast;

const CONFIG_PATH: &str = "constellation-matcher.json";
const PANEL_WIDTH: f32 = 360.0;
const MIN_HEIGHT: f32 = 480.0;
const TOAST_SECONDS: f64 = 5.0;

/// Read once, before the window opens. Any load error waits here until the logger is running.
static CONFIG: OnceLock<(AppConfig, Option<anyhow::Error>)> = OnceLock::new();

fn config() -> &'static (AppConfig, Option<anyhow::Error>) {
    CONFIG.get_or_init(|| AppConfig::load_or_default(Path::new(CONFIG_PATH)))
}

fn window_conf() -> Conf {
    let (config, _) = config();
    let canvas = config.layout.canvas_size();
    Conf {
        window_title: "constellation matcher".to_owned(),
        window_width: (canvas + PANEL_WIDTH) as i32,
        window_height: canvas.max(MIN_HEIGHT) as i32,
        fullscreen: false,
        ..Default::default()
    }
}

fn setup_logging(spec: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(spec)?.log_to_stdout().start()?;
    Ok(handle)
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, load_error) = config();
    let _logger = match setup_logging(&config.log_level) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("couldn't start logging: {:#}", err);
            None
        }
    };

    if let Some(err) = load_error {
        warn!("{:#}; using the default config", err);
    }

    let session = config.session();
    let grid_size = session.layout().grid_size;
    info!(
        "playing with {} patterns on a {}x{} grid",
        session.library().len(),
        grid_size,
        grid_size
    );
    let mut game = Game::new(session);

    loop {
        if !game.update() {
            break;
        }
        game.draw();
        next_frame().await;
    }
}

struct Game {
    session: Session,
    toast: Option<Toast>,
}

impl Game {
    fn new(session: Session) -> Self {
        Self {
            session,
            toast: None,
        }
    }

    /// Handles one frame of input. Returns `false` once the player wants to quit.
    fn update(&mut self) -> bool {
        if is_key_pressed(KeyCode::Escape) {
            return false;
        }

        self.update_pointer();

        if is_key_pressed(KeyCode::Space) {
            self.session.toggle_overlay();
        }
        if is_key_pressed(KeyCode::R) {
            self.session.reset();
            self.toast = None;
        }
        if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::Tab) {
            self.cycle_selection(1);
        }
        if is_key_pressed(KeyCode::Left) {
            self.cycle_selection(-1);
        }

        let now = get_time();
        for event in self.session.take_events() {
            match event {
                SessionEvent::Discovered { name, description } => {
                    self.toast = Some(Toast {
                        title: name,
                        description,
                        shown_at: now,
                    });
                }
            }
        }
        if matches!(&self.toast, Some(toast) if now - toast.shown_at > TOAST_SECONDS) {
            self.toast = None;
        }
        true
    }

    fn update_pointer(&mut self) {
        let (x, y) = mouse_position();
        let canvas = self.session.layout().canvas_size();
        let on_canvas = (0.0..canvas).contains(&x) && (0.0..canvas).contains(&y);

        if is_mouse_button_pressed(MouseButton::Left) {
            if on_canvas {
                self.session.begin_trace(x, y);
            }
        } else if self.session.is_tracing() {
            if on_canvas {
                self.session.continue_trace(x, y);
            }
            // leaving the grid ends the drag just like letting go
            if !on_canvas || !is_mouse_button_down(MouseButton::Left) {
                self.session.end_trace();
            }
        }
    }

    fn cycle_selection(&mut self, step: isize) {
        let library = self.session.library();
        if library.is_empty() {
            return;
        }
        let current = self
            .session
            .selected_pattern()
            .and_then(|pattern| library.position(pattern.name()))
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(library.len() as isize) as usize;
        let name = library[next].name().to_owned();
        if let Err(err) = self.session.set_selected_pattern(&name) {
            warn!("{}", err);
        }
    }

    fn draw(&self) {
        render::draw(&self.session, self.toast.as_ref(), PANEL_WIDTH);
    }
}
