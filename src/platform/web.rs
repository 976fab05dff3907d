//! Browser bindings
//!
//! JavaScript owns the canvas, pointer input and the 60 Hz interval; it spawns
//! balls in local units, calls `tick()` once per frame and draws whatever
//! `positions()` returns.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::Simulation;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Bouncing balls core loaded");
}

/// Simulation handle exposed to JavaScript
#[wasm_bindgen]
pub struct WebSimulation {
    sim: Simulation,
}

#[wasm_bindgen]
impl WebSimulation {
    /// Create a simulation from optional settings JSON
    ///
    /// Without settings the defaults are used with a time-based seed.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<WebSimulation, JsError> {
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).inspect_err(|err| log::warn!("{err}"))?,
            None => Settings {
                seed: js_sys::Date::now() as u64,
                ..Settings::default()
            },
        };
        log::info!(
            "New {} simulation, arena {}x{}",
            settings.variant.as_str(),
            settings.arena_width,
            settings.arena_height
        );
        Ok(Self {
            sim: Simulation::new(settings),
        })
    }

    /// Spawn a ball from an aim vector, returns its id
    pub fn spawn_ball(&mut self, x: f32, y: f32, aim_x: f32, aim_y: f32) -> u32 {
        self.sim.spawn_ball(Vec2::new(x, y), Vec2::new(aim_x, aim_y))
    }

    pub fn tick(&mut self) {
        self.sim.tick();
    }

    pub fn clear(&mut self) {
        self.sim.clear();
    }

    pub fn ball_count(&self) -> usize {
        self.sim.balls.len()
    }

    pub fn arena_width(&self) -> f32 {
        self.sim.arena.width
    }

    pub fn arena_height(&self) -> f32 {
        self.sim.arena.height
    }

    /// Flat `[x, y, radius, ...]` for every ball, in spawn order
    pub fn positions(&self) -> Vec<f32> {
        self.sim
            .balls
            .iter()
            .flat_map(|b| [b.pos.x, b.pos.y, b.radius])
            .collect()
    }
}
