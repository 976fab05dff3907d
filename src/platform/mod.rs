//! Platform abstraction layer
//!
//! The simulation itself is platform-free. This module only adapts it to
//! hosts that can't call the Rust API directly:
//! - `web`: `wasm_bindgen` wrapper for a JavaScript renderer and frame driver

#[cfg(target_arch = "wasm32")]
pub mod web;
