pub mod checker;
pub mod cli;
pub mod config;
pub mod controller;
pub mod dict;
pub mod engine;
pub mod render;

pub use checker::session::Session;
pub use config::Config;
pub use controller::{Controller, Surface};
pub use engine::SpellEngine;

use render::Overlay;

/// Outcome of one checker run. Recomputed on every check, never stored.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub overlay: Overlay,
    pub error_count: usize,
    pub word_count: usize,
}

impl CheckResult {
    /// HTML markup of the overlay
    pub fn markup(&self) -> String {
        render::html::overlay_markup(&self.overlay)
    }
}
