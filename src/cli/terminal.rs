use crate::cli::clipboard;
use crate::controller::{Surface, Toast};
use crate::render::{self, terminal, Overlay};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Terminal rendition of the checker UI.
///
/// The overlay and status line are printed as they change; toasts are
/// printed once and stay visible in the menu header until they expire.
pub struct TerminalSurface {
    colored: bool,
    input_enabled: bool,
    correct_all_enabled: bool,
    focus_requested: bool,
    spinner: Option<ProgressBar>,
    toast: Option<(String, Instant)>,
}

impl TerminalSurface {
    pub fn new(colored: bool) -> Self {
        Self {
            colored,
            input_enabled: false,
            correct_all_enabled: false,
            focus_requested: false,
            spinner: None,
            toast: None,
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn correct_all_enabled(&self) -> bool {
        self.correct_all_enabled
    }

    /// Returns true once after the controller asked for input focus
    pub fn take_focus(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// The current toast, if it has not expired yet
    pub fn active_toast(&self) -> Option<&str> {
        match &self.toast {
            Some((message, expires)) if Instant::now() < *expires => Some(message.as_str()),
            _ => None,
        }
    }
}

impl Surface for TerminalSurface {
    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn focus_input(&mut self) {
        self.focus_requested = true;
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                pb.set_style(style);
            }
            pb.set_message("Loading dictionary...");
            pb.enable_steady_tick(Duration::from_millis(100));
            self.spinner = Some(pb);
        } else if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn render_overlay(&mut self, overlay: &Overlay) {
        println!();
        println!("{}", terminal::highlight(overlay, self.colored));
    }

    fn render_stats(&mut self, errors: usize, words: usize) {
        let stats = render::stats_line(errors, words);
        if self.colored {
            let stats = if errors > 0 {
                stats.yellow()
            } else {
                stats.green()
            };
            println!("{}", stats);
        } else {
            println!("{}", stats);
        }
    }

    fn set_correct_all_enabled(&mut self, enabled: bool) {
        self.correct_all_enabled = enabled;
    }

    fn notify(&mut self, toast: Toast) {
        if self.colored {
            println!("{} {}", "›".cyan().bold(), toast.message);
        } else {
            println!("> {}", toast.message);
        }
        self.toast = Some((toast.message, Instant::now() + toast.duration));
    }

    fn write_clipboard(&mut self, text: &str) -> anyhow::Result<()> {
        clipboard::copy_to_clipboard(text)
    }
}
