pub mod debounce;
pub mod replace;

use crate::checker::{self, session::Session};
use crate::config::Config;
use crate::dict::loader::LoadError;
use crate::engine::SpellEngine;
use crate::render::Overlay;
use crate::CheckResult;
use debounce::{Debouncer, Ticket};
use replace::ReplaceScope;
use std::time::Duration;

/// A transient notification shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub duration: Duration,
}

/// The UI the controller drives: an input control, the highlight overlay,
/// a status line, the correct-all control, toasts and the clipboard.
pub trait Surface {
    fn set_input_enabled(&mut self, enabled: bool);
    fn focus_input(&mut self);
    fn set_loading(&mut self, loading: bool);
    fn render_overlay(&mut self, overlay: &Overlay);
    fn render_stats(&mut self, errors: usize, words: usize);
    fn set_correct_all_enabled(&mut self, enabled: bool);
    fn notify(&mut self, toast: Toast);
    fn write_clipboard(&mut self, text: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    /// Text changed and a debounced check is pending
    Editing,
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub max_suggestions: usize,
    pub debounce: Duration,
    pub toast_duration: Duration,
    pub suggestion_scope: ReplaceScope,
    pub correct_all_scope: ReplaceScope,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            max_suggestions: 5,
            debounce: Duration::from_millis(300),
            toast_duration: Duration::from_millis(3000),
            suggestion_scope: ReplaceScope::FirstIgnoreCase,
            correct_all_scope: ReplaceScope::AllMatchCase,
        }
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_suggestions: config.max_suggestions,
            debounce: Duration::from_millis(config.debounce_ms),
            toast_duration: Duration::from_millis(config.toast_ms),
            suggestion_scope: config.suggestion_scope,
            correct_all_scope: config.correct_all_scope,
        }
    }
}

/// Owns the session state and reacts to user actions.
///
/// Checking is a no-op until an engine has been installed through
/// [`Controller::finish_loading`].
pub struct Controller<S: Surface> {
    surface: S,
    engine: Option<Box<dyn SpellEngine>>,
    session: Session,
    text: String,
    overlay: Overlay,
    state: EditState,
    debouncer: Debouncer,
    options: ControllerOptions,
}

impl<S: Surface> Controller<S> {
    pub fn new(mut surface: S, options: ControllerOptions) -> Self {
        surface.set_input_enabled(false);
        surface.render_stats(0, 0);
        surface.set_correct_all_enabled(false);

        Self {
            surface,
            engine: None,
            session: Session::new(),
            text: String::new(),
            overlay: Overlay::new(),
            state: EditState::Idle,
            debouncer: Debouncer::new(options.debounce),
            options,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn max_suggestions(&self) -> usize {
        self.options.max_suggestions
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Disable the input and show the loading indicator
    pub fn begin_loading(&mut self) {
        self.surface.set_loading(true);
        self.surface.set_input_enabled(false);
    }

    /// Install the engine, or record that loading failed for good
    pub fn finish_loading(&mut self, result: Result<Box<dyn SpellEngine>, LoadError>) {
        match result {
            Ok(engine) => {
                tracing::debug!("dictionary ready");
                self.engine = Some(engine);
            }
            Err(e) => {
                tracing::error!(error = %e, "could not load dictionary");
                self.toast("Error: Could not load dictionary.");
            }
        }

        self.surface.set_loading(false);
        self.surface.set_input_enabled(true);
        self.surface.focus_input();

        if !self.text.is_empty() {
            self.check_now();
        }
    }

    /// Record an edit and schedule a debounced check.
    ///
    /// The front-end waits [`Controller::debounce_delay`] and then calls
    /// [`Controller::fire`] with the returned ticket.
    pub fn on_input(&mut self, text: impl Into<String>) -> Ticket {
        self.text = text.into();
        self.state = EditState::Editing;
        self.debouncer.schedule()
    }

    /// Run the check scheduled under `ticket` unless a later edit superseded it
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        if !self.debouncer.is_current(ticket) {
            return false;
        }
        self.check_now();
        self.state = EditState::Idle;
        true
    }

    /// Check the current text and redraw. Returns `None` while no engine is loaded.
    pub fn check_now(&mut self) -> Option<CheckResult> {
        let engine = self.engine.as_deref()?;

        let result = checker::check(
            &self.text,
            engine,
            &self.session,
            self.options.max_suggestions,
        );

        self.surface.render_overlay(&result.overlay);
        self.surface.render_stats(result.error_count, result.word_count);
        self.surface.set_correct_all_enabled(result.error_count > 0);
        self.overlay = result.overlay.clone();

        Some(result)
    }

    /// Replace `word` with the chosen suggestion and re-check
    pub fn apply_suggestion(&mut self, word: &str, suggestion: &str) -> bool {
        let replaced = match replace::replace_word(
            &self.text,
            word,
            suggestion,
            self.options.suggestion_scope,
        ) {
            Ok((text, count)) => {
                self.text = text;
                count > 0
            }
            Err(e) => {
                tracing::warn!(error = %e, word, "failed to replace word");
                false
            }
        };

        self.refresh();
        replaced
    }

    pub fn add_to_dictionary(&mut self, word: &str) {
        self.session.add_to_dictionary(word);
        self.toast(format!("'{}' added to dictionary.", word));
        self.refresh();
    }

    pub fn ignore_once(&mut self, word: &str) {
        self.session.ignore(word);
        self.toast(format!("'{}' will be ignored.", word));
        self.refresh();
    }

    /// Apply the top suggestion of every rendered misspelling.
    ///
    /// Returns the number of misspellings corrected.
    pub fn correct_all(&mut self) -> usize {
        let corrected =
            match replace::correct_all(&self.text, &self.overlay, self.options.correct_all_scope) {
                Ok((text, count)) if count > 0 => {
                    self.text = text;
                    count
                }
                Ok(_) => 0,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to apply corrections");
                    0
                }
            };

        if corrected > 0 {
            self.toast(format!("Corrected {} error(s).", corrected));
            self.refresh();
        } else {
            self.toast("No corrections to apply.");
        }
        corrected
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.refresh();
        self.surface.focus_input();
    }

    pub fn copy(&mut self) -> bool {
        match self.surface.write_clipboard(&self.text) {
            Ok(()) => {
                self.toast("Text copied to clipboard!");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard write failed");
                self.toast("Failed to copy text.");
                false
            }
        }
    }

    /// Check immediately, dropping any pending debounced check
    fn refresh(&mut self) {
        self.debouncer.invalidate();
        self.state = EditState::Idle;
        self.check_now();
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.surface.notify(Toast {
            message: message.into(),
            duration: self.options.toast_duration,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::tests::TableEngine;

    #[derive(Default)]
    struct RecordingSurface {
        input_enabled: bool,
        focus_count: usize,
        loading: bool,
        overlays: Vec<Overlay>,
        stats: Vec<(usize, usize)>,
        correct_all_enabled: bool,
        toasts: Vec<Toast>,
        clipboard: Option<String>,
        clipboard_fails: bool,
    }

    impl RecordingSurface {
        fn messages(&self) -> Vec<&str> {
            self.toasts.iter().map(|t| t.message.as_str()).collect()
        }
    }

    impl Surface for RecordingSurface {
        fn set_input_enabled(&mut self, enabled: bool) {
            self.input_enabled = enabled;
        }

        fn focus_input(&mut self) {
            self.focus_count += 1;
        }

        fn set_loading(&mut self, loading: bool) {
            self.loading = loading;
        }

        fn render_overlay(&mut self, overlay: &Overlay) {
            self.overlays.push(overlay.clone());
        }

        fn render_stats(&mut self, errors: usize, words: usize) {
            self.stats.push((errors, words));
        }

        fn set_correct_all_enabled(&mut self, enabled: bool) {
            self.correct_all_enabled = enabled;
        }

        fn notify(&mut self, toast: Toast) {
            self.toasts.push(toast);
        }

        fn write_clipboard(&mut self, text: &str) -> anyhow::Result<()> {
            if self.clipboard_fails {
                anyhow::bail!("clipboard unavailable");
            }
            self.clipboard = Some(text.to_string());
            Ok(())
        }
    }

    fn ready(engine: TableEngine) -> Controller<RecordingSurface> {
        ready_with(engine, ControllerOptions::default())
    }

    fn ready_with(engine: TableEngine, options: ControllerOptions) -> Controller<RecordingSurface> {
        let mut controller = Controller::new(RecordingSurface::default(), options);
        controller.begin_loading();
        controller.finish_loading(Ok(Box::new(engine)));
        controller
    }

    fn type_text(controller: &mut Controller<RecordingSurface>, text: &str) {
        let ticket = controller.on_input(text);
        assert!(controller.fire(ticket));
    }

    #[test]
    fn test_initial_state() {
        let controller = Controller::new(RecordingSurface::default(), ControllerOptions::default());
        assert!(!controller.is_ready());
        assert!(!controller.surface().input_enabled);
        assert_eq!(controller.surface().stats, vec![(0, 0)]);
        assert_eq!(controller.state(), EditState::Idle);
    }

    #[test]
    fn test_checks_are_noops_without_engine() {
        let mut controller =
            Controller::new(RecordingSurface::default(), ControllerOptions::default());
        let ticket = controller.on_input("Ths is a tst");

        assert!(controller.fire(ticket));
        assert!(controller.check_now().is_none());
        assert!(controller.surface().overlays.is_empty());
        assert_eq!(controller.surface().stats, vec![(0, 0)]);
        assert!(!controller.surface().input_enabled);
    }

    #[test]
    fn test_scenario_check_and_correct_all() {
        let mut controller = ready(TableEngine::scenario());
        type_text(&mut controller, "Ths is a tst");

        assert_eq!(controller.surface().stats.last(), Some(&(2, 4)));
        assert!(controller.surface().correct_all_enabled);

        assert_eq!(controller.correct_all(), 2);
        assert_eq!(controller.text(), "This is a test");
        assert_eq!(controller.surface().messages(), vec!["Corrected 2 error(s)."]);
        assert_eq!(controller.surface().stats.last(), Some(&(0, 4)));
        assert!(!controller.surface().correct_all_enabled);
    }

    #[test]
    fn test_correct_all_on_empty_text() {
        let mut controller = ready(TableEngine::scenario());
        type_text(&mut controller, "");

        assert_eq!(controller.surface().stats.last(), Some(&(0, 0)));
        assert_eq!(controller.correct_all(), 0);
        assert_eq!(controller.surface().messages(), vec!["No corrections to apply."]);
    }

    #[test]
    fn test_correct_all_skips_words_without_suggestions() {
        let mut controller = ready(TableEngine::new(&[("xyzzy", &[] as &[&str])]));
        type_text(&mut controller, "xyzzy");

        assert_eq!(controller.correct_all(), 0);
        assert_eq!(controller.text(), "xyzzy");
        assert_eq!(controller.surface().messages(), vec!["No corrections to apply."]);
    }

    #[test]
    fn test_suggestion_replaces_first_occurrence() {
        let mut controller = ready(TableEngine::new(&[("Helo", &["Hello"][..])]));
        type_text(&mut controller, "Helo Helo");
        assert_eq!(controller.surface().stats.last(), Some(&(2, 2)));

        assert!(controller.apply_suggestion("Helo", "Hello"));
        assert_eq!(controller.text(), "Hello Helo");
        assert_eq!(controller.surface().stats.last(), Some(&(1, 2)));
    }

    #[test]
    fn test_suggestion_scope_is_configurable() {
        let options = ControllerOptions {
            suggestion_scope: ReplaceScope::AllIgnoreCase,
            ..Default::default()
        };
        let mut controller = ready_with(TableEngine::new(&[("Helo", &["Hello"][..])]), options);
        type_text(&mut controller, "Helo helo");

        controller.apply_suggestion("Helo", "Hello");
        assert_eq!(controller.text(), "Hello Hello");
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut controller = ready(TableEngine::scenario());
        let first = controller.on_input("Ths");
        let second = controller.on_input("Ths is");
        assert_eq!(controller.state(), EditState::Editing);

        assert!(!controller.fire(first));
        assert!(controller.surface().overlays.is_empty());
        assert_eq!(controller.state(), EditState::Editing);

        assert!(controller.fire(second));
        assert_eq!(controller.surface().overlays.len(), 1);
        assert_eq!(controller.surface().stats.last(), Some(&(1, 2)));
        assert_eq!(controller.state(), EditState::Idle);
    }

    #[test]
    fn test_actions_supersede_pending_checks() {
        let mut controller = ready(TableEngine::scenario());
        let pending = controller.on_input("Ths");
        controller.clear();
        assert!(!controller.fire(pending));
        assert_eq!(controller.text(), "");
    }

    #[test]
    fn test_add_to_dictionary() {
        let mut controller = ready(TableEngine::scenario());
        type_text(&mut controller, "Ths is a tst");

        controller.add_to_dictionary("Ths");
        assert!(controller.session().is_custom("ths"));
        assert_eq!(
            controller.surface().messages(),
            vec!["'Ths' added to dictionary."]
        );
        assert_eq!(controller.surface().stats.last(), Some(&(1, 4)));
    }

    #[test]
    fn test_ignore_once_is_exact() {
        let mut controller = ready(TableEngine::new(&[("Teh", &["The"][..]), ("teh", &["the"][..])]));
        type_text(&mut controller, "Teh cat, teh dog");

        controller.ignore_once("Teh");
        assert_eq!(controller.surface().messages(), vec!["'Teh' will be ignored."]);
        let remaining: Vec<_> = controller
            .overlay()
            .misspellings()
            .map(|m| m.word.clone())
            .collect();
        assert_eq!(remaining, vec!["teh"]);
    }

    #[test]
    fn test_clear() {
        let mut controller = ready(TableEngine::scenario());
        type_text(&mut controller, "Ths is a tst");
        let focused = controller.surface().focus_count;

        controller.clear();
        assert_eq!(controller.text(), "");
        assert_eq!(controller.surface().stats.last(), Some(&(0, 0)));
        assert_eq!(controller.surface().focus_count, focused + 1);
    }

    #[test]
    fn test_copy() {
        let mut controller = ready(TableEngine::scenario());
        type_text(&mut controller, "some text");

        assert!(controller.copy());
        assert_eq!(controller.surface().clipboard.as_deref(), Some("some text"));

        controller.surface_mut().clipboard_fails = true;
        assert!(!controller.copy());
        assert_eq!(
            controller.surface().messages(),
            vec!["Text copied to clipboard!", "Failed to copy text."]
        );
    }

    #[test]
    fn test_failed_load() {
        let mut controller =
            Controller::new(RecordingSurface::default(), ControllerOptions::default());
        controller.begin_loading();
        assert!(controller.surface().loading);

        controller.finish_loading(Err(LoadError::Status {
            url: "https://example.invalid/en_US.aff".to_string(),
            status: 404,
        }));

        let surface = controller.surface();
        assert!(!controller.is_ready());
        assert!(!surface.loading);
        assert!(surface.input_enabled);
        assert_eq!(surface.focus_count, 1);
        assert_eq!(surface.messages(), vec!["Error: Could not load dictionary."]);
        assert_eq!(surface.toasts[0].duration, Duration::from_millis(3000));

        let ticket = controller.on_input("Ths");
        controller.fire(ticket);
        assert!(controller.surface().overlays.is_empty());
    }

    #[test]
    fn test_options_from_config() {
        let config = Config {
            max_suggestions: 3,
            debounce_ms: 50,
            ..Default::default()
        };
        let options = ControllerOptions::from(&config);
        assert_eq!(options.max_suggestions, 3);
        assert_eq!(options.debounce, Duration::from_millis(50));
        assert_eq!(options.suggestion_scope, ReplaceScope::FirstIgnoreCase);
        assert_eq!(options.correct_all_scope, ReplaceScope::AllMatchCase);
    }
}
