use crate::checker::session::Session;
use crate::cli::terminal::TerminalSurface;
use crate::config::Config;
use crate::controller::{Controller, ControllerOptions};
use crate::dict::loader;
use crate::render::{html, terminal};
use anyhow::Result;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Editor, Input, Select};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Type,
    Edit,
    Review,
    CorrectAll,
    Copy,
    Clear,
    ShowHtml,
    Quit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Type => "Type text",
            Action::Edit => "Edit in $EDITOR",
            Action::Review => "Review a misspelling",
            Action::CorrectAll => "Correct all",
            Action::Copy => "Copy to clipboard",
            Action::Clear => "Clear",
            Action::ShowHtml => "Show HTML overlay",
            Action::Quit => "Quit",
        }
    }
}

/// What to do with one misspelling
enum Fix {
    Suggestion(String),
    AddToDictionary,
    Ignore,
}

type TerminalController = Controller<TerminalSurface>;

/// Run an interactive checking session until the user quits
pub async fn run(config: &Config, colored: bool) -> Result<()> {
    let theme = ColorfulTheme::default();
    let term = Term::stderr();

    let mut controller = Controller::new(
        TerminalSurface::new(colored),
        ControllerOptions::from(config),
    );
    loader::initialize(&mut controller, &config.dictionary_source(), &config.locale).await;

    loop {
        let actions = available_actions(&controller);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();

        let surface = controller.surface_mut();
        // Focus lands on the text input when the controller asks for it
        let default = if surface.take_focus() { 0 } else { labels.len() - 1 };
        let toast = surface.active_toast().map(str::to_string);
        let prompt = menu_prompt(toast.as_deref(), controller.session());

        let Some(choice) = Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(default)
            .interact_on_opt(&term)?
        else {
            break;
        };

        match actions[choice] {
            Action::Type => {
                let text: String = Input::with_theme(&theme)
                    .with_prompt("Text")
                    .with_initial_text(controller.text())
                    .allow_empty(true)
                    .interact_text_on(&term)?;
                submit(&mut controller, text).await;
            }
            Action::Edit => {
                if let Some(text) = Editor::new().edit(controller.text())? {
                    submit(&mut controller, text).await;
                }
            }
            Action::Review => review(&mut controller, &theme, &term, colored)?,
            Action::CorrectAll => {
                controller.correct_all();
            }
            Action::Copy => {
                controller.copy();
            }
            Action::Clear => controller.clear(),
            Action::ShowHtml => {
                println!("{}", html::overlay_markup(controller.overlay()));
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

/// Menu header: session word counts plus the current toast, if any
fn menu_prompt(toast: Option<&str>, session: &Session) -> String {
    let mut prompt = "Action".to_string();

    let custom = session.custom_count();
    let ignored = session.ignored_count();
    if custom > 0 || ignored > 0 {
        prompt.push_str(&format!(" [{} added, {} ignored]", custom, ignored));
    }
    if let Some(toast) = toast {
        prompt.push_str(&format!(" ({})", toast));
    }
    prompt
}

fn available_actions(controller: &TerminalController) -> Vec<Action> {
    let surface = controller.surface();
    let mut actions = Vec::new();

    if surface.input_enabled() {
        actions.push(Action::Type);
        actions.push(Action::Edit);
    }
    if controller.overlay().error_count() > 0 {
        actions.push(Action::Review);
    }
    if surface.correct_all_enabled() {
        actions.push(Action::CorrectAll);
    }
    actions.extend([Action::Copy, Action::Clear, Action::ShowHtml, Action::Quit]);
    actions
}

/// Hand an edit to the controller and run the check once the debounce delay passes
async fn submit(controller: &mut TerminalController, text: String) {
    let ticket = controller.on_input(text);
    tokio::time::sleep(controller.debounce_delay()).await;
    controller.fire(ticket);
}

fn review(
    controller: &mut TerminalController,
    theme: &ColorfulTheme,
    term: &Term,
    colored: bool,
) -> Result<()> {
    let misspellings: Vec<_> = controller.overlay().misspellings().cloned().collect();
    let labels: Vec<String> = misspellings
        .iter()
        .map(|m| terminal::describe(&m.word, &m.suggestions, colored))
        .collect();

    let Some(index) = Select::with_theme(theme)
        .with_prompt("Misspelling")
        .items(&labels)
        .default(0)
        .interact_on_opt(term)?
    else {
        return Ok(());
    };
    let misspelling = &misspellings[index];

    let mut fixes: Vec<(String, Fix)> = misspelling
        .suggestions
        .iter()
        .map(|s| (s.clone(), Fix::Suggestion(s.clone())))
        .collect();
    fixes.push(("Add to Dictionary".to_string(), Fix::AddToDictionary));
    fixes.push(("Ignore Once".to_string(), Fix::Ignore));
    let fix_labels: Vec<&str> = fixes.iter().map(|(label, _)| label.as_str()).collect();

    let Some(choice) = Select::with_theme(theme)
        .with_prompt(format!("Fix '{}'", misspelling.word))
        .items(&fix_labels)
        .default(0)
        .interact_on_opt(term)?
    else {
        return Ok(());
    };

    match &fixes[choice].1 {
        Fix::Suggestion(suggestion) => {
            controller.apply_suggestion(&misspelling.word, suggestion);
        }
        Fix::AddToDictionary => controller.add_to_dictionary(&misspelling.word),
        Fix::Ignore => controller.ignore_once(&misspelling.word),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_prompt_plain() {
        assert_eq!(menu_prompt(None, &Session::new()), "Action");
    }

    #[test]
    fn test_menu_prompt_shows_session_counts() {
        let mut session = Session::new();
        session.add_to_dictionary("tokio");
        session.add_to_dictionary("serde");
        session.ignore("Ths");

        assert_eq!(
            menu_prompt(Some("'Ths' will be ignored."), &session),
            "Action [2 added, 1 ignored] ('Ths' will be ignored.)"
        );
    }
}
