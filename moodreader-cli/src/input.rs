use moodreader_core::catalog::find_mood;
use moodreader_core::types::Mood;

const CUSTOM_COMMAND: &str = "/custom";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionInput {
    Empty,
    Quit,
    Mood(Mood),
    /// Free-text mood. May be blank; the controller decides.
    Custom(String),
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsInput {
    More,
    Back,
    Quit,
    Unknown(String),
}

/// Reads a line typed on the selection screen: a 1-based catalog number, a
/// mood id, `/custom <text>`, `q`, or anything else as a custom mood.
pub fn parse_selection(line: &str, catalog: &[Mood]) -> SelectionInput {
    let line = line.trim();
    if line.is_empty() {
        return SelectionInput::Empty;
    }
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return SelectionInput::Quit;
    }

    if let Some(rest) = line.strip_prefix(CUSTOM_COMMAND) {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return SelectionInput::Custom(rest.trim().to_string());
        }
    }
    if line.starts_with('/') {
        return SelectionInput::Unknown(line.to_string());
    }

    if let Ok(n) = line.parse::<usize>() {
        return match n.checked_sub(1).and_then(|i| catalog.get(i)) {
            Some(mood) => SelectionInput::Mood(mood.clone()),
            None => SelectionInput::Unknown(line.to_string()),
        };
    }

    match find_mood(line) {
        Some(mood) => SelectionInput::Mood(mood),
        None => SelectionInput::Custom(line.to_string()),
    }
}

pub fn parse_results(line: &str) -> ResultsInput {
    match line.trim().to_ascii_lowercase().as_str() {
        "m" | "more" => ResultsInput::More,
        "b" | "back" => ResultsInput::Back,
        "q" | "quit" => ResultsInput::Quit,
        other => ResultsInput::Unknown(other.to_string()),
    }
}
