pub const RECOMMENDATION_COUNT: usize = 6;
pub const MIN_PUBLICATION_YEAR: u16 = 2010;
pub const MIN_GOODREADS_RATING: &str = "4.1";

/// Directive asking the model to skip titles already shown this session.
///
/// Titles are passed through verbatim. Returns `None` for an empty list so the
/// prompt carries no exclusion clause at all.
pub fn exclusion_directive(exclude_titles: &[String]) -> Option<String> {
    if exclude_titles.is_empty() {
        return None;
    }
    Some(format!(
        "IMPORTANT: Do NOT recommend any of these books: {}.",
        exclude_titles.join(", ")
    ))
}

pub fn build_curation_prompt(mood_label: &str, description: &str, exclude_titles: &[String]) -> String {
    let mut sections = vec![format!(
        "I am feeling {mood_label} ({description}).\n\
         Please recommend exactly {RECOMMENDATION_COUNT} real, high-quality books that perfectly match this mood."
    )];

    if let Some(directive) = exclusion_directive(exclude_titles) {
        sections.push(directive);
    }

    sections.push(format!(
        "CRITICAL CONSTRAINTS:\n\
         1. Only recommend books published AFTER the year {MIN_PUBLICATION_YEAR}.\n\
         2. Only recommend books that have a Goodreads rating of {MIN_GOODREADS_RATING} or higher.\n\
         3. For EACH book, you MUST provide a valid ISBN-13 (without hyphens). This is critical for fetching covers."
    ));

    sections.push("Structure your response as JSON.".into());

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_directive_for_empty_exclusions() {
        assert_eq!(exclusion_directive(&[]), None);

        let prompt = build_curation_prompt("Joyful", "Uplifting stories.", &[]);
        assert!(!prompt.contains("Do NOT recommend"));
    }

    #[test]
    fn directive_lists_titles_verbatim_comma_separated() {
        let titles = vec!["Piranesi".to_string(), "Klara and the Sun".to_string()];
        assert_eq!(
            exclusion_directive(&titles).as_deref(),
            Some("IMPORTANT: Do NOT recommend any of these books: Piranesi, Klara and the Sun.")
        );
    }

    #[test]
    fn prompt_embeds_mood_and_constraints() {
        let titles = vec!["The Midnight Library".to_string()];
        let prompt = build_curation_prompt("Melancholy", "Poignant reads.", &titles);

        assert!(prompt.starts_with("I am feeling Melancholy (Poignant reads.)."));
        assert!(prompt.contains("exactly 6 real"));
        assert!(prompt.contains("AFTER the year 2010"));
        assert!(prompt.contains("4.1 or higher"));
        assert!(prompt.contains("ISBN-13"));
        assert!(prompt.contains("any of these books: The Midnight Library."));
        assert!(prompt.ends_with("Structure your response as JSON."));
    }
}
