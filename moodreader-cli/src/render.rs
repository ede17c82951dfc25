use moodreader_core::types::{CurationResponse, Mood};
use moodreader_providers::covers::{CoverAvailability, CoverLookup};
use std::io::{self, Write};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{CLEAR_SCREEN}")?;
    out.flush()
}

pub fn selection(out: &mut impl Write, catalog: &[Mood], error: Option<&str>) -> io::Result<()> {
    writeln!(out, "MoodReader")?;
    writeln!(out, "How are you feeling today?")?;
    writeln!(out)?;
    for (i, mood) in catalog.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {} {:<12} {}",
            i + 1,
            mood.emoji,
            mood.label,
            mood.description
        )?;
    }
    writeln!(out)?;
    if let Some(error) = error {
        writeln!(out, "! {error}")?;
    }
    writeln!(
        out,
        "Pick a number or mood id, describe your mood, or use /custom <text>. q quits."
    )?;
    write!(out, "> ")?;
    out.flush()
}

pub fn loading(out: &mut impl Write, mood: &Mood) -> io::Result<()> {
    if mood.is_custom() {
        writeln!(out, "Curating books for \"{}\"...", mood.description)?;
    } else {
        writeln!(out, "Curating {} books...", mood.label)?;
    }
    out.flush()
}

/// `covers` holds one probe result per book, or is empty when probing is off.
pub fn results(
    out: &mut impl Write,
    mood: &Mood,
    recs: &CurationResponse,
    error: Option<&str>,
    lookup: &CoverLookup,
    covers: &[CoverAvailability],
) -> io::Result<()> {
    writeln!(out, "{} {}", mood.emoji, mood.collection_title())?;
    writeln!(out, "{}", mood.collection_tagline())?;
    writeln!(out)?;
    writeln!(out, "\"{}\"", recs.curator_note)?;
    writeln!(out)?;

    if recs.books.is_empty() {
        writeln!(out, "No books this time.")?;
    }
    for (i, book) in recs.books.iter().enumerate() {
        writeln!(out, "{:>2}. {} by {}", i + 1, book.title, book.author)?;
        writeln!(out, "    {} | rating {}", book.year, book.rating)?;
        if !book.summary.is_empty() {
            writeln!(out, "    {}", book.summary)?;
        }
        if !book.reason.is_empty() {
            writeln!(out, "    Why: {}", book.reason)?;
        }
        if let Some(url) = lookup.url_for(&book.isbn) {
            let marker = match covers.get(i) {
                Some(CoverAvailability::Missing) => " (no cover)",
                _ => "",
            };
            writeln!(out, "    Cover: {url}{marker}")?;
        }
        writeln!(out)?;
    }

    if !recs.links.is_empty() {
        writeln!(out, "Context & Sources")?;
        for link in &recs.links {
            writeln!(out, "  - {} <{}>", link.title, link.uri)?;
        }
        writeln!(out)?;
    }

    if let Some(error) = error {
        writeln!(out, "! {error}")?;
    }
    Ok(())
}

pub fn results_prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "[m] more  [b] back  [q] quit > ")?;
    out.flush()
}
