//! Output formatting for one-shot (non-interactive) lookups.

use crate::client::Study;
use crate::query::{join_tokens, normalize, tokens, TokenKind};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print studies as cards: year badge, title, then labelled detail rows.
pub fn print_studies(studies: &[Study], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    if studies.is_empty() {
        writeln!(stdout, "No data")?;
        return Ok(());
    }

    for (i, study) in studies.iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }

        if let Some(year) = study.year {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
            write!(stdout, "[{}] ", year)?;
            stdout.reset()?;
        }
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(stdout, "{}", study.title)?;
        stdout.reset()?;

        if let Some(ref authors) = study.authors {
            print_row(&mut stdout, "Authors", authors, Color::White)?;
        }
        if let Some(ref journal) = study.journal {
            print_row(&mut stdout, "Journal", journal, Color::Cyan)?;
        }

        match (&study.study_id, study.n_contrasts) {
            (Some(id), Some(n)) => {
                print_row(&mut stdout, "Study ID", &format!("{} / Contrast: {}", id, n), Color::Magenta)?
            }
            (Some(id), None) => print_row(&mut stdout, "Study ID", id, Color::Magenta)?,
            (None, Some(n)) => {
                print_row(&mut stdout, "Study", &format!("N/A / Contrast: {}", n), Color::Magenta)?
            }
            (None, None) => {}
        }

        if let Some(url) = study.pubmed_url() {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
            writeln!(stdout, "  {}", url)?;
            stdout.reset()?;
        }
    }

    writeln!(stdout)?;
    writeln!(stdout, "{} studies", studies.len())?;

    Ok(())
}

fn print_row(
    stdout: &mut StandardStream,
    label: &str,
    value: &str,
    value_color: Color,
) -> io::Result<()> {
    write!(stdout, "  ")?;
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    write!(stdout, "{}: ", label)?;
    stdout.reset()?;
    stdout.set_color(ColorSpec::new().set_fg(Some(value_color)))?;
    writeln!(stdout, "{}", value)?;
    stdout.reset()?;
    Ok(())
}

/// Print studies as a JSON array (machine consumption).
pub fn print_studies_json(studies: &[Study]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(studies).map_err(io::Error::other)?;
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", json)?;
    Ok(())
}

/// Debugging aid: show how a query tokenizes, classifies, and normalizes.
pub fn print_tokens(query: &str, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);

    let toks = tokens(query);
    for token in &toks {
        match token.kind {
            TokenKind::Operator(_) => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                write!(stdout, "op   ")?;
            }
            TokenKind::Term => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                if token.is_coordinate() {
                    write!(stdout, "coord")?;
                } else {
                    write!(stdout, "term ")?;
                }
            }
        }
        stdout.reset()?;
        writeln!(stdout, "  {}", token.text)?;
    }

    let normalized = join_tokens(&normalize(toks));
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    write!(stdout, "normalized")?;
    stdout.reset()?;
    writeln!(stdout, "  {}", normalized)?;

    Ok(())
}
