//! Interactive quiz over line-oriented input.
//!
//! Each answer may be typed as the option text (any case) or its number.
//! `restart` starts over from the first question.

use std::io::{BufRead, Write};

use cafely_core::{DrinkCatalog, Question, QuizSession};

use crate::recommend::write_recommendations;

const RESTART: &str = "restart";

/// Runs the quiz to completion and prints the recommendations.
///
/// # Errors
///
/// Returns an error if input ends before every question is answered, or if
/// reading or writing fails.
pub(crate) fn run_quiz<R: BufRead, W: Write>(
    catalog: &DrinkCatalog,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut session = QuizSession::new();
    let mut line = String::new();

    while let Some(question) = session.current_question() {
        write_question(&session, question, out)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("input ended before the quiz was complete");
        }
        let reply = line.trim();

        if reply.eq_ignore_ascii_case(RESTART) {
            session.reset();
            writeln!(out, "Starting over.")?;
            continue;
        }

        let answer = resolve_option(question, reply).unwrap_or(reply);
        if let Err(err) = session.answer(answer) {
            writeln!(out, "{err}")?;
        }
    }

    tracing::debug!(
        answered = session.preferences().answered_count(),
        "quiz complete"
    );
    writeln!(out)?;
    writeln!(out, "Your drinks:")?;
    write_recommendations(catalog, session.preferences(), out)
}

fn write_question<W: Write>(
    session: &QuizSession,
    question: &Question,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "{}: {}", session.progress_label(), question.title)?;
    for (index, option) in question.options.iter().enumerate() {
        writeln!(out, "  {}) {option}", index + 1)?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Maps a 1-based option number to its option text.
fn resolve_option<'q>(question: &'q Question, reply: &str) -> Option<&'q str> {
    let index: usize = reply.parse().ok()?;
    question.options.get(index.checked_sub(1)?).copied()
}
