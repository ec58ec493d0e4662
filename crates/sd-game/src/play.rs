use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use sd_core::core::{
    Dataset, GameSummary, Phase, RoundRecord, SentimentLabel, SkipOutcome, TimerPoll, Winner,
};

use crate::controller::{GameController, SessionView};
use crate::export::export_history;

const REVIEW_PREVIEW_CHARS: usize = 48;

#[derive(Clone, Debug)]
pub struct PlayOptions {
    pub rounds: u32,
    /// Where to write the history when a game ends.
    pub export_path: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Choice {
    Guess(SentimentLabel),
    Skip,
    Quit,
}

fn parse_choice(input: &str) -> Option<Choice> {
    match input.to_ascii_lowercase().as_str() {
        "p" | "positive" => Some(Choice::Guess(SentimentLabel::Positive)),
        "n" | "negative" => Some(Choice::Guess(SentimentLabel::Negative)),
        "u" | "neutral" => Some(Choice::Guess(SentimentLabel::Neutral)),
        "s" | "skip" => Some(Choice::Skip),
        "q" | "quit" => Some(Choice::Quit),
        _ => None,
    }
}

enum Flow {
    Continue,
    Quit,
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    match input.read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line.trim().to_owned())),
    }
}

// ---------------------------------------------------------------------------
// run — interactive game loop
// ---------------------------------------------------------------------------

/// Plays games on `controller` until the player quits or input ends.
pub fn run<R: BufRead, W: Write>(
    controller: &GameController,
    dataset: &Dataset,
    options: &PlayOptions,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    controller.start(dataset.clone(), options.rounds)?;
    writeln!(
        output,
        "{}",
        format!(
            "Sentiment Duel: {} rounds against the AI. Good luck!",
            options.rounds
        )
        .bold()
    )?;

    loop {
        let view = controller.view();
        let flow = match view.phase {
            Phase::Active => active_turn(controller, &view, input, output)?,
            Phase::Resolved => resolved_turn(controller, &view, input, output)?,
            Phase::GameOver => {
                finish_game(controller, options, output)?;
                match prompt_line(input, output, "Play again? [y/N]: ")? {
                    Some(answer) if matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes") => {
                        controller.restart(dataset.clone(), options.rounds)?;
                        writeln!(output)?;
                        Flow::Continue
                    }
                    _ => Flow::Quit,
                }
            }
            Phase::Setup => Flow::Quit,
        };
        if let Flow::Quit = flow {
            break;
        }
    }

    writeln!(output, "Thanks for playing!")?;
    Ok(())
}

fn active_turn<R: BufRead, W: Write>(
    controller: &GameController,
    view: &SessionView,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Flow> {
    // A round that ran out while we waited resolves before it is shown again.
    if let TimerPoll::Expired(_) = controller.poll_timer()? {
        return Ok(Flow::Continue);
    }

    writeln!(output)?;
    let mut header = format!(
        "Round {}/{}  |  You {}  AI {}",
        view.round_number, view.total_rounds, view.scores.human, view.scores.ai
    );
    if let Some(secs) = view.remaining_secs {
        header.push_str(&format!("  |  {secs}s left"));
    }
    writeln!(output, "{}", header.cyan())?;
    writeln!(
        output,
        "  \"{}\"",
        view.review.as_deref().unwrap_or_default().italic()
    )?;

    let Some(line) = prompt_line(
        input,
        output,
        "Your call: [p]ositive / [n]egative / ne[u]tral, [s]kip, [q]uit: ",
    )?
    else {
        writeln!(output)?;
        return Ok(Flow::Quit);
    };

    match parse_choice(&line) {
        Some(Choice::Guess(label)) => {
            controller.submit_answer(label)?;
        }
        Some(Choice::Skip) => {
            // An expired round is shown as a timeout on the next pass.
            if let SkipOutcome::Skipped = controller.skip()? {
                writeln!(output, "{}", "Skipped. Here's another one.".dimmed())?;
            }
        }
        Some(Choice::Quit) => return Ok(Flow::Quit),
        None => {
            writeln!(output, "{}", "Please enter p, n, u, s, or q.".yellow())?;
        }
    }
    Ok(Flow::Continue)
}

fn resolved_turn<R: BufRead, W: Write>(
    controller: &GameController,
    view: &SessionView,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Flow> {
    if let Some(record) = &view.last_result {
        render_result(record, output)?;
    }
    writeln!(
        output,
        "Score: You {}  AI {}  (agreed {} times)",
        view.scores.human, view.scores.ai, view.scores.agreement
    )?;

    let prompt = if view.round_number >= view.total_rounds {
        "Press Enter to see the results, or q to quit: "
    } else {
        "Press Enter for the next round, or q to quit: "
    };
    match prompt_line(input, output, prompt)? {
        None => {
            writeln!(output)?;
            Ok(Flow::Quit)
        }
        Some(line) if line.eq_ignore_ascii_case("q") => Ok(Flow::Quit),
        Some(_) => {
            controller.advance()?;
            Ok(Flow::Continue)
        }
    }
}

fn render_result<W: Write>(record: &RoundRecord, output: &mut W) -> io::Result<()> {
    if record.timed_out() {
        writeln!(output, "{}", "Time's up! No guess recorded.".yellow())?;
    } else if record.human_correct {
        writeln!(output, "{}", "You got it!".green())?;
    } else {
        writeln!(output, "{}", "Not quite.".red())?;
    }

    writeln!(
        output,
        "Truth: {}. You said {}. AI said {} (polarity {:+.2}).",
        record.truth, record.human, record.ai, record.ai_polarity
    )?;
    if record.agreed {
        writeln!(output, "You and the AI agreed.")?;
    } else {
        writeln!(output, "{}", "Different brains, different vibes.".dimmed())?;
    }
    if record.is_upset() {
        writeln!(
            output,
            "{}",
            "You beat the machine on this one!".bright_green().bold()
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Game over
// ---------------------------------------------------------------------------

fn finish_game<W: Write>(
    controller: &GameController,
    options: &PlayOptions,
    output: &mut W,
) -> anyhow::Result<()> {
    let summary = controller.summary()?;
    let history = controller.history();

    writeln!(output)?;
    render_summary(&summary, output)?;
    render_history(&history, output)?;

    if let Some(path) = &options.export_path {
        match export_history(path, &history) {
            Ok(_) => writeln!(output, "History saved to {}", path.display())?,
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "history export failed");
                writeln!(
                    output,
                    "{}",
                    format!("Error: failed to save history: {err}").red()
                )?;
            }
        }
    }
    Ok(())
}

fn render_summary<W: Write>(summary: &GameSummary, output: &mut W) -> io::Result<()> {
    let verdict = match summary.winner {
        Winner::Human => "You beat the AI!".bright_green().bold(),
        Winner::Ai => "The AI wins this time.".red().bold(),
        Winner::Tie => "It's a tie!".yellow().bold(),
    };
    writeln!(output, "{verdict}")?;
    writeln!(
        output,
        "Final score: You {}  AI {}  over {} rounds. You agreed with the AI {} times.",
        summary.scores.human, summary.scores.ai, summary.total_rounds, summary.scores.agreement
    )
}

fn render_history<W: Write>(history: &[RoundRecord], output: &mut W) -> io::Result<()> {
    writeln!(output)?;
    writeln!(
        output,
        "{}",
        format!(
            "{:>5}  {:<8}  {:<8}  {:<8}  {:>8}  Review",
            "Round", "Truth", "You", "AI", "Polarity"
        )
        .bold()
    )?;
    for record in history {
        writeln!(
            output,
            "{:>5}  {:<8}  {:<8}  {:<8}  {:>+8.3}  {}",
            record.round,
            record.truth.as_str(),
            record.human.as_str(),
            record.ai.as_str(),
            record.ai_polarity,
            preview(&record.review)
        )?;
    }
    Ok(())
}

fn preview(review: &str) -> String {
    if review.chars().count() <= REVIEW_PREVIEW_CHARS {
        return review.to_owned();
    }
    let cut: String = review.chars().take(REVIEW_PREVIEW_CHARS - 3).collect();
    format!("{cut}...")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
