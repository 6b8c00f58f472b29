//! Interactive practice loop.

use anyhow::Result;
use flashdeck_core::types::{Category, PracticeMode, QuestionCount};
use flashdeck_core::{PracticeSession, PracticeStore, RevealStep, SessionEvent, SessionState};
use flashdeck_lib::{commands, AppState};
use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

enum Input {
    Line(String),
    Quit,
}

/// Print `text` and read one line. EOF and `q` both mean quit.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Input> {
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Input::Quit);
    }
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        Ok(Input::Quit)
    } else {
        Ok(Input::Line(line.to_string()))
    }
}

pub fn confirm<R: BufRead, W: Write>(mut input: R, mut output: W, question: &str) -> Result<bool> {
    match prompt(&mut input, &mut output, &format!("{question} [y/N] "))? {
        Input::Line(answer) => Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")),
        Input::Quit => Ok(false),
    }
}

fn quit<S: PracticeStore, W: Write>(session: &mut PracticeSession<S>, output: &mut W) -> Result<()> {
    session.stop();
    writeln!(output, "\nSession stopped.")?;
    Ok(())
}

pub fn run<R: BufRead, W: Write>(
    state: &AppState,
    category: &Category,
    mode: PracticeMode,
    count: QuestionCount,
    mut input: R,
    mut output: W,
) -> Result<()> {
    let mut session = commands::open_practice_session(state, category.id, mode, count)?;

    let retry_pass = Rc::new(Cell::new(None));
    let flag = Rc::clone(&retry_pass);
    session.subscribe(move |event| {
        if let SessionEvent::RetryPassStarted { questions } = event {
            flag.set(Some(*questions));
        }
    });

    writeln!(
        output,
        "Practicing \"{}\" ({} questions, {}). Enter q to quit.",
        category.name,
        session.working_set().len(),
        mode
    )?;

    while session.state() != SessionState::Finished {
        let Some(question) = session.current_question().cloned() else {
            break;
        };
        writeln!(output, "\n{}", question.flashcard.question)?;

        match mode {
            PracticeMode::MultipleChoice => {
                for (i, answer) in question.answers.iter().enumerate() {
                    writeln!(output, "  {}) {}", i + 1, answer.text)?;
                }
                let choice = loop {
                    match prompt(&mut input, &mut output, "> ")? {
                        Input::Quit => return quit(&mut session, &mut output),
                        Input::Line(line) => match line.parse::<usize>() {
                            Ok(n) if (1..=question.answers.len()).contains(&n) => break n - 1,
                            _ => writeln!(output, "Enter a number from 1 to {}.", question.answers.len())?,
                        },
                    }
                };

                let feedback = session.submit_answer(&question.answers[choice])?;
                if feedback.correct {
                    writeln!(output, "Correct!")?;
                } else {
                    writeln!(output, "Wrong. The answer is: {}", feedback.correct_answer_text)?;
                }

                session.advance()?;
                if let Some(missed) = retry_pass.take() {
                    writeln!(output, "\nRetrying {missed} missed question(s).")?;
                }
            }
            PracticeMode::Flashcard => {
                if let Input::Quit = prompt(&mut input, &mut output, "[enter] reveal ")? {
                    return quit(&mut session, &mut output);
                }
                if let RevealStep::Revealed(text) = session.toggle_reveal()? {
                    writeln!(output, "Answer: {text}")?;
                }
                if let Input::Quit = prompt(&mut input, &mut output, "[enter] next ")? {
                    return quit(&mut session, &mut output);
                }
                session.toggle_reveal()?;
            }
        }
    }

    let summary = session.summary();
    drop(session);
    let outcome = commands::finish_practice_session(state, summary)?;

    writeln!(
        output,
        "\nFinished: {} correct, {} incorrect{}",
        summary.correct_answers,
        summary.incorrect_answers,
        if summary.perfect { " (perfect!)" } else { "" }
    )?;
    writeln!(
        output,
        "Points: {}  Streak: {}",
        outcome.progress.points, outcome.progress.streak
    )?;
    for badge in &outcome.unlocked_badges {
        writeln!(output, "New badge: {badge}")?;
    }
    Ok(())
}
