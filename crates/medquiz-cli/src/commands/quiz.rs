//! The `medquiz quiz` command, plus the terminal quiz loop shared with
//! `medquiz scenario`.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use medquiz_core::model::Tier;
use medquiz_core::{QuizItem, QuizOptions, QuizSession};

use super::AppContext;

pub async fn execute(
    config_path: Option<&Path>,
    tier: Option<Tier>,
    count: Option<usize>,
    shuffle: bool,
) -> Result<()> {
    let ctx = AppContext::load(config_path)?;
    let tier = ctx.tier(tier).await?;
    let pool = ctx.resolver()?.resolve_tier(tier).await;

    let options = QuizOptions {
        shuffle,
        count: Some(count.unwrap_or(ctx.config.default_question_count)),
    };
    let session = QuizSession::entity_quiz(&pool, &pool, &options, &mut rand::thread_rng())
        .with_context(|| format!("cannot start a {tier} medication quiz"))?;

    ctx.show_disclaimer_once().await?;
    println!("{tier} medication quiz: {} question(s)", session.total());

    let session = run_session(session, &mut io::stdin().lock(), &mut io::stdout().lock())?;
    finish(&ctx, &session).await
}

/// Ask every question on `out`, reading choice numbers from `input`.
///
/// Stops early on end of input or `q`; the returned session is then
/// unfinished.
pub fn run_session<Q, R, W>(
    mut session: QuizSession<Q>,
    input: &mut R,
    out: &mut W,
) -> Result<QuizSession<Q>>
where
    Q: QuizItem,
    R: BufRead,
    W: Write,
{
    while !session.is_finished() {
        let question = session.current();
        writeln!(
            out,
            "\nQuestion {}/{}: {}",
            session.index() + 1,
            session.total(),
            question.prompt()
        )?;
        for (i, choice) in question.choices().iter().enumerate() {
            writeln!(out, "  {}) {choice}", i + 1)?;
        }

        let Some(pick) = read_choice(input, out, question.choices().len())? else {
            writeln!(out, "\nQuiz abandoned.")?;
            return Ok(session);
        };
        let selected = question.choices()[pick].clone();
        let correct = question.correct_answer().to_string();

        session = session.select_answer(&selected);
        if selected == correct {
            writeln!(out, "Correct!")?;
        } else {
            writeln!(out, "Incorrect. The answer is: {correct}")?;
        }
        session = session.advance();
    }
    Ok(session)
}

/// Zero-based choice index, or `None` when the user quits.
fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    choices: usize,
) -> Result<Option<usize>> {
    loop {
        write!(out, "Answer [1-{choices}, q to quit]: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=choices).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(out, "Enter a number between 1 and {choices}.")?,
        }
    }
}

/// Review of answered questions, with rationale and pearl when present.
pub fn print_review<Q, W>(session: &QuizSession<Q>, out: &mut W) -> Result<()>
where
    Q: QuizItem + Clone,
    W: Write,
{
    let outcome = session.outcome();
    writeln!(
        out,
        "\nScore: {}/{} ({:.0}%)",
        outcome.score,
        outcome.total,
        outcome.percent()
    )?;

    for (i, entry) in outcome.answers.iter().enumerate() {
        let mark = if entry.is_correct { "ok" } else { "x" };
        writeln!(out, "  [{mark}] {}. {}", i + 1, entry.item.prompt())?;
        if !entry.is_correct {
            writeln!(out, "       your answer: {}", entry.selected)?;
            writeln!(out, "       correct:     {}", entry.correct_answer)?;
        }
        if let Some(rationale) = &entry.rationale {
            writeln!(out, "       Rationale: {rationale}")?;
        }
        if let Some(pearl) = &entry.clinical_pearl {
            writeln!(out, "       Pearl: {pearl}")?;
        }
    }
    Ok(())
}

/// Print the review and record the result if the quiz was completed.
pub async fn finish<Q: QuizItem + Clone>(ctx: &AppContext, session: &QuizSession<Q>) -> Result<()> {
    print_review(session, &mut io::stdout().lock())?;

    match ctx.statistics().record_session(session).await? {
        Some(stats) => println!(
            "\n{} quiz(zes) taken, {:.1}% average.",
            stats.total_quizzes, stats.average_score
        ),
        None => println!("\nQuiz not finished; statistics unchanged."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use medquiz_core::model::{ScenarioQuestion, MULTIPLE_CHOICE};
    use std::io::Cursor;

    fn question(id: &str, correct: &str) -> ScenarioQuestion {
        ScenarioQuestion {
            id: id.to_string(),
            scope: vec!["EMT".to_string()],
            drug_id: String::new(),
            question_type: MULTIPLE_CHOICE.to_string(),
            question: format!("Question {id}?"),
            choices: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            correct_answer: correct.to_string(),
            rationale: format!("Because {correct}."),
            clinical_pearl: String::new(),
        }
    }

    fn play(input: &str) -> (QuizSession<ScenarioQuestion>, String) {
        let session = QuizSession::new(vec![question("q1", "a"), question("q2", "c")]).unwrap();
        let mut out = Vec::new();
        let session = run_session(session, &mut Cursor::new(input), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn answers_every_question() {
        let (session, out) = play("1\n2\n");
        assert!(session.is_finished());
        assert_eq!(session.score(), 1);
        assert!(out.contains("Correct!"));
        assert!(out.contains("Incorrect. The answer is: c"));
    }

    #[test]
    fn reprompts_on_invalid_input() {
        let (session, out) = play("7\nabc\n1\n3\n");
        assert!(session.is_finished());
        assert_eq!(session.score(), 2);
        assert_eq!(out.matches("Enter a number between 1 and 3.").count(), 2);
    }

    #[test]
    fn end_of_input_abandons() {
        let (session, out) = play("1\n");
        assert!(!session.is_finished());
        assert_eq!(session.score(), 1);
        assert!(out.contains("Quiz abandoned."));
    }

    #[test]
    fn q_quits() {
        let (session, _) = play("q\n");
        assert!(!session.is_finished());
        assert_eq!(session.answers().count(), 0);
    }

    #[test]
    fn review_shows_score_and_rationale() {
        let (session, _) = play("2\n3\n");
        let mut out = Vec::new();
        print_review(&session, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Score: 1/2 (50%)"));
        assert!(out.contains("your answer: b"));
        assert!(out.contains("Rationale: Because a."));
        assert!(!out.contains("Pearl:"));
    }
}
