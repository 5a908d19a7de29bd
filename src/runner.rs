use std::io::{BufRead, Cursor};

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::question::{InMemorySource, NoShuffle, OptionLabel, Question, QuestionSource, Shuffler};
use crate::session::{
    Action, QuizMachine, Session, SessionReport, Transition, correct_by_subject,
};
use crate::ui::QuizView;

/// Typed at any prompt to leave the quiz.
const QUIT: &str = "q";

/// Drives a session from typed input: login, questions, feedback, summary, restart.
pub struct QuizRunner<S, R, I> {
    machine: QuizMachine<S, R>,
    view: QuizView,
    input: I,
    default_user: String,
    show_chart: bool,
}

enum Step {
    Continue,
    Quit,
}

impl<S: QuestionSource, R: Shuffler, I: BufRead> QuizRunner<S, R, I> {
    pub fn new(machine: QuizMachine<S, R>, input: I, default_user: impl Into<String>) -> Self {
        let default_user = default_user.into();
        Self {
            machine: machine.with_default_user(default_user.clone()),
            view: QuizView::new(),
            input,
            default_user,
            show_chart: true,
        }
    }

    pub fn with_chart(mut self, show_chart: bool) -> Self {
        self.show_chart = show_chart;
        self
    }

    /// Run sessions until the user declines a restart, quits, or input ends.
    ///
    /// Returns the report of the last session that got past login, if any.
    /// A question file that fails to load is returned as an error before any question is shown.
    pub fn run(&mut self, name: Option<&str>) -> Result<Option<SessionReport>> {
        let mut session = Session::new();
        let mut preset = name.map(str::to_string);

        loop {
            let user = match preset.take() {
                Some(user) => user,
                None => {
                    self.view.banner();
                    self.view
                        .prompt(&format!("Enter your name [{}]:", self.default_user));
                    match self.read_line()? {
                        Some(line) if line != QUIT => line,
                        _ => return Ok(None),
                    }
                }
            };

            match self.machine.next(&mut session, Action::Start { user })? {
                Transition::Started { total } => self.view.start_progress(total),
                t => bail!("Unexpected transition from start: {t:?}"),
            }

            if let Step::Quit = self.play(&mut session)? {
                info!(session = %session.id(), answered = session.history().len(), "session abandoned");
                return Ok(Some(SessionReport::from_session(&session)));
            }
            let report = SessionReport::from_session(&session);

            self.view.prompt("Restart? [y/N]:");
            let again = self
                .read_line()?
                .is_some_and(|line| line.eq_ignore_ascii_case("y"));
            if !again {
                return Ok(Some(report));
            }
            self.machine.next(&mut session, Action::Reset)?;
        }
    }

    /// Walk every question of a started session.
    fn play(&mut self, session: &mut Session) -> Result<Step> {
        loop {
            self.view.question(session);

            loop {
                self.view.prompt("Your answer (A-D):");
                let Some(line) = self.read_line()? else {
                    return Ok(Step::Quit);
                };
                if line == QUIT {
                    return Ok(Step::Quit);
                }
                let selection = (!line.is_empty()).then_some(line);
                match self.machine.next(session, Action::Submit(selection))? {
                    Transition::Rejected(warning) => self.view.warning(&warning),
                    Transition::Answered(feedback) => {
                        self.view.feedback(&feedback);
                        break;
                    }
                    t => bail!("Unexpected transition from submit: {t:?}"),
                }
            }

            if !session.is_last() {
                self.view.prompt("Press Enter for the next question →");
                match self.read_line()? {
                    Some(line) if line != QUIT => {}
                    _ => return Ok(Step::Quit),
                }
            }

            debug_assert!(session.is_answered());
            match self.machine.next(session, Action::Advance)? {
                Transition::Next(index) => {
                    debug!(index, phase = %session.phase(), "next question");
                }
                Transition::Completed(summary) => {
                    self.view.completed(&summary);
                    if self.show_chart {
                        self.view.chart(&correct_by_subject(session.history()));
                    }
                    return Ok(Step::Continue);
                }
                t => bail!("Unexpected transition from advance: {t:?}"),
            }
        }
    }

    // Trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            debug!("input closed");
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}

/// Two built-in questions used by `simulado demo`.
pub fn demo_questions() -> Vec<Question> {
    vec![
        Question {
            text: "Which article of the Brazilian Constitution lists fundamental rights?".into(),
            options: [
                "Art. 1".into(),
                "Art. 5".into(),
                "Art. 37".into(),
                "Art. 144".into(),
            ],
            correct: OptionLabel::B,
            explanation: "Art. 5 holds the individual and collective rights and duties.".into(),
            subject: "Constitutional Law".into(),
            difficulty: "Easy".into(),
        },
        Question {
            text: "What is 15% of 200?".into(),
            options: ["30".into(), "15".into(), "20".into(), "35".into()],
            correct: OptionLabel::A,
            explanation: "0.15 × 200 = 30.".into(),
            subject: "Math".into(),
            difficulty: "Easy".into(),
        },
    ]
}

/// Scripted run over [`demo_questions`]: one miss, one hit, no restart.
pub fn run_demo() -> Result<Option<SessionReport>> {
    let script = Cursor::new("Demo\nc\n\na\nn\n");
    let machine = QuizMachine::new(InMemorySource::new(demo_questions()), NoShuffle);
    QuizRunner::new(machine, script, "Guest").run(None)
}
