//! Interface de terminal do simulado: cartões de pergunta, feedback colorido
//! e o gráfico de acertos por assunto.
//!
//! Usa as crates `console` para estilização com cores e `indicatif` para a
//! barra de progresso da sessão. O [`QuizView`] só lê o estado da sessão;
//! quem decide as transições é o [`QuizMachine`](crate::session::QuizMachine).

use std::collections::BTreeMap;
use std::io::{self, Write};

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::ValidationWarning;
use crate::session::{Feedback, Session, SessionReport, Summary};

/// Largura máxima, em células, da maior barra do gráfico.
const CHART_WIDTH: usize = 30;

/// Renderizador do simulado no terminal.
pub struct QuizView {
    // Barra de progresso da sessão (desenhada em stderr).
    pb: ProgressBar,
    green: Style,
    red: Style,
    yellow: Style,
    cyan: Style,
    dim: Style,
}

impl Default for QuizView {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizView {
    pub fn new() -> Self {
        Self {
            pb: ProgressBar::hidden(),
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            cyan: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Cabeçalho exibido antes do login.
    pub fn banner(&self) {
        self.line(String::new());
        self.line(format!("{}", self.cyan.apply_to("📚 Exam Simulator")));
        self.line(format!(
            "{}",
            self.dim.apply_to("Prepare for your exams one question at a time.")
        ));
        self.line(String::new());
    }

    /// Mostra um prompt sem quebra de linha e descarrega o stdout.
    pub fn prompt(&self, text: &str) {
        self.pb.suspend(|| {
            print!("{} ", self.cyan.apply_to(text));
            let _ = io::stdout().flush();
        });
    }

    /// Reinicia a barra de progresso para uma sessão recém-iniciada.
    pub fn start_progress(&mut self, total: usize) {
        self.pb = ProgressBar::new(total as u64);
        self.pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:30.cyan/blue} {pos}/{len} answered")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
    }

    /// Cartão da pergunta corrente com alternativas, assunto e dificuldade.
    pub fn question(&self, session: &Session) {
        let (Some(index), Some(q)) = (session.index(), session.current()) else {
            return;
        };

        self.line(String::new());
        self.line(format!(
            "{}  {}",
            self.cyan
                .apply_to(format!("Question {}/{}", index + 1, session.total())),
            self.dim
                .apply_to(format!("{} · score {}", session.user(), session.score()))
        ));
        self.line(q.text.clone());
        self.line(format!(
            "{}",
            self.dim.apply_to(format!(
                "Subject: {} | Difficulty: {}",
                q.subject, q.difficulty
            ))
        ));
        for (label, text) in q.labeled_options() {
            self.line(format!("  {label}) {text}"));
        }
    }

    pub fn warning(&self, warning: &ValidationWarning) {
        self.line(format!("  {} {warning}", self.yellow.apply_to("⚠")));
    }

    /// Resultado da resposta seguido da explicação.
    pub fn feedback(&self, feedback: &Feedback) {
        self.pb.inc(1);
        self.line(format!("  You chose {}", feedback.selected));
        if feedback.correct {
            self.line(format!("  {} Correct answer!", self.green.apply_to("✓")));
        } else {
            self.line(format!(
                "  {} Wrong answer! The correct one is: {}",
                self.red.apply_to("✗"),
                feedback.expected
            ));
        }
        self.line(format!("  {}", self.cyan.apply_to("Explanation")));
        self.line(format!("  {}", feedback.explanation));
    }

    pub fn completed(&self, summary: &Summary) {
        self.pb.finish_and_clear();
        self.line(String::new());
        self.line(format!(
            "{} Quiz finished! Correct answers: {}/{}",
            self.green.apply_to("🎯"),
            summary.score,
            summary.total
        ));
    }

    /// Gráfico de barras dos acertos por assunto. Nada é impresso sem dados.
    pub fn chart(&self, counts: &BTreeMap<String, usize>) {
        let rows = chart_rows(counts);
        if rows.is_empty() {
            return;
        }
        self.line(String::new());
        self.line(format!("{}", self.cyan.apply_to("Correct answers by subject")));
        for row in rows {
            self.line(format!("  {}", self.green.apply_to(row)));
        }
    }

    /// Imprime o relatório da sessão formatado em JSON.
    pub fn report(&self, report: &SessionReport) {
        self.line(String::new());
        self.line(format!("{}", self.dim.apply_to("─── Session Report ───")));
        self.line(serde_json::to_string_pretty(report).unwrap_or_default());
    }

    fn line(&self, text: String) {
        self.pb.suspend(|| println!("{text}"));
    }
}

/// Linhas do gráfico: assunto alinhado, barra proporcional ao maior valor e a contagem.
pub fn chart_rows(counts: &BTreeMap<String, usize>) -> Vec<String> {
    let Some(&max) = counts.values().max() else {
        return Vec::new();
    };
    let label_width = counts.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    counts
        .iter()
        .map(|(subject, &count)| {
            let width = (count * CHART_WIDTH).div_ceil(max.max(1));
            format!("{subject:<label_width$} │{} {count}", "█".repeat(width))
        })
        .collect()
}
