//! Carregamento das perguntas a partir de um arquivo CSV.
//!
//! O [`CsvQuestionStore`] lê o arquivo uma única vez por sessão, confere se
//! todas as colunas obrigatórias existem e converte cada linha em uma
//! [`Question`]. Qualquer falha vira um [`DataLoadError`] e o simulado não
//! começa.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use super::model::{DEFAULT_DIFFICULTY, DEFAULT_SUBJECT, OptionLabel, Question};
use crate::error::DataLoadError;

/// Colunas que todo arquivo de perguntas precisa ter.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "pergunta",
    "opcao_a",
    "opcao_b",
    "opcao_c",
    "opcao_d",
    "resposta_correta",
    "explicacao",
    "assunto",
];

/// Anything that can hand the session a fresh list of questions.
pub trait QuestionSource {
    fn load(&self) -> Result<Vec<Question>, DataLoadError>;
}

/// Linha crua do CSV, antes da validação.
#[derive(Debug, Deserialize)]
struct QuestionRow {
    pergunta: String,
    opcao_a: String,
    opcao_b: String,
    opcao_c: String,
    opcao_d: String,
    resposta_correta: String,
    explicacao: String,
    #[serde(default)]
    assunto: Option<String>,
    #[serde(default)]
    dificuldade: Option<String>,
}

impl QuestionRow {
    fn into_question(self, line: u64) -> Result<Question, DataLoadError> {
        let correct = self
            .resposta_correta
            .parse::<OptionLabel>()
            .map_err(|_| DataLoadError::InvalidAnswer {
                line,
                value: self.resposta_correta.clone(),
            })?;

        Ok(Question {
            text: self.pergunta,
            options: [self.opcao_a, self.opcao_b, self.opcao_c, self.opcao_d],
            correct,
            explanation: self.explicacao,
            subject: non_blank_or(self.assunto, DEFAULT_SUBJECT),
            difficulty: non_blank_or(self.dificuldade, DEFAULT_DIFFICULTY),
        })
    }
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Question store backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvQuestionStore {
    path: PathBuf,
    delimiter: u8,
}

impl CsvQuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse questions from any reader. The first record must be the header.
    pub fn parse<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Question>, DataLoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns(missing));
        }

        let mut questions = Vec::new();
        for record in rdr.records() {
            let record = record?;
            // Line where the record starts; quoted cells may span several lines.
            let line = record.position().map_or(0, |p| p.line());
            let row: QuestionRow = record.deserialize(Some(&headers))?;
            let question = row.into_question(line)?;
            debug!(line, subject = %question.subject, "parsed question");
            questions.push(question);
        }

        if questions.is_empty() {
            return Err(DataLoadError::Empty);
        }
        Ok(questions)
    }
}

impl QuestionSource for CsvQuestionStore {
    fn load(&self) -> Result<Vec<Question>, DataLoadError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DataLoadError::NotFound(self.path.clone()),
            _ => DataLoadError::Unreadable {
                path: self.path.clone(),
                source: e,
            },
        })?;

        let questions = Self::parse(file, self.delimiter)?;
        info!(path = %self.path.display(), count = questions.len(), "questions loaded");
        Ok(questions)
    }
}

/// Fixed question list held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    questions: Vec<Question>,
}

impl InMemorySource {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl QuestionSource for InMemorySource {
    fn load(&self) -> Result<Vec<Question>, DataLoadError> {
        if self.questions.is_empty() {
            return Err(DataLoadError::Empty);
        }
        Ok(self.questions.clone())
    }
}
