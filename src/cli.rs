//! Interface de linha de comando do simulado baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (start, validate, demo)
//! e flags globais (--questions, --config, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Simulador de concurso com perguntas de múltipla escolha no terminal.
#[derive(Debug, Parser)]
#[command(name = "simulado", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Arquivo CSV de perguntas (sobrepõe a configuração).
    #[arg(long, global = true)]
    pub questions: Option<PathBuf>,

    /// Caminho do arquivo de configuração (padrão: ./simulado.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inicia um simulado interativo.
    Start {
        /// Nome do usuário; pula a tela de login.
        #[arg(long)]
        name: Option<String>,

        /// Semente para embaralhar as perguntas de forma reprodutível.
        #[arg(long)]
        seed: Option<u64>,

        /// Grava o relatório da sessão em JSON neste caminho.
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Carrega o arquivo de perguntas e mostra quantas existem por assunto.
    Validate,

    /// Executa a demonstração embutida com duas perguntas.
    Demo,
}
