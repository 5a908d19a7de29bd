//! Configuração do simulado carregada a partir de `simulado.toml`.
//!
//! A struct [`SimuladoConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `SIMULADO_QUESTIONS` tem precedência sobre o arquivo
//! para o caminho das perguntas.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Nome do arquivo de configuração procurado no diretório atual.
pub const CONFIG_FILE: &str = "simulado.toml";

/// Configuração de nível superior carregada de `simulado.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SimuladoConfig {
    /// Caminho do CSV de perguntas.
    #[serde(default = "default_questions_path")]
    pub questions_path: PathBuf,

    /// Nome usado quando o usuário não digita nenhum.
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Separador de colunas do CSV.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Exibe o gráfico de acertos por assunto ao final.
    #[serde(default = "default_show_chart")]
    pub show_chart: bool,
}

// Valor padrão para o arquivo de perguntas: "perguntas.csv".
fn default_questions_path() -> PathBuf {
    PathBuf::from("perguntas.csv")
}

// Valor padrão para o usuário: "Guest".
fn default_user() -> String {
    "Guest".to_string()
}

fn default_delimiter() -> char {
    ','
}

fn default_show_chart() -> bool {
    true
}

impl Default for SimuladoConfig {
    fn default() -> Self {
        Self {
            questions_path: default_questions_path(),
            default_user: default_user(),
            delimiter: default_delimiter(),
            show_chart: default_show_chart(),
        }
    }
}

impl SimuladoConfig {
    /// Carrega a configuração de `simulado.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE), false)
    }

    /// Carrega a configuração de um caminho explícito.
    ///
    /// Com `required`, a ausência do arquivo é erro; sem ele, cai nos defaults.
    pub fn load_from(path: &Path, required: bool) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<SimuladoConfig>(&contents)
                .with_context(|| format!("invalid config in {}", path.display()))?
        } else if required {
            bail!("config file not found: {}", path.display());
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo para o CSV de perguntas.
        if let Ok(questions) = std::env::var("SIMULADO_QUESTIONS")
            && !questions.is_empty()
        {
            config.questions_path = PathBuf::from(questions);
        }

        config.validate()?;
        Ok(config)
    }

    /// O leitor de CSV só aceita separadores de um byte.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("delimiter must be a single ASCII character, got {:?}", self.delimiter))
    }

    fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = SimuladoConfig::default();
        assert_eq!(config.questions_path, PathBuf::from("perguntas.csv"));
        assert_eq!(config.default_user, "Guest");
        assert_eq!(config.delimiter, ',');
        assert!(config.show_chart);
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            default_user = "Convidado"
            delimiter = ";"
        "#;
        let config: SimuladoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_user, "Convidado");
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        assert!(config.show_chart);
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let config = SimuladoConfig {
            delimiter: '§',
            ..Default::default()
        };
        assert!(config.delimiter_byte().is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simulado.toml");
        std::fs::write(&path, "show_chart = false\n").unwrap();
        let config = SimuladoConfig::load_from(&path, true).unwrap();
        assert!(!config.show_chart);
        assert_eq!(config.default_user, "Guest");
    }

    #[test]
    fn required_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let result = SimuladoConfig::load_from(&dir.path().join("missing.toml"), true);
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimuladoConfig::load_from(&dir.path().join("missing.toml"), false).unwrap();
        assert!(config.show_chart);
    }
}
