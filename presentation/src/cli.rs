use crate::report::Reporter;
use anyhow::Context;
use application::rag_service::RagService;
use clap::Parser;
use colored::Colorize;
use domain::error::RagError;
use infrastructure::{
    completion::CompletionProvider,
    config::Config,
    embedder::EmbeddingProvider,
    input_loader::{InputLoader, DEFAULT_INPUT_FILE},
    ollama_client::OllamaClient,
    openrouter_client::OpenRouterClient,
};
use shared::telemetry::{progress, Telemetry};
use shared::types::Result;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "raguard", version)]
#[command(about = "Answer a question from supplied documents, then flag unsupported claims in the answer")]
pub struct Cli {
    /// JSON file with a "question" string and a non-empty "documents" list
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,
}

pub struct CliApp;

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        // The key is checked before the input is even read.
        let config = Config::load()?;
        let embeddings = OllamaClient::new(&config)
            .map_err(|e| RagError::Configuration(format!("{e:#}")))?;
        let completion = OpenRouterClient::new(&config)
            .map_err(|e| RagError::Configuration(format!("{e:#}")))?;
        progress(&format!(
            "Using {} for embeddings, {} for answers",
            embeddings.model(),
            completion.model()
        ));

        let stdout = io::stdout();
        let mut out = stdout.lock();
        answer_file(&cli.input, &embeddings, &completion, &Reporter::new(true), &mut out).await
    }

    /// One-line diagnostic on stderr, plus a usage hint for file problems.
    pub fn report_error(&self, err: &anyhow::Error) {
        match err.downcast_ref::<RagError>() {
            Some(rag_err) => {
                eprintln!("{}", rag_err.to_string().red());
                if rag_err.is_input_error() {
                    eprintln!("Usage: raguard <input.json>");
                }
            }
            None => eprintln!("{}", format!("Error: {err:#}").red()),
        }
    }
}

/// Load the input, run the pipeline, and write the report to `out`.
pub async fn answer_file<W: Write>(
    input: &Path,
    embeddings: &dyn EmbeddingProvider,
    completion: &dyn CompletionProvider,
    reporter: &Reporter,
    out: &mut W,
) -> Result<()> {
    let telemetry = Telemetry::new();
    let query = InputLoader::load(input)?;
    progress(&format!(
        "Loaded {} documents from {}",
        query.documents.len(),
        input.display()
    ));

    let outcome = RagService::new(embeddings, completion).run(&query).await?;
    reporter
        .report(out, &outcome.answer, &outcome.verdict)
        .context("failed to write report")?;
    telemetry.finish("Done");
    Ok(())
}
