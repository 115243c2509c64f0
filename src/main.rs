mod controller;
mod llm;
mod render;
mod story;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use controller::{Controller, UiState};
use llm::StoryClient;
use llm::config::LlmOverrides;
use story::TopicPair;

const SPINNER_INTERVAL_MS: u64 = 120;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("at most two topics are supported, got {0}")]
    TooManyTopics(usize),
    #[error("LLM configuration failed: {0}")]
    Config(#[from] llm::types::LlmError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON encode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Generation(String),
}

#[derive(Parser, Debug)]
#[command(name = "masal", about = "Turn one or two topics into a short fairy tale")]
struct Cli {
    /// Topic to build the tale around; pass up to twice. Omit for interactive mode.
    #[arg(long = "topic", short = 't')]
    topics: Vec<String>,

    /// Print the generated story as JSON instead of formatted text.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Story provider: gemini or anthropic.
    #[arg(long, env = "LLM_PROVIDER")]
    provider: Option<String>,

    /// Model name; provider default when absent.
    #[arg(long, env = "LLM_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.topics.len() > 2 {
        return Err(CliError::TooManyTopics(cli.topics.len()));
    }

    let overrides = LlmOverrides { provider: cli.provider.clone(), model: cli.model.clone() };
    let client = StoryClient::from_env(&overrides)?;
    tracing::info!(provider = client.provider().as_str(), model = client.model(), "story client initialized");

    let mut controller = Controller::new(Arc::new(client));

    if cli.topics.is_empty() {
        run_interactive(&mut controller).await
    } else {
        let first = cli.topics.first().cloned().unwrap_or_default();
        let second = cli.topics.get(1).cloned().unwrap_or_default();
        run_once(&mut controller, &first, &second, cli.json).await
    }
}

async fn run_once(controller: &mut Controller, first: &str, second: &str, json: bool) -> Result<(), CliError> {
    generate_with_spinner(controller, first, second).await;
    match controller.state() {
        UiState::Result { story } if json => println!("{}", serde_json::to_string_pretty(story)?),
        UiState::Result { story } => println!("{}", render::story_display(story)),
        UiState::Error { message } => return Err(CliError::Generation(message.clone())),
        UiState::Idle | UiState::Loading => {}
    }
    Ok(())
}

async fn run_interactive(controller: &mut Controller) -> Result<(), CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}\n", render::header());

    loop {
        let view = render::render_state(controller.state(), controller.topics(), 0);
        match controller.state() {
            UiState::Idle => {
                let previous = controller.topics().clone();
                println!("{view}");
                let Some(first) = prompt_line(&mut lines, "Konu 1: ").await? else { break };
                let Some(second) = prompt_line(&mut lines, "Konu 2: ").await? else { break };
                let topics = TopicPair::from_form(&previous, &first, &second);
                generate_with_spinner(controller, &topics.first, &topics.second).await;
            }
            UiState::Error { .. } => {
                println!("\n{view}");
                if prompt_line(&mut lines, "").await?.is_none() {
                    break;
                }
                controller.dismiss_error();
            }
            UiState::Result { .. } => {
                println!("\n{view}");
                match prompt_line(&mut lines, "").await? {
                    Some(choice) if !choice.trim().eq_ignore_ascii_case("q") => controller.reset(),
                    _ => break,
                }
            }
            UiState::Loading => unreachable!("generate settles before returning"),
        }
    }

    println!("\n{}", render::footer());
    Ok(())
}

/// Run `generate`, ticking a spinner on stderr until it settles.
async fn generate_with_spinner(controller: &mut Controller, first: &str, second: &str) {
    let mut ticker = tokio::time::interval(Duration::from_millis(SPINNER_INTERVAL_MS));
    let mut tick = 0usize;
    let mut spun = false;
    {
        let pending = controller.generate(first, second);
        tokio::pin!(pending);
        loop {
            tokio::select! {
                biased;
                _ = &mut pending => break,
                _ = ticker.tick() => {
                    eprint!("\r{}", render::spinner_frame(tick));
                    tick += 1;
                    spun = true;
                }
            }
        }
    }
    if spun {
        eprint!("\r\x1b[2K");
    }
}

/// Print `label` and read one line. `None` on end of input.
async fn prompt_line(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> Result<Option<String>, CliError> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?)
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
