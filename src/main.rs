//! Vibecode CLI entry point.
//!
//! Inspects how streamed responses are segmented and replays view events
//! against the navigation state machine.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use vibecode::infra::app_config::{self, AppConfig};
use vibecode::parser::{StreamingBuffer, parse_content, parse_dependencies};
use vibecode::view::{ViewController, ViewHost, ViewInputs, ViewType};

#[derive(Parser, Debug)]
#[command(name = "vibecode")]
#[command(version)]
#[command(about = "Streaming segment parser and view-state tools", long_about = None)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a response into markdown and code segments
    Parse {
        /// Response file, or `-` for stdin
        input: String,
        /// Re-parse after every N bytes, as if the response were streaming
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        chunk: Option<u64>,
    },

    /// Print the dependency manifest of a response
    Deps {
        /// Response file, or `-` for stdin
        input: String,
    },

    /// Feed a JSON-lines event script through the view controller
    Replay {
        /// Script file, or `-` for stdin
        script: String,
    },

    /// Write the effective config to the config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// One line of a replay script.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
enum ReplayEvent {
    Inputs(ViewInputs),
    Url { path: String },
    Viewport { width: u32 },
    Select { view: ViewType },
    Back,
    Iframe { message: serde_json::Value },
    /// Let scheduled navigations come due.
    Wait { ms: u64 },
}

/// In-memory router that records history and reports each route change back.
#[derive(Default)]
struct ReplayRouter {
    history: Vec<String>,
    changed: Option<String>,
}

impl ViewHost for ReplayRouter {
    fn navigate(&mut self, path: &str) {
        println!("navigate {path}");
        self.history.push(path.to_string());
        self.changed = Some(path.to_string());
    }

    fn go_back(&mut self) {
        println!("back");
        if self.history.len() > 1 {
            self.history.pop();
        }
        self.changed = self.history.last().cloned();
    }

    fn preview_loaded(&mut self) {
        println!("preview-loaded");
    }

    fn screenshot_captured(&mut self, data: &str) {
        println!("screenshot {} bytes", data.len());
    }

    fn screenshot_failed(&mut self, error: &str) {
        println!("screenshot-error {error}");
    }

    fn iframe_failed(&mut self, error: &str) {
        println!("iframe-error {error}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(app_config::config_path);
    let config = app_config::load_config_from(&config_path);

    match args.command {
        Commands::Parse { input, chunk } => {
            let text = read_input(&input)?;
            parse(&text, chunk.map(|size| size as usize))
        }
        Commands::Deps { input } => {
            let text = read_input(&input)?;
            let parsed = parse_content(&text);
            let deps = parse_dependencies(parsed.dependencies_string.as_deref());
            println!("{}", serde_json::to_string_pretty(&deps)?);
            Ok(())
        }
        Commands::Replay { script } => {
            let text = read_input(&script)?;
            replay(&text, config).await
        }
        Commands::InitConfig { force } => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "{} already exists, pass --force to overwrite",
                    config_path.display()
                );
            }
            app_config::save_config_to(&config_path, &config)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(Path::new(input)).with_context(|| format!("Failed to read {input}"))
}

fn parse(text: &str, chunk: Option<usize>) -> Result<()> {
    let Some(size) = chunk else {
        println!("{}", serde_json::to_string_pretty(&parse_content(text))?);
        return Ok(());
    };

    let mut buffer = StreamingBuffer::new();
    for piece in split_chunks(text, size) {
        let result = buffer.push_chunk(piece);
        println!("{}", serde_json::to_string(result)?);
    }
    Ok(())
}

/// Fixed-size byte chunks, widened to the next char boundary.
fn split_chunks(text: &str, size: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let mut end = (start + size).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&text[start..end]);
        start = end;
    }
    chunks
}

async fn replay(script: &str, config: AppConfig) -> Result<()> {
    let mut controller = ViewController::new(config.view, "/", ReplayRouter::default());

    for (index, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: ReplayEvent = serde_json::from_str(line)
            .with_context(|| format!("Invalid event on line {}", index + 1))?;

        match event {
            ReplayEvent::Inputs(inputs) => controller.update_inputs(inputs),
            ReplayEvent::Url { path } => {
                controller.host_mut().history.push(path.clone());
                controller.url_changed(path);
            }
            ReplayEvent::Viewport { width } => controller.viewport_resized(width),
            ReplayEvent::Select { view } => controller.select_view(view),
            ReplayEvent::Back => controller.back(),
            ReplayEvent::Iframe { message } => {
                // Undecodable messages are logged by the controller and skipped.
                let _ = controller.receive_iframe_message(&message.to_string());
            }
            ReplayEvent::Wait { ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
                controller.poll_actions();
            }
        }

        while let Some(path) = controller.host_mut().changed.take() {
            controller.url_changed(path);
        }
    }

    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_chunks_respects_char_boundaries() {
        assert_eq!(split_chunks("abcde", 2), vec!["ab", "cd", "e"]);
        assert_eq!(split_chunks("aé b", 2), vec!["aé", " b"]);
        assert!(split_chunks("", 3).is_empty());
    }

    #[test]
    fn test_replay_event_lines() {
        let event: ReplayEvent = serde_json::from_str(
            r#"{"event":"inputs","sessionId":"S","title":"T","isStreaming":true}"#,
        )
        .unwrap();
        assert!(matches!(
            event,
            ReplayEvent::Inputs(ViewInputs { is_streaming: true, code_length: 0, .. })
        ));

        let event: ReplayEvent =
            serde_json::from_str(r#"{"event":"select","view":"data"}"#).unwrap();
        assert!(matches!(event, ReplayEvent::Select { view: ViewType::Data }));
    }
}
