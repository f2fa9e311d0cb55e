//! Command handlers: the chat REPL and thread/profile management.

use std::io::{BufRead, Write as _};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{Local, TimeZone};
use colored::Colorize;
use haven_ai::OpenAIClient;
use haven_core::memory::ASSISTANT_LABEL;
use haven_core::{ChatEngine, CoreConfig, CoreError, Storage, paths};
use haven_storage::RedbBackend;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cli::{Cli, ProfileCommands, ThreadCommands};
use crate::config::CliConfig;

/// Fallback line shown when the model call fails. Never persisted as a
/// conversation turn.
const UPSTREAM_FALLBACK: &str = "Oops, something went wrong. Try again?";

pub struct AppContext {
    storage: Storage,
    core_config: CoreConfig,
    cli_config: CliConfig,
}

impl AppContext {
    pub fn prepare(cli: &Cli, config: &CliConfig) -> Result<Self> {
        let db_path = match cli.db_path.clone().or_else(|| config.default.db_path.clone()) {
            Some(path) => path.into(),
            None => paths::ensure_database_path()?,
        };
        let backend = RedbBackend::open(&db_path)
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

        let mut core_config = CoreConfig::default();
        if let Some(model) = &config.default.model {
            core_config.model = model.clone();
        }
        if let Some(temperature) = config.default.temperature {
            core_config.temperature = temperature;
        }

        let storage = Storage::new(Arc::new(backend), &core_config);
        Ok(Self {
            storage,
            core_config,
            cli_config: config.clone(),
        })
    }

    /// Interactive chat loop. Ctrl-C cancels an in-flight send without
    /// writing anything; a blank line or "/quit" exits.
    pub async fn chat(&self, thread: Option<String>) -> Result<()> {
        let thread = match thread {
            Some(id) => {
                let all = self.storage.threads.list().await;
                all.into_iter()
                    .find(|t| t.id == id)
                    .ok_or_else(|| anyhow::anyhow!("Thread not found: {id}"))?
            }
            None => self.storage.threads.ensure_default().await?,
        };

        let api_key = self
            .cli_config
            .openai_api_key()
            .context("OpenAI API key not found")?;
        let llm = OpenAIClient::new(api_key)?.with_model(self.core_config.model.as_str());
        let engine = ChatEngine::new(
            self.storage.clone(),
            Arc::new(llm),
            self.core_config.clone(),
        )?;

        println!(
            "{} {} {}",
            "Chatting in".dimmed(),
            thread.name.bold(),
            format!("({})", thread.id).dimmed()
        );
        println!("{}", "Type a message, or /quit to leave.".dimmed());

        let stdin = std::io::stdin();
        loop {
            print!("{} ", ">".cyan().bold());
            std::io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let query = line.trim();
            if query.is_empty() || query == "/quit" {
                break;
            }

            let cancel = CancellationToken::new();
            let reply = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    cancel.cancel();
                    println!("{}", "(cancelled)".dimmed());
                    continue;
                }
                result = engine.send(&thread.id, query, &cancel) => result,
            };

            match reply {
                Ok(text) => println!("{} {text}", format!("{ASSISTANT_LABEL}:").green().bold()),
                Err(CoreError::Upstream(err)) => {
                    warn!(error = %err, "completion failed");
                    println!("{} {UPSTREAM_FALLBACK}", format!("{ASSISTANT_LABEL}:").yellow());
                }
                Err(CoreError::Cancelled) => println!("{}", "(cancelled)".dimmed()),
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    pub async fn thread(&self, command: ThreadCommands) -> Result<()> {
        match command {
            ThreadCommands::List => {
                let mut all = self.storage.threads.list().await;
                all.sort_by(|a, b| b.created.cmp(&a.created));
                if all.is_empty() {
                    println!("{}", "No threads yet.".dimmed());
                    return Ok(());
                }
                for t in all {
                    let created = Local
                        .timestamp_millis_opt(t.created)
                        .single()
                        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    println!("{}  {}  {}", t.id.dimmed(), t.name.bold(), created.dimmed());
                }
            }
            ThreadCommands::New { name } => {
                let t = self.storage.threads.create(name).await?;
                println!("Created thread {} ({})", t.name.bold(), t.id.dimmed());
            }
            ThreadCommands::Rename { id, name } => {
                self.storage.threads.rename(&id, &name).await?;
                println!("Renamed {id}");
            }
            ThreadCommands::Delete { id } => {
                self.storage.threads.delete(&id).await?;
                println!("Deleted {id} and its history");
            }
        }
        Ok(())
    }

    pub async fn profile(&self, command: ProfileCommands) -> Result<()> {
        match command {
            ProfileCommands::Show => {
                let profile = self.storage.profile.load_or_default().await;
                println!("{}      {}", "name:".dimmed(), profile.name);
                println!("{}  {}", "pronouns:".dimmed(), profile.pronouns);
                println!("{}     {}", "style:".dimmed(), profile.style);
                println!("{}", "core facts:".dimmed());
                for fact in &profile.core_facts {
                    println!("  {}. {}", fact.id, fact.text);
                }
            }
            ProfileCommands::Set {
                name,
                pronouns,
                style,
            } => {
                if name.is_none() && pronouns.is_none() && style.is_none() {
                    bail!("Nothing to update: pass --name, --pronouns or --style");
                }
                let mut profile = self.storage.profile.load_or_default().await;
                if let Some(name) = name {
                    profile.name = name;
                }
                if let Some(pronouns) = pronouns {
                    profile.pronouns = pronouns;
                }
                if let Some(style) = style {
                    profile.style = style.parse()?;
                }
                self.storage.profile.save(&profile).await?;
                println!("Profile updated");
            }
            ProfileCommands::AddFact { text } => {
                let mut profile = self.storage.profile.load_or_default().await;
                let id = profile.next_fact_id();
                profile
                    .core_facts
                    .push(haven_core::CoreFact { id, text });
                self.storage.profile.save(&profile).await?;
                println!("Added fact {id}");
            }
            ProfileCommands::ClearFacts => {
                let mut profile = self.storage.profile.load_or_default().await;
                profile.core_facts.clear();
                self.storage.profile.save(&profile).await?;
                println!("Cleared core facts");
            }
        }
        Ok(())
    }
}
