use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use weather_tweet_core::{Config, Pipeline};

use crate::{configure, server};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-tweet", version, about = "Post rainfall and weather for configured cities")]
pub struct Cli {
    /// Path to the TOML config; defaults to the platform config directory.
    #[arg(long, global = true, env = "WEATHER_TWEET_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one invocation and print the posting API's response.
    Run {
        /// Print the composed message instead of posting it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Serve an HTTP trigger; every request to `/` runs one invocation.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: SocketAddr,
    },

    /// Interactively write a config file.
    Configure,
}

impl Cli {
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_file_path(),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let path = self.config_path()?;

        match self.command {
            Command::Run { dry_run: true } => {
                let config = Config::load(&path)?;
                let message = Pipeline::from_config(&config)?
                    .compose(Local::now().naive_local())
                    .await
                    .context("Failed to compose message")?;
                print!("{message}");
            }
            Command::Run { dry_run: false } => {
                let response = weather_tweet_core::invoke(&path).await;
                println!("{}", response.body);
                if !response.is_success() {
                    anyhow::bail!("Invocation failed with status {}", response.status);
                }
            }
            Command::Serve { addr } => server::serve(addr, path).await?,
            Command::Configure => configure::run(&path)?,
        }

        Ok(())
    }
}
