//! Command-line argument parsing.

use clap::Parser;
use skillsim_core::{PollConfig, DEFAULT_ENDPOINT};
use std::path::PathBuf;
use std::time::Duration;

/// Simulate spoken conversations with a voice skill from your terminal
#[derive(Parser, Debug)]
#[command(name = "skillsim")]
#[command(about = "Hold a simulated multi-turn dialog with a voice skill", long_about = None)]
#[command(version)]
pub struct Args {
    /// Id of the skill to converse with
    #[arg(long)]
    pub skill_id: String,

    /// Locale of the simulated device
    #[arg(long, default_value = "en-US")]
    pub locale: String,

    /// Skill stage to simulate against
    #[arg(long, default_value = "development")]
    pub stage: String,

    /// Replay a pre-recorded conversation script instead of typing live
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Write the full request/response transcript to this file on quit
    #[arg(long)]
    pub save_skill_io: Option<PathBuf>,

    /// Base URL of the simulation service
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Access token for the simulation service
    #[arg(long, env = "SKILLSIM_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Maximum number of poll attempts per turn
    #[arg(long, default_value = "30")]
    pub poll_max_retries: u32,

    /// Delay before the first poll attempt, in milliseconds
    #[arg(long, default_value = "2000")]
    pub poll_base_delay_ms: u64,

    /// Backoff multiplier applied between poll attempts
    #[arg(long, default_value = "1.2")]
    pub poll_backoff_factor: f64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Validate argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_max_retries == 0 {
            return Err("--poll-max-retries must be at least 1".to_string());
        }
        if self.poll_backoff_factor <= 0.0 {
            return Err("--poll-backoff-factor must be greater than 0".to_string());
        }
        if let Some(replay) = &self.replay {
            if !replay.exists() {
                return Err(format!("replay script {} does not exist", replay.display()));
            }
        }
        Ok(())
    }

    /// Build the poll configuration from CLI arguments.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig::default()
            .with_base(Duration::from_millis(self.poll_base_delay_ms))
            .with_factor(self.poll_backoff_factor)
            .with_max_retry(self.poll_max_retries)
    }
}
