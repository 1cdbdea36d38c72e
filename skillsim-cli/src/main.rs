mod cli;
mod display;
mod repl;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::Args;
use repl::DialogRepl;
use skillsim_core::{
    ConversationController, ConversationSession, FileSessionIo, HttpSimulationClient,
    NoopSessionIo, ReplayScript, SessionIo, SimulationSession,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Err(message) = args.validate() {
        bail!(message);
    }

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    println!(
        "Simulating skill {} (stage: {}, locale: {})",
        args.skill_id, args.stage, args.locale
    );

    let client = Arc::new(HttpSimulationClient::new(
        &args.endpoint,
        &args.skill_id,
        &args.stage,
        &args.locale,
        &args.access_token,
    ));
    let io: Box<dyn SessionIo> = match &args.save_skill_io {
        Some(path) => Box::new(FileSessionIo::new(path)),
        None => Box::new(NoopSessionIo),
    };
    let simulation = SimulationSession::new(client, args.poll_config()).with_io(io);
    let session = ConversationSession::new(&args.skill_id, &args.locale, &args.stage);
    let mut repl = DialogRepl::new(ConversationController::new(session, simulation));

    match &args.replay {
        Some(path) => {
            let script = ReplayScript::load(path)
                .with_context(|| format!("Failed to load replay script {}", path.display()))?;
            log::info!(
                "replaying {} scripted utterances from {}",
                script.user_input.len(),
                path.display()
            );
            repl.run_replay(script).await
        }
        None => repl.run_interactive().await,
    }
}
