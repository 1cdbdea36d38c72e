//! Conversation engine for simulating multi-turn dialogs with a voice
//! skill.
//!
//! The engine turns one line of typed (or scripted) text into an
//! asynchronous simulate-and-poll cycle against a remote simulation
//! service, tracks session continuity across turns, and classifies each
//! turn's outcome.
//!
//! Composition, leaf to root:
//!
//! - [`retry::poll`]: bounded exponential-backoff retry loop around an
//!   asynchronous operation, parameterized by a continuation predicate.
//! - [`SimulationSession`]: one submit-then-poll exchange.
//! - [`ConversationController`]: cross-turn state (new vs. continuing
//!   session, utterance cache), one [`SimulationSession`] per turn,
//!   caption extraction.
//!
//! The REPL and its mode drivers live in the companion CLI crate.
//!
//! # Example
//!
//! ```no_run
//! use skillsim_core::{
//!     ConversationController, ConversationSession, HttpSimulationClient, PollConfig,
//!     SilentObserver, SimulationSession,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), skillsim_core::SimulationError> {
//! let client = Arc::new(HttpSimulationClient::new(
//!     skillsim_core::DEFAULT_ENDPOINT,
//!     "my-skill-id",
//!     "development",
//!     "en-US",
//!     "access-token",
//! ));
//! let simulation = SimulationSession::new(client, PollConfig::default());
//! let session = ConversationSession::new("my-skill-id", "en-US", "development");
//! let mut controller = ConversationController::new(session, simulation);
//!
//! let captions = controller
//!     .evaluate_utterance("open my skill", &mut SilentObserver)
//!     .await?;
//! for caption in captions {
//!     println!("{caption}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod mock;
pub mod replay;
pub mod retry;
pub mod session;
pub mod simulation;
pub mod skill_io;

pub use client::{HttpSimulationClient, SimulationClient, DEFAULT_ENDPOINT};
pub use config::PollConfig;
pub use controller::{ConversationController, ConversationSession, SilentObserver, TurnObserver};
pub use error::{ReplayError, SimulationError};
pub use replay::{ReplayScript, QUIT_SENTINEL};
pub use session::SimulationSession;
pub use simulation::{SimulationJob, SimulationResult, SimulationStatus};
pub use skill_io::{FileSessionIo, NoopSessionIo, SessionIo};
