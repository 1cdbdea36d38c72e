//! Interactive and replay dialog loops.

mod commands;
mod engine;

pub use engine::DialogRepl;
