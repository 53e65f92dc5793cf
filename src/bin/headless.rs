//! Headless runner: line-delimited JSON control over stdin/stdout.
//!
//! ```text
//! echo '{"type":"command","seq":1,"actions":["hardDrop"]}' | blockfall-headless
//! ```

use std::io;

use anyhow::Result;
use log::info;

use blockfall::adapter::{run_session, Session};
use blockfall::config::RunConfig;
use blockfall::core::GameEngine;
use blockfall::logging;

fn main() -> Result<()> {
    logging::init_stderr()?;
    let config = RunConfig::from_env();
    info!("headless engine seeded with {}", config.seed);

    let mut session = Session::new(GameEngine::new(config.seed));
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut session, stdin.lock(), stdout.lock())?;
    Ok(())
}
