//! Line-oriented session: reads JSON messages, drives one engine, writes replies.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::core::{GameEngine, GameSnapshot};
use crate::protocol::{
    build_observation, create_error, extract_seq, parse_message, ErrorCode, OutboundMessage,
    ParsedMessage,
};
use crate::types::GameAction;

/// Upper bound on actions accepted in one command message.
pub const MAX_ACTIONS_PER_COMMAND: usize = 64;

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub accepted: u64,
    pub rejected: u64,
}

/// Protocol state for one client driving one engine.
#[derive(Debug)]
pub struct Session {
    engine: GameEngine,
    last_seq: Option<u64>,
    snapshot: GameSnapshot,
    stats: SessionStats,
}

impl Session {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            last_seq: None,
            snapshot: GameSnapshot::default(),
            stats: SessionStats::default(),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Handle one inbound line. Blank lines produce no reply.
    pub fn handle_line(&mut self, line: &str) -> Option<OutboundMessage> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let reply = match parse_message(trimmed) {
            Ok(msg) => self.handle_message(msg),
            Err(e) => Err((
                extract_seq(trimmed),
                ErrorCode::InvalidJson,
                format!("JSON parse error: {}", e),
            )),
        };

        Some(match reply {
            Ok(seq) => {
                self.stats.accepted += 1;
                self.engine.snapshot_into(&mut self.snapshot);
                OutboundMessage::Observation(build_observation(seq, &self.snapshot))
            }
            Err((seq, code, message)) => {
                self.stats.rejected += 1;
                debug!("rejected seq {}: {} ({})", seq, code.as_str(), message);
                OutboundMessage::Error(create_error(seq, code, &message))
            }
        })
    }

    fn handle_message(&mut self, msg: ParsedMessage) -> Result<u64, (u64, ErrorCode, String)> {
        let seq = msg.seq();
        if self.last_seq.is_some_and(|last| seq <= last) {
            return Err((
                seq,
                ErrorCode::StaleSeq,
                "seq must be strictly increasing".to_string(),
            ));
        }
        self.last_seq = Some(seq);

        match msg {
            ParsedMessage::Command(cmd) => {
                let actions = map_actions(&cmd.actions).map_err(|m| (seq, ErrorCode::InvalidCommand, m))?;
                for action in actions {
                    self.engine.apply_action(action);
                }
            }
            ParsedMessage::Advance(adv) => {
                if !adv.dt.is_finite() || adv.dt < 0.0 {
                    return Err((
                        seq,
                        ErrorCode::InvalidCommand,
                        format!("dt must be a non-negative number, got {}", adv.dt),
                    ));
                }
                self.engine.advance(adv.dt);
            }
            ParsedMessage::Observe(_) => {}
            ParsedMessage::Unknown(unknown) => {
                return Err((
                    seq,
                    ErrorCode::InvalidCommand,
                    format!("Unknown message type: {}", unknown.msg_type),
                ));
            }
        }
        Ok(seq)
    }
}

/// Validate a whole batch before any of it is applied.
fn map_actions(names: &[String]) -> Result<Vec<GameAction>, String> {
    if names.len() > MAX_ACTIONS_PER_COMMAND {
        return Err(format!(
            "Too many actions: {} (max {})",
            names.len(),
            MAX_ACTIONS_PER_COMMAND
        ));
    }
    names
        .iter()
        .map(|name| GameAction::from_str(name).ok_or_else(|| format!("Unknown action: {}", name)))
        .collect()
}

/// Run a session until the reader reaches EOF, writing one reply line per message.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    reader: R,
    mut writer: W,
) -> Result<SessionStats> {
    info!("headless session started");
    for line in reader.lines() {
        let line = line.context("reading request line")?;
        if let Some(reply) = session.handle_line(&line) {
            serde_json::to_writer(&mut writer, &reply).context("encoding reply")?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }
    let stats = session.stats();
    info!(
        "headless session ended: {} accepted, {} rejected, final score {}",
        stats.accepted,
        stats.rejected,
        session.engine().score()
    );
    Ok(stats)
}
