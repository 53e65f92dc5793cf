//! Adapter module - headless control over line-delimited JSON
//!
//! Lets an external program (a bot, a replay tool, a test harness) drive one
//! [`GameEngine`](blockfall_core::GameEngine) through any reader/writer pair,
//! typically stdin/stdout.
//!
//! # Message Types
//!
//! ## Client → Engine
//!
//! - **command**: apply a list of actions in order (`moveLeft`, `moveRight`,
//!   `softDrop`, `rotate`, `hardDrop`, `restart`)
//! - **advance**: drive gravity by `dt` seconds
//! - **observe**: request the current state
//!
//! ## Engine → Client
//!
//! - **observation**: full state, sent after every accepted message
//! - **error**: `invalid_json`, `invalid_command`, or `stale_seq`
//!
//! `seq` must strictly increase across a session. A command whose action list
//! contains an unknown action is rejected as a whole.
//!
//! # Example Protocol Flow
//!
//! ```text
//! -> {"type":"command","seq":1,"actions":["moveLeft","rotate","hardDrop"]}
//! <- {"type":"observation","seq":1,"board":{...},"current":{...},"next":{...},"score":0,"lines":0,"phase":"running","game_over":false}
//! -> {"type":"advance","seq":2,"dt":0.5}
//! <- {"type":"observation","seq":2,...}
//! -> {"type":"observe","seq":2}
//! <- {"type":"error","seq":2,"code":"stale_seq","message":"seq must be strictly increasing"}
//! ```

pub mod protocol;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use protocol::{parse_message, ErrorCode, ObservationMessage, OutboundMessage, ParsedMessage};
pub use session::{run_session, Session, SessionStats};
