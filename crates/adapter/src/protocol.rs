//! Protocol module - JSON message types for the headless adapter
//!
//! One JSON object per line. Every message carries `type` and `seq`.

use serde::{Deserialize, Serialize};

use crate::core::{GameSnapshot, PieceSnapshot, Shape};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

// ============== Client -> Engine Messages ==============

/// Apply a batch of actions, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandMessage {
    pub seq: u64,
    pub actions: Vec<String>,
}

/// Drive gravity by `dt` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvanceMessage {
    pub seq: u64,
    pub dt: f64,
}

/// Request an observation without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserveMessage {
    pub seq: u64,
}

/// Parsed incoming message
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedMessage {
    Command(CommandMessage),
    Advance(AdvanceMessage),
    Observe(ObserveMessage),
    Unknown(UnknownMessage),
}

impl ParsedMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ParsedMessage::Command(m) => m.seq,
            ParsedMessage::Advance(m) => m.seq,
            ParsedMessage::Observe(m) => m.seq,
            ParsedMessage::Unknown(m) => m.seq,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
    pub msg_type: String,
}

/// Parse one inbound line.
///
/// A well-formed object with an unrecognized `type` is not a parse error; it
/// comes back as [`ParsedMessage::Unknown`].
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "command")]
        Command(CommandMessage),
        #[serde(rename = "advance")]
        Advance(AdvanceMessage),
        #[serde(rename = "observe")]
        Observe(ObserveMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Ok(InboundMessage::Advance(m)) => Ok(ParsedMessage::Advance(m)),
        Ok(InboundMessage::Observe(m)) => Ok(ParsedMessage::Observe(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct Header {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let header = serde_json::from_str::<Header>(json)?;
            match header.msg_type {
                Some(t) if !matches!(t.as_str(), "command" | "advance" | "observe") => {
                    Ok(ParsedMessage::Unknown(UnknownMessage {
                        seq: header.seq.unwrap_or(0),
                        msg_type: t,
                    }))
                }
                _ => Err(e),
            }
        }
    }
}

/// Best-effort `seq` lookup for lines that failed to parse as a message.
pub fn extract_seq(json: &str) -> u64 {
    serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .and_then(|v| v.get("seq").and_then(|s| s.as_u64()))
        .unwrap_or(0)
}

// ============== Engine -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Line is not JSON, or a known message is missing fields.
    #[serde(rename = "invalid_json")]
    InvalidJson,
    /// Unknown message type, unknown action, or out-of-range argument.
    #[serde(rename = "invalid_command")]
    InvalidCommand,
    /// `seq` did not increase.
    #[serde(rename = "stale_seq")]
    StaleSeq,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidCommand => "invalid_command",
            ErrorCode::StaleSeq => "stale_seq",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Piece kind on the wire: single lowercase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindTag(pub PieceKind);

impl Serialize for KindTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for KindTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PieceKind::from_str(&s)
            .map(KindTag)
            .ok_or_else(|| serde::de::Error::custom("invalid piece kind"))
    }
}

/// Engine phase on the wire: `running` or `game_over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseTag(pub Phase);

impl Serialize for PhaseTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for PhaseTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "running" => Ok(PhaseTag(Phase::Running)),
            "game_over" => Ok(PhaseTag(Phase::GameOver)),
            _ => Err(serde::de::Error::custom("invalid phase")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major, 0 = empty, 1..=7 = palette index
    pub cells: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPiece {
    pub kind: KindTag,
    /// Rows of 0/1 flags
    pub shape: Vec<Vec<u8>>,
    pub x: i8,
    pub y: i8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPiece {
    pub kind: KindTag,
    pub shape: Vec<Vec<u8>>,
}

/// Full engine state, sent after every accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub board: BoardSnapshot,
    pub current: CurrentPiece,
    pub next: NextPiece,
    pub score: u32,
    pub lines: u32,
    pub phase: PhaseTag,
    #[serde(rename = "game_over")]
    pub game_over: bool,
}

/// Any reply the session writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Observation(ObservationMessage),
    Error(ErrorMessage),
}

// ============== Utility Functions ==============

fn shape_rows(shape: &Shape) -> Vec<Vec<u8>> {
    (0..shape.rows() as usize)
        .map(|r| {
            (0..shape.cols() as usize)
                .map(|c| shape.get(r, c) as u8)
                .collect()
        })
        .collect()
}

fn current_piece(piece: &PieceSnapshot) -> CurrentPiece {
    CurrentPiece {
        kind: KindTag(piece.kind),
        shape: shape_rows(&piece.shape),
        x: piece.x,
        y: piece.y,
    }
}

/// Build an observation from an engine snapshot.
pub fn build_observation(seq: u64, snap: &GameSnapshot) -> ObservationMessage {
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        board: BoardSnapshot {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: snap.board,
        },
        current: current_piece(&snap.current),
        next: NextPiece {
            kind: KindTag(snap.next.kind),
            shape: shape_rows(&snap.next.shape),
        },
        score: snap.score,
        lines: snap.lines,
        phase: PhaseTag(snap.phase),
        game_over: snap.game_over(),
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        code,
        message: message.to_string(),
    }
}
