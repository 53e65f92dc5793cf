use blockfall::adapter::protocol::ObservationMessage;
use blockfall::adapter::{run_session, ErrorCode, OutboundMessage, Session};
use blockfall::core::{GameEngine, SequenceSource};
use blockfall::types::{Phase, PieceKind};

fn run(kinds: &[PieceKind], input: &str) -> Vec<serde_json::Value> {
    let engine = GameEngine::with_source(Box::new(SequenceSource::new(kinds.to_vec())));
    let mut session = Session::new(engine);
    let mut out = Vec::new();
    run_session(&mut session, input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn session_reports_line_clear_through_observation() {
    let mut lines = String::new();
    // Horizontal I pieces at x=0 and x=4, then an O at x=8 completes the bottom row.
    lines.push_str(r#"{"type":"command","seq":1,"actions":["moveLeft","moveLeft","moveLeft","hardDrop"]}"#);
    lines.push('\n');
    lines.push_str(r#"{"type":"command","seq":2,"actions":["moveRight","hardDrop"]}"#);
    lines.push('\n');
    lines.push_str(r#"{"type":"command","seq":3,"actions":["moveRight","moveRight","moveRight","moveRight","hardDrop"]}"#);
    lines.push('\n');

    let replies = run(&[PieceKind::I, PieceKind::I, PieceKind::O], &lines);
    assert_eq!(replies.len(), 3);
    let last = &replies[2];
    assert_eq!(last["type"], "observation");
    assert_eq!(last["lines"], 1);
    assert_eq!(last["score"], 100);
    // Only the top half of the O survives, sunk to the bottom row.
    let bottom = last["board"]["cells"][19].as_array().unwrap();
    let filled: Vec<u64> = bottom.iter().map(|v| v.as_u64().unwrap()).collect();
    assert_eq!(filled, vec![0, 0, 0, 0, 0, 0, 0, 0, 2, 2]);
}

#[test]
fn session_rejects_stale_and_malformed_messages() {
    let input = concat!(
        r#"{"type":"observe","seq":10}"#,
        "\n",
        r#"{"type":"observe","seq":10}"#,
        "\n",
        "[1,2,3]\n",
        r#"{"type":"command","seq":11,"actions":["teleport"]}"#,
        "\n",
        r#"{"type":"advance","seq":12,"dt":1.0}"#,
        "\n",
    );
    let replies = run(&[PieceKind::T], input);
    let kinds: Vec<&str> = replies
        .iter()
        .map(|r| r["code"].as_str().unwrap_or("observation"))
        .collect();
    assert_eq!(
        kinds,
        vec!["observation", "stale_seq", "invalid_json", "invalid_command", "observation"]
    );
    assert_eq!(replies[4]["current"]["y"], 2);
}

#[test]
fn session_handles_restart_after_game_over() {
    let mut session = Session::new(GameEngine::with_source(Box::new(SequenceSource::repeat(
        PieceKind::O,
    ))));
    let mut seq = 0;
    let mut last = None;
    while seq < 20 {
        seq += 1;
        last = session.handle_line(&format!(
            r#"{{"type":"command","seq":{},"actions":["hardDrop"]}}"#,
            seq
        ));
        if session.engine().is_game_over() {
            break;
        }
    }
    match last {
        Some(OutboundMessage::Observation(ObservationMessage { phase, game_over, .. })) => {
            assert_eq!(phase.0, Phase::GameOver);
            assert!(game_over);
        }
        other => panic!("expected observation, got {:?}", other),
    }

    match session.handle_line(&format!(
        r#"{{"type":"command","seq":{},"actions":["restart"]}}"#,
        seq + 1
    )) {
        Some(OutboundMessage::Observation(obs)) => {
            assert_eq!(obs.phase.0, Phase::Running);
            assert_eq!(obs.score, 0);
            assert!(obs.board.cells.iter().flatten().all(|&c| c == 0));
        }
        other => panic!("expected observation, got {:?}", other),
    }

    match session.handle_line(r#"{"type":"observe","seq":1}"#) {
        Some(OutboundMessage::Error(err)) => assert_eq!(err.code, ErrorCode::StaleSeq),
        other => panic!("expected error, got {:?}", other),
    }
}
