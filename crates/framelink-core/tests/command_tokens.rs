//! Control token tests: client encoding against the server's exact-match decode.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde::Deserialize;

use framelink_core::protocol::{Command, TOKEN_LEN};

#[derive(Debug, Deserialize)]
struct TokenVector {
    intent: String,
    hex: String,
}

fn intent(name: &str) -> Command {
    match name {
        "start" => Command::StartStream,
        "stop" => Command::StopStream,
        "capture" => Command::CaptureFrame,
        "next" => Command::RequestNextFrame,
        other => panic!("unknown intent in vector: {other}"),
    }
}

#[test]
fn tokens_match_wire_bytes() {
    let s = fs::read_to_string("tests/vectors/tokens.json").unwrap();
    let vectors: Vec<TokenVector> = serde_json::from_str(&s).unwrap();
    assert_eq!(vectors.len(), Command::ALL.len());

    for v in vectors {
        let cmd = intent(&v.intent);
        let wire = hex::decode(&v.hex).unwrap();
        assert_eq!(cmd.encode(), wire, "intent={}", v.intent);
        assert_eq!(Command::from_token(&wire), Some(cmd), "intent={}", v.intent);
    }
}

#[test]
fn every_intent_is_recovered_by_the_server() {
    for cmd in Command::ALL {
        let wire = cmd.encode();
        assert_eq!(wire.len(), TOKEN_LEN);
        assert_eq!(Command::from_token(&wire), Some(cmd));
    }
}
