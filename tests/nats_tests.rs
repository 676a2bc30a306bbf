use chrono::{TimeZone, Utc};
use debate_moderator::analysis::InterruptionReason;
use debate_moderator::driver::InterruptionNotice;
use debate_moderator::nats::messages::{InterruptionMessage, TranscriptMessage};
use debate_moderator::nats::NatsClient;
use debate_moderator::persona::PersonaId;

#[test]
fn test_transcript_deserialization() {
    let json = r#"{
        "session_id": "room-1",
        "text": "Hello world",
        "partial": false,
        "is_speaking": false,
        "timestamp": "2025-10-27T14:30:05Z",
        "confidence": 0.95
    }"#;

    let msg: TranscriptMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.session_id, "room-1");
    assert_eq!(msg.text, "Hello world");
    assert!(!msg.partial);
    assert!(!msg.speaking());
    assert_eq!(msg.confidence, Some(0.95));
    assert_eq!(msg.timestamp, "2025-10-27T14:30:05Z");
}

#[test]
fn test_transcript_partial_implies_speaking() {
    let json = r#"{
        "session_id": "room-1",
        "text": "This is a partial",
        "partial": true,
        "timestamp": "2025-10-27T14:30:05Z",
        "confidence": 0.87
    }"#;

    let msg: TranscriptMessage = serde_json::from_str(json).unwrap();
    assert!(msg.partial);
    assert_eq!(msg.is_speaking, None);
    assert!(msg.speaking());
}

#[test]
fn test_explicit_voice_activity_wins() {
    let json = r#"{
        "session_id": "room-1",
        "text": "Final words",
        "partial": false,
        "is_speaking": true,
        "timestamp": "2025-10-27T14:30:05Z"
    }"#;

    let msg: TranscriptMessage = serde_json::from_str(json).unwrap();
    assert!(msg.speaking());
    assert_eq!(msg.confidence, None);
}

#[test]
fn test_interruption_message_serialization() {
    let notice = InterruptionNotice {
        session_id: "room-1".to_string(),
        persona: PersonaId::Tough,
        reason: InterruptionReason::TooManyFillers,
        message: "Speak more directly.".to_string(),
        timestamp: Utc.with_ymd_and_hms(2025, 10, 27, 14, 30, 0).unwrap(),
    };

    let json = serde_json::to_string(&InterruptionMessage::from(&notice)).unwrap();
    assert!(json.contains("\"persona\":\"tough\""));
    assert!(json.contains("\"reason\":\"too_many_fillers\""));
    assert!(json.contains("2025-10-27T14:30:00+00:00"));

    let deserialized: InterruptionMessage = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.session_id, "room-1");
    assert_eq!(deserialized.reason, InterruptionReason::TooManyFillers);
}

#[test]
fn test_interrupt_subject() {
    assert_eq!(
        NatsClient::interrupt_subject("room-1"),
        "moderator.interrupt.room-1"
    );
}
