// Integration tests for speech session tracking and conversation driving
//
// Time is simulated by passing explicit instants, so these tests never sleep.

use anyhow::{bail, Result};
use debate_moderator::analysis::{InterruptionReason, UtteranceAnalyzer};
use debate_moderator::driver::{ConversationDriver, InterruptionNotice, InterruptionSink};
use debate_moderator::persona::{Persona, PersonaId};
use debate_moderator::session::{SessionConfig, SpeechSession, SpeechState};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn session(id: PersonaId) -> SpeechSession {
    SpeechSession::new(
        SessionConfig::new("test-session", Persona::default_for(id)),
        Arc::new(UtteranceAnalyzer::english().unwrap()),
    )
}

#[derive(Default)]
struct RecordingSink {
    delivered: Mutex<Vec<InterruptionNotice>>,
}

#[async_trait::async_trait]
impl InterruptionSink for RecordingSink {
    async fn deliver(&self, notice: &InterruptionNotice) -> Result<()> {
        self.delivered.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

struct FailingSink;

#[async_trait::async_trait]
impl InterruptionSink for FailingSink {
    async fn deliver(&self, _notice: &InterruptionNotice) -> Result<()> {
        bail!("speech service unavailable")
    }
}

#[test]
fn test_cumulative_transcript_finalizes_once() {
    let mut session = session(PersonaId::Standard);
    let t0 = Instant::now();

    assert!(session.update_at("hello", true, t0).is_none());
    assert!(session.update_at("hello world", true, t0 + Duration::from_millis(800)).is_none());
    assert_eq!(session.current_text(), Some("hello world"));

    let analysis = session
        .update_at("", false, t0 + Duration::from_secs(2))
        .expect("speech end should finalize");

    assert_eq!(analysis.response_duration_seconds, 2.0);
    assert_eq!(session.history().len(), 1);

    let record = &session.history()[0];
    assert_eq!(record.text, "hello world");
    assert!((record.duration - 2.0).abs() < 1e-9);
    assert_eq!(record.analysis, analysis);
}

#[test]
fn test_session_returns_to_idle_after_finalize() {
    let mut session = session(PersonaId::Standard);
    let t0 = Instant::now();

    session.update_at("hi", true, t0);
    assert!(session.is_speaking());

    session.update_at("", false, t0 + Duration::from_secs(1));
    assert!(!session.is_speaking());
    assert_eq!(session.state(), &SpeechState::Idle);
    assert_eq!(session.current_text(), None);
}

#[test]
fn test_not_speaking_while_idle_is_noop() {
    let mut session = session(PersonaId::Tough);

    assert!(session.update("stray final transcript", false).is_none());
    assert!(session.history().is_empty());
    assert_eq!(session.state(), &SpeechState::Idle);
}

#[test]
fn test_duration_measured_from_first_speaking_update() {
    let mut session = session(PersonaId::Tough); // 60s threshold
    let t0 = Instant::now();

    session.update_at("I think", true, t0);
    session.update_at("I think that", true, t0 + Duration::from_secs(30));
    let analysis = session
        .update_at("", false, t0 + Duration::from_secs(61))
        .unwrap();

    assert!(analysis.is_rambling);
    assert_eq!(analysis.interruption_reason, InterruptionReason::TooLong);
}

#[test]
fn test_clock_skew_yields_zero_duration() {
    let mut session = session(PersonaId::Standard);
    let t0 = Instant::now() + Duration::from_secs(5);

    session.update_at("hello", true, t0);
    let analysis = session
        .update_at("", false, t0 - Duration::from_secs(3))
        .unwrap();

    assert_eq!(analysis.response_duration_seconds, 0.0);
}

#[test]
fn test_empty_utterance_is_recorded_without_interrupting() {
    let mut session = session(PersonaId::Tough);
    let t0 = Instant::now();

    session.update_at("", true, t0);
    let analysis = session.update_at("", false, t0 + Duration::from_secs(1)).unwrap();

    assert!(!analysis.should_interrupt);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].text, "");
}

#[test]
fn test_interruption_message_follows_persona() {
    let mut session = session(PersonaId::Tough);
    let t0 = Instant::now();

    session.update_at("That's a good question.", true, t0);
    let analysis = session.update_at("", false, t0 + Duration::from_secs(3)).unwrap();

    assert_eq!(
        session.interruption_message(&analysis),
        Some("You're going off-topic. Let's stay focused on the debate question.")
    );

    session.update_at("We cut costs by a third.", true, t0 + Duration::from_secs(10));
    let analysis = session.update_at("", false, t0 + Duration::from_secs(12)).unwrap();
    assert_eq!(session.interruption_message(&analysis), None);
}

#[test]
fn test_stats_aggregate_history() {
    let mut session = session(PersonaId::Tough);
    let t0 = Instant::now();

    session.update_at("um um um um", true, t0);
    session.update_at("", false, t0 + Duration::from_secs(2));
    session.update_at("We shipped on time.", true, t0 + Duration::from_secs(5));
    session.update_at("", false, t0 + Duration::from_secs(9));
    session.update_at("and then", true, t0 + Duration::from_secs(10));

    let stats = session.stats();
    assert_eq!(stats.session_id, "test-session");
    assert_eq!(stats.persona, PersonaId::Tough);
    assert_eq!(stats.responses_count, 2);
    assert_eq!(stats.interruptions_count, 1);
    assert_eq!(stats.total_filler_words, 4);
    assert!((stats.average_duration_secs - 3.0).abs() < 1e-9);
    assert!(stats.is_speaking);
}

#[tokio::test]
async fn test_driver_delivers_interruptions() -> Result<()> {
    let sink = Arc::new(RecordingSink::default());
    let mut driver = ConversationDriver::new(session(PersonaId::Tough), sink.clone());
    let t0 = Instant::now();

    assert!(driver.handle_update_at("I'm not sure", true, t0).await?.is_none());
    let outcome = driver
        .handle_update_at("", false, t0 + Duration::from_secs(2))
        .await?
        .expect("speech end should finalize");

    let notice = outcome.notice.expect("tough persona interrupts off-topic");
    assert_eq!(notice.session_id, "test-session");
    assert_eq!(notice.persona, PersonaId::Tough);
    assert_eq!(notice.reason, InterruptionReason::OffTopic);

    let delivered = sink.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0], notice);

    Ok(())
}

#[tokio::test]
async fn test_driver_skips_sink_without_interruption() -> Result<()> {
    let sink = Arc::new(RecordingSink::default());
    let mut driver = ConversationDriver::new(session(PersonaId::Friendly), sink.clone());
    let t0 = Instant::now();

    driver.handle_update_at("I'm not sure", true, t0).await?;
    let outcome = driver
        .handle_update_at("", false, t0 + Duration::from_secs(2))
        .await?
        .unwrap();

    assert!(outcome.analysis.is_off_topic);
    assert!(outcome.notice.is_none());
    assert!(sink.delivered.lock().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_failed_delivery_keeps_history() {
    let mut driver = ConversationDriver::new(session(PersonaId::Tough), Arc::new(FailingSink));
    let t0 = Instant::now();

    driver.handle_update_at("let me think", true, t0).await.unwrap();
    let result = driver
        .handle_update_at("", false, t0 + Duration::from_secs(1))
        .await;

    assert!(result.is_err());
    assert_eq!(driver.session().history().len(), 1);
    assert!(!driver.session().is_speaking());
}
