//! End-to-end quiz flow tests
//!
//! Drives the engine and the session store together the way the handlers
//! do: load the user's entry, run the transition, store the result. No
//! Telegram involved; the replies are inspected directly.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use QuizBuddy::config::QuizConfig;
use QuizBuddy::models::{Question, QuestionBank};
use QuizBuddy::services::{MenuChoice, QuizEngine, QuizEvent, Reply};
use QuizBuddy::state::{ChatState, SessionStore};

fn bank() -> Arc<QuestionBank> {
    let questions = (1..=5)
        .map(|i| {
            Question::new(
                format!("Question number {}?", i),
                vec![format!("right{}", i), format!("wrong{}", i), format!("other{}", i)],
                format!("right{}", i),
            )
            .unwrap()
        })
        .collect();
    Arc::new(
        QuestionBank::new(
            questions,
            "You beat the quiz!".to_string(),
            "Better luck next time!".to_string(),
        )
        .unwrap(),
    )
}

fn engine(bank: Arc<QuestionBank>, retries: u32) -> QuizEngine {
    QuizEngine::new(
        bank,
        QuizConfig {
            bank_path: "quiz.toml".to_string(),
            questions: 3,
            retries,
            win_threshold: 2,
            question_time_seconds: 30,
        },
    )
    .unwrap()
}

/// Apply one event for a user, driver-style: lock, transition, store.
async fn apply(
    engine: &QuizEngine,
    store: &SessionStore,
    user_id: i64,
    event: QuizEvent,
    rng: &mut StdRng,
) -> Vec<Reply> {
    let entry = store.entry(user_id).await;
    let mut context = entry.lock().await;

    let transition = engine
        .transition(user_id, context.state, context.session.clone(), event, rng)
        .unwrap();
    context.state = transition.state;
    context.session = transition.session;
    context.touch();

    transition.replies
}

/// The correct answer to the question currently presented to a user
async fn current_correct(store: &SessionStore, bank: &QuestionBank, user_id: i64) -> String {
    let entry = store.entry(user_id).await;
    let context = entry.lock().await;
    let prompt = context
        .session
        .as_ref()
        .and_then(|s| s.current_prompt())
        .expect("user should be mid-round");
    bank.get(prompt).unwrap().correct.clone()
}

async fn state_of(store: &SessionStore, user_id: i64) -> ChatState {
    store.entry(user_id).await.lock().await.state
}

#[tokio::test]
async fn test_winning_conversation_end_to_end() {
    let bank = bank();
    let engine = engine(bank.clone(), 3);
    let store = SessionStore::new();
    let mut rng = StdRng::seed_from_u64(11);
    let user = 1;

    let replies = apply(&engine, &store, user, QuizEvent::Start, &mut rng).await;
    assert!(replies[0].text.contains("Up for a quiz?"));
    assert_eq!(state_of(&store, user).await, ChatState::AwaitingStart);

    apply(&engine, &store, user, QuizEvent::Menu(MenuChoice::Yes), &mut rng).await;
    assert_eq!(state_of(&store, user).await, ChatState::InQuestion);

    // Two right, one wrong: clears the threshold of 2
    for i in 0..3 {
        let answer = if i < 2 {
            current_correct(&store, &bank, user).await
        } else {
            "not even close".to_string()
        };
        apply(&engine, &store, user, QuizEvent::Answer(answer), &mut rng).await;
    }

    let entry = store.entry(user).await;
    let context = entry.lock().await;
    assert_eq!(context.state, ChatState::AwaitingStart);
    let session = context.session.as_ref().unwrap();
    assert!(session.won);
    assert_eq!(session.score, 2);
    drop(context);

    // Replaying after a win ends the conversation without a new round
    let replies = apply(&engine, &store, user, QuizEvent::Menu(MenuChoice::Yes), &mut rng).await;
    assert!(replies[0].text.contains("already beaten"));
    assert_eq!(state_of(&store, user).await, ChatState::Ended);
}

#[tokio::test]
async fn test_losing_then_exhausting_retries() {
    let bank = bank();
    let engine = engine(bank.clone(), 2);
    let store = SessionStore::new();
    let mut rng = StdRng::seed_from_u64(23);
    let user = 7;

    apply(&engine, &store, user, QuizEvent::Start, &mut rng).await;

    // Two full losing rounds
    for round in 1..=2 {
        apply(&engine, &store, user, QuizEvent::Menu(MenuChoice::Yes), &mut rng).await;
        for _ in 0..3 {
            apply(&engine, &store, user, QuizEvent::Answer("wrong".to_string()), &mut rng).await;
        }

        let entry = store.entry(user).await;
        let context = entry.lock().await;
        let session = context.session.as_ref().unwrap();
        assert!(!session.won);
        assert_eq!(session.attempt, round);
        assert_eq!(context.state, ChatState::AwaitingStart);
    }

    // Third yes: attempts are exhausted
    let replies = apply(&engine, &store, user, QuizEvent::Menu(MenuChoice::Yes), &mut rng).await;
    assert!(replies[0].text.contains("used all 2 rounds"));
    assert_eq!(state_of(&store, user).await, ChatState::Ended);

    // The session itself survives, attempt count intact
    let entry = store.entry(user).await;
    assert_eq!(entry.lock().await.session.as_ref().unwrap().attempt, 2);
}

#[tokio::test]
async fn test_users_play_independently() {
    let bank = bank();
    let engine = engine(bank.clone(), 3);
    let store = SessionStore::new();
    let mut rng = StdRng::seed_from_u64(31);

    for user in [100, 200] {
        apply(&engine, &store, user, QuizEvent::Start, &mut rng).await;
        apply(&engine, &store, user, QuizEvent::Menu(MenuChoice::Yes), &mut rng).await;
    }

    // User 100 finishes a winning round while user 200 stays mid-question
    for _ in 0..3 {
        let answer = current_correct(&store, &bank, 100).await;
        apply(&engine, &store, 100, QuizEvent::Answer(answer), &mut rng).await;
    }

    assert_eq!(state_of(&store, 100).await, ChatState::AwaitingStart);
    assert_eq!(state_of(&store, 200).await, ChatState::InQuestion);

    let entry = store.entry(200).await;
    let context = entry.lock().await;
    let session = context.session.as_ref().unwrap();
    assert_eq!(session.question_index, 0);
    assert!(!session.won);
}

#[tokio::test]
async fn test_cancel_mid_round_keeps_history_for_restart() {
    let bank = bank();
    let engine = engine(bank.clone(), 3);
    let store = SessionStore::new();
    let mut rng = StdRng::seed_from_u64(47);
    let user = 9;

    apply(&engine, &store, user, QuizEvent::Start, &mut rng).await;
    apply(&engine, &store, user, QuizEvent::Menu(MenuChoice::Yes), &mut rng).await;
    let replies = apply(&engine, &store, user, QuizEvent::Cancel, &mut rng).await;
    assert!(replies[0].text.contains("cancelled"));
    assert_eq!(state_of(&store, user).await, ChatState::Ended);

    // /start reopens; the retry counts the abandoned attempt
    apply(&engine, &store, user, QuizEvent::Start, &mut rng).await;
    apply(&engine, &store, user, QuizEvent::Menu(MenuChoice::Yes), &mut rng).await;

    let entry = store.entry(user).await;
    let context = entry.lock().await;
    assert_eq!(context.state, ChatState::InQuestion);
    assert_eq!(context.session.as_ref().unwrap().attempt, 2);
}
