//! BDD step definitions for the polling loop feature

use std::sync::Arc;

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use homework_bot::api::PracticumClient;
use homework_bot::config::{Config, EmptyHomeworksPolicy, RecordSelection, WatermarkPolicy};
use homework_bot::engine::{CycleOutcome, Engine};
use homework_bot::io::HttpResponse;
use homework_bot::telegram::TelegramNotifier;
use homework_bot::BotError;

use crate::world::{HomeworkBotWorld, InstantClock, NOW};

const INITIAL_WATERMARK: i64 = NOW - 10_000_000;

fn build_engine(world: &HomeworkBotWorld, stop_after: usize) -> Engine {
    let config = Config {
        polling: world.polling.clone(),
        ..Config::default()
    };
    let cancel = CancellationToken::new();
    let api = PracticumClient::new(&config.api, "practicum-token", world.http.clone());
    let notifier = TelegramNotifier::new(&config.telegram, "123:ABC", "42", world.http.clone());
    Engine::new(
        Arc::new(api),
        Arc::new(notifier),
        Arc::new(InstantClock::new(stop_after, cancel.clone())),
        &config,
        cancel,
    )
}

fn engine(world: &mut HomeworkBotWorld) -> &mut Engine {
    if world.engine.is_none() {
        world.engine = Some(build_engine(world, usize::MAX));
    }
    world.engine.as_mut().expect("engine just built")
}

fn parse_outcome(s: &str) -> CycleOutcome {
    match s {
        "unchanged" => CycleOutcome::Unchanged,
        "no new work" => CycleOutcome::NoNewWork,
        "undelivered" => CycleOutcome::Undelivered,
        "error notified" => CycleOutcome::ErrorNotified,
        "error suppressed" => CycleOutcome::ErrorSuppressed,
        "error undelivered" => CycleOutcome::ErrorUndelivered,
        other => panic!("Unknown outcome: {}", other),
    }
}

#[given("a bot with default policies")]
fn default_bot(_world: &mut HomeworkBotWorld) {}

#[given("a bot that treats an empty homework list as an error")]
fn empty_is_error(world: &mut HomeworkBotWorld) {
    world.polling.empty_homeworks = EmptyHomeworksPolicy::Error;
}

#[given("a bot that advances the watermark unconditionally")]
fn unconditional_watermark(world: &mut HomeworkBotWorld) {
    world.polling.watermark = WatermarkPolicy::Unconditional;
}

#[given("a bot that reports every homework record")]
fn all_records(world: &mut HomeworkBotWorld) {
    world.polling.records = RecordSelection::All;
}

fn push_body(world: &mut HomeworkBotWorld, step: &Step, times: usize) {
    let body = step
        .docstring
        .as_ref()
        .expect("body docstring missing")
        .trim()
        .to_string();
    for _ in 0..times {
        world.http.push_reply(Ok(HttpResponse {
            status: 200,
            body: body.clone(),
        }));
    }
}

#[given("the API answers with:")]
fn api_answers(world: &mut HomeworkBotWorld, step: &Step) {
    push_body(world, step, 1);
}

#[given(expr = "the API answers {int} times with:")]
fn api_answers_repeatedly(world: &mut HomeworkBotWorld, step: &Step, times: usize) {
    push_body(world, step, times);
}

#[given(expr = "the API answers with status {int} {int} times")]
fn api_answers_status(world: &mut HomeworkBotWorld, status: u16, times: usize) {
    for _ in 0..times {
        world.http.push_reply(Ok(HttpResponse {
            status,
            body: "Service Unavailable".to_string(),
        }));
    }
}

#[given(expr = "the API is unreachable {int} times")]
fn api_unreachable(world: &mut HomeworkBotWorld, times: usize) {
    for _ in 0..times {
        world
            .http
            .push_reply(Err(BotError::Http("connection refused".to_string())));
    }
}

#[given("the chat is unreachable")]
fn chat_down(world: &mut HomeworkBotWorld) {
    world.http.set_chat_down(true);
}

#[when("the chat comes back")]
fn chat_up(world: &mut HomeworkBotWorld) {
    world.http.set_chat_down(false);
}

#[when(expr = "{int} polling cycle(s) run(s)")]
async fn cycles_run(world: &mut HomeworkBotWorld, count: usize) {
    for _ in 0..count {
        let outcome = engine(world).run_cycle().await;
        world.outcomes.push(outcome);
    }
}

#[when(expr = "the bot runs until {int} sleeps have passed")]
async fn bot_runs(world: &mut HomeworkBotWorld, sleeps: usize) {
    let mut engine = build_engine(world, sleeps);
    engine.run().await;
    world.engine = Some(engine);
}

#[then(expr = "{int} message(s) has/have been sent to the chat")]
fn messages_sent(world: &mut HomeworkBotWorld, count: usize) {
    assert_eq!(world.http.delivered().len(), count, "{:?}", world.http.delivered());
}

#[then(regex = r"^message (\d+) reads: (.+)$")]
fn message_reads(world: &mut HomeworkBotWorld, index: usize, expected: String) {
    let delivered = world.http.delivered();
    assert_eq!(delivered[index - 1], expected);
}

#[then(expr = "message {int} contains {string}")]
fn message_contains(world: &mut HomeworkBotWorld, index: usize, fragment: String) {
    let delivered = world.http.delivered();
    assert!(
        delivered[index - 1].contains(&fragment),
        "{:?}",
        delivered[index - 1]
    );
}

#[then(expr = "the watermark is {int}")]
fn watermark_is(world: &mut HomeworkBotWorld, expected: i64) {
    let engine = world.engine.as_ref().expect("engine not built");
    assert_eq!(engine.state().current_timestamp, expected);
}

#[then("the watermark has not moved")]
fn watermark_unmoved(world: &mut HomeworkBotWorld) {
    let engine = world.engine.as_ref().expect("engine not built");
    assert_eq!(engine.state().current_timestamp, INITIAL_WATERMARK);
}

#[then(expr = "cycle {int} was {string}")]
fn cycle_was(world: &mut HomeworkBotWorld, index: usize, outcome: String) {
    assert_eq!(world.outcomes[index - 1], parse_outcome(&outcome));
}

#[then(expr = "the API was polled {int} times")]
fn api_polled(world: &mut HomeworkBotWorld, count: usize) {
    assert_eq!(world.http.requested_from_dates().len(), count);
}

#[then(expr = "poll {int} asked for changes since {int}")]
fn poll_from_date(world: &mut HomeworkBotWorld, index: usize, from_date: i64) {
    assert_eq!(
        world.http.requested_from_dates()[index - 1],
        from_date.to_string()
    );
}
