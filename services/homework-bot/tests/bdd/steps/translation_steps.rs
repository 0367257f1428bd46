//! BDD step definitions for the status translation feature

use cucumber::{given, then, when};
use serde_json::json;

use homework_bot::status::parse_status;
use homework_bot::BotError;

use crate::world::HomeworkBotWorld;

#[given(expr = "a homework record named {string} with status {string}")]
fn record_with_status(world: &mut HomeworkBotWorld, name: String, status: String) {
    world.record = Some(json!({"homework_name": name, "status": status}));
}

#[given(expr = "a homework record named {string} without a status")]
fn record_without_status(world: &mut HomeworkBotWorld, name: String) {
    world.record = Some(json!({ "homework_name": name }));
}

#[when("the record is translated")]
fn translate(world: &mut HomeworkBotWorld) {
    let record = world.record.as_ref().expect("record not set");
    world.translation = Some(parse_status(record));
}

#[then(regex = r"^the message reads: (.+)$")]
fn message_reads(world: &mut HomeworkBotWorld, expected: String) {
    let result = world.translation.as_ref().expect("no translation");
    assert_eq!(result.as_ref().unwrap(), &expected);
}

#[then("translating it again gives the same message")]
fn translation_is_stable(world: &mut HomeworkBotWorld) {
    let record = world.record.as_ref().expect("record not set");
    let first = world.translation.as_ref().expect("no translation");
    assert_eq!(first.as_ref().unwrap(), &parse_status(record).unwrap());
}

#[then(expr = "translation fails with an unknown status {string}")]
fn unknown_status(world: &mut HomeworkBotWorld, status: String) {
    match world.translation.as_ref().expect("no translation") {
        Err(BotError::UnknownStatus(s)) => assert_eq!(s, &status),
        other => panic!("expected UnknownStatus, got {other:?}"),
    }
}

#[then(expr = "translation fails with a missing key {string}")]
fn missing_key(world: &mut HomeworkBotWorld, key: String) {
    match world.translation.as_ref().expect("no translation") {
        Err(BotError::MissingKey(k)) => assert_eq!(k, &key),
        other => panic!("expected MissingKey, got {other:?}"),
    }
}
