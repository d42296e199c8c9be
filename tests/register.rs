mod common;

use common::{http, MockApi};
use parley::http::CommandScope;
use parley::prelude::*;

fn ping<'a>(_ctx: &'a SlashContext<'a, ()>) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move { Ok(Reply::from("Pong!")) })
}

fn square<'a>(ctx: &'a SlashContext<'a, ()>) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move {
        let number = ctx.named_parse::<Option<i64>>("number").await?.unwrap_or(5);
        Ok(Reply::from((number * number).to_string()))
    })
}

fn framework(square_description: &'static str) -> Framework<()> {
    Framework::builder(http(), "1234", ())
        .command(Command::new(ping).name("ping").description("Responds with pong"))
        .command(
            Command::new(square)
                .name("square")
                .description(square_description)
                .argument::<Option<i64>>("number", "The number to square"),
        )
        .build()
}

#[tokio::test]
async fn first_sync_creates_everything() {
    let api = MockApi::new();
    let framework = framework("Squares a number");

    let report = framework
        .sync_commands_with(&api, &CommandScope::Global)
        .await
        .unwrap();

    assert_eq!(report.created.len(), 2);
    assert!(report.deleted.is_empty());
    assert_eq!(api.call_count("create:"), 2);
    assert_eq!(api.call_count("delete:"), 0);

    // remote ids are recorded for later permission overwrites
    assert!(framework.command_id("ping").is_some());
    assert!(framework.command_id("square").is_some());
}

#[tokio::test]
async fn resyncing_an_unchanged_set_is_idempotent() {
    let api = MockApi::new();
    let framework = framework("Squares a number");

    framework
        .sync_commands_with(&api, &CommandScope::Global)
        .await
        .unwrap();
    api.reset_calls();

    let report = framework
        .sync_commands_with(&api, &CommandScope::Global)
        .await
        .unwrap();

    assert!(report.created.is_empty());
    assert!(report.deleted.is_empty());
    assert_eq!(report.unchanged.len(), 2);
    assert_eq!(api.call_count("create:"), 0);
    assert_eq!(api.call_count("delete:"), 0);
    assert_eq!(api.call_count("fetch"), 1);
}

#[tokio::test]
async fn changed_commands_are_replaced_and_stable_ones_keep_their_ids() {
    let api = MockApi::new();

    let original = framework("Squares a number");
    original
        .sync_commands_with(&api, &CommandScope::Global)
        .await
        .unwrap();
    let ping_id = original.command_id("ping").unwrap();
    let square_id = original.command_id("square").unwrap();
    api.reset_calls();

    // same ping, reworded square
    let changed = framework("Multiplies a number by itself");
    let report = changed
        .sync_commands_with(&api, &CommandScope::Global)
        .await
        .unwrap();

    assert_eq!(report.unchanged, vec!["ping".to_string()]);
    assert_eq!(report.deleted, vec!["square".to_string()]);
    assert_eq!(report.created, vec!["square".to_string()]);

    assert_eq!(changed.command_id("ping").unwrap(), ping_id);
    assert_ne!(changed.command_id("square").unwrap(), square_id);
}

#[tokio::test]
async fn guild_scope_is_reconciled_independently() {
    let api = MockApi::new();
    let framework = framework("Squares a number");

    let report = framework
        .sync_commands_with(&api, &CommandScope::Guild("4001".to_string()))
        .await
        .unwrap();

    assert_eq!(report.created.len(), 2);
}

#[tokio::test]
async fn bulk_overwrite_records_ids_too() {
    let api = MockApi::new();
    let framework = framework("Squares a number");

    let report = parley::sync::overwrite(&api, &CommandScope::Global, &framework.dump_commands())
        .await
        .unwrap();

    assert_eq!(api.calls(), vec!["overwrite".to_string()]);
    assert_eq!(report.ids.len(), 2);
}

#[test]
fn dumped_commands_carry_inferred_schemas() {
    let framework = framework("Squares a number");
    let specs = framework.dump_commands();

    let square = specs.iter().find(|spec| spec.name == "square").unwrap();
    assert_eq!(square.options.len(), 1);

    let number = &square.options[0];
    assert_eq!(number.kind, parley::enums::CommandOptionType::Integer);
    assert_eq!(number.name, "number");
    assert!(!number.required);
}
