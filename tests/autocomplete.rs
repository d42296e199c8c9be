mod common;

use common::{http, interaction};
use parley::prelude::*;
use serde_json::json;

const FLAVORS: [&str; 4] = ["vanilla", "chocolate", "strawberry", "mint"];

fn order<'a>(ctx: &'a SlashContext<'a, ()>) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move {
        let flavor = ctx.named_parse::<String>("flavor").await?;
        Ok(Reply::from(format!("One {} coming up", flavor)))
    })
}

fn complete_flavor<'a>(ctx: AutocompleteContext<'a, ()>) -> BoxFuture<'a, AutocompleteResult> {
    Box::pin(async move {
        let input = ctx.user_input.input.to_lowercase();
        let matches: Vec<&str> = FLAVORS
            .iter()
            .copied()
            .filter(|flavor| flavor.starts_with(&input))
            .collect();
        AutocompleteResult::from(matches)
    })
}

fn framework() -> Framework<()> {
    Framework::builder(http(), "1234", ())
        .command(
            Command::new(order)
                .name("order")
                .description("Orders ice cream")
                .add_argument(
                    CommandArgument::new::<String>("flavor", "The flavor to order")
                        .autocomplete(true),
                )
                .argument::<Option<i64>>("scoops", "How many scoops"),
        )
        .autocomplete("order", complete_flavor)
        .build()
}

fn autocomplete_request(options: serde_json::Value) -> Interaction {
    interaction(json!({
        "id": "1001",
        "type": 4,
        "data": { "name": "order", "type": 1, "options": options },
        "token": "interaction-token",
    }))
}

#[tokio::test]
async fn focused_options_drive_the_hook() {
    let framework = framework();

    let request = autocomplete_request(json!([
        { "name": "flavor", "type": 3, "value": "str", "focused": true },
        { "name": "scoops", "type": 4, "value": 2 },
    ]));

    let response = framework.process(request).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["type"], 8);
    assert_eq!(
        json["data"]["choices"],
        json!([{ "name": "strawberry", "value": "strawberry" }])
    );
}

#[tokio::test]
async fn plain_value_lists_auto_pair_name_and_value() {
    let framework = framework();

    let request = autocomplete_request(json!([
        { "name": "flavor", "type": 3, "value": "", "focused": true },
    ]));

    let response = framework.process(request).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();

    let choices = json["data"]["choices"].as_array().unwrap();
    assert_eq!(choices.len(), FLAVORS.len());
    for choice in choices {
        assert_eq!(choice["name"], choice["value"]);
    }
}

#[tokio::test]
async fn requests_without_a_focused_option_are_malformed() {
    let framework = framework();

    let request = autocomplete_request(json!([
        { "name": "scoops", "type": 4, "value": 2 },
    ]));

    assert!(matches!(
        framework.process(request).await,
        Err(DispatchError::MalformedInteraction(_))
    ));
}

#[tokio::test]
async fn unregistered_commands_cannot_autocomplete() {
    let framework = framework();

    let request = interaction(json!({
        "id": "1001",
        "type": 4,
        "data": {
            "name": "other",
            "type": 1,
            "options": [{ "name": "flavor", "type": 3, "value": "a", "focused": true }],
        },
        "token": "interaction-token",
    }));

    assert!(matches!(
        framework.process(request).await,
        Err(DispatchError::UnknownCommand(_))
    ));
}

#[tokio::test]
async fn autocomplete_flags_survive_the_schema_dump() {
    let framework = framework();
    let specs = framework.dump_commands();

    let order = specs.iter().find(|spec| spec.name == "order").unwrap();
    let flavor = order.options.iter().find(|opt| opt.name == "flavor").unwrap();
    assert!(flavor.autocomplete);
}
