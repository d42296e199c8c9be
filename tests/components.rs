mod common;

use common::{command_invocation, component_interaction, http, modal_interaction};
use parley::custom_id;
use parley::prelude::*;
use serde_json::json;

fn click<'a>(_ctx: &'a SlashContext<'a, ()>, count: i64) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move {
        let row = ActionRow::single(Button::new(
            custom_id::encode("click", [count + 1])?,
            "click me",
        )?);

        Ok(Reply::from(
            Message::new()
                .content(format!("clicked {} times", count))
                .update(true)
                .component_row(row),
        ))
    })
}

fn pick<'a>(ctx: &'a SlashContext<'a, ()>) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move { Ok(Reply::from(ctx.values().join("+"))) })
}

fn form<'a>(_ctx: &'a SlashContext<'a, ()>) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move {
        let modal = Modal::new(
            "form",
            "Tell us more",
            vec![ActionRow::single(TextInput::short("name", "Your name")?)],
        )?;
        Ok(Reply::from(modal))
    })
}

fn submitted<'a>(ctx: &'a SlashContext<'a, ()>) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move {
        let name = ctx.modal_values().get("name").copied().unwrap_or_default().to_string();
        Ok(Reply::from(format!("Welcome, {}", name)))
    })
}

fn nested_modal<'a>(_ctx: &'a SlashContext<'a, ()>) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move {
        let modal = Modal::new(
            "again",
            "One more",
            vec![ActionRow::single(TextInput::short("field", "A field")?)],
        )?;
        Ok(Reply::from(modal))
    })
}

fn framework() -> Framework<()> {
    Framework::builder(http(), "1234", ())
        .command(Command::new(form).name("form").description("Opens a form"))
        .component("click", ComponentHandler::new1(click))
        .component("pick", ComponentHandler::new(pick))
        .component("form", ComponentHandler::new(submitted))
        .component("again", ComponentHandler::new(nested_modal))
        .build()
}

#[tokio::test]
async fn component_state_increments_across_activations() {
    let framework = framework();

    let mut custom_id = "click\n0".to_string();
    for expected in 0..3 {
        let response = framework
            .process(component_interaction(&custom_id))
            .await
            .unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["type"], 7);
        assert_eq!(
            json["data"]["content"],
            format!("clicked {} times", expected)
        );

        custom_id = json["data"]["components"][0]["components"][0]["custom_id"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(custom_id, format!("click\n{}", expected + 1));
    }
}

#[tokio::test]
async fn unknown_custom_ids_are_rejected() {
    let framework = framework();

    let result = framework.process(component_interaction("nope\n1")).await;
    assert!(matches!(
        result,
        Err(DispatchError::UnknownHandler(id)) if id == "nope"
    ));
}

#[tokio::test]
async fn invalid_state_tokens_are_fatal() {
    let framework = framework();

    let result = framework.process(component_interaction("click\nmany")).await;
    assert!(matches!(result, Err(DispatchError::InvalidHandlerState(_))));
}

#[tokio::test]
async fn select_menu_values_reach_the_handler() {
    let framework = framework();

    let interaction = common::interaction(json!({
        "id": "1001",
        "type": 3,
        "data": { "custom_id": "pick", "values": ["red", "blue"] },
        "token": "interaction-token",
    }));

    let response = framework.process(interaction).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["data"]["content"], "red+blue");
}

#[tokio::test]
async fn commands_may_answer_with_modals() {
    let framework = framework();

    let response = framework
        .process(command_invocation("form", json!([])))
        .await
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["type"], 9);
    assert_eq!(json["data"]["custom_id"], "form");
    assert_eq!(json["data"]["title"], "Tell us more");
}

#[tokio::test]
async fn modal_submissions_bind_their_field_values() {
    let framework = framework();

    let submission = modal_interaction(
        "form",
        json!([{
            "type": 1,
            "components": [{ "type": 4, "custom_id": "name", "value": "Alice" }],
        }]),
    );

    let response = framework.process(submission).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["data"]["content"], "Welcome, Alice");
}

#[tokio::test]
async fn a_modal_cannot_answer_a_modal_submission() {
    let framework = framework();

    let submission = modal_interaction("again", json!([]));
    let result = framework.process(submission).await;

    assert!(matches!(result, Err(DispatchError::ModalNotAllowed)));
}

#[tokio::test]
async fn components_may_answer_with_modals() {
    let framework = framework();

    let response = framework
        .process(component_interaction("again"))
        .await
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["type"], 9);
}
