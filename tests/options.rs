mod common;

use common::{command_invocation, http};
use parley::command_choices;
use parley::enums::CommandOptionType;
use parley::prelude::*;
use serde_json::json;

command_choices! {
    /// What kind of pet to adopt.
    pub enum Animal: String {
        Dog: "Dog" => "dog",
        Cat: "Cat" => "cat",
        Snake: "Snake" => "snake",
    }

    pub enum Priority: Integer {
        Low: "Low" => 1,
        High: "High" => 2,
    }
}

fn adopt<'a>(ctx: &'a SlashContext<'a, ()>) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move {
        let animal = ctx.named_parse::<Animal>("animal").await?;
        let priority = ctx
            .named_parse::<Option<Priority>>("priority")
            .await?
            .unwrap_or(Priority::Low);
        Ok(Reply::from(format!("{:?} at {:?} priority", animal, priority)))
    })
}

fn noop<'a>(_ctx: &'a SlashContext<'a, ()>) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move { Ok(Reply::ack()) })
}

fn adopt_command() -> Command<(), DefaultError> {
    Command::new(adopt)
        .name("adopt")
        .description("Adopts a pet")
        .argument::<Animal>("animal", "The animal to adopt")
        .argument::<Option<Priority>>("priority", "How urgently")
}

#[test]
fn choice_enums_dump_their_members() {
    let spec = adopt_command().dump();

    let animal = &spec.options[0];
    assert_eq!(animal.kind, CommandOptionType::String);
    assert!(animal.required);
    assert_eq!(animal.choices.len(), 3);
    assert_eq!(animal.choices[0].name, "Dog");
    assert_eq!(animal.choices[0].value, ChoiceValue::String("dog".to_string()));

    let priority = &spec.options[1];
    assert_eq!(priority.kind, CommandOptionType::Integer);
    assert!(!priority.required);
    assert_eq!(priority.choices[1].value, ChoiceValue::Integer(2));
}

#[tokio::test]
async fn choice_values_bind_back_to_their_members() {
    let framework = Framework::builder(http(), "1234", ())
        .command(adopt_command())
        .build();

    let response = framework
        .process(command_invocation(
            "adopt",
            json!([
                { "name": "animal", "type": 3, "value": "cat" },
                { "name": "priority", "type": 4, "value": 2 },
            ]),
        ))
        .await
        .unwrap();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["data"]["content"], "Cat at High priority");
}

#[tokio::test]
async fn values_outside_the_choice_set_fail_binding() {
    let framework = Framework::builder(http(), "1234", ())
        .command(adopt_command())
        .build();

    let result = framework
        .process(command_invocation(
            "adopt",
            json!([{ "name": "animal", "type": 3, "value": "ferret" }]),
        ))
        .await;

    assert!(result.is_err());
}

#[test]
fn schemas_are_inferred_from_declared_types() {
    let spec = Command::<(), DefaultError>::new(noop)
        .name("kitchen-sink")
        .description("One of everything")
        .argument::<String>("text", "A string")
        .argument::<bool>("flag", "A boolean")
        .argument::<f64>("ratio", "A number")
        .argument::<u8>("small", "A small integer")
        .argument::<Option<parley::entity::Channel>>("where", "A channel")
        .argument::<parley::entity::Role>("role", "A role")
        .argument::<parley::entity::Attachment>("file", "An attachment")
        .dump();

    let kinds: Vec<CommandOptionType> = spec.options.iter().map(|opt| opt.kind).collect();
    assert_eq!(
        kinds,
        vec![
            CommandOptionType::String,
            CommandOptionType::Boolean,
            CommandOptionType::Number,
            CommandOptionType::Integer,
            CommandOptionType::Channel,
            CommandOptionType::Role,
            CommandOptionType::Attachment,
        ]
    );

    // Option<T> drops the required flag, everything else keeps it
    assert!(spec.options[0].required);
    assert!(!spec.options[4].required);

    // narrow integers carry their range as limits
    let small = &spec.options[3];
    assert_eq!(small.min_value, Some(0.0));
    assert_eq!(small.max_value, Some(255.0));
}

#[test]
#[should_panic(expected = "invalid command")]
fn uppercase_chat_input_names_abort_startup() {
    let _ = Framework::<(), DefaultError>::builder(http(), "1234", ())
        .command(Command::new(noop).name("Shout").description("Loudly"))
        .build();
}

#[test]
#[should_panic(expected = "invalid command")]
fn missing_descriptions_abort_startup() {
    let _ = Framework::<(), DefaultError>::builder(http(), "1234", ())
        .command(Command::new(noop).name("quiet"))
        .build();
}

#[test]
#[should_panic(expected = "already registered")]
fn duplicate_names_abort_startup() {
    let _ = Framework::<(), DefaultError>::builder(http(), "1234", ())
        .command(Command::new(noop).name("ping").description("One"))
        .command(Command::new(noop).name("ping").description("Two"))
        .build();
}

#[test]
#[should_panic(expected = "already registered")]
fn blueprint_merges_reject_name_collisions() {
    let first: Blueprint<()> =
        Blueprint::new().command(Command::new(noop).name("ping").description("One"));
    let second: Blueprint<()> =
        Blueprint::new().command(Command::new(noop).name("ping").description("Two"));

    let _ = Framework::builder(http(), "1234", ())
        .blueprint(first)
        .blueprint(second)
        .build();
}
