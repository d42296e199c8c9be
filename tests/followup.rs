mod common;

use common::{command_invocation, http};
use parley::prelude::*;
use serde_json::json;
use std::sync::Mutex;

type Captured = Mutex<Option<Followup>>;

fn defer<'a>(ctx: &'a SlashContext<'a, Captured>) -> BoxFuture<'a, DefaultCommandResult> {
    Box::pin(async move {
        // hand the followup handle to the outside world, as a real handler
        // would hand it to a worker
        *ctx.data.lock().unwrap() = Some(ctx.followup());
        Ok(Reply::from(Message::new().deferred(true)))
    })
}

fn framework() -> Framework<Captured> {
    Framework::builder(http(), "1234", Mutex::new(None))
        .command(Command::new(defer).name("defer").description("Answers later"))
        .build()
}

#[tokio::test]
async fn followup_credentials_are_captured_by_value() {
    let framework = framework();

    let response = framework
        .process(command_invocation("defer", json!([])))
        .await
        .unwrap();
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["type"], 5);

    let followup = framework.data.lock().unwrap().take().unwrap();

    // the handle owns its credentials and keeps working after the request
    // cycle is gone, even from another thread
    let token = std::thread::spawn(move || {
        (
            followup.token().to_string(),
            followup.url(Some("@original")),
        )
    })
    .join()
    .unwrap();

    assert_eq!(token.0, "interaction-token");
    assert_eq!(
        token.1,
        "https://discord.com/api/v10/webhooks/1234/interaction-token/messages/@original"
    );
}

#[tokio::test]
async fn followup_urls_address_the_webhook() {
    let framework = framework();

    framework
        .process(command_invocation("defer", json!([])))
        .await
        .unwrap();
    let followup = framework.data.lock().unwrap().take().unwrap();

    assert_eq!(
        followup.url(None),
        "https://discord.com/api/v10/webhooks/1234/interaction-token"
    );

    // the blocking twin addresses the same webhook
    let blocking = followup.blocking();
    let _ = blocking;
}
