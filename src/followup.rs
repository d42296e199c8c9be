use crate::error::FollowupError;
use crate::message::Message;
use serde::Deserialize;

/// The message selector for edits and deletions that targets the original
/// interaction response.
pub const ORIGINAL: &str = "@original";

#[derive(Deserialize)]
struct FollowupMessageId {
    id: String,
}

/// A handle for sending, editing and deleting followup messages after the
/// initial interaction response.
///
/// The handle captures the application id and the interaction's followup
/// token by value at context construction, so it is `'static`, cloneable and
/// safe to move into a spawned task or another thread while the original
/// request cycle finishes:
///
/// ```rust,no_run
/// # async fn example(ctx: &parley::context::SlashContext<'_, ()>) {
/// let followup = ctx.followup();
/// tokio::spawn(async move {
///     // ... long work ...
///     let _ = followup.edit_original(&parley::message::Message::from("done")).await;
/// });
/// # }
/// ```
#[derive(Clone)]
pub struct Followup {
    http: reqwest::Client,
    base_url: String,
    application_id: String,
    token: String,
}

impl Followup {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: String,
        application_id: String,
        token: String,
    ) -> Self {
        Self {
            http,
            base_url,
            application_id,
            token,
        }
    }

    /// The interaction token this handle was issued for.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The webhook URL followups for this interaction go to, optionally
    /// targeting an existing message.
    pub fn url(&self, message: Option<&str>) -> String {
        let mut url = format!(
            "{}/webhooks/{}/{}",
            self.base_url, self.application_id, self.token
        );
        if let Some(message) = message {
            url.push_str("/messages/");
            url.push_str(message);
        }
        url
    }

    /// Sends a new followup message, returning the id of the created
    /// message.
    pub async fn send(&self, message: &Message) -> Result<String, FollowupError> {
        let body = message.dump_followup()?;

        let request = self.http.post(self.url(None));
        let request = if message.files.is_empty() {
            request.json(&body)
        } else {
            let mut form = reqwest::multipart::Form::new()
                .text("payload_json", serde_json::to_string(&body).unwrap_or_default());
            for (index, file) in message.files.iter().enumerate() {
                form = form.part(
                    format!("file{}", index),
                    reqwest::multipart::Part::bytes(file.bytes.clone())
                        .file_name(file.filename.clone()),
                );
            }
            request.multipart(form)
        };

        let response = request.send().await?.error_for_status()?;
        let created: FollowupMessageId = response.json().await?;
        Ok(created.id)
    }

    /// Edits an existing followup message, or the original response when
    /// `message` is [`ORIGINAL`].
    pub async fn edit(&self, message: &Message, target: &str) -> Result<(), FollowupError> {
        let body = message.dump_followup()?;

        self.http
            .patch(self.url(Some(target)))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Edits the original interaction response.
    pub async fn edit_original(&self, message: &Message) -> Result<(), FollowupError> {
        self.edit(message, ORIGINAL).await
    }

    /// Deletes an existing followup message, or the original response when
    /// `message` is [`ORIGINAL`].
    pub async fn delete(&self, target: &str) -> Result<(), FollowupError> {
        self.http
            .delete(self.url(Some(target)))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Deletes the original interaction response.
    pub async fn delete_original(&self) -> Result<(), FollowupError> {
        self.delete(ORIGINAL).await
    }

    /// Adapts this handle into its blocking twin for use from plain worker
    /// threads.
    pub fn blocking(&self) -> BlockingFollowup {
        BlockingFollowup {
            base_url: self.base_url.clone(),
            application_id: self.application_id.clone(),
            token: self.token.clone(),
        }
    }
}

/// The blocking twin of [`Followup`], for handlers that hand their long work
/// to a plain thread instead of a task.
///
/// Must not be used from inside an async runtime; that is what [`Followup`]
/// is for.
#[derive(Clone)]
pub struct BlockingFollowup {
    base_url: String,
    application_id: String,
    token: String,
}

impl BlockingFollowup {
    fn url(&self, message: Option<&str>) -> String {
        let mut url = format!(
            "{}/webhooks/{}/{}",
            self.base_url, self.application_id, self.token
        );
        if let Some(message) = message {
            url.push_str("/messages/");
            url.push_str(message);
        }
        url
    }

    /// Sends a new followup message, returning the id of the created
    /// message.
    pub fn send(&self, message: &Message) -> Result<String, FollowupError> {
        let body = message.dump_followup()?;
        let client = reqwest::blocking::Client::new();

        let request = client.post(self.url(None));
        let request = if message.files.is_empty() {
            request.json(&body)
        } else {
            let mut form = reqwest::blocking::multipart::Form::new()
                .text("payload_json", serde_json::to_string(&body).unwrap_or_default());
            for (index, file) in message.files.iter().enumerate() {
                form = form.part(
                    format!("file{}", index),
                    reqwest::blocking::multipart::Part::bytes(file.bytes.clone())
                        .file_name(file.filename.clone()),
                );
            }
            request.multipart(form)
        };

        let response = request.send()?.error_for_status()?;
        let created: FollowupMessageId = response.json()?;
        Ok(created.id)
    }

    /// Edits an existing followup message, or the original response when
    /// `message` is [`ORIGINAL`].
    pub fn edit(&self, message: &Message, target: &str) -> Result<(), FollowupError> {
        let body = message.dump_followup()?;

        reqwest::blocking::Client::new()
            .patch(self.url(Some(target)))
            .json(&body)
            .send()?
            .error_for_status()?;

        Ok(())
    }

    /// Edits the original interaction response.
    pub fn edit_original(&self, message: &Message) -> Result<(), FollowupError> {
        self.edit(message, ORIGINAL)
    }

    /// Deletes an existing followup message, or the original response when
    /// `message` is [`ORIGINAL`].
    pub fn delete(&self, target: &str) -> Result<(), FollowupError> {
        reqwest::blocking::Client::new()
            .delete(self.url(Some(target)))
            .send()?
            .error_for_status()?;

        Ok(())
    }

    /// Deletes the original interaction response.
    pub fn delete_original(&self) -> Result<(), FollowupError> {
        self.delete(ORIGINAL)
    }
}
