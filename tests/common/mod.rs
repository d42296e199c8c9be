#![allow(dead_code)]

use parley::error::RegisterError;
use parley::http::{ApiResponse, CommandScope, CommandsApi, RateLimit};
use parley::option::CommandSpec;
use parley::prelude::*;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

pub fn interaction(value: Value) -> Interaction {
    serde_json::from_value(value).expect("valid interaction payload")
}

/// A chat-input invocation of `name` with the given option payload.
pub fn command_invocation(name: &str, options: Value) -> Interaction {
    interaction(json!({
        "id": "1001",
        "type": 2,
        "application_id": "1234",
        "data": {
            "id": "2001",
            "name": name,
            "type": 1,
            "options": options,
        },
        "channel_id": "3001",
        "guild_id": "4001",
        "member": {
            "nick": "invoker",
            "user": { "id": "42", "username": "invoker", "discriminator": "0001" },
        },
        "token": "interaction-token",
    }))
}

pub fn ping_interaction() -> Interaction {
    interaction(json!({ "id": "1001", "type": 1, "token": "interaction-token" }))
}

/// A component activation carrying the given custom id.
pub fn component_interaction(custom_id: &str) -> Interaction {
    interaction(json!({
        "id": "1001",
        "type": 3,
        "data": { "custom_id": custom_id },
        "channel_id": "3001",
        "token": "interaction-token",
    }))
}

/// A modal submission carrying the given custom id and submitted fields.
pub fn modal_interaction(custom_id: &str, fields: Value) -> Interaction {
    interaction(json!({
        "id": "1001",
        "type": 5,
        "data": { "custom_id": custom_id, "components": fields },
        "channel_id": "3001",
        "token": "interaction-token",
    }))
}

pub fn http() -> DiscordHttp {
    DiscordHttp::new("1234", "client-secret")
}

/// An in-memory commands API recording every call, standing in for the remote
/// catalog.
pub struct MockApi {
    pub remote: Mutex<Vec<CommandSpec>>,
    pub calls: Mutex<Vec<String>>,
    next_id: AtomicU64,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            remote: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(9000),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn assign_id(&self, mut spec: CommandSpec) -> CommandSpec {
        spec.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst).to_string());
        spec
    }

    fn rate_limit(&self) -> Option<RateLimit> {
        Some(RateLimit {
            remaining: 4,
            reset: 0.0,
        })
    }
}

#[async_trait]
impl CommandsApi for MockApi {
    async fn fetch_commands(
        &self,
        _scope: &CommandScope,
    ) -> Result<ApiResponse<Vec<CommandSpec>>, RegisterError> {
        self.calls.lock().unwrap().push("fetch".to_string());
        Ok(ApiResponse {
            value: self.remote.lock().unwrap().clone(),
            rate_limit: self.rate_limit(),
        })
    }

    async fn create_command(
        &self,
        _scope: &CommandScope,
        command: &CommandSpec,
    ) -> Result<ApiResponse<CommandSpec>, RegisterError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create:{}", command.name));

        let created = self.assign_id(command.clone());
        self.remote.lock().unwrap().push(created.clone());

        Ok(ApiResponse {
            value: created,
            rate_limit: self.rate_limit(),
        })
    }

    async fn delete_command(
        &self,
        _scope: &CommandScope,
        command_id: &str,
    ) -> Result<ApiResponse<()>, RegisterError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("delete:{}", command_id));
        self.remote
            .lock()
            .unwrap()
            .retain(|spec| spec.id.as_deref() != Some(command_id));

        Ok(ApiResponse {
            value: (),
            rate_limit: self.rate_limit(),
        })
    }

    async fn overwrite_commands(
        &self,
        _scope: &CommandScope,
        commands: &[CommandSpec],
    ) -> Result<ApiResponse<Vec<CommandSpec>>, RegisterError> {
        self.calls.lock().unwrap().push("overwrite".to_string());

        let assigned: Vec<CommandSpec> = commands
            .iter()
            .map(|spec| self.assign_id(spec.clone()))
            .collect();
        *self.remote.lock().unwrap() = assigned.clone();

        Ok(ApiResponse {
            value: assigned,
            rate_limit: self.rate_limit(),
        })
    }
}
