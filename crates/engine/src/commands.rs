// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invoke/response command dispatch.
//!
//! Each line a client sends is an [`Invoke`]; each reply is a [`Response`].
//! Failures of any kind, including unknown commands and malformed
//! arguments, are reported in the response.

use crate::error::ServiceError;
use crate::service::NotificationService;
use nb_adapters::NotifyAdapter;
use nb_core::{ActionType, Channel, NotificationId, NotificationRecord};
use nb_storage::StoreBackend;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A command request from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoke {
    /// Echoed back so clients can match responses to requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub cmd: String,
    #[serde(default)]
    pub args: Value,
}

impl Invoke {
    pub fn new(cmd: impl Into<String>, args: Value) -> Self {
        Self {
            id: None,
            cmd: cmd.into(),
            args,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok(id: Option<Value>, data: Value) -> Self {
        Self {
            id,
            ok: true,
            data: (!data.is_null()).then_some(data),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, error: impl Into<String>) -> Self {
        Self {
            id,
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Errors from a single command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("invalid arguments for {cmd}: {source}")]
    InvalidArgs {
        cmd: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("failed to encode result: {0}")]
    Encode(serde_json::Error),
}

#[derive(Deserialize)]
struct RegisterArgs {
    types: Vec<ActionType>,
}

#[derive(Deserialize, Default)]
struct IdsArgs {
    #[serde(default)]
    notifications: Option<Vec<NotificationId>>,
}

#[derive(Deserialize)]
struct ChannelIdArgs {
    id: String,
}

fn args<T: DeserializeOwned>(invoke: &Invoke) -> Result<T, CommandError> {
    serde_json::from_value(invoke.args.clone()).map_err(|source| CommandError::InvalidArgs {
        cmd: invoke.cmd.clone(),
        source,
    })
}

/// Arguments that may be omitted entirely.
fn optional_args<T: DeserializeOwned + Default>(invoke: &Invoke) -> Result<T, CommandError> {
    if invoke.args.is_null() {
        return Ok(T::default());
    }
    args(invoke)
}

fn to_value<T: Serialize>(value: T) -> Result<Value, CommandError> {
    serde_json::to_value(value).map_err(CommandError::Encode)
}

/// Run one command and wrap the outcome in a response.
pub async fn dispatch<A, B>(service: &NotificationService<A, B>, invoke: Invoke) -> Response
where
    A: NotifyAdapter,
    B: StoreBackend,
{
    let id = invoke.id.clone();
    match execute(service, &invoke).await {
        Ok(data) => Response::ok(id, data),
        Err(e) => {
            tracing::warn!(cmd = %invoke.cmd, error = %e, "command failed");
            Response::error(id, e.to_string())
        }
    }
}

async fn execute<A, B>(
    service: &NotificationService<A, B>,
    invoke: &Invoke,
) -> Result<Value, CommandError>
where
    A: NotifyAdapter,
    B: StoreBackend,
{
    tracing::debug!(cmd = %invoke.cmd, "executing command");
    match invoke.cmd.as_str() {
        "notify" => {
            let record: NotificationRecord = args(invoke)?;
            service.notify(record).await?;
            Ok(Value::Null)
        }
        "register_action_types" => {
            let RegisterArgs { types } = args(invoke)?;
            service.register_action_types(&types).await?;
            Ok(Value::Null)
        }
        "get_pending" => to_value(service.pending().await?),
        "get_active" => to_value(service.active().await?),
        "cancel" => {
            let IdsArgs { notifications } = optional_args(invoke)?;
            match notifications {
                Some(ids) => service.cancel(&ids).await?,
                None => service.cancel_all().await?,
            }
            Ok(Value::Null)
        }
        "remove_active" => {
            let IdsArgs { notifications } = optional_args(invoke)?;
            match notifications {
                Some(ids) => service.remove_active(&ids).await?,
                None => service.remove_all_active().await?,
            }
            Ok(Value::Null)
        }
        "create_channel" => {
            let channel: Channel = args(invoke)?;
            service.create_channel(channel).await?;
            Ok(Value::Null)
        }
        "delete_channel" => {
            let ChannelIdArgs { id } = args(invoke)?;
            service.delete_channel(&id).await?;
            Ok(Value::Null)
        }
        "list_channels" => to_value(service.list_channels().await?),
        "is_permission_granted" => Ok(Value::Bool(service.is_permission_granted().await?)),
        "request_permission" => to_value(service.request_permission().await?),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
