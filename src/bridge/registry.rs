/// Command registry
/// Host-side command surface: handlers looked up by name and run in-process
/// Mirrors what the desktop runtime does for `invoke_handler` commands

use std::collections::HashMap;
use std::future::{ready, Future};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{CommandBridge, InvokeArgs};
use crate::commands::greeting;
use crate::error::BridgeError;
use crate::models::{GreetRequest, GREET_COMMAND};

type Handler = Box<dyn Fn(InvokeArgs) -> Result<Value, String> + Send + Sync>;

/// Registry of host commands keyed by name
pub struct CommandRegistry {
    handlers: HashMap<String, Handler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with every command the app ships (`greet`)
    pub fn with_default_commands() -> Self {
        let mut registry = Self::new();
        registry.register_typed(GREET_COMMAND, |request: GreetRequest| {
            Ok::<_, String>(greeting(&request.name))
        });
        registry
    }

    /// Register a raw handler, replacing any earlier one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(InvokeArgs) -> Result<Value, String> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.handlers.insert(name.clone(), Box::new(handler)).is_some() {
            log::warn!("[Registry] command `{}` registered twice, keeping the latest", name);
        }
    }

    /// Register a handler taking typed arguments and returning a typed value
    pub fn register_typed<A, T, F>(&mut self, name: impl Into<String>, handler: F)
    where
        A: DeserializeOwned,
        T: Serialize,
        F: Fn(A) -> Result<T, String> + Send + Sync + 'static,
    {
        let name = name.into();
        let command = name.clone();
        self.register(name, move |args| {
            let args: A = serde_json::from_value(Value::Object(args))
                .map_err(|e| format!("invalid args for command `{}`: {}", command, e))?;
            let output = handler(args)?;
            serde_json::to_value(output).map_err(|e| e.to_string())
        });
    }

    /// Names of all registered commands, sorted
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn dispatch(&self, command: &str, args: InvokeArgs) -> Result<Value, BridgeError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| BridgeError::UnknownCommand(command.to_string()))?;

        handler(args).map_err(|message| {
            log::warn!("[Registry] command `{}` failed: {}", command, message);
            BridgeError::rejected(command, message)
        })
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBridge for CommandRegistry {
    fn invoke(
        &self,
        command: &str,
        args: InvokeArgs,
    ) -> impl Future<Output = Result<Value, BridgeError>> + Send {
        ready(self.dispatch(command, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> InvokeArgs {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[tokio::test]
    async fn default_registry_greets() {
        let registry = CommandRegistry::with_default_commands();

        let reply = registry
            .invoke("greet", args(json!({ "name": "Ada" })))
            .await
            .unwrap();

        assert_eq!(reply, json!("Hello, Ada! You've been greeted from Rust!"));
    }

    #[tokio::test]
    async fn unknown_command_is_reported() {
        let registry = CommandRegistry::with_default_commands();

        let err = registry.invoke("wave", InvokeArgs::new()).await.unwrap_err();

        assert!(matches!(err, BridgeError::UnknownCommand(name) if name == "wave"));
    }

    #[tokio::test]
    async fn missing_argument_rejects_with_command_name() {
        let registry = CommandRegistry::with_default_commands();

        let err = registry.invoke("greet", InvokeArgs::new()).await.unwrap_err();

        match err {
            BridgeError::Rejected { command, message } => {
                assert_eq!(command, "greet");
                assert!(message.contains("invalid args for command `greet`"));
                assert!(message.contains("name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn handler_error_becomes_rejection() {
        let mut registry = CommandRegistry::new();
        registry.register("fail", |_| Err("nope".to_string()));

        let err = registry.invoke("fail", InvokeArgs::new()).await.unwrap_err();

        assert_eq!(err.to_string(), "command `fail` rejected: nope");
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut registry = CommandRegistry::new();
        registry.register("echo", |_| Ok(json!(1)));
        registry.register("echo", |_| Ok(json!(2)));

        assert_eq!(registry.dispatch("echo", InvokeArgs::new()).unwrap(), json!(2));
        assert_eq!(registry.commands(), vec!["echo"]);
    }

    #[test]
    fn commands_are_sorted() {
        let mut registry = CommandRegistry::with_default_commands();
        registry.register("alpha", |_| Ok(Value::Null));

        assert_eq!(registry.commands(), vec!["alpha", "greet"]);
    }
}
