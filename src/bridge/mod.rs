/// Request/response bridge between the view and the host command surface.
/// The host exposes commands by name; callers hand over a JSON object of
/// named arguments and get back a JSON value. [`CommandBridge`] is that
/// surface as an injectable trait, and [`greet`] is the one typed call the
/// view makes through it.

pub mod registry;

use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::BridgeError;
use crate::models::{GreetRequest, GreetResponse, GREET_COMMAND};

pub use registry::CommandRegistry;

/// Named arguments of a command call, `{ "name": "Ada" }` for `greet`.
pub type InvokeArgs = Map<String, Value>;

/// A command surface reachable by string name.
///
/// The call is issued when `invoke` is called, not when the returned future
/// is first polled, so two calls made back to back are both in flight
/// before either is awaited.
pub trait CommandBridge {
    fn invoke(
        &self,
        command: &str,
        args: InvokeArgs,
    ) -> impl Future<Output = Result<Value, BridgeError>> + Send;
}

impl<B: CommandBridge> CommandBridge for Arc<B> {
    fn invoke(
        &self,
        command: &str,
        args: InvokeArgs,
    ) -> impl Future<Output = Result<Value, BridgeError>> + Send {
        (**self).invoke(command, args)
    }
}

/// Ask the host to greet `request.name`.
///
/// Issues exactly one `invoke("greet", { name })`. The name is forwarded
/// untouched, including the empty string. A host rejection comes back as
/// [`BridgeError::Rejected`]; a result that is not a string as
/// [`BridgeError::Decode`].
pub fn greet<'a, B: CommandBridge>(
    bridge: &'a B,
    request: &GreetRequest,
) -> impl Future<Output = Result<GreetResponse, BridgeError>> + Send + 'a {
    log::debug!("[Bridge] invoke {} name={:?}", GREET_COMMAND, request.name);
    let call = encode_args(request).map(move |args| bridge.invoke(GREET_COMMAND, args));

    async move {
        let value = call?.await?;
        serde_json::from_value::<GreetResponse>(value).map_err(|source| BridgeError::Decode {
            command: GREET_COMMAND.to_string(),
            source,
        })
    }
}

fn encode_args<T: serde::Serialize>(args: &T) -> Result<InvokeArgs, BridgeError> {
    match serde_json::to_value(args).map_err(BridgeError::Encode)? {
        Value::Object(map) => Ok(map),
        other => Err(BridgeError::Encode(serde::ser::Error::custom(format!(
            "expected an object of named arguments, got {}",
            other
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBridge;
    use serde_json::json;

    #[tokio::test]
    async fn greet_sends_one_call_with_name() {
        let bridge = MockBridge::new();
        bridge.resolve_next(json!("Hello, Ada!"));

        let reply = greet(&bridge, &GreetRequest::new("Ada")).await.unwrap();

        assert_eq!(reply, "Hello, Ada!");
        let calls = bridge.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].command, "greet");
        assert_eq!(Value::Object(calls[0].args.clone()), json!({ "name": "Ada" }));
    }

    #[tokio::test]
    async fn greet_forwards_empty_name() {
        let bridge = MockBridge::new();
        bridge.resolve_next(json!(""));

        let reply = greet(&bridge, &GreetRequest::new("")).await.unwrap();

        assert_eq!(reply, "");
        assert_eq!(bridge.calls()[0].args.get("name"), Some(&json!("")));
    }

    #[test]
    fn call_is_issued_before_await() {
        let bridge = MockBridge::new();
        let pending = greet(&bridge, &GreetRequest::new("Ada"));

        assert_eq!(bridge.calls().len(), 1);
        drop(pending);
    }

    #[tokio::test]
    async fn rejection_is_returned() {
        let bridge = MockBridge::new();
        bridge.reject_next("host exploded");

        let err = greet(&bridge, &GreetRequest::new("Ada")).await.unwrap_err();

        match err {
            BridgeError::Rejected { command, message } => {
                assert_eq!(command, "greet");
                assert_eq!(message, "host exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_string_result_is_a_decode_error() {
        let bridge = MockBridge::new();
        bridge.resolve_next(json!({ "greeting": "hi" }));

        let err = greet(&bridge, &GreetRequest::new("Ada")).await.unwrap_err();

        assert!(matches!(err, BridgeError::Decode { .. }));
    }

    #[tokio::test]
    async fn shared_bridge_through_arc() {
        let bridge = Arc::new(MockBridge::new());
        bridge.resolve_next(json!("hi"));

        let shared = Arc::clone(&bridge);
        assert_eq!(greet(&shared, &GreetRequest::new("x")).await.unwrap(), "hi");
        assert_eq!(bridge.calls().len(), 1);
    }

    #[test]
    fn encode_args_rejects_non_objects() {
        let err = encode_args(&"just a string").unwrap_err();
        assert!(matches!(err, BridgeError::Encode(_)));
    }
}
