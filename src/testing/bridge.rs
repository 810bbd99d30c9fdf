/// Mock bridge
/// Records every invoke and answers from a script set up by the test

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::oneshot;

use crate::bridge::{CommandBridge, InvokeArgs};
use crate::error::BridgeError;

/// One observed `invoke` call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub command: String,
    pub args: InvokeArgs,
}

enum Scripted {
    Resolve(Value),
    Reject(String),
    Deferred(oneshot::Receiver<Result<Value, String>>),
}

/// Settles a call scripted with [`MockBridge::defer_next`]
pub struct Deferred {
    sender: oneshot::Sender<Result<Value, String>>,
}

impl Deferred {
    pub fn resolve(self, value: Value) {
        let _ = self.sender.send(Ok(value));
    }

    pub fn reject(self, message: impl Into<String>) {
        let _ = self.sender.send(Err(message.into()));
    }
}

/// Stand-in for the host command surface.
///
/// Responses are consumed in call order. A call with nothing scripted
/// resolves to `null`, so typed wrappers see a decode error rather than
/// a hang.
pub struct MockBridge {
    calls: Mutex<Vec<RecordedCall>>,
    script: Mutex<VecDeque<Scripted>>,
}

impl MockBridge {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
        }
    }

    pub fn resolve_next(&self, value: Value) {
        self.script.lock().push_back(Scripted::Resolve(value));
    }

    pub fn reject_next(&self, message: impl Into<String>) {
        self.script.lock().push_back(Scripted::Reject(message.into()));
    }

    /// Leave the next call pending until the returned handle settles it
    pub fn defer_next(&self) -> Deferred {
        let (sender, receiver) = oneshot::channel();
        self.script.lock().push_back(Scripted::Deferred(receiver));
        Deferred { sender }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBridge for MockBridge {
    fn invoke(
        &self,
        command: &str,
        args: InvokeArgs,
    ) -> impl Future<Output = Result<Value, BridgeError>> + Send {
        self.calls.lock().push(RecordedCall {
            command: command.to_string(),
            args,
        });
        let scripted = self.script.lock().pop_front();
        let command = command.to_string();

        async move {
            let outcome = match scripted {
                None => Ok(Value::Null),
                Some(Scripted::Resolve(value)) => Ok(value),
                Some(Scripted::Reject(message)) => Err(message),
                Some(Scripted::Deferred(receiver)) => receiver
                    .await
                    .unwrap_or_else(|_| Err("deferred response dropped".to_string())),
            };
            outcome.map_err(|message| BridgeError::rejected(command, message))
        }
    }
}
