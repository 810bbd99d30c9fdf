/// The greet form: one input, one submit, one line of output.
/// [`GreetView`] holds the input text and the last greeting the host sent
/// back. It talks to the host only through the [`CommandBridge`] it was
/// built with.

use parking_lot::Mutex;
use serde::Serialize;
use std::future::Future;

use crate::bridge::{self, CommandBridge};
use crate::error::BridgeError;
use crate::models::GreetRequest;

/// Everything the form renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub name: String,
    pub greet_msg: String,
    pub error: Option<String>,
}

pub struct GreetView<B> {
    bridge: B,
    state: Mutex<ViewState>,
}

impl<B: CommandBridge> GreetView<B> {
    pub fn new(bridge: B) -> Self {
        Self {
            bridge,
            state: Mutex::new(ViewState::default()),
        }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Input change handler
    pub fn set_name(&self, name: impl Into<String>) {
        self.state.lock().name = name.into();
    }

    pub fn name(&self) -> String {
        self.state.lock().name.clone()
    }

    /// Last greeting received, empty until the first success
    pub fn greet_msg(&self) -> String {
        self.state.lock().greet_msg.clone()
    }

    /// Message of the most recent failed submit, cleared by a success
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.lock().clone()
    }

    /// Submit the form.
    ///
    /// The input is read and the host call issued right here; the returned
    /// future only waits for the answer. Overlapping submits are neither
    /// merged nor cancelled, so whichever answer arrives last is shown.
    /// On failure the greeting stays as it was, [`error`](Self::error) is
    /// set, and the error is returned.
    pub fn submit(&self) -> impl Future<Output = Result<(), BridgeError>> + Send + '_ {
        let request = GreetRequest::new(self.name());
        let call = bridge::greet(&self.bridge, &request);
        let state = &self.state;

        async move {
            match call.await {
                Ok(greet_msg) => {
                    let mut state = state.lock();
                    state.greet_msg = greet_msg;
                    state.error = None;
                    Ok(())
                }
                Err(e) => {
                    log::warn!("[View] greet for {:?} failed: {}", request.name, e);
                    state.lock().error = Some(e.to_string());
                    Err(e)
                }
            }
        }
    }
}
