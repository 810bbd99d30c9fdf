/// Substitutable doubles for the host runtime.
/// Everything here implements the same traits as the real host bindings,
/// so tests swap them in through ordinary constructor injection.

mod bridge;
mod doubles;

pub use bridge::{Deferred, MockBridge, RecordedCall};
pub use doubles::{MemoryFileStore, MemoryKeyValueStore, RecordingEventBus, ScriptedFileDialog};
