//! Outbound focus notifications.
//!
//! Whenever the focus state changes the embedding page receives `"true"` or
//! `"false"`. Delivery is fire-and-forget: no acknowledgement, no retry.

use std::sync::Arc;

use parking_lot::Mutex;

/// Receiver of focus notifications.
pub trait FocusNotifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Logs notifications; used when there is no embedding page.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl FocusNotifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!("[scene] focus notification: {}", message);
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl FocusNotifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Posts notifications to `window.parent` with target origin `*`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ParentWindowNotifier;

#[cfg(target_arch = "wasm32")]
impl FocusNotifier for ParentWindowNotifier {
    fn notify(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            tracing::warn!("[scene] no window, dropping focus notification");
            return;
        };
        match window.parent() {
            Ok(Some(parent)) => {
                let payload = wasm_bindgen::JsValue::from_str(message);
                if let Err(e) = parent.post_message(&payload, "*") {
                    tracing::warn!("[scene] postMessage failed: {:?}", e);
                }
            }
            Ok(None) => {
                tracing::debug!("[scene] no parent window, dropping focus notification");
            }
            Err(e) => {
                tracing::warn!("[scene] parent window unavailable: {:?}", e);
            }
        }
    }
}

/// Shared handle to the active notifier.
pub type SharedNotifier = Arc<dyn FocusNotifier>;
