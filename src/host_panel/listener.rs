/// Event listeners that detach themselves when dropped
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, MouseEvent};

use crate::error::DomError;

pub struct ListenerGuard {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

impl ListenerGuard {
    pub fn attach<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, DomError>
    where
        F: FnMut(MouseEvent) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;

        Ok(ListenerGuard {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("Failed to detach {} listener: {:?}", self.event, e);
        }
    }
}

/// Global move/release listeners held for the length of one pointer gesture
pub struct GestureSession<G> {
    pub state: G,
    _on_move: ListenerGuard,
    _on_release: ListenerGuard,
}

impl<G> GestureSession<G> {
    pub fn new(state: G, on_move: ListenerGuard, on_release: ListenerGuard) -> Self {
        GestureSession {
            state,
            _on_move: on_move,
            _on_release: on_release,
        }
    }

    /// End the gesture: listeners are detached and the gesture state handed back
    pub fn finish(self) -> G {
        self.state
    }
}
