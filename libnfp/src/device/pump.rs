// libnfp/src/device/pump.rs

//! Async front end for the input side: a task that drains controller
//! events from a channel into [`DeviceRegistry::dispatch`].

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::bridge::{DeviceEvent, EventSink, TagEvent};
use crate::device::registry::DeviceRegistry;
use crate::types::DeviceId;

/// Dispatch events until every sender is dropped. Returns how many events
/// were taken off the channel. Dispatch failures are logged, not fatal.
///
/// Each dispatch runs on the blocking pool since it may persist an image.
pub async fn run_event_pump(
    registry: Arc<DeviceRegistry>,
    mut events: mpsc::Receiver<(DeviceId, TagEvent)>,
) -> usize {
    let mut handled = 0;
    while let Some((id, event)) = events.recv().await {
        handled += 1;
        let registry = registry.clone();
        match tokio::task::spawn_blocking(move || registry.dispatch(id, event)).await {
            Ok(Ok(())) => debug!("{}: event dispatched", id),
            Ok(Err(e)) => warn!("{}: event rejected: {}", id, e),
            Err(e) => warn!("{}: dispatch task failed: {}", id, e),
        }
    }
    handled
}

/// Spawn the event pump on the current runtime. The task yields the
/// number of events it handled once the sender side is dropped.
pub fn spawn_event_pump(
    registry: Arc<DeviceRegistry>,
    events: mpsc::Receiver<(DeviceId, TagEvent)>,
) -> JoinHandle<usize> {
    tokio::spawn(run_event_pump(registry, events))
}

/// Sink forwarding device signals into an unbounded channel, for hosts
/// that consume them from async code.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<(DeviceId, DeviceEvent)>,
}

impl ChannelSink {
    /// Sink plus the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(DeviceId, DeviceEvent)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn signal(&self, device: DeviceId, event: DeviceEvent) {
        if self.tx.send((device, event)).is_err() {
            debug!("{}: signal {:?} dropped, receiver closed", device, event);
        }
    }
}
