// libnfp/src/services/mod.rs

//! Host capabilities a device consumes besides the controller and cipher.

/// Console date source.
pub mod calendar;
/// Owner Mii factory.
pub mod identity;

use std::sync::Arc;

pub use calendar::{Calendar, FixedCalendar, SystemCalendar};
pub use identity::{DefaultIdentity, IdentityProvider};

use crate::bridge::{ControllerBridge, EventSink, NullSink};
use crate::crypto::{AmiiboCrypto, NoKeys};
use crate::tag::{SettingsChecksum, ZeroPreimage};

/// Collaborators wired into one device. Everything except the bridge is
/// shareable across devices.
#[derive(Clone)]
pub struct Services {
    /// Controller the tag sits on
    pub bridge: Arc<dyn ControllerBridge>,
    /// Amiibo cipher
    pub crypto: Arc<dyn AmiiboCrypto>,
    /// Source of today's date
    pub calendar: Arc<dyn Calendar>,
    /// Owner Mii factory
    pub identity: Arc<dyn IdentityProvider>,
    /// Settings CRC preimage
    pub settings_checksum: Arc<dyn SettingsChecksum>,
    /// Receiver of device signals
    pub sink: Arc<dyn EventSink>,
}

impl Services {
    /// Defaults for everything but the bridge: no keys, host clock,
    /// blank identity, zero settings preimage, signals dropped.
    pub fn with_bridge(bridge: Arc<dyn ControllerBridge>) -> Self {
        Self {
            bridge,
            crypto: Arc::new(NoKeys),
            calendar: Arc::new(SystemCalendar),
            identity: Arc::new(DefaultIdentity),
            settings_checksum: Arc::new(ZeroPreimage),
            sink: Arc::new(NullSink),
        }
    }
}
