//! The data-source seam the entity reads from, plus an in-memory
//! coordinator that holds the latest snapshot for one location.

use std::{fmt::Debug, sync::Arc};

use arc_swap::ArcSwap;
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::VendorSnapshot;

pub const DOMAIN: &str = "accuweather";
pub const MANUFACTURER: &str = "AccuWeather, Inc.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceEntryType {
    Service,
}

/// Registry metadata for the device a location is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub identifiers: Vec<(String, String)>,
    pub manufacturer: String,
    pub name: String,
    pub entry_type: DeviceEntryType,
    pub configuration_url: String,
}

impl DeviceInfo {
    pub fn for_location(location_key: &str, name: &str) -> Self {
        Self {
            identifiers: vec![(DOMAIN.to_string(), location_key.to_string())],
            manufacturer: MANUFACTURER.to_string(),
            name: name.to_string(),
            entry_type: DeviceEntryType::Service,
            configuration_url: format!(
                "http://accuweather.com/en/_/_/{location_key}/weather-forecast/{location_key}/"
            ),
        }
    }
}

/// Whatever owns the fetched data for one location.
///
/// Implementations replace the snapshot wholesale on refresh; readers get an
/// `Arc` to whichever snapshot is current at call time.
pub trait DataSource: Send + Sync + Debug {
    fn snapshot(&self) -> Arc<VendorSnapshot>;

    fn location_key(&self) -> &str;

    fn device_info(&self) -> &DeviceInfo;

    /// Incremented on every replacement, starting at 0.
    fn version(&self) -> u64;
}

impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    fn snapshot(&self) -> Arc<VendorSnapshot> {
        (**self).snapshot()
    }

    fn location_key(&self) -> &str {
        (**self).location_key()
    }

    fn device_info(&self) -> &DeviceInfo {
        (**self).device_info()
    }

    fn version(&self) -> u64 {
        (**self).version()
    }
}

/// Holds the current snapshot for one location behind an atomic pointer swap.
///
/// Refreshing is someone else's job: they call [`SnapshotCoordinator::replace`]
/// with a freshly parsed snapshot and subscribers are notified through a
/// version channel.
#[derive(Debug)]
pub struct SnapshotCoordinator {
    location_key: String,
    device_info: DeviceInfo,
    current: ArcSwap<VendorSnapshot>,
    version: watch::Sender<u64>,
}

impl SnapshotCoordinator {
    pub fn new(location_key: impl Into<String>, name: &str, snapshot: VendorSnapshot) -> Self {
        let location_key = location_key.into();
        let device_info = DeviceInfo::for_location(&location_key, name);
        let (version, _) = watch::channel(0);

        Self {
            location_key,
            device_info,
            current: ArcSwap::from_pointee(snapshot),
            version,
        }
    }

    /// Swap in a new snapshot and return the new version. The version is
    /// bumped after the swap, so a reader may briefly see the new snapshot
    /// with the old version number.
    pub fn replace(&self, snapshot: VendorSnapshot) -> u64 {
        self.current.store(Arc::new(snapshot));

        let mut next = 0;
        self.version.send_modify(|version| {
            *version += 1;
            next = *version;
        });

        debug!(location = %self.location_key, version = next, "Snapshot replaced");
        next
    }

    /// Receiver that observes every version bump.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}

impl DataSource for SnapshotCoordinator {
    fn snapshot(&self) -> Arc<VendorSnapshot> {
        self.current.load_full()
    }

    fn location_key(&self) -> &str {
        &self.location_key
    }

    fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    fn version(&self) -> u64 {
        *self.version.borrow()
    }
}
