pub mod collector;
pub mod inspector;
pub mod notifier;
pub mod store;

pub use collector::{CollectionError, SystemCollector};
pub use inspector::HostInspector;
pub use notifier::{NotificationError, Notifier};
pub use store::{FingerprintStore, StoreError};
