pub mod alert;
pub mod check;
pub mod disk;
pub mod fingerprint;
pub mod notification;
pub mod process;
pub mod snapshot;
pub mod socket;

pub use alert::Alert;
pub use check::CheckResult;
pub use disk::DiskInfo;
pub use fingerprint::{CacheRecord, FingerprintKey};
pub use notification::Notification;
pub use process::ProcessInfo;
pub use snapshot::{CpuInfo, MemoryInfo, ResourceSnapshot};
pub use socket::{ListeningSocket, Protocol};
