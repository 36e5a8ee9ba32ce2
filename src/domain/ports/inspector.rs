use super::collector::CollectionError;
use crate::domain::entities::disk::DiskInfo;
use crate::domain::entities::process::ProcessInfo;
use crate::domain::entities::socket::ListeningSocket;

/// Live host state consulted by the security scanner.
///
/// Filesystem checks walk configured paths directly; this port covers the
/// state that only the kernel can report.
pub trait HostInspector: Send + Sync {
    /// All running processes with their command lines.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError` if the process table cannot be read.
    fn processes(&self) -> Result<Vec<ProcessInfo>, CollectionError>;

    /// Sockets in TCP LISTEN state plus bound UDP sockets.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError` if the socket tables cannot be read.
    fn listening_sockets(&self) -> Result<Vec<ListeningSocket>, CollectionError>;

    /// Mounted real filesystems.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError` if the mount list cannot be read.
    fn disks(&self) -> Result<Vec<DiskInfo>, CollectionError>;
}
