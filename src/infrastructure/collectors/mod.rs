pub mod disk_collector;
pub mod proc_net;
pub mod sysinfo_collector;
