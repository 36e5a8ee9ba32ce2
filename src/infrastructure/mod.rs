pub mod collectors;
pub mod notifications;
pub mod persistence;
