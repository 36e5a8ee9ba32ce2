pub mod composite;
pub mod log_file;
pub mod mail;
pub mod webhook;
