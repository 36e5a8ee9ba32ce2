pub mod change_detector;
pub mod dispatcher;
pub mod monitor;
pub mod report;
pub mod scanner;
