pub mod alarms;
pub mod set_parser;
pub mod stats;
