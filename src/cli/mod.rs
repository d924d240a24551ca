pub mod payables;
pub mod report;
pub mod setup;
pub mod ui;
