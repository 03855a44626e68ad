pub mod about;
pub mod convert;
pub mod setup;
pub mod ui;
