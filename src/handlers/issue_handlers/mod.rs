pub mod actions;
pub mod assign;
pub mod create;
pub mod list;
