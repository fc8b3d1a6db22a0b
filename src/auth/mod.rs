pub mod bootstrap;
pub mod csrf;
pub mod session;
