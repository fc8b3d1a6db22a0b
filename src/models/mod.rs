pub mod issue;
pub mod metrics;
