pub mod classify_risk;
pub mod sample_risk;

pub use classify_risk::{classify, classify_result};
pub use sample_risk::aggregate_risk;
