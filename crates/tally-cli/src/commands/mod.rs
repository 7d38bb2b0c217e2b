pub mod approval;
pub mod dispatch;
pub mod metrics;
pub mod risk;
pub mod schema;
pub mod shared;
