pub mod errors;
pub mod latency;
pub mod observability;
pub mod routes;
pub mod startup;

pub use startup::{run, AppState};
