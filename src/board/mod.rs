pub mod cozy;

pub use cozy::{Outcome, Position};
