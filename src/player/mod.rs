pub mod ai;
pub mod controller;

pub use ai::{RandomAI, SearchAgent};
pub use controller::Agent;
