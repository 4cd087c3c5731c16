pub mod events;
pub mod performance;
pub mod settings;
pub mod state;
