pub mod browser;
pub mod categories;
pub mod controller;
pub mod events;
pub mod state;
