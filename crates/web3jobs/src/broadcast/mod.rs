//! State-change notifications for presentation layers.

pub mod board_events;

pub use board_events::{BoardEvent, BoardEventBroadcaster};
