pub mod dealer;
pub mod pipeline;

pub use dealer::{MatchDealer, MoveAcceptance, RejectReason};
pub use pipeline::{MoveEvent, MovePipeline, MoveReport};
