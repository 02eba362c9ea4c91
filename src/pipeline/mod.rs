pub mod controller;
pub mod loop_worker;

pub use controller::PipelineController;
pub use loop_worker::{frame_loop, ShelfView, FRAME_INTERVAL_MS};
