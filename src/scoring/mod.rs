pub mod engine;
pub mod role;

pub use engine::score_batch_from_path;
