//! Pipeline execution

pub mod driver;
pub mod tail;

pub use driver::{EventHandler, PipelineDriver, PipelineEvent};
pub use tail::{bounded_tail, TailEnd};
