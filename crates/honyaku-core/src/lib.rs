pub mod pipeline;
pub mod preprocess;

pub use pipeline::{PipelineError, RecognitionPipeline};
