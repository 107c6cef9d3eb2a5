use std::sync::Arc;

use control::CommandCenter;

use crate::pipeline::VoicePipeline;

/// Shared handler state: the command bookkeeping and the audio pipeline
/// that feeds it.
#[derive(Clone)]
pub struct AppState {
    pub center: CommandCenter,
    pub pipeline: Arc<VoicePipeline>,
}

impl AppState {
    pub fn new(center: CommandCenter, pipeline: VoicePipeline) -> Self {
        Self {
            center,
            pipeline: Arc::new(pipeline),
        }
    }
}
