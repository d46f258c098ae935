mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::{InputEvent, Key, KeyState};
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{Canvas, Color, FrameCanvas, Rect};
pub use scene::{InputSnapshot, Scene, SceneCommand};
