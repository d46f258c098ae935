pub mod app;

pub use app::{
    run_app, AppError, Canvas, Color, FrameCanvas, InputEvent, InputSnapshot, Key, KeyState,
    LoopConfig, LoopMetricsSnapshot, Rect, Scene, SceneCommand, SLOW_FRAME_ENV_VAR,
};
