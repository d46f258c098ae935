mod canvas;
mod font;
mod overlay;
mod renderer;

pub use canvas::{Canvas, Color, FrameCanvas, Rect};
pub(crate) use overlay::OverlayData;
pub(crate) use renderer::Renderer;
