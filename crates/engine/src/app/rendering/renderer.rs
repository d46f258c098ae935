use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::Scene;

use super::canvas::FrameCanvas;
use super::overlay::{draw_overlay, OverlayData};

/// Owns the pixel surface. The framebuffer stays at the logical field size and
/// is scaled to whatever the window surface currently is.
pub(crate) struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    field_width: u32,
    field_height: u32,
}

impl Renderer {
    pub(crate) fn new(
        window: Arc<Window>,
        field_width: u32,
        field_height: u32,
    ) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(
            Arc::clone(&window),
            size.width,
            size.height,
            field_width,
            field_height,
        )?;
        Ok(Self {
            window,
            pixels,
            field_width,
            field_height,
        })
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(
            Arc::clone(&self.window),
            width,
            height,
            self.field_width,
            self.field_height,
        )?;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        surface_width: u32,
        surface_height: u32,
        field_width: u32,
        field_height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(surface_width, surface_height, window);
        Pixels::new(field_width, field_height, surface)
    }

    /// Draws one full frame and presents it.
    pub(crate) fn render_frame(
        &mut self,
        scene: &dyn Scene,
        overlay: Option<&OverlayData>,
    ) -> Result<(), Error> {
        {
            let mut canvas =
                FrameCanvas::new(self.pixels.frame_mut(), self.field_width, self.field_height);
            scene.render(&mut canvas);
            if let Some(data) = overlay {
                draw_overlay(&mut canvas, data);
            }
        }
        self.pixels.render()
    }
}
