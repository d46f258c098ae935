use crate::app::LoopMetricsSnapshot;

use super::canvas::{Canvas, Color, Rect};
use super::font::{LINE_ADVANCE, TEXT_SCALE};

const OVERLAY_PADDING: i32 = 4 * TEXT_SCALE;
const OVERLAY_PANEL_INSET: i32 = 2 * TEXT_SCALE;
const OVERLAY_TEXT_COLOR: Color = [244, 248, 252, 255];
const OVERLAY_PANEL_BG_COLOR: Color = [10, 12, 16, 255];

#[derive(Debug, Clone)]
pub(crate) struct OverlayData {
    pub metrics: LoopMetricsSnapshot,
    pub target_fps: u32,
    pub slow_frame_delay_ms: u64,
    pub entity_count: usize,
}

pub(crate) fn draw_overlay(canvas: &mut dyn Canvas, data: &OverlayData) {
    let lines = build_overlay_lines(data);
    let longest = lines
        .iter()
        .map(|line| canvas.text_width(line))
        .max()
        .unwrap_or(0);

    let panel_left = OVERLAY_PADDING - OVERLAY_PANEL_INSET;
    let panel_top = OVERLAY_PADDING - OVERLAY_PANEL_INSET;
    canvas.fill_rect(
        Rect::new(
            panel_left as f32,
            panel_top as f32,
            (longest + OVERLAY_PANEL_INSET * 2) as f32,
            (lines.len() as i32 * LINE_ADVANCE + OVERLAY_PANEL_INSET) as f32,
        ),
        OVERLAY_PANEL_BG_COLOR,
    );

    let mut y = OVERLAY_PADDING;
    for line in &lines {
        canvas.draw_text(line, OVERLAY_PADDING, y, OVERLAY_TEXT_COLOR);
        y += LINE_ADVANCE;
    }
}

fn build_overlay_lines(data: &OverlayData) -> Vec<String> {
    vec![
        format_fps_line(data.metrics.fps, data.target_fps, data.slow_frame_delay_ms),
        format!("TPS {:.1}", data.metrics.tps),
        format!(
            "FRAME {:.2} MS MAX {:.2}",
            data.metrics.frame_time_ms, data.metrics.worst_frame_ms
        ),
        format!("ENTITIES {}", data.entity_count),
    ]
}

fn format_fps_line(fps: f32, target_fps: u32, slow_frame_delay_ms: u64) -> String {
    let cap = if target_fps == 0 {
        "OFF".to_string()
    } else {
        target_fps.to_string()
    };
    if slow_frame_delay_ms > 0 {
        format!("FPS {fps:.1} CAP {cap} SLOW {slow_frame_delay_ms}MS")
    } else {
        format!("FPS {fps:.1} CAP {cap}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FrameCanvas;

    fn sample_data() -> OverlayData {
        OverlayData {
            metrics: LoopMetricsSnapshot {
                fps: 59.94,
                tps: 60.0,
                frame_time_ms: 16.68,
                worst_frame_ms: 21.5,
            },
            target_fps: 60,
            slow_frame_delay_ms: 0,
            entity_count: 7,
        }
    }

    #[test]
    fn fps_line_formats_cap_and_debug_delay() {
        assert_eq!(format_fps_line(59.94, 60, 0), "FPS 59.9 CAP 60");
        assert_eq!(format_fps_line(30.0, 0, 25), "FPS 30.0 CAP OFF SLOW 25MS");
    }

    #[test]
    fn overlay_lines_include_entity_count() {
        let lines = build_overlay_lines(&sample_data());
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "TPS 60.0");
        assert_eq!(lines[2], "FRAME 16.68 MS MAX 21.50");
        assert_eq!(lines[3], "ENTITIES 7");
    }

    #[test]
    fn draw_overlay_writes_backing_panel() {
        let mut frame = vec![0u8; 400 * 100 * 4];
        let mut canvas = FrameCanvas::new(&mut frame, 400, 100);
        draw_overlay(&mut canvas, &sample_data());

        let panel_origin = ((OVERLAY_PADDING - OVERLAY_PANEL_INSET) as usize) * (400 + 1) * 4;
        assert_eq!(&frame[panel_origin..panel_origin + 4], &OVERLAY_PANEL_BG_COLOR);
        assert!(frame.chunks_exact(4).any(|px| px == OVERLAY_TEXT_COLOR));
    }

    #[test]
    fn tiny_canvas_is_safe() {
        let mut frame = vec![0u8; 4];
        let mut canvas = FrameCanvas::new(&mut frame, 1, 1);
        draw_overlay(&mut canvas, &sample_data());
        assert_eq!(frame.len(), 4);
    }
}
