use dino_engine::{Canvas, Rect};
use rand::Rng;

use super::spawn::{has_exited_left, SpawnGate};
use super::BODY_COLOR;

const CLOUD_HEIGHT: f32 = 20.0;
const CLOUD_MIN_Y: u32 = 20;
/// Clouds stay this far above the ground line.
const CLOUD_GROUND_CLEARANCE: f32 = 50.0;
const CLOUD_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 40..=80;
const CLOUD_SPEED_RANGE: std::ops::Range<f32> = 0.5..1.5;

/// Background decoration. Drifts at its own speed, independent of the
/// scroll speed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cloud {
    x: f32,
    y: f32,
    width: f32,
    speed: f32,
}

impl Cloud {
    pub(crate) fn new(x: f32, y: f32, width: f32, speed: f32) -> Self {
        Self { x, y, width, speed }
    }

    fn random<R: Rng>(rng: &mut R, x: f32, ground_y: f32) -> Self {
        let max_y = (ground_y - CLOUD_GROUND_CLEARANCE).max(CLOUD_MIN_Y as f32) as u32;
        let y = rng.random_range(CLOUD_MIN_Y..=max_y) as f32;
        let width = rng.random_range(CLOUD_WIDTH_RANGE) as f32;
        let speed = rng.random_range(CLOUD_SPEED_RANGE);
        Self::new(x, y, width, speed)
    }

    pub(crate) fn x(&self) -> f32 {
        self.x
    }

    pub(crate) fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, CLOUD_HEIGHT)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CloudPool {
    gate: SpawnGate,
    clouds: Vec<Cloud>,
}

impl CloudPool {
    pub(crate) fn new(gate: SpawnGate) -> Self {
        Self {
            gate,
            clouds: Vec::new(),
        }
    }

    pub(crate) fn try_spawn<R: Rng>(&mut self, rng: &mut R, field_width: f32, ground_y: f32) {
        let newest_x = self.clouds.last().map(Cloud::x);
        if self.gate.roll(rng, newest_x, field_width) {
            self.clouds.push(Cloud::random(rng, field_width, ground_y));
        }
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, cloud: Cloud) {
        self.clouds.push(cloud);
    }

    pub(crate) fn advance(&mut self) {
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
        }
        self.clouds.retain(|cloud| !has_exited_left(cloud.x, cloud.width));
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[Cloud] {
        &self.clouds
    }

    pub(crate) fn len(&self) -> usize {
        self.clouds.len()
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        for cloud in &self.clouds {
            canvas.fill_rect(cloud.rect(), BODY_COLOR);
        }
    }
}
