use dino_engine::{Canvas, Rect};
use rand::Rng;
use tracing::trace;

use super::spawn::{has_exited_left, SpawnGate};
use super::BODY_COLOR;

const AERIAL_BASE_LIFT: f32 = 60.0;
const AERIAL_MAX_EXTRA_LIFT: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObstacleKind {
    LowGround,
    TallGround,
    Aerial,
}

impl ObstacleKind {
    pub(crate) const ALL: [ObstacleKind; 3] = [
        ObstacleKind::LowGround,
        ObstacleKind::TallGround,
        ObstacleKind::Aerial,
    ];

    fn size(self) -> (f32, f32) {
        match self {
            ObstacleKind::LowGround => (20.0, 40.0),
            ObstacleKind::TallGround => (30.0, 50.0),
            ObstacleKind::Aerial => (40.0, 30.0),
        }
    }
}

/// Only `x` changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Obstacle {
    kind: ObstacleKind,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Obstacle {
    /// Ground kinds rest on `ground_y`; `extra_lift` only raises aerials.
    pub(crate) fn new(kind: ObstacleKind, x: f32, ground_y: f32, extra_lift: f32) -> Self {
        let (width, height) = kind.size();
        let y = match kind {
            ObstacleKind::LowGround | ObstacleKind::TallGround => ground_y - height,
            ObstacleKind::Aerial => ground_y - AERIAL_BASE_LIFT - extra_lift,
        };
        Self {
            kind,
            x,
            y,
            width,
            height,
        }
    }

    fn random<R: Rng>(rng: &mut R, x: f32, ground_y: f32) -> Self {
        let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
        let extra_lift = match kind {
            ObstacleKind::Aerial => rng.random_range(0..=AERIAL_MAX_EXTRA_LIFT) as f32,
            _ => 0.0,
        };
        Self::new(kind, x, ground_y, extra_lift)
    }

    pub(crate) fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub(crate) fn x(&self) -> f32 {
        self.x
    }

    pub(crate) fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.rect(), BODY_COLOR);
        match self.kind {
            ObstacleKind::LowGround => self.draw_side_nubs(canvas, 10.0, 5.0),
            ObstacleKind::TallGround => self.draw_side_nubs(canvas, 15.0, 8.0),
            ObstacleKind::Aerial => canvas.fill_rect(
                Rect::new(self.x + 10.0, self.y - 5.0, 15.0, 5.0),
                BODY_COLOR,
            ),
        }
    }

    fn draw_side_nubs(&self, canvas: &mut dyn Canvas, offset_y: f32, nub_height: f32) {
        let nub_y = self.y + offset_y;
        canvas.fill_rect(Rect::new(self.x - 5.0, nub_y, 5.0, nub_height), BODY_COLOR);
        canvas.fill_rect(
            Rect::new(self.x + self.width, nub_y, 5.0, nub_height),
            BODY_COLOR,
        );
    }
}

/// Live obstacles in spawn order; the newest is always last.
#[derive(Debug, Clone)]
pub(crate) struct ObstaclePool {
    gate: SpawnGate,
    obstacles: Vec<Obstacle>,
}

impl ObstaclePool {
    pub(crate) fn new(gate: SpawnGate) -> Self {
        Self {
            gate,
            obstacles: Vec::new(),
        }
    }

    /// Runs the spawn gate once; on success pushes a random kind at the
    /// right edge of the field.
    pub(crate) fn try_spawn<R: Rng>(&mut self, rng: &mut R, field_width: f32, ground_y: f32) {
        if !self.gate.roll(rng, self.newest_x(), field_width) {
            return;
        }
        let obstacle = Obstacle::random(rng, field_width, ground_y);
        trace!(kind = ?obstacle.kind(), "obstacle_spawned");
        self.obstacles.push(obstacle);
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Moves every obstacle left by `speed`, then drops the ones that left
    /// the field.
    pub(crate) fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
        self.obstacles.retain(|obstacle| !has_exited_left(obstacle.x, obstacle.width));
    }

    pub(crate) fn newest_x(&self) -> Option<f32> {
        self.obstacles.last().map(Obstacle::x)
    }

    pub(crate) fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub(crate) fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        for obstacle in &self.obstacles {
            obstacle.draw(canvas);
        }
    }
}
