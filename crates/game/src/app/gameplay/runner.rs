use dino_engine::{Canvas, Rect};

use super::config::GameConfig;
use super::{BODY_COLOR, DETAIL_COLOR};

const EYE_SIZE: f32 = 5.0;
const EYE_INSET_X: f32 = 10.0;
const EYE_INSET_Y: f32 = 10.0;
const LEG_WIDTH: f32 = 8.0;
const LEG_HEIGHT: f32 = 10.0;
const LEG_INSET: f32 = 5.0;

/// The player body. x is fixed; only the vertical state changes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Runner {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    standing_height: f32,
    duck_height: f32,
    vel_y: f32,
    airborne: bool,
    ducking: bool,
    ground_y: f32,
    gravity: f32,
    jump_strength: f32,
}

impl Runner {
    /// Standing on the ground line, at rest.
    pub(crate) fn new(config: &GameConfig) -> Self {
        let ground_y = config.ground_y();
        Self {
            x: config.runner_x,
            y: ground_y - config.runner_height,
            width: config.runner_width,
            height: config.runner_height,
            standing_height: config.runner_height,
            duck_height: config.runner_duck_height,
            vel_y: 0.0,
            airborne: false,
            ducking: false,
            ground_y,
            gravity: config.gravity,
            jump_strength: config.jump_strength,
        }
    }

    pub(crate) fn jump(&mut self) {
        if self.airborne {
            return;
        }
        self.vel_y = -self.jump_strength;
        self.airborne = true;
    }

    /// Snaps the body to the ground at the new height, also mid-air.
    pub(crate) fn set_ducking(&mut self, ducking: bool) {
        self.ducking = ducking;
        self.height = if ducking {
            self.duck_height
        } else {
            self.standing_height
        };
        self.y = self.ground_y - self.height;
    }

    pub(crate) fn tick(&mut self) {
        self.vel_y += self.gravity;
        self.y += self.vel_y;

        let rest_y = self.ground_y - self.height;
        if self.y >= rest_y {
            self.y = rest_y;
            self.vel_y = 0.0;
            self.airborne = false;
        }
    }

    pub(crate) fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[cfg(test)]
    pub(crate) fn is_airborne(&self) -> bool {
        self.airborne
    }

    #[cfg(test)]
    pub(crate) fn is_ducking(&self) -> bool {
        self.ducking
    }

    #[cfg(test)]
    pub(crate) fn vel_y(&self) -> f32 {
        self.vel_y
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.hitbox(), BODY_COLOR);
        canvas.fill_rect(
            Rect::new(
                self.x + self.width - EYE_INSET_X,
                self.y + EYE_INSET_Y,
                EYE_SIZE,
                EYE_SIZE,
            ),
            DETAIL_COLOR,
        );

        if self.ducking {
            return;
        }
        let leg_y = self.y + self.height - LEG_INSET;
        canvas.fill_rect(
            Rect::new(self.x + LEG_INSET, leg_y, LEG_WIDTH, LEG_HEIGHT),
            BODY_COLOR,
        );
        canvas.fill_rect(
            Rect::new(
                self.x + self.width - LEG_INSET - LEG_WIDTH,
                leg_y,
                LEG_WIDTH,
                LEG_HEIGHT,
            ),
            BODY_COLOR,
        );
    }
}
