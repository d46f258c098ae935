/// Gameplay tunables in field pixels and per-frame units.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub ground_height: f32,
    pub runner_x: f32,
    pub runner_width: f32,
    pub runner_height: f32,
    pub runner_duck_height: f32,
    pub gravity: f32,
    pub jump_strength: f32,
    pub base_speed: f32,
    pub speed_increment: f32,
    pub speed_ramp_interval: u64,
    pub obstacle_spawn_chance: f32,
    pub obstacle_min_gap: f32,
    pub cloud_spawn_chance: f32,
    pub cloud_min_gap: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 300.0,
            ground_height: 100.0,
            runner_x: 50.0,
            runner_width: 40.0,
            runner_height: 40.0,
            runner_duck_height: 20.0,
            gravity: 1.0,
            jump_strength: 18.0,
            base_speed: 8.0,
            speed_increment: 0.5,
            speed_ramp_interval: 100,
            obstacle_spawn_chance: 0.02,
            obstacle_min_gap: 300.0,
            cloud_spawn_chance: 0.01,
            cloud_min_gap: 200.0,
        }
    }
}

impl GameConfig {
    /// y of the ground line; everything stands on it.
    pub(crate) fn ground_y(&self) -> f32 {
        self.field_height - self.ground_height
    }
}
