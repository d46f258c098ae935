use dino_engine::{Canvas, InputEvent, InputSnapshot, Key, KeyState, Rect, Scene, SceneCommand};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use tracing::{debug, info};

use super::clouds::CloudPool;
use super::collision::first_hit;
use super::config::GameConfig;
use super::obstacles::ObstaclePool;
use super::runner::Runner;
use super::spawn::SpawnGate;
use super::{BACKGROUND_COLOR, BODY_COLOR, DETAIL_COLOR, TEXT_COLOR};

const GROUND_DASH_SPACING: usize = 30;
const GROUND_DASH_WIDTH: f32 = 15.0;
const GROUND_DASH_HEIGHT: f32 = 5.0;
const HUD_RIGHT_MARGIN: f32 = 150.0;
const HUD_SCORE_Y: i32 = 20;
const HUD_SPEED_Y: i32 = 50;
const GAME_OVER_LINE_SPACING: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Active,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Jump,
    DuckBegin,
    DuckEnd,
    Restart,
    Quit,
}

/// Maps one key transition to a command for the current phase. Keys with no
/// meaning in that phase yield `None`.
pub(crate) fn command_for(event: InputEvent, phase: Phase) -> Option<Command> {
    match (phase, event.key, event.state) {
        (_, Key::Escape, KeyState::Pressed) => Some(Command::Quit),
        (Phase::Active, Key::Space | Key::ArrowUp, KeyState::Pressed) => Some(Command::Jump),
        (Phase::Active, Key::ArrowDown, KeyState::Pressed) => Some(Command::DuckBegin),
        (Phase::Active, Key::ArrowDown, KeyState::Released) => Some(Command::DuckEnd),
        (Phase::GameOver, Key::Space, KeyState::Pressed) => Some(Command::Restart),
        _ => None,
    }
}

/// One play session: the runner, both pools, score, scroll speed and the
/// Active/GameOver phase. Restart rebuilds all of it in place.
pub(crate) struct GameSession {
    config: GameConfig,
    seed: u64,
    rng: Pcg32,
    runner: Runner,
    obstacles: ObstaclePool,
    clouds: CloudPool,
    score: u64,
    speed: f32,
    phase: Phase,
    restarts: u32,
}

impl GameSession {
    pub(crate) fn new(config: GameConfig, seed: u64) -> Self {
        let runner = Runner::new(&config);
        let obstacles = ObstaclePool::new(obstacle_gate(&config));
        let clouds = CloudPool::new(cloud_gate(&config));
        let speed = config.base_speed;
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            runner,
            obstacles,
            clouds,
            score: 0,
            speed,
            phase: Phase::Active,
            restarts: 0,
        }
    }

    /// Full reset. The RNG keeps its stream so runs differ across restarts.
    fn restart(&mut self) {
        self.runner = Runner::new(&self.config);
        self.obstacles = ObstaclePool::new(obstacle_gate(&self.config));
        self.clouds = CloudPool::new(cloud_gate(&self.config));
        self.score = 0;
        self.speed = self.config.base_speed;
        self.phase = Phase::Active;
        self.restarts = self.restarts.saturating_add(1);
        info!(restarts = self.restarts, "session_restarted");
    }

    /// Applies queued commands in arrival order. Events after a restart are
    /// mapped against the fresh Active session.
    fn apply_input(&mut self, input: &InputSnapshot) -> FrameInput {
        let mut restarted = false;
        for event in input.events() {
            let Some(command) = command_for(*event, self.phase) else {
                continue;
            };
            match command {
                Command::Quit => return FrameInput::Quit,
                Command::Jump => self.runner.jump(),
                Command::DuckBegin => self.runner.set_ducking(true),
                Command::DuckEnd => self.runner.set_ducking(false),
                Command::Restart => {
                    self.restart();
                    restarted = true;
                }
            }
        }
        if restarted {
            FrameInput::Restarted
        } else {
            FrameInput::Continue
        }
    }

    /// Integrate, spawn, scroll, collide, then score. A colliding frame ends
    /// the session without scoring.
    fn simulate_frame(&mut self) {
        let field_width = self.config.field_width;
        let ground_y = self.config.ground_y();

        self.runner.tick();

        self.obstacles.try_spawn(&mut self.rng, field_width, ground_y);
        self.clouds.try_spawn(&mut self.rng, field_width, ground_y);

        self.obstacles.advance(self.speed);
        self.clouds.advance();

        if let Some(index) = first_hit(self.runner.hitbox(), self.obstacles.as_slice()) {
            self.phase = Phase::GameOver;
            let kind = self.obstacles.as_slice()[index].kind();
            info!(
                score = self.score,
                speed = self.speed,
                obstacle = ?kind,
                live_obstacles = self.obstacles.len(),
                "game_over"
            );
            return;
        }

        self.score += 1;
        let interval = self.config.speed_ramp_interval;
        if interval > 0 && self.score % interval == 0 {
            self.speed += self.config.speed_increment;
            debug!(score = self.score, speed = self.speed, "speed_ramp");
        }
    }

    fn draw_ground(&self, canvas: &mut dyn Canvas) {
        let ground_y = self.config.ground_y();
        canvas.fill_rect(
            Rect::new(0.0, ground_y, self.config.field_width, self.config.ground_height),
            BODY_COLOR,
        );
        let field_width = self.config.field_width.max(0.0) as usize;
        for dash_x in (0..field_width).step_by(GROUND_DASH_SPACING) {
            canvas.fill_rect(
                Rect::new(dash_x as f32, ground_y, GROUND_DASH_WIDTH, GROUND_DASH_HEIGHT),
                DETAIL_COLOR,
            );
        }
    }

    fn draw_hud(&self, canvas: &mut dyn Canvas) {
        let hud_x = (self.config.field_width - HUD_RIGHT_MARGIN) as i32;
        canvas.draw_text(
            &format!("Score: {}", self.score),
            hud_x,
            HUD_SCORE_Y,
            TEXT_COLOR,
        );
        canvas.draw_text(
            &format!("Speed: {:.1}", self.speed),
            hud_x,
            HUD_SPEED_Y,
            TEXT_COLOR,
        );
    }

    fn draw_game_over(&self, canvas: &mut dyn Canvas) {
        canvas.clear(BACKGROUND_COLOR);

        let center_x = (self.config.field_width / 2.0) as i32;
        let center_y = (self.config.field_height / 2.0) as i32;
        let lines = [
            "GAME OVER".to_string(),
            format!("Score: {}", self.score),
            "Press SPACE to restart".to_string(),
        ];
        for (row, line) in (-1..).zip(lines.iter()) {
            let x = center_x - canvas.text_width(line) / 2;
            let y = center_y + row * GAME_OVER_LINE_SPACING;
            canvas.draw_text(line, x, y, TEXT_COLOR);
        }
    }
}

#[cfg(test)]
impl GameSession {
    pub(crate) fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn speed(&self) -> f32 {
        self.speed
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn runner(&self) -> &Runner {
        &self.runner
    }

    pub(crate) fn obstacles(&self) -> &ObstaclePool {
        &self.obstacles
    }

    pub(crate) fn clouds(&self) -> &CloudPool {
        &self.clouds
    }

    pub(crate) fn obstacles_mut(&mut self) -> &mut ObstaclePool {
        &mut self.obstacles
    }

    pub(crate) fn clouds_mut(&mut self) -> &mut CloudPool {
        &mut self.clouds
    }
}

enum FrameInput {
    Continue,
    Restarted,
    Quit,
}

fn obstacle_gate(config: &GameConfig) -> SpawnGate {
    SpawnGate {
        chance: config.obstacle_spawn_chance,
        min_gap: config.obstacle_min_gap,
    }
}

fn cloud_gate(config: &GameConfig) -> SpawnGate {
    SpawnGate {
        chance: config.cloud_spawn_chance,
        min_gap: config.cloud_min_gap,
    }
}

impl Scene for GameSession {
    fn load(&mut self) {
        info!(
            seed = self.seed,
            base_speed = self.config.base_speed,
            field_width = self.config.field_width,
            field_height = self.config.field_height,
            "session_started"
        );
    }

    fn update(&mut self, input: &InputSnapshot) -> SceneCommand {
        match self.apply_input(input) {
            FrameInput::Quit => {
                info!(score = self.score, phase = ?self.phase, "quit_requested");
                return SceneCommand::Quit;
            }
            FrameInput::Restarted => return SceneCommand::None,
            FrameInput::Continue => {}
        }

        if self.phase == Phase::Active {
            self.simulate_frame();
        }
        SceneCommand::None
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        if self.phase == Phase::GameOver {
            self.draw_game_over(canvas);
            return;
        }

        canvas.clear(BACKGROUND_COLOR);
        self.draw_ground(canvas);
        self.clouds.draw(canvas);
        self.runner.draw(canvas);
        self.obstacles.draw(canvas);
        self.draw_hud(canvas);
    }

    fn unload(&mut self) {
        info!(score = self.score, restarts = self.restarts, "session_ended");
    }

    fn debug_title(&self) -> Option<String> {
        match self.phase {
            Phase::Active => None,
            Phase::GameOver => Some(format!("Dino Run - Game Over ({})", self.score)),
        }
    }

    fn debug_entity_count(&self) -> usize {
        1 + self.obstacles.len() + self.clouds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gameplay::clouds::Cloud;
    use crate::app::gameplay::obstacles::{Obstacle, ObstacleKind};
    use crate::app::gameplay::test_support::{DrawOp, RecordingCanvas};

    fn quiet_config() -> GameConfig {
        GameConfig {
            obstacle_spawn_chance: 0.0,
            cloud_spawn_chance: 0.0,
            ..GameConfig::default()
        }
    }

    fn press(key: Key) -> InputSnapshot {
        InputSnapshot::empty().with_event(InputEvent::pressed(key))
    }

    fn step(session: &mut GameSession, frames: usize) {
        for _ in 0..frames {
            assert_eq!(session.update(&InputSnapshot::empty()), SceneCommand::None);
        }
    }

    fn step_until_game_over(session: &mut GameSession, max_frames: usize) {
        for _ in 0..max_frames {
            session.update(&InputSnapshot::empty());
            if session.phase() == Phase::GameOver {
                return;
            }
        }
    }

    fn crash(session: &mut GameSession) {
        session
            .obstacles_mut()
            .push(Obstacle::new(ObstacleKind::LowGround, 60.0, 200.0, 0.0));
        session.update(&InputSnapshot::empty());
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn new_session_starts_active_at_base_speed() {
        let session = GameSession::new(GameConfig::default(), 1);
        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.speed(), 8.0);
        assert_eq!(session.obstacles().len(), 0);
        assert_eq!(session.clouds().len(), 0);
        assert_eq!(session.debug_entity_count(), 1);
    }

    #[test]
    fn input_mapping_depends_on_phase() {
        use Phase::{Active, GameOver};

        let cases = [
            (InputEvent::pressed(Key::Space), Active, Some(Command::Jump)),
            (InputEvent::pressed(Key::ArrowUp), Active, Some(Command::Jump)),
            (InputEvent::pressed(Key::ArrowDown), Active, Some(Command::DuckBegin)),
            (InputEvent::released(Key::ArrowDown), Active, Some(Command::DuckEnd)),
            (InputEvent::pressed(Key::Escape), Active, Some(Command::Quit)),
            (InputEvent::released(Key::Space), Active, None),
            (InputEvent::pressed(Key::Space), GameOver, Some(Command::Restart)),
            (InputEvent::pressed(Key::ArrowUp), GameOver, None),
            (InputEvent::pressed(Key::ArrowDown), GameOver, None),
            (InputEvent::pressed(Key::Escape), GameOver, Some(Command::Quit)),
        ];
        for (event, phase, expected) in cases {
            assert_eq!(command_for(event, phase), expected, "{event:?} in {phase:?}");
        }
    }

    #[test]
    fn each_active_frame_scores_once() {
        let mut session = GameSession::new(quiet_config(), 1);
        step(&mut session, 42);
        assert_eq!(session.score(), 42);
    }

    #[test]
    fn speed_ramps_exactly_once_per_threshold() {
        let mut session = GameSession::new(quiet_config(), 1);

        step(&mut session, 99);
        assert_eq!(session.speed(), 8.0);
        step(&mut session, 1);
        assert_eq!(session.speed(), 8.5);
        step(&mut session, 99);
        assert_eq!(session.speed(), 8.5);
        step(&mut session, 1);
        assert_eq!(session.speed(), 9.0);
        step(&mut session, 50);

        assert_eq!(session.score(), 250);
        assert_eq!(session.speed(), 9.0);
    }

    #[test]
    fn jump_command_lifts_runner_this_frame() {
        let mut session = GameSession::new(quiet_config(), 1);
        session.update(&press(Key::ArrowUp));
        assert_eq!(session.runner().hitbox().y, 143.0);
        assert!(session.runner().is_airborne());
    }

    #[test]
    fn duck_press_and_release_change_hitbox() {
        let mut session = GameSession::new(quiet_config(), 1);

        session.update(&press(Key::ArrowDown));
        assert_eq!(session.runner().hitbox().h, 20.0);

        session.update(&InputSnapshot::empty().with_event(InputEvent::released(Key::ArrowDown)));
        assert_eq!(session.runner().hitbox(), Rect::new(50.0, 160.0, 40.0, 40.0));
    }

    #[test]
    fn collision_freezes_the_session_without_scoring() {
        let mut session = GameSession::new(quiet_config(), 1);
        step(&mut session, 10);
        crash(&mut session);

        assert_eq!(session.score(), 10);
        step(&mut session, 30);
        assert_eq!(session.score(), 10);
        assert_eq!(session.obstacles().as_slice()[0].x(), 52.0);
    }

    #[test]
    fn collision_uses_positions_after_this_frames_advance() {
        let mut session = GameSession::new(quiet_config(), 1);
        session
            .obstacles_mut()
            .push(Obstacle::new(ObstacleKind::LowGround, 97.0, 200.0, 0.0));

        session.update(&InputSnapshot::empty());

        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.score(), 0);
        assert_eq!(session.obstacles().as_slice()[0].x(), 89.0);
    }

    #[test]
    fn ducking_runner_passes_under_aerial() {
        let mut session = GameSession::new(quiet_config(), 1);
        session
            .obstacles_mut()
            .push(Obstacle::new(ObstacleKind::Aerial, 200.0, 200.0, 0.0));

        session.update(&press(Key::ArrowDown));
        for _ in 0..40 {
            session.update(&InputSnapshot::empty());
            assert_eq!(session.phase(), Phase::Active);
        }

        assert_eq!(session.score(), 41);
        assert_eq!(session.obstacles().len(), 0);
    }

    #[test]
    fn standing_runner_hits_aerial() {
        let mut session = GameSession::new(quiet_config(), 1);
        session
            .obstacles_mut()
            .push(Obstacle::new(ObstacleKind::Aerial, 200.0, 200.0, 0.0));

        step_until_game_over(&mut session, 40);

        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn jump_keys_are_ignored_while_game_over() {
        let mut session = GameSession::new(quiet_config(), 1);
        crash(&mut session);

        session.update(&press(Key::ArrowUp));
        assert_eq!(session.phase(), Phase::GameOver);
        assert!(!session.runner().is_airborne());
    }

    #[test]
    fn restart_after_game_over_resets_everything() {
        let mut session = GameSession::new(quiet_config(), 1);
        step(&mut session, 137);
        crash(&mut session);
        assert_eq!(session.score(), 137);
        assert_eq!(session.speed(), 8.5);

        assert_eq!(session.update(&press(Key::Space)), SceneCommand::None);

        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.speed(), 8.0);
        assert_eq!(session.obstacles().len(), 0);
        assert_eq!(session.clouds().len(), 0);
        assert_eq!(session.runner().hitbox(), Rect::new(50.0, 160.0, 40.0, 40.0));
        assert!(!session.runner().is_airborne());
    }

    #[test]
    fn restart_clears_live_clouds() {
        let mut session = GameSession::new(quiet_config(), 1);
        session
            .clouds_mut()
            .push(Cloud::new(400.0, 60.0, 50.0, 1.0));
        session
            .clouds_mut()
            .push(Cloud::new(700.0, 90.0, 70.0, 0.5));
        step(&mut session, 3);
        crash(&mut session);
        assert_eq!(session.clouds().len(), 2);

        session.update(&press(Key::Space));

        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.clouds().len(), 0);
        assert_eq!(session.debug_entity_count(), 1);
    }

    #[test]
    fn space_while_active_is_a_jump_not_a_restart() {
        let mut session = GameSession::new(quiet_config(), 1);
        step(&mut session, 5);
        session.update(&press(Key::Space));
        assert_eq!(session.score(), 6);
        assert!(session.runner().is_airborne());
    }

    #[test]
    fn escape_quits_in_both_phases() {
        let mut session = GameSession::new(quiet_config(), 1);
        assert_eq!(session.update(&press(Key::Escape)), SceneCommand::Quit);
        assert_eq!(session.score(), 0);

        crash(&mut session);
        assert_eq!(session.update(&press(Key::Escape)), SceneCommand::Quit);
    }

    #[test]
    fn same_seed_produces_same_run() {
        let mut a = GameSession::new(GameConfig::default(), 2024);
        let mut b = GameSession::new(GameConfig::default(), 2024);
        for _ in 0..600 {
            a.update(&InputSnapshot::empty());
            b.update(&InputSnapshot::empty());
        }
        assert_eq!(a.score(), b.score());
        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.obstacles().as_slice(), b.obstacles().as_slice());
        assert_eq!(a.clouds().as_slice(), b.clouds().as_slice());
    }

    #[test]
    fn active_frame_draws_back_to_front() {
        let mut session = GameSession::new(quiet_config(), 1);
        step(&mut session, 3);
        session
            .obstacles_mut()
            .push(Obstacle::new(ObstacleKind::TallGround, 600.0, 200.0, 0.0));

        let mut canvas = RecordingCanvas::default();
        session.render(&mut canvas);

        let ground = DrawOp::Rect(Rect::new(0.0, 200.0, 800.0, 100.0), BODY_COLOR);
        let runner_body = DrawOp::Rect(session.runner().hitbox(), BODY_COLOR);
        let obstacle_body = DrawOp::Rect(Rect::new(600.0, 150.0, 30.0, 50.0), BODY_COLOR);

        assert_eq!(canvas.ops[0], DrawOp::Clear(BACKGROUND_COLOR));
        assert_eq!(canvas.ops[1], ground);
        let dashes = canvas.ops[2..]
            .iter()
            .take_while(|op| matches!(op, DrawOp::Rect(_, color) if *color == DETAIL_COLOR))
            .count();
        assert_eq!(dashes, 27);

        let position = |needle: &DrawOp| canvas.ops.iter().position(|op| op == needle);
        let runner_at = position(&runner_body).expect("runner drawn");
        let obstacle_at = position(&obstacle_body).expect("obstacle drawn");
        assert!(runner_at < obstacle_at);

        let texts = canvas.texts();
        assert_eq!(
            texts,
            vec![
                ("Score: 3".to_string(), 650, 20),
                ("Speed: 8.0".to_string(), 650, 50),
            ]
        );
        assert!(matches!(canvas.ops.last(), Some(DrawOp::Text(..))));
    }

    #[test]
    fn game_over_frame_shows_centered_summary() {
        let mut session = GameSession::new(quiet_config(), 1);
        step(&mut session, 12);
        crash(&mut session);

        let mut canvas = RecordingCanvas::default();
        session.render(&mut canvas);

        assert_eq!(canvas.ops[0], DrawOp::Clear(BACKGROUND_COLOR));
        let texts = canvas.texts();
        let lines: Vec<&str> = texts.iter().map(|(text, _, _)| text.as_str()).collect();
        assert_eq!(lines, vec!["GAME OVER", "Score: 12", "Press SPACE to restart"]);

        let ys: Vec<i32> = texts.iter().map(|(_, _, y)| *y).collect();
        assert_eq!(ys, vec![100, 150, 200]);
        for (text, x, _) in &texts {
            assert_eq!(*x, 400 - canvas.text_width(text) / 2);
        }
        assert_eq!(
            session.debug_title().as_deref(),
            Some("Dino Run - Game Over (12)")
        );
    }
}
