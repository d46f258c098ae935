use dino_engine::{Color, Scene};

mod clouds;
mod collision;
mod config;
mod obstacles;
mod runner;
mod session;
mod spawn;

pub(crate) use config::GameConfig;
use session::GameSession;

const BACKGROUND_COLOR: Color = [255, 255, 255, 255];
const BODY_COLOR: Color = [83, 83, 83, 255];
const DETAIL_COLOR: Color = [255, 255, 255, 255];
const TEXT_COLOR: Color = [0, 0, 0, 255];

pub(crate) fn build_scene(config: GameConfig, seed: u64) -> Box<dyn Scene> {
    Box::new(GameSession::new(config, seed))
}
