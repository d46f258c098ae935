use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use dino_engine::{LoopConfig, Scene};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, GameConfig};

const SEED_ENV_VAR: &str = "DINO_SEED";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Dino Run Startup ===");

    let game_config = GameConfig::default();
    let seed = resolve_seed(env::var(SEED_ENV_VAR));
    info!(seed, "rng_seeded");

    let config = LoopConfig {
        field_width: game_config.field_width as u32,
        field_height: game_config.field_height as u32,
        ..LoopConfig::default()
    };

    AppWiring {
        config,
        scene: gameplay::build_scene(game_config, seed),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn resolve_seed(raw: Result<String, env::VarError>) -> u64 {
    match raw {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                warn!(
                    env_var = SEED_ENV_VAR,
                    value = value.as_str(),
                    "invalid seed env var value; using time-derived seed"
                );
                time_seed()
            }
        },
        Err(env::VarError::NotPresent) => time_seed(),
        Err(err) => {
            warn!(
                env_var = SEED_ENV_VAR,
                error = %err,
                "unable to read seed env var; using time-derived seed"
            );
            time_seed()
        }
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
