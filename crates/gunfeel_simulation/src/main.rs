//! Headless симуляция GUNFEEL
//!
//! Прогоняет scripted input (бег, прыжки, стрельба) без рендера.
//! Использование: `gunfeel_simulation [config.ron]`

use bevy::prelude::*;
use gunfeel_simulation::{create_headless_app, log_error, log_info, spawn_player_in_world, GameConfig, PlayerController};

const TICKS: u32 = 600;

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);

    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Falling back to default config: {}", err));
                GameConfig::default()
            }
        },
        None => GameConfig::default(),
    };

    log_info(&format!("Starting GUNFEEL headless simulation (seed: {})", seed));
    let entities = spawn_player_in_world(app.world_mut(), &config, Vec3::ZERO, 0.0);

    for tick in 0..TICKS {
        if let Some(mut controller) = app.world_mut().get_mut::<PlayerController>(entities.player) {
            let input = controller.input_mut();
            // Вперёд с лёгким strafe, прыжок раз в 2с, выстрел раз в 0.25с
            input.movement = Vec2::new(((tick as f32) * 0.02).sin() * 0.5, 1.0);
            input.look_delta = Vec2::new(0.0, 0.2);
            input.jump = tick % 120 == 60;
            input.fire_pressed = tick % 15 == 0;
        }

        app.update();

        if tick % 60 == 0 {
            if let Some(controller) = app.world().get::<PlayerController>(entities.player) {
                let view = controller.view();
                let weapon = controller.weapon();
                log_info(&format!(
                    "Tick {}: view {:?}, weapon offset {:?}, recoil events {}",
                    tick,
                    view.translation,
                    weapon.pose().translation - weapon.rest_pose().translation,
                    weapon.recoil_count()
                ));
            }
        }
    }

    log_info("Simulation complete!");
}
