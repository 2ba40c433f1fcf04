use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use gunfeel_simulation::{LocomotionSet, PlayerController};

/// Пиксели мыши → единицы look delta (дальше умножается на look_sensitivity)
const MOUSE_SCALE: f32 = 0.01;

pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, grab_cursor)
            .add_systems(Update, (
                toggle_cursor_grab,
                write_player_input,
            ).chain().before(LocomotionSet::Drive));
    }
}

/// Marker: PlayerController, который читает клавиатуру/мышь
#[derive(Component)]
pub struct LocalPlayer;

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.single_mut() {
        set_grab(&mut window, true);
    }
}

/// Esc отпускает курсор, клик захватывает обратно
fn toggle_cursor_grab(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    if keys.just_pressed(KeyCode::Escape) {
        set_grab(&mut window, false);
    } else if mouse_buttons.just_pressed(MouseButton::Left) && !is_grabbed(&window) {
        set_grab(&mut window, true);
    }
}

fn set_grab(window: &mut Window, grabbed: bool) {
    window.cursor_options.grab_mode = if grabbed {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    window.cursor_options.visible = !grabbed;
}

fn is_grabbed(window: &Window) -> bool {
    window.cursor_options.grab_mode != CursorGrabMode::None
}

/// Snapshot устройств → InputState локального игрока
///
/// Без захваченного курсора игрок только ходит: ни поворота, ни выстрелов.
fn write_player_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut players: Query<&mut PlayerController, With<LocalPlayer>>,
) {
    let grabbed = windows.single().map(is_grabbed).unwrap_or(false);

    let mouse_delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    // Мышь: +x вправо, +y вниз → look: x = pitch вверх, y = yaw вправо
    let look_delta = if grabbed {
        Vec2::new(-mouse_delta.y, mouse_delta.x) * MOUSE_SCALE
    } else {
        Vec2::ZERO
    };

    let movement = Vec2::new(
        axis(&keys, KeyCode::KeyD, KeyCode::KeyA),
        axis(&keys, KeyCode::KeyW, KeyCode::KeyS),
    );

    for mut controller in players.iter_mut() {
        let automatic = controller.weapon().definition().automatic;
        let input = controller.input_mut();

        input.movement = movement;
        input.look_delta = look_delta;
        input.jump = keys.pressed(KeyCode::Space);
        input.fire_held = grabbed && mouse_buttons.pressed(MouseButton::Left);
        // Автоматическое оружие стреляет всё время, пока курок зажат (cooldown решает темп)
        input.fire_pressed = grabbed
            && (mouse_buttons.just_pressed(MouseButton::Left) || (automatic && input.fire_held));
    }
}

fn axis(keys: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f32 {
    let mut value = 0.0;
    if keys.pressed(positive) {
        value += 1.0;
    }
    if keys.pressed(negative) {
        value -= 1.0;
    }
    value
}
