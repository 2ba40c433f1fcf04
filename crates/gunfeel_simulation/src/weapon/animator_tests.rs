//! Tests for weapon animator.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bevy::prelude::*;
    use crate::weapon::*;

    const DT: f32 = 1.0 / 60.0;

    fn rifle() -> WeaponAnimator {
        Arc::new(WeaponDefinition::default()).instantiate(Transform::from_xyz(0.15, 0.0, 0.0))
    }

    fn run_frames(weapon: &mut WeaponAnimator, frames: usize, velocity: Vec3, rate: Vec2, grounded: bool) {
        for _ in 0..frames {
            weapon.tick(DT);
            weapon.animate(velocity, 15.0, rate, grounded, DT);
        }
    }

    #[test]
    fn test_pose_is_rest_before_first_frame() {
        let definition = Arc::new(WeaponDefinition {
            vertical_offset: -0.2,
            depth_offset: 0.3,
            ..default()
        });
        let weapon = definition.instantiate(Transform::from_xyz(0.15, 0.0, 0.0));

        assert!((weapon.rest_pose().translation - Vec3::new(0.15, -0.2, -0.3)).length() < 1e-6);
        assert_eq!(weapon.pose(), weapon.rest_pose());
        assert_eq!(weapon.recoil_count(), 0);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut weapon = rifle();

        assert!(weapon.fire());
        weapon.tick(0.05);
        assert!(!weapon.fire(), "0.05s < 1/fire_rate");
        weapon.tick(0.06);
        assert!(weapon.fire());

        assert_eq!(weapon.recoil_count(), 2);
    }

    #[test]
    fn test_fire_after_exact_interval() {
        let mut weapon = rifle();

        assert!(weapon.fire());
        weapon.tick(0.1);
        assert!(weapon.fire());
    }

    #[test]
    fn test_fire_schedule_over_frames() {
        // fire_rate 10, попытки в t = 0, 0.05, 0.11 → выстрелы в 0 и 0.11
        let mut weapon = rifle();
        let dt = 0.01;
        let mut fired_at = Vec::new();

        for frame in 0..20 {
            weapon.tick(dt);
            if matches!(frame, 0 | 5 | 11) && weapon.fire() {
                fired_at.push(frame);
            }
            weapon.animate(Vec3::ZERO, 15.0, Vec2::ZERO, true, dt);
        }

        assert_eq!(fired_at, vec![0, 11]);
    }

    #[test]
    fn test_recoil_layer_kicks_up_at_curve_peak() {
        let mut weapon = rifle();
        weapon.fire();

        // Пик default кривой в t = 0.05
        weapon.animate(Vec3::ZERO, 15.0, Vec2::ZERO, true, 0.05);

        let recoil = weapon.layers().recoil;
        assert!((recoil.rotation.x - 60.0).abs() < 1e-3, "pitch = {}", recoil.rotation.x);
        assert!((recoil.translation.y - 0.03).abs() < 1e-5);
        assert!((recoil.translation.z - 0.03).abs() < 1e-5);
    }

    #[test]
    fn test_recoil_events_drain_after_duration() {
        let mut weapon = rifle();
        weapon.fire();

        for _ in 0..8 {
            weapon.animate(Vec3::ZERO, 15.0, Vec2::ZERO, true, 0.05);
        }
        assert_eq!(weapon.recoil_count(), 0);

        weapon.animate(Vec3::ZERO, 15.0, Vec2::ZERO, true, 0.05);
        assert_eq!(weapon.layers().recoil, WeaponOffset::ZERO);
    }

    #[test]
    fn test_pose_is_rest_plus_sum_of_layers() {
        let mut weapon = rifle();
        weapon.fire();
        run_frames(&mut weapon, 20, Vec3::new(4.0, 1.0, -10.0), Vec2::new(30.0, -80.0), true);

        let expected = weapon.layers().total().apply_to(weapon.rest_pose());
        let pose = weapon.pose();

        assert!((pose.translation - expected.translation).length() < 1e-6);
        assert!(pose.rotation.abs_diff_eq(expected.rotation, 1e-6));
    }

    #[test]
    fn test_output_does_not_accumulate() {
        let mut weapon = rifle();
        run_frames(&mut weapon, 30, Vec3::new(10.0, 0.0, -10.0), Vec2::new(50.0, 50.0), true);

        // dt = 0 не двигает фильтры и фазы → поза обязана повториться
        let first = weapon.animate(Vec3::new(10.0, 0.0, -10.0), 15.0, Vec2::new(50.0, 50.0), true, 0.0);
        let second = weapon.animate(Vec3::new(10.0, 0.0, -10.0), 15.0, Vec2::new(50.0, 50.0), true, 0.0);

        assert_eq!(first, second);
        assert_ne!(first, weapon.rest_pose());
    }

    #[test]
    fn test_run_cycle_fades_in_air() {
        let mut weapon = rifle();

        run_frames(&mut weapon, 120, Vec3::new(0.0, 0.0, -15.0), Vec2::ZERO, true);
        assert!(weapon.state().run_interpolation > 0.9);

        run_frames(&mut weapon, 120, Vec3::new(0.0, 0.0, -15.0), Vec2::ZERO, false);
        assert!(weapon.state().run_interpolation < 0.1);
    }

    #[test]
    fn test_aim_sway_saturates() {
        let mut weapon = rifle();

        run_frames(&mut weapon, 300, Vec3::ZERO, Vec2::new(1000.0, -1000.0), true);

        let aim = weapon.state().aim;
        assert!((aim.x - 1.0).abs() < 1e-2, "aim = {:?}", aim);
        assert!((aim.y + 1.0).abs() < 1e-2, "aim = {:?}", aim);
        assert!((weapon.layers().aim.rotation.z - 15.0).abs() < 0.2);
    }

    #[test]
    fn test_phases_stay_wrapped() {
        let mut weapon = rifle();

        for _ in 0..(IDLE_PERIOD * 3.0 / DT) as usize {
            weapon.animate(Vec3::new(0.0, 0.0, -15.0), 15.0, Vec2::ZERO, true, DT);
            let state = weapon.state();
            assert!((0.0..std::f32::consts::TAU).contains(&state.idle_phase));
            assert!((0.0..std::f32::consts::TAU).contains(&state.run_phase));
        }
    }

    #[test]
    fn test_parts_play_on_fire() {
        let mut weapon = rifle();
        let rest = weapon.parts()[0].rest_pose();

        weapon.fire();
        weapon.animate(Vec3::ZERO, 15.0, Vec2::ZERO, true, 0.03);

        let slide = &weapon.parts()[0];
        assert!(slide.is_playing());
        assert!(slide.pose().translation.z > rest.translation.z);
    }

    #[test]
    fn test_same_seed_same_motion() {
        let definition = Arc::new(WeaponDefinition::default());
        let mut a = definition.clone().instantiate_seeded(Transform::IDENTITY, 99);
        let mut b = definition.instantiate_seeded(Transform::IDENTITY, 99);

        for frame in 0..90 {
            let velocity = Vec3::new((frame as f32 * 0.1).sin() * 5.0, 0.0, -8.0);
            if frame % 7 == 0 {
                a.fire();
                b.fire();
            }
            a.tick(DT);
            b.tick(DT);
            assert_eq!(
                a.animate(velocity, 15.0, Vec2::new(3.0, 20.0), true, DT),
                b.animate(velocity, 15.0, Vec2::new(3.0, 20.0), true, DT)
            );
        }
    }
}
