use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use gunfeel_simulation::{HeldWeapon, WeaponPart};

/// Корень assets (HeldWeapon::model относительно него)
const ASSET_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_level)
            .add_systems(Update, (
                attach_weapon_visuals,
                attach_part_visuals,
            ));
    }
}

/// Статичная геометрия: пол, ступени, рампа, свет
fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground plane (60x60m), collider чуть ниже y = 0
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(30.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
    commands.spawn((
        Collider::cuboid(30.0, 0.5, 30.0),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));

    // Ящики разной высоты (прыжок jump_speed 5 ≈ 1.27м)
    let crate_material = materials.add(Color::srgb(0.6, 0.45, 0.3));
    for (position, half_extents) in [
        (Vec3::new(-4.0, 0.25, -6.0), Vec3::new(1.0, 0.25, 1.0)),
        (Vec3::new(-4.0, 0.5, -9.0), Vec3::new(1.0, 0.5, 1.0)),
        (Vec3::new(4.0, 1.0, -8.0), Vec3::new(1.5, 1.0, 1.5)),
        (Vec3::new(0.0, 1.5, -18.0), Vec3::new(6.0, 1.5, 0.5)),
    ] {
        spawn_block(&mut commands, &mut meshes, crate_material.clone(), position, half_extents, Quat::IDENTITY);
    }

    // Рампа 20°
    spawn_block(
        &mut commands,
        &mut meshes,
        materials.add(Color::srgb(0.5, 0.5, 0.55)),
        Vec3::new(9.0, 0.6, -4.0),
        Vec3::new(1.5, 0.1, 4.0),
        Quat::from_rotation_x(20.0_f32.to_radians()),
    );

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });
}

fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    position: Vec3,
    half_extents: Vec3,
    rotation: Quat,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(half_extents * 2.0))),
        MeshMaterial3d(material),
        Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
        Transform::from_translation(position).with_rotation(rotation),
    ));
}

/// Модель оружия: glTF сцена если файл есть, иначе placeholder корпус
fn attach_weapon_visuals(
    mut commands: Commands,
    weapons: Query<(Entity, &HeldWeapon), Added<HeldWeapon>>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, weapon) in weapons.iter() {
        let path = std::path::Path::new(ASSET_ROOT).join(&weapon.model);

        if path.exists() {
            let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(weapon.model.clone()));
            commands.entity(entity).insert((SceneRoot(scene), Visibility::default()));
        } else {
            gunfeel_simulation::log_warning(&format!(
                "Weapon model `{}` not found, using placeholder",
                weapon.model
            ));
            // Ствол смотрит вперёд (-Z)
            commands.entity(entity).insert((
                Mesh3d(meshes.add(Cuboid::new(0.06, 0.1, 0.45))),
                MeshMaterial3d(materials.add(Color::srgb(0.15, 0.15, 0.17))),
                Visibility::default(),
            ));
        }
    }
}

/// Части оружия всегда placeholder (в glTF нет отдельных нод под части)
fn attach_part_visuals(
    mut commands: Commands,
    parts: Query<Entity, Added<WeaponPart>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for entity in parts.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(0.05, 0.03, 0.25))),
            MeshMaterial3d(materials.add(Color::srgb(0.35, 0.35, 0.38))),
            Visibility::default(),
        ));
    }
}
