use anyhow::Context;
use archscape_animate::{
    ColorController, GrowShrinkAnimator, OrbitingLight, ScalePhase, TerrainAnimator,
};
use archscape_common::{Diagnostic, Tag, Transform};
use archscape_input::{Camera, CameraController, CameraMode, InputFrame, Key};
use archscape_mesh::{ArchBuilder, GridTerrainBuilder};
use archscape_scene::{Material, Scene, SceneObject, SceneSummary};
use glam::Vec3;

use crate::config::SceneConfig;

/// State of the scene after a headless run.
#[derive(Debug)]
pub struct Report {
    pub summary: SceneSummary,
    pub arch_scale: f32,
    pub arch_phase: ScalePhase,
    pub phase_changes: usize,
    pub light_position: Vec3,
    pub camera_mode: CameraMode,
    pub camera_position: Vec3,
    pub diagnostics: Vec<Diagnostic>,
}

/// Assemble the demo scene from `config` and run it for `frames` frames.
///
/// The first frame presses `2`, switching the camera to auto orbit around
/// the arch the way a user would.
pub fn run(config: &SceneConfig, frames: u64, dt: f32) -> anyhow::Result<Report> {
    let mut scene = Scene::new();

    let terrain_material = scene.add_material(Material::new("terrain"));
    let arch_material = scene.add_material(Material::new("arch"));

    let terrain_mesh = GridTerrainBuilder::new(config.terrain)
        .build()
        .context("building terrain")?;
    let centre = Vec3::new(
        config.terrain.world_width * 0.5,
        0.0,
        config.terrain.world_length * 0.5,
    );
    let terrain = scene.spawn(
        SceneObject::new("terrain")
            .with_transform(Transform::from_position(-centre))
            .with_tag(Tag::Terrain)
            .with_mesh(terrain_mesh)
            .with_collider()
            .with_material(terrain_material),
    );

    let arch_mesh = ArchBuilder::new(config.arch)
        .build()
        .context("building arch")?;
    let arch = scene.spawn(
        SceneObject::new("arch")
            .with_transform(Transform::from_position(config.arch_position))
            .with_mesh(arch_mesh)
            .with_collider()
            .with_material(arch_material),
    );

    let marker = scene.spawn(SceneObject::new("light"));

    let mut terrain_anim = TerrainAnimator::attach(&scene, terrain, config.wave)?;
    let mut arch_anim = GrowShrinkAnimator::attach(&scene, arch, config.oscillator)?;
    let mut light = OrbitingLight::new(config.light)
        .with_marker(marker)
        .with_materials(vec![terrain_material, arch_material]);
    ColorController::new("terrain_color", Some(terrain_material), config.terrain_color)
        .start(&mut scene);
    ColorController::new("arch_color", Some(arch_material), config.arch_color).start(&mut scene);

    let mut camera = Camera::default();
    let mut camera_controller = CameraController::new(config.camera).with_target(arch);

    let mut light_position = light.position();
    let mut phase = arch_anim.oscillator().phase();
    let mut phase_changes = 0;
    for frame in 0..frames {
        let _span = tracing::info_span!("frame", frame).entered();
        let dt = scene.advance(dt);
        let input = if frame == 0 {
            InputFrame::default().with_key(Key::Digit2)
        } else {
            InputFrame::default()
        };

        terrain_anim.update(&mut scene, dt);
        if let Some(next) = arch_anim.update(&mut scene, dt) {
            if next != phase {
                phase_changes += 1;
                phase = next;
            }
        }
        light_position = light.update(&mut scene, dt);
        camera_controller.update(&mut camera, &mut scene, &input, dt);
        scene.drain_events();
    }

    tracing::info!(frames, phase_changes, "simulation finished");

    Ok(Report {
        summary: scene.summary(),
        arch_scale: arch_anim.oscillator().scale(),
        arch_phase: arch_anim.oscillator().phase(),
        phase_changes,
        light_position,
        camera_mode: camera_controller.mode(),
        camera_position: camera.position,
        diagnostics: scene.diagnostics_mut().drain(),
    })
}
