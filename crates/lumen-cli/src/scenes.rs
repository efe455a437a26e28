//! Built-in scenes.

use anyhow::{Context, Result};
use clap::ValueEnum;
use lumen_anim::Animator;
use lumen_math::Vec3;
use lumen_scene::{Color, JointRecord, MeshShape, Scene, SceneNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Sphere, cone and box on the studio floor
    Studio,
    /// Three-joint arm swinging about its base
    Arm,
}

pub fn build(preset: Preset) -> Result<Scene> {
    match preset {
        Preset::Studio => Ok(studio()),
        Preset::Arm => arm(),
    }
}

fn studio() -> Scene {
    let mut scene = Scene::studio();
    scene.insert(
        SceneNode::sphere(Vec3::new(-1.5, -0.5, 0.0), 1.0, Color::rgb8(190, 60, 50))
            .with_name("Ball"),
    );
    scene.insert(
        SceneNode::cone(Vec3::new(1.5, -0.75, 0.5), 0.8, 2.0, Color::rgb8(70, 90, 190))
            .with_name("Cone")
            .with_rotation(Vec3::new(-90.0, 0.0, 0.0)),
    );
    scene.insert(
        SceneNode::mesh(Vec3::new(0.2, -1.5, 2.0), MeshShape::cuboid(1.0, 1.0, 1.0))
            .with_name("Crate")
            .with_rotation(Vec3::new(0.0, 30.0, 0.0))
            .with_diffuse(Color::rgb8(160, 120, 60)),
    );
    scene
}

fn arm() -> Result<Scene> {
    let mut scene = Scene::studio();
    let records = [
        ("Base", Vec3::new(-1.0, -1.5, 0.0), None),
        ("Elbow", Vec3::new(0.0, 1.8, 0.0), Some("Base")),
        ("Wrist", Vec3::new(1.5, 0.0, 0.0), Some("Elbow")),
    ];
    for (name, translation, parent) in records {
        scene
            .add_joint_record(&JointRecord {
                name: name.to_string(),
                rotation: Vec3::zeros(),
                translation,
                parent: parent.map(str::to_string),
            })
            .with_context(|| format!("creating joint {name}"))?;
    }
    Ok(scene)
}

/// Capture the preset's start pose, move it to its end pose and capture that.
pub fn keyframe(preset: Preset, scene: &mut Scene, anim: &mut Animator) -> Result<()> {
    anim.capture_start(scene);
    match preset {
        Preset::Studio => {
            let ball = scene.find_by_name("Ball").context("studio scene has no Ball")?;
            scene.set_local_position(ball, Vec3::new(1.5, 0.5, 1.5))?;
            let cone = scene.find_by_name("Cone").context("studio scene has no Cone")?;
            scene.set_local_rotation(cone, Vec3::new(-90.0, 0.0, 180.0))?;
        }
        Preset::Arm => {
            let base = scene.find_by_name("Base").context("arm scene has no Base")?;
            scene.set_local_rotation(base, Vec3::new(0.0, 0.0, -60.0))?;
            let elbow = scene.find_by_name("Elbow").context("arm scene has no Elbow")?;
            scene.set_local_rotation(elbow, Vec3::new(0.0, 0.0, 45.0))?;
        }
    }
    anim.capture_end(scene);
    Ok(())
}
