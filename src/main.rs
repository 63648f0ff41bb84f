mod animation;
mod config;
mod core;
mod level;
mod movement;
mod phasing;
mod platforms;
mod ui;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Phase Dash".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(config::ConfigPlugin::default())
        .add_plugins(PhysicsPlugins::default().with_collision_hooks::<phasing::PhaseHooks>())
        .add_plugins((
            core::CorePlugin,
            level::LevelPlugin,
            movement::MovementPlugin,
            phasing::PhasingPlugin,
            platforms::PlatformsPlugin,
            animation::AnimationPlugin,
            ui::UiPlugin,
        ))
        .run();
}
