//! UI domain: in-run HUD elements.

mod hud_dash;


pub use hud_dash::{CooldownDisplay, DashCooldownHudBuilder, HudConfig};

use bevy::prelude::*;

use crate::core::GameplaySet;
use crate::ui::hud_dash::{spawn_dash_cooldown_ui, update_dash_cooldown_ui};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_dash_cooldown_ui)
            .add_systems(
                Update,
                update_dash_cooldown_ui.in_set(GameplaySet::Present),
            );
    }
}
