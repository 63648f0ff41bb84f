//! UI domain: dash cooldown indicator.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::movement::{MovementState, MovementTuning, Player};

pub(crate) const READY_LABEL: &str = "READY";

/// Marker for the dash cooldown container
#[derive(Component)]
pub struct DashCooldownUI;

/// Marker for the cooldown bar fill element
#[derive(Component)]
pub struct DashCooldownFill;

/// Marker for the countdown / ready label
#[derive(Component)]
pub struct DashCooldownText;

/// What the indicator shows for a given cooldown state.
#[derive(Debug, Clone, PartialEq)]
pub struct CooldownDisplay {
    /// Elapsed fraction of the cooldown, `0.0..=1.0`.
    pub fill: f32,
    pub ready: bool,
    pub label: String,
}

impl CooldownDisplay {
    pub fn new(progress: f32, cooldown: f32) -> Self {
        let fill = progress.clamp(0.0, 1.0);
        if fill >= 1.0 {
            return Self {
                fill,
                ready: true,
                label: READY_LABEL.to_string(),
            };
        }

        let remaining = (1.0 - fill) * cooldown.max(0.0);
        Self {
            fill,
            ready: false,
            label: format!("{}", remaining.ceil() as u32),
        }
    }
}

/// Placement and colours of the cooldown indicator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HudConfig {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
    pub charging_color: [f32; 3],
    pub ready_color: [f32; 3],
    pub font_size: f32,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            left: 16.0,
            bottom: 16.0,
            width: 160.0,
            height: 16.0,
            charging_color: [0.9, 0.55, 0.2],
            ready_color: [0.3, 0.85, 0.95],
            font_size: 16.0,
        }
    }
}

/// Smallest bar extent or font size the HUD will draw with.
pub(crate) const MIN_HUD_EXTENT: f32 = 1.0;

impl HudConfig {
    pub fn sanitized(mut self) -> Self {
        self.left = self.left.max(0.0);
        self.bottom = self.bottom.max(0.0);
        self.width = self.width.max(MIN_HUD_EXTENT);
        self.height = self.height.max(MIN_HUD_EXTENT);
        self.font_size = self.font_size.max(MIN_HUD_EXTENT);
        self.charging_color = self.charging_color.map(|c| c.clamp(0.0, 1.0));
        self.ready_color = self.ready_color.map(|c| c.clamp(0.0, 1.0));
        self
    }
}

fn rgb([r, g, b]: [f32; 3]) -> Color {
    Color::srgb(r, g, b)
}

/// Builds the cooldown indicator once at startup.
#[derive(Debug, Clone)]
pub struct DashCooldownHudBuilder {
    config: HudConfig,
}

impl DashCooldownHudBuilder {
    pub fn new(config: HudConfig) -> Self {
        Self { config }
    }

    pub fn spawn(self, commands: &mut Commands) -> Entity {
        let config = self.config;
        commands
            .spawn((
                DashCooldownUI,
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(config.left),
                    bottom: Val::Px(config.bottom),
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    ..default()
                },
            ))
            .with_children(|parent| {
                // Bar background
                parent
                    .spawn((
                        Node {
                            width: Val::Px(config.width),
                            height: Val::Px(config.height),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
                        BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
                    ))
                    .with_children(|bar| {
                        bar.spawn((
                            DashCooldownFill,
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(rgb(config.ready_color)),
                        ));
                    });

                parent.spawn((
                    DashCooldownText,
                    Text::new(READY_LABEL),
                    TextFont {
                        font_size: config.font_size,
                        ..default()
                    },
                    TextColor(rgb(config.ready_color)),
                ));
            })
            .id()
    }
}

pub(crate) fn spawn_dash_cooldown_ui(mut commands: Commands, config: Res<GameConfig>) {
    DashCooldownHudBuilder::new(config.hud.clone()).spawn(&mut commands);
}

pub(crate) fn update_dash_cooldown_ui(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    config: Res<GameConfig>,
    player_query: Query<&MovementState, With<Player>>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<DashCooldownFill>>,
    mut text_query: Query<(&mut Text, &mut TextColor), With<DashCooldownText>>,
) {
    let Ok(state) = player_query.single() else {
        return;
    };

    let progress = state
        .dash
        .cooldown_progress(time.elapsed_secs(), tuning.dash_cooldown);
    let display = CooldownDisplay::new(progress, tuning.dash_cooldown);
    let color = if display.ready {
        rgb(config.hud.ready_color)
    } else {
        rgb(config.hud.charging_color)
    };

    for (mut node, mut bg_color) in &mut fill_query {
        node.width = Val::Percent(display.fill * 100.0);
        bg_color.0 = color;
    }

    for (mut text, mut text_color) in &mut text_query {
        if text.0 != display.label {
            text.0 = display.label.clone();
        }
        text_color.0 = color;
    }
}
