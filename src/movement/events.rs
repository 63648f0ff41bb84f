//! Movement domain: dash lifecycle messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Fired on the frame a dash begins.
#[derive(Debug, Clone, Copy)]
pub struct DashStarted {
    pub player: Entity,
    pub direction: f32,
}

impl Message for DashStarted {}

/// Fired on the frame a dash's duration elapses.
#[derive(Debug, Clone, Copy)]
pub struct DashEnded {
    pub player: Entity,
}

impl Message for DashEnded {}
