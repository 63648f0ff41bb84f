//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;
pub(crate) mod trail;

pub(crate) use collisions::detect_ground;
pub(crate) use input::read_input;
pub(crate) use movement::{
    apply_dash, apply_gravity, apply_horizontal_movement, apply_jump, update_dash_timer,
    update_facing,
};
pub(crate) use trail::{emit_dash_trail, fade_trail_ghosts};
