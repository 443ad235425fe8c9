//! Producer: mouse / keyboard → `PointerGesture` and `UseAbility` intent.
//!
//! This system intentionally does **not** touch the `Launcher`; it only reads it to decide
//! whether a press starts a drag or triggers the flying projectile's ability.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::plugins::camera::MainCamera;
use crate::plugins::projectiles::components::{Projectile, ProjectileState};
use crate::plugins::projectiles::messages::UseAbility;

use super::sling::Launcher;

/// Drag gesture in world coordinates.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum PointerGesture {
    Down(Vec2),
    Move(Vec2),
    Up,
}

/// Cursor in world space, if there is a window, a cursor inside it, and a main camera.
fn cursor_world(
    windows: &Query<&Window>,
    q_camera: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Option<Vec2> {
    let window = match windows.single() {
        Ok(w) => w,
        Err(e) => { debug!("No single Window: {e:?}"); return None; }
    };

    let cursor = window.cursor_position()?;

    let (camera, camera_tf) = match q_camera.single() {
        Ok(v) => v,
        Err(e) => { debug!("No single MainCamera: {e:?}"); return None; }
    };

    match camera.viewport_to_world_2d(camera_tf, cursor) {
        Ok(p) => Some(p),
        Err(e) => { debug!("viewport_to_world_2d failed: {e:?}"); None }
    }
}

pub fn read_pointer_input(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    launcher: Res<Launcher>,
    q_projectiles: Query<(Entity, &ProjectileState), With<Projectile>>,
    mut gestures: MessageWriter<PointerGesture>,
    mut abilities: MessageWriter<UseAbility>,
) {
    let flying = || {
        q_projectiles
            .iter()
            .find(|(_, s)| **s == ProjectileState::Flying)
            .map(|(e, _)| e)
    };

    if let Some(keys) = keys
        && keys.just_pressed(KeyCode::Space)
        && let Some(projectile) = flying()
    {
        abilities.write(UseAbility { projectile });
    }

    let Some(buttons) = buttons else { return; };
    let cursor = cursor_world(&windows, &q_camera);

    if buttons.just_pressed(MouseButton::Left) && !launcher.is_pulling() {
        match cursor {
            Some(p) if launcher.loaded().is_some() && launcher.in_grab_zone(p) => {
                gestures.write(PointerGesture::Down(p));
            }
            _ => {
                if let Some(projectile) = flying() {
                    abilities.write(UseAbility { projectile });
                }
            }
        }
        return;
    }

    if !launcher.is_pulling() {
        return;
    }

    if buttons.just_released(MouseButton::Left) {
        gestures.write(PointerGesture::Up);
    } else if buttons.pressed(MouseButton::Left)
        && let Some(p) = cursor
    {
        gestures.write(PointerGesture::Move(p));
    }
}
