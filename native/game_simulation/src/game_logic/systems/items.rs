//! Path: native/game_simulation/src/game_logic/systems/items.rs
//! Summary: ピックアップの生成・回収と、破壊 / 開封された障害物のドロップ

use crate::collaborators::{AudioCue, SideEffect};
use crate::world::{FrameEvent, GameWorld, Pickup, PICKUP_HALF_EXTENT};
use game_core::loot::PickupKind;
use game_core::physics::geometry::Rect;

pub(crate) fn spawn_pickup(w: &mut GameWorld, x: f32, y: f32, kind: PickupKind, value: f32) -> u32 {
    let id = w.alloc_id();
    w.pickups.push(Pickup { id, x, y, kind, value });
    id
}

/// 壊れた（開けられた）障害物のドロップ抽選とイベント通知
pub(crate) fn on_obstacle_broken(w: &mut GameWorld, index: usize) {
    let Some(o) = w.field.obstacles.get(index) else {
        return;
    };
    let (cx, cy) = o.rect.center();
    let kind = o.kind;
    w.field.mark_changed();
    w.frame_events.push(FrameEvent::ObstacleBroken { index });
    w.frame_events.push(FrameEvent::Sparkle { x: cx, y: cy, count: 6 });
    w.cue(AudioCue::Break);
    if let Some((pickup, value)) = w.content.loot.roll_for_obstacle(kind, &mut w.rng) {
        spawn_pickup(w, cx, cy, pickup, value);
    }
}

/// プレイヤーと重なったピックアップを回収する
pub(crate) fn update_pickups(w: &mut GameWorld) {
    if w.player.actor.is_defeated() || w.pickups.is_empty() {
        return;
    }
    let player_rect = w.player.actor.rect();
    let GameWorld { pickups, player, frame_events, outbox, .. } = &mut *w;
    pickups.retain(|p| {
        let r = Rect::from_center(p.x, p.y, PICKUP_HALF_EXTENT, PICKUP_HALF_EXTENT);
        if !r.intersects(&player_rect) {
            return true;
        }
        match p.kind {
            PickupKind::Heal => {
                player.actor.hp = (player.actor.hp + p.value).min(player.actor.max_hp);
            }
            PickupKind::Xp => {
                let xp = p.value.max(0.0) as u32;
                player.xp += xp;
                outbox.push(SideEffect::GrantXp(xp));
            }
            PickupKind::Key => player.keys += 1,
            PickupKind::Shield => player.shield_ready = true,
        }
        frame_events.push(FrameEvent::PickupCollected { kind: p.kind, value: p.value });
        outbox.push(SideEffect::Cue(AudioCue::Pickup));
        false
    });
}
