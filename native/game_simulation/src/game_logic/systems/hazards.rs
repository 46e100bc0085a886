//! Path: native/game_simulation/src/game_logic/systems/hazards.rs
//! Summary: 地形ハザード（泥の減速・炎 / 溶岩の燃焼）をプレイヤーに適用する

use crate::world::{FrameEvent, GameWorld, StatusLabel, TimerKind};
use game_core::constants::{BURN_LINGER, HAZARD_GRACE};
use game_core::obstacle::Hazard;

/// 泥から出た直後に減速を残す時間
const MUD_LINGER: f32 = 0.1;

pub(crate) fn update_hazards(w: &mut GameWorld, dt: f32) {
    let GameWorld { player, field, query_buf, frame_events, .. } = &mut *w;
    if player.actor.is_defeated() {
        player.hazard_exposure = 0.0;
        return;
    }

    let rect = player.actor.rect();
    field.query_rect_into(&rect, query_buf);
    let mut slow: f32 = 1.0;
    let mut burn: f32 = 0.0;
    for &idx in query_buf.iter() {
        let Some(o) = field.obstacles.get(idx) else {
            continue;
        };
        if o.destroyed {
            continue;
        }
        match o.kind.hazard() {
            Some(Hazard::Slow(f)) => slow = slow.min(f),
            Some(Hazard::Burn(dps)) => burn = burn.max(dps),
            None => {}
        }
    }

    let timers = &mut player.actor.timers;
    if slow < 1.0 {
        player.hazard_slow = slow;
        timers.set(TimerKind::HazardSlow, MUD_LINGER);
    } else if !timers.is_active(TimerKind::HazardSlow) {
        player.hazard_slow = 1.0;
    }

    if burn > 0.0 {
        player.hazard_exposure += dt;
        if player.hazard_exposure >= HAZARD_GRACE {
            if !timers.is_active(TimerKind::Burn) {
                player.burn_dps = 0.0;
                frame_events.push(FrameEvent::StatusText {
                    x: player.actor.body.x,
                    y: player.actor.body.y,
                    status: StatusLabel::Burn,
                });
            }
            player.burn_dps = player.burn_dps.max(burn);
            timers.set(TimerKind::Burn, BURN_LINGER);
        }
    } else {
        player.hazard_exposure = 0.0;
    }

    if timers.is_active(TimerKind::Burn) {
        player.actor.hp = (player.actor.hp - player.burn_dps * dt).max(0.0);
    } else {
        player.burn_dps = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;
    use game_core::constants::LAVA_BURN_DPS;
    use game_core::obstacle::{Obstacle, ObstacleKind};
    use game_core::physics::geometry::Rect;

    fn world(kind: ObstacleKind) -> GameWorld {
        let mut w = GameWorld::new(ContentPack::default());
        w.load_obstacles(vec![Obstacle::new(Rect::new(100.0, 100.0, 100.0, 100.0), kind)]);
        w.place_player(150.0, 150.0);
        w
    }

    fn tick(w: &mut GameWorld, dt: f32) {
        w.player.actor.timers.tick_all(dt);
        update_hazards(w, dt);
    }

    #[test]
    fn lava_burns_after_grace() {
        let mut w = world(ObstacleKind::Lava);
        let dt = 1.0 / 60.0;
        let start = w.player.actor.hp;
        for _ in 0..10 {
            tick(&mut w, dt);
        }
        assert_eq!(w.player.actor.hp, start);
        let mut last = w.player.actor.hp;
        for _ in 0..50 {
            tick(&mut w, dt);
            assert!(w.player.actor.hp <= last);
            last = w.player.actor.hp;
        }
        assert_eq!(w.player.burn_dps, LAVA_BURN_DPS);
        assert!(w.player.actor.hp < start);
    }

    #[test]
    fn burn_lingers_after_leaving() {
        let mut w = world(ObstacleKind::Fire);
        for _ in 0..30 {
            tick(&mut w, 1.0 / 60.0);
        }
        w.place_player(500.0, 500.0);
        let hp = w.player.actor.hp;
        tick(&mut w, 1.0);
        assert!(w.player.actor.hp < hp);
        assert!(w.player.actor.timers.is_active(TimerKind::Burn));
        tick(&mut w, 1.0);
        assert!(!w.player.actor.timers.is_active(TimerKind::Burn));
        assert_eq!(w.player.burn_dps, 0.0);
    }

    #[test]
    fn mud_slows_while_inside() {
        let mut w = world(ObstacleKind::Mud);
        tick(&mut w, 0.016);
        assert!(w.player.hazard_slow < 1.0);
        w.place_player(500.0, 500.0);
        tick(&mut w, 0.2);
        assert_eq!(w.player.hazard_slow, 1.0);
    }
}
