//! Path: native/game_simulation/src/game_logic/systems/collision.rs
//! Summary: ノックバックの積分と、敵同士の群れ分離（障害物を考慮して適用）

use super::super::movement::integrate_knockback;
use crate::world::GameWorld;
use game_core::constants::{SEPARATION_FORCE, SEPARATION_RADIUS};
use game_core::physics::geometry::Rect;
use game_core::physics::obstacle_resolve::{move_with_collision, CollisionEnv};
use game_core::physics::separation::{separation_deltas, CrowdMember};

/// 全アクターのノックバック速度を移動に反映して減衰させる
pub(crate) fn integrate_knockback_all(w: &mut GameWorld, dt: f32) {
    let GameWorld { player, enemies, field, buffs, query_buf, world_w, world_h, .. } = &mut *w;
    let env = CollisionEnv {
        field: &*field,
        solids: &[],
        water_walk: buffs.water_walk,
        world_w: *world_w,
        world_h: *world_h,
    };
    let a = &mut player.actor;
    integrate_knockback(&mut a.body, &mut a.knockback_x, &mut a.knockback_y, &env, query_buf, dt);

    let env = CollisionEnv { water_walk: false, ..env };
    for e in enemies.iter_mut().filter(|e| !e.actor.is_defeated()) {
        let a = &mut e.actor;
        integrate_knockback(&mut a.body, &mut a.knockback_x, &mut a.knockback_y, &env, query_buf, dt);
    }
}

/// 敵同士をソフトに押し広げる。押し出しは移動解決を通すので壁には埋まらない
pub(crate) fn separate_crowd(w: &mut GameWorld, dt: f32) {
    if w.enemies.len() < 2 {
        return;
    }
    let members: Vec<CrowdMember> = w
        .enemies
        .iter()
        .map(|e| CrowdMember { x: e.actor.x(), y: e.actor.y(), active: !e.actor.is_defeated() })
        .collect();
    let mut deltas = Vec::new();
    separation_deltas(&members, SEPARATION_RADIUS, SEPARATION_FORCE, dt, &mut deltas);

    let GameWorld { enemies, field, query_buf, world_w, world_h, .. } = &mut *w;
    let no_solids: [Rect; 0] = [];
    let env = CollisionEnv {
        field: &*field,
        solids: &no_solids,
        water_walk: false,
        world_w: *world_w,
        world_h: *world_h,
    };
    for (e, &(dx, dy)) in enemies.iter_mut().zip(deltas.iter()) {
        if dx != 0.0 || dy != 0.0 {
            move_with_collision(&mut e.actor.body, dx, dy, &env, query_buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;
    use game_core::enemy::EnemyClass;

    #[test]
    fn stacked_enemies_drift_apart() {
        let mut w = GameWorld::new(ContentPack::default());
        w.spawn_enemy(EnemyClass::Mook, "a", 300.0, 300.0);
        w.spawn_enemy(EnemyClass::Mook, "b", 305.0, 300.0);
        for _ in 0..30 {
            separate_crowd(&mut w, 1.0 / 60.0);
        }
        let gap = w.enemies[1].actor.x() - w.enemies[0].actor.x();
        assert!(gap > 5.0);
    }

    #[test]
    fn knockback_moves_and_decays() {
        let mut w = GameWorld::new(ContentPack::default());
        let id = w.spawn_enemy(EnemyClass::Mook, "a", 300.0, 300.0);
        if let Some(e) = w.enemy_mut(id) {
            e.actor.add_knockback(200.0, 0.0);
        }
        integrate_knockback_all(&mut w, 1.0 / 60.0);
        let e = &w.enemies[0].actor;
        assert!(e.x() > 300.0);
        assert!(e.knockback_x < 200.0 && e.knockback_x > 0.0);
    }
}
