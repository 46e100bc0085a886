//! Path: native/game_simulation/src/render_frame.rs
//! Summary: GameWorld から描画用フレームを構築（描画側は保持しない）
//!
//! 描画層は GameWorld を直接読まず、フレームごとにこのコピーを受け取る。
//! 一時イベントはここで drain されるので、同じイベントが二度描かれることはない。

use crate::world::{Actor, ActorKind, FrameEvent, GameWorld, Maneuver, Team};
use game_core::enemy::EnemyClass;
use game_core::obstacle::ObstacleKind;
use game_core::physics::geometry::Rect;

#[derive(Clone, Debug, PartialEq)]
pub struct ActorSprite {
    pub id:         u32,
    pub kind:       ActorKind,
    /// 敵のみ
    pub class:      Option<EnemyClass>,
    pub x:          f32,
    pub y:          f32,
    pub facing_x:   f32,
    pub facing_y:   f32,
    pub anim_frame: u8,
    /// 0.0..=1.0
    pub hp_ratio:   f32,
    pub maneuver:   Maneuver,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSprite {
    pub x:    f32,
    pub y:    f32,
    pub team: Team,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleSprite {
    pub rect: Rect,
    pub kind: ObstacleKind,
    pub open: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
    pub frame_id:    u32,
    pub camera:      (f32, f32),
    /// 先頭がプレイヤー
    pub actors:      Vec<ActorSprite>,
    pub projectiles: Vec<ProjectileSprite>,
    pub obstacles:   Vec<ObstacleSprite>,
    pub events:      Vec<FrameEvent>,
    /// 表示待ちのプロンプト（先頭のみ表示する）
    pub prompt:      Option<String>,
}

fn hp_ratio(hp: f32, max_hp: f32) -> f32 {
    if max_hp <= 0.0 {
        0.0
    } else {
        (hp / max_hp).clamp(0.0, 1.0)
    }
}

fn sprite(a: &Actor, class: Option<EnemyClass>, maneuver: Maneuver) -> ActorSprite {
    ActorSprite {
        id: a.id,
        kind: a.kind,
        class,
        x: a.x(),
        y: a.y(),
        facing_x: a.facing_x,
        facing_y: a.facing_y,
        anim_frame: a.anim_frame(),
        hp_ratio: hp_ratio(a.hp, a.max_hp),
        maneuver,
    }
}

/// 描画用フレームを構築し、このフレームのイベントを drain する
pub fn build_render_frame(w: &mut GameWorld) -> RenderFrame {
    // 1. アクター（player, companions, enemies）
    let mut actors = Vec::with_capacity(1 + w.companions.len() + w.enemies.len());
    actors.push(sprite(&w.player.actor, None, Maneuver::Idle));
    actors.extend(w.companions.iter().map(|c| sprite(&c.actor, None, Maneuver::Idle)));
    actors.extend(
        w.enemies
            .iter()
            .filter(|e| !e.actor.is_defeated())
            .map(|e| sprite(&e.actor, Some(e.class), e.ai.maneuver)),
    );

    // 2. 弾
    let projectiles = w
        .projectiles
        .iter()
        .filter(|p| p.alive)
        .map(|p| ProjectileSprite { x: p.body.x, y: p.body.y, team: p.team })
        .collect();

    // 3. 障害物（破壊済みは描かない）
    let obstacles = w
        .field
        .obstacles
        .iter()
        .filter(|o| !o.destroyed)
        .map(|o| ObstacleSprite { rect: o.rect, kind: o.kind, open: o.is_open() })
        .collect();

    RenderFrame {
        frame_id: w.frame_id,
        camera: (w.camera.x, w.camera.y),
        actors,
        projectiles,
        obstacles,
        events: w.drain_frame_events(),
        prompt: w.pending_prompts.front().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;
    use game_core::obstacle::Obstacle;

    #[test]
    fn player_first_and_events_drained() {
        let mut w = GameWorld::new(ContentPack::default());
        w.spawn_enemy(EnemyClass::Mook, "grunt", 200.0, 200.0);
        w.frame_events.push(FrameEvent::Sparkle { x: 1.0, y: 2.0, count: 3 });

        let frame = build_render_frame(&mut w);
        assert_eq!(frame.actors[0].kind, ActorKind::Player);
        assert_eq!(frame.actors.len(), 2);
        assert_eq!(frame.actors[1].class, Some(EnemyClass::Mook));
        assert_eq!(frame.events.len(), 1);

        let again = build_render_frame(&mut w);
        assert!(again.events.is_empty());
    }

    #[test]
    fn destroyed_obstacles_are_hidden() {
        let mut w = GameWorld::new(ContentPack::default());
        let mut barrel = Obstacle::new(Rect::new(0.0, 0.0, 16.0, 16.0), ObstacleKind::Barrel);
        barrel.destroyed = true;
        w.load_obstacles(vec![barrel, Obstacle::new(Rect::new(50.0, 0.0, 16.0, 16.0), ObstacleKind::Wall)]);
        let frame = build_render_frame(&mut w);
        assert_eq!(frame.obstacles.len(), 1);
        assert_eq!(frame.obstacles[0].kind, ObstacleKind::Wall);
    }

    #[test]
    fn hp_ratio_is_clamped() {
        assert_eq!(hp_ratio(5.0, 0.0), 0.0);
        assert_eq!(hp_ratio(-1.0, 10.0), 0.0);
        assert_eq!(hp_ratio(12.0, 10.0), 1.0);
    }
}
