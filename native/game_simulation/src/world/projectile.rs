//! Path: native/game_simulation/src/world/projectile.rs
//! Summary: 弾（直進・寿命・陣営・貫通数・発射元・風逸らし済みフラグ）

use game_core::constants::PROJECTILE_HALF_EXTENT;
use game_core::enemy::EnemyClass;
use game_core::physics::geometry::Body;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id:       u32,
    pub body:     Body,
    pub vx:       f32,
    pub vy:       f32,
    pub lifetime: f32,
    pub team:     Team,
    pub damage:   f32,
    /// 残り貫通回数（0 なら次のヒットで消える）
    pub pierce:   u32,
    /// 敵弾の発射元（会心・貫通チューニングの参照用）
    pub source:   Option<u32>,
    /// 発射元が消えていたときに使うクラス既定値
    pub source_class: EnemyClass,
    /// 風逸らし判定は 1 弾につき 1 回だけ
    pub deflect_attempted: bool,
    /// 既にヒットしたアクター（同じ相手に 2 度当たらない）
    pub hit_ids:  Vec<u32>,
    /// 貫通して抜けた障害物のインデックス
    pub passed_obstacles: Vec<usize>,
    pub alive:    bool,
}

impl Projectile {
    pub fn new(id: u32, x: f32, y: f32, vx: f32, vy: f32, lifetime: f32, team: Team, damage: f32) -> Self {
        Self {
            id,
            body: Body::new(x, y, PROJECTILE_HALF_EXTENT, PROJECTILE_HALF_EXTENT),
            vx,
            vy,
            lifetime,
            team,
            damage,
            pierce: 0,
            source: None,
            source_class: EnemyClass::Mook,
            deflect_attempted: false,
            hit_ids: Vec::new(),
            passed_obstacles: Vec::new(),
            alive: true,
        }
    }

    pub fn with_pierce(mut self, pierce: u32) -> Self {
        self.pierce = pierce;
        self
    }

    pub fn with_source(mut self, source: u32, class: EnemyClass) -> Self {
        self.source = Some(source);
        self.source_class = class;
        self
    }

    /// 貫通対象にヒットした。弾が消えるなら true
    pub fn register_hit(&mut self, target: u32) -> bool {
        self.hit_ids.push(target);
        if self.pierce > 0 {
            self.pierce -= 1;
            false
        } else {
            self.alive = false;
            true
        }
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pierce_survives_exactly_n_hits() {
        let mut p = Projectile::new(1, 0.0, 0.0, 1.0, 0.0, 1.0, Team::Player, 1.0).with_pierce(2);
        assert!(!p.register_hit(10));
        assert!(!p.register_hit(11));
        assert!(p.register_hit(12));
        assert!(!p.alive);
        assert_eq!(p.hit_ids, vec![10, 11, 12]);
    }
}
