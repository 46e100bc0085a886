//! Path: native/game_simulation/src/snapshot.rs
//! Summary: 再開用スナップショット（保存 → 復元で同じ結果を再現できる状態一式）

use crate::error::SnapshotError;
use crate::game_logic::FlowField;
use crate::world::{
    BuffTotals, Camera, Companion, Enemy, GameWorld, HostileTotals, Pickup, PlayerState,
    Projectile, SimMode, TempBonuses,
};
use game_core::obstacle::Obstacle;
use game_core::physics::rng::SimpleRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 形式を変えたら上げる
pub const SNAPSHOT_VERSION: u32 = 1;

/// フレームの合間に取る状態一式。導出データ（空間ハッシュ・距離場）は含めず、復元時に作り直す
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub version:         u32,
    pub frame_id:        u32,
    pub elapsed_seconds: f32,
    pub world_w:         f32,
    pub world_h:         f32,
    pub mode:            SimMode,
    pub player:          PlayerState,
    pub enemies:         Vec<Enemy>,
    pub companions:      Vec<Companion>,
    pub projectiles:     Vec<Projectile>,
    pub pickups:         Vec<Pickup>,
    pub obstacles:       Vec<Obstacle>,
    pub rng:             SimpleRng,
    pub buffs:           BuffTotals,
    pub temp_bonuses:    TempBonuses,
    pub debuffs:         HostileTotals,
    /// 敵 ID 昇順
    pub enemy_slow:      Vec<(u32, f32)>,
    pub camera:          Camera,
    pub pending_prompts: Vec<String>,
    pub level_transition_pending: bool,
    pub next_id:         u32,
    pub kill_count:      u32,
}

impl SimSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snap: Self = bincode::deserialize(bytes)?;
        if snap.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version { found: snap.version, expected: SNAPSHOT_VERSION });
        }
        Ok(snap)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.encode()?)?;
        log::debug!("snapshot written: {} (frame {})", path.display(), self.frame_id);
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }
}

impl GameWorld {
    /// 現在の状態を写し取る。ステップの合間に呼ぶこと
    pub fn snapshot(&self) -> SimSnapshot {
        let mut enemy_slow: Vec<(u32, f32)> = self.enemy_slow.iter().map(|(&id, &s)| (id, s)).collect();
        enemy_slow.sort_by_key(|&(id, _)| id);
        SimSnapshot {
            version: SNAPSHOT_VERSION,
            frame_id: self.frame_id,
            elapsed_seconds: self.elapsed_seconds,
            world_w: self.world_w,
            world_h: self.world_h,
            mode: self.mode.clone(),
            player: self.player.clone(),
            enemies: self.enemies.clone(),
            companions: self.companions.clone(),
            projectiles: self.projectiles.clone(),
            pickups: self.pickups.clone(),
            obstacles: self.field.obstacles.clone(),
            rng: self.rng.clone(),
            buffs: self.buffs,
            temp_bonuses: self.temp_bonuses,
            debuffs: self.debuffs,
            enemy_slow,
            camera: self.camera,
            pending_prompts: self.pending_prompts.iter().cloned().collect(),
            level_transition_pending: self.level_transition_pending,
            next_id: self.next_id,
            kill_count: self.kill_count,
        }
    }

    /// スナップショットをそのまま書き戻す。コンテンツパックは現在のものを使い続ける
    pub fn restore(&mut self, snap: &SimSnapshot) {
        self.frame_id = snap.frame_id;
        self.elapsed_seconds = snap.elapsed_seconds;
        self.world_w = snap.world_w;
        self.world_h = snap.world_h;
        self.mode = snap.mode.clone();
        self.player = snap.player.clone();
        self.enemies = snap.enemies.clone();
        self.companions = snap.companions.clone();
        self.projectiles = snap.projectiles.clone();
        self.pickups = snap.pickups.clone();
        self.field.rebuild(snap.obstacles.clone());
        self.flow = FlowField::new(snap.world_w, snap.world_h);
        self.rng = snap.rng.clone();
        self.buffs = snap.buffs;
        self.temp_bonuses = snap.temp_bonuses;
        self.debuffs = snap.debuffs;
        self.enemy_slow = snap.enemy_slow.iter().copied().collect();
        self.camera = snap.camera;
        self.pending_prompts = snap.pending_prompts.iter().cloned().collect();
        self.level_transition_pending = snap.level_transition_pending;
        self.next_id = snap.next_id;
        self.kill_count = snap.kill_count;
        self.frame_events.clear();
        self.outbox.clear();
        self.rebuild_enemy_hash();
        log::debug!("snapshot restored at frame {}", snap.frame_id);
    }
}
