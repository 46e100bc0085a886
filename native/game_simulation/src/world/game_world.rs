//! Path: native/game_simulation/src/world/game_world.rs
//! Summary: ゲームワールド（全アクター・弾・障害物・バフ状態・モードを単一所有）

use super::{
    BossState, BuffTotals, Camera, Companion, Enemy, FrameEvent, HostileTotals, Pickup,
    PlayerState, Projectile, SimMode, Team, TempBonuses,
};
use crate::collaborators::{AudioCue, SideEffect};
use crate::content::ContentPack;
use crate::game_logic::FlowField;
use game_core::constants::{
    CELL_SIZE, MAX_PENDING_FRAME_EVENTS, SIM_RNG_SEED, WORLD_HEIGHT, WORLD_WIDTH,
};
use game_core::enemy::EnemyClass;
use game_core::obstacle::Obstacle;
use game_core::physics::rng::SimpleRng;
use game_core::physics::spatial_hash::{ObstacleField, SpatialHash};
use game_core::tuning::TuningTable;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// シミュレーションが単独で所有する状態。外部からの書き換えはフレームの合間だけ
pub struct GameWorld {
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
    pub field:           ObstacleField,
    pub flow:            FlowField,
    pub rng:             SimpleRng,
    pub content:         ContentPack,
    /// 直近フレームのオーラ合計（毎フレーム作り直す）
    pub buffs:           BuffTotals,
    pub temp_bonuses:    TempBonuses,
    pub debuffs:         HostileTotals,
    /// 仲間の減速オーラが各敵に与える減速率（敵 ID → 率）
    pub enemy_slow:      FxHashMap<u32, f32>,
    pub camera:          Camera,
    /// 表示待ちの物語プロンプト
    pub pending_prompts: VecDeque<String>,
    /// 最終ボス撃破後、プロンプトがすべて閉じられたら遷移する
    pub level_transition_pending: bool,
    /// このフレームで発生したイベント。表示層が毎フレーム drain する前提で、
    /// 溜まりすぎた分はステップ末尾で古い順に捨てる
    pub frame_events:    Vec<FrameEvent>,
    /// ステップ末尾で協調者へ送る副作用
    pub outbox:          Vec<SideEffect>,
    /// 敵の位置ハッシュ（弾・近接判定用、毎フレーム再構築）
    pub enemy_hash:      SpatialHash,
    /// 障害物クエリ用バッファ（毎フレーム再利用）
    pub query_buf:       Vec<usize>,
    pub next_id:         u32,
    pub kill_count:      u32,
    /// 直近フレームのステップ処理時間（ミリ秒）
    pub last_frame_time_ms: f64,
}

impl GameWorld {
    pub fn new(content: ContentPack) -> Self {
        Self::with_size(content, WORLD_WIDTH, WORLD_HEIGHT, SIM_RNG_SEED)
    }

    pub fn with_size(content: ContentPack, world_w: f32, world_h: f32, seed: u64) -> Self {
        let player = PlayerState::new(1, world_w * 0.5, world_h * 0.5);
        let camera = Camera { x: player.actor.x(), y: player.actor.y() };
        Self {
            frame_id: 0,
            elapsed_seconds: 0.0,
            world_w,
            world_h,
            mode: SimMode::Running,
            player,
            enemies: Vec::new(),
            companions: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            field: ObstacleField::new(CELL_SIZE),
            flow: FlowField::new(world_w, world_h),
            rng: SimpleRng::new(seed),
            content,
            buffs: BuffTotals::default(),
            temp_bonuses: TempBonuses::default(),
            debuffs: HostileTotals::default(),
            enemy_slow: FxHashMap::default(),
            camera,
            pending_prompts: VecDeque::new(),
            level_transition_pending: false,
            frame_events: Vec::new(),
            outbox: Vec::new(),
            enemy_hash: SpatialHash::new(CELL_SIZE),
            query_buf: Vec::new(),
            next_id: 2,
            kill_count: 0,
            last_frame_time_ms: 0.0,
        }
    }

    pub(crate) fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// レベルの障害物配置を差し替える
    pub fn load_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        self.field.rebuild(obstacles);
    }

    /// チューニングをフレームの合間に差し替える（ホットリロード）
    pub fn replace_tuning(&mut self, tuning: TuningTable) {
        log::debug!("tuning table replaced at frame {}", self.frame_id);
        self.content.tuning = tuning;
    }

    pub fn place_player(&mut self, x: f32, y: f32) {
        self.player.actor.body.x = x;
        self.player.actor.body.y = y;
        self.camera = Camera { x, y };
    }

    /// 敵を生成する。ボスはコンテンツのプロファイル（なければ標準）でフェーズ状態を持つ
    pub fn spawn_enemy(&mut self, class: EnemyClass, identity: &str, x: f32, y: f32) -> u32 {
        let id = self.alloc_id();
        let mut enemy = Enemy::new(id, class, identity, x, y);
        if class == EnemyClass::Boss {
            let profile = self.content.boss_profiles.get(identity).cloned().unwrap_or_default();
            enemy.boss = Some(BossState::new(profile));
        }
        if let Some(def) = self.content.hostile_aura(identity) {
            enemy.trigger_cooldowns = vec![0.0; def.triggers.len()];
        }
        self.enemies.push(enemy);
        id
    }

    pub fn spawn_companion(&mut self, identity: &str, affinity: f32, level: u32, x: f32, y: f32) -> u32 {
        let id = self.alloc_id();
        let mut companion = Companion::new(id, identity, affinity, level, x, y);
        if let Some(def) = self.content.ally_aura(identity) {
            companion.trigger_cooldowns = vec![0.0; def.triggers.len()];
        }
        self.companions.push(companion);
        id
    }

    /// 弾を生成する。敵弾なら発射元の ID とクラスを記録する
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_projectile(
        &mut self,
        team: Team,
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
        damage: f32,
        lifetime: f32,
        pierce: u32,
        source: Option<(u32, EnemyClass)>,
    ) -> u32 {
        let id = self.alloc_id();
        let mut p = Projectile::new(id, x, y, vx, vy, lifetime, team, damage).with_pierce(pierce);
        if let Some((source_id, class)) = source {
            p = p.with_source(source_id, class);
        }
        self.projectiles.push(p);
        id
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.actor.id == id)
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.actor.id == id)
    }

    /// 表示済みプロンプトを閉じる（UI から）
    pub fn dismiss_prompt(&mut self) -> Option<String> {
        self.pending_prompts.pop_front()
    }

    pub fn drain_frame_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.frame_events)
    }

    /// 未 drain のイベントを `MAX_PENDING_FRAME_EVENTS` 件に収める
    pub(crate) fn cap_frame_events(&mut self) {
        let excess = self.frame_events.len().saturating_sub(MAX_PENDING_FRAME_EVENTS);
        if excess > 0 {
            self.frame_events.drain(..excess);
            log::warn!("frame events not drained; dropped {} oldest", excess);
        }
    }

    pub(crate) fn cue(&mut self, cue: AudioCue) {
        self.outbox.push(SideEffect::Cue(cue));
    }

    /// 敵位置の空間ハッシュを再構築する（撃破済みは除外）
    pub(crate) fn rebuild_enemy_hash(&mut self) {
        self.enemy_hash.clear();
        for (i, e) in self.enemies.iter().enumerate() {
            if !e.actor.is_defeated() {
                self.enemy_hash.insert_rect(i, &e.actor.rect());
            }
        }
    }
}
