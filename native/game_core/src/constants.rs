//! Path: native/game_core/src/constants.rs
//! Summary: ワールドサイズ・フレーム予算・無敵時間・各種上限などの定数定義

// World size (level layouts may override)
pub const WORLD_WIDTH:  f32 = 1280.0;
pub const WORLD_HEIGHT: f32 = 960.0;

// Frame budget / dt clamp
pub const FRAME_BUDGET_MS: f64 = 1000.0 / 60.0;
/// 遅いフレームでも積分誤差が暴れないよう dt をこの値で打ち切る
pub const MAX_DT: f32 = 1.0 / 30.0;
/// drain されずに溜まったフレームイベントの上限（古いものから捨てる）
pub const MAX_PENDING_FRAME_EVENTS: usize = 512;

// Player body
pub const PLAYER_HALF_EXTENT: f32 = 12.0;
pub const PLAYER_SPEED:       f32 = 150.0;
pub const PLAYER_MAX_HP:      f32 = 20.0;
/// 被弾後の無敵時間（秒）
pub const PLAYER_INVULN:      f32 = 0.5;
/// プレイヤー死亡演出の長さ（秒）
pub const PLAYER_DEATH_SEQUENCE: f32 = 2.0;
/// プレイヤーの回避ダッシュ
pub const PLAYER_DASH_DURATION: f32 = 0.18;
pub const PLAYER_DASH_SPEED_MULT: f32 = 2.5;
pub const PLAYER_DASH_COOLDOWN: f32 = 1.2;

// Player attacks
pub const MELEE_DAMAGE:       f32 = 3.0;
pub const MELEE_REACH:        f32 = 28.0;
pub const MELEE_COOLDOWN:     f32 = 0.45;
pub const RANGED_DAMAGE:      f32 = 2.0;
pub const RANGED_COOLDOWN:    f32 = 0.6;
pub const PROJECTILE_SPEED:   f32 = 320.0;
pub const PROJECTILE_LIFETIME: f32 = 1.6;
pub const PROJECTILE_HALF_EXTENT: f32 = 3.0;
/// 直近に射撃したプレイヤーを「遠隔警戒」扱いする時間
pub const RECENTLY_FIRED_WINDOW: f32 = 2.5;

// Enemy ranged attacks
pub const ENEMY_FIRE_RANGE:    f32 = 260.0;
pub const ENEMY_FIRE_INTERVAL: f32 = 2.2;
pub const ENEMY_PROJECTILE_SPEED: f32 = 200.0;

// Crit (player → enemy)
pub const BASE_CRIT_CHANCE:   f32 = 0.08;
pub const CRIT_MULTIPLIER:    f32 = 1.5;

// Knockback
pub const KNOCKBACK_SPEED:    f32 = 220.0;
/// ノックバック速度の指数減衰率（1/秒）
pub const KNOCKBACK_DECAY:    f32 = 10.0;

// Contact
/// 接触時の位置補正でプレイヤー側が受け持つ割合
pub const CONTACT_SEPARATION_BIAS: f32 = 0.3;

// Crowd separation
pub const SEPARATION_RADIUS:  f32 = 24.0;
pub const SEPARATION_FORCE:   f32 = 6.0;

// Hazards
pub const HAZARD_GRACE:       f32 = 0.25;
pub const BURN_LINGER:        f32 = 1.5;
pub const MUD_SLOW_FACTOR:    f32 = 0.55;
pub const FIRE_BURN_DPS:      f32 = 1.5;
pub const LAVA_BURN_DPS:      f32 = 3.0;
/// スロー係数の下限（これ以上遅くはならない）
pub const MIN_SLOW_FACTOR:    f32 = 0.25;

// Wind deflection
pub const DEFLECT_RADIUS:     f32 = 70.0;
pub const DEFLECT_DAMAGE_FACTOR: f32 = 0.6;
pub const DEFLECT_MAX_ANGLE:  f32 = 0.6;

/// 回避・風逸らしで一度に走査する弾の最大数
pub const PROJECTILE_SCAN_LIMIT: usize = 24;

// Breakables
pub const BREAKABLE_HP:       f32 = 3.0;

// Companions
pub const COMPANION_FOLLOW_DIST: f32 = 48.0;
pub const COMPANION_SPEED:    f32 = 140.0;

// Flow field
pub const FLOW_TILE_SIZE:     f32 = 32.0;

// Spatial hash cell size (obstacles)
pub const CELL_SIZE:          f32 = 64.0;

// Boss cinematic
pub const PHASE_PAUSE_DURATION: f32 = 1.2;
pub const CAMERA_PAN_DURATION:  f32 = 0.8;

/// RNG の既定シード
pub const SIM_RNG_SEED: u64 = 67890;
