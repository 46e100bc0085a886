//! Path: native/game_simulation/src/world/frame_event.rs
//! Summary: フレーム内で発生した描画・進行向けイベント（毎フレーム drain される）

use game_core::boss::BossPhase;
use game_core::enemy::EnemyClass;
use game_core::loot::PickupKind;

/// ダメージ表示の種類
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HitLabel {
    Normal,
    Crit,
    /// 防御貫通で通ったヒット
    Pierce,
    /// 大半を防御で吸収したヒット
    Graze,
    /// シールドまたは防御で完全に無効化
    Blocked,
}

/// ダメージ以外の状態表示
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StatusLabel {
    Burn,
    Slow,
    Guard,
    Enrage,
    Shield,
    Deflect,
    Rally,
    Focus,
    Haste,
    Bulwark,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    FloatingText   { x: f32, y: f32, amount: f32, label: HitLabel },
    StatusText     { x: f32, y: f32, status: StatusLabel },
    Sparkle        { x: f32, y: f32, count: u32 },
    ScreenShake    { intensity: f32, duration: f32 },
    PlayerDamaged  { damage: f32 },
    EnemyDefeated  { id: u32, class: EnemyClass, x: f32, y: f32 },
    BossPhaseShift { id: u32, phase: BossPhase },
    BossDefeated   { id: u32 },
    ObstacleBroken { index: usize },
    PickupCollected { kind: PickupKind, value: f32 },
    /// 演出が終わり、物語プロンプトを表示できる
    PromptReady    { prompt: String },
    PlayerDefeated,
    /// 予約済みのレベル遷移を実行してよい
    LevelTransitionReady,
}
