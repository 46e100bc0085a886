//! Path: native/game_simulation/src/main.rs
//! Summary: ヘッドレス実行（デモアリーナを固定フレーム数だけ回し、要約とスナップショットを出力）
//!
//! 使い方: `game_simulation [フレーム数] [コンテンツ JSON のパス]`
//! RUST_LOG=debug で行動開始やフェーズ移行のログが見られる。

use game_core::enemy::EnemyClass;
use game_core::obstacle::{Obstacle, ObstacleKind};
use game_core::physics::geometry::Rect;
use game_simulation::{
    build_render_frame, ContentPack, FrameEvent, FrameInput, GameWorld, RecordingCollaborators,
};

const DEFAULT_FRAMES: u32 = 600;
const FRAME_DT: f32 = 1.0 / 60.0;
const SNAPSHOT_PATH: &str = "saves/headless.bin";

/// デモ用コンテンツ（仲間オーラと 3 フェーズのボス）
const DEMO_CONTENT: &str = r#"{
    "ally_auras": {
        "mira": {
            "effects": [
                { "type": "dr", "value": 1.0 },
                { "type": "slow", "value": 0.2, "radius": 160.0, "anchor": "player" }
            ]
        }
    },
    "boss_profiles": {
        "tyrant": { "phases": 3, "prompts": ["tyrant_rises"], "level_transition": true }
    }
}"#;

fn load_content(path: Option<&str>) -> ContentPack {
    let parsed = match path {
        Some(p) => std::fs::read_to_string(p)
            .map_err(|e| e.to_string())
            .and_then(|json| ContentPack::from_json_str(&json).map_err(|e| e.to_string())),
        None => ContentPack::from_json_str(DEMO_CONTENT).map_err(|e| e.to_string()),
    };
    parsed.unwrap_or_else(|e| {
        log::warn!("content pack rejected, using defaults: {e}");
        ContentPack::default()
    })
}

fn build_arena(world: &mut GameWorld) {
    world.load_obstacles(vec![
        Obstacle::new(Rect::new(420.0, 300.0, 32.0, 200.0), ObstacleKind::Wall),
        Obstacle::new(Rect::new(560.0, 640.0, 96.0, 64.0), ObstacleKind::Lava),
        Obstacle::new(Rect::new(700.0, 420.0, 24.0, 24.0), ObstacleKind::Barrel),
    ]);
    world.place_player(640.0, 480.0);
    world.spawn_companion("mira", 0.8, 3, 600.0, 500.0);
    for i in 0..4 {
        world.spawn_enemy(EnemyClass::Mook, "grunt", 200.0 + 200.0 * i as f32, 140.0);
    }
    world.spawn_enemy(EnemyClass::Boss, "tyrant", 1040.0, 300.0);
}

/// 円を描くように歩きつつ、一定間隔で攻撃・射撃・調べる
fn scripted_input(frame: u32) -> FrameInput {
    let t = frame as f32 * FRAME_DT;
    FrameInput {
        move_x: (t * 0.7).cos(),
        move_y: (t * 0.7).sin(),
        attack: frame % 20 == 0,
        ranged_attack: frame % 45 == 0,
        interact: frame % 60 == 0,
        dash: frame % 180 == 90,
        paused: (300..330).contains(&frame),
        ranged_equipped: true,
    }
}

fn main() {
    let _ = env_logger::Builder::from_default_env().try_init();

    let args: Vec<String> = std::env::args().collect();
    let frames = args
        .get(1)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_FRAMES);
    let content = load_content(args.get(2).map(String::as_str));

    let mut world = GameWorld::new(content);
    build_arena(&mut world);
    let mut collab = RecordingCollaborators::default();

    let mut failed = 0usize;
    let mut slowest_ms = 0.0f64;
    let mut player_defeated = false;
    for frame in 0..frames {
        let outcome = world.step(FRAME_DT, &scripted_input(frame), &mut collab);
        failed += outcome.failed_side_effects;
        slowest_ms = slowest_ms.max(world.last_frame_time_ms);

        let render = build_render_frame(&mut world);
        for event in &render.events {
            match event {
                FrameEvent::PlayerDefeated => player_defeated = true,
                FrameEvent::BossPhaseShift { id, phase } => {
                    log::info!("frame {frame}: boss {id} entered {phase:?}");
                }
                FrameEvent::LevelTransitionReady => log::info!("frame {frame}: level transition ready"),
                _ => {}
            }
        }
        // UI の代わりにプロンプトを即座に閉じる
        if world.mode.is_running() {
            while world.dismiss_prompt().is_some() {}
        }
        if player_defeated {
            log::info!("frame {frame}: player defeated, stopping");
            break;
        }
    }

    log::info!(
        "simulated {} frames: kills={} enemies_left={} player_hp={:.1} xp_granted={} failed_side_effects={} slowest={:.2}ms",
        world.frame_id,
        world.kill_count,
        world.enemies.len(),
        world.player.actor.hp,
        collab.xp_total(),
        failed,
        slowest_ms,
    );

    match world.snapshot().save_to_file(SNAPSHOT_PATH) {
        Ok(()) => log::info!("snapshot saved to {SNAPSHOT_PATH}"),
        Err(e) => log::warn!("snapshot not saved: {e}"),
    }
}
