//! ステアリングのベンチマーク: ハザードに囲まれた位置での方向選択

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use game_core::constants::CELL_SIZE;
use game_core::obstacle::{Obstacle, ObstacleKind};
use game_core::physics::geometry::Rect;
use game_core::physics::spatial_hash::ObstacleField;
use game_core::tuning::GlobalTuning;
use game_simulation::{steer_heading, SteeringRequest};

fn setup_field() -> ObstacleField {
    let mut field = ObstacleField::new(CELL_SIZE);
    let obstacles = (0..200)
        .map(|i| {
            let x = (i % 20) as f32 * 64.0;
            let y = (i / 20) as f32 * 96.0;
            let kind = if i % 3 == 0 { ObstacleKind::Fire } else { ObstacleKind::Lava };
            Obstacle::new(Rect::new(x, y, 32.0, 32.0), kind)
        })
        .collect();
    field.rebuild(obstacles);
    field
}

fn bench_steering(c: &mut Criterion) {
    let field = setup_field();
    let global = GlobalTuning::default();
    let req = SteeringRequest {
        x: 300.0,
        y: 300.0,
        desired: (1.0, 0.0),
        target: (900.0, 320.0),
        clear_los: true,
    };
    c.bench_function("steer_heading", |b| {
        b.iter(|| steer_heading(black_box(&field), &global, black_box(&req)))
    });
}

criterion_group!(benches, bench_steering);
criterion_main!(benches);
