//! Path: native/dungeon_sim/benches/tick_bench.rs
//! Summary: 既定ダンジョンでの physics_step ベンチマーク（全部屋解放・弾増量）

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use dungeon_core::entity_params::ProjectileKind;
use dungeon_sim::world::Launch;
use dungeon_sim::{physics_step, GameWorld, InputSnapshot, SimConfig};

#[derive(Clone, Copy)]
struct Scenario {
    name:        &'static str,
    unlock_all:  bool,
    projectiles: usize,
}

fn build_world(s: Scenario) -> GameWorld {
    let mut world = match GameWorld::new(SimConfig::with_seed(42)) {
        Ok(w) => w,
        Err(e) => panic!("default layout must build: {e}"),
    };
    if s.unlock_all {
        let ids: Vec<_> = (0..world.map.rooms().len()).map(dungeon_sim::RoomId).collect();
        for id in ids {
            world.map.unlock(id);
        }
    }
    let (cx, cy) = world.player.center();
    for i in 0..s.projectiles {
        let angle = i as f32 * 0.017;
        world
            .projectiles
            .spawn(Launch::toward_angle(ProjectileKind::Shard, cx + 200.0, cy + 40.0, angle, 90.0), 0.0);
    }
    world
}

fn bench_tick(c: &mut Criterion) {
    let scenarios = [
        Scenario { name: "tick_default", unlock_all: false, projectiles: 0 },
        Scenario { name: "tick_all_rooms_unlocked", unlock_all: true, projectiles: 0 },
        Scenario { name: "tick_projectiles_2000", unlock_all: true, projectiles: 2_000 },
    ];
    let input = InputSnapshot { attack: true, ..InputSnapshot::moving(1.0, 0.0) };

    for scenario in scenarios {
        c.bench_function(scenario.name, |b| {
            b.iter_batched(
                || build_world(scenario),
                |mut world| {
                    physics_step(&mut world, &input);
                    world
                },
                BatchSize::PerIteration,
            )
        });
    }
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
