use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quadphase::{Body, BodyId, Fp, QuadTree, SimConfig, Simulation, Spawn, Square, Vec2};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn spawns(n: usize) -> Vec<Spawn> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..n)
        .map(|_| {
            let pos = Vec2::new(rng.gen::<Fp>() * 600.0, rng.gen::<Fp>() * 600.0);
            Spawn::random(pos, (-50.0, 100.0), &mut rng)
        })
        .collect()
}

fn brute_force(bodies: &mut [Body]) -> usize {
    let mut detections = 0;
    for i in 0..bodies.len() {
        for j in 0..bodies.len() {
            if i == j {
                continue;
            }
            detections += 1;
            if bodies[i].intersects(&bodies[j]) {
                bodies[i].collided = true;
                bodies[j].collided = true;
                break;
            }
        }
    }
    detections
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision pass");
    for &n in &[250usize, 1000, 4000] {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        sim.advance_frame(0.0, &spawns(n), false).unwrap();

        group.bench_with_input(BenchmarkId::new("quadtree frame", n), &n, |b, _| {
            b.iter(|| sim.advance_frame(black_box(0.0), &[], false).unwrap())
        });

        let mut bodies = sim.bodies().to_vec();
        group.bench_with_input(BenchmarkId::new("brute force", n), &n, |b, _| {
            b.iter(|| brute_force(black_box(&mut bodies)))
        });
    }
    group.finish();

    let bodies: Vec<Body> = spawns(2000)
        .into_iter()
        .map(|s| s.into_body(10.0, Vec2::new(600.0, 600.0)).unwrap())
        .collect();
    let world = Square::new(Vec2::new(300.0, 300.0), 300.0);
    c.bench_function("quadtree build 2000", |b| {
        b.iter(|| {
            let mut tree = QuadTree::new(world, &bodies);
            for i in 0..bodies.len() {
                tree.insert(BodyId(i)).unwrap();
            }
            tree.node_count()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
