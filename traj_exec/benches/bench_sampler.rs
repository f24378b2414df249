//! # Sampler Benchmark

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::{UnitQuaternion, Vector3};
use std::time::{Duration, Instant};

use traj_lib::{
    sampler::{Sampler, SamplerParams},
    traj::{TrajBuffer, Trajectory, Waypoint, DEFAULT_WAYPOINT_SPACING},
};

fn sampler_benchmark(c: &mut Criterion) {
    // ---- Build a long trajectory ----

    // Ten minutes of waypoints at the default spacing
    let num_points = 6000u32;
    let points = (0..num_points)
        .map(|i| {
            let x = i as f64 * 0.01;
            Waypoint {
                time_from_start: DEFAULT_WAYPOINT_SPACING * i,
                position_m: Some(Vector3::new(x, x.sin(), 1.0)),
                attitude_q: Some(UnitQuaternion::from_euler_angles(0.0, 0.0, x)),
                velocity_ms: Some(Vector3::new(0.1, x.cos() * 0.1, 0.0)),
                ang_vel_rads: Some(Vector3::new(0.0, 0.0, 0.1)),
                accel_mss: None,
            }
        })
        .collect();

    let traj = Trajectory::new(Utc::now(), "map", points).unwrap();

    let buffer = TrajBuffer::new();
    let sampler = Sampler::new(SamplerParams::default(), buffer.clone());

    let start = Instant::now();
    buffer.replace(traj, start);

    // Bench sampling near the start and near the end of the trajectory
    c.bench_function("Sampler::sample::start", |b| {
        b.iter(|| sampler.sample(black_box(start + Duration::from_millis(50))))
    });

    let near_end = start + DEFAULT_WAYPOINT_SPACING * (num_points - 2);
    c.bench_function("Sampler::sample::end", |b| {
        b.iter(|| sampler.sample(black_box(near_end)))
    });
}

criterion_group!(benches, sampler_benchmark);
criterion_main!(benches);
