//! End-to-end tests of the fractional-step pipeline: a full
//! predict → solve_poisson → correct cycle must leave the velocity field
//! discretely divergence-free.

use rill_core::{Domain, Field, FlowField, WallValues};
use rill_solver::{correct, decide_dt, flow_metrics, predict, FlowSolver, PoissonSolver};
use rill_test_utils::{divergence_max, fill_uy_faces, perturb_interior};

fn projection_cycle(domain: &Domain, flow: &mut FlowField, re: f64) -> (f64, f64) {
    let before = divergence_max(domain, flow);
    let mut dux = Field::new(domain);
    let mut duy = Field::new(domain);
    let mut psi = Field::new(domain);
    let mut poisson = PoissonSolver::new(domain).unwrap();
    let dt = decide_dt(domain, flow, re);
    predict(domain, flow, &mut dux, &mut duy, re, dt).unwrap();
    poisson.solve(domain, flow, dt, &mut psi).unwrap();
    correct(domain, flow, &psi, dt).unwrap();
    (before, divergence_max(domain, flow))
}

#[test]
fn projection_kills_divergence_fully_periodic() {
    let domain = Domain::new(1.0, 1.0, 32, 32, true, true).unwrap();
    let mut flow = FlowField::new(&domain, WallValues::default()).unwrap();
    let pi = std::f64::consts::PI;
    flow.ux
        .fill_interior_with(&domain, |x, y| (2.0 * pi * x).sin() * (2.0 * pi * y).cos());
    flow.uy
        .fill_interior_with(&domain, |x, y| (2.0 * pi * (x + y)).cos());
    perturb_interior(&domain, &mut flow.ux, 0.1, 11);
    perturb_interior(&domain, &mut flow.uy, 0.1, 12);
    flow.refresh_boundaries(&domain).unwrap();

    let (before, after) = projection_cycle(&domain, &mut flow, 200.0);
    assert!(before > 1.0, "initial field should be divergent, got {before}");
    assert!(after < 1e-9, "divergence survived the projection: {after}");
}

#[test]
fn projection_kills_divergence_periodic_x_walled_y() {
    let domain = Domain::new(1.0, 2.0, 32, 24, true, false).unwrap();
    let mut flow = FlowField::new(&domain, WallValues::default()).unwrap();
    let pi = std::f64::consts::PI;
    flow.ux
        .fill_interior_with(&domain, |x, y| (2.0 * pi * x).sin() * (pi * y / 2.0).cos());
    // uy vanishing on both y walls keeps the net boundary flux zero, so the
    // singular zero-wavenumber mode stays consistent
    fill_uy_faces(&domain, &mut flow.uy, |x, y| {
        (pi * y / 2.0).sin() * (2.0 * pi * x).cos()
    });
    flow.refresh_boundaries(&domain).unwrap();

    let (before, after) = projection_cycle(&domain, &mut flow, 200.0);
    assert!(before > 0.5, "initial field should be divergent, got {before}");
    assert!(after < 1e-9, "divergence survived the projection: {after}");
}

#[test]
fn projection_kills_divergence_walled_x() {
    // odd nx exercises the cosine transform's direct-summation fallback
    let domain = Domain::new(1.0, 1.0, 21, 16, false, false).unwrap();
    let mut flow = FlowField::new(&domain, WallValues::default()).unwrap();
    let pi = std::f64::consts::PI;
    flow.ux
        .fill_interior_with(&domain, |x, y| (pi * x).sin() * (pi * y).cos());
    fill_uy_faces(&domain, &mut flow.uy, |x, y| (pi * y).sin() * (pi * x).cos());
    flow.refresh_boundaries(&domain).unwrap();

    let (before, after) = projection_cycle(&domain, &mut flow, 200.0);
    assert!(before > 0.5, "initial field should be divergent, got {before}");
    assert!(after < 1e-9, "divergence survived the projection: {after}");
}

#[test]
fn full_pipeline_runs_and_stays_finite() {
    // falling-flow configuration in miniature: uniform downward inflow past
    // a porous obstacle
    let domain = Domain::new(1.0, 3.0, 16, 48, true, false).unwrap();
    let walls = WallValues {
        uy_yp: -1.0,
        ..WallValues::default()
    };
    let mut flow = FlowField::new(&domain, walls).unwrap();
    for j in 1..=domain.ny() {
        for i in 1..=domain.nx() {
            flow.uy[(j, i)] = -1.0;
        }
    }
    let (cx, cy) = (0.5, 2.5);
    let radius = 1.0 / 8.0;
    flow.weight.fill_interior_with(&domain, |x, y| {
        let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
        0.5 * (1.0 + ((d - radius) * domain.ny() as f64).tanh())
    });
    flow.refresh_boundaries(&domain).unwrap();

    let mut solver = FlowSolver::new(&domain, 100.0).unwrap();
    let mut time = 0.0;
    for _ in 0..20 {
        let dt = solver.integrate(&domain, &mut flow).unwrap();
        assert!(dt > 0.0 && dt.is_finite());
        time += dt;
    }
    assert!(time > 0.0);

    let metrics = flow_metrics(&domain, &flow);
    assert!(metrics.ux_max.is_finite());
    assert!(metrics.uy_max.is_finite());
    assert!(metrics.uy_max < 10.0, "flow blew up: {}", metrics.uy_max);
    // divergence in the bulk stays small; the open outflow row absorbs the
    // inflow/outflow imbalance of each step
    assert!(metrics.div_max.is_finite());
}

#[test]
fn solver_exposes_psi_for_sampling() {
    let domain = Domain::new(1.0, 1.0, 8, 8, true, true).unwrap();
    let mut flow = FlowField::new(&domain, WallValues::default()).unwrap();
    perturb_interior(&domain, &mut flow.ux, 0.5, 3);
    perturb_interior(&domain, &mut flow.uy, 0.5, 4);
    flow.refresh_boundaries(&domain).unwrap();
    let mut solver = FlowSolver::new(&domain, 50.0).unwrap();
    solver.integrate(&domain, &mut flow).unwrap();
    let psi = solver.psi();
    assert_eq!(psi.nx(), 8);
    assert!(psi.as_slice().iter().all(|v| v.is_finite()));
}
