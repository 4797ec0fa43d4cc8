#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use sasnum_rs::prelude::*;

// ============================================================================
// Ift Builder Tests
// ============================================================================

#[test]
fn test_ift_builder_defaults() {
    let solver = Ift::<f64>::new().build().unwrap();
    let controls = solver.controls();

    assert_relative_eq!(controls.alpha, 1.0);
    assert_relative_eq!(controls.omega, 0.5);
    assert_eq!(controls.maxit, 1000);
    assert_eq!(controls.minit, 10);
}

#[test]
fn test_ift_builder_rejects_bad_parameters() {
    assert_eq!(
        Ift::<f64>::new().relaxation(0.0).build().unwrap_err(),
        SasError::InvalidRelaxation(0.0)
    );
    assert_eq!(
        Ift::<f64>::new().relaxation(1.5).build().unwrap_err(),
        SasError::InvalidRelaxation(1.5)
    );
    assert_eq!(
        Ift::<f64>::new().step_reduction(1.0).build().unwrap_err(),
        SasError::InvalidReduction(1.0)
    );
    assert_eq!(
        Ift::<f64>::new().tolerance(-0.1).build().unwrap_err(),
        SasError::InvalidTolerance(-0.1)
    );
    assert_eq!(
        Ift::<f64>::new()
            .max_iterations(5)
            .min_iterations(10)
            .build()
            .unwrap_err(),
        SasError::InvalidIterations {
            maxit: 5,
            minit: 10,
        }
    );
}

#[test]
fn test_ift_solve_validates_prior() {
    let t_data = [1.0, 0.0, 0.0, 1.0];
    let t = MatrixView::from_slice(&t_data, 2, 2).unwrap();
    let system = assemble(t, &[1.0, 1.0], &[1.0, 1.0]).unwrap();
    let solver = Ift::new().build().unwrap();

    assert_eq!(
        solver.solve(&system, &[]).unwrap_err(),
        SasError::EmptyInput
    );
    assert_eq!(
        solver.solve(&system, &[1.0, 2.0, 3.0]).unwrap_err(),
        SasError::LengthMismatch {
            name: "prior",
            expected: 2,
            got: 3,
        }
    );
    assert!(matches!(
        solver.solve(&system, &[1.0, f64::NAN]).unwrap_err(),
        SasError::InvalidNumericValue(_)
    ));
}

#[test]
fn test_ift_solve_converges_on_identity_system() {
    // T = I, I = var = [1, 1] assembles B = I, Bmat = 0, sum_dia = [1, 1].
    // The symmetric damped recurrence has fixed point 2/3 per component.
    let t_data = [1.0, 0.0, 0.0, 1.0];
    let t = MatrixView::from_slice(&t_data, 2, 2).unwrap();
    let system = assemble(t, &[1.0, 1.0], &[1.0, 1.0]).unwrap();

    let solver = Ift::new()
        .max_iterations(300)
        .min_iterations(300)
        .tolerance(0.0)
        .build()
        .unwrap();
    let solution = solver.solve(&system, &[0.5, 0.5]).unwrap();

    assert_relative_eq!(solution.pr[0], 2.0 / 3.0, max_relative = 1e-9);
    assert_relative_eq!(solution.pr[1], 2.0 / 3.0, max_relative = 1e-9);
    assert!(solution.penalty <= 0.0);
}

#[test]
fn test_ift_solve_in_place_validates_shapes() {
    let solver = Ift::new().build().unwrap();
    let b_data = [0.0; 6];
    let b = MatrixView::from_slice(&b_data, 2, 3).unwrap();
    let bmat_data = [0.0; 4];
    let bmat = MatrixView::from_slice(&bmat_data, 2, 2).unwrap();
    let mut p = [0.0, 0.0];
    let mut ws = IftWorkspace::new(2);

    let err = solver
        .solve_in_place(b, bmat, &[1.0, 1.0], &[1.0, 1.0], &mut p, &mut ws)
        .unwrap_err();
    assert_eq!(
        err,
        SasError::DimensionMismatch {
            name: "B",
            expected: (2, 2),
            got: (2, 3),
        }
    );

    let b = MatrixView::from_slice(&bmat_data, 2, 2).unwrap();
    let err = solver
        .solve_in_place(b, bmat, &[1.0], &[1.0, 1.0], &mut p, &mut ws)
        .unwrap_err();
    assert_eq!(
        err,
        SasError::LengthMismatch {
            name: "sum_dia",
            expected: 2,
            got: 1,
        }
    );
}

#[test]
fn test_full_pipeline_produces_finite_distribution() {
    // Synthesize a measured curve from the sphere prior itself, then
    // solve the assembled system starting from that prior.
    let n = 10;
    let dmax = 40.0;
    let (prior, r_axis) = sphere_prior::<f64>(n, dmax, 1.0).unwrap();

    let q: Vec<f64> = (1..=20).map(|k| 0.01 * k as f64).collect();
    let mut t_buf = vec![0.0; q.len() * n];
    transfer_matrix(&q, &r_axis, 1.0, &mut t_buf).unwrap();
    let t = MatrixView::from_slice(&t_buf, q.len(), n).unwrap();

    let intensity: Vec<f64> = (0..q.len())
        .map(|i| (0..n).map(|j| t.get(i, j) * prior[j]).sum())
        .collect();
    let variance = vec![1e-4; q.len()];

    let system = assemble(t, &intensity, &variance).unwrap();
    let solver = Ift::new().build().unwrap();
    let solution = solver.solve(&system, &prior).unwrap();

    assert_eq!(solution.pr.len(), n);
    assert!(solution.pr.iter().all(|v| v.is_finite()));
    assert!(solution.penalty.is_finite());
    assert!(solution.penalty <= 0.0);
}

// ============================================================================
// RadialAverager Builder Tests
// ============================================================================

#[test]
fn test_averager_requires_center() {
    assert_eq!(
        RadialAverager::<f64>::new().build().unwrap_err(),
        SasError::MissingParameter {
            parameter: "center",
        }
    );
    assert!(matches!(
        RadialAverager::new().center(f64::NAN, 1.0).build(),
        Err(SasError::InvalidNumericValue(_))
    ));
}

#[test]
fn test_averager_rejects_degenerate_bounds() {
    let image_data = vec![1.0; 16];
    let image = MatrixView::from_slice(&image_data, 4, 4).unwrap();

    let averager = RadialAverager::new()
        .center(1.5, 1.5)
        .bounds(2, 3)
        .build()
        .unwrap();
    assert_eq!(
        averager.average(image, None, None).unwrap_err(),
        SasError::InvalidBinRange { low: 2, high: 3 }
    );
}

#[test]
fn test_averager_rejects_mismatched_mask() {
    let image_data = vec![1.0; 16];
    let image = MatrixView::from_slice(&image_data, 4, 4).unwrap();
    let mask_data = vec![1.0; 9];
    let mask = MatrixView::from_slice(&mask_data, 3, 3).unwrap();

    let averager = RadialAverager::new().center(1.5, 1.5).build().unwrap();
    assert_eq!(
        averager.average(image, Some(mask), None).unwrap_err(),
        SasError::DimensionMismatch {
            name: "mask",
            expected: (4, 4),
            got: (3, 3),
        }
    );
}

// ============================================================================
// Radial Averaging Tests
// ============================================================================

#[test]
fn test_average_constant_image() {
    let image_data = vec![2.0; 16];
    let image = MatrixView::from_slice(&image_data, 4, 4).unwrap();

    let averager = RadialAverager::new()
        .center(1.5, 1.5)
        .bounds(0, 3)
        .build()
        .unwrap();
    let profile = averager.average(image, None, None).unwrap();

    assert_eq!(profile.counts, vec![0.0, 8.0, 4.0]);
    assert_relative_eq!(profile.intensity[1], 2.0);
    assert_relative_eq!(profile.intensity[2], 2.0);
    assert_relative_eq!(profile.errors[1], 0.0);

    // Bin zero carries the center pixel directly.
    assert_relative_eq!(profile.intensity[0], 2.0);
}

#[test]
fn test_average_default_bounds_span_to_edge() {
    // Center (1.5, 1.5) in a 4x4 image: the largest edge span is 2.5,
    // so the default upper bound truncates to 2 bins.
    let image_data = vec![3.0; 16];
    let image = MatrixView::from_slice(&image_data, 4, 4).unwrap();

    let averager = RadialAverager::new().center(1.5, 1.5).build().unwrap();
    let profile = averager.average(image, None, None).unwrap();

    assert_eq!(profile.intensity.len(), 2);
    assert_eq!(profile.counts, vec![0.0, 8.0]);
    assert_relative_eq!(profile.intensity[1], 3.0);
    assert_relative_eq!(profile.intensity[0], 3.0);
}

#[test]
fn test_average_mixed_bin_reports_mean_and_spread() {
    // Four of the eight bin-1 pixels carry 4.0, the rest 2.0: the bin
    // mean is 3.0 and the population spread is exactly 1.0.
    let mut image_data = vec![2.0; 16];
    for idx in [1, 2, 4, 7] {
        image_data[idx] = 4.0;
    }
    let image = MatrixView::from_slice(&image_data, 4, 4).unwrap();

    let averager = RadialAverager::new()
        .center(1.5, 1.5)
        .bounds(0, 3)
        .build()
        .unwrap();
    let profile = averager.average(image, None, None).unwrap();

    assert_eq!(profile.counts[1], 8.0);
    assert_relative_eq!(profile.intensity[1], 3.0, max_relative = 1e-12);
    assert_relative_eq!(
        profile.errors[1],
        1.0 / 8.0_f64.sqrt(),
        max_relative = 1e-12
    );
    // The other bins stay untouched by the bright pixels.
    assert_relative_eq!(profile.intensity[2], 2.0);
}

#[test]
fn test_average_respects_mask() {
    let image_data = vec![2.0; 16];
    let image = MatrixView::from_slice(&image_data, 4, 4).unwrap();
    // Exclude two of the eight bin-1 pixels.
    let mut mask_data = vec![1.0; 16];
    mask_data[1] = 0.0;
    mask_data[4] = 0.0;
    let mask = MatrixView::from_slice(&mask_data, 4, 4).unwrap();

    let averager = RadialAverager::new()
        .center(1.5, 1.5)
        .bounds(0, 3)
        .build()
        .unwrap();
    let profile = averager.average(image, Some(mask), None).unwrap();

    assert_eq!(profile.counts[1], 6.0);
    assert_relative_eq!(profile.intensity[1], 2.0);
}

#[test]
fn test_average_subtracts_readout_noise() {
    // An all-zeros noise mask turns every bin-1 pixel into a noise
    // sample with mean 3, which is then subtracted from every bin.
    let image_data = vec![3.0; 16];
    let image = MatrixView::from_slice(&image_data, 4, 4).unwrap();
    let noise_mask_data = vec![0.0; 16];
    let noise_mask = MatrixView::from_slice(&noise_mask_data, 4, 4).unwrap();

    let averager = RadialAverager::new()
        .center(1.5, 1.5)
        .bounds(0, 3)
        .build()
        .unwrap();
    let profile = averager.average(image, None, Some(noise_mask)).unwrap();

    assert_eq!(profile.counts[1], 8.0);
    assert_relative_eq!(profile.intensity[0], 0.0);
    assert_relative_eq!(profile.intensity[1], 0.0);
    assert_relative_eq!(profile.intensity[2], 0.0);
    // Zero spread in both signal and noise leaves the error bars at zero.
    assert_relative_eq!(profile.errors[1], 0.0);
}
