use approx::assert_abs_diff_eq;
use ndarray::{s, Array1, Array2, Array3, Array4};

use weno::prelude::*;

/// Cell boundaries `x_j = j - 1/2`, so cell `i` is centred on `i`.
fn centred_grid(cells: usize) -> Vec<f64> {
    (0..=cells).map(|j| j as f64 - 0.5).collect()
}

/// Stretched grid with cell widths between 0.5 and 1.5.
fn stretched_grid(cells: usize) -> Vec<f64> {
    let mut x = vec![0.0];
    for j in 0..cells {
        let h = 1.0 + 0.5 * ((j as f64) * 1.3).sin();
        x.push(x[j] + h);
    }
    x
}

/// Exact cell averages of `f(x) = a + b x + d x^2` on the grid.
fn quadratic_averages(x: &[f64], a: f64, b: f64, d: f64) -> Array1<f64> {
    let primitive = |t: f64| a * t + b * t * t / 2.0 + d * t * t * t / 3.0;
    (0..x.len() - 1)
        .map(|j| (primitive(x[j + 1]) - primitive(x[j])) / (x[j + 1] - x[j]))
        .collect()
}

fn coefficients(x: &[f64], k: usize, points: &[f64]) -> Array4<f64> {
    let cells = x.len() - 1;
    let mut c = Array4::zeros((cells, k, points.len(), k));
    coefficients_for_points(x, points, c.view_mut()).unwrap();
    c
}

#[test]
fn linear_data_reconstructs_cell_edges() {
    let (cells, k) = (20, 3);
    let x = centred_grid(cells);
    let q: Array1<f64> = (0..cells).map(|i| i as f64).collect();
    let c = coefficients(&x, k, &[0.0, 1.0]);

    let sigma = Array2::<f64>::zeros((cells, k));
    let w = Array2::from_shape_fn((cells, k), |(_, r)| [0.1, 0.6, 0.3][r]);
    let mut wr = Array2::<f64>::zeros((cells, k));
    let mut qr = Array3::<f64>::zeros((cells, k, 2));
    let mut qs = Array2::<f64>::zeros((cells, 2));

    compute_weights(2, 17, sigma.view(), w.view(), wr.view_mut()).unwrap();
    reconstruct(
        q.view(),
        0,
        2,
        17,
        c.view(),
        wr.view(),
        qr.view_mut(),
        qs.view_mut(),
    )
    .unwrap();

    for i in 2..=17 {
        assert_abs_diff_eq!(qs[[i, 0]], i as f64 - 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(qs[[i, 1]], i as f64 + 0.5, epsilon = 1e-12);
    }
    // Cells outside the range are untouched.
    assert_eq!(qs.row(1).to_vec(), vec![0.0, 0.0]);
    assert_eq!(qs.row(18).to_vec(), vec![0.0, 0.0]);
}

#[test]
fn every_stencil_is_exact_for_quadratics_on_stretched_grid() {
    let (cells, k) = (16, 3);
    let x = stretched_grid(cells);
    let q = quadratic_averages(&x, 0.7, -1.2, 0.4);
    let points = [0.0, 0.25, 0.5, 1.0];
    let c = coefficients(&x, k, &points);
    let mut qr = Array3::<f64>::zeros((cells, k, points.len()));

    stencil_reconstruct(q.view(), 0, 2, cells - 3, c.view(), qr.view_mut()).unwrap();

    let f = |t: f64| 0.7 - 1.2 * t + 0.4 * t * t;
    for i in 2..=cells - 3 {
        for (l, &p) in points.iter().enumerate() {
            let xi = x[i] + p * (x[i + 1] - x[i]);
            for r in 0..k {
                assert_abs_diff_eq!(qr[[i, r, l]], f(xi), epsilon = 1e-10);
            }
        }
    }
}

#[test]
fn fifth_order_blend_is_exact_for_quadratics() {
    let (cells, k) = (12, 3);
    let x = stretched_grid(cells);
    let q = quadratic_averages(&x, -0.3, 0.8, 1.1);

    let weno = Weno::new().order(k).points(1).build().unwrap();
    let c = weno.coefficients(&x, &[1.0]).unwrap();
    let sigma = Array2::from_shape_fn((cells, k), |(i, r)| 1e-2 * ((i + r) % 3) as f64);
    let w = Array2::from_elem((cells, k), 1.0 / 3.0);
    let mut buffers = weno.buffers(cells).unwrap();

    weno.step(q.view(), 2, 9, sigma.view(), w.view(), c.view(), &mut buffers)
        .unwrap();

    // Any convex combination of exact reconstructions is exact.
    let f = |t: f64| -0.3 + 0.8 * t + 1.1 * t * t;
    for i in 2..=9 {
        assert_abs_diff_eq!(buffers.qs[[i, 0]], f(x[i + 1]), epsilon = 1e-10);
    }
}

#[test]
fn biased_step_renormalizes_over_kept_shifts() {
    let (cells, k) = (20, 3);
    let x = centred_grid(cells);
    let q: Array1<f64> = (0..cells).map(|i| i as f64).collect();
    let sigma = Array2::<f64>::zeros((cells, k));
    let w = Array2::from_shape_fn((cells, k), |(_, r)| [0.1, 0.6, 0.3][r]);

    for bias in [1, -1] {
        let weno = Weno::new().order(k).points(2).bias(bias).build().unwrap();
        let c = weno.coefficients(&x, &[0.0, 1.0]).unwrap();
        let mut buffers = weno.buffers(cells).unwrap();

        weno.step(q.view(), 2, 17, sigma.view(), w.view(), c.view(), &mut buffers)
            .unwrap();

        for i in 2..=17 {
            assert_abs_diff_eq!(buffers.wr.row(i).sum(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(buffers.qs[[i, 0]], i as f64 - 0.5, epsilon = 1e-12);
            assert_abs_diff_eq!(buffers.qs[[i, 1]], i as f64 + 0.5, epsilon = 1e-12);
        }
        let dropped = if bias > 0 { 0 } else { 2 };
        assert_eq!(buffers.wr[[5, dropped]], 0.0);
    }
}

#[test]
fn bias_restricts_computed_shifts() {
    let (cells, k) = (10, 3);
    let x = centred_grid(cells);
    let q: Array1<f64> = (0..cells).map(|i| (i * i) as f64).collect();
    let c = coefficients(&x, k, &[0.5]);

    let mut upwind = Array3::<f64>::from_elem((cells, k, 1), f64::NAN);
    stencil_reconstruct(q.view(), 1, 3, 6, c.view(), upwind.view_mut()).unwrap();
    for i in 3..=6 {
        assert!(upwind[[i, 0, 0]].is_nan());
        assert!(upwind[[i, 1, 0]].is_finite() && upwind[[i, 2, 0]].is_finite());
    }

    let mut downwind = Array3::<f64>::from_elem((cells, k, 1), f64::NAN);
    stencil_reconstruct(q.view(), -1, 3, 6, c.view(), downwind.view_mut()).unwrap();
    for i in 3..=6 {
        assert!(downwind[[i, 0, 0]].is_finite() && downwind[[i, 1, 0]].is_finite());
        assert!(downwind[[i, 2, 0]].is_nan());
    }
}

#[test]
fn strided_cell_averages_match_contiguous() {
    let (cells, k) = (14, 2);
    let x = centred_grid(cells);
    let c = coefficients(&x, k, &[0.0, 1.0]);

    let dense: Array1<f64> = (0..cells).map(|i| (i as f64 * 0.4).cos()).collect();
    // Interleave with garbage and reverse: stride -2.
    let mut storage = Array1::<f64>::from_elem(2 * cells, 1e9);
    for i in 0..cells {
        storage[2 * (cells - 1 - i) + 1] = dense[i];
    }
    let strided = storage.slice(s![..;-2]);
    assert_eq!(strided.to_vec(), dense.to_vec());

    let mut qr_dense = Array3::<f64>::zeros((cells, k, 2));
    let mut qr_strided = Array3::<f64>::zeros((cells, k, 2));
    stencil_reconstruct(dense.view(), 0, 1, cells - 2, c.view(), qr_dense.view_mut()).unwrap();
    stencil_reconstruct(strided, 0, 1, cells - 2, c.view(), qr_strided.view_mut()).unwrap();

    for (a, b) in qr_dense.iter().zip(qr_strided.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-14);
    }
}

#[test]
fn blend_uses_all_shifts() {
    let (cells, k, n) = (3, 2, 2);
    let wr = Array2::from_shape_vec((cells, k), vec![0.0, 0.0, 0.25, 0.75, 0.0, 0.0]).unwrap();
    let qr = Array3::from_shape_fn((cells, k, n), |(_, r, l)| (10 * r + l) as f64);
    let mut qs = Array2::<f64>::zeros((cells, n));

    blend(wr.view(), qr.view(), 1, 1, qs.view_mut()).unwrap();

    assert_abs_diff_eq!(qs[[1, 0]], 7.5, epsilon = 1e-14);
    assert_abs_diff_eq!(qs[[1, 1]], 8.5, epsilon = 1e-14);
    assert_eq!(qs[[0, 0]], 0.0);
}

#[test]
fn blend_writes_into_transposed_output() {
    let (cells, k, n) = (4, 2, 3);
    let wr = Array2::from_elem((cells, k), 0.5);
    let qr = Array3::from_shape_fn((cells, k, n), |(i, r, l)| (i * 100 + r * 10 + l) as f64);
    let mut storage = Array2::<f64>::zeros((n, cells));

    blend(wr.view(), qr.view(), 0, cells - 1, storage.view_mut().reversed_axes()).unwrap();

    for i in 0..cells {
        for l in 0..n {
            assert_abs_diff_eq!(storage[[l, i]], (i * 100 + 5 + l) as f64, epsilon = 1e-12);
        }
    }
}

#[test]
fn parallel_matches_sequential() {
    let (cells, k) = (64, 3);
    let x = stretched_grid(cells);
    let q: Array1<f64> = (0..cells)
        .map(|i| if i < cells / 2 { (i as f64 * 0.2).sin() } else { 2.0 })
        .collect();
    let sigma = Array2::from_shape_fn((cells, k), |(i, r)| ((i * 3 + r) % 7) as f64 * 0.1);
    let w = Array2::from_shape_fn((cells, k), |(_, r)| [0.1, 0.6, 0.3][r]);

    let sequential = Weno::new().order(k).points(2).build().unwrap();
    let parallel = Weno::new().order(k).points(2).parallel(true).build().unwrap();
    let c = sequential.coefficients(&x, &[0.0, 1.0]).unwrap();

    let mut a = sequential.buffers(cells).unwrap();
    let mut b = parallel.buffers(cells).unwrap();
    sequential
        .step(q.view(), 2, cells - 3, sigma.view(), w.view(), c.view(), &mut a)
        .unwrap();
    parallel
        .step(q.view(), 2, cells - 3, sigma.view(), w.view(), c.view(), &mut b)
        .unwrap();

    assert_eq!(a, b);
}

#[test]
fn empty_range_is_a_no_op() {
    let (cells, k) = (6, 2);
    let q = Array1::<f64>::ones(cells);
    let c = Array4::<f64>::ones((cells, k, 1, k));
    let wr = Array2::<f64>::ones((cells, k));
    let mut qr = Array3::<f64>::from_elem((cells, k, 1), -1.0);
    let mut qs = Array2::<f64>::from_elem((cells, 1), -1.0);

    reconstruct(
        q.view(),
        0,
        4,
        3,
        c.view(),
        wr.view(),
        qr.view_mut(),
        qs.view_mut(),
    )
    .unwrap();

    assert!(qr.iter().all(|&v| v == -1.0));
    assert!(qs.iter().all(|&v| v == -1.0));
}

#[test]
fn single_reconstruction_coefficients_match_table() {
    let x = stretched_grid(8);
    let table = coefficients(&x, 3, &[0.25]);
    let xi = x[4] + 0.25 * (x[5] - x[4]);

    let mut c = [0.0; 3];
    reconstruction_coeffs(xi, 4, 1, 3, &x, &mut c).unwrap();

    for j in 0..3 {
        assert_abs_diff_eq!(c[j], table[[4, 1, 0, j]], epsilon = 1e-14);
    }
}
