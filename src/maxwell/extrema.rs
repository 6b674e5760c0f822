use ndarray::ArrayView1;

/// Indices of strict local minima: points smaller than both neighbors.
///
/// The first and last point are never extrema.
pub fn local_minima(values: ArrayView1<f64>) -> Vec<usize> {
    strict_extrema(values, |x, neighbor| x < neighbor)
}

/// Indices of strict local maxima: points larger than both neighbors.
pub fn local_maxima(values: ArrayView1<f64>) -> Vec<usize> {
    strict_extrema(values, |x, neighbor| x > neighbor)
}

fn strict_extrema<F: Fn(f64, f64) -> bool>(values: ArrayView1<f64>, beats: F) -> Vec<usize> {
    values
        .windows(3)
        .into_iter()
        .enumerate()
        .filter(|(_, w)| beats(w[1], w[0]) && beats(w[1], w[2]))
        .map(|(i, _)| i + 1)
        .collect()
}
