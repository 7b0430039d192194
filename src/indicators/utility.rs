/// Average of `values`, or 0.0 when there are none.
///
/// Generic so 0/1 flags (`u8`) and scores (`f64`) share one code path.
pub fn mean<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    match values.len() {
        0 => 0.0,
        n => values.iter().map(|&v| v.into()).sum::<f64>() / n as f64,
    }
}

/// Population standard deviation of `values` around `center`.
pub fn stddev(values: &[f64], center: f64) -> f64 {
    let squared: Vec<f64> = values.iter().map(|v| (v - center) * (v - center)).collect();
    mean(&squared).sqrt()
}
