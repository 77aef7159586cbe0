//! Trailing moving average for the trend chart.

/// One year of seasons
pub const DEFAULT_WINDOW: usize = 4;

/// Trailing moving average of `data` over `window` points.
///
/// The output has the same length as the input. Position `i` holds the
/// mean of `data[i + 1 - window..=i]`, or `None` while fewer than
/// `window` points are available. A zero window yields all `None`.
pub fn moving_average(data: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; data.len()];
    }
    (0..data.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                let slice = &data[i + 1 - window..=i];
                Some(slice.iter().sum::<f64>() / window as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_window_two() {
        let result = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(result, vec![None, Some(1.5), Some(2.5), Some(3.5), Some(4.5)]);
    }

    #[test]
    fn test_moving_average_default_window() {
        let result = moving_average(&[6.0, 7.0, 8.0, 7.0, 9.0], DEFAULT_WINDOW);
        assert_eq!(result[..3], [None, None, None]);
        assert_eq!(result[3], Some(7.0));
        assert_eq!(result[4], Some(7.75));
    }

    #[test]
    fn test_window_longer_than_data() {
        assert_eq!(moving_average(&[1.0, 2.0], 4), vec![None, None]);
    }

    #[test]
    fn test_degenerate_windows() {
        assert_eq!(moving_average(&[1.0, 2.0], 0), vec![None, None]);
        assert_eq!(moving_average(&[1.0, 2.0], 1), vec![Some(1.0), Some(2.0)]);
        assert!(moving_average(&[], 3).is_empty());
    }
}
