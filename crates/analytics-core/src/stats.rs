//! Small numeric helpers shared by the engines.

/// Mean of a slice; 0.0 for empty input.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample standard deviation; 0.0 when fewer than two values.
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64;
    variance.sqrt()
}

/// Consecutive simple returns: r_i = (p_i - p_{i-1}) / p_{i-1}.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[5.0]), 0.0);
        // Sample std dev of [2, 4, 4, 4, 5, 5, 7, 9] is ~2.138
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_dev(&data) - 2.13809).abs() < 1e-4);
    }

    #[test]
    fn test_simple_returns() {
        let returns = simple_returns(&[100.0, 102.0, 101.0]);
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.02).abs() < 1e-12);
        assert!((returns[1] - (-1.0 / 102.0)).abs() < 1e-12);
    }
}
