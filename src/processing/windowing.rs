// src/processing/windowing.rs
//! Windowing functions for FIR design

use std::f64::consts::PI;

use crate::config::processing_config::WindowKind;

/// Symmetric window of `size` samples
///
/// Filter design needs the symmetric (non-periodic) form so the windowed
/// taps stay linear-phase. A single-sample window is `[1.0]`.
pub fn generate_window(kind: WindowKind, size: usize) -> Vec<f64> {
    if size == 0 {
        return Vec::new();
    }
    if size == 1 {
        return vec![1.0];
    }

    let denom = (size - 1) as f64;
    match kind {
        WindowKind::Rectangular => vec![1.0; size],
        WindowKind::Hamming => (0..size)
            .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / denom).cos())
            .collect(),
        WindowKind::Hann => (0..size)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / denom).cos()))
            .collect(),
        WindowKind::Blackman => (0..size)
            .map(|i| {
                let n = i as f64 / denom;
                0.42 - 0.5 * (2.0 * PI * n).cos() + 0.08 * (4.0 * PI * n).cos()
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_functions() {
        let hamming = generate_window(WindowKind::Hamming, 10);
        assert_eq!(hamming.len(), 10);
        assert!((hamming[0] - 0.08).abs() < 1e-12);
        assert!((hamming[9] - 0.08).abs() < 1e-12);

        let hann = generate_window(WindowKind::Hann, 10);
        assert!(hann[0].abs() < 1e-12);

        let rect = generate_window(WindowKind::Rectangular, 5);
        assert!(rect.iter().all(|&x| x == 1.0));
    }

    #[test]
    fn test_windows_are_symmetric() {
        for kind in [WindowKind::Hamming, WindowKind::Hann, WindowKind::Blackman] {
            let w = generate_window(kind, 41);
            for i in 0..w.len() / 2 {
                assert!((w[i] - w[40 - i]).abs() < 1e-12, "{:?} asymmetric at {}", kind, i);
            }
            assert!((w[20] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(generate_window(WindowKind::Hamming, 0).is_empty());
        assert_eq!(generate_window(WindowKind::Hamming, 1), vec![1.0]);
        assert_eq!(generate_window(WindowKind::Blackman, 1), vec![1.0]);
    }
}
