// ================================================================================
// Integration tests for causal and zero-phase filtering
// File: tests/convolution_tests.rs
// ================================================================================

use accel_dsp::config::{CausalMethod, ConvolutionConfig, FilterSpec, PadType};
use accel_dsp::processing::{
    convolve_auto, convolve_direct, convolve_fft, convolve_naive, CoefficientVector, Convolver, FilterDesigner, FilterPhase,
};
use accel_dsp::AccelError;
use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

fn design(order: usize) -> CoefficientVector {
    FilterDesigner::design(&FilterSpec::new(50.0, 10.0, order)).unwrap()
}

fn sine(freq_hz: f64, fs: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| (2.0 * PI * freq_hz * i as f64 / fs).sin()).collect()
}

#[test]
fn test_impulse_reproduces_taps() {
    let coeffs = design(40);
    let mut impulse = vec![0.0; 60];
    impulse[0] = 1.0;

    let output = Convolver::default().apply_causal(&impulse, &coeffs).unwrap();
    assert_eq!(output.len(), 60);
    for k in 0..coeffs.num_taps() {
        assert_abs_diff_eq!(output.samples[k], coeffs[k], epsilon = 1e-15);
    }
    assert!(output.samples[41..].iter().all(|&y| y == 0.0));
}

#[test]
fn test_causal_reports_group_delay() {
    let coeffs = design(40);
    let output = Convolver::default().apply_causal(&[1.0; 10], &coeffs).unwrap();
    assert_eq!(output.phase, FilterPhase::Causal { group_delay_samples: 20.0 });
    assert_abs_diff_eq!(output.delay_samples(), 20.0);
}

#[test]
fn test_causal_short_and_empty_signals() {
    let coeffs = design(40);
    let convolver = Convolver::default();

    assert!(convolver.apply_causal(&[], &coeffs).unwrap().is_empty());

    // Output shorter than the filter only ever sees the leading taps
    let short = convolver.apply_causal(&[2.0; 5], &coeffs).unwrap();
    assert_eq!(short.len(), 5);
    let expected: Vec<f64> = (0..5).map(|n| 2.0 * coeffs[..=n].iter().sum::<f64>()).collect();
    for (y, e) in short.samples.iter().zip(&expected) {
        assert_abs_diff_eq!(*y, *e, epsilon = 1e-14);
    }
}

#[test]
fn test_fft_method_matches_direct() {
    let mut rng = StdRng::seed_from_u64(7);
    let signal: Vec<f64> = (0..4096).map(|_| rng.gen_range(-2.0..2.0)).collect();
    let fft = Convolver::new(&ConvolutionConfig {
        causal_method: CausalMethod::Fft,
        ..Default::default()
    });

    for order in [10, 40, 128] {
        let coeffs = design(order);
        let direct = Convolver::default().apply_causal(&signal, &coeffs).unwrap();
        let via_fft = fft.apply_causal(&signal, &coeffs).unwrap();
        let auto = convolve_auto(&signal, &coeffs);
        for i in 0..signal.len() {
            assert_abs_diff_eq!(direct.samples[i], via_fft.samples[i], epsilon = 1e-10);
            assert_abs_diff_eq!(direct.samples[i], auto[i], epsilon = 1e-10);
        }
    }
}

#[test]
fn test_zero_phase_keeps_passband_tone_aligned() {
    let coeffs = design(40);
    let signal = sine(2.0, 50.0, 500);
    let output = Convolver::default().apply_zero_phase(&signal, &coeffs).unwrap();

    assert_eq!(output.phase, FilterPhase::ZeroPhase);
    assert_eq!(output.len(), signal.len());
    // Away from the edges the 2 Hz tone passes with no lag and near-unity gain
    for i in 100..400 {
        assert_abs_diff_eq!(output.samples[i], signal[i], epsilon = 5e-3);
    }
}

#[test]
fn test_zero_phase_suppresses_stopband_tone() {
    let coeffs = design(40);
    let signal = sine(20.0, 50.0, 500);
    let output = Convolver::default().apply_zero_phase(&signal, &coeffs).unwrap();

    let peak = output.samples[100..400].iter().fold(0.0f64, |m, y| m.max(y.abs()));
    assert!(peak < 1e-4, "20 Hz tone leaked with amplitude {}", peak);
}

#[test]
fn test_zero_phase_constant_signal_unchanged() {
    let coeffs = design(40);
    for pad_type in [PadType::Odd, PadType::Even, PadType::Constant] {
        let convolver = Convolver::new(&ConvolutionConfig {
            pad_type,
            ..Default::default()
        });
        let output = convolver.apply_zero_phase(&[3.5; 100], &coeffs).unwrap();
        for y in output.samples {
            assert_abs_diff_eq!(y, 3.5, epsilon = 1e-12);
        }
    }
}

/// Forward-backward filtering spelled out with the nested-loop convolution
///
/// Starting each pass in steady state is the same as prepending `order`
/// copies of the first sample and discarding their outputs.
fn reference_zero_phase(signal: &[f64], coeffs: &CoefficientVector) -> Vec<f64> {
    let order = coeffs.order();
    let n = signal.len();

    let mut ext = Vec::with_capacity(n + 2 * order);
    ext.extend((1..=order).rev().map(|i| 2.0 * signal[0] - signal[i]));
    ext.extend_from_slice(signal);
    ext.extend((1..=order).map(|i| 2.0 * signal[n - 1] - signal[n - 1 - i]));

    let steady_pass = |x: &[f64]| -> Vec<f64> {
        let mut primed = vec![x[0]; order];
        primed.extend_from_slice(x);
        convolve_naive(&primed, coeffs.as_slice())[order..].to_vec()
    };

    let mut forward = steady_pass(&ext);
    forward.reverse();
    let mut backward = steady_pass(&forward);
    backward.reverse();
    backward[order..order + n].to_vec()
}

#[test]
fn test_zero_phase_matches_reference() {
    let mut rng = StdRng::seed_from_u64(11);
    for (order, len) in [(40, 41), (40, 300), (10, 57), (2, 3)] {
        let coeffs = design(order);
        let signal: Vec<f64> = (0..len).map(|_| rng.gen_range(-3.0..3.0)).collect();

        let output = Convolver::default().apply_zero_phase(&signal, &coeffs).unwrap();
        let expected = reference_zero_phase(&signal, &coeffs);
        for (y, e) in output.samples.iter().zip(&expected) {
            assert_abs_diff_eq!(*y, *e, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_zero_phase_length_requirement() {
    let coeffs = design(40);
    let convolver = Convolver::default();

    match convolver.apply_zero_phase(&[1.0; 40], &coeffs) {
        Err(AccelError::InsufficientSignalLength { required, actual }) => {
            assert_eq!(required, 41);
            assert_eq!(actual, 40);
        }
        other => panic!("Expected InsufficientSignalLength, got {:?}", other),
    }
    assert!(convolver.apply_zero_phase(&[1.0; 41], &coeffs).is_ok());
    assert!(convolver.apply_zero_phase(&[], &coeffs).is_err());
}

#[test]
fn test_zero_phase_custom_pad_len() {
    let coeffs = design(40);
    let convolver = Convolver::new(&ConvolutionConfig {
        pad_len: Some(5),
        ..Default::default()
    });
    assert_eq!(convolver.apply_zero_phase(&[1.0; 10], &coeffs).unwrap().len(), 10);
}

proptest! {
    #[test]
    fn prop_fast_paths_match_naive(
        signal in prop::collection::vec(-10.0f64..10.0, 0..200),
        order in 0usize..60,
    ) {
        let coeffs = design(order);
        let naive = convolve_naive(&signal, coeffs.as_slice());
        let direct = convolve_direct(&signal, &coeffs);
        let fft = convolve_fft(&signal, &coeffs);

        prop_assert_eq!(direct.len(), signal.len());
        prop_assert_eq!(fft.len(), signal.len());
        for i in 0..signal.len() {
            prop_assert!((direct[i] - naive[i]).abs() < 1e-9);
            prop_assert!((fft[i] - naive[i]).abs() < 1e-8);
        }
    }

    #[test]
    fn prop_zero_signal_stays_zero(len in 0usize..120) {
        let output = Convolver::default().apply_causal(&vec![0.0; len], &design(40)).unwrap();
        prop_assert!(output.samples.iter().all(|&y| y == 0.0));
    }

    #[test]
    fn prop_zero_phase_preserves_length(signal in prop::collection::vec(-5.0f64..5.0, 41..300)) {
        let output = Convolver::default().apply_zero_phase(&signal, &design(40)).unwrap();
        prop_assert_eq!(output.len(), signal.len());
        prop_assert!(output.samples.iter().all(|y| y.is_finite()));
    }
}
