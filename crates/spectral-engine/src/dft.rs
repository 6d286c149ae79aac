//! Discrete Fourier Transform

use std::f64::consts::TAU;

use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

/// Transform used to move a signal into the frequency domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Direct O(n²) evaluation of the DFT sum
    #[default]
    Direct,
    /// rustfft planner, same normalisation as `Direct`
    Fast,
}

/// Frequency (Hz) of each DFT bin for a signal of `len` samples
pub fn frequency_axis(len: usize, sample_rate: f64) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    let resolution = sample_rate / len as f64;
    (0..len).map(|k| k as f64 * resolution).collect()
}

/// Direct DFT of a real signal, normalised by `n / 2`
///
/// Row `k` of the phase matrix is `exp(-2πi·k·j/n)` for `j` in `0..n`; each
/// output bin is that row dotted with the signal. Rows are evaluated in
/// parallel and generated on the fly rather than materialised.
pub fn discrete_fourier_transform(signal: &[f64]) -> Vec<Complex<f64>> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }
    let scale = n as f64 / 2.0;

    (0..n)
        .into_par_iter()
        .map(|k| {
            let dot: Complex<f64> = signal
                .iter()
                .enumerate()
                .map(|(j, &x)| {
                    // k·j mod n keeps the angle in one turn
                    let angle = -TAU * ((k * j) % n) as f64 / n as f64;
                    Complex::from_polar(1.0, angle) * x
                })
                .sum();
            dot / scale
        })
        .collect()
}

/// FFT of a real signal, normalised by `n / 2`
pub fn fast_fourier_transform(planner: &mut FftPlanner<f64>, signal: &[f64]) -> Vec<Complex<f64>> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let scale = n as f64 / 2.0;
    buffer.iter_mut().for_each(|c| *c /= scale);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(freq: f64, amplitude: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| amplitude * (TAU * freq * i as f64 / sample_rate).cos())
            .collect()
    }

    #[test]
    fn test_frequency_axis() {
        let axis = frequency_axis(4, 100.0);
        assert_eq!(axis, vec![0.0, 25.0, 50.0, 75.0]);
        assert!(frequency_axis(0, 100.0).is_empty());
    }

    #[test]
    fn test_dc_signal() {
        let spectrum = discrete_fourier_transform(&[1.0; 8]);
        // Sum of 8 ones over n/2
        assert!((spectrum[0].re - 2.0).abs() < 1e-12);
        assert!(spectrum[1..].iter().all(|c| c.norm() < 1e-9));
    }

    #[test]
    fn test_cosine_amplitude_recovered() {
        let signal = cosine(4.0, 3.0, 32.0, 32);
        let spectrum = discrete_fourier_transform(&signal);
        assert!((spectrum[4].norm() - 3.0).abs() < 1e-9);
        assert!(spectrum[4].arg().abs() < 1e-9);
    }

    #[test]
    fn test_direct_matches_fast() {
        let signal: Vec<f64> = (0..48).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
        let direct = discrete_fourier_transform(&signal);
        let fast = fast_fourier_transform(&mut FftPlanner::new(), &signal);

        assert_eq!(direct.len(), fast.len());
        for (a, b) in direct.iter().zip(&fast) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_empty_signal() {
        assert!(discrete_fourier_transform(&[]).is_empty());
        assert!(fast_fourier_transform(&mut FftPlanner::new(), &[]).is_empty());
    }
}
