// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Baseband Contributors 2026.

//! Low-IF receive mixer and image-rejection model.
//!
//! The receiver mixes the RF input against a local oscillator placed
//! one IF below the wanted channel, so the wanted signal lands at +IF.
//! The image channel, one IF below the LO, lands on the same IF after
//! mixing; it is removed digitally by combining the I arm with the
//! Hilbert transform of the Q arm. The Hilbert FIR is derived from a
//! 29-tap half-band prototype and its coefficients are quantized to
//! Q1.11 in the hardware's coefficient memory.
//!
//! Frequencies follow the BLE channel plan: channel `k` sits at
//! 2402 + 2k MHz.

use std::f64::consts::PI;

use num_complex::Complex64;

/// Intermediate frequency the wanted channel is mixed down to, Hz.
pub const IF_HZ: f64 = 2.0e6;
/// Sample rate of the I/Q ADCs, Hz.
pub const ADC_SAMPLE_RATE_HZ: f64 = 20.0e6;
/// ADC resolution in bits.
pub const ADC_BITS: u32 = 5;
/// RF frequency of BLE channel 0, Hz.
pub const CHANNEL0_HZ: f64 = 2.402e9;
/// BLE channel spacing, Hz.
pub const CHANNEL_SPACING_HZ: f64 = 2.0e6;

/// Half-band lowpass prototype the Hilbert FIR is derived from.
const HALF_BAND_PROTOTYPE: [f64; 29] = [
    -0.0000, 0.0001, 0.0000, -0.0009, -0.0000, 0.0040, 0.0000, -0.0128, -0.0000, 0.0340,
    0.0000, -0.0850, -0.0000, 0.3106, 0.5000, 0.3106, -0.0000, -0.0850, 0.0000, 0.0340,
    -0.0000, -0.0128, 0.0000, 0.0040, -0.0000, -0.0009, 0.0000, 0.0001, -0.0000,
];

/// RF carrier of a BLE channel, Hz.
pub fn rf_frequency_hz(channel_index: u8) -> f64 {
    assert!(channel_index < 40, "BLE defines channels 0-39");
    CHANNEL0_HZ + CHANNEL_SPACING_HZ * channel_index as f64
}

/// Local oscillator for a channel: one IF below the wanted carrier.
pub fn lo_frequency_hz(channel_index: u8) -> f64 {
    rf_frequency_hz(channel_index) - IF_HZ
}

/// Image frequency for a channel: one IF below the LO.
pub fn image_frequency_hz(channel_index: u8) -> f64 {
    lo_frequency_hz(channel_index) - IF_HZ
}

/// Hilbert-transform FIR taps, derived from the half-band prototype by
/// modulating with `2 sin(iπ/2)`: even taps vanish, odd taps alternate
/// sign, and the result is antisymmetric about the center tap.
pub fn hilbert_taps() -> [f64; 29] {
    let mut taps = [0.0; 29];
    for (i, &c) in HALF_BAND_PROTOTYPE.iter().enumerate() {
        taps[i] = match i % 4 {
            1 => 2.0 * c,
            3 => -2.0 * c,
            _ => 0.0,
        };
    }
    taps
}

/// Quantize a coefficient to Q1.11 (1 sign bit, 1 integer bit, 11
/// fraction bits), saturating at the format limits.
pub fn quantize_q1_11(value: f64) -> i16 {
    let scaled = (value * f64::from(1 << 11)).round() as i32;
    scaled.clamp(-4096, 4095) as i16
}

/// Mix a real RF signal against quadrature local oscillators: the I arm
/// multiplies by `cos(2π f_lo t)`, the Q arm by `sin(2π f_lo t)`.
pub fn quadrature_mix(rf: &[f64], lo_hz: f64, sample_rate_hz: f64) -> Vec<Complex64> {
    rf.iter()
        .enumerate()
        .map(|(n, &s)| {
            let theta = 2.0 * PI * lo_hz * n as f64 / sample_rate_hz;
            Complex64::new(s * theta.cos(), s * theta.sin())
        })
        .collect()
}

/// 5-bit ADC model: scales the block to its own min/max swing, truncates
/// to the 32 quantizer levels, and recenters to -15..=16.
pub fn adc_quantize(signal: &[f64]) -> Vec<i8> {
    let min = signal.iter().copied().fold(f64::INFINITY, f64::min);
    let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let swing = max - min;
    assert!(swing > 0.0, "ADC input has no swing");

    let levels = f64::from((1u32 << ADC_BITS) - 1);
    signal
        .iter()
        .map(|&s| ((s - min) / swing * levels) as i8 - 15)
        .collect()
}

/// Direct-form FIR with zero-filled history.
pub fn fir(signal: &[f64], taps: &[f64]) -> Vec<f64> {
    assert!(!taps.is_empty(), "FIR needs at least one tap");

    let mut out = Vec::with_capacity(signal.len());
    for i in 0..signal.len() {
        let mut acc = 0.0;
        for (j, &tap) in taps.iter().enumerate() {
            if i >= j {
                acc += tap * signal[i - j];
            }
        }
        out.push(acc);
    }
    out
}

/// Cancel the image band from mixed-down I/Q samples.
///
/// The Q arm runs through the Hilbert FIR; the I arm is delayed by the
/// FIR group delay and the two are differenced. With the mixer
/// conventions of [`quadrature_mix`], a wanted tone at +IF passes and
/// an image tone is suppressed. Output is shortened by the group delay.
pub fn reject_image(iq: &[Complex64]) -> Vec<f64> {
    let taps = hilbert_taps();
    let delay = taps.len() / 2;

    let q: Vec<f64> = iq.iter().map(|c| c.im).collect();
    let shifted = fir(&q, &taps);

    let mut out = Vec::with_capacity(iq.len().saturating_sub(delay));
    for i in delay..iq.len() {
        out.push(iq[i - delay].re - shifted[i]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rms(signal: &[f64]) -> f64 {
        let power: f64 = signal.iter().map(|s| s * s).sum::<f64>() / signal.len() as f64;
        power.sqrt()
    }

    /// Baseband I/Q of a tone mixed down to IF. `upper` selects whether
    /// the tone sat above the LO (wanted side) or below it (image side).
    fn if_tone(upper: bool, samples: usize) -> Vec<Complex64> {
        (0..samples)
            .map(|n| {
                let theta = 2.0 * PI * IF_HZ * n as f64 / ADC_SAMPLE_RATE_HZ;
                let sign = if upper { -1.0 } else { 1.0 };
                Complex64::new(0.5 * theta.cos(), sign * 0.5 * theta.sin())
            })
            .collect()
    }

    #[test]
    fn channel_plan() {
        assert_eq!(rf_frequency_hz(0), 2.402e9);
        assert_eq!(rf_frequency_hz(5), 2.412e9);
        assert_eq!(lo_frequency_hz(5), 2.410e9);
        assert_eq!(image_frequency_hz(5), 2.408e9);
    }

    #[test]
    #[should_panic(expected = "channels 0-39")]
    fn channel_plan_rejects_out_of_range() {
        let _ = rf_frequency_hz(40);
    }

    #[test]
    fn hilbert_taps_structure() {
        let taps = hilbert_taps();

        // Even taps vanish, including the center.
        for (i, &tap) in taps.iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(tap, 0.0, "even tap {} not zero", i);
            }
        }

        // Antisymmetric about the center tap.
        for k in 1..=14 {
            assert!(
                (taps[14 - k] + taps[14 + k]).abs() < 1e-12,
                "taps {} and {} not antisymmetric",
                14 - k,
                14 + k
            );
        }

        // The dominant pair comes from the 0.3106 prototype taps.
        assert!((taps[13] - 0.6212).abs() < 1e-12);
        assert!((taps[15] + 0.6212).abs() < 1e-12);
    }

    #[test]
    fn q1_11_quantization() {
        assert_eq!(quantize_q1_11(0.0), 0);
        assert_eq!(quantize_q1_11(0.5), 1024);
        assert_eq!(quantize_q1_11(-0.0850), -174);
        assert_eq!(quantize_q1_11(0.6212), 1272);

        // Saturation at the format limits.
        assert_eq!(quantize_q1_11(3.0), 4095);
        assert_eq!(quantize_q1_11(-3.0), -4096);
    }

    #[test]
    fn mixer_arms_are_quadrature() {
        // DC input turns the mixer output into the LO itself.
        let rf = vec![1.0; 64];
        let iq = quadrature_mix(&rf, 2.5e6, ADC_SAMPLE_RATE_HZ);

        for (n, c) in iq.iter().enumerate() {
            let theta = 2.0 * PI * 2.5e6 * n as f64 / ADC_SAMPLE_RATE_HZ;
            assert!((c.re - theta.cos()).abs() < 1e-12);
            assert!((c.im - theta.sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn adc_covers_recentered_range() {
        let samples: Vec<f64> = (0..200)
            .map(|n| (2.0 * PI * n as f64 / 40.0).sin())
            .collect();
        let quantized = adc_quantize(&samples);

        assert!(quantized.iter().all(|&q| (-15..=16).contains(&q)));
        assert_eq!(quantized.iter().copied().min().unwrap(), -15);
        assert_eq!(quantized.iter().copied().max().unwrap(), 16);
    }

    #[test]
    fn fir_identity_and_delay() {
        let signal = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(fir(&signal, &[1.0]), signal);

        // A one-sample delay tap.
        assert_eq!(fir(&signal, &[0.0, 1.0]), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn wanted_tone_survives_image_tone_cancels() {
        // 10 samples per IF cycle at 20 Msps; enough cycles to measure
        // steady-state power after the FIR transient.
        let samples = 400;
        let transient = 29;

        let wanted = reject_image(&if_tone(true, samples));
        let image = reject_image(&if_tone(false, samples));

        let wanted_rms = rms(&wanted[transient..]);
        let image_rms = rms(&image[transient..]);

        // The wanted sideband keeps its full amplitude (both arms add).
        assert!(
            wanted_rms > 0.5,
            "wanted tone attenuated: rms {}",
            wanted_rms
        );
        // The image collapses by better than 20 dB.
        assert!(
            image_rms < wanted_rms / 10.0,
            "image not rejected: wanted rms {}, image rms {}",
            wanted_rms,
            image_rms
        );
    }
}
