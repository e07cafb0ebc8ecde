// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Baseband Contributors 2026.

//! GFSK transmit model and coherent correlator receiver.
//!
//! The transmit chain is modeled one DAC clock cycle at a time, the way
//! the hardware runs it: a Gaussian FIR shapes the ±symbol-rate
//! frequency command, a phase accumulator integrates the shaped
//! frequency, and the output sample is the cosine of the accumulated
//! phase on top of the carrier. With modulation index h = 0.5 each
//! symbol advances the phase by ±π/2, placing the mark and space tones
//! 250 kHz either side of the carrier.
//!
//! The receiver here is a checking tool, not a hardware model: an
//! integrate-and-dump correlator pair against the mark and space tones,
//! with a complex local oscillator so the decision is phase-agnostic.

use std::f64::consts::PI;

use num_complex::Complex64;

/// Modulation index h. BLE GFSK uses 0.5.
pub const MODULATION_INDEX: f64 = 0.5;
/// Carrier frequency of the modeled IF stage, Hz.
pub const CARRIER_HZ: f64 = 3.0e6;
/// Frequency deviation of the mark/space tones from the carrier, Hz.
pub const DEVIATION_HZ: f64 = 250e3;
/// BLE symbol rate: one symbol per microsecond.
pub const SYMBOL_RATE_HZ: f64 = 1.0e6;
/// DAC sample clock, Hz.
pub const SAMPLE_RATE_HZ: f64 = 32.0e6;
/// Bandwidth-time product of the Gaussian pulse shape.
pub const BT: f64 = 0.5;
/// Gaussian FIR taps per symbol.
pub const OVERSAMPLING: usize = 16;
/// Symbols spanned by the Gaussian FIR.
pub const SYMBOL_SPAN: usize = 6;

/// DAC cycles per symbol.
pub fn cycles_per_symbol() -> usize {
    (SAMPLE_RATE_HZ / SYMBOL_RATE_HZ) as usize
}

/// Mark tone (bit 1), Hz.
pub fn mark_frequency_hz() -> f64 {
    CARRIER_HZ + DEVIATION_HZ
}

/// Space tone (bit 0), Hz.
pub fn space_frequency_hz() -> f64 {
    CARRIER_HZ - DEVIATION_HZ
}

/// Gaussian FIR taps: a sampled Gaussian with standard deviation
/// `sqrt(ln 2) / (2π·BT)` symbol periods, normalized to unit sum so the
/// shaped frequency command settles at exactly ±symbol rate.
///
/// Returns `span * taps_per_symbol + 1` taps, symmetric about the
/// center.
pub fn gaussian_taps(bt: f64, span_symbols: usize, taps_per_symbol: usize) -> Vec<f64> {
    assert!(bt > 0.0, "BT product must be positive");
    assert!(span_symbols >= 1 && taps_per_symbol >= 1);

    let len = span_symbols * taps_per_symbol + 1;
    let center = (len - 1) as f64 / 2.0;
    let sigma = (2.0_f64.ln()).sqrt() / (2.0 * PI * bt) * taps_per_symbol as f64;

    let mut taps: Vec<f64> = (0..len)
        .map(|i| {
            let x = (i as f64 - center) / sigma;
            (-0.5 * x * x).exp()
        })
        .collect();

    let sum: f64 = taps.iter().sum();
    for tap in &mut taps {
        *tap /= sum;
    }
    taps
}

/// Streaming GFSK modulator.
///
/// State persists across calls to [`GfskModulator::modulate`], so a
/// payload may be fed in fragments and the waveform stays continuous
/// in phase. The FIR starts zero-filled; the first [`SYMBOL_SPAN`]/2
/// symbols of output are filter ramp-in, matching the hardware.
pub struct GfskModulator {
    taps: Vec<f64>,
    /// FIR history of frequency commands, most recent first.
    window: Vec<f64>,
    /// Integral of the shaped frequency command.
    phase: f64,
    /// DAC cycle counter since construction.
    cycle: u64,
}

impl GfskModulator {
    pub fn new() -> GfskModulator {
        let taps = gaussian_taps(BT, SYMBOL_SPAN, OVERSAMPLING);
        let window = vec![0.0; taps.len()];
        GfskModulator {
            taps,
            window,
            phase: 0.0,
            cycle: 0,
        }
    }

    /// Group delay of the pulse-shaping FIR, in symbols.
    pub fn group_delay_symbols(&self) -> usize {
        SYMBOL_SPAN / 2
    }

    /// Modulate bits into the passband waveform, one sample per DAC
    /// cycle (`cycles_per_symbol()` samples per bit).
    pub fn modulate(&mut self, bits: &[bool]) -> Vec<f64> {
        let cps = cycles_per_symbol();
        // The FIR shifts in a new frequency command every
        // `cps / OVERSAMPLING` cycles.
        let shift_interval = (cps / OVERSAMPLING) as u64;

        let mut wave = Vec::with_capacity(bits.len() * cps);
        for &bit in bits {
            let command = if bit { SYMBOL_RATE_HZ } else { -SYMBOL_RATE_HZ };
            for _ in 0..cps {
                if self.cycle % shift_interval == 0 {
                    self.window.rotate_right(1);
                    self.window[0] = command;
                }
                let shaped: f64 = self
                    .window
                    .iter()
                    .zip(self.taps.iter())
                    .map(|(s, w)| s * w)
                    .sum();
                self.phase += shaped / SAMPLE_RATE_HZ;

                let t = self.cycle as f64 / SAMPLE_RATE_HZ;
                let sample =
                    (2.0 * PI * CARRIER_HZ * t + MODULATION_INDEX * PI * self.phase).cos();
                wave.push(sample);
                self.cycle += 1;
            }
        }
        wave
    }
}

/// Integrate-and-dump correlator receiver for GFSK waveforms.
///
/// Correlates each symbol period against complex exponentials at the
/// mark and space tones and decides by magnitude. Decisions are
/// returned one per whole symbol of input; the first
/// `group_delay_symbols()` decisions cover the modulator's filter
/// ramp-in and carry no payload.
pub struct CoherentDemodulator;

impl CoherentDemodulator {
    pub fn new() -> CoherentDemodulator {
        CoherentDemodulator
    }

    pub fn demodulate(&self, wave: &[f64]) -> Vec<bool> {
        let cps = cycles_per_symbol();
        let num_symbols = wave.len() / cps;
        let mark = mark_frequency_hz();
        let space = space_frequency_hz();

        let mut bits = Vec::with_capacity(num_symbols);
        for symbol in 0..num_symbols {
            let mut mark_corr = Complex64::new(0.0, 0.0);
            let mut space_corr = Complex64::new(0.0, 0.0);

            for k in 0..cps {
                let n = symbol * cps + k;
                let t = n as f64 / SAMPLE_RATE_HZ;
                let sample = wave[n];
                mark_corr += sample * Complex64::from_polar(1.0, -2.0 * PI * mark * t);
                space_corr += sample * Complex64::from_polar(1.0, -2.0 * PI * space * t);
            }

            bits.push(mark_corr.norm() > space_corr.norm());
        }
        bits
    }
}
