//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Sift.
//! The Sift project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Descriptive Statistics Module
//!
//! Scalar statistics over numeric feature values: location and spread,
//! interpolated percentiles, moment-based shape measures, and the
//! D'Agostino-Pearson K² omnibus normality test.
//!
//! Functions return `Option` when the input carries too few observations
//! for the statistic to be defined; callers map `None` to their own
//! sentinel (the classifier assumes normality, the reporter emits 0).

/// Arithmetic mean. `None` on empty input.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (ddof = 1). `None` with fewer than two
/// observations.
pub fn sample_std(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    Some((ss / (n - 1) as f64).sqrt())
}

/// Percentile with linear interpolation between closest ranks, matching
/// the numpy default. `p` is in percent (0..=100). `None` on empty input.
pub fn percentile(data: &[f64], p: f64) -> Option<f64> {
    if data.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let weight = rank - lo as f64;
    Some(sorted[lo] * (1.0 - weight) + sorted[hi] * weight)
}

/// First and third quartiles `(Q1, Q3)`.
pub fn quartiles(data: &[f64]) -> Option<(f64, f64)> {
    Some((percentile(data, 25.0)?, percentile(data, 75.0)?))
}

/// Population skewness g₁ = m₃ / m₂^(3/2), the biased estimator used by
/// `scipy.stats.skew` by default. Near-constant data reports 0 rather
/// than dividing by a vanishing m₂.
pub fn skewness(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n == 0 {
        return None;
    }
    let m = mean(data)?;
    let m2: f64 = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n as f64;
    if m2 <= f64::EPSILON * m.abs().max(1.0) {
        return Some(0.0);
    }
    let m3: f64 = data.iter().map(|x| (x - m).powi(3)).sum::<f64>() / n as f64;
    Some(m3 / m2.powf(1.5))
}

/// Excess kurtosis g₂ = m₄ / m₂² − 3 (Fisher convention), the biased
/// estimator used by `scipy.stats.kurtosis` by default. Near-constant
/// data reports 0.
pub fn kurtosis(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n == 0 {
        return None;
    }
    let m = mean(data)?;
    let m2: f64 = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n as f64;
    if m2 <= f64::EPSILON * m.abs().max(1.0) {
        return Some(0.0);
    }
    let m4: f64 = data.iter().map(|x| (x - m).powi(4)).sum::<f64>() / n as f64;
    Some(m4 / (m2 * m2) - 3.0)
}

/// D'Agostino skewness test z-score.
///
/// # Algorithm
///
/// Transforms the sample skewness to an approximately standard normal
/// deviate via the Johnson SU transformation.
///
/// # References
///
/// D'Agostino (1970). "Transformation to normality of the null
/// distribution of g1". Biometrika, 57(3), 679–681.
pub fn skewtest_z(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 8 {
        return None;
    }
    let b1 = skewness(data)?;
    let nf = n as f64;

    let y = b1 * (((nf + 1.0) * (nf + 3.0)) / (6.0 * (nf - 2.0))).sqrt();
    let beta2 = 3.0 * (nf * nf + 27.0 * nf - 70.0) * (nf + 1.0) * (nf + 3.0)
        / ((nf - 2.0) * (nf + 5.0) * (nf + 7.0) * (nf + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    let y = if y == 0.0 { 1.0 } else { y };
    Some(delta * (y / alpha + ((y / alpha).powi(2) + 1.0).sqrt()).ln())
}

/// Anscombe-Glynn kurtosis test z-score.
///
/// # References
///
/// Anscombe & Glynn (1983). "Distribution of the kurtosis statistic b2
/// for normal samples". Biometrika, 70(1), 227–234.
pub fn kurtosistest_z(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 5 {
        return None;
    }
    // Pearson (non-excess) kurtosis b2 = m4 / m2².
    let b2 = kurtosis(data)? + 3.0;
    let nf = n as f64;

    let e = 3.0 * (nf - 1.0) / (nf + 1.0);
    let var_b2 =
        24.0 * nf * (nf - 2.0) * (nf - 3.0) / ((nf + 1.0).powi(2) * (nf + 3.0) * (nf + 5.0));
    let x = (b2 - e) / var_b2.sqrt();

    let sqrt_beta1 = 6.0 * (nf * nf - 5.0 * nf + 2.0) / ((nf + 7.0) * (nf + 9.0))
        * ((6.0 * (nf + 3.0) * (nf + 5.0)) / (nf * (nf - 2.0) * (nf - 3.0))).sqrt();
    let a = 6.0
        + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());

    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return None;
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();
    Some((term1 - term2) / (2.0 / (9.0 * a)).sqrt())
}

/// D'Agostino-Pearson K² omnibus normality test: H₀: data is normally
/// distributed. Combines the skewness and kurtosis z-scores; under H₀
/// the statistic follows χ²(2), whose survival function has the closed
/// form `exp(-K²/2)`.
///
/// Returns `(statistic, p_value)`, or `None` when the sample is too
/// small (or too degenerate) for the component tests.
///
/// # References
///
/// D'Agostino & Pearson (1973). "Tests for departure from normality".
/// Biometrika, 60(3), 613–622.
pub fn normality_test(data: &[f64]) -> Option<(f64, f64)> {
    if data.iter().any(|v| !v.is_finite()) {
        return None;
    }
    // Zero spread leaves both component tests undefined.
    if sample_std(data)? == 0.0 {
        return None;
    }
    let zs = skewtest_z(data)?;
    let zk = kurtosistest_z(data)?;
    if !zs.is_finite() || !zk.is_finite() {
        return None;
    }
    let k2 = zs * zs + zk * zk;
    Some((k2, (-k2 / 2.0).exp()))
}

/// Inverse standard normal CDF (quantile function), Acklam's rational
/// approximation (relative error below 1.15e-9). Used to build normal
/// reference samples.
///
/// # References
///
/// Acklam (2003). "An algorithm for computing the inverse normal
/// cumulative distribution function".
pub fn inverse_normal_cdf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

/// Evenly spaced standard normal scores: the quantiles at
/// `i/(n+1), i = 1..=n`. A deterministic stand-in for a drawn sample.
pub fn normal_scores(n: usize) -> Vec<f64> {
    (1..=n)
        .map(|i| inverse_normal_cdf(i as f64 / (n + 1) as f64))
        .collect()
}
