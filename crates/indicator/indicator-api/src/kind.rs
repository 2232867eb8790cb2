//! Moving-average kind: one case per smoothing algorithm, carrying its own
//! tuning parameters.

use indicator_spi::{IndicatorError, Result};
use serde::{Deserialize, Serialize};

/// Recurrence family of a [`MovingAverageKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovingAverageFamily {
    /// Weighted sum over the trailing window.
    FixedWindow,
    /// `alpha * x + (1 - alpha) * prev`, or a combination of nested passes.
    Exponential,
    /// Exponential recurrence whose `alpha` is recomputed every bar.
    Adaptive,
    /// Linear filter over prior inputs and outputs with precomputed coefficients.
    FilterBank,
}

/// Moving-average algorithm selector.
///
/// The kind plus the configured length fully determine the output for a
/// given input series. Serialized with an internal `kind` tag:
///
/// ```json
/// { "kind": "t3", "volume_factor": 0.7 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MovingAverageKind {
    // ------------------------------------------------------------------
    // Fixed window
    // ------------------------------------------------------------------
    #[default]
    Simple,
    Weighted,
    Triangular,
    SymmetricWeighted,
    SineWeighted,
    Hull,
    ArnaudLegoux {
        /// Gaussian peak position within the window, 0..=1 (0.85 leans recent).
        #[serde(default = "defaults::alma_offset")]
        offset: f64,
        /// Gaussian width divisor.
        #[serde(default = "defaults::alma_sigma")]
        sigma: f64,
    },
    /// End point of the least-squares line, `3 * WMA - 2 * SMA`.
    LeastSquares,
    /// Binomial (Pascal's triangle) weights.
    Pascal,
    Median,

    // ------------------------------------------------------------------
    // Exponential family
    // ------------------------------------------------------------------
    Exponential,
    /// Wilder smoothing, `alpha = 1 / length`.
    Wilder,
    DoubleExponential,
    TripleExponential,
    QuadrupleExponential,
    GeneralizedDouble {
        #[serde(default = "defaults::volume_factor")]
        volume_factor: f64,
    },
    T3 {
        #[serde(default = "defaults::volume_factor")]
        volume_factor: f64,
    },
    ZeroLagExponential,
    ZeroLagTripleExponential,
    McNicholl,
    ExponentialHull,
    /// EMA of an EMA.
    DoubleSmoothed,
    /// Exponential recurrence with a fixed, caller-supplied `alpha`.
    Custom {
        alpha: f64,
    },

    // ------------------------------------------------------------------
    // Adaptive
    // ------------------------------------------------------------------
    KaufmanAdaptive {
        #[serde(default = "defaults::kama_fast")]
        fast_length: usize,
        #[serde(default = "defaults::kama_slow")]
        slow_length: usize,
    },
    PoweredKaufman {
        #[serde(default = "defaults::kama_fast")]
        fast_length: usize,
        #[serde(default = "defaults::kama_slow")]
        slow_length: usize,
        #[serde(default = "defaults::kama_power")]
        power: f64,
    },
    VariableIndexDynamic,
    Jurik {
        /// -100..=100; negative is smoother, positive has less lag.
        #[serde(default)]
        phase: f64,
        #[serde(default = "defaults::jurik_power")]
        power: f64,
    },
    McGinleyDynamic {
        #[serde(default = "defaults::mcginley_constant")]
        constant: f64,
    },
    BryantAdaptive {
        #[serde(default = "defaults::bryant_max_length")]
        max_length: usize,
        /// Trend-following bias; positive values lengthen the average in chop.
        #[serde(default = "defaults::bryant_trend")]
        trend: f64,
    },
    VolatilityAdjusted,
    FractalAdaptive,

    // ------------------------------------------------------------------
    // Filter bank
    // ------------------------------------------------------------------
    #[serde(rename = "super_smoother_2pole")]
    SuperSmoother2Pole,
    #[serde(rename = "super_smoother_3pole")]
    SuperSmoother3Pole,
    #[serde(rename = "butterworth_2pole")]
    Butterworth2Pole,
    #[serde(rename = "butterworth_3pole")]
    Butterworth3Pole,
    #[serde(rename = "gaussian_2pole")]
    Gaussian2Pole,
    #[serde(rename = "high_pass_2pole")]
    HighPass2Pole,
    Roofing {
        #[serde(default = "defaults::roofing_smooth_length")]
        smooth_length: usize,
    },
    Decycler,
    Laguerre {
        #[serde(default = "defaults::laguerre_gamma")]
        gamma: f64,
    },
    InstantaneousTrendline,
}

mod defaults {
    pub fn alma_offset() -> f64 {
        0.85
    }
    pub fn alma_sigma() -> f64 {
        6.0
    }
    pub fn volume_factor() -> f64 {
        0.7
    }
    pub fn kama_fast() -> usize {
        2
    }
    pub fn kama_slow() -> usize {
        30
    }
    pub fn kama_power() -> f64 {
        2.0
    }
    pub fn jurik_power() -> f64 {
        2.0
    }
    pub fn mcginley_constant() -> f64 {
        0.6
    }
    pub fn bryant_max_length() -> usize {
        100
    }
    pub fn bryant_trend() -> f64 {
        1.0
    }
    pub fn roofing_smooth_length() -> usize {
        10
    }
    pub fn laguerre_gamma() -> f64 {
        0.5
    }
}

impl MovingAverageKind {
    /// Every kind with its default parameters, in declaration order.
    pub const ALL: [MovingAverageKind; 41] = [
        MovingAverageKind::Simple,
        MovingAverageKind::Weighted,
        MovingAverageKind::Triangular,
        MovingAverageKind::SymmetricWeighted,
        MovingAverageKind::SineWeighted,
        MovingAverageKind::Hull,
        MovingAverageKind::ArnaudLegoux { offset: 0.85, sigma: 6.0 },
        MovingAverageKind::LeastSquares,
        MovingAverageKind::Pascal,
        MovingAverageKind::Median,
        MovingAverageKind::Exponential,
        MovingAverageKind::Wilder,
        MovingAverageKind::DoubleExponential,
        MovingAverageKind::TripleExponential,
        MovingAverageKind::QuadrupleExponential,
        MovingAverageKind::GeneralizedDouble { volume_factor: 0.7 },
        MovingAverageKind::T3 { volume_factor: 0.7 },
        MovingAverageKind::ZeroLagExponential,
        MovingAverageKind::ZeroLagTripleExponential,
        MovingAverageKind::McNicholl,
        MovingAverageKind::ExponentialHull,
        MovingAverageKind::DoubleSmoothed,
        MovingAverageKind::Custom { alpha: 0.2 },
        MovingAverageKind::KaufmanAdaptive { fast_length: 2, slow_length: 30 },
        MovingAverageKind::PoweredKaufman { fast_length: 2, slow_length: 30, power: 2.0 },
        MovingAverageKind::VariableIndexDynamic,
        MovingAverageKind::Jurik { phase: 0.0, power: 2.0 },
        MovingAverageKind::McGinleyDynamic { constant: 0.6 },
        MovingAverageKind::BryantAdaptive { max_length: 100, trend: 1.0 },
        MovingAverageKind::VolatilityAdjusted,
        MovingAverageKind::FractalAdaptive,
        MovingAverageKind::SuperSmoother2Pole,
        MovingAverageKind::SuperSmoother3Pole,
        MovingAverageKind::Butterworth2Pole,
        MovingAverageKind::Butterworth3Pole,
        MovingAverageKind::Gaussian2Pole,
        MovingAverageKind::HighPass2Pole,
        MovingAverageKind::Roofing { smooth_length: 10 },
        MovingAverageKind::Decycler,
        MovingAverageKind::Laguerre { gamma: 0.5 },
        MovingAverageKind::InstantaneousTrendline,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MovingAverageKind::Simple => "SMA",
            MovingAverageKind::Weighted => "WMA",
            MovingAverageKind::Triangular => "TRIMA",
            MovingAverageKind::SymmetricWeighted => "SWMA",
            MovingAverageKind::SineWeighted => "SineWMA",
            MovingAverageKind::Hull => "HMA",
            MovingAverageKind::ArnaudLegoux { .. } => "ALMA",
            MovingAverageKind::LeastSquares => "LSMA",
            MovingAverageKind::Pascal => "PascalMA",
            MovingAverageKind::Median => "MedianMA",
            MovingAverageKind::Exponential => "EMA",
            MovingAverageKind::Wilder => "WilderMA",
            MovingAverageKind::DoubleExponential => "DEMA",
            MovingAverageKind::TripleExponential => "TEMA",
            MovingAverageKind::QuadrupleExponential => "QEMA",
            MovingAverageKind::GeneralizedDouble { .. } => "GD",
            MovingAverageKind::T3 { .. } => "T3",
            MovingAverageKind::ZeroLagExponential => "ZLEMA",
            MovingAverageKind::ZeroLagTripleExponential => "ZLTEMA",
            MovingAverageKind::McNicholl => "McNichollMA",
            MovingAverageKind::ExponentialHull => "EHMA",
            MovingAverageKind::DoubleSmoothed => "DSEMA",
            MovingAverageKind::Custom { .. } => "CustomEMA",
            MovingAverageKind::KaufmanAdaptive { .. } => "KAMA",
            MovingAverageKind::PoweredKaufman { .. } => "PKAMA",
            MovingAverageKind::VariableIndexDynamic => "VIDYA",
            MovingAverageKind::Jurik { .. } => "JMA",
            MovingAverageKind::McGinleyDynamic { .. } => "McGinley",
            MovingAverageKind::BryantAdaptive { .. } => "BAMA",
            MovingAverageKind::VolatilityAdjusted => "VAMA",
            MovingAverageKind::FractalAdaptive => "FRAMA",
            MovingAverageKind::SuperSmoother2Pole => "SuperSmoother2",
            MovingAverageKind::SuperSmoother3Pole => "SuperSmoother3",
            MovingAverageKind::Butterworth2Pole => "Butterworth2",
            MovingAverageKind::Butterworth3Pole => "Butterworth3",
            MovingAverageKind::Gaussian2Pole => "Gaussian2",
            MovingAverageKind::HighPass2Pole => "HighPass2",
            MovingAverageKind::Roofing { .. } => "Roofing",
            MovingAverageKind::Decycler => "Decycler",
            MovingAverageKind::Laguerre { .. } => "Laguerre",
            MovingAverageKind::InstantaneousTrendline => "ITrend",
        }
    }

    pub fn family(&self) -> MovingAverageFamily {
        use MovingAverageKind::*;
        match self {
            Simple | Weighted | Triangular | SymmetricWeighted | SineWeighted | Hull
            | ArnaudLegoux { .. } | LeastSquares | Pascal | Median => MovingAverageFamily::FixedWindow,
            Exponential | Wilder | DoubleExponential | TripleExponential | QuadrupleExponential
            | GeneralizedDouble { .. } | T3 { .. } | ZeroLagExponential | ZeroLagTripleExponential
            | McNicholl | ExponentialHull | DoubleSmoothed | Custom { .. } => MovingAverageFamily::Exponential,
            KaufmanAdaptive { .. } | PoweredKaufman { .. } | VariableIndexDynamic | Jurik { .. }
            | McGinleyDynamic { .. } | BryantAdaptive { .. } | VolatilityAdjusted | FractalAdaptive => {
                MovingAverageFamily::Adaptive
            }
            SuperSmoother2Pole | SuperSmoother3Pole | Butterworth2Pole | Butterworth3Pole
            | Gaussian2Pole | HighPass2Pole | Roofing { .. } | Decycler | Laguerre { .. }
            | InstantaneousTrendline => MovingAverageFamily::FilterBank,
        }
    }

    /// Check the kind's own parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            MovingAverageKind::ArnaudLegoux { offset, sigma } => {
                ensure_range("offset", offset, 0.0, 1.0)?;
                ensure_positive("sigma", sigma)
            }
            MovingAverageKind::GeneralizedDouble { volume_factor }
            | MovingAverageKind::T3 { volume_factor } => {
                ensure_range("volume_factor", volume_factor, 0.0, 1.0)
            }
            MovingAverageKind::Custom { alpha } => ensure_range("alpha", alpha, 0.0, 1.0),
            MovingAverageKind::KaufmanAdaptive { fast_length, slow_length } => {
                ensure_lengths(fast_length, slow_length)
            }
            MovingAverageKind::PoweredKaufman { fast_length, slow_length, power } => {
                ensure_lengths(fast_length, slow_length)?;
                ensure_positive("power", power)
            }
            MovingAverageKind::Jurik { phase, power } => {
                ensure_range("phase", phase, -100.0, 100.0)?;
                ensure_positive("power", power)
            }
            MovingAverageKind::McGinleyDynamic { constant } => ensure_positive("constant", constant),
            MovingAverageKind::BryantAdaptive { max_length, trend } => {
                if max_length == 0 {
                    return Err(IndicatorError::invalid("max_length", "must be at least 1"));
                }
                ensure_finite("trend", trend)
            }
            MovingAverageKind::Roofing { smooth_length } => {
                if smooth_length == 0 {
                    return Err(IndicatorError::invalid("smooth_length", "must be at least 1"));
                }
                Ok(())
            }
            MovingAverageKind::Laguerre { gamma } => ensure_range("gamma", gamma, 0.0, 1.0),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for MovingAverageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(IndicatorError::invalid(name, "must be finite"));
    }
    Ok(())
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    ensure_finite(name, value)?;
    if value <= 0.0 {
        return Err(IndicatorError::invalid(name, "must be positive"));
    }
    Ok(())
}

fn ensure_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    ensure_finite(name, value)?;
    if value < min || value > max {
        return Err(IndicatorError::invalid(name, format!("must be within {min}..={max}")));
    }
    Ok(())
}

fn ensure_lengths(fast_length: usize, slow_length: usize) -> Result<()> {
    if fast_length == 0 {
        return Err(IndicatorError::invalid("fast_length", "must be at least 1"));
    }
    if slow_length <= fast_length {
        return Err(IndicatorError::invalid("slow_length", "must be greater than fast_length"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kind_is_simple() {
        assert_eq!(MovingAverageKind::default(), MovingAverageKind::Simple);
    }

    #[test]
    fn test_all_kinds_valid_and_unique() {
        let mut names: Vec<&str> = MovingAverageKind::ALL.iter().map(|k| k.name()).collect();
        for kind in MovingAverageKind::ALL {
            assert!(kind.validate().is_ok(), "{kind} should validate");
        }
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MovingAverageKind::ALL.len());
    }

    #[test]
    fn test_serde_tag() {
        let kind: MovingAverageKind = serde_json::from_str(r#"{ "kind": "t3" }"#).unwrap();
        assert_eq!(kind, MovingAverageKind::T3 { volume_factor: 0.7 });

        let kind: MovingAverageKind =
            serde_json::from_str(r#"{ "kind": "super_smoother_2pole" }"#).unwrap();
        assert_eq!(kind, MovingAverageKind::SuperSmoother2Pole);

        let json = serde_json::to_string(&MovingAverageKind::Jurik { phase: 50.0, power: 1.0 }).unwrap();
        let back: MovingAverageKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MovingAverageKind::Jurik { phase: 50.0, power: 1.0 });
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(serde_json::from_str::<MovingAverageKind>(r#"{ "kind": "nope" }"#).is_err());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(MovingAverageKind::T3 { volume_factor: 1.5 }.validate().is_err());
        assert!(MovingAverageKind::Custom { alpha: f64::NAN }.validate().is_err());
        assert!(MovingAverageKind::KaufmanAdaptive { fast_length: 30, slow_length: 2 }
            .validate()
            .is_err());
        assert!(MovingAverageKind::Jurik { phase: 150.0, power: 2.0 }.validate().is_err());
        assert!(MovingAverageKind::Laguerre { gamma: -0.1 }.validate().is_err());
    }

    #[test]
    fn test_family() {
        assert_eq!(MovingAverageKind::Hull.family(), MovingAverageFamily::FixedWindow);
        assert_eq!(MovingAverageKind::Wilder.family(), MovingAverageFamily::Exponential);
        assert_eq!(MovingAverageKind::VariableIndexDynamic.family(), MovingAverageFamily::Adaptive);
        assert_eq!(MovingAverageKind::Decycler.family(), MovingAverageFamily::FilterBank);
    }
}
