use std::{array, fmt, fmt::Write as _, iter, num::ParseFloatError, str::FromStr};

use serde::{Deserialize, Serialize};

/// Coefficients of the linear placement heuristic.
///
/// A placement is scored as
///
/// ```text
/// score = lines² × lines_weight + aggregate_height × height_weight
///       + holes × holes_weight + bumpiness × bumpiness_weight
/// ```
///
/// Useful weights reward cleared lines and penalize the other three features, so `lines`
/// is normally positive and the rest negative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    pub lines: f64,
    pub height: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl HeuristicWeights {
    /// Number of weight components.
    pub const LEN: usize = 4;

    /// Component names, in text-format order.
    pub const NAMES: [&'static str; Self::LEN] = ["lines", "height", "holes", "bumpiness"];

    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(lines: f64, height: f64, holes: f64, bumpiness: f64) -> Self {
        Self {
            lines,
            height,
            holes,
            bumpiness,
        }
    }

    /// Builds weights from a function of the component index (see [`Self::NAMES`]).
    ///
    /// ```
    /// use tetrevo_evaluator::HeuristicWeights;
    ///
    /// let weights = HeuristicWeights::from_fn(|i| if i == 0 { 1.0 } else { -0.5 });
    /// assert_eq!(weights, HeuristicWeights::new(1.0, -0.5, -0.5, -0.5));
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> f64,
    {
        Self::from_array(array::from_fn(f))
    }

    #[must_use]
    pub const fn from_array([lines, height, holes, bumpiness]: [f64; Self::LEN]) -> Self {
        Self::new(lines, height, holes, bumpiness)
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; Self::LEN] {
        [self.lines, self.height, self.holes, self.bumpiness]
    }

    /// Formats the weights as four lines with six fractional digits.
    ///
    /// The result parses back with [`str::parse`].
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for w in self.to_array() {
            writeln!(&mut text, "{w:.6}").unwrap();
        }
        text
    }
}

impl fmt::Display for HeuristicWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in iter::zip(Self::NAMES, self.to_array()).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{name}={value:.6}")?;
        }
        Ok(())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParseWeightsError {
    #[display("missing `{name}` weight")]
    Missing { name: &'static str },
    #[display("invalid `{name}` weight {token:?}")]
    Invalid {
        name: &'static str,
        token: String,
        source: ParseFloatError,
    },
    #[display("unexpected value after the last weight: {token:?}")]
    Trailing { token: String },
}

/// Parses four whitespace-separated decimals in the order lines, height, holes, bumpiness.
impl FromStr for HeuristicWeights {
    type Err = ParseWeightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let mut values = [0.0; Self::LEN];
        for (value, name) in iter::zip(&mut values, Self::NAMES) {
            let token = tokens.next().ok_or(ParseWeightsError::Missing { name })?;
            *value = token
                .parse()
                .map_err(|source| ParseWeightsError::Invalid {
                    name,
                    token: token.to_owned(),
                    source,
                })?;
        }
        if let Some(token) = tokens.next() {
            return Err(ParseWeightsError::Trailing {
                token: token.to_owned(),
            });
        }
        Ok(Self::from_array(values))
    }
}
