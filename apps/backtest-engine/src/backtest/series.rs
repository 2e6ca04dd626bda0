//! Series data model shared by every engine stage.
//!
//! - [`PriceSeries`]: validated, immutable daily closes
//! - [`SignalSeries`]: one [`Position`] per price date
//! - [`ReturnSeries`]: market and strategy returns for every day after the first

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BacktestError, BacktestResult};

// ============================================
// Prices
// ============================================

/// A single daily close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price (strictly positive).
    pub close: f64,
}

impl PricePoint {
    /// Create a new price point.
    #[must_use]
    pub const fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Ordered daily closes with strictly increasing dates and positive prices.
///
/// The series can only be built through validating constructors and exposes
/// no mutators, so every holder can rely on its invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from observations already in chronological order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPriceSeries` if a close is not a positive finite number or
    /// if dates are not strictly increasing.
    pub fn new(points: Vec<PricePoint>) -> BacktestResult<Self> {
        for point in &points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(BacktestError::invalid_price_series(format!(
                    "close on {} must be positive and finite, got {}",
                    point.date, point.close
                )));
            }
        }

        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                let reason = if pair[1].date == pair[0].date {
                    format!("duplicate date {}", pair[1].date)
                } else {
                    format!("date {} follows {}", pair[1].date, pair[0].date)
                };
                return Err(BacktestError::invalid_price_series(reason));
            }
        }

        Ok(Self { points })
    }

    /// Build a series from observations in any order, sorting by date first.
    ///
    /// Provider payloads are keyed by date and arrive newest first; this puts
    /// them in chronological order before validating.
    ///
    /// # Errors
    ///
    /// Same as [`PriceSeries::new`]; duplicate dates are still rejected.
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> BacktestResult<Self> {
        points.sort_by_key(|p| p.date);
        Self::new(points)
    }

    /// Build a series from `(date, close)` pairs in chronological order.
    ///
    /// # Errors
    ///
    /// Same as [`PriceSeries::new`].
    pub fn from_pairs<I>(pairs: I) -> BacktestResult<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, close)| PricePoint::new(date, close))
                .collect(),
        )
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations in chronological order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices in chronological order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Dates in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// First observation date.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Last observation date.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Series truncated to the first `len` observations.
    ///
    /// A prefix of a valid series is itself valid, so no re-validation is needed.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            points: self.points[..len.min(self.points.len())].to_vec(),
        }
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = BacktestError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

// ============================================
// Signals
// ============================================

/// Held position for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Position {
    /// Short one unit.
    Short,
    /// No exposure.
    #[default]
    Flat,
    /// Long one unit.
    Long,
}

impl Position {
    /// Signed unit exposure (-1, 0 or +1).
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Self::Short => -1,
            Self::Flat => 0,
            Self::Long => 1,
        }
    }

    /// Exposure as a return multiplier.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.value())
    }

    /// Whether capital is at risk.
    #[must_use]
    pub const fn is_invested(self) -> bool {
        !matches!(self, Self::Flat)
    }

    /// Long when `condition` holds, flat otherwise.
    #[must_use]
    pub const fn long_if(condition: bool) -> Self {
        if condition { Self::Long } else { Self::Flat }
    }
}

impl From<Position> for i8 {
    fn from(position: Position) -> Self {
        position.value()
    }
}

impl TryFrom<i8> for Position {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Short),
            0 => Ok(Self::Flat),
            1 => Ok(Self::Long),
            other => Err(format!("position must be -1, 0 or 1, got {other}")),
        }
    }
}

/// Position held on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalPoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Position decided for this date.
    pub position: Position,
}

/// One position per price observation, date-aligned with its price series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignalSeries {
    points: Vec<SignalPoint>,
}

impl SignalSeries {
    /// Wrap signal points as-is. Alignment is checked where it matters, by the
    /// return calculator.
    #[must_use]
    pub const fn new(points: Vec<SignalPoint>) -> Self {
        Self { points }
    }

    /// Pair positions with the dates of `prices`.
    ///
    /// # Errors
    ///
    /// Returns `MisalignedSeries` if the lengths differ.
    pub fn from_positions(prices: &PriceSeries, positions: Vec<Position>) -> BacktestResult<Self> {
        if positions.len() != prices.len() {
            return Err(BacktestError::misaligned(format!(
                "{} positions for {} prices",
                positions.len(),
                prices.len()
            )));
        }

        Ok(Self {
            points: prices
                .dates()
                .zip(positions)
                .map(|(date, position)| SignalPoint { date, position })
                .collect(),
        })
    }

    /// Number of signals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All signal points.
    #[must_use]
    pub fn points(&self) -> &[SignalPoint] {
        &self.points
    }

    /// Positions in date order.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Signed positions in date order, convenient for plotting.
    #[must_use]
    pub fn values(&self) -> Vec<i8> {
        self.points.iter().map(|p| p.position.value()).collect()
    }
}

// ============================================
// Returns
// ============================================

/// Returns realized on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    /// Trading date the return is realized on.
    pub date: NaiveDate,
    /// Close-to-close return of the instrument.
    pub market_return: f64,
    /// Return earned by the position carried into this day.
    pub strategy_return: f64,
    /// Position carried into this day (decided for the previous date).
    pub position: Position,
}

/// Period returns for every day after the first price.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Wrap return points.
    #[must_use]
    pub const fn new(points: Vec<ReturnPoint>) -> Self {
        Self { points }
    }

    /// Build a series from raw strategy returns, with market returns set equal.
    ///
    /// Dates start at `start` and advance one calendar day per return. Useful
    /// for aggregating return streams that did not come from a price series.
    #[must_use]
    pub fn from_strategy_returns(start: NaiveDate, returns: &[f64]) -> Self {
        Self {
            points: start
                .iter_days()
                .zip(returns)
                .map(|(date, r)| ReturnPoint {
                    date,
                    market_return: *r,
                    strategy_return: *r,
                    position: Position::Long,
                })
                .collect(),
        }
    }

    /// Number of return periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no return periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All return points.
    #[must_use]
    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    /// Strategy returns in date order.
    #[must_use]
    pub fn strategy_returns(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.strategy_return).collect()
    }

    /// Market returns in date order.
    #[must_use]
    pub fn market_returns(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.market_return).collect()
    }
}
