use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::fmt::{Display, Formatter};

const DECIMAL_PLACES: u32 = 2;

/// An exact revenue value.
///
/// Displays as a fixed two decimal, thousands-grouped string (`1,234.50`).
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Monetary(Decimal);

impl Monetary {
    pub fn new() -> Self {
        Monetary(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn checked_add(self, rhs: Monetary) -> Option<Monetary> {
        self.0.checked_add(rhs.0).map(Monetary)
    }

    /// Adds every value, returning `None` as soon as the running total overflows.
    pub fn checked_sum(values: impl IntoIterator<Item = Monetary>) -> Option<Monetary> {
        values.into_iter().try_fold(Monetary::new(), Monetary::checked_add)
    }

    /// Divides the value evenly across `count` entries. Returns `None` for a zero count.
    pub fn average(self, count: usize) -> Option<Monetary> {
        if count == 0 {
            return None;
        }

        self.0.checked_div(Decimal::from(count)).map(Monetary)
    }
}

impl From<Decimal> for Monetary {
    fn from(value: Decimal) -> Self {
        Monetary(value)
    }
}

impl Display for Monetary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let mut rounded = self.0.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(DECIMAL_PLACES);

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        let digits = rounded.abs().to_string();
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        write!(formatter, "{}{}.{}", sign, group_thousands(integer), fraction)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}
