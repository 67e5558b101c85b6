//! Money value object.

use serde::{Deserialize, Serialize};

/// Number of minor units (fils, cents) in one major unit.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Money amount held in minor currency units.
///
/// Every price, fee and total inside the service is carried as `Money`, so
/// the amount sent to the payment processor and the amount shown to the
/// customer are always derived from the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    minor: i64,
}

impl Money {
    /// Creates a new Money amount from minor units.
    pub fn from_minor(minor: i64) -> Self {
        Self { minor }
    }

    /// Creates a new Money amount from whole major units.
    pub fn from_major(major: i64) -> Self {
        Self {
            minor: major * MINOR_PER_MAJOR,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { minor: 0 }
    }

    /// Returns the amount in minor units.
    pub fn minor(&self) -> i64 {
        self.minor
    }

    /// Returns the whole major-unit portion, truncated toward zero.
    pub fn major(&self) -> i64 {
        self.minor / MINOR_PER_MAJOR
    }

    /// Returns the minor remainder after whole major units.
    pub fn minor_part(&self) -> i64 {
        self.minor.abs() % MINOR_PER_MAJOR
    }

    /// Returns true when the amount has no fractional major part.
    pub fn is_whole_major(&self) -> bool {
        self.minor_part() == 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.minor < 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            minor: self.minor * i64::from(quantity),
        }
    }

    /// Creates an amount from whole major units, or `None` if it does not fit
    /// in minor units.
    pub fn checked_from_major(major: i64) -> Option<Self> {
        major
            .checked_mul(MINOR_PER_MAJOR)
            .map(Self::from_minor)
    }

    /// Multiplies by a quantity, or `None` on overflow.
    pub fn checked_multiply(&self, quantity: u32) -> Option<Money> {
        self.minor
            .checked_mul(i64::from(quantity))
            .map(Money::from_minor)
    }

    /// Adds two amounts, or `None` on overflow.
    pub fn checked_add(&self, rhs: Money) -> Option<Money> {
        self.minor.checked_add(rhs.minor).map(Money::from_minor)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Renders the amount in major units with two decimals, e.g. `2700.00`.
impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.minor < 0 { "-" } else { "" };
        write!(f, "{sign}{}.{:02}", self.major().abs(), self.minor_part())
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            minor: self.minor + rhs.minor,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.minor += rhs.minor;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}
