//! Unit-safe wrappers for wind and power quantities.
//!
//! Turbine parameters mix wind speeds (m/s) and electrical power (kW).
//! Keeping them as raw `f64` makes it easy to pass a rated power where a
//! rated speed is expected; the newtypes below turn that into a compile
//! error. Batches of samples stay as plain `f64` vectors for throughput.
//!
//! All types are `#[repr(transparent)]` and `#[serde(transparent)]`, so
//! they cost nothing at runtime and serialize as bare numbers.
//!
//! # Usage
//!
//! ```
//! use windmc_core::units::{Kilowatts, MetersPerSecond};
//!
//! let rated = Kilowatts(2000.0);
//! let total = rated + Kilowatts(2000.0);
//! assert_eq!(total.value(), 4000.0);
//!
//! let v = MetersPerSecond(12.0);
//! assert_eq!(v.cubed(), 1728.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.2} {}", self.0, $unit_name)
            }
        }

        impl $type {
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }
        }
    };
}

/// Wind speed in metres per second (m/s)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MetersPerSecond(pub f64);

impl_unit_ops!(MetersPerSecond, "m/s");

impl MetersPerSecond {
    /// v³, the quantity the cubic power-curve segment is linear in
    #[inline]
    pub fn cubed(self) -> f64 {
        self.0 * self.0 * self.0
    }
}

/// Electrical power in kilowatts (kW)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilowatts(pub f64);

impl_unit_ops!(Kilowatts, "kW");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_keeps_units() {
        let a = Kilowatts(1500.0);
        let b = Kilowatts(500.0);
        assert_eq!((a + b).value(), 2000.0);
        assert_eq!((a - b).value(), 1000.0);
        assert_eq!((b * 2.0).value(), 1000.0);
        assert_eq!(a / b, 3.0);
    }

    #[test]
    fn test_display_includes_unit() {
        assert_eq!(MetersPerSecond(3.0).to_string(), "3.00 m/s");
        assert_eq!(Kilowatts(2000.0).to_string(), "2000.00 kW");
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&MetersPerSecond(12.5)).unwrap();
        assert_eq!(json, "12.5");
        let back: Kilowatts = serde_json::from_str("2000.0").unwrap();
        assert_eq!(back, Kilowatts(2000.0));
    }
}
