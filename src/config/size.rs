//! Size parsing utilities.

use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;
const TIB: f64 = GIB * 1024.0;

/// Binary (IEC) multiples relative to one byte.
pub const BYTE_UNITS: &[(&str, f64)] = &[("B", 1.0), ("kB", KIB), ("MB", MIB), ("GB", GIB), ("TB", TIB)];

/// The same ladder rescaled so that one gigabyte is 1.
pub const GIGABYTE_UNITS: &[(&str, f64)] = &[
    ("B", 1.0 / GIB),
    ("kB", 1.0 / MIB),
    ("MB", 1.0 / KIB),
    ("GB", 1.0),
    ("TB", KIB),
];

/// Errors produced when a size string cannot be converted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("'{value}': unknown unit '{unit}'. Valid units are {valid}")]
    UnknownUnit {
        value: String,
        unit: String,
        valid: String,
    },

    #[error("'{value}': expected a whole number optionally followed by a unit")]
    MissingNumber { value: String },

    #[error("'{value}' is out of range")]
    OutOfRange { value: String },
}

/// Numeric types a size can be converted into.
pub trait SizeOutput: Copy + fmt::Debug + Send + Sync + 'static {
    /// Convert a scaled amount, truncating toward zero for integer types.
    fn from_scaled(amount: f64) -> Option<Self>;
}

impl SizeOutput for i64 {
    fn from_scaled(amount: f64) -> Option<Self> {
        let amount = amount.trunc();
        (amount.is_finite() && amount >= i64::MIN as f64 && amount < i64::MAX as f64)
            .then_some(amount as i64)
    }
}

impl SizeOutput for i32 {
    fn from_scaled(amount: f64) -> Option<Self> {
        let amount = amount.trunc();
        (amount >= f64::from(i32::MIN) && amount <= f64::from(i32::MAX)).then_some(amount as i32)
    }
}

impl SizeOutput for u64 {
    fn from_scaled(amount: f64) -> Option<Self> {
        let amount = amount.trunc();
        (amount.is_finite() && amount >= 0.0 && amount < u64::MAX as f64).then_some(amount as u64)
    }
}

impl SizeOutput for f64 {
    fn from_scaled(amount: f64) -> Option<Self> {
        amount.is_finite().then_some(amount)
    }
}

/// Converts strings like "10GB" or "512" into an amount of a base unit.
///
/// The input is a run of leading ASCII digits followed by an optional unit
/// suffix. A missing suffix means the amount is already in the base unit.
#[derive(Clone)]
pub struct SizeWithUnitConverter<T: SizeOutput = i64> {
    unit: &'static str,
    unit_map: &'static [(&'static str, f64)],
    output: PhantomData<fn() -> T>,
}

impl<T: SizeOutput> SizeWithUnitConverter<T> {
    pub fn new(unit: &'static str, unit_map: &'static [(&'static str, f64)]) -> Self {
        Self {
            unit,
            unit_map,
            output: PhantomData,
        }
    }

    /// Byte sizes; unsuffixed input is in bytes.
    pub fn bytes() -> Self {
        Self::new("B", BYTE_UNITS)
    }

    /// Storage sizes; unsuffixed input is in gigabytes.
    pub fn gigabytes() -> Self {
        Self::new("GB", GIGABYTE_UNITS)
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }

    fn multiplier(&self, unit: &str) -> Option<f64> {
        self.unit_map
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, m)| *m)
    }

    fn valid_units(&self) -> String {
        let mut units: Vec<_> = self.unit_map.to_vec();
        units.sort_by(|a, b| a.1.total_cmp(&b.1));
        units
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn unknown_unit(&self, value: &str, unit: &str) -> ConversionError {
        ConversionError::UnknownUnit {
            value: value.to_string(),
            unit: unit.to_string(),
            valid: self.valid_units(),
        }
    }

    pub fn convert(&self, value: &str) -> Result<T, ConversionError> {
        let digits = value.bytes().take_while(u8::is_ascii_digit).count();
        let (numeric_part, unit_part) = value.split_at(digits);

        let unit_multiplier = if unit_part.is_empty() {
            1.0
        } else {
            self.multiplier(unit_part)
                .ok_or_else(|| self.unknown_unit(value, unit_part))?
        };
        let base_multiplier = self
            .multiplier(self.unit)
            .ok_or_else(|| self.unknown_unit(value, self.unit))?;

        let amount: u64 = numeric_part
            .parse()
            .map_err(|_| ConversionError::MissingNumber {
                value: value.to_string(),
            })?;

        T::from_scaled(amount as f64 * (unit_multiplier / base_multiplier)).ok_or_else(|| {
            ConversionError::OutOfRange {
                value: value.to_string(),
            }
        })
    }
}

impl<T: SizeOutput> fmt::Display for SizeWithUnitConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Size (in {}) - valid units are {}.",
            self.unit,
            self.valid_units()
        )
    }
}

impl<T: SizeOutput> fmt::Debug for SizeWithUnitConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeWithUnitConverter")
            .field("unit", &self.unit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_ladder_is_binary() {
        let conv = SizeWithUnitConverter::<i64>::bytes();
        assert_eq!(conv.convert("2GB").unwrap(), 2 * 1024 * 1024 * 1024);
        assert_eq!(conv.convert("1kB").unwrap(), 1024);
        assert_eq!(conv.convert("3TB").unwrap(), 3 * 1024_i64.pow(4));
        assert_eq!(conv.convert("7B").unwrap(), 7);
    }

    #[test]
    fn test_no_suffix_is_base_unit() {
        assert_eq!(SizeWithUnitConverter::<i64>::bytes().convert("512").unwrap(), 512);
        assert_eq!(SizeWithUnitConverter::<i64>::gigabytes().convert("64").unwrap(), 64);
    }

    #[test]
    fn test_gigabyte_base() {
        let conv = SizeWithUnitConverter::<i64>::gigabytes();
        assert_eq!(conv.convert("1TB").unwrap(), 1024);
        assert_eq!(conv.convert("2048MB").unwrap(), 2);
        // Sub-unit results truncate toward zero.
        assert_eq!(conv.convert("512MB").unwrap(), 0);
    }

    #[test]
    fn test_float_output_keeps_fraction() {
        let conv = SizeWithUnitConverter::<f64>::gigabytes();
        assert_eq!(conv.convert("512MB").unwrap(), 0.5);
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        let err = SizeWithUnitConverter::<i64>::bytes().convert("10XB").unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit { ref unit, .. } if unit == "XB"));
        assert!(SizeWithUnitConverter::<i64>::bytes().convert("10gb").is_err());
        assert!(SizeWithUnitConverter::<i64>::bytes().convert("10 GB").is_err());
    }

    #[test]
    fn test_missing_number_is_rejected() {
        let conv = SizeWithUnitConverter::<i64>::bytes();
        assert!(matches!(
            conv.convert("GB"),
            Err(ConversionError::MissingNumber { .. })
        ));
        assert!(matches!(
            conv.convert(""),
            Err(ConversionError::MissingNumber { .. })
        ));
        assert!(conv.convert("-5").is_err());
    }

    #[test]
    fn test_out_of_range_for_narrow_output() {
        let conv = SizeWithUnitConverter::<i32>::bytes();
        assert!(matches!(
            conv.convert("4GB"),
            Err(ConversionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_display_lists_units_by_size() {
        assert_eq!(
            SizeWithUnitConverter::<i64>::gigabytes().to_string(),
            "Size (in GB) - valid units are B, kB, MB, GB, TB."
        );
    }
}
