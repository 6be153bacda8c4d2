//! Lenient numeric deserializers.
//!
//! Narrated content sometimes carries whole numbers as floats (`3.0`) or
//! out-of-range values. These helpers accept any JSON number and round it
//! into the target type.

use serde::{Deserialize, Deserializer};

pub fn u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(to_u32(value))
}

pub fn opt_u32_from_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.map(to_u32))
}

pub fn opt_i32_from_number<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| v.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32))
}

fn to_u32(value: f64) -> u32 {
    value.round().clamp(0.0, u32::MAX as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "u32_from_number")]
        power: u32,
        #[serde(default, deserialize_with = "opt_u32_from_number")]
        bonus: Option<u32>,
        #[serde(default, deserialize_with = "opt_i32_from_number")]
        delta: Option<i32>,
    }

    #[test]
    fn test_accepts_integers_and_floats() {
        let sample: Sample =
            serde_json::from_str(r#"{"power": 12.0, "bonus": 3, "delta": -2.4}"#).unwrap();
        assert_eq!(sample.power, 12);
        assert_eq!(sample.bonus, Some(3));
        assert_eq!(sample.delta, Some(-2));
    }

    #[test]
    fn test_missing_and_negative_values() {
        let sample: Sample = serde_json::from_str(r#"{"power": -4}"#).unwrap();
        assert_eq!(sample.power, 0);
        assert_eq!(sample.bonus, None);
        assert_eq!(sample.delta, None);
    }

    #[test]
    fn test_rejects_non_numbers() {
        assert!(serde_json::from_str::<Sample>(r#"{"power": "ten"}"#).is_err());
    }
}
