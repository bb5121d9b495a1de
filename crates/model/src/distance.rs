use serde::{Serialize, Serializer};

/// Distance travelled by a flush, in kilometres.
///
/// Both legs are kept unrounded; rounding only happens when the value is
/// presented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlushDistance {
    #[serde(serialize_with = "two_decimals")]
    pub walking_km: f64,
    #[serde(serialize_with = "two_decimals")]
    pub outfall_km: f64,
    #[serde(serialize_with = "two_decimals")]
    pub total_km: f64,
}

impl FlushDistance {
    pub fn new(walking_km: f64, outfall_km: f64) -> Self {
        Self {
            walking_km,
            outfall_km,
            total_km: walking_km + outfall_km,
        }
    }
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_two_decimals(*value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_unrounded_sum() {
        let distance = FlushDistance::new(1.004, 2.004);
        assert_eq!(distance.total_km, 1.004 + 2.004);
        assert_eq!(round_two_decimals(distance.total_km), 3.01);
    }

    #[test]
    fn serialized_for_display_with_two_decimals() {
        let json = serde_json::to_value(FlushDistance::new(4.56789, 1.5)).unwrap();
        assert_eq!(json["walkingKm"], 4.57);
        assert_eq!(json["outfallKm"], 1.5);
        assert_eq!(json["totalKm"], 6.07);
    }
}
