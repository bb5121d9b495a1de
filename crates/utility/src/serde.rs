/// (De)serializes a `std::time::Duration` as whole milliseconds.
pub mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }

    pub fn serialize_option<S>(
        option_duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match option_duration {
            Some(d) => serialize(d, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::{Deserialize, Serialize};

    use super::duration_millis;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Timing {
        #[serde(with = "duration_millis")]
        interval: Duration,
        #[serde(
            serialize_with = "duration_millis::serialize_option",
            deserialize_with = "duration_millis::deserialize_option",
            default
        )]
        delay: Option<Duration>,
    }

    #[test]
    fn durations_are_plain_milliseconds() {
        let timing = Timing {
            interval: Duration::from_millis(50),
            delay: None,
        };
        let json = serde_json::to_string(&timing).unwrap();
        assert_eq!(json, r#"{"interval":50,"delay":null}"#);

        let parsed: Timing = serde_json::from_str(r#"{"interval":75}"#).unwrap();
        assert_eq!(parsed.interval, Duration::from_millis(75));
        assert_eq!(parsed.delay, None);
    }
}
