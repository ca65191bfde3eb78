use serde;

// Accepts `"1,2"`, a single level such as `3`, or a sequence such as `[1, "h2"]`
pub fn deserialize_levels<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Levels;

    impl<'de> serde::de::Visitor<'de> for Levels {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("comma-separated levels, a level, or a sequence of levels")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            let mut values = Vec::new();
            while let Some(value) = seq.next_element::<serde_yaml::Value>()? {
                match value {
                    serde_yaml::Value::Number(n) => values.push(n.to_string()),
                    serde_yaml::Value::String(s) => values.push(s),
                    other => {
                        return Err(serde::de::Error::custom(format!("invalid level: {:?}", other)));
                    }
                }
            }
            Ok(values.join(","))
        }
    }

    deserializer.deserialize_any(Levels)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "super::deserialize_levels")]
        levels: String,
    }

    #[test]
    fn test_levels_forms() {
        let holder: Holder = serde_yaml::from_str("levels: 1,2").unwrap();
        assert_eq!(holder.levels, "1,2");

        let holder: Holder = serde_yaml::from_str("levels: 3").unwrap();
        assert_eq!(holder.levels, "3");

        let holder: Holder = serde_yaml::from_str("levels: [1, h2, 3]").unwrap();
        assert_eq!(holder.levels, "1,h2,3");

        let holder: Holder = serde_json::from_str(r#"{"levels": [2, 4]}"#).unwrap();
        assert_eq!(holder.levels, "2,4");

        assert!(serde_yaml::from_str::<Holder>("levels: {a: 1}").is_err());
    }
}
