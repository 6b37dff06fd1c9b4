use crate::{Error, Result, SystemClock, Zone};

/// Default name of the build identifier property.
pub const DEFAULT_BUILDID_PROPERTY: &str = "buildid";

/// Default name of the build token property.
pub const DEFAULT_BUILDUID_PROPERTY: &str = "builduid";

/// Default scheduler-state key holding the last allocated build identifier.
pub const DEFAULT_STATE_KEY: &str = "last_buildid";

/// Product whose short codes carry no prefix.
pub const DEFAULT_PRODUCT: &str = "firefox";

/// Settings shared by the scheduler property generators.
///
/// All values have defaults matching the historical property names, so an
/// empty document deserializes to [`GeneratorConfig::default`] when the
/// `serde` feature is enabled.
///
/// # Example
/// ```
/// use buildstamp::GeneratorConfig;
///
/// let config = GeneratorConfig::default();
/// assert_eq!(config.buildid_property, "buildid");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GeneratorConfig {
    /// Property receiving the build identifier.
    pub buildid_property: String,
    /// Property receiving the build token.
    pub builduid_property: String,
    /// Scheduler-state key the last build identifier is persisted under.
    pub state_key: String,
    /// Zone build identifiers are stamped in.
    pub zone: Zone,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            buildid_property: DEFAULT_BUILDID_PROPERTY.to_string(),
            builduid_property: DEFAULT_BUILDUID_PROPERTY.to_string(),
            state_key: DEFAULT_STATE_KEY.to_string(),
            zone: Zone::Local,
        }
    }
}

impl GeneratorConfig {
    /// Checks that every name is usable as a property or state key.
    ///
    /// # Errors
    /// - Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        validate_key("buildid_property", &self.buildid_property)?;
        validate_key("builduid_property", &self.builduid_property)?;
        validate_key("state_key", &self.state_key)?;

        if self.buildid_property == self.builduid_property {
            return Err(Error::invalid_config(format!(
                "buildid_property and builduid_property are both `{}`",
                self.buildid_property
            )));
        }
        Ok(())
    }

    /// Returns a system clock reporting in the configured zone.
    pub fn clock(&self) -> SystemClock {
        SystemClock::with_zone(self.zone)
    }
}

/// Settings for [`crate::NameNormalizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct NormalizerConfig {
    /// Product whose short codes are not prefixed.
    pub default_product: String,
    /// Upper bound on the length (in characters) of a short code.
    pub max_len: Option<usize>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_product: DEFAULT_PRODUCT.to_string(),
            max_len: None,
        }
    }
}

impl NormalizerConfig {
    /// # Errors
    /// - Returns [`Error::InvalidConfig`] if `default_product` is blank or
    ///   `max_len` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.default_product.trim().is_empty() {
            return Err(Error::invalid_config("default_product must not be empty"));
        }
        if self.max_len == Some(0) {
            return Err(Error::invalid_config("max_len must be greater than 0"));
        }
        Ok(())
    }
}

fn validate_key(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_config(format!("{field} must not be empty")));
    }
    if !value.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(Error::invalid_config(format!(
            "{field} ({value:?}) must be printable ASCII without whitespace"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
        assert!(NormalizerConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_keys() {
        let config = GeneratorConfig {
            state_key: "last buildid".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));

        let config = GeneratorConfig {
            buildid_property: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_colliding_property_names() {
        let config = GeneratorConfig {
            builduid_property: DEFAULT_BUILDID_PROPERTY.to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_max_len() {
        let config = NormalizerConfig {
            max_len: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_documents() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "state_key": "last_id", "zone": "utc" }"#).unwrap();
        assert_eq!(config.state_key, "last_id");
        assert_eq!(config.buildid_property, DEFAULT_BUILDID_PROPERTY);
        assert_eq!(config.zone, Zone::Utc);

        let config: NormalizerConfig = serde_json::from_str(r#"{ "max_len": 21 }"#).unwrap();
        assert_eq!(config.max_len, Some(21));
        assert_eq!(config.default_product, DEFAULT_PRODUCT);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rejects_unknown_fields() {
        let result: serde_json::Result<GeneratorConfig> =
            serde_json::from_str(r#"{ "buildid": "x" }"#);
        assert!(result.is_err());
    }
}
