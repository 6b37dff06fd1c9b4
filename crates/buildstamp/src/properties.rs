use std::collections::BTreeMap;

/// A single build property value together with the generator that set it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    pub value: String,
    pub source: String,
}

/// The set of properties a scheduler attaches to a triggered build.
///
/// Iteration order is by property name.
///
/// # Example
/// ```
/// use buildstamp::Properties;
///
/// let mut props = Properties::new();
/// props.set("buildid", "20250101000000", "BuildIdGenerator");
/// assert_eq!(props.get("buildid"), Some("20250101000000"));
/// assert_eq!(props.source("buildid"), Some("BuildIdGenerator"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Properties(BTreeMap<String, Property>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing any previous value and source.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        source: impl Into<String>,
    ) {
        self.0.insert(
            name.into(),
            Property {
                value: value.into(),
                source: source.into(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|p| p.value.as_str())
    }

    pub fn source(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|p| p.source.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.0.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Copies every property of `other` into `self`; `other` wins on
    /// conflicts.
    pub fn update(&mut self, other: Properties) {
        self.0.extend(other.0);
    }
}

impl IntoIterator for Properties {
    type Item = (String, Property);
    type IntoIter = std::collections::btree_map::IntoIter<String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_overrides_on_conflict() {
        let mut a = Properties::new();
        a.set("buildid", "1", "first");
        a.set("branch", "m-beta", "first");

        let mut b = Properties::new();
        b.set("buildid", "2", "second");

        a.update(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.get("buildid"), Some("2"));
        assert_eq!(a.source("buildid"), Some("second"));
        assert_eq!(a.get("branch"), Some("m-beta"));
    }

    #[test]
    fn iterates_in_name_order() {
        let mut props = Properties::new();
        props.set("builduid", "abc", "BuildTokenGenerator");
        props.set("buildid", "19700102000058", "BuildIdGenerator");

        let names: Vec<_> = props.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["buildid", "builduid"]);

        let owned: Vec<_> = props.into_iter().collect();
        assert_eq!(owned[0].0, "buildid");
        assert_eq!(owned[0].1.source, "BuildIdGenerator");
        assert_eq!(owned[1].1.value, "abc");
    }
}
