//! Advertised-name admissibility check

/// Admits a device when its advertised name contains any configured tag.
///
/// This is a cheap pre-filter ahead of exact id resolution and may be
/// wrong in either direction; the directory lookup stays authoritative.
/// An empty tag list admits every event, named or not.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    tags: Vec<String>,
}

impl NameFilter {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty())
                .collect(),
        }
    }

    pub fn admits(&self, device_name: Option<&str>) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        match device_name {
            Some(name) => self.tags.iter().any(|tag| name.contains(tag.as_str())),
            None => false,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any_vendor_tag() {
        let filter = NameFilter::new(["Beacon", "BCPro"]);
        assert!(filter.admits(Some("FSC-Beacon-01")));
        assert!(filter.admits(Some("BCPro_203")));
        assert!(!filter.admits(Some("Galaxy Buds")));
    }

    #[test]
    fn test_unnamed_device_rejected_when_tags_set() {
        let filter = NameFilter::new(["Beacon"]);
        assert!(!filter.admits(None));
    }

    #[test]
    fn test_empty_filter_admits_everything() {
        let filter = NameFilter::new(Vec::<String>::new());
        assert!(filter.admits(None));
        assert!(filter.admits(Some("anything")));

        // blank tags are dropped rather than matching every name
        let filter = NameFilter::new([""]);
        assert!(filter.tags().is_empty());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let filter = NameFilter::new(["Beacon"]);
        assert!(!filter.admits(Some("beacon")));
    }
}
