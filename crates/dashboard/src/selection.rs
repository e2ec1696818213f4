use formats::RegionId;

/// The at-most-one selected region.
///
/// Starts empty, is replaced on every click and is never cleared otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<RegionId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&RegionId> {
        self.current.as_ref()
    }

    pub fn select(&mut self, id: RegionId) {
        self.current = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use formats::RegionId;

    #[test]
    fn starts_empty_and_replaces() {
        let mut s = Selection::new();
        assert!(s.current().is_none());

        s.select(RegionId("a".to_string()));
        s.select(RegionId("b".to_string()));
        assert_eq!(s.current().map(|id| id.as_str()), Some("b"));

        s.select(RegionId("b".to_string()));
        assert_eq!(s.current().map(|id| id.as_str()), Some("b"));
    }
}
