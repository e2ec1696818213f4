use foundation::LonLat;

/// Stable region identifier: the GeoJSON feature id, or its `name` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub String);

impl RegionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `(label, count)` pair in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteCount {
    pub name: String,
    pub votes: u64,
}

impl VoteCount {
    pub fn new(name: impl Into<String>, votes: u64) -> Self {
        Self {
            name: name.into(),
            votes,
        }
    }
}

/// Attribute bag carried by each region.
///
/// Missing maps are empty, missing counts are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionAttributes {
    pub region_label: String,
    pub flood_projects: u64,
    /// Presidential candidate -> votes, in document order.
    pub president_votes: Vec<VoteCount>,
    /// Vice-presidential candidate -> votes, in document order.
    pub vice_votes: Vec<VoteCount>,
    /// Senatorial `(name, votes)` pairs, in document order.
    pub senatorial: Vec<VoteCount>,
}

/// An immutable polygon region.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    /// Polygon rings; the first is the outer ring and is never empty.
    pub rings: Vec<Vec<LonLat>>,
    pub attributes: RegionAttributes,
}

impl Region {
    pub fn outer_ring(&self) -> &[LonLat] {
        self.rings.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The static collection of regions loaded once per view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Looks a region up by id, falling back to its display name.
    pub fn get(&self, key: &str) -> Option<&Region> {
        self.regions
            .iter()
            .find(|r| r.id.as_str() == key)
            .or_else(|| self.regions.iter().find(|r| r.name == key))
    }
}

#[cfg(test)]
mod tests {
    use super::{Region, RegionAttributes, RegionId, RegionSet};
    use foundation::LonLat;

    fn region(id: &str, name: &str) -> Region {
        Region {
            id: RegionId(id.to_string()),
            name: name.to_string(),
            rings: vec![vec![LonLat::new(0.0, 0.0), LonLat::new(1.0, 1.0)]],
            attributes: RegionAttributes::default(),
        }
    }

    #[test]
    fn lookup_prefers_id_then_name() {
        let set = RegionSet::new(vec![region("a", "Alpha"), region("Alpha", "Other")]);
        assert_eq!(set.get("Alpha").map(|r| r.name.as_str()), Some("Other"));
        assert_eq!(set.get("a").map(|r| r.name.as_str()), Some("Alpha"));
        assert!(set.get("missing").is_none());
    }

    #[test]
    fn outer_ring_of_ringless_region_is_empty() {
        let mut r = region("x", "X");
        r.rings.clear();
        assert!(r.outer_ring().is_empty());
    }
}
