use formats::RegionSourceError;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// A click referenced a feature that is not in the loaded region set.
    UnknownRegion(String),
    /// The region has no outer-ring vertices to average.
    EmptyGeometry(String),
    /// Configuration failed to parse or validate.
    Config(String),
    /// The region source could not be parsed.
    Source(RegionSourceError),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::UnknownRegion(key) => write!(f, "unknown region: {key}"),
            DashboardError::EmptyGeometry(id) => write!(f, "region {id} has an empty outer ring"),
            DashboardError::Config(msg) => write!(f, "invalid dashboard config: {msg}"),
            DashboardError::Source(err) => write!(f, "region source error: {err}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegionSourceError> for DashboardError {
    fn from(err: RegionSourceError) -> Self {
        DashboardError::Source(err)
    }
}
