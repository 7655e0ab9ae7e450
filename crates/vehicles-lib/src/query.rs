/// Weight search request handed to the query service.
///
/// `All` applies no filter at all; only `WeightRange` carries bounds, so a
/// half-filled or stale pair of bounds can never reach the repository.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SearchQuery {
    /// Return the whole collection.
    #[default]
    All,
    /// Return vehicles with weight in `[from_weight, to_weight]`.
    WeightRange { from_weight: f64, to_weight: f64 },
}

impl SearchQuery {
    /// Build a query from optional bounds; both must be present to filter.
    pub fn from_bounds(from_weight: Option<f64>, to_weight: Option<f64>) -> Self {
        match (from_weight, to_weight) {
            (Some(from_weight), Some(to_weight)) => SearchQuery::WeightRange {
                from_weight,
                to_weight,
            },
            _ => SearchQuery::All,
        }
    }

    /// Whether this query filters by weight.
    pub fn is_bounded(&self) -> bool {
        matches!(self, SearchQuery::WeightRange { .. })
    }
}
