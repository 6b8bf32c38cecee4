use super::params::{QueryParams, SectorFilter, SortDirection, SortField, SortSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Watchlist,
    Detail,
}

/// Interactive browse state owned by a front end.
///
/// The engines never hold this; callers turn it into `QueryParams` per call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySession {
    pub search: String,
    pub sector: SectorFilter,
    pub sort: SortSpec,
    pub selected: Option<u32>,
    pub view: View,
}

impl QuerySession {
    pub fn new(sort: SortSpec, sector: SectorFilter) -> Self {
        Self {
            sort,
            sector,
            ..Self::default()
        }
    }

    /// Same field flips direction; a new field starts descending.
    pub fn select_sort_field(&mut self, field: SortField) {
        if self.sort.field == field {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort = SortSpec {
                field,
                direction: SortDirection::Descending,
            };
        }
    }

    /// Advance the sector filter through `universe` (as returned by `sectors`), wrapping.
    pub fn cycle_sector(&mut self, universe: &[String]) {
        if universe.is_empty() {
            self.sector = SectorFilter::All;
            return;
        }
        let current = universe
            .iter()
            .position(|s| s == self.sector.as_str())
            .unwrap_or(0);
        let next = (current + 1) % universe.len();
        self.sector = SectorFilter::parse(&universe[next]);
    }

    pub fn open_detail(&mut self, id: u32) {
        self.selected = Some(id);
        self.view = View::Detail;
    }

    pub fn back_to_watchlist(&mut self) {
        self.view = View::Watchlist;
    }

    pub fn params(&self) -> QueryParams {
        QueryParams {
            search: self.search.clone(),
            sector: self.sector.clone(),
            sort: self.sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_composite_desc() {
        let session = QuerySession::default();
        assert_eq!(session.sort.field, SortField::Composite);
        assert_eq!(session.sort.direction, SortDirection::Descending);
        assert_eq!(session.view, View::Watchlist);
    }

    #[test]
    fn test_same_field_alternates() {
        let mut session = QuerySession::default();
        session.select_sort_field(SortField::Composite);
        assert_eq!(session.sort.direction, SortDirection::Ascending);
        session.select_sort_field(SortField::Composite);
        assert_eq!(session.sort.direction, SortDirection::Descending);
        session.select_sort_field(SortField::Composite);
        assert_eq!(session.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_new_field_resets_to_descending() {
        let mut session = QuerySession::default();
        session.select_sort_field(SortField::Composite); // now ascending
        session.select_sort_field(SortField::Change);
        assert_eq!(session.sort.field, SortField::Change);
        assert_eq!(session.sort.direction, SortDirection::Descending);
    }

    #[test]
    fn test_cycle_sector_wraps() {
        let universe = vec![
            "All".to_string(),
            "Technology".to_string(),
            "Financials".to_string(),
        ];
        let mut session = QuerySession::default();
        session.cycle_sector(&universe);
        assert_eq!(session.sector, SectorFilter::parse("Technology"));
        session.cycle_sector(&universe);
        assert_eq!(session.sector, SectorFilter::parse("Financials"));
        session.cycle_sector(&universe);
        assert_eq!(session.sector, SectorFilter::All);
    }

    #[test]
    fn test_cycle_sector_unknown_current_restarts() {
        let universe = vec!["All".to_string(), "Technology".to_string()];
        let mut session = QuerySession::default();
        session.sector = SectorFilter::parse("Mining");
        session.cycle_sector(&universe);
        assert_eq!(session.sector, SectorFilter::parse("Technology"));
    }

    #[test]
    fn test_detail_navigation() {
        let mut session = QuerySession::default();
        session.open_detail(7);
        assert_eq!(session.selected, Some(7));
        assert_eq!(session.view, View::Detail);
        session.back_to_watchlist();
        assert_eq!(session.view, View::Watchlist);
        assert_eq!(session.selected, Some(7));
    }

    #[test]
    fn test_params_reflect_session() {
        let mut session = QuerySession::default();
        session.search = "apex".to_string();
        session.select_sort_field(SortField::Gbm);
        let params = session.params();
        assert_eq!(params.search, "apex");
        assert_eq!(params.sort.field, SortField::Gbm);
    }
}
