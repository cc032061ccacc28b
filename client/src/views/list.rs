use shared::{Id, ListQuery, Paginated};
use std::collections::BTreeSet;

use super::Entity;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Loaded,
    Failed(String),
}

/// State of a filtered, paginated list page.
///
/// Every load is tagged with a ticket; a response carrying an older ticket
/// than the latest load is dropped, so a slow response for old filters never
/// overwrites a newer one.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    query: ListQuery,
    pub page: Paginated<T>,
    pub status: LoadStatus,
    /// Rows with a delete in flight.
    pub deleting: BTreeSet<Id>,
    /// Last failed delete, shown above the table.
    pub error: Option<String>,
    ticket: u64,
    revision: u64,
    page_size: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListAction<T> {
    Load { ticket: u64 },
    Loaded { ticket: u64, page: Paginated<T> },
    Failed { ticket: u64, message: String },
    SetSearch(String),
    SetFilter { key: String, value: Option<String> },
    ClearFilters,
    GoToPage(u32),
    DeleteStarted(Id),
    DeleteSucceeded(Id),
    DeleteFailed { id: Id, message: String },
    DismissError,
}

impl<T: Entity> ListState<T> {
    pub fn new(page_size: u32) -> Self {
        Self::with_query(ListQuery::new(), page_size)
    }

    /// Start with fixed filters, e.g. a customer's loans.
    pub fn with_query(query: ListQuery, page_size: u32) -> Self {
        Self {
            query: ListQuery {
                page: Some(query.page.unwrap_or(1).max(1)),
                page_size: Some(page_size),
                ..query
            },
            page: Paginated::default(),
            status: LoadStatus::Loading,
            deleting: BTreeSet::new(),
            error: None,
            ticket: 0,
            revision: 0,
            page_size,
        }
    }

    /// The query the next load should send.
    pub fn request(&self) -> &ListQuery {
        &self.query
    }

    /// Changes whenever the list must be fetched again: any query change or
    /// a completed delete.
    pub fn load_key(&self) -> (ListQuery, u64) {
        (self.query.clone(), self.revision)
    }

    pub fn rows(&self) -> &[T] {
        &self.page.results
    }

    pub fn current_page(&self) -> u32 {
        self.query.page.unwrap_or(1)
    }

    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        let pages = self.page.count.div_ceil(size);
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.query.get(key)
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn is_deleting(&self, id: &Id) -> bool {
        self.deleting.contains(id)
    }

    pub fn reduce(&mut self, action: ListAction<T>) {
        match action {
            ListAction::Load { ticket } => {
                self.ticket = ticket;
                self.status = LoadStatus::Loading;
            }
            ListAction::Loaded { ticket, page } => {
                if ticket == self.ticket {
                    self.page = page;
                    self.status = LoadStatus::Loaded;
                }
            }
            ListAction::Failed { ticket, message } => {
                if ticket == self.ticket {
                    self.status = LoadStatus::Failed(message);
                }
            }
            ListAction::SetSearch(search) => {
                self.set_filter("search", Some(search));
            }
            ListAction::SetFilter { key, value } => {
                self.set_filter(&key, value);
            }
            ListAction::ClearFilters => {
                if self.query.has_filters() {
                    self.query.clear_filters();
                    self.query.page = Some(1);
                }
            }
            ListAction::GoToPage(page) => {
                let page = page.clamp(1, self.total_pages());
                self.query.page = Some(page);
            }
            ListAction::DeleteStarted(id) => {
                self.error = None;
                self.deleting.insert(id);
            }
            ListAction::DeleteSucceeded(id) => {
                self.deleting.remove(&id);
                let before = self.page.results.len();
                self.page.results.retain(|row| row.id() != &id);
                if self.page.results.len() < before {
                    self.page.count = self.page.count.saturating_sub(1);
                }
                if self.page.results.is_empty() && self.current_page() > 1 {
                    self.query.page = Some(self.current_page() - 1);
                }
                self.revision += 1;
            }
            ListAction::DeleteFailed { id, message } => {
                self.deleting.remove(&id);
                self.error = Some(message);
            }
            ListAction::DismissError => {
                self.error = None;
            }
        }
    }

    /// Filter changes always return to the first page.
    fn set_filter(&mut self, key: &str, value: Option<String>) {
        let before = self.query.get(key).map(str::to_string);
        self.query.set(key, value);
        if self.query.get(key).map(str::to_string) != before {
            self.query.page = Some(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: Id,
    }

    impl Entity for Row {
        fn id(&self) -> &Id {
            &self.id
        }
    }

    fn page(ids: &[&str], count: u64) -> Paginated<Row> {
        Paginated {
            count,
            next: None,
            previous: None,
            results: ids.iter().map(|id| Row { id: Id::from(*id) }).collect(),
        }
    }

    fn loaded(ids: &[&str], count: u64) -> ListState<Row> {
        let mut state = ListState::new(10);
        state.reduce(ListAction::Load { ticket: 1 });
        state.reduce(ListAction::Loaded {
            ticket: 1,
            page: page(ids, count),
        });
        state
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = loaded(&["1"], 45);
        state.reduce(ListAction::GoToPage(3));
        assert_eq!(state.current_page(), 3);

        state.reduce(ListAction::SetFilter {
            key: "status".into(),
            value: Some("active".into()),
        });
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.request().status.as_deref(), Some("active"));

        state.reduce(ListAction::GoToPage(2));
        state.reduce(ListAction::SetSearch("doe".into()));
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_unchanged_filter_keeps_page() {
        let mut state = loaded(&["1"], 45);
        state.reduce(ListAction::SetSearch("doe".into()));
        state.reduce(ListAction::GoToPage(2));
        state.reduce(ListAction::SetSearch(" doe ".into()));
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut state = ListState::new(10);
        state.reduce(ListAction::Load { ticket: 1 });
        state.reduce(ListAction::Load { ticket: 2 });
        state.reduce(ListAction::Loaded {
            ticket: 1,
            page: page(&["old"], 1),
        });
        assert!(state.is_loading());
        assert!(state.rows().is_empty());

        state.reduce(ListAction::Loaded {
            ticket: 2,
            page: page(&["new"], 1),
        });
        assert_eq!(state.rows()[0].id, Id::from("new"));
        assert_eq!(state.status, LoadStatus::Loaded);
    }

    #[test]
    fn test_row_stays_until_delete_succeeds() {
        let mut state = loaded(&["1", "2"], 2);
        state.reduce(ListAction::DeleteStarted(Id::from("1")));
        assert_eq!(state.rows().len(), 2);
        assert!(state.is_deleting(&Id::from("1")));

        state.reduce(ListAction::DeleteFailed {
            id: Id::from("1"),
            message: "Cannot delete a customer with loans.".into(),
        });
        assert_eq!(state.rows().len(), 2);
        assert!(!state.is_deleting(&Id::from("1")));
        assert_eq!(state.error.as_deref(), Some("Cannot delete a customer with loans."));

        let key = state.load_key();
        state.reduce(ListAction::DeleteStarted(Id::from("1")));
        state.reduce(ListAction::DeleteSucceeded(Id::from("1")));
        assert_eq!(state.rows().len(), 1);
        assert_eq!(state.page.count, 1);
        assert_ne!(state.load_key(), key);
    }

    #[test]
    fn test_deleting_last_row_steps_back_a_page() {
        let mut state = loaded(&["1"], 11);
        state.reduce(ListAction::GoToPage(2));
        state.reduce(ListAction::DeleteSucceeded(Id::from("1")));
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_page_bounds() {
        let mut state = loaded(&["1"], 25);
        assert_eq!(state.total_pages(), 3);
        state.reduce(ListAction::GoToPage(9));
        assert_eq!(state.current_page(), 3);
        state.reduce(ListAction::GoToPage(0));
        assert_eq!(state.current_page(), 1);
        assert_eq!(loaded(&[], 0).total_pages(), 1);
    }

    #[test]
    fn test_initial_query_starts_on_page_one() {
        let state: ListState<Row> =
            ListState::with_query(ListQuery::new().filter("status", "pending").page(0), 20);
        assert_eq!(state.request().page, Some(1));
        assert_eq!(state.request().page_size, Some(20));
        assert_eq!(state.filter("status"), Some("pending"));
    }
}
