use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Submitting,
}

/// State of a single-entity page.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    Loading,
    NotFound,
    /// The user may not see this entity; rendered like a missing one.
    Forbidden,
    Failed(String),
    Ready {
        entity: T,
        mode: Mode,
        error: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction<T> {
    Load,
    Loaded(T),
    LoadFailed(ApiError),
    SubmitStarted,
    /// The action went through; carries the fresh entity when the server
    /// returned one.
    SubmitSucceeded(Option<T>),
    SubmitFailed(String),
}

impl<T> Default for DetailState<T> {
    fn default() -> Self {
        DetailState::Loading
    }
}

impl<T> DetailState<T> {
    pub fn entity(&self) -> Option<&T> {
        match self {
            DetailState::Ready { entity, .. } => Some(entity),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, DetailState::Ready { mode: Mode::Submitting, .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DetailState::Ready { error, .. } => error.as_deref(),
            DetailState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn reduce(self, action: DetailAction<T>) -> Self {
        match (self, action) {
            (_, DetailAction::Load) => DetailState::Loading,
            (_, DetailAction::Loaded(entity)) => DetailState::Ready {
                entity,
                mode: Mode::Viewing,
                error: None,
            },
            (_, DetailAction::LoadFailed(error)) => {
                if error.is_not_found() {
                    DetailState::NotFound
                } else if error.is_forbidden() {
                    DetailState::Forbidden
                } else {
                    DetailState::Failed(error.user_message())
                }
            }
            (DetailState::Ready { entity, mode: Mode::Viewing, .. }, DetailAction::SubmitStarted) => {
                DetailState::Ready {
                    entity,
                    mode: Mode::Submitting,
                    error: None,
                }
            }
            (DetailState::Ready { entity, .. }, DetailAction::SubmitSucceeded(fresh)) => {
                DetailState::Ready {
                    entity: fresh.unwrap_or(entity),
                    mode: Mode::Viewing,
                    error: None,
                }
            }
            (DetailState::Ready { entity, .. }, DetailAction::SubmitFailed(message)) => {
                DetailState::Ready {
                    entity,
                    mode: Mode::Viewing,
                    error: Some(message),
                }
            }
            // Submissions only apply to a loaded, idle page.
            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> DetailState<&'static str> {
        DetailState::Loading.reduce(DetailAction::Loaded("loan"))
    }

    #[test]
    fn test_load_failures_map_to_states() {
        let not_found = DetailState::<()>::Loading
            .reduce(DetailAction::LoadFailed(ApiError::from_response(404, r#"{"detail": "Not found."}"#)));
        assert_eq!(not_found, DetailState::NotFound);

        let forbidden = DetailState::<()>::Loading.reduce(DetailAction::LoadFailed(ApiError::from_response(403, "")));
        assert_eq!(forbidden, DetailState::Forbidden);

        let failed = DetailState::<()>::Loading.reduce(DetailAction::LoadFailed(ApiError::Transport("down".into())));
        assert!(matches!(failed, DetailState::Failed(_)));
    }

    #[test]
    fn test_submit_cycle() {
        let state = ready().reduce(DetailAction::SubmitStarted);
        assert!(state.is_submitting());

        // A second submit while one is in flight changes nothing.
        let state = state.reduce(DetailAction::SubmitStarted);
        assert!(state.is_submitting());

        let state = state.reduce(DetailAction::SubmitFailed("Loan is not pending.".into()));
        assert!(!state.is_submitting());
        assert_eq!(state.error(), Some("Loan is not pending."));
        assert_eq!(state.entity(), Some(&"loan"));

        let state = state
            .reduce(DetailAction::SubmitStarted)
            .reduce(DetailAction::SubmitSucceeded(Some("approved loan")));
        assert_eq!(state.entity(), Some(&"approved loan"));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_submit_ignored_before_load() {
        let state = DetailState::<&str>::Loading.reduce(DetailAction::SubmitStarted);
        assert_eq!(state, DetailState::Loading);
    }
}
