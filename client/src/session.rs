//! Who is signed in, and the tokens that prove it.
//!
//! One [`Session`] exists per application. It is shared (`Rc`) between the
//! API client, which reads and refreshes tokens, and the UI, which reads the
//! current user and listens for sign-in/sign-out.

use serde::{Deserialize, Serialize};
use shared::User;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("credential storage unavailable: {0}")]
    Unavailable(String),
    #[error("stored credentials are unreadable: {0}")]
    Corrupt(String),
}

/// Where credentials outlive a page reload.
pub trait CredentialStore {
    fn load(&self) -> Result<Option<StoredSession>, StoreError>;
    fn save(&self, session: &StoredSession) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Keeps credentials for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<StoredSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: RefCell::new(Some(session)),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<StoredSession>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn(User),
    SignedOut,
    /// Tokens were rejected and could not be refreshed.
    Expired,
}

type Listener = Rc<dyn Fn(&SessionEvent)>;

pub struct Session {
    store: Rc<dyn CredentialStore>,
    current: RefCell<Option<StoredSession>>,
    listeners: RefCell<Vec<Listener>>,
}

impl Session {
    /// Restore whatever the store holds. An unreadable store starts signed out.
    pub fn init(store: Rc<dyn CredentialStore>) -> Rc<Self> {
        let current = match store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Discarding stored credentials: {}", e);
                if let Err(e) = store.clear() {
                    warn!("Failed to clear stored credentials: {}", e);
                }
                None
            }
        };
        debug!(restored = current.is_some(), "Session initialised");
        Rc::new(Self {
            store,
            current: RefCell::new(current),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn access_token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.access.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.current.borrow().as_ref().and_then(|s| s.refresh.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.current.borrow().as_ref().and_then(|s| s.user.clone())
    }

    /// Signed in means tokens and a resolved user.
    pub fn is_authenticated(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .map(|s| s.user.is_some())
            .unwrap_or(false)
    }

    /// Start a new session from a login response.
    pub fn establish(&self, access: String, refresh: String) {
        self.replace(Some(StoredSession {
            access,
            refresh: Some(refresh),
            user: None,
        }));
    }

    /// Attach the resolved user and announce the sign-in.
    pub fn set_user(&self, user: User) {
        let updated = {
            let mut current = self.current.borrow_mut();
            match current.as_mut() {
                Some(session) => {
                    session.user = Some(user.clone());
                    Some(session.clone())
                }
                None => None,
            }
        };
        if let Some(session) = updated {
            self.persist(&session);
            info!(user = %user.username, "Signed in");
            self.notify(&SessionEvent::SignedIn(user));
        }
    }

    /// Store a refreshed access token, and the rotated refresh token when
    /// the server issued one.
    pub fn refresh(&self, access: String, refresh: Option<String>) {
        let updated = {
            let mut current = self.current.borrow_mut();
            current.as_mut().map(|session| {
                session.access = access;
                if let Some(refresh) = refresh {
                    session.refresh = Some(refresh);
                }
                session.clone()
            })
        };
        if let Some(session) = updated {
            self.persist(&session);
        }
    }

    /// Sign out on request.
    pub fn clear(&self) {
        self.replace(None);
        info!("Signed out");
        self.notify(&SessionEvent::SignedOut);
    }

    /// Sign out because the server no longer accepts the tokens.
    pub fn expire(&self) {
        self.replace(None);
        warn!("Session expired");
        self.notify(&SessionEvent::Expired);
    }

    fn replace(&self, next: Option<StoredSession>) {
        match &next {
            Some(session) => self.persist(session),
            None => {
                if let Err(e) = self.store.clear() {
                    warn!("Failed to clear stored credentials: {}", e);
                }
            }
        }
        *self.current.borrow_mut() = next;
    }

    fn persist(&self, session: &StoredSession) {
        if let Err(e) = self.store.save(session) {
            warn!("Failed to persist credentials: {}", e);
        }
    }

    fn notify(&self, event: &SessionEvent) {
        // Listeners may touch the session, so call them on a snapshot.
        let listeners: Vec<Listener> = self.listeners.borrow().iter().cloned().collect();
        for listener in listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Id, Role};

    fn user() -> User {
        User {
            id: Id::from("5"),
            username: "agent".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::CallingAgent,
            phone_number: None,
            is_active: true,
            date_joined: None,
        }
    }

    struct BrokenStore;

    impl CredentialStore for BrokenStore {
        fn load(&self) -> Result<Option<StoredSession>, StoreError> {
            Err(StoreError::Corrupt("not json".into()))
        }
        fn save(&self, _: &StoredSession) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota".into()))
        }
        fn clear(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    /// Unreadable and cannot be wiped either.
    #[derive(Default)]
    struct StuckStore {
        clear_attempts: std::cell::Cell<u32>,
    }

    impl CredentialStore for StuckStore {
        fn load(&self) -> Result<Option<StoredSession>, StoreError> {
            Err(StoreError::Corrupt("truncated".into()))
        }
        fn save(&self, _: &StoredSession) -> Result<(), StoreError> {
            Ok(())
        }
        fn clear(&self) -> Result<(), StoreError> {
            self.clear_attempts.set(self.clear_attempts.get() + 1);
            Err(StoreError::Unavailable("storage disabled".into()))
        }
    }

    #[test]
    fn test_unclearable_store_starts_signed_out() {
        let store = Rc::new(StuckStore::default());
        let session = Session::init(store.clone());
        assert_eq!(store.clear_attempts.get(), 1);
        assert!(!session.is_authenticated());
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn test_restores_from_store() {
        let store = Rc::new(MemoryStore::with_session(StoredSession {
            access: "a".into(),
            refresh: Some("r".into()),
            user: Some(user()),
        }));
        let session = Session::init(store);
        assert!(session.is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("a"));
    }

    #[test]
    fn test_refresh_keeps_old_refresh_token_when_not_rotated() {
        let store = Rc::new(MemoryStore::new());
        let session = Session::init(store.clone());
        session.establish("a1".into(), "r1".into());
        session.refresh("a2".into(), None);
        assert_eq!(session.access_token().as_deref(), Some("a2"));
        assert_eq!(session.refresh_token().as_deref(), Some("r1"));

        session.refresh("a3".into(), Some("r2".into()));
        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.access, "a3");
        assert_eq!(stored.refresh.as_deref(), Some("r2"));
    }

    #[test]
    fn test_expire_clears_and_notifies() {
        let store = Rc::new(MemoryStore::new());
        let session = Session::init(store.clone());
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        session.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        session.establish("a".into(), "r".into());
        session.set_user(user());
        session.expire();

        assert_eq!(session.access_token(), None);
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(
            *events.borrow(),
            vec![SessionEvent::SignedIn(user()), SessionEvent::Expired]
        );
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let session = Session::init(Rc::new(BrokenStore));
        assert!(!session.is_authenticated());
        session.establish("a".into(), "r".into());
        assert_eq!(session.access_token().as_deref(), Some("a"));
    }
}
