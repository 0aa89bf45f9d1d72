//! # Auth Store
//!
//! Holds the signed-in user and the login modal flag.
//!
//! ## Session State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                 login(user)                                             │
//! │   ┌───────────┐ ─────────────────────► ┌───────────────┐               │
//! │   │ Anonymous │                        │ Authenticated │               │
//! │   └───────────┘ ◄───────────────────── └───────────────┘               │
//! │         ▲           logout()                   │ login(other)          │
//! │         │                                      └──────► (replaces user)│
//! │   start: restored from the persisted snapshot                          │
//! │                                                                         │
//! │  login() also closes the login modal; logout() leaves it alone.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `is_authenticated` is derived from `user.is_some()` rather than stored,
//! so the two can never disagree.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use storefront_core::User;
use tracing::info;

use crate::listeners::{Listeners, SubscriptionId};

/// Whether a user is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Session {
    Anonymous,
    Authenticated,
}

/// Auth state observed by subscribers.
///
/// Serializes as `{user, isAuthenticated, isLoginModalOpen}`; the middle
/// field is computed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
    is_login_modal_open: bool,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_login_modal_open(&self) -> bool {
        self.is_login_modal_open
    }

    pub fn session(&self) -> Session {
        if self.is_authenticated() {
            Session::Authenticated
        } else {
            Session::Anonymous
        }
    }
}

impl Serialize for AuthState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AuthState", 3)?;
        state.serialize_field("user", &self.user)?;
        state.serialize_field("isAuthenticated", &self.is_authenticated())?;
        state.serialize_field("isLoginModalOpen", &self.is_login_modal_open)?;
        state.end()
    }
}

/// The auth state container.
#[derive(Debug, Default)]
pub struct AuthStore {
    state: AuthState,
    listeners: Listeners<AuthState>,
}

impl AuthStore {
    /// Creates an anonymous store with the modal closed.
    pub fn new() -> Self {
        AuthStore::default()
    }

    /// Creates a store already holding `user`, without going through
    /// [`AuthStore::login`]. Used when restoring a persisted session.
    pub fn restored(user: Option<User>) -> Self {
        AuthStore {
            state: AuthState {
                user,
                is_login_modal_open: false,
            },
            listeners: Listeners::new(),
        }
    }

    /// Signs `user` in, replacing any current user, and closes the modal.
    ///
    /// No credential is checked here.
    pub fn login(&mut self, user: User) {
        info!(user_id = %user.id, email = %user.email, "login");
        self.state.user = Some(user);
        self.state.is_login_modal_open = false;
        self.notify();
    }

    /// Signs out. The modal flag is unchanged.
    pub fn logout(&mut self) {
        if let Some(user) = self.state.user.take() {
            info!(user_id = %user.id, "logout");
        }
        self.notify();
    }

    pub fn open_login_modal(&mut self) {
        self.state.is_login_modal_open = true;
        self.notify();
    }

    pub fn close_login_modal(&mut self) {
        self.state.is_login_modal_open = false;
        self.notify();
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn is_login_modal_open(&self) -> bool {
        self.state.is_login_modal_open()
    }

    pub fn session(&self) -> Session {
        self.state.session()
    }

    /// Registers a listener called with the auth state after every mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AuthState) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify(&mut self) {
        self.listeners.notify(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn asha() -> User {
        User::new("1", "asha@example.com", "Asha")
    }

    #[test]
    fn test_starts_anonymous() {
        let store = AuthStore::new();
        assert_eq!(store.session(), Session::Anonymous);
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert!(!store.is_login_modal_open());
    }

    #[test]
    fn test_login_sets_user_and_closes_modal() {
        let mut store = AuthStore::new();
        store.open_login_modal();
        assert!(store.is_login_modal_open());

        store.login(asha());
        assert!(store.is_authenticated());
        assert_eq!(store.user(), Some(&asha()));
        assert!(!store.is_login_modal_open());
    }

    #[test]
    fn test_login_replaces_user() {
        let mut store = AuthStore::new();
        store.login(asha());
        store.login(User::new("2", "ravi@example.com", "Ravi"));
        assert_eq!(store.user().map(|u| u.id.as_str()), Some("2"));
    }

    #[test]
    fn test_logout_leaves_modal_flag() {
        let mut store = AuthStore::new();
        store.login(asha());
        store.open_login_modal();

        store.logout();
        assert_eq!(store.session(), Session::Anonymous);
        assert!(store.user().is_none());
        assert!(store.is_login_modal_open());
    }

    #[test]
    fn test_login_then_logout_from_any_state() {
        for start_with_user in [false, true] {
            let mut store = if start_with_user {
                AuthStore::restored(Some(User::new("9", "x@y.io", "X")))
            } else {
                AuthStore::new()
            };
            store.login(asha());
            store.logout();
            assert!(!store.is_authenticated());
            assert!(store.user().is_none());
        }
    }

    #[test]
    fn test_restored_is_authenticated_without_login() {
        let seen = Rc::new(RefCell::new(0));
        let mut store = AuthStore::restored(Some(asha()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        assert_eq!(store.session(), Session::Authenticated);
        assert_eq!(*seen.borrow(), 0);
    }

    #[test]
    fn test_state_serializes_derived_flag() {
        let mut store = AuthStore::new();
        let value = serde_json::to_value(store.state()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"user": null, "isAuthenticated": false, "isLoginModalOpen": false})
        );

        store.login(asha());
        let value = serde_json::to_value(store.state()).unwrap();
        assert_eq!(value["isAuthenticated"], true);
        assert_eq!(value["user"]["email"], "asha@example.com");
        assert_eq!(value["isLoginModalOpen"], false);
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let seen: Rc<RefCell<Vec<(bool, bool)>>> = Rc::new(RefCell::new(Vec::new()));
        let mut store = AuthStore::new();
        let sink = Rc::clone(&seen);
        store.subscribe(move |s| {
            sink.borrow_mut()
                .push((s.is_authenticated(), s.is_login_modal_open()))
        });

        store.open_login_modal();
        store.login(asha());
        store.logout();
        store.close_login_modal();

        assert_eq!(
            *seen.borrow(),
            vec![(false, true), (true, false), (false, false), (false, false)]
        );
    }
}
