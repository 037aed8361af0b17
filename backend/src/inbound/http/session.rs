//! Session helpers keeping HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal in domain-friendly operations:
//! binding an account to the session, reading it back, tearing the session
//! down, and the flash-notice queue that carries one-shot user-visible
//! messages across a redirect.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const NOTICES_KEY: &str = "notices";

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated account's id in the session cookie.
    ///
    /// # Errors
    ///
    /// Returns an internal [`Error`] when the session store rejects the
    /// write.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current account id from the session, if present.
    ///
    /// A malformed id (e.g. a tampered cookie) reads as "not logged in"
    /// rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an internal [`Error`] when the session store cannot be read.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw {
            Some(raw) => match UserId::parse(&raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated account id or fail with `401 Unauthorized`.
    ///
    /// # Errors
    ///
    /// Returns `unauthorized` when no valid account id is bound, or an
    /// internal [`Error`] when the session store cannot be read.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Tear down the session unconditionally.
    ///
    /// A no-op when no session state exists, which makes logout safe to hit
    /// at any time.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Queue a one-shot notice for the next page payload.
    ///
    /// # Errors
    ///
    /// Returns an internal [`Error`] when the session store rejects the
    /// write.
    pub fn push_notice(&self, notice: &str) -> Result<(), Error> {
        let mut notices = self.pending_notices()?;
        notices.push(notice.to_owned());
        self.0
            .insert(NOTICES_KEY, notices)
            .map_err(|error| Error::internal(format!("failed to queue notice: {error}")))
    }

    /// Drain queued notices; a second call returns an empty list.
    ///
    /// # Errors
    ///
    /// Returns an internal [`Error`] when the session store cannot be read.
    pub fn take_notices(&self) -> Result<Vec<String>, Error> {
        let notices = self.pending_notices()?;
        if !notices.is_empty() {
            self.0.remove(NOTICES_KEY);
        }
        Ok(notices)
    }

    fn pending_notices(&self) -> Result<Vec<String>, Error> {
        self.0
            .get::<Vec<String>>(NOTICES_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|error| Error::internal(format!("failed to read notices: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
