//! Session identity extractor and helpers.
//!
//! Nothing here guards routes: every screen is reachable by URL. The
//! extractor only tells templates who is signed in.

use axum::{extract::FromRequestParts, http::request::Parts};
use secrecy::{ExposeSecret, SecretString};
use tower_sessions::Session;

use crate::models::{SessionUser, session_keys};

/// Extractor that optionally gets the signed-in visitor.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.email),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalAuth(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<SessionUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Store the signed-in visitor and, when the API issued one, their token.
///
/// The session id is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &SessionUser,
    token: Option<&SecretString>,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await?;

    match token {
        Some(token) => {
            session
                .insert(session_keys::AUTH_TOKEN, token.expose_secret())
                .await?;
        }
        None => {
            session.remove::<String>(session_keys::AUTH_TOKEN).await?;
        }
    }

    Ok(())
}

/// Clear the signed-in visitor and token from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use aszmart_core::{Email, Role};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn shopper() -> SessionUser {
        SessionUser {
            email: Email::parse("shopper@aszmart.com").unwrap(),
            role: Role::User,
        }
    }

    async fn stored_token(session: &Session) -> Option<String> {
        session.get::<String>(session_keys::AUTH_TOKEN).await.unwrap()
    }

    #[tokio::test]
    async fn test_login_stores_user_and_token() {
        let session = session();
        let token = SecretString::from("tok-123".to_string());

        set_current_user(&session, &shopper(), Some(&token)).await.unwrap();

        let user: Option<SessionUser> = session.get(session_keys::CURRENT_USER).await.unwrap();
        assert_eq!(user, Some(shopper()));
        assert_eq!(stored_token(&session).await.as_deref(), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_login_without_token_drops_stale_token() {
        let session = session();
        let token = SecretString::from("old-token".to_string());
        set_current_user(&session, &shopper(), Some(&token)).await.unwrap();

        set_current_user(&session, &shopper(), None).await.unwrap();

        assert_eq!(stored_token(&session).await, None);
        let user: Option<SessionUser> = session.get(session_keys::CURRENT_USER).await.unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_logout_removes_user_and_token() {
        let session = session();
        let token = SecretString::from("tok-123".to_string());
        set_current_user(&session, &shopper(), Some(&token)).await.unwrap();

        clear_current_user(&session).await.unwrap();

        assert_eq!(stored_token(&session).await, None);
        let user: Option<SessionUser> = session.get(session_keys::CURRENT_USER).await.unwrap();
        assert_eq!(user, None);
    }
}
