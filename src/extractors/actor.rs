//! Extract the acting identity from request headers.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Headers consulted for the acting identity, in precedence order.
pub const ADMIN_ID_HEADER: &str = "X-Admin-ID";
pub const USER_ID_HEADER: &str = "X-User-ID";
pub const USER_EMAIL_HEADER: &str = "X-User-Email";

/// Identity attributed when no header is present.
pub const SYSTEM_ACTOR: &str = "system";

/// Actor written into `created.by` / `updated.by`: admin id, then user id,
/// then user email, then `system`.
#[derive(Clone, Debug)]
pub struct Actor(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        for header in [ADMIN_ID_HEADER, USER_ID_HEADER, USER_EMAIL_HEADER] {
            let value = parts
                .headers
                .get(header)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            if let Some(actor) = value {
                return Ok(Actor(actor));
            }
        }
        Ok(Actor(SYSTEM_ACTOR.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Actor {
        let (mut parts, _) = request.into_parts();
        Actor::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn admin_id_wins_over_the_rest() {
        let request = Request::builder()
            .header(ADMIN_ID_HEADER, "ADMIN1")
            .header(USER_ID_HEADER, "USER1")
            .header(USER_EMAIL_HEADER, "a@b.c")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.0, "ADMIN1");
    }

    #[tokio::test]
    async fn fallback_chain_reaches_email_then_system() {
        let request =
            Request::builder().header(USER_EMAIL_HEADER, "a@b.c").body(()).unwrap();
        assert_eq!(extract(request).await.0, "a@b.c");

        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await.0, SYSTEM_ACTOR);
    }

    #[tokio::test]
    async fn blank_headers_are_skipped() {
        let request = Request::builder()
            .header(ADMIN_ID_HEADER, "   ")
            .header(USER_ID_HEADER, "USER1")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.0, "USER1");
    }
}
