use crate::auth::token_service::{Claims, TokenService};
use crate::error::{Error, Result};
use crate::AppState;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Identity of the caller, attached to every request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ctx {
    pub user_id: Option<String>,
    pub superuser: bool,
}

impl Ctx {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn superuser(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            superuser: true,
        }
    }

    pub fn require_superuser(&self) -> Result<()> {
        if self.superuser {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }
}

impl From<Claims> for Ctx {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: Some(claims.sub),
            superuser: claims.superuser,
        }
    }
}

/// Resolves the caller from the bearer token. No header means an anonymous
/// caller, a header that does not verify is rejected.
pub async fn mw_identity(
    State(app_state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response> {
    let ctx = match req.headers().get(header::AUTHORIZATION) {
        None => Ctx::anonymous(),
        Some(value) => {
            let token = value
                .to_str()
                .ok()
                .and_then(|str| str.strip_prefix("Bearer "))
                .ok_or(Error::AuthFailTokenWrongFormat)?;

            let claims = TokenService::validate_token(token, &app_state.auth_config)?;
            tracing::debug!("caller {} (superuser: {})", claims.sub, claims.superuser);
            Ctx::from(claims)
        }
    };

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_superusers_pass() {
        assert!(Ctx::superuser("admin").require_superuser().is_ok());
        assert!(matches!(
            Ctx::anonymous().require_superuser(),
            Err(Error::Unauthorized)
        ));

        let member = Ctx {
            user_id: Some("bob".into()),
            superuser: false,
        };
        assert!(member.require_superuser().is_err());
    }
}
