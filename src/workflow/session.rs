use tracing::{info, warn};

use crate::auth::verify_token;
use crate::context::AppContext;
use crate::domain::user::{Credentials, Registration, User};
use crate::error::{AppError, AppResult};

pub async fn sign_in(ctx: &AppContext, credentials: Credentials) -> AppResult<()> {
    let token = ctx.auth.login(&credentials).await?;
    ctx.session.save(&token)?;
    info!(email = %credentials.email, "signed in");
    Ok(())
}

pub async fn sign_up(ctx: &AppContext, registration: Registration) -> AppResult<()> {
    let token = ctx.auth.register(&registration).await?;
    ctx.session.save(&token)?;
    info!(email = %registration.email, "registered and signed in");
    Ok(())
}

pub fn sign_out(ctx: &AppContext) -> AppResult<()> {
    ctx.session.clear()?;
    info!("session cleared");
    Ok(())
}

/// Resolves the signed-in user. A missing or unverifiable token is not an
/// error; it simply means nobody is signed in.
pub fn current_user(ctx: &AppContext) -> AppResult<Option<User>> {
    let Some(token) = ctx.session.load()? else {
        return Ok(None);
    };
    let secret = ctx
        .config
        .jwt_secret
        .as_deref()
        .ok_or_else(|| AppError::Configuration("JWT secret not configured".to_string()))?;

    match verify_token(token.as_str(), secret) {
        Ok(user) => Ok(Some(user)),
        Err(err) => {
            warn!(error = %err, "stored session token rejected");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::fixtures::signed_token;
    use crate::domain::user::AccessToken;
    use crate::workflow::testing::{FakeAuth, FakeTickets, context_with};

    fn credentials() -> Credentials {
        Credentials {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn sign_in_persists_token() {
        let (ctx, _dir) = context_with(FakeAuth::issuing("tok-1"), FakeTickets::empty());

        sign_in(&ctx, credentials()).await.unwrap();

        assert_eq!(
            ctx.session.load().unwrap(),
            Some(AccessToken {
                access_token: "tok-1".to_string()
            })
        );
    }

    #[tokio::test]
    async fn failed_sign_in_leaves_session_untouched() {
        let (ctx, _dir) = context_with(FakeAuth::rejecting(), FakeTickets::empty());

        assert!(sign_in(&ctx, credentials()).await.is_err());
        assert!(ctx.session.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn sign_up_then_sign_out() {
        let (ctx, _dir) = context_with(FakeAuth::issuing("tok-2"), FakeTickets::empty());

        sign_up(
            &ctx,
            Registration {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "hunter2".to_string(),
            },
        )
        .await
        .unwrap();
        assert!(ctx.session.load().unwrap().is_some());

        sign_out(&ctx).unwrap();
        assert!(ctx.session.load().unwrap().is_none());
    }

    #[test]
    fn current_user_reads_verified_claims() {
        let (mut ctx, _dir) = context_with(FakeAuth::rejecting(), FakeTickets::empty());
        ctx.config.jwt_secret = Some("shh".to_string());
        ctx.session
            .save(&AccessToken {
                access_token: signed_token("shh", "ada", "admin", 600),
            })
            .unwrap();

        let user = current_user(&ctx).unwrap().unwrap();
        assert_eq!(user.name, "ada");
        assert_eq!(user.role, "admin");
    }

    #[test]
    fn current_user_is_none_for_bad_or_missing_token() {
        let (mut ctx, _dir) = context_with(FakeAuth::rejecting(), FakeTickets::empty());
        ctx.config.jwt_secret = Some("shh".to_string());
        assert!(current_user(&ctx).unwrap().is_none());

        ctx.session
            .save(&AccessToken {
                access_token: signed_token("other", "ada", "admin", 600),
            })
            .unwrap();
        assert!(current_user(&ctx).unwrap().is_none());
    }

    #[test]
    fn current_user_needs_a_secret() {
        let (ctx, _dir) = context_with(FakeAuth::rejecting(), FakeTickets::empty());
        ctx.session
            .save(&AccessToken {
                access_token: "whatever".to_string(),
            })
            .unwrap();

        assert!(matches!(
            current_user(&ctx),
            Err(AppError::Configuration(_))
        ));
    }
}
