//! Login, logout and whoami.

use anyhow::Result;
use chrono::Utc;
use serde_json::json;

use super::LoginArgs;
use crate::context::Context;

/// Log in with an email address.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let path = ctx.session_path();
    let mut stored = ctx.load_session()?;

    let message = stored
        .session
        .login(&args.email, &ctx.config.login_policy())?;
    stored.logged_in_at = Some(Utc::now());
    stored.save(&path)?;

    if ctx.output.is_json() {
        ctx.output.json(&stored);
    } else {
        ctx.output.success(message);
    }
    Ok(())
}

/// Forget the current login.
pub async fn logout(ctx: &Context) -> Result<()> {
    let path = ctx.session_path();
    let mut stored = ctx.load_session()?;

    let message = stored.session.logout();
    stored.logged_in_at = None;
    stored.save(&path)?;

    if ctx.output.is_json() {
        ctx.output.json(&stored);
    } else {
        ctx.output.success(message);
    }
    Ok(())
}

/// Show who is logged in.
pub async fn whoami(ctx: &Context) -> Result<()> {
    let stored = ctx.load_session()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "email": stored.session.email(),
            "loggedInAt": stored.logged_in_at,
        }));
        return Ok(());
    }

    match stored.session.email() {
        Some(email) => {
            ctx.output.header("Profile");
            ctx.output.kv("Email", email);
            if let Some(at) = stored.logged_in_at {
                ctx.output
                    .kv("Since", &at.format("%Y-%m-%d %H:%M UTC").to_string());
            }
        }
        None => ctx.output.info("Not logged in. Run `grocer login <email>`."),
    }
    Ok(())
}
