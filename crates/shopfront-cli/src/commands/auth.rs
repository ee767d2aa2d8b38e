use crate::context::AppContext;
use anyhow::{Context, Result};
use shopfront_application::AuthFlow;
use shopfront_core::Role;
use shopfront_core::auth::Route;

fn flow(ctx: &AppContext, role: Role, email: String, password: String) -> AuthFlow {
    let mut flow = AuthFlow::new(ctx.api.clone(), ctx.sessions.clone(), ctx.notifier.clone());
    flow.set_role(role);
    flow.set_email(email);
    flow.set_password(password);
    flow
}

pub async fn login(ctx: &AppContext, role: Role, email: String, password: String) -> Result<()> {
    let route = flow(ctx, role, email, password)
        .submit_login()
        .await
        .context("Login failed")?;
    println!("Logged in. Next: {route}");
    Ok(())
}

pub async fn signup(
    ctx: &AppContext,
    role: Role,
    name: String,
    email: String,
    password: String,
) -> Result<()> {
    let mut flow = flow(ctx, role, email, password);
    flow.set_name(name);
    let route = flow.submit_signup().await.context("Signup failed")?;
    println!("Account created. Next: {route}");
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.sessions
        .clear()
        .await
        .context("Failed to clear session")?;
    println!("Logged out. Next: {}", Route::Login);
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    let Some(session) = ctx.sessions.load().await.context("Failed to read session")? else {
        println!("Not logged in ({}).", ctx.config.base_url);
        return Ok(());
    };

    println!("{} ({}) at {}", session.username, session.role, ctx.config.base_url);
    if let Some(id) = session.customer_id {
        println!("  customer id:   {id}");
    }
    if let Some(id) = session.shopkeeper_id {
        println!("  shopkeeper id: {id}");
    }
    Ok(())
}
