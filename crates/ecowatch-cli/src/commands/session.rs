use anyhow::{Result, bail};
use colored::Colorize;
use ecowatch_application::SessionStateMachine;

use super::Context;

pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<()> {
    let session = ctx.app.session();
    session.login(email, password).await;
    outcome(session)
}

pub async fn register(ctx: &Context, name: &str, email: &str, password: &str) -> Result<()> {
    let session = ctx.app.session();
    session.register(name, email, password).await;
    outcome(session)
}

pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.app.session().logout().await;
    println!("{}", "Logged out".bright_green());
    Ok(())
}

pub async fn whoami(ctx: &Context, refresh: bool) -> Result<()> {
    let session = ctx.app.session();
    if refresh {
        session.refresh_current_user().await;
    }
    match session.current_user() {
        Some(user) => println!("{} <{}> (#{})", user.name.bold(), user.email, user.id),
        None => println!("{}", "Not logged in".bright_black()),
    }
    Ok(())
}

fn outcome(session: &SessionStateMachine) -> Result<()> {
    match session.current_user() {
        Some(user) => {
            println!("{}", format!("Logged in as {} <{}>", user.name, user.email).green());
            Ok(())
        }
        None => bail!(
            "{}",
            session
                .last_error()
                .unwrap_or_else(|| "Authentication failed".to_string())
        ),
    }
}
