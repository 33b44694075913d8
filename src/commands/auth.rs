//! Session command handlers: login, logout, whoami.

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::session::{FileStore, SessionGate};

fn gate(config: &Config) -> Result<SessionGate<FileStore>> {
    let path = config.session_store_path()?;
    Ok(SessionGate::new(FileStore::new(path)))
}

/// Log in and persist the session.
pub async fn login(config: &Config, email: &str, password: &str) -> Result<()> {
    let gate = gate(config)?;
    let user = gate.login(email, password).await?;
    println!("{} {} <{}>", "Logged in as".green(), user.name, user.email);
    Ok(())
}

/// Clear the persisted session. Succeeds even when not logged in.
pub fn logout(config: &Config) -> Result<()> {
    let gate = gate(config)?;
    gate.logout()?;
    println!("Logged out");
    Ok(())
}

/// Print the logged-in user, if any.
pub fn whoami(config: &Config) -> Result<()> {
    let gate = gate(config)?;
    match gate.current_user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("{}", "Not logged in".yellow()),
    }
    Ok(())
}
