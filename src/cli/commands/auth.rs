//! `login` / `logout` handlers

use super::{App, CommandError};
use std::io::{self, Write};

/// Log in and store the issued token in the config file
///
/// # Errors
/// Any [`CommandError`] from reading the password or calling the store
pub async fn login(app: &mut App, email: &str, password: Option<String>) -> Result<(), CommandError> {
    let password = match password {
        Some(p) => p,
        None => prompt("Password: ")?,
    };
    app.store.login(&app.session, email.trim(), &password).await?;
    app.persist_token();
    println!("✓ Logged in as {}", email.trim());
    Ok(())
}

/// Drop the stored token
pub fn logout(app: &mut App) {
    if !app.session.is_authenticated() {
        println!("✓ Already logged out");
        return;
    }
    app.session.clear();
    app.persist_token();
    println!("✓ Logged out");
}

fn prompt(label: &str) -> Result<String, CommandError> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
