// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Account commands: login, signup, logout, profile.

use std::io::{self, Write};

use crate::cli::ProfileCommand;
use crate::error::Result;
use crate::services::{Credentials, SignupInput, UpdateProfileInput};
use crate::App;

pub async fn login(app: &App, email: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };
    let user = app.account.login(&Credentials { email, password }).await?;
    println!("Logged in as {} <{}>", user.name, user.email);
    Ok(())
}

pub async fn signup(
    app: &App,
    name: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };
    let user = app
        .account
        .signup(&SignupInput {
            name,
            email,
            password,
        })
        .await?;
    println!("Welcome, {}! You are logged in.", user.name);
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.account.logout().await?;
    println!("Logged out");
    Ok(())
}

pub async fn profile(app: &App, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::Show => {
            let user = app.session.require_user().await?;
            println!("Name:  {}", user.name);
            println!("Email: {}", user.email);
            println!(
                "Participating in {} event(s), {} evaluated",
                user.participate.len(),
                user.commented.len()
            );
            Ok(())
        }
        ProfileCommand::Update { name, email } => {
            let current = app.session.require_user().await?;
            let input = UpdateProfileInput {
                name: name.unwrap_or(current.name),
                email: email.unwrap_or(current.email),
            };
            let user = app.account.update_profile(&input).await?;
            println!("Profile updated: {} <{}>", user.name, user.email);
            Ok(())
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush().map_err(anyhow::Error::from)?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(anyhow::Error::from)?;
    Ok(line.trim_end().to_string())
}
