// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Command-line surface, one subcommand per screen.

pub mod account;
pub mod events;
pub mod participation;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::App;

#[derive(Parser)]
#[command(name = "eventure")]
#[command(about = "Eventure client: browse, join and evaluate events")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in with an existing account
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and log in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out and clear the saved session
    Logout,
    /// Show or update the logged-in profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Browse, author and manage events
    #[command(subcommand)]
    Events(events::EventsCommand),
    /// Join an event
    Join { event_id: String },
    /// Leave an event
    Leave { event_id: String },
    /// List the events you participate in
    Participations,
    /// Rate and comment an event that has taken place
    Evaluate {
        event_id: String,
        /// Rating from 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: String,
    },
    /// List or remove your comments
    #[command(subcommand)]
    Comments(participation::CommentsCommand),
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the logged-in profile
    Show,
    /// Update display name and/or email
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

pub async fn run(app: &App, cli: Cli) -> Result<()> {
    match cli.command {
        Command::Login { email, password } => account::login(app, email, password).await,
        Command::Signup {
            name,
            email,
            password,
        } => account::signup(app, name, email, password).await,
        Command::Logout => account::logout(app).await,
        Command::Profile(command) => account::profile(app, command).await,
        Command::Events(command) => events::run(app, command).await,
        Command::Join { event_id } => participation::join(app, event_id).await,
        Command::Leave { event_id } => participation::leave(app, event_id).await,
        Command::Participations => participation::participations(app).await,
        Command::Evaluate {
            event_id,
            rating,
            comment,
        } => participation::evaluate(app, event_id, rating, comment).await,
        Command::Comments(command) => participation::comments(app, command).await,
    }
}
