// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Participation and evaluation commands.

use clap::Subcommand;

use crate::cli::events::event_line;
use crate::error::Result;
use crate::services::EvaluationInput;
use crate::App;

#[derive(Subcommand)]
pub enum CommentsCommand {
    /// List your comments grouped by event
    List,
    /// Remove your evaluation from an event
    Remove { event_id: String },
}

pub async fn join(app: &App, event_id: String) -> Result<()> {
    let user = app.session.require_user().await?;
    let mut event = app.client.get_event(&user.token, &event_id).await?;
    app.participation.join(&mut event).await?;
    println!("Joined \"{}\"", event.title);
    Ok(())
}

pub async fn leave(app: &App, event_id: String) -> Result<()> {
    let user = app.session.require_user().await?;
    let mut event = app.client.get_event(&user.token, &event_id).await?;
    app.participation.leave(&mut event).await?;
    println!("Left \"{}\"", event.title);
    Ok(())
}

pub async fn participations(app: &App) -> Result<()> {
    let split = app.listing.participations().await?;
    if split.upcoming.is_empty() && split.past.is_empty() {
        println!("You are not participating in any events.");
        return Ok(());
    }
    if !split.upcoming.is_empty() {
        println!("Upcoming:");
        for event in &split.upcoming {
            println!("  {}", event_line(event));
        }
    }
    if !split.past.is_empty() {
        println!("Past:");
        for event in &split.past {
            println!("  {}", event_line(event));
        }
    }
    Ok(())
}

pub async fn evaluate(app: &App, event_id: String, rating: u8, comment: String) -> Result<()> {
    let user = app.session.require_user().await?;
    let event = app.client.get_event(&user.token, &event_id).await?;
    app.evaluation
        .evaluate(&event, &EvaluationInput { rating, comment })
        .await?;
    println!("Evaluation saved for \"{}\"", event.title);
    Ok(())
}

pub async fn comments(app: &App, command: CommentsCommand) -> Result<()> {
    match command {
        CommentsCommand::List => {
            let summaries = app.listing.my_comments().await?;
            if summaries.is_empty() {
                println!("No comments yet.");
                return Ok(());
            }
            for summary in summaries {
                println!("{} ({})", summary.event_title, summary.event_id);
                for eval in summary.evaluations {
                    println!("  {}/5 - {}", eval.rating, eval.comment);
                }
            }
            Ok(())
        }
        CommentsCommand::Remove { event_id } => {
            app.evaluation.remove(&event_id).await?;
            println!("Evaluation removed.");
            Ok(())
        }
    }
}
