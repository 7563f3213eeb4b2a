// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Event commands: browse, show, mine, create, edit, remake, delete.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::error::{AppError, Result};
use crate::models::{Category, Event};
use crate::services::{CoverSource, DateOrder, EditorMode, EventDraft, OwnedFilter};
use crate::time_utils;
use crate::App;

#[derive(Subcommand)]
pub enum EventsCommand {
    /// List upcoming events, optionally narrowed to a category
    Browse {
        #[arg(long)]
        category: Option<String>,
        /// Sort by date: asc or desc
        #[arg(long, default_value = "asc")]
        sort: String,
    },
    /// Show one event with its evaluations and related events
    Show { event_id: String },
    /// List events you created: all, upcoming or past
    Mine {
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Create an event
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        postal_code: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        category: String,
        /// Date as dd/mm/yyyy
        #[arg(long)]
        date: String,
        /// Time as HH:MM
        #[arg(long)]
        time: String,
        #[arg(long)]
        max_attendees: u32,
        /// Local image file to upload as the cover
        #[arg(long)]
        cover: Option<PathBuf>,
        /// Already hosted cover URL
        #[arg(long, conflicts_with = "cover")]
        cover_url: Option<String>,
    },
    /// Edit an event you created
    Edit {
        event_id: String,
        #[command(flatten)]
        overrides: EventOverrides,
    },
    /// Recreate a past event as a new upcoming one
    Remake {
        event_id: String,
        #[command(flatten)]
        overrides: EventOverrides,
    },
    /// Delete an event you created
    Delete {
        event_id: String,
        /// Skip the confirmation step
        #[arg(long)]
        yes: bool,
    },
}

/// Field overrides applied on top of a prefilled draft.
#[derive(Args)]
pub struct EventOverrides {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    postal_code: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Date as dd/mm/yyyy
    #[arg(long)]
    date: Option<String>,
    /// Time as HH:MM
    #[arg(long)]
    time: Option<String>,
    #[arg(long)]
    max_attendees: Option<u32>,
    /// Local image file to upload as the cover
    #[arg(long)]
    cover: Option<PathBuf>,
    /// Already hosted cover URL
    #[arg(long, conflicts_with = "cover")]
    cover_url: Option<String>,
}

impl EventOverrides {
    fn apply(self, draft: &mut EventDraft) -> Result<()> {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(address) = self.address {
            draft.address = address;
        }
        if let Some(postal_code) = self.postal_code {
            draft.postal_code = postal_code;
        }
        if let Some(city) = self.city {
            draft.city = city;
        }
        if let Some(category) = self.category {
            draft.category = category.parse()?;
        }
        if let Some(max_attendees) = self.max_attendees {
            draft.max_attendees = max_attendees;
        }
        if self.date.is_some() || self.time.is_some() {
            let date = self
                .date
                .unwrap_or_else(|| draft.date.format("%d/%m/%Y").to_string());
            let time = self
                .time
                .unwrap_or_else(|| draft.date.format("%H:%M").to_string());
            draft.date = time_utils::parse_schedule(&date, &time)?;
        }
        if let Some(path) = self.cover {
            draft.cover = Some(CoverSource::File(path));
        } else if let Some(url) = self.cover_url {
            draft.cover = Some(CoverSource::Url(url));
        }
        Ok(())
    }
}

pub async fn run(app: &App, command: EventsCommand) -> Result<()> {
    match command {
        EventsCommand::Browse { category, sort } => browse(app, category, sort).await,
        EventsCommand::Show { event_id } => show(app, event_id).await,
        EventsCommand::Mine { filter } => mine(app, filter).await,
        EventsCommand::Create {
            title,
            description,
            address,
            postal_code,
            city,
            category,
            date,
            time,
            max_attendees,
            cover,
            cover_url,
        } => {
            let draft = EventDraft {
                title,
                description,
                address,
                postal_code,
                city,
                max_attendees,
                date: time_utils::parse_schedule(&date, &time)?,
                category: category.parse()?,
                cover: cover
                    .map(CoverSource::File)
                    .or(cover_url.map(CoverSource::Url)),
            };
            let event = app.authoring.submit(&EditorMode::Create, &draft).await?;
            println!("Created \"{}\" ({})", event.title, event.id);
            Ok(())
        }
        EventsCommand::Edit {
            event_id,
            overrides,
        } => {
            let (_, mut draft) = app.authoring.draft_from(&event_id).await?;
            overrides.apply(&mut draft)?;
            let event = app
                .authoring
                .submit(&EditorMode::Edit(event_id), &draft)
                .await?;
            println!("Updated \"{}\"", event.title);
            Ok(())
        }
        EventsCommand::Remake {
            event_id,
            overrides,
        } => {
            let (_, mut draft) = app.authoring.draft_from(&event_id).await?;
            overrides.apply(&mut draft)?;
            let event = app
                .authoring
                .submit(&EditorMode::Remake(event_id), &draft)
                .await?;
            println!("Recreated as \"{}\" ({})", event.title, event.id);
            Ok(())
        }
        EventsCommand::Delete { event_id, yes } => {
            let (event, _) = app.authoring.draft_from(&event_id).await?;
            if !yes {
                print_event_block(&event);
                println!();
                println!("Re-run with --yes to delete this event.");
                return Ok(());
            }
            app.authoring.delete(&EditorMode::Delete(event_id)).await?;
            println!("Deleted \"{}\"", event.title);
            Ok(())
        }
    }
}

async fn browse(app: &App, category: Option<String>, sort: String) -> Result<()> {
    let category = match category {
        Some(raw) => Some(raw.parse::<Category>()?),
        None => None,
    };
    let order = parse_order(&sort)?;

    let events = app.listing.upcoming(category, order).await?;
    if events.is_empty() {
        println!("No upcoming events.");
        return Ok(());
    }
    for event in &events {
        println!("{}", event_line(event));
    }
    Ok(())
}

async fn show(app: &App, event_id: String) -> Result<()> {
    let detail = app.detail.load(&event_id).await?;
    print_event_block(&detail.event);

    if detail.joined {
        println!("You are attending.");
    }
    if detail.passed {
        if detail.can_evaluate {
            println!("This event is over; you can evaluate it.");
        } else {
            println!("This event is over.");
        }
    }

    if let Some(average) = detail.event.average_rating() {
        println!();
        println!("Evaluations (average {average:.1}/5):");
        for eval in &detail.event.evaluations {
            println!("  {}/5  {} - {}", eval.rating, eval.name, eval.comment);
        }
    }

    let related = app
        .listing
        .related(detail.event.category, &detail.event.id)
        .await?;
    if !related.is_empty() {
        println!();
        println!("More {} events:", detail.event.category);
        for event in &related {
            println!("  {}", event_line(event));
        }
    }
    Ok(())
}

async fn mine(app: &App, filter: String) -> Result<()> {
    let filter = parse_filter(&filter)?;
    let events = app.listing.mine(filter).await?;
    if events.is_empty() {
        println!("No events.");
        return Ok(());
    }
    for event in &events {
        println!("{}", event_line(event));
    }
    Ok(())
}

fn parse_order(raw: &str) -> Result<DateOrder> {
    match raw {
        "asc" => Ok(DateOrder::Ascending),
        "desc" => Ok(DateOrder::Descending),
        _ => Err(AppError::Validation(format!(
            "sort must be asc or desc, got '{raw}'"
        ))),
    }
}

fn parse_filter(raw: &str) -> Result<OwnedFilter> {
    match raw {
        "all" => Ok(OwnedFilter::All),
        "upcoming" => Ok(OwnedFilter::Upcoming),
        "past" => Ok(OwnedFilter::Past),
        _ => Err(AppError::Validation(format!(
            "filter must be all, upcoming or past, got '{raw}'"
        ))),
    }
}

pub(crate) fn event_line(event: &Event) -> String {
    format!(
        "{}  {}  [{}] {} - {}",
        event.id,
        time_utils::format_schedule(event.date),
        event.category,
        event.title,
        event.city
    )
}

pub(crate) fn print_event_block(event: &Event) {
    println!("{} ({})", event.title, event.id);
    println!("  When:     {}", time_utils::format_schedule(event.date));
    println!(
        "  Where:    {}, {} {}",
        event.address, event.postal_code, event.city
    );
    println!("  Category: {}", event.category);
    println!(
        "  Capacity: {} attending, max {}",
        event.attendees.len(),
        event.max_attendees
    );
    if !event.description.is_empty() {
        println!("  {}", event.description);
    }
    if !event.cover_url.is_empty() {
        println!("  Cover:    {}", event.cover_url);
    }
    if let Some(api_url) = &event.api_url {
        println!("  Source:   {api_url}");
    }
}
