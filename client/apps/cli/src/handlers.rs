//! Command handlers
//!
//! Run one [`Command`] against the session context and print the outcome.
//! Every failure is returned as an [`AppError`] so the loop can report it
//! and carry on.

use std::path::Path;

use acquisition::{
    CandidateDraft, CardImage, CollectionEntry, CollectionStats, ImageSide, Recognition,
    SessionContext,
};
use gateway::RemoteGateway;
use kernel::error::app_error::{AppError, AppResult};
use platform::secret::ClearTextPassword;

use crate::commands::{Command, HELP};

/// What the loop does after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn dispatch<G>(context: &mut SessionContext<G>, command: Command) -> AppResult<Flow>
where
    G: RemoteGateway,
{
    match command {
        Command::Register { email, password } => {
            let password = password_or_prompt(password).await?;
            let output = context.register(email, password).await?;
            println!("{}", output.message);
        }
        Command::Login { email, password } => {
            let password = password_or_prompt(password).await?;
            let credential = context.login(email, password).await?;
            println!("Signed in as {} (token {})", credential.email(), credential.preview());
        }
        Command::Logout => {
            if context.logout() {
                println!("Signed out");
            } else {
                println!("Not signed in");
            }
        }
        Command::Front { path } => select(context, ImageSide::Front, &path).await?,
        Command::Back { path } => select(context, ImageSide::Back, &path).await?,
        Command::Submit => {
            let recognition = context.submit().await?;
            print_recognition(recognition);
        }
        Command::Candidates => match context.workflow().recognition() {
            Some(recognition) => print_recognition(recognition),
            None => println!("Nothing submitted yet"),
        },
        Command::Choose { n } => {
            let index = n
                .checked_sub(1)
                .ok_or_else(|| AppError::validation("Candidates are numbered from 1"))?;
            let draft = context.workflow_mut().choose_candidate(index)?;
            print_draft(draft);
        }
        Command::Manual => {
            let draft = context.workflow_mut().enter_manually()?;
            print_draft(draft);
        }
        Command::Set { field, value } => {
            let draft = context.workflow_mut().set_field(&field, &value.join(" "))?;
            print_draft(draft);
        }
        Command::Draft => match context.workflow().draft() {
            Some(draft) => print_draft(draft),
            None => println!("No draft"),
        },
        Command::Confirm => {
            let message = context.confirm().await?;
            println!("{}", message);
        }
        Command::Reset => {
            context.workflow_mut().reset()?;
            println!("Ready for a new card");
        }
        Command::Status => print_status(context),
        Command::Collection {
            set,
            rarity,
            finish,
            min,
            max,
        } => {
            let filter = Command::collection_filter(set, rarity, finish, min, max);
            let entries = context.collection(&filter).await?;
            print_collection(&entries);
        }
        Command::Value => {
            let total = context.collection_value().await?;
            println!("Collection value: {:.2}", total);
        }
        Command::Stats => {
            let stats = context.collection_stats().await?;
            print_stats(&stats);
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Text printed for a failed command
pub fn describe_error(err: &AppError) -> String {
    if err.is_retryable() {
        format!("{}\n  The same command can be retried.", err)
    } else if err.requires_login() && err.action().is_none() {
        format!("{}\n  Log in to continue.", err)
    } else {
        err.to_string()
    }
}

async fn password_or_prompt(password: Option<String>) -> AppResult<ClearTextPassword> {
    if let Some(raw) = password {
        return Ok(ClearTextPassword::new(raw));
    }
    // The prompt blocks on the terminal
    tokio::task::spawn_blocking(|| {
        dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map(ClearTextPassword::new)
            .map_err(|e| AppError::validation(format!("Could not read password: {}", e)))
    })
    .await
    .map_err(|e| AppError::validation(format!("Password prompt failed: {}", e)))?
}

async fn select<G>(context: &mut SessionContext<G>, side: ImageSide, path: &Path) -> AppResult<()>
where
    G: RemoteGateway,
{
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let image = CardImage::new(file_name, bytes)?;

    println!(
        "{} image: {} ({}, {} bytes)",
        side,
        image.file_name(),
        image.content_type(),
        image.len()
    );
    context.workflow_mut().select_image(side, image)?;
    Ok(())
}

fn price(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

fn print_recognition(recognition: &Recognition) {
    let summary = &recognition.summary;
    if let Some(name) = &summary.pokemon_name {
        println!(
            "Detected: {} {} [{}]",
            name,
            summary.card_number.as_deref().unwrap_or(""),
            summary.language.as_deref().unwrap_or("?")
        );
    }
    if recognition.is_empty() {
        println!("No candidates found. Use `manual` to enter the card yourself.");
        return;
    }
    for (i, candidate) in recognition.candidates.iter().enumerate() {
        println!(
            "{:>2}. {} - {} #{} {} (avg {}, low {}, trend {})",
            i + 1,
            candidate.name,
            candidate.set_name,
            candidate.number,
            candidate.rarity.as_deref().unwrap_or(""),
            price(candidate.average_sell_price),
            price(candidate.low_price),
            price(candidate.trend_price),
        );
    }
}

fn print_draft(draft: &CandidateDraft) {
    println!("  name:     {}", draft.name);
    println!("  set_name: {}", draft.set_name);
    println!("  number:   {}", draft.number);
    println!("  rarity:   {}", draft.rarity);
    println!("  price:    {:.2}", draft.price);
    println!("  image:    {}", draft.image_url);
    println!("  finish:   {}", draft.finish);
}

fn print_status<G>(context: &SessionContext<G>)
where
    G: RemoteGateway,
{
    match context.credential() {
        Some(credential) => println!(
            "Signed in as {} since {}",
            credential.email(),
            credential.issued_at().format("%H:%M:%S")
        ),
        None => println!("Not signed in"),
    }
    let workflow = context.workflow();
    println!("Workflow: {}", workflow.state());
    if let Some(missing) = workflow.images().missing() {
        println!("Missing image: {}", missing);
    }
    println!("Candidates: {}", workflow.candidates().len());
    if let Some(message) = workflow.last_confirmation() {
        println!("Last confirmation: {}", message);
    }
}

fn print_collection(entries: &[CollectionEntry]) {
    if entries.is_empty() {
        println!("No cards");
        return;
    }
    for entry in entries {
        println!(
            "#{} {} - {} #{} {} {} ({:.2})",
            entry.id, entry.name, entry.set_name, entry.number, entry.rarity, entry.finish, entry.price
        );
    }
}

fn print_stats(stats: &CollectionStats) {
    println!("Cards: {}", stats.count);
    println!(
        "Average {:.2}, min {:.2}, max {:.2}",
        stats.avg_price, stats.min_price, stats.max_price
    );
    if let Some(card) = &stats.most_expensive {
        println!("Most expensive: {} ({}) {:.2}", card.name, card.set_name, card.price);
    }
    for (i, card) in stats.top.iter().enumerate() {
        println!("{:>2}. {} ({}, {}) {:.2}", i + 1, card.name, card.set_name, card.finish, card.price);
    }
}
