use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use anyhow::{anyhow, bail, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    format, load_api_config, CrudOrchestrator, CrudOutcome, EventForm, EventStore, EventsBackend,
    EventsClient, Notifier, OrgSelector, Prompt,
};
use shared::{
    domain::{EventId, FormField, OrgId},
    protocol::Event,
};

#[derive(Parser, Debug)]
#[command(about = "Manage organization events from the terminal")]
struct Cli {
    /// Backend base URL, e.g. http://localhost:5000/api
    #[arg(long)]
    api_base: Option<String>,
    /// Print raw JSON instead of a table.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Orgs,
    Events,
    Create(EventFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: EventFields,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
struct EventFields {
    #[arg(long)]
    title: Option<String>,
    /// Date and time, e.g. 2025-03-01T18:30
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    venue: Option<String>,
    /// Defaults to the first organization when creating.
    #[arg(long)]
    org_id: Option<i64>,
    #[arg(long)]
    description: Option<String>,
}

impl EventFields {
    fn apply_to(self, form: &mut EventForm) {
        let updates = [
            (FormField::Title, self.title),
            (FormField::Date, self.date),
            (FormField::Venue, self.venue),
            (FormField::OrgId, self.org_id.map(|id| OrgId(id).to_string())),
            (FormField::Description, self.description),
        ];
        for (field, value) in updates {
            if let Some(value) = value {
                form.set_field(field, value);
            }
        }
    }
}

struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn confirm(&self, question: &str) -> bool {
        print!("{question} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, _question: &str) -> bool {
        true
    }
}

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn print_event(event: &Event) {
    println!(
        "#{:<4} {:<32} {:<20} {:<20} {}",
        event.id.0,
        format::truncate(&event.title, 32),
        format::event_date(event),
        format::truncate(event.venue.as_deref().unwrap_or_default(), 20),
        format::hosted_by(event)
    );
}

async fn load_store(client: &EventsClient) -> Result<EventStore> {
    let mut store = EventStore::new();
    store.seed(client.list_events().await?);
    Ok(store)
}

fn report(outcome: CrudOutcome, on_applied: impl FnOnce()) -> ExitCode {
    match outcome {
        CrudOutcome::Applied => {
            on_applied();
            ExitCode::SUCCESS
        }
        CrudOutcome::Cancelled => {
            println!("Cancelled");
            ExitCode::SUCCESS
        }
        CrudOutcome::Failed(_) => ExitCode::FAILURE,
    }
}

fn require_fields(form: &EventForm) -> Result<()> {
    let missing = form.missing_required();
    if missing.is_empty() {
        return Ok(());
    }
    let names: Vec<_> = missing.iter().map(|field| field.name()).collect();
    bail!("missing required fields: {}", names.join(", "))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();
    let config = load_api_config(cli.api_base)?;
    let client = EventsClient::new(config);

    match cli.command {
        Command::Orgs => {
            let orgs = client.list_orgs().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&orgs)?);
            } else {
                for org in &orgs {
                    println!(
                        "#{:<4} {:<28} {}",
                        org.id.0,
                        org.name,
                        org.tagline.as_deref().unwrap_or_default()
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Events => {
            let store = load_store(&client).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(store.events())?);
            } else {
                store.events().iter().for_each(print_event);
                println!("{} upcoming", store.len());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Create(fields) => {
            let mut selector = OrgSelector::new();
            selector.populate(client.list_orgs().await?);
            let mut store = load_store(&client).await?;

            let mut form = EventForm::new();
            form.open_create(selector.selected());
            fields.apply_to(&mut form);
            require_fields(&form)?;

            let orchestrator = CrudOrchestrator::new(client);
            let outcome = orchestrator
                .save(&mut store, &mut form, &StderrNotifier)
                .await;
            Ok(report(outcome, || {
                println!("Created");
                if let Some(head) = store.events().first() {
                    print_event(head);
                }
            }))
        }
        Command::Update { id, fields } => {
            let mut store = load_store(&client).await?;
            let existing = store
                .get(EventId(id))
                .cloned()
                .ok_or_else(|| anyhow!("event {id} not found"))?;

            let mut form = EventForm::new();
            form.open_edit(&existing);
            fields.apply_to(&mut form);
            require_fields(&form)?;

            let orchestrator = CrudOrchestrator::new(client);
            let outcome = orchestrator
                .save(&mut store, &mut form, &StderrNotifier)
                .await;
            Ok(report(outcome, || {
                println!("Updated");
                if let Some(event) = store.get(EventId(id)) {
                    print_event(event);
                }
            }))
        }
        Command::Delete { id, yes } => {
            let mut store = load_store(&client).await?;
            let prompt: &dyn Prompt = if yes { &AssumeYes } else { &StdinPrompt };
            let orchestrator = CrudOrchestrator::new(client);
            let outcome = orchestrator
                .delete(&mut store, EventId(id), prompt, &StderrNotifier)
                .await;
            Ok(report(outcome, || {
                println!("Deleted; {} events remain", store.len());
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_given_flags_override_the_draft() {
        let mut form = EventForm::new();
        form.open_edit(&Event {
            id: EventId(7),
            title: "Meetup".to_string(),
            date: Some("2025-03-01T18:30".to_string()),
            venue: Some("Cafe".to_string()),
            description: None,
            org_id: Some(OrgId(2)),
            org_name: None,
        });

        EventFields {
            venue: Some("Library".to_string()),
            org_id: Some(3),
            ..EventFields::default()
        }
        .apply_to(&mut form);

        assert_eq!(form.draft().title, "Meetup");
        assert_eq!(form.draft().venue, "Library");
        assert_eq!(form.draft().org_id, "3");
        assert!(require_fields(&form).is_ok());
    }

    #[test]
    fn create_without_title_or_date_is_rejected() {
        let mut form = EventForm::new();
        form.open_create(None);
        EventFields {
            org_id: Some(1),
            ..EventFields::default()
        }
        .apply_to(&mut form);

        let err = require_fields(&form).expect_err("missing fields");
        assert_eq!(err.to_string(), "missing required fields: title, date");
    }

    #[test]
    fn parses_delete_with_yes_flag() {
        let cli = Cli::try_parse_from([
            "events_cli",
            "--api-base",
            "http://x/api",
            "delete",
            "4",
            "--yes",
        ])
        .expect("parse");
        assert_eq!(cli.api_base.as_deref(), Some("http://x/api"));
        assert!(matches!(cli.command, Command::Delete { id: 4, yes: true }));
    }
}
