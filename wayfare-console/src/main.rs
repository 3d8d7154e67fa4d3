use std::sync::Arc;

use chrono::NaiveDate;
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use wayfare_assistant::STARTER_PROMPTS;
use wayfare_core::identity::{IdentityProvider, StubIdentity};
use wayfare_core::{Trip, TripPatch, TripRepository, TripStatus};
use wayfare_session::{ConversationController, DateSync, SendOutcome};
use wayfare_store::{event_stream, TripStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare=info,wayfare_store=info,wayfare_session=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = wayfare_store::Config::load().expect("Failed to load config");
    tracing::info!(
        "Starting Wayfare console ({:?} mode)",
        config.engine.validation_mode
    );

    let store = Arc::new(TripStore::from_config(&config));
    let controller = ConversationController::from_config(store.clone(), &config);
    let date_sync = DateSync::new(store.clone());

    // Log change notifications as they stream in.
    let mut events = Box::pin(event_stream(store.subscribe()));
    tokio::spawn(async move {
        while let Some(event) = events.next().await {
            tracing::debug!("Store event: {:?}", event);
        }
    });

    let identity = StubIdentity::default();
    let profile = identity.authenticate("guest@wayfare.local", "guest").await;
    println!("Welcome back, {}! Type /help for commands.", profile.name);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Ok(Some(line)) = lines.next_line().await else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            if !dispatch(command, &store, &date_sync).await {
                break;
            }
        } else {
            send(&controller, &line).await;
        }
    }

    println!("Safe travels!");
}

/// Run one slash command; returns false when the loop should exit.
async fn dispatch(command: &str, store: &Arc<TripStore>, date_sync: &DateSync) -> bool {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match name {
        "new" => {
            let trip = store.create_trip().await;
            println!("Created \"{}\" ({})", trip.title, short_id(trip.id));
            print_starters();
        }
        "trips" => {
            let trips = store.trips().await;
            if trips.is_empty() {
                println!("No trips yet. Try /new.");
            }
            for trip in trips {
                print_trip_line(&trip);
            }
        }
        "open" => match resolve_trip(store, args.first().copied()).await {
            Some(trip) => {
                // Ids come from the collection, so this cannot miss.
                if store.set_current_trip(Some(trip.id)).await.is_ok() {
                    println!("Opened \"{}\"", trip.title);
                    match DateSync::initial_selection(&trip) {
                        Some(window) => println!(
                            "  Dates: {} - {}",
                            render_date(window.start),
                            render_date(window.end)
                        ),
                        None => println!("  Dates: not selected"),
                    }
                    for message in &trip.messages {
                        println!("  [{}] {}", message.role, message.content);
                    }
                }
            }
            None => println!("No trip matches that id."),
        },
        "close" => {
            let _ = store.set_current_trip(None).await;
            println!("Closed the current trip.");
        }
        "current" => match store.current_trip().await {
            Some(trip) => print_trip_line(&trip),
            None => println!("No trip is open."),
        },
        "dates" => {
            let Some(trip) = store.current_trip().await else {
                println!("Open a trip first.");
                return true;
            };
            let selection = if args.first() == Some(&"clear") {
                Some((None, None))
            } else {
                parse_dates(&args)
            };
            match selection {
                Some((start, end)) => {
                    match date_sync.apply_selection(trip.id, start, end).await {
                        Ok(()) => println!(
                            "Dates set: {} - {}",
                            render_date(start),
                            render_date(end)
                        ),
                        Err(err) => println!("Rejected: {}", err),
                    }
                }
                None => println!("Usage: /dates YYYY-MM-DD [YYYY-MM-DD] | /dates clear"),
            }
        }
        "status" => {
            let Some(trip) = store.current_trip().await else {
                println!("Open a trip first.");
                return true;
            };
            match args.first().and_then(|s| s.parse::<TripStatus>().ok()) {
                Some(status) => {
                    match store.update_trip(trip.id, TripPatch::status(status)).await {
                        Ok(()) => println!("Status set to {}", status),
                        Err(err) => println!("Rejected: {}", err),
                    }
                }
                None => println!("Usage: /status planning|confirmed|completed"),
            }
        }
        "delete" => match resolve_trip(store, args.first().copied()).await {
            Some(trip) => match store.delete_trip(trip.id).await {
                Ok(()) => println!("Deleted \"{}\"", trip.title),
                Err(err) => println!("Rejected: {}", err),
            },
            None => println!("No trip matches that id."),
        },
        "help" => print_help(),
        "quit" | "exit" => return false,
        _ => println!("Unknown command: /{}. Try /help.", name),
    }
    true
}

async fn send(controller: &ConversationController, text: &str) {
    match controller.send_to_current(text).await {
        Ok(SendOutcome::Replied(turn)) => {
            println!("\n{}\n", turn.assistant.content);
        }
        Ok(SendOutcome::Ignored) => {
            println!("Nothing sent. Open a trip with /new or /open first.");
        }
        Err(err) => println!("Rejected: {}", err),
    }
}

/// Match a trip by id prefix, or by the only trip when no argument given.
async fn resolve_trip(store: &Arc<TripStore>, arg: Option<&str>) -> Option<Trip> {
    let trips = store.trips().await;
    match arg {
        Some(prefix) => trips
            .into_iter()
            .find(|t| t.id.to_string().starts_with(prefix)),
        None if trips.len() == 1 => trips.into_iter().next(),
        None => None,
    }
}

fn parse_dates(args: &[&str]) -> Option<(Option<NaiveDate>, Option<NaiveDate>)> {
    let start = args.first()?.parse::<NaiveDate>().ok()?;
    let end = match args.get(1) {
        Some(raw) => Some(raw.parse::<NaiveDate>().ok()?),
        None => None,
    };
    Some((Some(start), end))
}

fn print_trip_line(trip: &Trip) {
    let days = trip
        .duration_days()
        .map(|d| format!(", {} days", d))
        .unwrap_or_default();
    let activity = trip
        .last_activity()
        .map(|ts| format!(", last activity {}", ts.format("%Y-%m-%d")))
        .unwrap_or_default();
    println!(
        "{}  \"{}\" [{}{}{}] - {} messages",
        short_id(trip.id),
        trip.title,
        trip.status,
        days,
        activity,
        trip.messages.len()
    );
}

fn print_starters() {
    let prompts: Vec<String> = STARTER_PROMPTS
        .iter()
        .map(|p| format!("\"{}\"", p.to_lowercase()))
        .collect();
    println!("Describe your trip, e.g. {}", prompts.join(", "));
}

fn print_help() {
    println!("Commands:");
    println!("  /new                         create a trip and open it");
    println!("  /trips                       list all trips");
    println!("  /open <id-prefix>            open a trip");
    println!("  /close                       close the current trip");
    println!("  /current                     show the open trip");
    println!("  /dates <start> [<end>]       set trip dates (YYYY-MM-DD)");
    println!("  /dates clear                 clear trip dates");
    println!("  /status <value>              planning | confirmed | completed");
    println!("  /delete <id-prefix>          delete a trip");
    println!("  /quit                        leave");
    println!("Anything else is sent to the travel assistant.");
}

fn render_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "open".to_string())
}

fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}
