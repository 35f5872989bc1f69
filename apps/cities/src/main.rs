use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use client_core::{
    config::normalize_base_url,
    load_settings,
    position::position_from_url,
    views::{countries, ListView},
    CitiesHandle, StoreState,
};
use shared::domain::{City, CityId, NewCity, Position};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "cities", about = "Track the cities you have visited")]
struct Cli {
    /// Overrides the configured city service URL.
    #[arg(long)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists visited cities.
    List,
    /// Shows one city.
    Show { id: CityId },
    /// Records a visited city.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        country: String,
        #[arg(long, default_value = "")]
        emoji: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,
        /// Map URL carrying `lat`/`lng` query parameters.
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        map_url: Option<Url>,
        /// Visit date (RFC 3339); defaults to now.
        #[arg(long)]
        date: Option<DateTime<Utc>>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Deletes a city.
    Delete { id: CityId },
    /// Lists visited countries.
    Countries,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings()?;
    if let Some(base_url) = &cli.base_url {
        settings.base_url = normalize_base_url(base_url)?;
    }
    info!(base_url = %settings.base_url, "cities: using city service");

    let store = client_core::connect(&settings).await;
    ensure_no_error(&store.state())?;
    run(&store, cli.command).await
}

async fn run(store: &dyn CitiesHandle, command: Command) -> Result<()> {
    match command {
        Command::List => print_cities(&store.snapshot()),
        Command::Show { id } => {
            store.get_city(id).await;
            let state = store.snapshot();
            ensure_no_error(&state)?;
            let city = state
                .current_city
                .with_context(|| format!("city {id} was not loaded"))?;
            print_city_details(&city);
        }
        Command::Add {
            name,
            country,
            emoji,
            lat,
            lng,
            map_url,
            date,
            notes,
        } => {
            let position = resolve_position(lat, lng, map_url.as_ref())?;
            let date = date.unwrap_or_else(Utc::now);
            let new_city = NewCity::at(name, country, emoji, position, date).with_notes(notes);
            store.add_city(new_city).await;
            let state = store.snapshot();
            ensure_no_error(&state)?;
            if let Some(city) = &state.current_city {
                println!("created city_id={} {}", city.id, city.name);
            }
        }
        Command::Delete { id } => {
            store.delete_city(id).await;
            ensure_no_error(&store.snapshot())?;
            println!("deleted city_id={id}");
        }
        Command::Countries => {
            let state = store.snapshot();
            match ListView::of(&state) {
                ListView::Ready(cities) => {
                    for country in countries(cities) {
                        println!("{} {}", country.emoji, country.country);
                    }
                }
                ListView::Empty { message } => println!("{message}"),
                ListView::Loading => println!("still loading"),
            }
        }
    }

    Ok(())
}

fn ensure_no_error(state: &StoreState) -> Result<()> {
    if state.has_error() {
        bail!("{}", state.error);
    }
    Ok(())
}

fn resolve_position(
    lat: Option<f64>,
    lng: Option<f64>,
    map_url: Option<&Url>,
) -> Result<Position> {
    if let Some(url) = map_url {
        return position_from_url(url)
            .position()
            .with_context(|| format!("map url '{url}' has no usable lat/lng"));
    }
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Position { lat, lng }),
        _ => bail!("a position is required: pass --lat and --lng, or --map-url"),
    }
}

fn print_cities(state: &StoreState) {
    match ListView::of(state) {
        ListView::Ready(cities) => {
            for city in cities {
                println!(
                    "{:>6}  {} {}, {}  ({})",
                    city.id,
                    city.emoji,
                    city.name,
                    city.country,
                    city.date.format("%B %-d, %Y")
                );
            }
        }
        ListView::Empty { message } => println!("{message}"),
        ListView::Loading => println!("still loading"),
    }
}

fn print_city_details(city: &City) {
    println!("{} {} ({})", city.emoji, city.name, city.country);
    println!("visited   {}", city.date.format("%A, %B %-d, %Y"));
    println!("position  {:.4}, {:.4}", city.latitude, city.longitude);
    if !city.notes.is_empty() {
        println!("notes     {}", city.notes);
    }
}
