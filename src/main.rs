use anyhow::Context;
use clap::{Parser, Subcommand};
use geohogar_scout::{
    ApiConfig, ContactRequest, FilterCriteria, HttpPropertyApi, Property, SearchOrchestrator,
    SearchOutcome,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geohogar-scout")]
#[command(about = "Search the Geohogar property listings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the zones, property types and price range in the catalog
    Catalog,

    /// Run a filtered search, falling back to similar listings
    Search {
        #[arg(long)]
        zone: Option<String>,

        #[arg(long = "type")]
        property_type: Option<String>,

        #[arg(long)]
        min_price: Option<i64>,

        #[arg(long)]
        max_price: Option<i64>,

        #[arg(long)]
        rent: bool,

        #[arg(long)]
        sale: bool,

        /// true or false; omit to not filter on it
        #[arg(long, action = clap::ArgAction::Set)]
        garage: Option<bool>,

        #[arg(long, action = clap::ArgAction::Set)]
        balcony: Option<bool>,

        #[arg(long, action = clap::ArgAction::Set)]
        patio: Option<bool>,

        #[arg(long, action = clap::ArgAction::Set)]
        pets: Option<bool>,

        /// Listing visibility; omit to include both
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,

        #[arg(long)]
        room_type: Option<i64>,

        #[arg(long)]
        status: Option<i64>,

        /// Where to save the outcome as JSON
        #[arg(long, default_value = "search_outcome.json")]
        output: String,
    },

    /// Show a single property
    Detail { id: i64 },

    /// Send a contact inquiry about a property
    Contact {
        property_id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        visit: bool,

        #[arg(long = "info")]
        wants_info: bool,
    },
}

fn print_property(index: usize, property: &Property) {
    println!("{}. {} ({})", index + 1, property.address, property.price);
    println!(
        "   {} · {} · {} rooms",
        property.property_type, property.operation, property.rooms
    );
    println!("   Zone: {}", property.location.zone);
    println!("   ID: {}", property.id);
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let config = ApiConfig::from_env().context("Invalid configuration")?;
    let api = HttpPropertyApi::with_config(&config).context("Failed to create HTTP client")?;
    info!("Using backend at {}", api.base_url());
    let search = SearchOrchestrator::new(api, config);

    match cli.command {
        Commands::Catalog => {
            let snapshot = search
                .refresh_catalog()
                .await
                .context("Failed to fetch the property catalog")?;
            info!("Loaded {} properties", snapshot.properties.len());

            let range = snapshot.price_range;
            if range.is_fallback {
                warn!("No prices available, showing the default range");
            }
            println!("Price: {} - {} (step {})", range.min, range.max, range.step);
            println!("Zones: {}", search.zone_names().await.join(", "));
            println!("Types: {}", search.property_type_names().await.join(", "));
        }
        Commands::Search {
            zone,
            property_type,
            min_price,
            max_price,
            rent,
            sale,
            garage,
            balcony,
            patio,
            pets,
            active,
            room_type,
            status,
            output,
        } => {
            let criteria = FilterCriteria {
                neighborhood: zone,
                property_type,
                price_min: min_price,
                price_max: max_price,
                is_rent: rent,
                is_sale: sale,
                garage: garage.into(),
                balcony: balcony.into(),
                patio: patio.into(),
                accepts_pets: pets.into(),
                active: active.into(),
                room_type_id: room_type,
                status_id: status,
            };

            let outcome = search.search(&criteria).await;
            match &outcome {
                SearchOutcome::Success { results } => {
                    println!("\n✅ Found {} properties\n", results.len());
                    for (i, property) in results.iter().enumerate() {
                        print_property(i, property);
                    }
                }
                SearchOutcome::NoResults {
                    message,
                    suggestion,
                    alternatives,
                } => {
                    println!("\n{message}. {suggestion}\n");
                    for (i, property) in alternatives.iter().enumerate() {
                        print_property(i, property);
                    }
                }
                SearchOutcome::Error { message } => {
                    println!("\n❌ {message}");
                }
            }

            let json = serde_json::to_string_pretty(&outcome)?;
            tokio::fs::write(&output, json)
                .await
                .with_context(|| format!("Failed to write {output}"))?;
            info!("💾 Saved outcome to {}", output);
        }
        Commands::Detail { id } => {
            let property = search
                .property_detail(id)
                .await
                .with_context(|| format!("Failed to load property {id}"))?;
            println!("{}", serde_json::to_string_pretty(&property)?);
        }
        Commands::Contact {
            property_id,
            name,
            email,
            message,
            phone,
            visit,
            wants_info,
        } => {
            let mut request = ContactRequest::new(name, email, property_id)
                .wants_visit(visit)
                .wants_info(wants_info);
            if let Some(message) = message {
                request = request.message(message);
            }
            if let Some(phone) = phone {
                request = request.phone(phone);
            }

            search
                .submit_contact(&request)
                .await
                .context("Failed to send contact request")?;
            println!("✅ Contact request sent");
        }
    }

    Ok(())
}
