use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use doctor_directory::directory::query::encode_query;
use doctor_directory::directory::{ConsultationFilter, FilterState, FilterUpdate, SortKey, SortOrder};
use doctor_directory::http::response::{DoctorsResponse, SpecialitiesResponse, SuggestionsResponse};
use doctor_directory::presentation::DoctorCard;

#[derive(Parser)]
#[command(name = "directory-cli")]
#[command(about = "Query a running doctor directory", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List doctors matching the given filters
    List {
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,
        /// Speciality to include (repeatable)
        #[arg(long = "speciality")]
        specialities: Vec<String>,
        #[arg(long, value_enum)]
        sort: Option<Sort>,
        /// Override the order that goes with --sort
        #[arg(long, value_enum, requires = "sort")]
        order: Option<Order>,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Show name suggestions for a search term
    Suggest { term: String },
    /// List filterable specialities
    Specialities,
    /// Check service and fetch status
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Video,
    Clinic,
}

#[derive(Clone, Copy, ValueEnum)]
enum Sort {
    Fees,
    Experience,
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    Asc,
    Desc,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::List {
            search,
            mode,
            specialities,
            sort,
            order,
            json,
        } => {
            let filters = filters_from_args(search, mode, specialities, sort, order);
            let query = encode_query(&filters);
            let res = client
                .get(format!("{}/doctors?{}", cli.url, query))
                .send()
                .await?;
            if json {
                print_json(res).await?;
                return Ok(());
            }
            let Some(listing) = parse::<DoctorsResponse>(res).await? else {
                return Ok(());
            };
            if listing.status == "loading" {
                println!("Directory is still loading");
            }
            match &listing.sorted_by {
                Some(label) => println!("{} (sorted by {})", listing.heading, label),
                None => println!("{}", listing.heading),
            }
            println!("Share: ?{}\n", listing.query);
            for doctor in &listing.doctors {
                println!("{}\n", DoctorCard(doctor));
            }
        }
        Commands::Suggest { term } => {
            let query = encode_query(&FilterState::default().merged(&FilterUpdate::search(term)));
            let res = client
                .get(format!("{}/suggestions?{}", cli.url, query))
                .send()
                .await?;
            if let Some(found) = parse::<SuggestionsResponse>(res).await? {
                for name in found.suggestions {
                    println!("{}", name);
                }
            }
        }
        Commands::Specialities => {
            let res = client.get(format!("{}/specialities", cli.url)).send().await?;
            if let Some(catalog) = parse::<SpecialitiesResponse>(res).await? {
                for speciality in &catalog.available {
                    let marker = if catalog.present.contains(speciality) { "*" } else { " " };
                    println!("{} {}", marker, speciality);
                }
            }
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_json(res).await?;
        }
    }

    Ok(())
}

fn filters_from_args(
    search: Option<String>,
    mode: Option<Mode>,
    specialities: Vec<String>,
    sort: Option<Sort>,
    order: Option<Order>,
) -> FilterState {
    let mut filters = FilterState::default();
    if let Some(term) = search {
        filters = filters.merged(&FilterUpdate::search(term));
    }
    if let Some(mode) = mode {
        let consultation = match mode {
            Mode::Video => ConsultationFilter::VideoConsult,
            Mode::Clinic => ConsultationFilter::InClinic,
        };
        filters = filters.merged(&FilterUpdate::consultation(consultation));
    }
    for speciality in &specialities {
        if !filters.specialities.contains(speciality) {
            filters = filters.merged(&FilterUpdate::toggle_speciality(&filters, speciality));
        }
    }
    if let Some(sort) = sort {
        let key = match sort {
            Sort::Fees => SortKey::Fees,
            Sort::Experience => SortKey::Experience,
        };
        filters = filters.merged(&FilterUpdate::sort(key));
    }
    if let Some(order) = order {
        let order = match order {
            Order::Asc => SortOrder::Ascending,
            Order::Desc => SortOrder::Descending,
        };
        filters = filters.merged(&FilterUpdate {
            sort_order: Some(order),
            ..FilterUpdate::default()
        });
    }
    filters
}

async fn parse<T: serde::de::DeserializeOwned>(
    res: reqwest::Response,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: directory returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(None);
    }
    Ok(Some(res.json().await?))
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(json) = parse::<Value>(res).await? {
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}
