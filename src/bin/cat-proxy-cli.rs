use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "cat-proxy-cli")]
#[command(about = "Command line client for the cat proxy", long_about = None)]
struct Cli {
    #[arg(short, long, env = "CAT_PROXY_URL", default_value = "http://localhost:8787")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the route directory
    Routes,
    /// List all breeds
    Breeds,
    /// Fetch random images
    Random {
        #[arg(short, long, default_value_t = 1)]
        limit: u32,
        #[arg(short, long)]
        breed: Option<String>,
    },
    /// Search images by breed and category
    Search {
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
        #[arg(short, long)]
        breed: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Vote on an image (1 = up, 0 = down)
    Vote {
        image_id: String,
        #[arg(default_value_t = 1)]
        value: u8,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Routes => client.get(format!("{}/", base)).send().await?,
        Commands::Breeds => client.get(format!("{}/cats/breeds", base)).send().await?,
        Commands::Random { limit, breed } => {
            let mut query = vec![("limit", limit.to_string())];
            if let Some(breed) = breed {
                query.push(("breed_ids", breed));
            }
            client
                .get(format!("{}/cats/random", base))
                .query(&query)
                .send()
                .await?
        }
        Commands::Search { limit, breed, category } => {
            let mut query = vec![("limit", limit.to_string())];
            if let Some(breed) = breed {
                query.push(("breed_ids", breed));
            }
            if let Some(category) = category {
                query.push(("category_ids", category));
            }
            client
                .get(format!("{}/cats/search", base))
                .query(&query)
                .send()
                .await?
        }
        Commands::Vote { image_id, value } => {
            client
                .post(format!("{}/cats/vote", base))
                .json(&json!({ "image_id": image_id, "value": value }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
