use clap::{Args, Parser, Subcommand};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command line client for the order desk
#[derive(Parser, Debug)]
#[command(name = "order-desk")]
#[command(about = "client cli used to manage orders kept by the server", version, long_about = None
)]
struct Cli {
    #[arg(long, default_value = HOST, help = "Base url of the server")]
    host: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// list every order
    List,
    /// create an order
    Add(AddArgs),
    /// change fields of an existing order
    #[command(arg_required_else_help = true)]
    Update(UpdateArgs),
    /// remove an order
    #[command(arg_required_else_help = true)]
    Remove {
        #[arg(help = "Id of the order to remove.", value_name = "ORDER_ID")]
        id: i64,
    },
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    udid: String,
    #[arg(long)]
    status: String,
    #[arg(long, help = "Order date, today when omitted.")]
    date: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    #[arg(help = "Id of the order to update.", value_name = "ORDER_ID")]
    id: i64,
    #[arg(long)]
    udid: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    date: Option<String>,
}

const HOST: &str = "http://localhost:5000";

/// Stored records are not type checked by the server, so every field is read as raw json
#[derive(Debug, Deserialize)]
pub(crate) struct Order {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub udid: Value,
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub date: Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponse {
    pub message: String,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();
    let base = args.host.trim_end_matches('/');
    let client = Client::new();

    match args.command {
        Commands::List => {
            let res = client.get(format!("{}/orders", base)).send().await?;
            match res.status() {
                StatusCode::OK => {
                    let orders = res.json::<Vec<Order>>().await?;
                    if orders.is_empty() {
                        println!("no orders yet");
                    }
                    for order in orders {
                        print_order(&order);
                    }
                }
                unexpected => report_failure(unexpected, res).await,
            }
        }
        Commands::Add(AddArgs { udid, status, date }) => {
            let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            println!("adding order for udid={}", udid);
            let res = client
                .post(format!("{}/orders", base))
                .json(&OrderRequest {
                    udid: Some(udid),
                    status: Some(status),
                    date: Some(date),
                })
                .send()
                .await?;
            match res.status() {
                StatusCode::CREATED => {
                    let order = res.json::<Order>().await?;
                    println!("order created with id = {}", order.id);
                    print_order(&order);
                }
                unexpected => report_failure(unexpected, res).await,
            }
        }
        Commands::Update(UpdateArgs {
            id,
            udid,
            status,
            date,
        }) => {
            println!("updating order={}", id);
            let res = client
                .put(format!("{}/orders/{}", base, id))
                .json(&OrderRequest { udid, status, date })
                .send()
                .await?;
            match res.status() {
                StatusCode::OK => {
                    let order = res.json::<Order>().await?;
                    print_order(&order);
                }
                unexpected => report_failure(unexpected, res).await,
            }
        }
        Commands::Remove { id } => {
            println!("removing order={}", id);
            let res = client
                .delete(format!("{}/orders/{}", base, id))
                .send()
                .await?;
            match res.status() {
                StatusCode::OK => {
                    let res = res.json::<MessageResponse>().await?;
                    println!("{}", res.message);
                }
                unexpected => report_failure(unexpected, res).await,
            }
        }
    };
    Ok(())
}

fn print_order(order: &Order) {
    println!(
        "#{:<6} udid={:<20} status={:<12} date={}",
        text(&order.id),
        text(&order.udid),
        text(&order.status),
        text(&order.date)
    );
}

/// strings without quotes, anything else as json
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn report_failure(status: StatusCode, res: Response) {
    let reason = res
        .json::<ErrorResponse>()
        .await
        .map(|e| e.error)
        .unwrap_or_default();
    match status {
        StatusCode::BAD_REQUEST => println!("Bad request: {}", reason),
        StatusCode::NOT_FOUND => println!("Order not found"),
        StatusCode::SERVICE_UNAVAILABLE => println!("Server is busy, please retry later"),
        unexpected => println!("got unexpected status code, {} {}", unexpected, reason),
    }
}
