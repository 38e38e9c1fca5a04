use clap::{Args, Parser, Subcommand};
use stripe_checkout::endpoints::sessions::{Locale, Mode, PaymentMethodType};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "stripe-checkout",
    about = "Command-line access to Stripe Checkout Sessions and Prices",
    version
)]
pub struct Cli {
    /// Secret key (alternatively use STRIPE_API_KEY env var)
    #[arg(long, env = "STRIPE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API host, useful for stripe-mock or a recording proxy
    #[arg(long, env = "STRIPE_API_BASE", default_value = stripe_checkout::client::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Pin the API release sent as the Stripe-Version header
    #[arg(long, env = "STRIPE_VERSION")]
    pub stripe_version: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Checkout Sessions
    #[command(subcommand)]
    Sessions(SessionCommand),
    /// Prices
    #[command(subcommand)]
    Prices(PriceCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// Create a session and print it
    Create(CreateSessionArgs),
    /// Retrieve one session
    Retrieve {
        id: String,
        /// Field paths to expand, e.g. line_items
        #[arg(long)]
        expand: Vec<String>,
    },
    /// List sessions, one page at a time
    List(PageArgs),
    /// List the line items of a session
    LineItems {
        session: String,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PriceCommand {
    /// Retrieve one price
    Retrieve {
        id: String,
        #[arg(long)]
        expand: Vec<String>,
    },
    /// List prices, one page at a time
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Only active (true) or inactive (false) prices
        #[arg(long)]
        active: Option<bool>,
        /// Only prices of this product
        #[arg(long)]
        product: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CreateSessionArgs {
    #[arg(long)]
    pub cancel_url: String,

    #[arg(long)]
    pub success_url: String,

    /// Repeat for several, e.g. --payment-method-type card --payment-method-type ideal
    #[arg(long = "payment-method-type", required = true)]
    pub payment_method_types: Vec<PaymentMethodType>,

    #[arg(long)]
    pub mode: Option<Mode>,

    #[arg(long)]
    pub locale: Option<Locale>,

    #[arg(long)]
    pub customer: Option<String>,

    #[arg(long)]
    pub customer_email: Option<String>,

    #[arg(long)]
    pub client_reference_id: Option<String>,

    /// Price ID for a single line item
    #[arg(long, requires = "quantity")]
    pub price: Option<String>,

    #[arg(long)]
    pub quantity: Option<u32>,

    /// key=value, repeatable
    #[arg(long, value_parser = parse_key_value)]
    pub metadata: Vec<(String, String)>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub starting_after: Option<String>,

    #[arg(long)]
    pub ending_before: Option<String>,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}
