use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "carrier-config")]
#[command(about = "Configure the parcel carrier integration: credentials, environment and offered services")]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the stored settings and the services the carrier currently offers
    Show,
    /// Validate and save new settings, then show the result
    Save {
        #[arg(long, default_value = "")]
        customer_number: String,

        #[arg(long, default_value = "")]
        contract_id: String,

        #[arg(long)]
        api_key: Option<String>,

        #[arg(long, help = "Use the carrier's sandbox endpoint")]
        sandbox: bool,

        #[arg(long = "service", value_delimiter = ',', help = "Service code to offer; repeatable")]
        services: Vec<String>,
    },
}
