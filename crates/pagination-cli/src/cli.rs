use clap::{Args, Parser, Subcommand, ValueEnum};
use sqd_pagination::Order;


#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OrderArg {
    Asc,
    Desc
}


impl From<OrderArg> for Order {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Asc => Order::Ascending,
            OrderArg::Desc => Order::Descending
        }
    }
}


#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database directory
    #[arg(long = "db", value_name = "DIR", default_value = "pages.db")]
    pub database_dir: String,

    /// Block cache size in megabytes
    #[arg(long, value_name = "MB", default_value_t = 256)]
    pub cache_size: usize,

    /// Size of a data block in kilobytes
    #[arg(long, value_name = "KB", default_value_t = 64)]
    pub block_size: usize,

    /// Whether the logs should be structured in JSON format
    #[arg(long)]
    pub json_log: bool,

    #[command(subcommand)]
    pub command: Command
}


#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a record into a bucket
    Put {
        #[arg(short, long)]
        bucket: String,

        key: String,

        value: String
    },
    /// Print a single page of records as JSON lines
    List(ListArgs)
}


#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(short, long)]
    pub bucket: String,

    /// Max number of records on the page
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Record order
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    /// Key to start the first page from
    #[arg(long, value_name = "KEY", conflicts_with = "page_token")]
    pub from: Option<String>,

    /// Include the `--from` key itself into the page
    #[arg(long, requires = "from")]
    pub inclusive: bool,

    /// Token of the previous page to continue from
    #[arg(long, value_name = "TOKEN")]
    pub page_token: Option<String>,

    /// Print keys and values hex-encoded. `--from` is read as hex as well.
    #[arg(long)]
    pub hex: bool
}
