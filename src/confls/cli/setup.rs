use clap::{Args, Parser, Subcommand};
use confls::filter::FilterExpr;

#[derive(Parser, Debug)]
#[command(name = "confls", bin_name = "confls", version)]
#[command(about = "List, filter and format configs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List configs
    #[command(visible_alias = "list")]
    Ls(ListArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only display IDs
    #[arg(short, long)]
    pub quiet: bool,

    /// Format output: 'table', 'table TEMPLATE', 'json', or a template such as '{{ name }}'
    #[arg(long)]
    pub format: Option<String>,

    /// Filter output based on conditions provided (key=value, repeatable)
    #[arg(short, long = "filter", value_name = "FILTER")]
    pub filters: Vec<FilterExpr>,
}
