use clap::{Parser, Subcommand};

/// Maintenance desk - file, track and export maintenance tickets
#[derive(Parser, Debug)]
#[command(name = "maintenance-desk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project directory (defaults to the nearest directory holding .maintenance-desk)
    #[arg(short, long, global = true, env = "MDESK_PROJECT")]
    pub project: Option<String>,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up a desk in the current (or --project) directory
    Init {
        /// Rewrite configuration and reference files of an existing desk
        #[arg(short, long)]
        force: bool,
    },

    /// File a new ticket
    New {
        /// Category (see `categories`)
        #[arg(short, long)]
        category: Option<String>,

        /// Subcategory within the category
        #[arg(short, long)]
        subcategory: Option<String>,

        /// Unit code (see `units`)
        #[arg(short, long)]
        unit: Option<String>,

        /// What needs fixing
        #[arg(short, long)]
        description: Option<String>,

        /// Name of the person reporting
        #[arg(long)]
        contact_name: Option<String>,

        /// Phone number of the person reporting
        #[arg(long)]
        contact_phone: Option<String>,

        /// Priority (defaults to the category's default priority)
        #[arg(long)]
        priority: Option<String>,

        /// Extra field as key=value (repeatable)
        #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,

        /// Prompt for each field
        #[arg(short, long)]
        interactive: bool,
    },

    /// List tickets, newest first
    List {
        /// Only tickets with this status (open, closed)
        #[arg(long)]
        status: Option<String>,

        /// Show at most this many tickets
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show every field of one ticket
    Show {
        /// Ticket ID (R-XXXXXX)
        ticket: String,
    },

    /// Close a ticket
    Close {
        /// Ticket ID (R-XXXXXX)
        ticket: String,
    },

    /// Delete all tickets stored in this desk
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export all tickets to a file
    Export {
        /// Output path ("-" for stdout); defaults to the configured export file in the project root
        #[arg(short, long)]
        output: Option<String>,

        /// Export format (csv, json, yaml)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// Show category choices
    Categories {
        /// Only list the subcategories of this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show unit choices
    Units,

    /// View or change desk configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set a configuration value in the project config file
    Set {
        /// Configuration key
        key: String,

        /// New value
        value: String,
    },
}
