use crate::export::{ExportFormat, ExportKind};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rCheckin
/// Local-first event check-in and distribution tracker backed by SQLite
#[derive(Parser)]
#[command(
    name = "rcheckin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Event check-in tracker: import attendees, scan check-ins, hand out lunch and kits, export reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Start with the sync tracker offline: changes are counted as pending
    #[arg(global = true, long = "offline")]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Import attendees from a CSV file
    Import {
        /// CSV file with a header row
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Bind a CSV column to a field, e.g. --map email="E-mail Address".
        /// Fields: name, email, phone, company, uniqueId, qrCodeData.
        /// An empty header unbinds the field.
        #[arg(long = "map", value_name = "FIELD=HEADER")]
        map: Vec<String>,

        /// Show the resolved mapping and validate, without importing
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Add a single attendee
    Add(AttendeeArgs),

    /// Update the contact details of an attendee
    Edit {
        /// Unique id, QR payload or record id
        token: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        company: Option<String>,
    },

    /// List attendees
    List {
        /// Case-insensitive search over name, email, phone, unique id, company
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Show one attendee in detail
    Show {
        /// Unique id, QR payload or record id
        token: String,
    },

    /// Check an attendee in by unique id or QR payload
    Checkin {
        token: String,
    },

    /// Hand out lunch to an attendee
    Lunch(DistributionArgs),

    /// Hand out the welcome kit to an attendee
    Kit(DistributionArgs),

    /// Show or change the event settings
    Settings(SettingsArgs),

    /// Show dashboard statistics
    Stats {
        #[arg(long = "report", help = "Include rates, hourly activity and top companies")]
        report: bool,
    },

    /// Export attendees or the attendance report
    Export {
        #[arg(long, value_enum, default_value = "report")]
        kind: ExportKind,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file (absolute path). Defaults to <Event_Name>_<kind>_<date>.<ext>
        /// in the configured export directory.
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Archive the current event and start over with an empty attendee list
    EndEvent {
        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Browse archived events
    Archive {
        #[arg(long = "list", help = "List archived events")]
        list: bool,

        #[arg(long = "show", value_name = "ID", help = "Show an archived event")]
        show: Option<String>,

        #[arg(
            long = "export",
            value_name = "ID",
            help = "Write the final report of an archived event"
        )]
        export: Option<String>,

        /// Output file for --export (absolute path)
        #[arg(long, value_name = "FILE", requires = "export")]
        file: Option<String>,

        #[arg(long, short = 'f', requires = "export")]
        force: bool,
    },

    /// Show the event and the sync status of this invocation
    ///
    /// The sync tracker is not kept between commands: every run starts
    /// online with nothing pending, or offline with `--offline`.
    Status,
}

#[derive(Args)]
pub struct AttendeeArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    /// Use this unique id instead of generating one
    #[arg(long = "unique-id")]
    pub unique_id: Option<String>,
}

#[derive(Args)]
pub struct DistributionArgs {
    /// Unique id or QR payload
    pub token: String,

    /// Allow handing out to attendees who have not checked in
    #[arg(long = "allow-unregistered")]
    pub allow_unregistered: bool,
}

#[derive(Args, Default)]
pub struct SettingsArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Track attendance for every day from start to end
    #[arg(long = "multi-day", conflicts_with = "single_day")]
    pub multi_day: bool,

    /// Track attendance for the start day only
    #[arg(long = "single-day")]
    pub single_day: bool,

    #[arg(long)]
    pub venue: Option<String>,

    #[arg(long = "organizer-name")]
    pub organizer_name: Option<String>,

    #[arg(long = "organizer-email")]
    pub organizer_email: Option<String>,

    #[arg(long = "organizer-phone")]
    pub organizer_phone: Option<String>,
}
