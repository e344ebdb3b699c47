use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rExamTable
/// CLI application to look up a student's exam timetable
#[derive(Parser)]
#[command(
    name = "rexamtable",
    version = env!("CARGO_PKG_VERSION"),
    about = "Look up a student's exam schedule by name or roll number and render it as a timetable",
    long_about = None
)]
pub struct Cli {
    /// Override dataset path (useful for tests or a custom schedule)
    #[arg(global = true, long = "data", value_name = "FILE")]
    pub data: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Student lookup plus the local edits applied before rendering.
#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    /// Student name or roll number (substring, case-insensitive)
    pub query: String,

    /// Match the roll number exactly instead of a substring
    #[arg(long = "roll", help = "Match the roll number exactly")]
    pub exact_roll: bool,

    /// Hide classroom and instructor lines in the timetable
    #[arg(long = "hide-rooms", help = "Hide classroom details in the timetable")]
    pub hide_rooms: bool,

    /// Edit a row before rendering: ID:field=value (repeatable).
    ///
    /// Fields: name, code, date, slot, room, instructor, color
    ///
    /// Examples:
    ///   --edit 2:room=LH-12
    ///   --edit 1:color=#FFCDD2 --edit 1:slot=C
    #[arg(long = "edit", value_name = "ID:FIELD=VALUE")]
    pub edits: Vec<String>,

    /// Remove a row by id before rendering (repeatable)
    #[arg(long = "remove", value_name = "ID")]
    pub removes: Vec<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

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

    /// Find a student and list their exams
    Search {
        query: String,

        #[arg(long = "roll", help = "Match the roll number exactly")]
        exact_roll: bool,
    },

    /// Suggest student names matching a partial query
    Suggest {
        query: String,

        #[arg(
            long = "min-chars",
            value_name = "N",
            help = "Minimum query length before suggestions appear (default from config)"
        )]
        min_chars: Option<usize>,
    },

    /// Show the student card, subject list and timetable
    Show {
        #[command(flatten)]
        select: SelectArgs,
    },

    /// Export the timetable
    Export {
        #[command(flatten)]
        select: SelectArgs,

        #[arg(long, value_enum, default_value = "png")]
        format: ExportFormat,

        /// Output file (default: exam-timetable.<format> in export_dir or the CWD)
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Build a dataset JSON from a CSV sheet of exam registrations
    Convert {
        #[arg(long, value_name = "CSV")]
        input: String,

        #[arg(long, value_name = "JSON", default_value = "exam_schedule.json")]
        output: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Interactive lookup session reading commands from stdin
    Session,
}
