//! [`Args`] definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Console for managing apartments and rooms.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Top-level command of the console.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manages apartments.
    #[command(subcommand)]
    Apartments(Resource),

    /// Manages rooms.
    #[command(subcommand)]
    Rooms(Resource),

    /// Shows aggregate statistics over apartments and rooms.
    Dashboard,

    /// Uploads or deletes media files.
    #[command(subcommand)]
    Upload(Upload),
}

/// Operation upon apartments or rooms.
#[derive(Debug, Subcommand)]
pub enum Resource {
    /// Lists entries matching the provided filters.
    List {
        /// Filters in the `FIELD=VALUE` form.
        #[arg(value_parser = parse_pair)]
        filters: Vec<(String, String)>,

        /// Page to show.
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Shows a single entry.
    Show {
        /// ID of the entry.
        id: u64,
    },

    /// Creates a new entry.
    Create {
        /// Field values in the `FIELD=VALUE` form.
        ///
        /// Repeat a field to select several values.
        #[arg(value_parser = parse_pair)]
        fields: Vec<(String, String)>,
    },

    /// Updates an existing entry.
    Update {
        /// ID of the entry.
        id: u64,

        /// Field values to change in the `FIELD=VALUE` form.
        #[arg(value_parser = parse_pair)]
        fields: Vec<(String, String)>,
    },

    /// Deletes an entry.
    Delete {
        /// ID of the entry.
        id: u64,
    },

    /// Browses entries interactively, reading commands from STDIN.
    Browse,
}

/// Operation upon media files.
#[derive(Debug, Subcommand)]
pub enum Upload {
    /// Uploads a single image.
    Image {
        /// Path to the image.
        path: PathBuf,
    },

    /// Uploads several images at once.
    Images {
        /// Paths to the images.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Uploads a single video.
    Video {
        /// Path to the video.
        path: PathBuf,
    },

    /// Deletes an uploaded file.
    Delete {
        /// URL of the file.
        url: String,
    },
}

/// Parses a `FIELD=VALUE` pair.
///
/// # Errors
///
/// If there is no `=` or the field name is empty.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_owned(), value.to_owned()))
        }
        _ => Err(format!("expected `FIELD=VALUE`, got `{s}`")),
    }
}
