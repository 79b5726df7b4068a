//! Command-line argument parsing for the maskfield demo binary

use clap::Parser;
use std::path::PathBuf;

/// Format text through an input mask
///
/// Mask symbols: 9 = digit, A = letter, * = alphanumeric, ? = any character.
/// Backslash escapes the next symbol into a literal. Everything else is a
/// literal.
#[derive(Parser, Debug)]
#[command(name = "maskfield", version, about = "Format text through an input mask")]
pub struct CliArgs {
    /// Mask pattern to apply
    #[arg(short, long, conflicts_with = "preset")]
    pub mask: Option<String>,

    /// Named preset from the presets file (see --list-presets)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Placeholder character for unfilled slots
    #[arg(long, default_value = " ")]
    pub placeholder: char,

    /// Presets file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    pub presets: Option<PathBuf>,

    /// Print the unmasked value instead of the formatted buffer
    #[arg(short, long)]
    pub unmasked: bool,

    /// Print the buffer with placeholders stripped, literals retained
    #[arg(long, conflicts_with = "unmasked")]
    pub no_placeholders: bool,

    /// List available presets and exit
    #[arg(long)]
    pub list_presets: bool,

    /// Input text to format (reads stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub input: Option<String>,
}
