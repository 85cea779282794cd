//! Command-line surface for `content-cli`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use lookbook_core::domain::{DEFAULT_LOCATION, FilenameStyle, PostDefaults};
use lookbook_infra::PostFileConfig;

#[derive(Parser, Debug)]
#[command(
    name = "content-cli",
    version,
    about = "Lookbook post file maintenance",
    long_about = None
)]
pub struct Cli {
    /// Directory holding one JSON document per post
    #[arg(long, env = "CONTENT_DIR", default_value = "content/posts")]
    pub dir: PathBuf,

    /// Date separator used when writing filenames
    #[arg(long, env = "CONTENT_FILENAME_STYLE", value_enum, default_value_t = StyleArg::Hyphen)]
    pub style: StyleArg,

    /// Location applied to posts that do not name one
    #[arg(long, env = "DEFAULT_LOCATION", default_value = DEFAULT_LOCATION)]
    pub default_location: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the built-in sample catalog to the document directory
    Export {
        /// Also delete documents that no exported post maps to
        #[arg(long, default_value_t = false)]
        prune: bool,
    },
    /// Rebuild a catalog from the document directory and report on it
    Inspect {
        /// Number of most recent posts to list
        #[arg(long, default_value_t = 5)]
        recent: usize,
    },
    /// Rename documents to their canonical filenames
    Normalize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StyleArg {
    Hyphen,
    Underscore,
}

impl From<StyleArg> for FilenameStyle {
    fn from(value: StyleArg) -> Self {
        match value {
            StyleArg::Hyphen => FilenameStyle::Hyphen,
            StyleArg::Underscore => FilenameStyle::Underscore,
        }
    }
}

impl Cli {
    pub fn file_config(&self) -> PostFileConfig {
        PostFileConfig::new(&self.dir)
            .with_style(self.style.into())
            .with_defaults(PostDefaults {
                location: self.default_location.clone(),
            })
    }
}
