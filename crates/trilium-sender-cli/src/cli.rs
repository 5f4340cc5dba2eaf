use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "trilium-sender")]
#[command(about = "Send notes, shared text and images to a Trilium server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub settings_path: Option<PathBuf>,

    /// Which server certificates to accept
    #[arg(long, global = true, value_enum, default_value_t = TrustArg::Platform)]
    pub trust: TrustArg,

    /// PEM root certificate used with `--trust custom`
    #[arg(long, global = true, value_name = "PEM")]
    pub cert: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to a Trilium server and store the API token
    Login {
        /// Server address, e.g. https://notes.example.com
        #[arg(long, value_name = "URL")]
        address: String,
        /// Trilium username
        #[arg(long, short)]
        username: String,
        /// Trilium password
        #[arg(long, short)]
        password: String,
        /// Label attached to every note sent from this client
        #[arg(long, value_name = "NAME")]
        label: Option<String>,
    },
    /// Send a text note
    #[command(alias = "send")]
    Note {
        /// Note title (defaults to "Note from Android")
        #[arg(short, long, default_value = "")]
        title: String,
        /// Note content (read from stdin or $EDITOR when omitted)
        content: Vec<String>,
    },
    /// Send text shared from another application
    Share {
        /// Subject suggested by the sharing application
        #[arg(long)]
        subject: Option<String>,
        /// Name of the sharing application
        #[arg(long = "from", value_name = "APP")]
        referrer: Option<String>,
        /// Shared text (read from stdin or $EDITOR when omitted)
        text: Vec<String>,
    },
    /// Upload an image
    Image {
        /// Image file to upload
        path: PathBuf,
        /// MIME type (guessed from the file extension when omitted)
        #[arg(long, value_name = "TYPE")]
        mime_type: Option<String>,
    },
    /// Show connection setup status
    Status,
    /// Forget the stored server address, token and label
    Reset,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum TrustArg {
    /// Bundled web PKI roots
    Platform,
    /// Only the certificate given with --cert
    Custom,
    /// Accept any certificate (self-signed test servers)
    All,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
