use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sidebar_sync::core::telemetry::logging::init_logging;
use sidebar_sync::services::resources::PackageResourceLoader;
use sidebar_sync::{Activation, ActivationEvent, Session, Settings};
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sidebar-sync")]
#[command(about = "Match the sidebar background to the active color scheme")]
#[command(version)]
struct Cli {
    /// Packages directory holding color schemes (defaults to the host's)
    #[arg(long, global = true)]
    packages: Option<PathBuf>,

    /// Directory generated themes are written to (defaults to <packages>/User)
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Settings file to use instead of the default search
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the sidebar theme for one color scheme
    Apply {
        /// Color scheme resource, e.g. "Packages/Color Scheme - Default/Monokai.tmTheme"
        #[arg(long)]
        scheme: String,
        /// UI theme file name to write, e.g. "Default.sublime-theme"
        #[arg(long)]
        theme: String,
        /// Treat the activation as coming from a widget (nothing is written)
        #[arg(long)]
        widget: bool,
    },
    /// Print the generated theme without writing it
    Preview {
        #[arg(long)]
        scheme: String,
    },
    /// Read activation events as JSON lines from stdin until EOF
    Listen {
        /// Keep generated themes when input ends
        #[arg(long)]
        keep: bool,
    },
    /// Remove every generated theme
    Clean,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let packages = match &cli.packages {
        Some(path) => path.clone(),
        None => default_packages_dir().context("could not determine the packages directory")?,
    };
    let out = cli.out.clone().unwrap_or_else(|| packages.join("User"));
    let settings = match &cli.settings {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load(),
    };

    let mut session = Session::new(PackageResourceLoader::new(&packages), &out);
    session.startup(settings);

    match cli.command {
        Command::Apply {
            scheme,
            theme,
            widget,
        } => {
            let event = ActivationEvent {
                is_widget: widget,
                color_scheme: Some(scheme),
                theme: Some(theme),
            };
            match session.on_theme_activated(&event)? {
                Activation::Applied { path, .. } => println!("{}", path.display()),
                Activation::Skipped(reason) => tracing::info!(?reason, "nothing written"),
            }
        }
        Command::Preview { scheme } => {
            let text = session
                .load_scheme(&scheme)
                .with_context(|| format!("failed to load {scheme}"))?;
            match session.build(&scheme, &text)? {
                Some((_, document)) => println!("{}", document.to_json()?),
                None => tracing::info!(%scheme, "color scheme has no line highlight"),
            }
        }
        Command::Listen { keep } => {
            listen(&mut session)?;
            if !keep {
                session.shutdown()?;
            }
        }
        Command::Clean => {
            let removed = session.shutdown()?;
            println!("removed {removed} file(s) from {}", out.display());
        }
    }

    Ok(())
}

/// Dispatch one event per input line. A bad event or a failed activation is
/// logged and the loop moves on.
fn listen(session: &mut Session) -> Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: ActivationEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Ignoring malformed event: {}", e);
                continue;
            }
        };
        match session.on_theme_activated(&event) {
            Ok(Activation::Applied { path, .. }) => println!("{}", path.display()),
            Ok(Activation::Skipped(reason)) => tracing::debug!(?reason, "activation skipped"),
            Err(e) => tracing::error!("Activation failed: {}", e),
        }
    }
    Ok(())
}

fn default_packages_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sublime-text").join("Packages"))
}
