use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use molstudio::options::Options;
use molstudio::pubchem::{MoleculeLookup, PubChemService};
use molstudio::Viewer;

#[derive(Parser)]
#[command(name = "molstudio")]
#[command(about = "Look up molecules on PubChem and view them in 3D", long_about = None)]
struct Cli {
    /// Options TOML file
    #[arg(short, long, global = true)]
    options: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a viewer window; Tab cycles through the queries
    View {
        /// Molecule names, e.g. caffeine
        queries: Vec<String>,
    },
    /// Serve the /molecule HTTP endpoint
    Serve {
        /// Listen address (overrides the options file)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Look up one molecule and print it as JSON
    Lookup {
        /// Molecule name
        query: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();
    let cli = Cli::parse();

    let options = Options::load_or_default(cli.options.as_deref())
        .context("failed to load options")?;

    match cli.command {
        Command::View { queries } => {
            Viewer::builder()
                .with_queries(queries)
                .with_options(options)
                .build()
                .run()?;
        }
        Command::Serve { bind } => {
            let addr = match bind {
                Some(addr) => addr,
                None => options.service.bind.parse().with_context(|| {
                    format!("invalid bind address '{}'", options.service.bind)
                })?,
            };
            let lookup: Arc<dyn MoleculeLookup> =
                Arc::new(PubChemService::from_options(&options.service));
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start tokio runtime")?;
            runtime.block_on(molstudio::server::serve(addr, lookup))?;
        }
        Command::Lookup { query } => {
            let service = PubChemService::from_options(&options.service);
            let molecule = service.lookup(&query)?;
            let json = serde_json::to_string_pretty(&molecule)?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
