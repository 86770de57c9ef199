use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use toxlens_demo::cli::{Cli, Commands};
use toxlens_demo::server::run_server;
use toxlens_demo::state::AppState;
use toxlens_explain::ArtifactBundle;
use toxlens_resolver::FallbackResolver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            address,
            artifacts,
            verbose,
        } => {
            init_logging(verbose);

            // Artifacts load before the socket binds; a missing or corrupt
            // model must never serve.
            let engine = ArtifactBundle::load(&artifacts)
                .with_context(|| format!("cannot start without prediction artifacts ({artifacts})"))?;
            let resolver = FallbackResolver::with_default_sources()
                .context("failed to build the name-resolution HTTP client")?;

            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;

            println!();
            println!("  ToxLens :: drug toxicity prediction with n-gram explanations");
            println!();
            println!("  Label:      {}", engine.label_note());
            println!(
                "  Model:      {} over {} n-gram features",
                engine.model_type(),
                engine.vocabulary_size()
            );
            println!("  Threshold:  {}", engine.default_threshold());
            println!();
            println!("  Open http://{} in your browser", addr);
            println!();

            let state = AppState::new(Arc::new(engine), Arc::new(resolver));
            run_server(state, addr).await?;
        }

        Commands::Explain {
            artifacts,
            top,
            verbose,
        } => {
            init_logging(verbose);

            let engine = ArtifactBundle::load(&artifacts)
                .with_context(|| format!("cannot explain without prediction artifacts ({artifacts})"))?;
            let ranking = engine
                .global_ranking(top)
                .context("this model cannot be explained")?;

            println!();
            println!("Patterns pushing toward {}:", engine.label_note());
            for entry in &ranking.toward_toxic {
                println!("  {:>12.6}  {}", entry.weight, entry.ngram);
            }
            println!();
            println!("Patterns pushing away from {}:", engine.label_note());
            for entry in &ranking.toward_safe {
                println!("  {:>12.6}  {}", entry.weight, entry.ngram);
            }
            println!();
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "toxlens_demo=debug,toxlens_explain=debug,toxlens_resolver=debug,tower_http=debug"
    } else {
        "toxlens_demo=info,toxlens_explain=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
