use clap::Parser;
use sitekit::cli::{Cli, Command, ServeArgs};
use sitekit::config::Config;
use sitekit::server::{self, Server};
use sitekit::tools::{cutout, patch, playlist};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => run_serve(&args, cli.verbose),
        Command::Playlist(args) => {
            init_tracing("info", cli.verbose);
            let count = playlist::generate(&args.dir)?;
            println!(
                "Generated {} with {count} songs",
                args.dir.join(playlist::PLAYLIST_FILE).display()
            );
            Ok(())
        }
        Command::Patch(args) => {
            init_tracing("info", cli.verbose);
            if patch::repair_file(&args.file)? {
                println!("Repaired {}", args.file.display());
            } else {
                println!("{} already clean, nothing to do", args.file.display());
            }
            Ok(())
        }
        Command::Cutout(args) => {
            init_tracing("info", cli.verbose);
            let cleared = cutout::run(&args.input, &args.output, args.threshold)
                .map_err(report_cutout_phase)?;
            println!(
                "Wrote {} ({cleared} background pixels cleared)",
                args.output.display()
            );
            Ok(())
        }
    }
}

fn run_serve(args: &ServeArgs, verbose: bool) -> anyhow::Result<()> {
    let mut config = Config::load_from(&args.config)?;
    config.apply_overrides(args.host.as_deref(), args.port, args.root.as_deref());
    init_tracing(&config.logging.level, verbose);

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(workers) = config.server.workers {
        runtime.worker_threads(workers);
    }
    let runtime = runtime.build()?;

    runtime.block_on(async {
        let bound = Server::bind(config)?;
        let addr = bound.local_addr()?;
        println!(
            "Serving {} at http://{addr} with cross-origin isolation (COOP/COEP/CORP) active",
            bound.root().display()
        );

        tokio::select! {
            result = bound.run() => result,
            () = server::shutdown_signal() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}

fn init_tracing(level: &str, verbose: bool) {
    let default = if verbose {
        "sitekit=debug,info".to_string()
    } else {
        format!("sitekit={level},warn")
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Say which phase of the cutout failed; the error display already names it,
/// this keeps the distinction when wrapped in anyhow context chains.
fn report_cutout_phase(error: cutout::CutoutError) -> anyhow::Error {
    let phase = match &error {
        cutout::CutoutError::Open(_) => "open",
        cutout::CutoutError::Decode(_) => "decode",
        cutout::CutoutError::Write(_) => "write",
    };
    anyhow::Error::new(error).context(format!("cutout failed during {phase}"))
}
