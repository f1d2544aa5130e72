use clap::Parser;
use par_ligature::cli::{self, Cli};

fn main() {
    // Parse CLI arguments first so --log-level is known before logging init
    let cli = Cli::parse();
    par_ligature::debug::init_log_bridge(cli.log_level);

    log::info!("Starting par-ligature");

    match cli::run(&cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("par-ligature: error: {e:#}");
            std::process::exit(1);
        }
    }
}
