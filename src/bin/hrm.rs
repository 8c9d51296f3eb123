use clap::Parser;
use hrm_api::cli::Cli;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = hrm_api::cli::run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
