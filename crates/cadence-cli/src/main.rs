use cadence_cli::args::{Args, Command};
use cadence_cli::driver;
use clap::Parser;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "cadence_cli=info,warn".to_string()))
        .init();

    let args = Args::parse();

    let ok = match args.command {
        Command::Check { path } => match driver::load_program(&path) {
            Ok(program) => driver::check(&program),
            Err(err) => {
                eprintln!("{err:#}");
                false
            }
        },
        Command::Run { path } => match driver::load_program(&path) {
            Ok(program) => driver::run(&program),
            Err(err) => {
                eprintln!("{err:#}");
                false
            }
        },
    };

    if !ok {
        std::process::exit(1);
    }
}
