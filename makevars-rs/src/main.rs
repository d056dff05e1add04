use clap::Parser;

use makevars::cli::{self, Cli};

fn main() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = cli::run(&args, &mut out) {
        eprintln!("makevars: {e}");
        std::process::exit(1);
    }
}
