//! Main application entry point.

use clap::Parser;

fn main() {
    env_logger::init();

    let cli = zenflow_app::Cli::parse();
    if let Err(e) = pollster::block_on(zenflow_app::run(cli)) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
