use clap::Parser;
use tlc_drv::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = tlc_drv::run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
