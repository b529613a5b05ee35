//! Entry point for the `wikistandings` command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = wikistandings_cli::run() {
        eprintln!("wikistandings: {err}");
        std::process::exit(1);
    }
}
