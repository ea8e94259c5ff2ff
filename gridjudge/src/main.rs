//! GridJudge harness binary.

fn main() {
    if let Err(err) = gridjudge::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(gridjudge::EXIT_FATAL);
    }
}
