use std::process::ExitCode;

fn main() -> ExitCode {
    examples_meta::cli::run()
}
