use std::process::ExitCode;

fn main() -> ExitCode {
    shopscout_cli::run()
}
