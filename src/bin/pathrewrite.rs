use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = pathrewrite::logging::init_logging() {
        eprintln!("warning: {err:#}");
    }

    match pathrewrite::cli::run_cli() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
