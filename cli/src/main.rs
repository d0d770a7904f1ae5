use clap::Parser;
use presentation::cli::{Cli, CliApp};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let app = CliApp::new();
    match app.run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            app.report_error(&err);
            ExitCode::FAILURE
        }
    }
}
