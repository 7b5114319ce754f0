use clap::Parser;
use photo_analyze_lib::cli::Args;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match photo_analyze_lib::run(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("photo-analyze: {}", err);
            ExitCode::FAILURE
        }
    }
}
