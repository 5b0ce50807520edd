//! s3-burst - concurrent request generator for S3-compatible storage

use burst_cli::{execute, exit_code, fatal_message, logging, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse_normalized(std::env::args_os());
    logging::init(args.debug, args.json_logs)?;

    let config = args.to_config();
    tracing::info!(
        endpoint = config.client.endpoint.as_deref().unwrap_or("<default>"),
        region = config.client.region.as_deref().unwrap_or("<default>"),
        operation = %config.operation(),
        requests = config.requests,
        "Starting s3-burst"
    );

    let result = execute(&config).await;
    match &result {
        Ok(summary) if !summary.is_success() => {
            tracing::error!(
                failed = summary.failed,
                requested = summary.requested,
                "{} of {} requests failed",
                summary.failed,
                summary.requested
            );
        }
        Ok(_) => {}
        Err(e) => tracing::error!("{}", fatal_message(e)),
    }

    // Exit without waiting for in-flight sibling requests
    let code = exit_code(&result);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
