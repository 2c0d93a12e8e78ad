use clap::Parser;
use latest_videos::core::handler::Outcome;
use latest_videos::core::ConfigProvider;
use latest_videos::utils::error::{ErrorSeverity, FeedError};
use latest_videos::utils::{logger, validation::Validate};
use latest_videos::{ApiRequest, CliConfig, LatestVideosHandler, ReqwestFetcher, TomlConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let request = cli.to_api_request();

    // A --config file replaces the flag values entirely
    let exit_code = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {}", path);
                run(config, &request).await
            }
            Err(e) => report_error(&e),
        },
        None => run(cli, &request).await,
    };

    std::process::exit(exit_code);
}

async fn run<C: ConfigProvider + Validate>(config: C, request: &ApiRequest) -> i32 {
    // Validate
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return report_error(&e);
    }

    // Build the fetcher and handler
    let fetcher = match ReqwestFetcher::from_config(&config) {
        Ok(fetcher) => fetcher,
        Err(e) => return report_error(&e),
    };

    let handler = LatestVideosHandler::new(fetcher, config);
    let response = handler.handle(request).await;

    // Print the JSON envelope exactly as the endpoint would return it
    match response.body_json() {
        Ok(json) => println!("{}", json),
        Err(e) => return report_error(&e),
    }

    // Exit code by outcome
    match response.outcome {
        Outcome::Ok | Outcome::Empty | Outcome::Preflight => 0,
        Outcome::Unresolved | Outcome::FeedUnavailable => 2,
        Outcome::MethodNotAllowed | Outcome::ServerError => 1,
    }
}

fn report_error(e: &FeedError) -> i32 {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // Exit code by severity
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
