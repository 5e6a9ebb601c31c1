use repotree::common::logging::init_logging;
use repotree::presentation::cli::CliApp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging();

    // Run the CLI application
    let app = CliApp::new();
    app.run().await
}
