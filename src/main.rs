use anyhow::Result;

fn main() -> Result<()> {
    // Initialize core
    metrocast_core::init()?;

    // Load and validate configuration
    let app = metrocast_core::App::new()?;
    app.initialize()?;

    // Wire the adapter clients
    let services = metrocast_ui::AppServices::new()?;
    if !services.init_from_config(app.config()) {
        anyhow::bail!("Failed to initialize service clients");
    }

    let store = metrocast_ui::DashboardStore::new(services.clone());
    tracing::info!("MetroCast client started");

    println!("MetroCast - Istanbul Smart Forecast");
    println!("\nConfiguration:");
    println!("  Config directory:   {}", app.config().config_dir.display());
    println!("  Prediction API:     {}", app.config().forecast.api_url);
    println!("  Input window:       {} hours", store.window().hours());
    println!(
        "  Observation source: {}/{}",
        app.config().observations.data_url,
        app.config().observations.object_key,
    );

    // Graceful shutdown
    services.shutdown();
    app.shutdown()?;

    Ok(())
}
