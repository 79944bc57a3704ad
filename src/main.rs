use carrier_config::domain::model::ConfigurationView;
use carrier_config::utils::{logger, validation::Validate};
use carrier_config::{
    AppConfig, CanadaPostClient, CarrierConfigError, Cli, Command, ConfigurationEndpoint,
    ConfigurationForm, ConfigurationService, PostResponse, SettingsStoreAdapter, StorageBackend,
};
use clap::Parser;

fn print_catalog_hint(view: &ConfigurationView) {
    if let Some(hint) = view.catalog_hint() {
        tracing::warn!("Carrier service list unavailable: {:?}", view.catalog_error);
        eprintln!("⚠️ Carrier service list unavailable");
        eprintln!("💡 {}", hint);
    }
}

/// Logs when a subscriber is installed; stderr output does not depend on it.
fn fail(e: &CarrierConfigError, code: i32) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path),
        None => Ok(AppConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => fail(&e, 1),
    };

    logger::init_cli_logger(cli.verbose, config.logging.format);

    tracing::info!("Starting carrier-config");
    if cli.verbose {
        tracing::debug!("Application config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail(&e, 1);
    }

    let storage = StorageBackend::from_config(&config.storage);
    let store = SettingsStoreAdapter::with_key(storage, config.storage.settings_key.clone());
    let catalog = CanadaPostClient::new(&config.carrier);
    let endpoint = ConfigurationEndpoint::new(ConfigurationService::new(catalog, store));

    match cli.command {
        Command::Show => match endpoint.get().await {
            Ok(view) => {
                println!("{}", serde_json::to_string_pretty(&view)?);
                print_catalog_hint(&view);
            }
            Err(e) => fail(&e, 3),
        },
        Command::Save {
            customer_number,
            contract_id,
            api_key,
            sandbox,
            services,
        } => {
            let form = ConfigurationForm {
                customer_number,
                contract_id,
                api_key,
                use_sandbox: sandbox,
                selected_service_codes: services,
            };

            let response = endpoint.post(form).await;
            println!("{}", serde_json::to_string_pretty(&response)?);

            match &response {
                PostResponse::Saved { view, notice } => {
                    eprintln!("✅ {}", notice);
                    print_catalog_hint(view);
                }
                PostResponse::Rejected { errors, .. } => {
                    for error in errors {
                        eprintln!("❌ {}: {}", error.field, error.message);
                    }
                    std::process::exit(2);
                }
                PostResponse::SaveFailed { message, .. } => {
                    eprintln!("❌ {}", message);
                    std::process::exit(3);
                }
            }
        }
    }

    Ok(())
}
