use anyhow::{bail, Context, Result};
use log::{debug, error, info, warn};
use pi_uploader::cli;
use pi_uploader::common::logging_setup;
use pi_uploader::config_loader::{self, DEFAULT_CONFIG_PATH};
use pi_uploader::operations::Uploader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();

    let explicit_config = matches.get_one::<String>("config");
    let config_path = explicit_config.map(String::as_str).unwrap_or(DEFAULT_CONFIG_PATH);

    let master_config = match config_loader::load_config(config_path, explicit_config.is_some()) {
        Ok(cfg) => {
            logging_setup::initialize_logging(Some(&cfg), &matches);
            cfg
        }
        Err(e) => {
            logging_setup::initialize_logging(None, &matches);
            error!("❌ Failed to load configuration from '{}': {}", config_path, e);
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to load configuration from '{}'", config_path)));
        }
    };
    debug!("Effective configuration: {:?}", master_config);

    info!("{}", "=".repeat(60));
    info!("Raspberry Pi Photo Uploader");
    info!("{}", "=".repeat(60));

    let force_mock = matches.get_flag("mock");
    let keep_local = matches.get_flag("keep");
    let output_path = matches.get_one::<String>("output").map(PathBuf::from);

    let interrupted = Arc::new(AtomicBool::new(false));
    let task_flag = Arc::clone(&interrupted);

    // The blocking HTTP client and the camera live entirely on this worker.
    let mut pipeline = tokio::task::spawn_blocking(move || -> Result<()> {
        let mut uploader = Uploader::new(master_config)
            .context("Invalid configuration")?
            .with_interrupt_flag(task_flag);

        uploader.initialize_camera(force_mock);
        let cleanup = uploader.config().upload.cleanup && !keep_local;

        info!("{}", "-".repeat(60));
        info!("🚀 Starting photo capture and upload...");
        info!("{}", "-".repeat(60));

        let outcome = uploader.capture_and_upload_to(output_path.as_deref(), cleanup);
        uploader.release();
        outcome.map(|_| ()).map_err(anyhow::Error::from)
    });

    let joined = tokio::select! {
        joined = &mut pipeline => joined,
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => {
                    warn!("🛑 Interrupted by user. Finishing the current step and releasing the camera...");
                    interrupted.store(true, Ordering::SeqCst);
                }
                Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
            }
            pipeline.await
        }
    };

    let outcome = joined.context("Capture-and-upload task panicked")?;
    if interrupted.load(Ordering::SeqCst) {
        bail!("Interrupted by user");
    }

    match outcome {
        Ok(()) => {
            info!("🏁 Process completed successfully in {:?}!", main_start_time.elapsed());
            Ok(())
        }
        Err(e) => {
            error!("❌ Process failed after {:?}: {:#}", main_start_time.elapsed(), e);
            Err(e)
        }
    }
}
