//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `clinic_core` linkage and open the configured database.
//! - Print per-kind record counts for quick local sanity checks.

use clinic_core::db::open_db;
use clinic_core::{ClinicConfig, ClinicService, SystemClock, UuidGenerator};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("clinic_core ping={}", clinic_core::ping());
    println!("clinic_core version={}", clinic_core::core_version());

    let config = ClinicConfig::from_env();
    if let Err(err) = config.init_logging() {
        eprintln!("logging disabled: {err}");
    }

    match print_counts(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("clinic_core db={} error={err}", config.db_path.display());
            ExitCode::FAILURE
        }
    }
}

fn print_counts(config: &ClinicConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(&config.db_path)?;
    let clock = SystemClock::new();
    let ids = UuidGenerator;
    let service = ClinicService::try_new(&conn, &clock, &ids)?;

    println!("clinic_core db={}", config.db_path.display());
    for (kind, count) in service.record_counts()? {
        println!("clinic_core {}={count}", kind.table());
    }
    Ok(())
}
