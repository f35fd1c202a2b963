use clap::Parser;
use device_gen::utils::logger::{self, LogFormat};
use device_gen::{app, CliConfig, GenError};

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    let log_format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, args.verbose);

    tracing::info!("Starting device-gen");
    tracing::debug!("CLI config: {:?}", args);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    match app::run(args, &mut stdin.lock(), &mut stdout).await {
        Ok(summary) => {
            println!(
                "✅ Generated {} devices ({} dual-SIM)",
                summary.rows, summary.dual_sim_rows
            );
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Err(e) => match e.downcast_ref::<GenError>() {
            Some(gen_error) => {
                tracing::error!(
                    "❌ Generation failed: {:#} (Category: {:?}, Severity: {:?})",
                    e,
                    gen_error.category(),
                    gen_error.severity()
                );
                eprintln!("❌ {}", gen_error.user_friendly_message());
                eprintln!("💡 {}", gen_error.recovery_suggestion());
                std::process::exit(gen_error.exit_code());
            }
            None => {
                tracing::error!("❌ Generation failed: {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        },
    }
}
