use clap::Parser;
use clinic_locator::core::advice::UnavailableAdvice;
use clinic_locator::core::export::export_summary;
use clinic_locator::core::geo::format_distance;
use clinic_locator::core::{AdviceService, ConfigProvider, LocationProvider, RankedBranch};
use clinic_locator::utils::error::ErrorSeverity;
use clinic_locator::utils::{logger, validation::Validate};
use clinic_locator::{
    CliConfig, FixedLocationProvider, GeminiAdviceClient, LocalStorage, LocatorError,
    LocatorSession, TomlConfig, BRANCHES,
};

fn exit_with(e: &LocatorError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

/// Non-fatal failures: tell the user and keep going with the registry.
fn report(e: &LocatorError) {
    tracing::warn!("{}", e);
    eprintln!("⚠️  {}", e.user_friendly_message());
}

fn print_branch(index: usize, ranked: &RankedBranch) {
    let branch = &ranked.branch;
    let marker = if ranked.is_nearest { " ★ NEAREST" } else { "" };
    let distance = ranked
        .distance_km
        .map(|km| format!(" ({})", format_distance(km)))
        .unwrap_or_default();

    println!("{}. {}{}{}", index + 1, branch.name, distance, marker);
    println!("   {}, {}", branch.address, branch.city);
    println!("   {} | {}", branch.phone, branch.hours);
    if let Some(transport) = branch.transport {
        println!("   Transit: {}", transport);
    }
    println!("   Specialties: {}", branch.specialties.join(", "));
}

async fn drive<A, L, C>(mut session: LocatorSession<A, L>, args: &CliConfig, config: &C)
where
    A: AdviceService,
    L: LocationProvider,
    C: ConfigProvider,
{
    let advise = !args.offline;

    if args.device_coordinate().is_some() {
        let result = if advise && args.query.is_none() {
            session.locate_and_advise().await.map(|_| ())
        } else {
            session.use_device_location().await.map(|_| ())
        };
        if let Err(e) = result {
            report(&e);
        }
    }

    if let Some(query) = args.query.as_deref().filter(|_| advise) {
        tracing::info!("🔎 Requesting travel advice for: {}", query);
        if let Err(e) = session.submit_query(query).await {
            report(&e);
        }
    }

    println!("Branches ({} active)", BRANCHES.len());
    for (index, ranked) in session.ranked_branches().iter().enumerate() {
        print_branch(index, ranked);
    }

    let Some(advice) = session.current_advice() else {
        return;
    };

    println!();
    println!("Target branch summary");
    if let Some(recommendation) = &advice.recommendation {
        println!("  Recommended: {}", recommendation);
    }
    for line in session.summary_lines() {
        println!("  [{:<8}] {}", line.category.label(), line.text);
    }
    if !advice.citations.is_empty() {
        println!("  Sources:");
        for citation in &advice.citations {
            println!("    - {} <{}>", citation.title, citation.uri);
        }
    }

    if args.export {
        let storage = LocalStorage::new(config.output_path().to_string());
        match export_summary(&storage, Some(advice), config.summary_filename()).await {
            Ok(filename) => println!("📁 Summary saved to: {}", storage.full_path(&filename)),
            Err(e) => report(&e),
        }
    }
}

async fn run<C: ConfigProvider>(args: &CliConfig, config: &C) {
    let location = FixedLocationProvider::new(args.device_coordinate());
    let wants_advice =
        !args.offline && (args.query.is_some() || args.device_coordinate().is_some());

    if !wants_advice {
        let session = LocatorSession::new(UnavailableAdvice::offline(), location, BRANCHES);
        drive(session, args, config).await;
        return;
    }

    // A missing key or bad client setup only costs the advice; the registry still prints.
    match GeminiAdviceClient::from_config(config) {
        Ok(client) => drive(LocatorSession::new(client, location, BRANCHES), args, config).await,
        Err(e) => {
            tracing::warn!("Advice service unavailable: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            let advice = UnavailableAdvice::from_error(&e);
            drive(LocatorSession::new(advice, location, BRANCHES), args, config).await;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting clinic-locator");
    tracing::debug!(
        "Query: {:?}, device position: {:?}, offline: {}",
        args.query,
        args.device_coordinate(),
        args.offline
    );

    if let Err(e) = args.validate() {
        exit_with(&e);
    }

    match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => exit_with(&e),
            };
            if config.advice.api_key.is_none() {
                config.advice.api_key = args.api_key.clone();
            }
            if let Err(e) = config.validate() {
                exit_with(&e);
            }
            run(&args, &config).await;
        }
        None => run(&args, &args).await,
    }

    Ok(())
}
