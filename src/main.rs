// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Turn them into an immutable MirrorConfig
// 3. Walk the listing until done or until Ctrl-C
// 4. Print the summary and exit with the proper code
//    (0 = all good, 1 = something failed, 2 = setup error, 130 = interrupted)
// =============================================================================

use anyhow::Result;
use clap::Parser;

use uploads_mirror::cli::Cli;
use uploads_mirror::config::MirrorConfig;
use uploads_mirror::crawl::{FailureKind, Mirror, RunSummary};
use uploads_mirror::logging::init_logging;

// The #[tokio::main] attribute transforms our async main into a real main function
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Setup failed before anything was fetched
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let config = MirrorConfig::from_cli(&cli)?;
    let mirror = Mirror::new(config)?;

    if !cli.json {
        println!("🔍 Mirroring {}", mirror.config().root_url());
        println!("📁 Output directory: {}", mirror.config().output_dir.display());
    }

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler available: never interrupt
            std::future::pending::<()>().await;
        }
    };

    let summary = mirror.run(shutdown).await;

    print_results(&summary, cli.json)?;
    Ok(summary.exit_code())
}

// Prints the summary either as a table or JSON
fn print_results(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(summary)?;
        println!("{}", json_output);
    } else {
        print_table(summary);
    }
    Ok(())
}

fn print_table(summary: &RunSummary) {
    if !summary.failures.is_empty() {
        println!();
        println!("{:<70} {:<10} {:<40}", "URL", "KIND", "ERROR");
        println!("{}", "=".repeat(120));
        for failure in &summary.failures {
            let kind = match failure.kind {
                FailureKind::Listing => "listing",
                FailureKind::Download => "download",
            };
            println!("{:<70} {:<10} {:<40}", truncate(&failure.url, 67), kind, failure.message);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Pages listed: {}", summary.pages_listed);
    if summary.dry_run {
        println!("   📝 Would download: {}", summary.downloaded.len());
    } else {
        println!(
            "   ✅ Downloaded: {} ({} bytes)",
            summary.downloaded.len(),
            summary.bytes_downloaded
        );
    }
    println!("   ⏭️  Already present: {}", summary.skipped_existing);
    println!("   🚫 Filtered out: {}", summary.filtered_out);
    println!("   ❌ Failed: {}", summary.failures.len());
    if summary.cancelled {
        println!("   ⚠️  Interrupted before the walk finished");
    }
}

// Truncate long URLs for the table, on a char boundary
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
