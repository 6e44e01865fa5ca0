use anyhow::{Context, Result};
use promptx::cli::{Args, Commands, ConfigDiscovery, resolve_prompt};
use promptx::env::DEFAULT_LOG_FILTER;
use promptx::{Credentials, PromptxSystem};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Commands::ShowConfig = args.command {
        ConfigDiscovery::show_discovery_info(args.config.as_deref());
        return Ok(());
    }

    let config = ConfigDiscovery::discover_config(args.config.as_deref())?;
    let credentials = if args.needs_providers() {
        let credentials = Credentials::from_env(&config);
        info!(?credentials, "Credentials loaded");
        credentials
    } else {
        Credentials::default()
    };
    let system = PromptxSystem::new(&config, &credentials)?;

    let prompt = match args.prompt_arg() {
        Some(arg) => resolve_prompt(arg, std::io::stdin().lock())
            .context("Failed to read prompt from stdin")?,
        None => String::new(),
    };

    match &args.command {
        Commands::Generate { max_tokens, .. } => {
            let result = system.generate(&prompt, *max_tokens).await?;
            if args.json {
                print_json(&result)?;
            } else {
                println!("{}", result.text);
                eprintln!(
                    "\n[{} in {:.2}s]",
                    result.provider_name,
                    result.elapsed.as_secs_f64()
                );
            }
        }
        Commands::Enhance { .. } => {
            let report = system.enhance(&prompt).await?;
            if args.json {
                print_json(&report)?;
            } else {
                println!("{}", report.enhanced);
                println!();
                println!(
                    "Category: {} ({:.2})",
                    report.classification.category, report.classification.confidence
                );
                println!(
                    "Score: {:.2} -> {:.2} ({:+.2})",
                    report.original_score.total, report.enhanced_score.total, report.improvement
                );
                println!("Provider: {}", report.provider_name);
            }
        }
        Commands::Score { .. } => {
            let summary = system.summarize(&prompt);
            if args.json {
                print_json(&summary)?;
            } else {
                println!(
                    "Score: {:.2}/10 ({:.1}%) - {}",
                    summary.total, summary.percentage, summary.quality
                );
            }
        }
        Commands::Heatmap { .. } => {
            let report = system.score(&prompt);
            if args.json {
                print_json(&report)?;
            } else {
                println!("Overall: {:.1} (grade {})", report.overall_score, report.grade);
                for (dimension, score) in &report.metrics {
                    println!("  {:<14} {:>4.1}", dimension.as_str(), score);
                }
                for suggestion in &report.suggestions {
                    println!(
                        "  ! {}: {} -> {}",
                        suggestion.category, suggestion.issue, suggestion.fix
                    );
                }
            }
        }
        Commands::Classify { .. } => {
            let classification = system.classify(&prompt);
            let intent = system.detect_intent(&prompt);
            if args.json {
                print_json(&serde_json::json!({
                    "classification": classification,
                    "intent": intent,
                }))?;
            } else {
                println!(
                    "Category: {} ({:.2})",
                    classification.category, classification.confidence
                );
                println!(
                    "Intent: {} ({:.2}, {})",
                    intent.intent, intent.confidence, intent.tone
                );
            }
        }
        Commands::Variations { no_compare, .. } => {
            if *no_compare {
                let variations = system.generate_variations(&prompt).await;
                if args.json {
                    print_json(&variations)?;
                } else {
                    for variation in variations.values() {
                        print_variation(variation);
                    }
                }
            } else {
                let comparison = system.compare_variations(&prompt).await;
                if args.json {
                    print_json(&comparison)?;
                } else {
                    for variation in comparison.variations.values() {
                        print_variation(variation);
                    }
                    println!("Best: {} ({})", comparison.best_label, comparison.reason);
                }
            }
        }
        Commands::ShowConfig => {}
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}

fn print_variation(variation: &promptx::variations::Variation) {
    let marker = if variation.degraded { " (unchanged)" } else { "" };
    match &variation.quality {
        Some(report) => println!(
            "== {} via {}{} [{:.1}, {}]",
            variation.label.capitalized(),
            variation.provider_name,
            marker,
            report.overall_score,
            report.grade
        ),
        None => println!(
            "== {} via {}{}",
            variation.label.capitalized(),
            variation.provider_name,
            marker
        ),
    }
    println!("{}", variation.text);
    println!();
}
