use std::collections::BTreeMap;
use std::path::PathBuf;

use carecompanion_cli::config::{self, CareConfig};
use carecompanion_cli::workflow::{self, VisitSubmission};
use carecompanion_core::models::visit::VisitStage;
use carecompanion_utility::trajectory::{Comparison, Transition, Trajectory};
use carecompanion_validation::form::validate_form;
use clap::{Parser, Subcommand};
use eyre::Result;

#[derive(Parser)]
#[command(name = "carecompanion")]
#[command(about = "Elder-care assessment scoring and visit tracking")]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List screeners, or show one in detail
    Screeners {
        /// Screener ID to describe
        id: Option<String>,
    },
    /// Score a screener administration and record it
    Screen {
        participant_id: String,
        screener_id: String,
        /// Answer as ITEM=OPTION, repeated for every item
        #[arg(short, long = "answer", value_parser = parse_pair)]
        answers: Vec<(String, String)>,
    },
    /// Record a baseline, midline, or endline visit
    Visit {
        participant_id: String,
        #[arg(long)]
        stage: VisitStage,
        /// Form field as NAME=VALUE, repeatable
        #[arg(short, long = "field", value_parser = parse_pair)]
        fields: Vec<(String, String)>,
    },
    /// Show a participant's utility index across visits
    Trajectory {
        participant_id: String,
        /// Compare missing stages against the legacy 0.70 placeholder
        #[arg(long)]
        placeholder: bool,
    },
    /// Validate form fields without recording anything
    Validate {
        /// Form field as NAME=VALUE, repeatable
        #[arg(short, long = "field", value_parser = parse_pair)]
        fields: Vec<(String, String)>,
    },
    /// Write export batches for sync
    Export {
        /// Output directory (defaults to the configured export_dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Show or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Show,
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    Ok((key.trim().to_string(), value.to_string()))
}

fn init_tracing(config: &CareConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let config = config::load_or_default(&config_path)?;
    init_tracing(&config);

    match cli.command {
        Commands::Screeners { id } => screeners(&config, id.as_deref()),
        Commands::Screen {
            participant_id,
            screener_id,
            answers,
        } => {
            let loader = config.screener_loader();
            let repo = config.open_repository()?;
            let selections: BTreeMap<String, String> = answers.into_iter().collect();
            let outcome = workflow::record_screening(
                loader.as_ref(),
                &repo,
                &participant_id,
                &screener_id,
                &selections,
            )?;
            println!(
                "{} {}: score {} ({})",
                outcome.record.participant_id,
                outcome.record.screener_id,
                outcome.result.total,
                outcome.result.band
            );
            Ok(())
        }
        Commands::Visit {
            participant_id,
            stage,
            fields,
        } => {
            let repo = config.open_repository()?;
            let submission = fields
                .into_iter()
                .fold(VisitSubmission::new(participant_id, stage), |s, (k, v)| {
                    s.field(k, v)
                });
            let outcome = match workflow::record_visit(&repo, &submission) {
                Ok(outcome) => outcome,
                Err(e) if !e.field_errors().is_empty() => {
                    for error in e.field_errors() {
                        eprintln!("  {error}");
                    }
                    return Err(eyre::eyre!("visit not recorded"));
                }
                Err(e) => return Err(e.into()),
            };
            println!(
                "{} {}: utility index {:.3} ({})",
                outcome.record.participant_id,
                outcome.record.visit_stage,
                outcome.breakdown.index.value(),
                outcome.interpretation
            );
            print_comparison("midline vs baseline", &outcome.trajectory.midline_vs_baseline);
            print_comparison("endline vs midline", &outcome.trajectory.endline_vs_midline);
            print_comparison("program impact", &outcome.trajectory.program_impact);
            Ok(())
        }
        Commands::Trajectory {
            participant_id,
            placeholder,
        } => {
            let repo = config.open_repository()?;
            let trajectory = workflow::participant_trajectory(&repo, &participant_id)?;
            trajectory_report(&participant_id, &trajectory, placeholder);
            Ok(())
        }
        Commands::Validate { fields } => {
            let fields: BTreeMap<String, String> = fields.into_iter().collect();
            let errors = validate_form(&fields);
            if errors.is_empty() {
                println!("ok");
                return Ok(());
            }
            for error in &errors {
                println!("{error}");
            }
            Err(eyre::eyre!("{} field(s) failed validation", errors.len()))
        }
        Commands::Export { dir } => {
            let repo = config.open_repository()?;
            let dir = dir.unwrap_or_else(|| config.export_dir.clone());
            let summary = carecompanion_export::export_all(&repo, &dir, jiff::Timestamp::now())?;
            if summary.files.is_empty() {
                println!("nothing to export");
            }
            for file in &summary.files {
                println!("{}", file.display());
            }
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                println!("# {}", config_path.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "config already exists at {} (use --force to overwrite)",
                        config_path.display()
                    ));
                }
                config::save_config_to(&config, &config_path)?;
                println!("wrote {}", config_path.display());
                Ok(())
            }
        },
    }
}

fn screeners(config: &CareConfig, id: Option<&str>) -> Result<()> {
    let loader = config.screener_loader();
    let labels = config.label_resolver();

    let Some(id) = id else {
        for id in loader.available() {
            match loader.load_config(&id) {
                Ok(def) => println!("{id:<10} {} ({} items)", def.title, def.items.len()),
                Err(e) => println!("{id:<10} unavailable: {e}"),
            }
        }
        return Ok(());
    };

    let def = loader.load_config(id)?;
    println!("{}", def.title);
    for item in &def.items {
        let reversed = if item.reverse_scored { " (reversed)" } else { "" };
        println!("  {}: {}{reversed}", item.id, labels.resolve_label(&item.prompt_key));
        for option in def.options_for(item).unwrap_or_default() {
            println!(
                "      {} = {} [{}]",
                option.id,
                labels.resolve_label(&option.label_key),
                option.score
            );
        }
    }
    for band in &def.bands {
        println!("  {}-{}: {}", band.min, band.max, band.label);
    }
    Ok(())
}

fn print_comparison(name: &str, comparison: &Comparison) {
    match comparison {
        Comparison::Measured(delta) => println!(
            "  {name}: {:+.3} ({})",
            delta.change, delta.classification
        ),
        Comparison::NoBaseline => println!("  {name}: no earlier visit to compare"),
        Comparison::Pending => {}
    }
}

fn trajectory_report(participant_id: &str, trajectory: &Trajectory, placeholder: bool) {
    println!("{participant_id}");
    for stage in VisitStage::ALL {
        match trajectory.get(stage) {
            Some(index) => println!("  {:<9} {index} ({})", stage.as_str(), index.interpretation()),
            None => println!("  {:<9} -", stage.as_str()),
        }
    }

    let comparisons = [
        (
            "midline vs baseline",
            trajectory.midline_vs_baseline(),
            VisitStage::Midline,
            Transition::StageToStage,
        ),
        (
            "endline vs midline",
            trajectory.endline_vs_midline(),
            VisitStage::Endline,
            Transition::StageToStage,
        ),
        (
            "program impact",
            trajectory.program_impact(),
            VisitStage::Endline,
            Transition::EndOfProgram,
        ),
    ];
    for (name, comparison, later, transition) in comparisons {
        match (comparison, trajectory.get(later)) {
            (Comparison::NoBaseline, Some(current)) if placeholder => {
                let shown = comparison.against_placeholder(current, transition);
                println!(
                    "  {name}: {:+.3} ({}) [placeholder baseline]",
                    shown.delta.change, shown.delta.classification
                );
            }
            _ => print_comparison(name, &comparison),
        }
    }
}
