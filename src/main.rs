use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dropout_risk_engine::{
    advisory, analytics, ingest, models::StudentRecord, RiskEngine, TrainingConfig,
};

#[derive(Parser)]
#[command(name = "dropout-risk")]
#[command(about = "Student dropout-risk scoring and intervention toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a classifier on a student dataset and save the model bundle
    Train {
        /// Student dataset CSV
        #[arg(long)]
        data: PathBuf,

        /// Where to write the trained bundle
        #[arg(long, default_value = "model.bin")]
        out: PathBuf,

        /// Optional training configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Predict risk for one student, with explanation and recommendations
    Predict {
        /// Trained bundle written by `train`
        #[arg(long, default_value = "model.bin")]
        model: PathBuf,

        /// Student dataset CSV
        #[arg(long)]
        data: PathBuf,

        /// Student to score
        #[arg(long)]
        student_id: String,
    },

    /// Rank students by intervention urgency
    Rank {
        /// Student dataset CSV
        #[arg(long)]
        data: PathBuf,

        /// How many students to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Detect short-term declines for one student
    Trends {
        /// Student dataset CSV
        #[arg(long)]
        data: PathBuf,

        /// Student to inspect
        #[arg(long)]
        student_id: String,
    },

    /// Cohort-level dashboard statistics
    Summary {
        /// Student dataset CSV
        #[arg(long)]
        data: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dropout_risk_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train { data, out, config } => {
            let config = match config {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading config {}", path.display()))?;
                    TrainingConfig::from_toml(&raw)?
                }
                None => TrainingConfig::default(),
            };

            let report = ingest::load_students(&data)?;
            if !report.skipped.is_empty() {
                eprintln!("Skipped {} malformed row(s).", report.skipped.len());
            }

            let engine = RiskEngine::new(config);
            let training = engine.train(&report.records)?;
            engine.save_to(&out)?;

            println!("{}", serde_json::to_string_pretty(&training)?);
            println!(
                "Selected {} (held-out accuracy {:.3}). Bundle written to {}.",
                training.selected,
                training.holdout_accuracy,
                out.display()
            );
        }

        Commands::Predict {
            model,
            data,
            student_id,
        } => {
            let engine = RiskEngine::default();
            engine.load_from(&model)?;

            let record = find_student(&data, &student_id)?;
            let prediction = engine.predict(&record)?;
            let explanation = advisory::explain(&record, &prediction);
            let recommendations = advisory::recommend(&record);

            let output = json!({
                "student_id": record.student_id,
                "student_name": record.name,
                "department": record.department,
                "prediction": prediction,
                "explanation": explanation,
                "recommendations": recommendations,
                "key_stats": {
                    "attendance": record.attendance_percentage,
                    "avg_score": record.avg_test_score,
                    "subjects_failed": record.subjects_failed,
                    "fee_due_days": record.fee_due_days,
                },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Rank { data, top } => {
            let report = ingest::load_students(&data)?;
            let ranked = advisory::rank_priority(&report.records, top);

            if ranked.is_empty() {
                println!("No students to rank.");
                return Ok(());
            }

            println!("Top {} students by intervention urgency:", ranked.len());
            for (position, entry) in ranked.iter().enumerate() {
                println!(
                    "{:>3}. {} ({}, {}) score {:.1} attendance {:.1}% avg {:.1}% flags {}",
                    position + 1,
                    entry.record.name,
                    entry.record.student_id,
                    entry.record.department,
                    entry.score,
                    entry.record.attendance_percentage,
                    entry.record.avg_test_score,
                    entry.record.total_risk_flags
                );
            }
        }

        Commands::Trends { data, student_id } => {
            let record = find_student(&data, &student_id)?;
            let warnings = advisory::detect_trends(&record);
            println!("{}", serde_json::to_string_pretty(&warnings)?);
        }

        Commands::Summary { data } => {
            let report = ingest::load_students(&data)?;
            let summary = analytics::cohort_summary(&report.records);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn find_student(data: &PathBuf, student_id: &str) -> anyhow::Result<StudentRecord> {
    let report = ingest::load_students(data)?;
    report
        .records
        .into_iter()
        .find(|r| r.student_id == student_id)
        .with_context(|| format!("student {student_id} not found in {}", data.display()))
}
