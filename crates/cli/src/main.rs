use clap::{Parser, Subcommand};
use navigator_core::{
    evaluate, narrow_with_broadening, PatientReport, Severity, SymptomDuration, TriageLevel,
};
use navigator_places::static_fallback;
use navigator_types::SymptomText;

#[derive(Parser)]
#[command(name = "navigator")]
#[command(about = "Care navigator triage CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a symptom report and print the triage decision
    Triage {
        /// Symptom phrase, repeatable
        #[arg(long = "symptom")]
        symptoms: Vec<String>,
        /// Severity: mild, moderate or severe
        severity: String,
        /// Duration: hours, days or weeks
        duration: String,
        /// Patient age in years
        age: u32,
    },
    /// Evaluate a report given as a JSON document on stdin
    TriageJson,
    /// Print the provider-directory keyword for a care level
    Keyword {
        /// Care level: emergency, urgent, primary or specialty
        level: String,
    },
    /// List providers from the offline dataset
    Providers {
        /// Provider keyword, e.g. "Urgent Care"
        #[arg(long, default_value = "")]
        keyword: String,
        /// Insurance name to narrow by (broadens back when nothing matches)
        #[arg(long, default_value = "")]
        insurance: String,
    },
}

fn parse_level(s: &str) -> anyhow::Result<TriageLevel> {
    match s.trim().to_lowercase().as_str() {
        "emergency" => Ok(TriageLevel::Emergency),
        "urgent" => Ok(TriageLevel::Urgent),
        "primary" => Ok(TriageLevel::Primary),
        "specialty" => Ok(TriageLevel::Specialty),
        other => anyhow::bail!("unknown care level: {other}"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Triage {
            symptoms,
            severity,
            duration,
            age,
        } => {
            let report = PatientReport {
                symptoms: symptoms
                    .iter()
                    .map(SymptomText::new)
                    .collect::<Result<Vec<_>, _>>()?,
                severity: severity.parse::<Severity>()?,
                duration: duration.parse::<SymptomDuration>()?,
                age,
                sex: String::new(),
                insurance: String::new(),
                zip: String::new(),
                selected_region: String::new(),
            };
            let decision = evaluate(&report);
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }
        Commands::TriageJson => {
            let mut input = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut input)?;
            let report = PatientReport::from_json(&input)?;
            let decision = evaluate(&report);
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }
        Commands::Keyword { level } => {
            println!("{}", parse_level(&level)?.provider_keyword());
        }
        Commands::Providers { keyword, insurance } => {
            let providers = narrow_with_broadening(static_fallback(&keyword), &insurance);
            println!("{}", serde_json::to_string_pretty(&providers)?);
        }
    }

    Ok(())
}
