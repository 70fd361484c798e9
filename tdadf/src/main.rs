use std::error::Error;
use std::path::PathBuf;
use clap::{Parser, Subcommand};
use tdacore::algorithm::attach::MissingPolicy;
use tdadf::data::dataset::CouplingDataset;
use tdadf::data::handle::{ArtifactSource, EnrichmentHandle, FeatureSource};

#[derive(Parser)]
#[command(name = "tdadf", about = "Inspect and enrich atom-pair training datasets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the metadata of a dataset artifact
    Info {
        /// Path to the compressed dataset
        dataset: PathBuf,
    },
    /// Attach feature artifacts to a dataset and write the enriched result
    Attach {
        /// Path to the compressed dataset
        dataset: PathBuf,
        /// Feature artifact paths, one per source
        #[arg(long = "features", required = true)]
        features: Vec<PathBuf>,
        /// Column suffix per source, same order and count as --features
        #[arg(long = "suffixes", required = true)]
        suffixes: Vec<String>,
        /// Output path for the enriched dataset
        #[arg(long)]
        output: PathBuf,
        /// Abort when a molecule is missing from a feature source instead of inserting NaN
        #[arg(long, default_value_t = false)]
        fail_on_missing: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { dataset } => {
            let dataset = CouplingDataset::read_compressed(&dataset)?;
            println!("name: {}", dataset.meta.name);
            println!("target column: {}", dataset.meta.target_column);
            println!("rows: {}", dataset.meta.num_rows);
            println!("molecules: {}", dataset.meta.num_molecules);
            println!("feature columns: {:?}", dataset.table.column_names());
        }
        Commands::Attach { dataset, features, suffixes, output, fail_on_missing } => {
            if features.len() != suffixes.len() {
                return Err(format!(
                    "{} feature artifacts but {} suffixes",
                    features.len(),
                    suffixes.len()
                )
                .into());
            }
            let policy = if fail_on_missing { MissingPolicy::Fail } else { MissingPolicy::InsertNan };
            let sources: Vec<Box<dyn FeatureSource>> = features
                .iter()
                .zip(suffixes.iter())
                .map(|(path, suffix)| Box::new(ArtifactSource::new(path, suffix)) as Box<dyn FeatureSource>)
                .collect();
            let handle = EnrichmentHandle::new(&dataset, policy);
            let enriched = handle.enrich(&sources)?;
            enriched.write_compressed(&output)?;
            println!(
                "wrote {} rows with {} feature columns to {}",
                enriched.meta.num_rows,
                enriched.table.columns.len(),
                output.display()
            );
        }
    }
    Ok(())
}
