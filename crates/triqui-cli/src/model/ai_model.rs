use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triqui_evaluator::genome::Genome;
use triqui_training::{config::TrainingConfig, engine::TrainingRecord};

/// A trained genome as saved by `triqui train`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AiModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f64,
    pub genome: Genome,
    pub config: TrainingConfig,
    #[serde(default)]
    pub history: Vec<TrainingRecord>,
}

impl AiModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open AI model file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read AI model file: {}", path.display()))
    }

    /// Writes the model as pretty JSON to `path`, or to stdout when no path is given.
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<()> {
        match path {
            Some(path) => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create AI model file: {}", path.display())
                })?;
                self.write_json(BufWriter::new(file))
                    .with_context(|| format!("Failed to write AI model file: {}", path.display()))
            }
            None => self
                .write_json(io::stdout().lock())
                .context("Failed to write AI model to stdout"),
        }
    }

    fn write_json<W>(&self, mut writer: W) -> anyhow::Result<()>
    where
        W: Write,
    {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Loads the genome from `path`, or the default preset when no path is given.
    pub fn genome_or_default(path: Option<&PathBuf>) -> anyhow::Result<Genome> {
        match path {
            Some(path) => {
                let model = Self::open(path)?;
                tracing::info!(name = %model.name, genome = %model.genome, "loaded model");
                Ok(model.genome)
            }
            None => Ok(Genome::DEFAULT_PRESET),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use super::*;

    fn sample_model() -> AiModel {
        AiModel {
            name: "sample".to_owned(),
            trained_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            final_fitness: 41.0,
            genome: Genome::from_values([8, 7, 6, 5, 4, 3, 2]),
            config: TrainingConfig::default().with_seed(3),
            history: vec![],
        }
    }

    #[test]
    fn test_save_then_open() {
        let path = env::temp_dir().join(format!("triqui-model-{}.json", std::process::id()));
        let model = sample_model();
        model.save(Some(path.as_path())).unwrap();
        let loaded = AiModel::open(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_genome_or_default_without_path() {
        assert_eq!(
            AiModel::genome_or_default(None).unwrap(),
            Genome::DEFAULT_PRESET
        );
    }

    #[test]
    fn test_open_missing_file_names_path() {
        let err = AiModel::open("/nonexistent/triqui-model.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/triqui-model.json"));
    }
}
