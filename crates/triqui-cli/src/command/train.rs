use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use chrono::Utc;
use triqui_training::{
    cancel::CancelToken,
    config::TrainingConfig,
    engine::GeneticEngine,
    observer::{FnObserver, GenerationEvent},
};

use crate::model::ai_model::AiModel;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of individuals per generation
    #[arg(long, default_value_t = TrainingConfig::default().population_size)]
    population_size: usize,
    /// Number of generations to run
    #[arg(long, default_value_t = TrainingConfig::default().generation_count)]
    generations: usize,
    /// Per-gene mutation probability
    #[arg(long, default_value_t = TrainingConfig::default().mutation_probability)]
    mutation_probability: f64,
    /// Number of top individuals kept unchanged each generation
    #[arg(long, default_value_t = TrainingConfig::default().elite_count)]
    elite_count: usize,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Evaluate individuals on a single thread
    #[arg(long)]
    sequential: bool,
    /// Stop after the generation running when this many seconds have passed
    #[arg(long)]
    time_limit: Option<u64>,
    /// Name stored in the model file
    #[arg(long, default_value = "triqui")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn config(&self) -> TrainingConfig {
        let config = TrainingConfig::default()
            .with_population_size(self.population_size)
            .with_generation_count(self.generations)
            .with_mutation_probability(self.mutation_probability)
            .with_elite_count(self.elite_count)
            .with_parallel(!self.sequential);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let mut engine = GeneticEngine::new(arg.config())?;

    let cancel = CancelToken::new();
    let deadline = arg
        .time_limit
        .map(|secs| Instant::now() + Duration::from_secs(secs));
    let generation_count = engine.config().generation_count;
    let observer = FnObserver::new(
        || {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                cancel.cancel();
            }
        },
        |event: &GenerationEvent| {
            let record = &event.record;
            eprintln!(
                "Generation #{:3}/{generation_count}: best {:5.1}  avg {:5.2}  min {:5.1}  max {:5.1}  [{}]",
                record.generation,
                record.best_fitness,
                record.average_fitness,
                record.min_fitness,
                record.max_fitness,
                event.best_genome,
            );
        },
    );
    let outcome = engine.run(observer, &cancel)?;

    if outcome.cancelled {
        eprintln!(
            "Time limit reached after {} generations.",
            outcome.generations_run
        );
    }
    let Some(best) = outcome.best else {
        anyhow::bail!("training stopped before any generation was evaluated");
    };
    eprintln!("Training completed.");

    let model = AiModel {
        name: arg.name.clone(),
        trained_at: Utc::now(),
        final_fitness: best.fitness(),
        genome: *best.genome(),
        config: engine.config().clone(),
        history: outcome.history,
    };
    model.save(arg.output.as_deref())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Final fitness: {:.1}", model.final_fitness);
    eprintln!("  Genome: {}", model.genome);

    Ok(())
}
