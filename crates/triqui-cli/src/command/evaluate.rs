use std::path::PathBuf;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use triqui_evaluator::fitness_evaluator::FitnessEvaluator;

use crate::model::ai_model::AiModel;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Path to the model file (JSON format); the default preset is used otherwise
    #[arg(long)]
    model: Option<PathBuf>,
    /// Rounds to play (two games each, one per side)
    #[arg(long, default_value_t = 500)]
    rounds: usize,
    /// Seed for reproducible results
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let genome = AiModel::genome_or_default(arg.model.as_ref())?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::seed_from_u64(seed);

    let evaluator = FitnessEvaluator::new(arg.rounds);
    let tally = evaluator.play_rounds(&genome, &mut rng)?;

    eprintln!("Genome: {genome}");
    eprintln!("Seed:   {seed}");
    eprintln!("Rounds: {}", evaluator.rounds());
    eprintln!("Games:  {}", tally.games());
    eprintln!("  Wins:   {}", tally.wins);
    eprintln!("  Draws:  {}", tally.draws);
    eprintln!("  Losses: {}", tally.losses);
    eprintln!("Fitness: {}", tally.points());

    Ok(())
}
