//! Hooks for watching a training run.
//!
//! The engine calls a [`TrainingObserver`] twice per generation:
//!
//! ```text
//! before_generation()          (before evaluation)
//!     evaluate, update best-ever, record
//! generation_completed(event)  (before reproduction)
//! ```
//!
//! Observers only see copies of engine state; they cannot touch the population.

use std::sync::mpsc::Sender;

use triqui_evaluator::genome::Genome;

use crate::engine::TrainingRecord;

/// Data reported once a generation has been evaluated and recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationEvent {
    pub record: TrainingRecord,
    /// Genome of the best individual seen so far in the run.
    pub best_genome: Genome,
}

/// Receives progress notifications from [`GeneticEngine`](crate::engine::GeneticEngine).
pub trait TrainingObserver {
    /// Called at the start of every generation, before evaluation.
    ///
    /// Lets a host event loop stay responsive. Must return promptly.
    fn before_generation(&mut self) {}

    /// Called after a generation's [`TrainingRecord`] has been appended to the history.
    fn generation_completed(&mut self, event: &GenerationEvent);
}

impl TrainingObserver for () {
    fn generation_completed(&mut self, _event: &GenerationEvent) {}
}

impl<T> TrainingObserver for &mut T
where
    T: TrainingObserver + ?Sized,
{
    fn before_generation(&mut self) {
        (**self).before_generation();
    }

    fn generation_completed(&mut self, event: &GenerationEvent) {
        (**self).generation_completed(event);
    }
}

/// Sends every event down a channel.
///
/// A disconnected receiver is ignored: the run keeps going without an audience.
impl TrainingObserver for Sender<GenerationEvent> {
    fn generation_completed(&mut self, event: &GenerationEvent) {
        let _ = self.send(event.clone());
    }
}

/// Adapts a pair of closures into a [`TrainingObserver`].
///
/// ```
/// use triqui_training::observer::FnObserver;
///
/// let mut yields = 0;
/// let mut generations = Vec::new();
/// let observer = FnObserver::new(
///     || yields += 1,
///     |event: &triqui_training::observer::GenerationEvent| {
///         generations.push(event.record.generation);
///     },
/// );
/// # drop(observer);
/// ```
#[derive(Debug)]
pub struct FnObserver<Y, P> {
    on_yield: Y,
    on_progress: P,
}

impl<Y, P> FnObserver<Y, P>
where
    Y: FnMut(),
    P: FnMut(&GenerationEvent),
{
    #[must_use]
    pub fn new(on_yield: Y, on_progress: P) -> Self {
        Self {
            on_yield,
            on_progress,
        }
    }
}

impl<Y, P> TrainingObserver for FnObserver<Y, P>
where
    Y: FnMut(),
    P: FnMut(&GenerationEvent),
{
    fn before_generation(&mut self) {
        (self.on_yield)();
    }

    fn generation_completed(&mut self, event: &GenerationEvent) {
        (self.on_progress)(event);
    }
}
