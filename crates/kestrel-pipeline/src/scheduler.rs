//! Cooperative interval scheduler.
//!
//! The host calls the pipeline once per frame with a variable dt; the
//! scheduler decides which registered tasks are due this frame and
//! hands each the time actually elapsed since its last run. Tasks
//! reschedule themselves through their return value.

/// What a task wants after running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cadence {
    /// Run again once this many seconds have accumulated.
    After(f64),
    /// Deregister the task.
    Stop,
}

struct Task<Ctx> {
    interval_secs: f64,
    since_last_secs: f64,
    run: Box<dyn FnMut(&mut Ctx, f64) -> Cadence + Send>,
}

/// Accumulating-interval scheduler over a shared context.
pub struct Scheduler<Ctx> {
    tasks: Vec<Task<Ctx>>,
}

impl<Ctx> Default for Scheduler<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> Scheduler<Ctx> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Register a task that first fires once `interval_secs` have
    /// accumulated. The task receives the context and the seconds
    /// elapsed since its previous run.
    pub fn register<F>(&mut self, interval_secs: f64, run: F)
    where
        F: FnMut(&mut Ctx, f64) -> Cadence + Send + 'static,
    {
        self.tasks.push(Task {
            interval_secs,
            since_last_secs: 0.0,
            run: Box::new(run),
        });
    }

    /// Advance all tasks by `dt` seconds, running those that are due in
    /// registration order.
    pub fn advance(&mut self, ctx: &mut Ctx, dt: f64) {
        let mut i = 0;
        while i < self.tasks.len() {
            let task = &mut self.tasks[i];
            task.since_last_secs += dt;
            if task.since_last_secs + f64::EPSILON >= task.interval_secs {
                let elapsed = task.since_last_secs;
                task.since_last_secs = 0.0;
                match (task.run)(ctx, elapsed) {
                    Cadence::After(next) => {
                        self.tasks[i].interval_secs = next;
                        i += 1;
                    }
                    Cadence::Stop => {
                        self.tasks.remove(i);
                    }
                }
            } else {
                i += 1;
            }
        }
    }
}
