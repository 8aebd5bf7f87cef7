use crate::KMeansError;

/// Enum with possible abort strategies.
/// These strategies specify when a running iteration (with the k-means calculation) is considered converged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AbortStrategy {
	/// This strategy aborts the calculation as soon as no cluster center moved by `threshold` or more
	/// within one iteration (the movement is measured as euclidean distance between a cluster's old and new center).
	/// ## Fields:
	/// - **threshold**: Movement tolerance, in the same units as the vector components
	CenterMovement { threshold: f64 },
	/// This strategy aborts the calculation directly after an iteration produced no improvement where `improvement > threshold`
	/// for the first time.
	/// ## Fields:
	/// - **threshold**: Threshold, used to detect an improvement (`improvement > threshold`)
	NoImprovement { threshold: f64 },
	/// This strategy aborts the calculation, when there have not been any improvements after **x** iterations,
	/// where `improvement > threshold`.
	/// ## Fields:
	/// - **x**: The amount of consecutive without improvement, after which the calculation is aborted
	/// - **threshold**: Threshold, used to detect an improvement (`improvement > threshold`)
	/// - **abort_on_negative**: Specifies whether the strategy instantly aborts when a negative improvement occured (**true**), or if
	/// negative improvements are handled as "no improvements" (**false**).
	NoImprovementForXIterations { x: usize, threshold: f64, abort_on_negative: bool }
}
impl Default for AbortStrategy {
	fn default() -> Self { AbortStrategy::CenterMovement { threshold: 1.0 } }
}
impl AbortStrategy {
	pub(crate) fn validate(&self) -> Result<(), KMeansError> {
		let threshold = match *self {
			AbortStrategy::CenterMovement{threshold} => threshold,
			AbortStrategy::NoImprovement{threshold} => threshold,
			AbortStrategy::NoImprovementForXIterations{x,threshold,..} => {
				if x == 0 {
					return Err(KMeansError::InvalidIterationLimit);
				}
				threshold
			}
		};
		if !threshold.is_finite() || threshold < 0.0 {
			return Err(KMeansError::InvalidThreshold { threshold });
		}
		Ok(())
	}

	pub(crate) fn create_logic(&self) -> Box<dyn AbortStrategyLogic> {
		match *self {
			AbortStrategy::CenterMovement{threshold} => Box::new(CenterMovementLogic { threshold }),
			AbortStrategy::NoImprovementForXIterations{x,threshold,abort_on_negative} => Box::new(NoImprovementForXIterationsLogic {
				x, threshold, abort_on_negative,
				prev_error: f64::INFINITY,
				no_improvement_counter: 0
			}),
			AbortStrategy::NoImprovement{threshold} => Box::new(NoImprovementLogic {
				threshold,
				prev_error: f64::INFINITY
			})
		}
	}
}

pub(crate) trait AbortStrategyLogic {
	/// Function that has to be called once an iteration of the calculation ended.
	/// ## Arguments
	/// - **max_movement**: The largest distance any cluster center moved during the iteration
	/// - **error**: The new error (distsum), after the iteration
	/// ## Returns
	/// - **true** if the calculation should continue
	/// - **false** if the calculation converged and should stop
	fn next(&mut self, max_movement: f64, error: f64) -> bool;
}


pub(crate) struct CenterMovementLogic {
	threshold: f64
}
impl AbortStrategyLogic for CenterMovementLogic {
	fn next(&mut self, max_movement: f64, _error: f64) -> bool {
		max_movement >= self.threshold
	}
}


pub(crate) struct NoImprovementLogic {
	threshold: f64,
	prev_error: f64
}
impl AbortStrategyLogic for NoImprovementLogic {
	fn next(&mut self, _max_movement: f64, error: f64) -> bool {
		let improvement = self.prev_error - error;
		self.prev_error = error;
		improvement > self.threshold
	}
}


pub(crate) struct NoImprovementForXIterationsLogic {
	x: usize,
	threshold: f64,
	abort_on_negative: bool,
	prev_error: f64,
	no_improvement_counter: usize
}
impl AbortStrategyLogic for NoImprovementForXIterationsLogic {
	fn next(&mut self, _max_movement: f64, error: f64) -> bool {
		let improvement = self.prev_error - error;
		self.prev_error = error;
		if self.abort_on_negative && improvement < 0.0 { // Negative improvement, and instant abort is requested
			return false;
		}
		if improvement > self.threshold { // positive improvement: reset no-improv-counter
			self.no_improvement_counter = 0;
		} else { // Still no improvement, count 1 up
			self.no_improvement_counter += 1;
		}
		self.no_improvement_counter < self.x
	}
}
