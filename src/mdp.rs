//! Value iteration for the fishing-village MDP: states are the fish
//! population 0..=capacity, an action catches some of it, and the rest
//! regrows by a stochastic seasonal factor.

use log::info;

/// Model parameters. [`Default`] gives the standard instance: capacity
/// 100, discount 0.9, growth factors 1/1.25/1.5/1.75 at probabilities
/// 0.2/0.3/0.3/0.2.
#[derive(Debug, Clone)]
pub struct FisheryMdp {
    /// Maximum population the lake supports; also the state count minus 1.
    pub capacity: usize,
    pub discount: f64,
    pub growth_rates: [f64; 4],
    pub probabilities: [f64; 4],
}

impl Default for FisheryMdp {
    fn default() -> Self {
        Self {
            capacity: 100,
            discount: 0.9,
            growth_rates: [1.0, 1.25, 1.5, 1.75],
            probabilities: [0.2, 0.3, 0.3, 0.2],
        }
    }
}

/// Converged utilities and the optimal catch per population state.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub utilities: Vec<f64>,
    pub catches: Vec<usize>,
    pub iterations: usize,
}

impl FisheryMdp {
    /// Population after regrowth: rounded half-up, capped at capacity.
    fn next_state(&self, remaining: usize, rate: f64) -> usize {
        let grown = (remaining as f64 * rate + 0.5).floor() as usize;
        grown.min(self.capacity)
    }

    /// Expected discounted utility of leaving `remaining` fish in the lake.
    fn expected_utility(&self, remaining: usize, utilities: &[f64]) -> f64 {
        self.growth_rates
            .iter()
            .zip(&self.probabilities)
            .map(|(&rate, &p)| p * utilities[self.next_state(remaining, rate)])
            .sum()
    }

    /// Runs value iteration until the summed utility increase over all
    /// states drops below `epsilon`. Utilities start at zero and only ever
    /// grow, so the signed sum is a valid convergence measure.
    pub fn value_iteration(&self, epsilon: f64) -> Policy {
        let states = self.capacity + 1;
        let mut utilities = vec![0.0; states];
        let mut catches = vec![0usize; states];
        let mut iterations = 0;

        loop {
            iterations += 1;
            let mut next_utilities = vec![0.0; states];
            let mut next_catches = vec![0usize; states];
            for state in 0..states {
                let mut best_utility = 0.0;
                let mut best_catch = 0;
                for caught in 0..=state {
                    let utility = caught as f64
                        + self.discount * self.expected_utility(state - caught, &utilities);
                    if utility > best_utility {
                        best_utility = utility;
                        best_catch = caught;
                    }
                }
                next_utilities[state] = best_utility;
                next_catches[state] = best_catch;
            }

            let total_increase: f64 = next_utilities
                .iter()
                .zip(&utilities)
                .map(|(next, current)| next - current)
                .sum();
            utilities = next_utilities;
            catches = next_catches;
            if total_increase < epsilon {
                break;
            }
        }

        info!("Value iteration converged after {iterations} iterations");
        Policy {
            utilities,
            catches,
            iterations,
        }
    }
}
