use clap::Parser;
use course_timetabler::mdp::FisheryMdp;

/// Solves the fishing-village MDP by value iteration and prints the
/// optimal catch per population state.
#[derive(Parser)]
struct Args {
    /// Maximum fish population the lake supports.
    #[arg(long, default_value_t = 100)]
    capacity: usize,
    /// Discount factor applied to future seasons.
    #[arg(long, default_value_t = 0.9)]
    discount: f64,
    /// Convergence threshold on the summed utility increase.
    #[arg(long, default_value_t = 1e-6)]
    epsilon: f64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mdp = FisheryMdp {
        capacity: args.capacity,
        discount: args.discount,
        ..FisheryMdp::default()
    };
    let policy = mdp.value_iteration(args.epsilon);

    println!("OPTIMAL POLICIES FOR EACH STATE:");
    for (state, (caught, utility)) in policy.catches.iter().zip(&policy.utilities).enumerate() {
        println!("\tState {state}: Catch {caught} fish (utility {utility:.6})");
    }
}
