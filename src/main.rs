use anyhow::{Context, Result};
use clap::Parser;
use course_timetabler::{io, solver};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Enumerates every valid course timetable for a problem directory.
#[derive(Parser)]
struct Args {
    /// Directory containing courses.csv, classrooms.csv, preferences.csv
    /// and coordinations.csv.
    input_dir: PathBuf,
    /// Destination directory for the numbered solution files.
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let input = io::load_input(&args.input_dir)?;
    let solutions = solver::enumerate_schedules(&input);

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;
    io::write_solutions(&args.output_dir, &input, &solutions)?;
    io::write_summary(&args.output_dir, &input, solutions.len())?;

    info!(
        "Wrote {} solution files to {}",
        solutions.len(),
        args.output_dir.display()
    );
    Ok(())
}
