use anyhow::{Context, Result, ensure};
use clap::Parser;
use course_timetabler::hmm::{self, LetterHmm};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Trains a letter HMM from paired word lists and Viterbi-decodes the
/// held-out noisy words.
#[derive(Parser)]
struct Args {
    /// File with one ground-truth word per line.
    truth_file: PathBuf,
    /// File with the matching noisy reader output, one word per line.
    noisy_file: PathBuf,
    /// Number of leading pairs used for training; the rest are decoded.
    #[arg(long, default_value_t = 50_000)]
    train: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let truth = read_words(&args.truth_file)?;
    let noisy = read_words(&args.noisy_file)?;
    ensure!(
        truth.len() == noisy.len(),
        "word lists differ in length: {} vs {}",
        truth.len(),
        noisy.len()
    );

    let split = args.train.min(truth.len());
    let model = LetterHmm::train(
        truth[..split]
            .iter()
            .map(String::as_str)
            .zip(noisy[..split].iter().map(String::as_str)),
    );
    info!(
        "Decoding {} held-out words after training on {}",
        truth.len() - split,
        split
    );

    let mut corrected = 0;
    for (actual, observed) in truth[split..].iter().zip(&noisy[split..]) {
        let decoded = model.decode(observed);
        if *observed != decoded {
            println!("Original Word: {actual}, OCR Output: {observed}, Estimated Word: {decoded}");
        }
        corrected += hmm::corrected_letters(actual, observed, &decoded);
    }
    println!(
        "Number of corrected letters where OCR output is wrong but estimation is correct: {corrected}"
    );
    Ok(())
}

fn read_words(path: &Path) -> Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}
