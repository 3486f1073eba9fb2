// CLI harness: train the selected n-gram models on a plain-text corpus,
// then score and rank candidate sentences from a file.

use std::collections::HashMap;
use std::fs;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use kdam::tqdm;
use serde::Serialize;

use ngram_fluency::corpus::{Corpus, TxtReader};
use ngram_fluency::io::Save;
use ngram_fluency::lms::{
    KneserNeyModel, LanguageModel, LaplaceBigramModel, LaplaceUnigramModel, StupidBackoffModel,
};
use ngram_fluency::tokenize::{Tokenize, WhitespaceTokenizer};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Plain-text training corpus, one sentence per line.
    #[arg(long)]
    train_path: String,

    /// Candidate sentences to score, one per line.
    #[arg(long)]
    candidates_path: String,

    /// Which model to train: unigram, bigram, backoff, kneser-ney, or all.
    #[arg(long, default_value = "all")]
    model: String,

    /// Write per-model candidate scores to this JSON file.
    #[arg(long)]
    results_path: Option<String>,

    /// Dump each trained model to `<save_path>.<model-name>` (bincode).
    #[arg(long)]
    save_path: Option<String>,

    /// Use log-space arithmetic for the Stupid Backoff and Kneser-Ney
    /// backoff/interpolation terms instead of the legacy scoring
    /// arithmetic those models default to.
    #[arg(long, default_value_t = false)]
    strict_log_space: bool,
}

#[derive(Serialize)]
struct ScoreReport {
    candidates: Vec<String>,
    scores: HashMap<String, Vec<f64>>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let reader = TxtReader::open(&args.train_path)?;
    let mut sentences = Vec::new();
    for (_, sentence) in tqdm!(reader) {
        sentences.push(sentence);
    }
    let corpus = Corpus::new(sentences);
    println!("#(sentences): {}", corpus.len());

    let tokenizer = WhitespaceTokenizer::new();
    let candidates_raw = fs::read_to_string(&args.candidates_path)?;
    let candidates: Vec<(String, Vec<String>)> = candidates_raw
        .lines()
        .map(|line| (line.to_string(), tokenizer.tokenize(line)))
        .filter(|(_, tokens)| !tokens.is_empty())
        .collect();
    println!("#(candidates): {}", candidates.len());

    let models = build_models(&args, &corpus)?;

    let mut report = ScoreReport {
        candidates: candidates.iter().map(|(raw, _)| raw.clone()).collect(),
        scores: HashMap::new(),
    };

    for model in &models {
        let scores: Vec<f64> = candidates
            .iter()
            .map(|(_, tokens)| model.score(tokens))
            .collect();

        let mut ranked: Vec<(f64, &str)> = scores
            .iter()
            .zip(candidates.iter())
            .map(|(score, (raw, _))| (*score, raw.as_str()))
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        println!("{}:", model.name());
        for (score, raw) in &ranked {
            println!("  {:>14.6}  {}", score, raw);
        }

        report.scores.insert(model.name().to_string(), scores);
    }

    if let Some(path) = &args.results_path {
        fs::write(path, serde_json::to_string(&report)?)?;
        println!("Wrote results to {}", path);
    }

    Ok(())
}

fn build_models(args: &Args, corpus: &Corpus) -> Result<Vec<Box<dyn LanguageModel>>> {
    let compat = !args.strict_log_space;
    let wants = |name: &str| args.model == "all" || args.model == name;
    let mut models: Vec<Box<dyn LanguageModel>> = Vec::new();

    if wants("unigram") {
        let model = LaplaceUnigramModel::new(corpus);
        save_if_requested(&model, model.name(), args)?;
        models.push(Box::new(model));
    }
    if wants("bigram") {
        let model = LaplaceBigramModel::new(corpus);
        save_if_requested(&model, model.name(), args)?;
        models.push(Box::new(model));
    }
    if wants("backoff") {
        let model = StupidBackoffModel::with_compat(corpus, compat);
        save_if_requested(&model, model.name(), args)?;
        models.push(Box::new(model));
    }
    if wants("kneser-ney") {
        let model = KneserNeyModel::with_compat(corpus, compat);
        save_if_requested(&model, model.name(), args)?;
        models.push(Box::new(model));
    }

    if models.is_empty() {
        bail!("unknown model: {}", args.model);
    }
    Ok(models)
}

fn save_if_requested<M: Save>(model: &M, name: &str, args: &Args) -> Result<()> {
    if let Some(base) = &args.save_path {
        let path = format!("{}.{}", base, name);
        model
            .save(&path)
            .map_err(|e| anyhow!("saving {}: {}", path, e))?;
        println!("Saved {} to {}", name, path);
    }
    Ok(())
}
