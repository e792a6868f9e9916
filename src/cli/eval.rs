//! CLI `eval` command: score the gate against a labeled example set.
//!
//! Runs against an empty in-memory store, so the novelty stage never fires and the
//! numbers reflect the length filter and importance gap alone.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

use fastmemory::config::FastMemoryConfig;
use fastmemory::embedding::{self, EmbeddingProvider};
use fastmemory::{GateDecision, MemoryStore};

use super::eval_sets::{LabeledExample, EXPANDED_EXAMPLES, TUNING_EXAMPLES};

/// Confusion-matrix counts for a binary classifier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Confusion {
    pub true_pos: usize,
    pub false_pos: usize,
    pub true_neg: usize,
    pub false_neg: usize,
}

impl Confusion {
    pub fn record(&mut self, expected: bool, predicted: bool) {
        match (expected, predicted) {
            (true, true) => self.true_pos += 1,
            (false, true) => self.false_pos += 1,
            (false, false) => self.true_neg += 1,
            (true, false) => self.false_neg += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_pos + self.false_pos + self.true_neg + self.false_neg
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_pos + self.true_neg, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_pos, self.true_pos + self.false_pos)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_pos, self.true_pos + self.false_neg)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Overall and per-category tallies, plus every misclassified example.
#[derive(Debug, Default)]
pub struct EvalReport {
    pub overall: Confusion,
    pub by_category: BTreeMap<&'static str, Confusion>,
    pub false_negatives: Vec<(LabeledExample, GateDecision)>,
    pub false_positives: Vec<(LabeledExample, GateDecision)>,
}

impl EvalReport {
    pub fn record(&mut self, example: LabeledExample, decision: GateDecision) {
        let expected = example.should_memorize;
        let predicted = decision.is_accept();
        self.overall.record(expected, predicted);
        self.by_category
            .entry(example.category)
            .or_default()
            .record(expected, predicted);

        match (expected, predicted) {
            (true, false) => self.false_negatives.push((example, decision)),
            (false, true) => self.false_positives.push((example, decision)),
            _ => {}
        }
    }

    fn print(&self) {
        let c = &self.overall;
        println!(
            "  Examples:   {} ({} positive, {} negative)",
            c.total(),
            c.true_pos + c.false_neg,
            c.true_neg + c.false_pos
        );
        println!("  Accuracy:   {:.3}", c.accuracy());
        println!("  Precision:  {:.3}", c.precision());
        println!("  Recall:     {:.3}", c.recall());
        println!("  F1:         {:.3}", c.f1());
        println!(
            "  TP: {}  FP: {}  TN: {}  FN: {}",
            c.true_pos, c.false_pos, c.true_neg, c.false_neg
        );

        if self.by_category.len() > 1 {
            println!();
            println!(
                "  {:<20} {:>5} {:>4} {:>4} {:>4} {:>4} {:>7}",
                "Category", "Total", "TP", "FP", "TN", "FN", "Acc"
            );
            println!("  {}", "-".repeat(54));
            for (category, c) in &self.by_category {
                println!(
                    "  {:<20} {:>5} {:>4} {:>4} {:>4} {:>4} {:>6.1}%",
                    category,
                    c.total(),
                    c.true_pos,
                    c.false_pos,
                    c.true_neg,
                    c.false_neg,
                    c.accuracy() * 100.0
                );
            }
        }

        print_misses("False negatives (should store, gate skipped)", &self.false_negatives);
        print_misses("False positives (should skip, gate stored)", &self.false_positives);
    }
}

fn print_misses(title: &str, misses: &[(LabeledExample, GateDecision)]) {
    if misses.is_empty() {
        return;
    }
    println!();
    println!("{title}:");
    for (example, decision) in misses {
        println!("  [{}] {}", example.category, example.content);
        println!("      {decision}");
    }
}

pub async fn eval(config: &FastMemoryConfig, expanded: bool) -> Result<()> {
    let embedding_config = config.embedding.clone();
    let provider = tokio::task::spawn_blocking(move || embedding::create_provider(&embedding_config))
        .await
        .context("provider initialization task failed")??;
    let provider: Arc<dyn EmbeddingProvider> = Arc::from(provider);

    let store = MemoryStore::open_in_memory(provider, config.retrieval.clone())?;
    let gate = store.gate(config.gate).await?;

    let (name, examples) = if expanded {
        ("expanded", EXPANDED_EXAMPLES)
    } else {
        ("tuning", TUNING_EXAMPLES)
    };

    let mut report = EvalReport::default();
    for example in examples {
        let decision = gate.evaluate(example.content).await?;
        report.record(*example, decision);
    }
    store.close().await?;

    println!(
        "Gate evaluation on the {name} set (gap >= {}, novelty < {})",
        config.gate.gap_threshold, config.gate.novelty_threshold
    );
    println!("{}", "=".repeat(40));
    report.print();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confusion_metrics() {
        let mut c = Confusion::default();
        c.record(true, true);
        c.record(true, true);
        c.record(true, false);
        c.record(false, true);
        c.record(false, false);

        assert_eq!(c.total(), 5);
        assert!((c.accuracy() - 0.6).abs() < 1e-9);
        assert!((c.precision() - 2.0 / 3.0).abs() < 1e-9);
        assert!((c.recall() - 2.0 / 3.0).abs() < 1e-9);
        assert!((c.f1() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_confusion_is_all_zero() {
        let c = Confusion::default();
        assert_eq!(c.accuracy(), 0.0);
        assert_eq!(c.f1(), 0.0);
    }

    fn example(content: &'static str, should_memorize: bool, category: &'static str) -> LabeledExample {
        LabeledExample {
            content,
            should_memorize,
            category,
        }
    }

    #[test]
    fn report_tallies_per_category() {
        let accept = GateDecision::Accept { gap: 0.05 };
        let skip = GateDecision::NotImportant { gap: -0.02 };

        let mut report = EvalReport::default();
        report.record(example("User prefers tabs", true, "preference"), accept.clone());
        report.record(example("User prefers spaces", true, "preference"), skip.clone());
        report.record(example("Haha yeah", false, "chitchat"), skip.clone());
        report.record(example("LOL nice", false, "chitchat"), accept.clone());
        report.record(example("Cool weather", false, "chitchat"), skip);
        report.record(example("Never log secrets", true, "security"), accept);

        assert_eq!(report.overall.total(), 6);
        assert_eq!(report.by_category.len(), 3);
        assert_eq!(
            report.by_category["preference"],
            Confusion { true_pos: 1, false_pos: 0, true_neg: 0, false_neg: 1 }
        );
        assert_eq!(
            report.by_category["chitchat"],
            Confusion { true_pos: 0, false_pos: 1, true_neg: 2, false_neg: 0 }
        );
        assert!((report.by_category["chitchat"].accuracy() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.by_category["security"].true_pos, 1);

        // Categories iterate in name order
        let names: Vec<&str> = report.by_category.keys().copied().collect();
        assert_eq!(names, vec!["chitchat", "preference", "security"]);

        assert_eq!(report.false_negatives.len(), 1);
        assert_eq!(report.false_negatives[0].0.category, "preference");
        assert_eq!(report.false_negatives[0].0.content, "User prefers spaces");
        assert_eq!(report.false_positives.len(), 1);
        assert_eq!(report.false_positives[0].0.content, "LOL nice");
    }
}
