// Colored terminal output for model plans.
//
// The main.rs subcommands delegate here for anything printed to the user.

use colored::Colorize;

use super::name_list;
use crate::constructor::ModelPlan;
use crate::model::{RegularizerKind, RegularizerSpec, ScoreKind, ScoreSpec};
use crate::topics::TopicGroups;
use crate::vocab::ModalityWeights;

const LIST_WIDTH: usize = 100;

/// Display resolved topic names for both groups.
pub fn display_topics(topics: &TopicGroups) {
    println!(
        "  {:<12} {:>3}  {}",
        "Specific".bold(),
        topics.n_specific(),
        name_list(&topics.specific, LIST_WIDTH)
    );
    let background = name_list(&topics.background, LIST_WIDTH);
    let background = if topics.has_background() {
        background.normal()
    } else {
        background.dimmed()
    };
    println!(
        "  {:<12} {:>3}  {}",
        "Background".bold(),
        topics.n_background(),
        background
    );
}

/// Display per-modality token counts alongside the derived absolute weights.
pub fn display_weights(vocab_sizes: &ModalityWeights, weights: &ModalityWeights, main_modality: &str) {
    println!(
        "  {:<20} {:>12}  {:>10}",
        "Modality".dimmed(),
        "Tokens".dimmed(),
        "Weight".dimmed()
    );
    println!("  {}", "-".repeat(46).dimmed());

    for (modality, weight) in weights {
        let tokens = vocab_sizes.get(modality).copied().unwrap_or(0.0);
        let label = if modality == main_modality {
            format!("{modality} *").bright_green().to_string()
        } else {
            modality.clone()
        };
        println!("  {:<20} {:>12.0}  {:>10.4}", label, tokens, weight);
    }
}

/// Display a whole plan: settings, topics, weights, regularizers, scores.
pub fn display_plan(plan: &ModelPlan) {
    println!(
        "\n{}",
        format!("=== Model {} ===", plan.model_id.trim_matches('#')).bold()
    );
    println!();

    let seed = plan
        .settings
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "random".to_string());
    println!(
        "  Processors: {}   Seed: {}   Theta columns: {:?}",
        plan.settings.num_processors, seed, plan.settings.theta_columns_naming
    );
    println!();

    display_topics(&plan.topics);
    println!();

    display_weights(&plan.vocab_sizes, &plan.settings.class_ids, &plan.main_modality);
    println!();

    println!("  {} ({})", "Regularizers".bold(), plan.regularizers.len());
    if plan.regularizers.is_empty() {
        println!("    {}", "none (no background topics)".dimmed());
    }
    for regularizer in &plan.regularizers {
        println!("    {}", describe_regularizer(regularizer));
    }
    println!();

    println!("  {} ({})", "Scores".bold(), plan.scores.len());
    for score in &plan.scores {
        println!("    {}", describe_score(score));
    }
    println!();
}

/// One-line description of a score.
pub fn describe_score(score: &ScoreSpec) -> String {
    let detail = match &score.kind {
        ScoreKind::Perplexity { class_ids } => format!("perplexity over {}", class_ids.join(", ")),
        ScoreKind::SparsityTheta => "theta sparsity".to_string(),
        ScoreKind::SparsityPhi { class_id } => format!("phi sparsity for {class_id}"),
        ScoreKind::TopicKernel {
            class_id,
            probability_mass_threshold,
        } => format!("topic kernel for {class_id} (threshold {probability_mass_threshold})"),
    };
    format!("{:<32} {}", score.name, detail.dimmed())
}

/// One-line description of a regularizer.
pub fn describe_regularizer(regularizer: &RegularizerSpec) -> String {
    let target = match &regularizer.kind {
        RegularizerKind::SmoothSparsePhi { class_ids } => format!("phi [{}]", class_ids.join(", ")),
        RegularizerKind::SmoothSparseTheta => "theta [all modalities]".to_string(),
    };
    format!(
        "{:<20} {} tau={} topics={}",
        regularizer.name,
        target,
        regularizer.tau,
        regularizer.topic_names.len()
    )
}
