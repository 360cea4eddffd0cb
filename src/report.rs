use crate::normalize::Outcome;

pub fn print_report(outcome: &Outcome) {
    print_field("Valid Values", outcome.stats.count);
    print_field("Minimal Value", outcome.stats.extrema.min);
    print_field("Maximal Value", outcome.stats.extrema.max);
    print_field("Normalizing Range", outcome.stats.operative);
    print_outliers(outcome);
}

fn print_field(name: &str, value: impl std::fmt::Display) {
    println!("{name:20}: {value}");
}

fn print_outliers(outcome: &Outcome) {
    println!(
        "{:20}: {} {} ({} below, {} above)",
        "Outliers",
        outcome.policy,
        outcome.summary.outliers(),
        outcome.summary.below,
        outcome.summary.above
    );
}
