pub mod generate;
pub mod score;

use seedmander::PlanScore;

/// Print a score summary and per-district table to stdout.
pub(crate) fn print_score(score: &PlanScore) {
    let s = &score.summary;
    println!(
        "Plan: n_districts={} pop_target={:.1} pop_max_dev={:.4} pop_mean_dev={:.4} pp_mean={:.4} pp_min={:.4}",
        s.n_districts, s.pop_target, s.pop_max_dev, s.pop_mean_dev, s.pp_mean, s.pp_min
    );
    println!("{:>8} {:>12} {:>8}", "district", "pop", "pp");
    for row in &score.districts {
        println!("{:>8} {:>12} {:>8.4}", row.district, row.pop, row.pp);
    }
}
