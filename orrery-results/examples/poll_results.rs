use orrery_results::{DetailedResultsTracker, InteractiveKind, InteractiveRecord, ResultOption};

fn category_option(text: &str, category: &str) -> ResultOption {
    let mut option = ResultOption::new(text);
    option.results_category = Some(category.to_string());
    option
}

fn poll_record(id: &str, option: ResultOption) -> InteractiveRecord {
    InteractiveRecord {
        interactive_id: id.to_string(),
        kind: InteractiveKind::Poll,
        option: Some(option),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Detailed Poll Results Example ===\n");

    let mut tracker = DetailedResultsTracker::try_new(vec![
        category_option("You are a morning person", "morning"),
        category_option("You are a night owl", "night"),
    ])?;
    println!("strategy: {:?}", tracker.strategy());

    // Results arrive one interactive component at a time
    let relaid = tracker.update(&[poll_record(
        "page-1-poll",
        category_option("You are a morning person", "morning"),
    )])?;
    println!("\nafter first poll (relayout: {}):", relaid);
    for (id, placement) in tracker.placements() {
        println!(
            "  {} → size {:.2}, top {:.2}, left {:.2}",
            id, placement.size, placement.top, placement.left
        );
    }

    let relaid = tracker.update(&[
        poll_record("page-2-poll", category_option("You are a night owl", "night")),
        poll_record(
            "page-3-poll",
            category_option("You are a morning person", "morning"),
        ),
    ])?;
    println!("\nafter three polls (relayout: {}):", relaid);
    for (id, placement) in tracker.placements() {
        println!(
            "  {} → size {:.2}, top {:.2}, left {:.2}",
            id, placement.size, placement.top, placement.left
        );
    }

    if let Some(winner) = tracker.winning_option() {
        println!("\nwinning category: {}", winner.text);
    }

    Ok(())
}
