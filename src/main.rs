use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use spendlog::{
    CategoryFilter, ExpenseRepository, ExpenseStore, JsonFileStorage, Latency,
    summary::{filter_expenses, sort_for_display, total, total_by_category},
};

/// Show the recorded expenses and a spending summary.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The directory the expense collection is stored in.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Skip the simulated network latency.
    #[arg(long)]
    fast: bool,

    /// Only list expenses in this category (e.g. `food`), or `all`.
    #[arg(long, default_value = "all")]
    category: CategoryFilter,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter::LevelFilter::INFO))
        .init();

    let args = Args::parse();

    let storage = JsonFileStorage::new(&args.data_dir);
    let latency = if args.fast {
        Latency::none()
    } else {
        Latency::default()
    };
    let repository = ExpenseRepository::with_latency(storage, latency);

    let store = ExpenseStore::open(repository).await;
    if let Some(error) = store.error() {
        eprintln!("{error}");
        return;
    }

    for expense in sort_for_display(filter_expenses(store.expenses(), &args.category)) {
        println!(
            "{}  {:<24} {:>10.2}  {}",
            expense.date, expense.title, expense.amount, expense.category
        );
    }

    println!();
    println!("Total spent: {:.2}", total(store.expenses()));
    for (category, amount) in total_by_category(store.expenses()) {
        println!("  {:<14} {:>10.2}", category.as_str(), amount);
    }
}
