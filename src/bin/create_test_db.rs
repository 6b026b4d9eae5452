use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;

use finance_tracker::{
    AppState, BudgetConfig, CreateTransaction, DEFAULT_BUSY_TIMEOUT, open_db,
};

/// A utility for creating a test database for the REST API server of finance_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// The sample transactions as (amount, date, category, description).
const SAMPLE_TRANSACTIONS: [(f64, &str, &str, &str); 8] = [
    (84.20, "2024-03-02", "groceries", "Weekly shop"),
    (12.50, "2024-03-03", "entertainment", "Streaming subscription"),
    (143.99, "2024-03-05", "utilities", "Power bill"),
    (45.00, "2024-03-07", "transportation", "Fuel"),
    (96.75, "2024-03-09", "groceries", "Weekly shop"),
    (30.00, "2024-03-10", "other", "Birthday card and gift wrap"),
    (64.00, "2024-03-12", "entertainment", "Concert tickets"),
    (59.90, "2024-03-14", "utilities", "Internet"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = open_db(output_path, DEFAULT_BUSY_TIMEOUT)?;
    let state = AppState::new(connection, BudgetConfig::default())?;

    println!("Creating test transactions...");

    for (amount, date, category, description) in SAMPLE_TRANSACTIONS {
        state
            .transactions
            .create(CreateTransaction::new(amount, date, category, description))?;
    }

    println!("Success!");

    Ok(())
}
