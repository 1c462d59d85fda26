use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::config::Settings;
use crate::import::BillCsv;
use crate::selector::select_within_budget;
use crate::store::BillStore;
use crate::ui::util::{format_amount, format_bill_amount};

pub(crate) fn as_cli(args: &[String], settings: &Settings) -> Result<()> {
    match args[1].as_str() {
        "open" => cli_open(&args[2..], settings),
        "optimize" | "o" => cli_optimize(&args[2..], settings),
        "summary" | "s" => cli_summary(&args[2..], settings),
        "categories" => cli_categories(&args[2..], settings),
        "list" | "ls" => cli_list(&args[2..], settings),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("billtrack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Billtrack: track bills and pick the ones that fit your monthly budget");
    println!();
    println!("Usage: billtrack [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI with sample bills");
    println!("  open <file.csv>               Launch TUI with bills loaded from CSV");
    println!("  optimize [file.csv]           Pick the cheapest bills that fit the budget");
    println!("    --budget <amount>           Budget to fill (default: settings)");
    println!("    --category <name>           Only consider one category");
    println!("    --csv                       Write the selected bills as CSV");
    println!("  summary [file.csv]            Totals per category");
    println!("    --category <name>           Only summarize one category");
    println!("  categories [file.csv]         List distinct categories");
    println!("  list [file.csv]               List bills");
    println!("    --category <name>           Only list one category");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

/// Flags shared by the non-interactive commands.
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    file: Option<String>,
    budget: Option<Decimal>,
    category: Option<String>,
    csv: bool,
}

impl CliOptions {
    fn parse(args: &[String]) -> Result<Self> {
        let mut opts = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--budget" => {
                    let raw = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--budget needs an amount"))?;
                    let budget = Decimal::from_str(raw.trim())
                        .with_context(|| format!("Invalid budget: {raw}"))?;
                    opts.budget = Some(budget);
                }
                "--category" => {
                    let name = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--category needs a name"))?;
                    opts.category = Some(name.clone());
                }
                "--csv" => opts.csv = true,
                flag if flag.starts_with("--") => anyhow::bail!("Unknown flag: {flag}"),
                path => {
                    if opts.file.is_some() {
                        anyhow::bail!("Only one input file may be given");
                    }
                    opts.file = Some(shellexpand(path));
                }
            }
        }
        Ok(opts)
    }

    /// Bills from the given CSV file, or the sample bills.
    fn load_store(&self, settings: &Settings) -> Result<BillStore> {
        let budget = self.budget.unwrap_or(settings.monthly_budget);
        let mut store = match &self.file {
            Some(file) => BillStore::new(load_bills(file)?, budget),
            None => BillStore::with_sample_bills(budget),
        };
        if let Some(category) = &self.category {
            if !store.categories().contains(&category.as_str()) {
                anyhow::bail!(
                    "Unknown category '{category}'. Categories: {}",
                    store.categories().join(", ")
                );
            }
            store.set_selected_category(Some(category.clone()));
        }
        Ok(store)
    }
}

fn load_bills(file_path: &str) -> Result<Vec<crate::models::Bill>> {
    let path = Path::new(file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }
    BillCsv::load(path)
}

fn cli_open(args: &[String], settings: &Settings) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: billtrack open <file.csv>");
    };
    let bills = load_bills(&shellexpand(file_path))?;
    super::as_tui(BillStore::new(bills, settings.monthly_budget), settings)
}

fn cli_optimize(args: &[String], settings: &Settings) -> Result<()> {
    let opts = CliOptions::parse(args)?;
    let store = opts.load_store(settings)?;
    let bills: Vec<_> = store.filtered_bills().into_iter().cloned().collect();
    let budget = store.monthly_budget();
    let selection = select_within_budget(&bills, budget);

    tracing::info!(
        considered = bills.len(),
        selected = selection.len(),
        total = %selection.total,
        %budget,
        "cli optimize"
    );

    if opts.csv {
        let stdout = std::io::stdout();
        return BillCsv::write(stdout.lock(), &selection.bills);
    }

    let symbol = &settings.currency_symbol;
    println!(
        "Optimal bills for a budget of {}",
        format_amount(budget, symbol)
    );
    println!("{}", "─".repeat(60));
    if selection.is_empty() {
        println!("  No bills fit within the budget");
    }
    for bill in &selection.bills {
        println!(
            "  {:<28} {:<16} {:>14}",
            bill.description,
            bill.category,
            format_bill_amount(bill, symbol)
        );
    }
    println!("{}", "─".repeat(60));
    println!(
        "  Selected:   {} of {} bills",
        selection.len(),
        bills.len()
    );
    println!("  Total:      {}", format_amount(selection.total, symbol));
    println!(
        "  Remaining:  {}",
        format_amount(selection.remaining(budget), symbol)
    );
    if selection.rejected_malformed > 0 {
        println!(
            "  Skipped {} bill{} with invalid amounts",
            selection.rejected_malformed,
            if selection.rejected_malformed == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

fn cli_summary(args: &[String], settings: &Settings) -> Result<()> {
    let opts = CliOptions::parse(args)?;
    let store = opts.load_store(settings)?;
    let symbol = &settings.currency_symbol;

    println!("Billtrack summary");
    println!("{}", "─".repeat(50));
    for (name, count, total) in store.category_totals() {
        if store
            .selected_category()
            .is_some_and(|selected| selected != name)
        {
            continue;
        }
        println!(
            "  {name:<24} {count:>4} bills {:>16}",
            format_amount(total, symbol)
        );
    }
    println!("{}", "─".repeat(50));
    println!(
        "  Total:          {}",
        format_amount(store.total_amount(), symbol)
    );
    println!(
        "  Monthly budget: {}",
        format_amount(store.monthly_budget(), symbol)
    );
    Ok(())
}

fn cli_categories(args: &[String], settings: &Settings) -> Result<()> {
    let opts = CliOptions::parse(args)?;
    let store = opts.load_store(settings)?;
    let categories = store.categories();
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }
    for category in categories {
        println!("{category}");
    }
    Ok(())
}

fn cli_list(args: &[String], settings: &Settings) -> Result<()> {
    let opts = CliOptions::parse(args)?;
    let store = opts.load_store(settings)?;
    let bills = store.filtered_bills();
    if bills.is_empty() {
        println!("No bills");
        return Ok(());
    }

    println!(
        "{:<14} {:<28} {:<16} {:>14}  Date",
        "ID", "Description", "Category", "Amount"
    );
    println!("{}", "─".repeat(88));
    for bill in bills {
        println!(
            "{:<14} {:<28} {:<16} {:>14}  {}",
            bill.id,
            bill.description,
            bill.category,
            format_bill_amount(bill, &settings.currency_symbol),
            bill.date,
        );
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags_and_file() {
        let opts = CliOptions::parse(&args(&[
            "bills.csv",
            "--budget",
            "1000",
            "--category",
            "Food",
            "--csv",
        ]))
        .unwrap();
        assert_eq!(opts.file.as_deref(), Some("bills.csv"));
        assert_eq!(opts.budget, Some(dec!(1000)));
        assert_eq!(opts.category.as_deref(), Some("Food"));
        assert!(opts.csv);
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(CliOptions::parse(&[]).unwrap(), CliOptions::default());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(CliOptions::parse(&args(&["--budget"])).is_err());
        assert!(CliOptions::parse(&args(&["--budget", "lots"])).is_err());
        assert!(CliOptions::parse(&args(&["--verbose"])).is_err());
        assert!(CliOptions::parse(&args(&["a.csv", "b.csv"])).is_err());
    }

    #[test]
    fn test_load_store_uses_sample_bills_and_budget_override() {
        let opts = CliOptions::parse(&args(&["--budget", "500"])).unwrap();
        let store = opts.load_store(&Settings::default()).unwrap();
        assert_eq!(store.len(), 7);
        assert_eq!(store.monthly_budget(), dec!(500));
    }

    #[test]
    fn test_load_store_unknown_category() {
        let opts = CliOptions::parse(&args(&["--category", "Nope"])).unwrap();
        assert!(opts.load_store(&Settings::default()).is_err());
    }

    #[test]
    fn test_load_store_missing_file() {
        let opts = CliOptions::parse(&args(&["/no/such/bills.csv"])).unwrap();
        assert!(opts.load_store(&Settings::default()).is_err());
    }

    #[test]
    fn test_shellexpand_plain_path() {
        assert_eq!(shellexpand("bills.csv"), "bills.csv");
    }
}
