//! popdf – command-line purchase-order PDF generator.
//!
//! Usage:
//!   popdf <order.json> [output.pdf] [--title "My Order"] [--layout out.json]
//!
//! The input is a serde-JSON `OrderDocument`. If `output.pdf` is omitted the
//! PDF is written next to the input file with the same stem (e.g.
//! `1A1000.json` -> `1A1000.pdf`).

use std::{env, fs, path::PathBuf, process};

use po_pdf::pipeline::generate_pdf;
use po_pdf::{EngineConfig, OrderDocument};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut layout_path: Option<PathBuf> = None;
    let mut title: Option<String> = None;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => {
                    eprintln!("--title requires a value");
                    process::exit(1);
                }
            },
            "--layout" => match iter.next() {
                Some(v) => layout_path = Some(PathBuf::from(v)),
                None => {
                    eprintln!("--layout requires a path");
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    let input = match input_path {
        Some(p) => p,
        None => {
            eprintln!("Error: no order file specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    // Default output: same directory + same stem as input, but with .pdf
    let output = output_path.unwrap_or_else(|| {
        let mut o = input.clone();
        o.set_extension("pdf");
        o
    });

    let json = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let order: OrderDocument = match serde_json::from_str(&json) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error parsing '{}': {e}", input.display());
            process::exit(1);
        }
    };

    let config = EngineConfig {
        title,
        ..EngineConfig::default()
    };

    let (bytes, list) = match generate_pdf(&order, &config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error generating PDF: {e}");
            process::exit(1);
        }
    };

    if let Some(layout_out) = &layout_path {
        if let Err(e) = fs::write(layout_out, list.to_json()) {
            eprintln!("Error writing '{}': {e}", layout_out.display());
            process::exit(1);
        }
    }

    if let Err(e) = fs::write(&output, &bytes) {
        eprintln!("Error writing '{}': {e}", output.display());
        process::exit(1);
    }
    let pages = list.page_count();
    eprintln!(
        "Wrote '{}' ({} bytes, {} page{})",
        output.display(),
        bytes.len(),
        pages,
        if pages == 1 { "" } else { "s" }
    );
}

fn print_usage(prog: &str) {
    eprintln!("popdf – purchase-order PDF generator (po-pdf)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <order.json> [output.pdf] [--title \"My Order\"] [--layout out.json]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <order.json>   Order document as JSON");
    eprintln!("  [output.pdf]   Output path  (default: same stem as input with .pdf)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --title, -t    Document title in PDF metadata (default: \"Purchase Order <po>\")");
    eprintln!("  --layout       Also dump the laid-out page buffers as JSON");
    eprintln!("  --help         Print this message");
}
