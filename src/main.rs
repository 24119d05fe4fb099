//! rpress – command-line resume → PDF exporter.
//!
//! Usage:
//!   rpress <resume.json> [output.pdf] [--title "My Resume"] [--plan]
//!
//! If `output.pdf` is omitted the PDF is written next to the input file with
//! the same stem (e.g. `cv.json` → `cv.pdf`). With `--plan` the paginated
//! layout plan is printed as JSON instead of writing a PDF.

use std::{env, fs, path::PathBuf, process};

use resume_press::pipeline::{export_pdf, preview_plan, PressConfig};
use resume_press::Resume;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut title: Option<String> = None;
    let mut plan_only = false;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1).peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--plan" | "-p" => plan_only = true,
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => title = Some("Resume".to_string()),
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
            eprintln!("Error: no input file specified.");
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

    let resume = match Resume::from_json(&json) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error parsing '{}': {e}", input.display());
            process::exit(1);
        }
    };

    // Default title: stem of the input filename.
    let default_title = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resume")
        .to_string();

    let config = PressConfig {
        title: title.unwrap_or(default_title),
        ..PressConfig::default()
    };

    if plan_only {
        match preview_plan(&resume, &config) {
            Ok(plan) => println!("{}", plan.to_json()),
            Err(e) => {
                eprintln!("Error laying out resume: {e}");
                process::exit(1);
            }
        }
        return;
    }

    match export_pdf(&resume, &config) {
        Ok(bytes) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(&output, &bytes) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            eprintln!("Wrote '{}' ({} bytes)", output.display(), bytes.len());
        }
        Err(e) => {
            eprintln!("Error exporting PDF: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("rpress – resume JSON to PDF exporter (resume-press)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <resume.json> [output.pdf] [--title \"My Resume\"] [--plan]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <resume.json>  Resume document to lay out");
    eprintln!("  [output.pdf]   Output path  (default: same stem as input with .pdf)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --title, -t    Document title in PDF metadata (default: input filename stem)");
    eprintln!("  --plan, -p     Print the paginated layout plan as JSON instead of a PDF");
    eprintln!("  --help         Print this message");
}
