mod classify;
mod driver;
mod gazetteer;
mod normalize;
mod period;
mod resolver;
mod subject;

use std::path::PathBuf;

use clap::Parser;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(
    name = "location_extract",
    about = "Structured location/event extraction from activity transcripts"
)]
struct Cli {
    /// Process a single file by name (must end in _from_pdf.txt or _from_txt.txt)
    #[arg(long)]
    file: Option<String>,

    /// Directory containing input files
    #[arg(long, default_value = "inputs")]
    input_dir: PathBuf,

    /// Print per-file progress diagnostics
    #[arg(long)]
    validate: bool,

    /// Additionally write matched records as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

const INPUT_SUFFIXES: [&str; 2] = ["_from_pdf.txt", "_from_txt.txt"];

fn main() {
    let cli = Cli::parse();

    if !cli.input_dir.exists() {
        eprintln!("Input directory '{}' not found", cli.input_dir.display());
        std::process::exit(1);
    }

    let files = match &cli.file {
        Some(name) => single_file(&cli, name),
        None => scan_input_dir(&cli),
    };

    let config = subject::SubjectConfig::new();
    let mut header_printed = false;
    let mut matched: Vec<driver::Record> = Vec::new();

    for path in &files {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let Some(subject_name) = subject::extract_subject_name(file_name) else {
            eprintln!("Could not extract subject name from {file_name}");
            continue;
        };

        let classifier = classify::Classifier::new(config.home_country(subject_name));
        let outcomes = match driver::process_file(path, subject_name, &classifier) {
            Ok(outcomes) => outcomes,
            Err(e) => {
                eprintln!("Cannot read {}: {e}", path.display());
                continue;
            }
        };

        for outcome in outcomes {
            match outcome {
                driver::LineOutcome::Matched(record) => {
                    if !header_printed {
                        println!("{}", driver::HEADER);
                        header_printed = true;
                    }
                    println!("{}", record.pipe_line());
                    matched.push(*record);
                }
                driver::LineOutcome::NoMatch(line) => println!("NOMATCH - {line}"),
            }
        }
    }

    if let Some(json_path) = &cli.json {
        let json = serde_json::to_string_pretty(&matched).expect("JSON serialization failed");
        std::fs::write(json_path, &json)
            .unwrap_or_else(|e| panic!("cannot write {}: {e}", json_path.display()));
        eprintln!("  {} ({} bytes)", json_path.display(), json.len());
    }
}

fn single_file(cli: &Cli, name: &str) -> Vec<PathBuf> {
    let path = cli.input_dir.join(name);
    if !path.exists() {
        eprintln!("File '{}' not found in {}", name, cli.input_dir.display());
        std::process::exit(1);
    }
    if !INPUT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        eprintln!("File '{name}' does not match required pattern (_from_pdf.txt or _from_txt.txt)");
        std::process::exit(1);
    }
    if cli.validate {
        eprintln!("Processing single file: {name}");
    }
    vec![path]
}

fn scan_input_dir(cli: &Cli) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(&cli.input_dir)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !INPUT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            continue;
        }
        // "cases *" files and OLDER revisions are earlier drafts of the
        // same transcripts
        if name.to_lowercase().starts_with("cases ") || name.contains("OLDER") {
            if cli.validate {
                eprintln!("Skipping cases or OLDER file: {name}");
            }
            continue;
        }
        if cli.validate {
            eprintln!("Processing {name}...");
        }
        files.push(entry.into_path());
    }
    files
}
