use std::{fs, path::PathBuf};

use clap::Parser;
use jsmin_sourcemap::{MinifyConfig, minify};

#[derive(Parser, Debug)]
#[command(name = "fixtures")]
#[command(about = "Create or validate fixture files", long_about = None)]
struct Args {
    /// Write fixtures instead of validating them
    #[arg(long, short)]
    write: bool,

    /// Path to the fixtures directory (defaults to "./fixtures")
    #[arg(long, default_value = "fixtures")]
    dir: PathBuf,
}

/// Splits `name.js` into `("name", "js")`, skipping files that are not fixture inputs.
fn split_input_name(filename: &str) -> Option<(&str, &str)> {
    if filename.contains(".out.") {
        return None;
    }
    filename
        .rsplit_once('.')
        .filter(|(_, extension)| *extension == "js")
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    // Read all files in the fixtures directory
    let mut input_files = Vec::new();
    for entry in fs::read_dir(&args.dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or("invalid filename")?;
        if split_input_name(filename).is_some() {
            input_files.push(path);
        }
    }

    input_files.sort();

    let mut mismatches = Vec::new();
    println!(
        "{} fixtures...",
        if args.write { "Creating" } else { "Validating" }
    );

    for input_path in &input_files {
        let filename = input_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or("invalid filename")?;
        let (basename, extension) = split_input_name(filename).ok_or("unsupported fixture")?;

        let out_name = format!("{basename}.out.{extension}");
        let out_path = args.dir.join(&out_name);
        let out_map_path = args.dir.join(format!("{out_name}.map"));

        let source = fs::read_to_string(input_path)?;
        let config = MinifyConfig::new(filename).with_output_filename(out_name.as_str());
        let res = minify(&source, &config)?;
        let map = res.to_json()?;

        if args.write {
            fs::write(&out_path, res.code())?;
            fs::write(&out_map_path, &map)?;
            println!(
                "  Created {} and {}",
                out_path.display(),
                out_map_path.display()
            );
            continue;
        }

        // Check code output
        if out_path.exists() {
            if res.code().as_bytes() != fs::read(&out_path)? {
                mismatches.push(format!("{filename}: code mismatch"));
            }
        } else {
            mismatches.push(format!(
                "{filename}: missing output file {}",
                out_path.display()
            ));
        }

        // Sourcemaps are optional in the checked-in corpus; compare them when present.
        if out_map_path.exists() && map.as_bytes() != fs::read(&out_map_path)? {
            mismatches.push(format!("{filename}: sourcemap mismatch"));
        }

        if !mismatches.iter().any(|m| m.starts_with(filename)) {
            println!("  ✓ {filename}");
        }
    }

    if !mismatches.is_empty() {
        eprintln!("\nValidation failed:");
        for mismatch in &mismatches {
            eprintln!("  ✗ {mismatch}");
        }
        return Err(format!("{} validation error(s)", mismatches.len()).into());
    }

    println!("Done: {} fixtures.", input_files.len());
    Ok(())
}
