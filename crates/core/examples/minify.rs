use std::{fs, path::PathBuf};

use clap::Parser;
use jsmin_sourcemap::{MinifyConfig, minify};

#[derive(Parser, Debug)]
#[command(name = "minify")]
#[command(about = "Minify JavaScript and write a sourcemap for the result", long_about = None)]
struct Args {
    /// Path to the JavaScript file to minify
    input: PathBuf,

    /// Output path for minified code (defaults to stdout)
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Output path for the sourcemap (defaults to <out>.map if --out is provided)
    #[arg(long)]
    out_sourcemap: Option<PathBuf>,

    /// Name recorded as the sourcemap source (defaults to the input file name)
    #[arg(long)]
    input_filename: Option<String>,

    /// sourceRoot recorded in the sourcemap
    #[arg(long)]
    source_root: Option<String>,

    /// Log debug output to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(if args.verbose {
            "jsmin_sourcemap=debug"
        } else {
            "jsmin_sourcemap=warn"
        })
        .init();

    let source = fs::read_to_string(&args.input)?;

    let input_filename = match args.input_filename {
        Some(name) => name,
        None => args
            .input
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or("input file must have a valid filename")?
            .to_string(),
    };

    let mut config = MinifyConfig::new(input_filename);
    if let Some(out) = args.out.as_ref().and_then(|o| o.file_name()).and_then(|n| n.to_str()) {
        config = config.with_output_filename(out);
    }
    if let Some(root) = args.source_root {
        config = config.with_source_root(root);
    }

    let res = minify(&source, &config)?;

    let out_map_path = args.out_sourcemap.clone().or_else(|| {
        args.out
            .as_ref()
            .map(|out| PathBuf::from(format!("{}.map", out.display())))
    });
    if let Some(out_map_path) = out_map_path {
        fs::write(out_map_path, res.to_json()?)?;
    }

    match &args.out {
        None => {
            print!("{}", res.code());
        }
        Some(out) => {
            fs::write(out, res.code())?;
        }
    }

    Ok(())
}
