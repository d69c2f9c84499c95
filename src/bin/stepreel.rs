use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

/// Encode the frames listed in `<DIR>/frames.json` into `<DIR>/out.mkv` (requires `ffmpeg` on PATH).
#[derive(Parser, Debug)]
#[command(name = "stepreel", version)]
struct Cli {
    /// Working directory holding `frames.json`; `concatfile` and `out.mkv` are written here.
    #[arg(default_value = stepreel::DEFAULT_WORK_DIR)]
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let report = stepreel::convert_dir(&cli.dir)
        .with_context(|| format!("convert frames in '{}'", cli.dir.display()))?;

    tracing::info!(frames = report.frames, "conversion finished");
    eprintln!("wrote {}", report.out_path.display());
    Ok(())
}
