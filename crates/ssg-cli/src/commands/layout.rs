use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use ssg_grid::GridLayout;

use crate::batch::load_batch;

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Batch file (YAML or JSON) holding the quantization and trajectories.
    #[arg(long)]
    pub input: PathBuf,
    /// Output path for the JSON layout; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn build_layout(args: &LayoutArgs) -> Result<GridLayout, Box<dyn Error>> {
    let batch = load_batch(&args.input)?;
    Ok(batch.grid()?.layout()?)
}

pub fn run(args: &LayoutArgs) -> Result<(), Box<dyn Error>> {
    let layout = build_layout(args)?;
    super::write_output(&layout, args.out.as_deref())
}
