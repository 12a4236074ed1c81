use anyhow::Result;

use placegrid_export::merge_csv_dir;

use crate::cli::MergeArgs;
use crate::output::OutputWriter;

pub fn execute(args: MergeArgs, output: &OutputWriter) -> Result<()> {
    let summary = merge_csv_dir(&args.input_dir, &args.output)?;
    output.success(format!(
        "Merged {} row(s) from {} file(s) into {}",
        summary.rows,
        summary.files,
        args.output.display()
    ));
    Ok(())
}
