use std::path::PathBuf;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::services::ExportFormat;
use crate::workflow::extract::{ExtractRequest, ExtractionOutcome, extract_from_file};

#[derive(Debug, Clone)]
pub struct ExtractCommandArgs {
    pub input: PathBuf,
    pub format: Option<ExportFormat>,
    pub output: Option<PathBuf>,
    pub stdout: bool,
}

pub async fn run(ctx: &AppContext, args: ExtractCommandArgs) -> AppResult<ExtractionOutcome> {
    extract_from_file(
        ctx,
        ExtractRequest {
            input: args.input,
            format: args.format,
            output: args.output,
            force_stdout: args.stdout,
        },
    )
    .await
}
