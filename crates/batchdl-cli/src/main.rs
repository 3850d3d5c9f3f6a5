use batchdl_lib::cli::{ResolvedCommand, parse_args, resolve_command, run_download};
use batchdl_lib::error::BatchDlError;
use std::process::ExitCode;

/// Exit status for an unusable destination directory, thread count or config file.
const EXIT_CONFIGURATION: u8 = 3;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<ExitCode, BatchDlError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = match resolve_command(args.command) {
        Ok(command) => command,
        Err(err) if err.is_configuration() => {
            tracing::error!("{}", err);
            return Ok(ExitCode::from(EXIT_CONFIGURATION));
        }
        Err(err) => return Err(err),
    };

    let report = match command {
        ResolvedCommand::Download(params) => run_download(params).await?,
    };

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
