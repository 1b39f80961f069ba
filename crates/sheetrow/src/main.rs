use std::io;

use clap::Parser;
use sheetrow::args::Args;
use sheetrow_error::ResultExt;

fn main() {
    let args = Args::parse();
    logutil::configure_global_logger(
        logutil::level_from_verbosity(tracing::Level::INFO, args.verbose),
        args.log_format.into(),
        io::stdout,
    );

    // Nested result. Outer result for the panic, inner is execution result.
    let result = std::panic::catch_unwind(|| {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build tokio runtime")?;

        runtime.block_on(sheetrow::run::run(args))
    });

    match result {
        Ok(Err(err)) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("PANIC: {err:?}");
            std::process::exit(2);
        }
        Ok(Ok(())) => (),
    }
}
