use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;

use ficoscan::{cli, config, logging, pipeline, report, scanner, source, util};

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_opts = cli::parse();
    logging::init_logging(cli_opts.log_json);

    let loaded = config::load_config(cli_opts.config_path.as_deref())?;
    let mut cfg = loaded.config;
    util::apply_cli_overrides(&mut cfg, &cli_opts)?;

    let total_len = source::input_len(&cli_opts.file)?;
    info!(
        "starting run_id={} input={} bytes={} workers={} timeout_ms={} config_hash={}",
        cfg.run_id,
        cli_opts.file.display(),
        total_len,
        cfg.workers,
        cfg.timeout_ms,
        loaded.config_hash
    );

    let matcher: Arc<dyn scanner::TokenMatcher> = Arc::from(scanner::build_token_matcher(&cfg)?);
    let outcome = pipeline::run_pipeline(&cfg, &cli_opts.file, total_len, matcher, start)?;

    let summary = &outcome.summary;
    info!(
        "file search completed in {:.0} ms: {}",
        summary.elapsed_ms,
        serde_json::to_string(summary)?
    );

    let report = report::Report::from_results(&outcome.results);
    let stdout = std::io::stdout();
    let renderer = report::build_renderer(
        util::format_from_cli(cli_opts.format),
        stdout.is_terminal(),
    );
    let mut out = stdout.lock();
    renderer.render(&report, &mut out)?;
    out.flush()?;

    Ok(())
}
