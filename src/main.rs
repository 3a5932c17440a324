use anyhow::Result;
use prefdel::model::{run_harness, HarnessConfig};
use std::io::{self, Write};

fn main() -> Result<()> {
    // Statistics go to stdout; logs stay on stderr and default to warnings
    prefdel::init_tracing("warn");

    let config = HarnessConfig::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run_harness(&config, &mut out)?;
    out.flush()?;

    Ok(())
}
