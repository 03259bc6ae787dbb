use anyhow::Context;
use env_logger::{Builder, Env};
use platform::NativeSplash;
use shell::ShellConfig;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    // hold the splash before anything else can paint
    let mut splash = NativeSplash::new();
    shell::splash::startup(&mut splash);

    let config = ShellConfig::default();
    log::info!("starting shell for {}", config.target_url);
    platform::run(config, splash).context("shell window failed")?;
    log::info!("shell closed");
    Ok(())
}
