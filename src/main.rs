//! shoplist
//!
//! Builds the shopping list for every selected recipe.
//! Usage: shoplist [data-root]

use tracing_subscriber::EnvFilter;

use shoplist::build_info::BuildInfo;
use shoplist::config::{resolve_root, RunPaths};
use shoplist::driver;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("shoplist=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let arg = std::env::args().nth(1);
    let root = resolve_root(arg.as_deref());
    eprintln!("{}", BuildInfo::current().run_banner(&root));

    let paths = RunPaths::from_root(&root)?;
    let summary = driver::run(&paths)?;

    println!(
        "Wrote {} items from {} recipes to {}",
        summary.lines,
        summary.recipes.len(),
        paths.output.display()
    );

    Ok(())
}
