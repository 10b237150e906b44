//! Print how much of one ingredient the current selection needs
//! Usage: shoplist-lookup <ingredient> [data-root]

use tracing_subscriber::EnvFilter;

use shoplist::config::{resolve_root, RunPaths};
use shoplist::driver;
use shoplist::output::format_line;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("shoplist=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(ingredient) = args.get(1) else {
        eprintln!("Usage: shoplist-lookup <ingredient> [data-root]");
        std::process::exit(2);
    };

    let root = resolve_root(args.get(2).map(|s| s.as_str()));
    let paths = RunPaths::from_root(&root)?;
    let (cart, _) = driver::load_and_build(&paths)?;

    let name = ingredient.trim().to_lowercase();
    let lines = cart.find(&name);
    if lines.is_empty() {
        println!("{} is not on the list", name);
        return Ok(());
    }

    for line in lines {
        println!("{}\t({})", format_line(line), line.recipe);
    }

    Ok(())
}
