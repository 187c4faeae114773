use anyhow::Result;

use renum::{app, cli};

fn main() -> Result<()> {
    let args = cli::parse();
    app::run(args)
}
