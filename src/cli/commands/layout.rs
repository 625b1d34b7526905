//! Layout command - Show or write a lake layout

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::LakeArgs,
        output::{print_kv, print_section},
    },
    lake::{FrozenLakeEnv, LakeConfig, render_layout},
};

#[derive(Parser, Debug)]
#[command(about = "Show a lake layout")]
pub struct LayoutArgs {
    #[command(flatten)]
    pub lake: LakeArgs,

    /// Write the layout as JSON, e.g. to start a custom lake from the default one
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: LayoutArgs) -> Result<()> {
    let config: LakeConfig = args.lake.load()?;
    let env = FrozenLakeEnv::new(config.clone())?;

    print_section("Lake layout");
    print_kv("Size", &format!("{}x{}", env.rows(), env.cols()));
    print_kv("Start", &env.start().to_string());
    print_kv("Goal", &env.goal().to_string());
    print_kv("Holes", &env.holes().len().to_string());
    println!();
    print!("{}", render_layout(&env));

    if let Some(path) = &args.output {
        config
            .save(path)
            .with_context(|| format!("Failed to write layout to {}", path.display()))?;
        println!("\nLayout written to {}", path.display());
    }

    Ok(())
}
