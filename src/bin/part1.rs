use anyhow::{Context, Result};
use clap::Parser;
use guard_patrol::{CLIArgs, PatrolEnd};
use tracing::warn;

fn main() -> Result<()> {
    guard_patrol::init_logging();
    let args = CLIArgs::parse();
    let (mut lab, guard) = guard_patrol::read_lab(&args.input_path).with_context(|| {
        format!(
            "Failed to read laboratory from given file({}).",
            args.input_path.display()
        )
    })?;

    println!("Original map:");
    print!("{}", lab.view(guard.as_ref()));
    let Some(guard) = guard else {
        println!("Guard symbol not found in given laboratory, skip patrol simulation.");
        return Ok(());
    };
    println!("Found guard '{}' at position {}.", guard.dir(), guard.pos());

    let patrol = lab.patrol(&guard);
    println!("Map after the guard patrols:");
    print!("{}", lab);
    match patrol.end() {
        PatrolEnd::Exited => println!(
            "The guard will visit {} position(s) before leaving given laboratory.",
            patrol.visited_n()
        ),
        PatrolEnd::Looped => {
            warn!("Guard is trapped by walls and never leaves the laboratory.");
            println!(
                "The guard is trapped in a loop after visiting {} position(s).",
                patrol.visited_n()
            );
        }
    }

    Ok(())
}
