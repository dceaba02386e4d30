use anyhow::{Context, Result};
use clap::Parser;
use guard_patrol::CLIArgs;

fn main() -> Result<()> {
    guard_patrol::init_logging();
    let args = CLIArgs::parse();
    let (lab, guard) = guard_patrol::read_lab(&args.input_path).with_context(|| {
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

    let loop_positions = lab.loop_obstructions(&guard);
    println!("Valid obstruction positions:");
    for pos in &loop_positions {
        println!("{}", pos);
    }
    println!(
        "There is(are) {} location(s) which can make guard loops in given laboratory.",
        loop_positions.len()
    );

    Ok(())
}
