mod trace;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flick_core::config;
use flick_core::geometry::{Rotor, Vec2};
use flick_core::menu::MenuTree;
use flick_core::nav::Navigator;
use std::path::PathBuf;
use std::sync::Arc;
use trace::TraceCommand;

#[derive(Parser, Debug)]
#[command(name = "flick-replay", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Replay a recorded trace; `-` reads stdin.
    Replay {
        file: PathBuf,
        /// Print the stack after every command
        #[arg(short, long)]
        verbose: bool,
    },
    /// Apply deltas given as `dx,dy`.
    Delta {
        #[arg(required = true, allow_hyphen_values = true, value_parser = trace::parse_delta)]
        deltas: Vec<Vec2>,
        /// Print the stack after every delta
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the default menu tree.
    Tree,
    /// Write the default config file if there is none, and print its path.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Replay { file, verbose }) => {
            let text = if file.as_os_str() == "-" {
                std::io::read_to_string(std::io::stdin())?
            } else {
                fs_err::read_to_string(&file)?
            };
            let commands = trace::parse_trace(&text)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            replay(&commands, verbose)
        }
        Some(Commands::Delta { deltas, verbose }) => {
            let commands: Vec<_> = deltas.into_iter().map(TraceCommand::Delta).collect();
            replay(&commands, verbose)
        }
        Some(Commands::Tree) => {
            print_tree(&MenuTree::default());
            Ok(())
        }
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn replay(commands: &[TraceCommand], verbose: bool) -> anyhow::Result<()> {
    let config = config::load_or_default();
    let mut nav = Navigator::new(Arc::new(MenuTree::default()), config.geometry)?;

    for (step, command) in commands.iter().enumerate() {
        match command {
            TraceCommand::Reset => nav.reset(),
            TraceCommand::Delta(delta) => {
                if let Err(e) = nav.apply_delta(*delta) {
                    log::warn!("Step {}: {}", step + 1, e);
                }
            }
        }
        if verbose {
            println!("{:>4}  {}", step + 1, describe_stack(&nav));
        }
    }

    if !verbose {
        println!("{}", describe_stack(&nav));
    }
    match nav.selected_leaf_item() {
        Some(item) => match item.action() {
            Some(action) => println!("selected {} -> {}", item.label, action.name),
            None => println!("selected {} (no action)", item.label),
        },
        None => println!("nothing selected"),
    }
    Ok(())
}

fn describe_stack(nav: &Navigator) -> String {
    let pos = nav.global_pos();
    let labels: Vec<String> = nav
        .branches()
        .iter()
        .map(|b| match nav.item(b) {
            Some(item) => format!("{} [{}]", item.label, b.rot.compass()),
            None => format!("{} [{}]", b.item, b.rot.compass()),
        })
        .collect();
    let stack = if labels.is_empty() {
        "idle".to_owned()
    } else {
        labels.join(" > ")
    };
    format!("({:.1}, {:.1})  {}", pos.x, pos.y, stack)
}

fn print_tree(tree: &MenuTree) {
    for rot in Rotor::all() {
        for (depth, id) in tree.outline(tree.root(rot)) {
            let Some(item) = tree.get(id) else { continue };
            if depth == 0 {
                println!("{:<8} {}", rot.to_string(), item.label);
            } else {
                println!("{:<8} {}{}", "", "  ".repeat(depth), item.label);
            }
        }
    }
}
