//! Solve command - Deduce safe cells and mines from recorded observations

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::{
    adapters::repository_for_path,
    cli::output::{format_cells, print_kv, print_section, print_subsection},
    minesweeper::KnowledgeBase,
    types::{BoardSize, Cell},
};

#[derive(Parser, Debug)]
#[command(about = "Deduce what is known from a file of observations")]
pub struct SolveArgs {
    /// JSON file with `height`, `width` and `observations`
    pub observations: PathBuf,

    /// Resume from a saved knowledge base (.json or .msgpack)
    #[arg(long)]
    pub knowledge: Option<PathBuf>,

    /// Save the resulting knowledge base (.json or .msgpack)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Report what is known about a cell, given as `row,col` (repeatable)
    #[arg(long = "cell", value_name = "ROW,COL")]
    pub cells: Vec<Cell>,
}

/// A revealed cell and the number of mines around it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub row: usize,
    pub col: usize,
    pub count: usize,
}

/// Input file of the solve command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationFile {
    pub height: usize,
    pub width: usize,
    pub observations: Vec<Observation>,
}

/// Feed every observation into the knowledge base, in file order.
pub fn apply_observations(knowledge: &mut KnowledgeBase, observations: &[Observation]) -> Result<()> {
    for (i, observation) in observations.iter().enumerate() {
        let cell = Cell::new(observation.row, observation.col);
        knowledge
            .add_knowledge(cell, observation.count)
            .with_context(|| format!("observation #{} at {cell} is inconsistent", i + 1))?;
    }
    Ok(())
}

/// What the knowledge base knows about one cell.
pub fn describe_cell(knowledge: &KnowledgeBase, cell: Cell) -> Result<&'static str> {
    knowledge.size().check(cell)?;
    let status = if knowledge.moves_made().contains(&cell) {
        "revealed"
    } else if knowledge.safes().contains(&cell) {
        "safe"
    } else if knowledge.mines().contains(&cell) {
        "mine"
    } else {
        "unknown"
    };
    Ok(status)
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let file = File::open(&args.observations)
        .with_context(|| format!("failed to open {}", args.observations.display()))?;
    let input: ObservationFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", args.observations.display()))?;
    let size = BoardSize::new(input.height, input.width)?;

    let mut knowledge = match &args.knowledge {
        Some(path) => {
            let loaded = repository_for_path(path)
                .load(path)
                .with_context(|| format!("failed to load knowledge from {}", path.display()))?;
            if loaded.size() != size {
                bail!(
                    "saved knowledge is for a {} board but observations are for {}",
                    loaded.size(),
                    size
                );
            }
            loaded
        }
        None => KnowledgeBase::new(size),
    };

    apply_observations(&mut knowledge, &input.observations)?;
    print_knowledge(&knowledge);

    if !args.cells.is_empty() {
        print_subsection("Queried cells");
        for &cell in &args.cells {
            print_kv(&cell.to_string(), describe_cell(&knowledge, cell)?);
        }
    }

    if let Some(path) = &args.save {
        repository_for_path(path)
            .save(&knowledge, path)
            .with_context(|| format!("failed to save knowledge to {}", path.display()))?;
        println!("\n✓ Knowledge saved to: {}", path.display());
    }

    Ok(())
}

fn print_knowledge(knowledge: &KnowledgeBase) {
    let unplayed_safes: Vec<&Cell> = knowledge
        .safes()
        .iter()
        .filter(|&cell| !knowledge.moves_made().contains(cell))
        .collect();

    print_section(&format!("Knowledge for a {} board", knowledge.size()));
    print_kv("Moves made", &knowledge.moves_made().len().to_string());
    print_kv("Safe, unplayed", &format_cells(unplayed_safes));
    print_kv("Mines", &format_cells(knowledge.mines()));
    match knowledge.make_safe_move() {
        Some(cell) => print_kv("Suggested move", &cell.to_string()),
        None => print_kv("Suggested move", "none proven safe, guess required"),
    }

    if !knowledge.knowledge().is_empty() {
        print_subsection("Open sentences");
        for sentence in knowledge.knowledge() {
            println!("  {sentence}");
        }
    }
}
