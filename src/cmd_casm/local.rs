use clap::*;
use std::io::Write;

use casm::BranchBound;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("local")
        .about("Regions of local similarity")
        .after_help(
            r###"
Builds the similarity graph of the two structures under one threshold and
reports its clique cover: disjoint regions in which all residue pairs sit at
the same distance (within the threshold) in both structures. Every residue
ends up in exactly one region, singletons included.

Notes:
* The cover is greedy (peel off the maximum clique, repeat), which is a
  heuristic covering, not a minimum partition.
* --script emits a coloring script instead of the score table.

Examples:
1. Cover under the default 1.0 Angstrom threshold:
   casm local 1abc.dmat.csv 2xyz.dmat.csv

2. PyMOL coloring script for a looser threshold:
   casm local 1abc.dmat.csv 2xyz.dmat.csv -t 2.0 --script pymol
"###,
        )
        .arg(
            Arg::new("reference")
                .required(true)
                .index(1)
                .help("Distance matrix of the reference structure"),
        )
        .arg(
            Arg::new("structure")
                .required(true)
                .index(2)
                .help("Distance matrix of the structure to compare"),
        )
        .arg(
            Arg::new("threshold")
                .short('t')
                .long("threshold")
                .num_args(1)
                .default_value("1.0")
                .value_parser(value_parser!(f64))
                .help("Similarity threshold in Angstroms"),
        )
        .arg(
            Arg::new("script")
                .long("script")
                .num_args(1)
                .value_parser(["pymol", "chimera"])
                .help("Emit a coloring script instead of the score table"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let ref_file = args.get_one::<String>("reference").unwrap();
    let alt_file = args.get_one::<String>("structure").unwrap();
    let threshold = *args.get_one::<f64>("threshold").unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    let cmp = super::load_comparison(ref_file, alt_file)?;
    let solver = BranchBound::new();
    let regions = cmp.local_regions(threshold, &solver);

    let mut writer = casm::writer(outfile)?;
    match args.get_one::<String>("script").map(String::as_str) {
        Some("pymol") => {
            for line in casm::libs::viz::pymol_script(&cmp, &regions) {
                writeln!(writer, "{}", line)?;
            }
        }
        Some("chimera") => {
            for line in casm::libs::viz::chimera_script(&cmp, &regions) {
                writeln!(writer, "{}", line)?;
            }
        }
        _ => {
            let labels: Vec<String> = (1..=regions.len()).map(|i| i.to_string()).collect();
            let rows = cmp.region_scores(&regions);
            super::write_score_table(&mut writer, &labels, &rows)?;
        }
    }

    Ok(())
}
