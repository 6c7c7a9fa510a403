use clap::*;
use std::io::Write;

use casm::BranchBound;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("global")
        .about("Growing regions of global similarity")
        .after_help(
            r###"
Finds one maximum clique of the similarity graph per threshold. Each search
past the first is restricted to the neighborhood of the previous region, so
the regions grow as the notion of "the same distance" relaxes. The score is
the average percent of reference residues captured under each threshold.

Notes:
* Thresholds must be strictly ascending.
* --ref-total sets the reference residue count R behind the percents when
  the alignment dropped unmatched residues.
* --script emits a coloring script instead of the score table.

Examples:
1. Default thresholds of 1, 2, 4 and 8 Angstroms:
   casm global 1abc.dmat.csv 2xyz.dmat.csv

2. Custom thresholds, Chimera script:
   casm global 1abc.dmat.csv 2xyz.dmat.csv --thresholds 0.5,1.0,2.0 --script chimera
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
            Arg::new("thresholds")
                .long("thresholds")
                .num_args(1)
                .default_value("1.0,2.0,4.0,8.0")
                .help("Comma-separated ascending thresholds in Angstroms"),
        )
        .arg(
            Arg::new("ref-total")
                .long("ref-total")
                .num_args(1)
                .value_parser(value_parser!(usize))
                .help("Residue count of the reference structure [alignment length]"),
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
    let outfile = args.get_one::<String>("outfile").unwrap();
    let thresholds = super::parse_thresholds(args.get_one::<String>("thresholds").unwrap())?;

    let mut cmp = super::load_comparison(ref_file, alt_file)?;
    if let Some(&total) = args.get_one::<usize>("ref-total") {
        cmp = cmp.with_reference_total(total);
    }

    let solver = BranchBound::new();
    let regions = cmp.global_regions(&thresholds, &solver)?;

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
            let labels: Vec<String> = thresholds.iter().map(|t| t.to_string()).collect();
            let rows = cmp.region_scores(&regions);
            super::write_score_table(&mut writer, &labels, &rows)?;
        }
    }

    Ok(())
}
