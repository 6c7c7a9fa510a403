use clap::*;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("angular")
        .about("Angular distance between two structures")
        .after_help(
            r###"
Vectorizes the upper triangle of each Ca distance matrix and reports the
angle between the two vectors, scaled to 0-100. 0 means identical.

Notes:
* Input: two distance matrix files (header of residue IDs, then one
  comma-separated row per residue). Plain or gzipped.
* The two files must describe the same alignment (equal residue counts).

Examples:
1. Score two conformations:
   casm angular 1abc.dmat.csv 2xyz.dmat.csv
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

    let cmp = super::load_comparison(ref_file, alt_file)?;
    let score = cmp.angular_distance()?;

    let mut writer = casm::writer(outfile)?;
    writeln!(writer, "{:.4}", score)?;

    Ok(())
}
