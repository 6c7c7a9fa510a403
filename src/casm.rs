extern crate clap;
use clap::*;

mod cmd_casm;

fn main() -> anyhow::Result<()> {
    let app = Command::new("casm")
        .version(crate_version!())
        .about("`casm` - Carbon Alpha Similarity Metrics")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_casm::angular::make_subcommand())
        .subcommand(cmd_casm::local::make_subcommand())
        .subcommand(cmd_casm::global::make_subcommand())
        .after_help(
            r###"Subcommands:

* angular - angle between the vectorized distance matrices (0-100)
* local   - clique cover of the similarity graph: internally consistent
            regions that together span the whole structure
* global  - one growing region per ascending threshold, scored as the
            average percent of reference residues captured

Input files are Ca distance matrices: a header row of residue IDs, then one
comma-separated row per residue. Name files `<ID>.foo.csv`; the part before
the first dot becomes the structure ID in coloring scripts.

"###,
        );

    // Check which subcommand the user ran...
    match app.get_matches().subcommand() {
        Some(("angular", sub_matches)) => cmd_casm::angular::execute(sub_matches),
        Some(("local", sub_matches)) => cmd_casm::local::execute(sub_matches),
        Some(("global", sub_matches)) => cmd_casm::global::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
