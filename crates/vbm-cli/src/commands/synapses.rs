//! `vbm synapses`: histograms of synapse counts between two soma types.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use vbm::summary::SideCounts;
use vbm::{synapse_histogram, Side};

/// Which somas to list after the histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    pub which: char,
    pub min: usize,
    pub max: usize,
    /// 0 for no limit.
    pub limit: usize,
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn write_side(out: &mut dyn Write, side: &SideCounts, axonal: char, dendritic: char) -> Result<()> {
    let letter = side.soma_type.as_char().to_ascii_uppercase();
    writeln!(
        out,
        "{axonal}-to-{dendritic} synapse counts for the {} {letter} somas:",
        side.somas()
    )?;
    writeln!(out, "#{axonal}to{dendritic}\t#{letter}\t%{letter}")?;
    for (count, somas) in side.histogram().into_iter().enumerate() {
        // Shortest round-trip form, so whole percentages keep their `.0`.
        writeln!(out, "{count}\t{somas}\t{:?}%", percent(somas, side.somas()))?;
    }
    writeln!(out, "Average synapse count is {:.2}", side.average())?;
    Ok(())
}

pub fn run(
    input: &Path,
    axonal: char,
    dendritic: char,
    listing: Option<Listing>,
    out: &mut dyn Write,
) -> Result<()> {
    let (_, _, model) = super::load(input)?;
    let histogram = synapse_histogram(&model, axonal, dendritic)
        .with_context(|| format!("counting synapses in {}", input.display()))?;

    let axonal = axonal.to_ascii_uppercase();
    let dendritic = dendritic.to_ascii_uppercase();

    writeln!(out, "Model file: {}", input.display())?;
    writeln!(
        out,
        "Got {} {axonal} somas and {} {dendritic} somas",
        histogram.axonal.somas(),
        histogram.dendritic.somas()
    )?;
    writeln!(out, "Got {} {axonal}-to-{dendritic} synapses", histogram.synapses)?;
    writeln!(out)?;
    write_side(out, &histogram.axonal, axonal, dendritic)?;
    writeln!(out)?;
    write_side(out, &histogram.dendritic, axonal, dendritic)?;

    let Some(listing) = listing else {
        return Ok(());
    };
    let which = listing.which.to_ascii_uppercase();
    let side = if which == axonal {
        Side::Axonal
    } else if which == dendritic {
        Side::Dendritic
    } else {
        bail!("--which {which} must be {axonal} or {dendritic}");
    };

    writeln!(out)?;
    let limit_note = if listing.limit > 0 {
        format!(" (limit {})", listing.limit)
    } else {
        String::new()
    };
    writeln!(
        out,
        "{which} somas with between {} and {} {axonal}-to-{dendritic} synapses{limit_note}:",
        listing.min, listing.max
    )?;
    writeln!(out, "id\t#{axonal}to{dendritic}")?;
    let somas = histogram.somas_between(side, listing.min, listing.max, listing.limit);
    for (id, count) in &somas {
        writeln!(out, "{id}\t{count}")?;
    }
    if listing.limit > 0 && somas.len() >= listing.limit {
        writeln!(out, "LIMIT {} REACHED", listing.limit)?;
    } else {
        writeln!(out, "ALL {}", somas.len())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use vbm::{ModelBuilder, SomaType};

    fn write_model(dir: &Path) -> std::path::PathBuf {
        let model = ModelBuilder::new()
            .soma_types([b'N', b'P'].into_iter().filter_map(SomaType::new))
            .bare_soma(0, 1, [0, 0, 0])
            .bare_soma(0, 2, [0, 0, 0])
            .bare_soma(1, 10, [0, 0, 0])
            .synapse(1, 1, 10, [0, 0, 0])
            .synapse(2, 1, 10, [0, 0, 0])
            .build();
        let path = dir.join("model.vbm");
        fs::write(&path, vbm::encode_model(&model).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_histogram_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(dir.path());

        let mut out = Vec::new();
        run(&path, 'n', 'p', None, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Got 2 N somas and 1 P somas"));
        assert!(out.contains("Got 2 N-to-P synapses"));
        assert!(out.contains("#NtoP\t#N\t%N\n0\t1\t50.0%\n1\t0\t0.0%\n2\t1\t50.0%\n"));
        assert!(out.contains("#NtoP\t#P\t%P\n0\t0\t0.0%\n1\t0\t0.0%\n2\t1\t100.0%\n"));
        assert!(out.contains("Average synapse count is 1.00"));
        assert!(out.contains("Average synapse count is 2.00"));
        assert!(!out.contains("somas with between"));
    }

    #[test]
    fn test_listing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(dir.path());

        let listing = Listing {
            which: 'N',
            min: 0,
            max: 0,
            limit: 0,
        };
        let mut out = Vec::new();
        run(&path, 'N', 'P', Some(listing), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("N somas with between 0 and 0 N-to-P synapses:\nid\t#NtoP\n2\t0\nALL 1\n"));

        let listing = Listing {
            which: 'n',
            min: 0,
            max: 5,
            limit: 1,
        };
        let mut out = Vec::new();
        run(&path, 'N', 'P', Some(listing), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("(limit 1):\nid\t#NtoP\n1\t2\nLIMIT 1 REACHED\n"));
    }

    #[test]
    fn test_bad_letters() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(dir.path());

        let err = run(&path, 'N', 'Z', None, &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("type letter 'Z'"));

        let listing = Listing {
            which: 'M',
            min: 0,
            max: 1,
            limit: 0,
        };
        let err = run(&path, 'N', 'P', Some(listing), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("--which M"));
    }
}
