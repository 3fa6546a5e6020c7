use std::fs::File;
use std::io::Write;

use serde_json::json;
use zip::write::SimpleFileOptions;

/// Deterministic score source (splitmix64).
struct ScoreStream(u64);

impl ScoreStream {
    /// Next score in `[0, 1)`.
    fn next_score(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn main() {
    let mut scores = ScoreStream(42);

    let n_probes = 500;
    let probe_ids: Vec<String> = (0..n_probes).map(|i| format!("cg{i:08}")).collect();
    let chroms = ["chr1", "chr2", "chr3", "chr7", "chr10"];

    // probes.csv
    let mut probes_csv = csv::Writer::from_writer(Vec::new());
    probes_csv
        .write_record(["probe_id", "chrom", "position"])
        .expect("Failed to write probe header");
    for (i, id) in probe_ids.iter().enumerate() {
        let chrom = chroms[i % chroms.len()];
        let position = (1_000 + i * 137).to_string();
        probes_csv
            .write_record([id.as_str(), chrom, position.as_str()])
            .expect("Failed to write probe row");
    }
    let probes_csv = probes_csv.into_inner().expect("Failed to flush probe table");

    let decoding = json!({ "0": "Tumor_A", "1": "Tumor_B", "2": "Control" });
    let colors = json!({ "Tumor_A": "#d62728", "Tumor_B": "#1f77b4", "Control": "#7f7f7f" });

    let members: [(&str, Vec<u8>); 5] = [
        // Placeholder bytes: only the presence of the member is checked.
        ("model.onnx", b"onnx-placeholder".to_vec()),
        ("decoding.json", decoding.to_string().into_bytes()),
        ("probes.csv", probes_csv),
        ("calibration.npy", b"\x93NUMPY".to_vec()),
        ("colors.json", colors.to_string().into_bytes()),
    ];

    let archive_path = "sample_model.zip";
    let file = File::create(archive_path).expect("Failed to create archive");
    let mut writer = zip::ZipWriter::new(file);
    for (name, body) in &members {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start archive member");
        writer.write_all(body).expect("Failed to write archive member");
    }
    writer.finish().expect("Failed to finish archive");

    // Bed file: every other probe measured, calls drawn at random.
    let bed_path = "sample.bed";
    let mut bed = File::create(bed_path).expect("Failed to create bed file");
    writeln!(bed, "chrom\tstart\tend\tprobe_id\tmethylation_call\tscore")
        .expect("Failed to write bed header");
    let mut rows = 0;
    for (i, id) in probe_ids.iter().enumerate().step_by(2) {
        let start = 1_000 + i * 137;
        let score = scores.next_score();
        let call = u8::from(score > 0.5);
        writeln!(
            bed,
            "{}\t{start}\t{}\t{id}\t{call}\t{score:.3}",
            chroms[i % chroms.len()],
            start + 1
        )
        .expect("Failed to write bed row");
        rows += 1;
    }

    println!("Wrote {archive_path} ({n_probes} probes) and {bed_path} ({rows} rows)");
}
