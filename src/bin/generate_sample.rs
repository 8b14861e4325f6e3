use anyhow::{Context, Result};

use tweet_explorer::config::DEFAULT_DATA_FILE;
use tweet_explorer::data::model::columns;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Topic clusters: (embedding centre, sentiment bias, phrases).
const TOPICS: [([f64; 2], f64, [&str; 4]); 3] = [
    (
        [-4.0, 2.0],
        0.5,
        [
            "Loving the new release",
            "Great match tonight",
            "Coffee & sunshine",
            "Best concert ever",
        ],
    ),
    (
        [3.0, 3.5],
        -0.4,
        [
            "Train delayed again",
            "Why is the app down",
            "Rain all week",
            "Lost my keys < again >",
        ],
    ),
    (
        [0.5, -3.0],
        0.0,
        [
            "Reading about the election",
            "Quarterly report is out",
            "Café opens at 9",
            "New study on sleep",
        ],
    ),
];

const MONTHS: [&str; 4] = ["April", "February", "January", "March"];

/// Render the phrase in one of the raw forms the dataset column contains.
fn messy_text(phrase: &str, style: usize) -> String {
    let html = phrase.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;");
    match style {
        0 => html,
        1 => format!("['{html}']"),
        2 => {
            let escaped: String = phrase
                .bytes()
                .map(|b| {
                    if b.is_ascii() {
                        (b as char).to_string()
                    } else {
                        format!("\\x{b:02x}")
                    }
                })
                .collect();
            format!("b'{escaped}\\n#sample'")
        }
        _ => format!("  {html}\n\t(more soon)  "),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "",
        columns::RAW_TEXT,
        columns::MONTH,
        columns::SENTIMENT,
        columns::SUBJECTIVITY,
        columns::DIM1,
        columns::DIM2,
    ])?;

    let n_rows = 600;
    for row in 0..n_rows {
        let (centre, bias, phrases) = &TOPICS[rng.below(TOPICS.len())];
        let phrase = phrases[rng.below(phrases.len())];
        let month = MONTHS[rng.below(MONTHS.len())];

        let sentiment = rng.gauss(*bias, 0.3).clamp(-1.0, 1.0);
        let subjectivity = rng.next_f64();
        let dim1 = rng.gauss(centre[0], 1.2);
        let dim2 = rng.gauss(centre[1], 1.2);

        writer.write_record([
            row.to_string(),
            messy_text(phrase, rng.below(4)),
            month.to_string(),
            format!("{sentiment:.4}"),
            format!("{subjectivity:.4}"),
            format!("{dim1:.5}"),
            format!("{dim2:.5}"),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n_rows} posts across {} months to {output_path}", MONTHS.len());
    Ok(())
}
