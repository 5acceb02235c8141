//! Parse text with inline math, inspect the nodes and write it back.
//!
//! Run with: RUST_LOG=math_inline=trace cargo run --example simple

use math_inline::{encode, from_str, to_string};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let text = "Euler :math[e^{i\\pi} + 1 = 0], pair :math[[a, b]], stray :math[x\\]], not foo:math[x].";

    // Parse into text and inline math nodes
    let doc = from_str(text);
    for math in doc.math() {
        println!("value: {:<16} encoded: {}", math.value(), encode(math.value()));
    }

    println!("\nJSON:\n{}\n", serde_json::to_string_pretty(&doc)?);

    // Serialize back; the literal `foo:math[x]` text gets its colon escaped
    let back = to_string(&doc);
    println!("{}", back);

    let values = |d: &math_inline::Document| -> Vec<String> {
        d.math().map(|m| m.value().to_string()).collect()
    };
    assert_eq!(values(&from_str(&back)), values(&doc));
    println!("✓ Round-trip successful");

    Ok(())
}
