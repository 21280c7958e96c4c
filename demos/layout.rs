fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let input = std::env::args()
        .nth(1)
        .map(|path| std::fs::read_to_string(&path).expect("Failed to read file"))
        .unwrap_or_else(|| {
            r#"{
    "cushion_name": "Window Seat",
    "top_base": 59, "bottom_base": 114, "height": 26, "thickness": 3,
    "piping": "Yes", "ties": "2 Side", "zipper": "Long Side"
}"#
            .to_string()
        });

    let config = cushion_diagram::EngineConfig::new(cushion_diagram::Viewport::new(3.5, 4.25));
    match cushion_diagram::layout_json(&input, &config) {
        Ok(diagram) => match serde_json::to_string_pretty(&diagram) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: {e}"),
        },
        Err(e) => eprintln!("Error: {e:?}"),
    }
}
