use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";

/// Every bundled key, with the TOML type `Config` deserializes it as.
const EXPECTED_KEYS: [(&str, &str, &str); 7] = [
    ("paths", "content", "string"),
    ("paths", "static", "string"),
    ("paths", "output", "string"),
    ("paths", "template", "string"),
    ("build", "clean", "boolean"),
    ("build", "fail_fast", "boolean"),
    ("build", "extension", "string"),
];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("Failed to read {DEFAULT_CONFIG}: {e}"));

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid {DEFAULT_CONFIG}: {e}"),
    };

    for (section, key, expected) in EXPECTED_KEYS {
        let Some(value) = table.get(section).and_then(|s| s.get(key)) else {
            panic!("{DEFAULT_CONFIG} is missing [{section}] {key}");
        };
        if value.type_str() != expected {
            panic!(
                "{DEFAULT_CONFIG}: [{section}] {key} must be a {expected}, found {}",
                value.type_str()
            );
        }
    }
}
