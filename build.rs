use std::fs;

fn main() {
    // The bundled site config is parsed at runtime by `Config::compiled_default`;
    // reject a broken one before it ships.
    let default_config = "src/default_config.toml";
    println!("cargo:rerun-if-changed={default_config}");

    let content = fs::read_to_string(default_config)
        .unwrap_or_else(|e| panic!("cannot read bundled site config {default_config}: {e}"));

    if let Err(e) = content.parse::<toml::Table>() {
        panic!("bundled site config {default_config} is not valid TOML: {e}");
    }
}
