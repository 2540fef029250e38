use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    // Copy map-config.json to OUT_DIR for include_str
    let config_src = Path::new("../fixtures/map-config.json");
    let config_dest = Path::new(&out_dir).join("map-config.json");
    if config_src.exists() {
        fs::copy(config_src, &config_dest).unwrap();
    } else {
        fs::write(&config_dest, "{}\n").unwrap();
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/map-config.json");
    // Read through option_env! in main.rs
    println!("cargo:rerun-if-env-changed=SCHOOL_MAP_DATA_URL");
    println!("cargo:rerun-if-env-changed=SCHOOL_MAP_API_KEY");
}
