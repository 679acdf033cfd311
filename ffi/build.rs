//! Generates `include/fleet.h` for the native hosts.

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR");
    let header = format!("{crate_dir}/include/fleet.h");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("FLEET_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(header);
        }
        // Header generation is best-effort.
        Err(e) => println!("cargo:warning=fleet.h not generated: {e}"),
    }
}
