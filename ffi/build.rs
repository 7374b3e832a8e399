//! Generate the C header for the exported functions into `OUT_DIR`.

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out_dir = std::env::var("OUT_DIR").unwrap_or_else(|_| ".".to_string());
    let header = std::path::Path::new(&out_dir).join("form2request.h");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("FORM2REQUEST_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(&header);
        }
        Err(err) => println!("cargo:warning=could not generate C header: {err}"),
    }
}
