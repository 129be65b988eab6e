// Fetches the English tokenizer binary into OUT_DIR; `nlp` embeds it.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR is set for build scripts");
    nlprule_build::BinaryBuilder::new(&["en"], out_dir)
        .build()
        .and_then(|b| b.validate())
        .expect("failed to build nlprule binaries");
}
