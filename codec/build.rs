fn main() {
    // libspeex is only linked when the speex engine is compiled in.
    if std::env::var_os("CARGO_FEATURE_SPEEX").is_some() {
        println!("cargo:rustc-link-lib=speex");
    }
}
