use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use quote::quote;
use std::{env, fs, path::PathBuf};
use syn::{Ident, LitStr};

/// `generate_fixture_tests!("tests/fixtures")` expands to one `#[test] fn`
/// per `*.json` file found in the given directory (resolved relative to the
/// invoking crate's `CARGO_MANIFEST_DIR`), each calling
/// `steensgaard_test_utils::run_fixture` on that file.
#[proc_macro]
pub fn generate_fixture_tests(input: TokenStream) -> TokenStream {
    let directory = syn::parse_macro_input!(input as LitStr);
    let dir_str = directory.value();

    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));
    let dir_path = manifest_dir.join(&dir_str);

    let entries = fs::read_dir(&dir_path)
        .unwrap_or_else(|e| panic!("failed to read fixture directory {dir_path:?}: {e}"));

    let tests = entries.filter_map(|entry| {
        let entry = entry.expect("failed to read directory entry");
        let path = entry.path();
        if path.extension().map(|ext| ext == "json") != Some(true) {
            return None;
        }

        let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
        let test_name = Ident::new(
            &format!("fixture_{}", stem.to_case(Case::Snake)),
            proc_macro2::Span::call_site(),
        );
        let relative_path = format!("{dir_str}/{}", path.file_name().unwrap().to_string_lossy());

        Some(quote! {
            #[test]
            fn #test_name() {
                let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(#relative_path);
                steensgaard_test_utils::run_fixture(&path);
            }
        })
    });

    TokenStream::from(quote! { #(#tests)* })
}
