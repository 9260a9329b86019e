//! shannon - Calculate the Shannon entropy of a file

fn main() {
    shannon_cli::main_entry("shannon", false)
}
