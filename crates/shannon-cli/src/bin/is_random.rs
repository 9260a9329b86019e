//! is-random - Report whether a file's bytes are (virtually) truly random
//!
//! Same arguments as `shannon`, always printing the randomness verdict.

fn main() {
    shannon_cli::main_entry("is-random", true)
}
