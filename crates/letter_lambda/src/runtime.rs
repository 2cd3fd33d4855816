pub use letter_core::{contract, fragment, letter, outcome, storage_keys};
